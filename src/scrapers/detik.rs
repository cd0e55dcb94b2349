//! Detik.com search results.
//!
//! Each hit is an `<article>`; the headline is `h3.media__title` (or
//! `h3.dtr-ttl` on the newer layout) and the publication time sits in the
//! `title` attribute of the inner span of `span.media__date`, e.g.
//! `Senin, 15 Jan 2024 10:00 WIB` rendered as `15 Jan 2024 10:00 WIB`.

use super::{FieldRule, SiteProfile};
use crate::models::Platform;

pub static PROFILE: SiteProfile = SiteProfile {
    platform: Platform::Detik,
    base_url: "https://www.detik.com",
    search_url: "https://www.detik.com/search/searchall?query={query}&page={page}&result_type=relevansi",
    blocks: &["article"],
    title: FieldRule::text(&["h3.media__title", "h3.dtr-ttl"]),
    date: FieldRule::attr(&["span.media__date span[title]"], "title"),
    link: FieldRule::attr(&["a[href]"], "href"),
    summary: &[],
    date_segment: None,
    date_formats: &["%d %b %Y %H:%M WIB"],
    retry: false,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PublishedAt;
    use crate::scrapers::extract;
    use chrono::NaiveDate;

    const PAGE: &str = r#"
        <html><body>
        <article>
          <a href="https://news.detik.com/berita/d-7140000/banjir-jakarta-meluas">
            <h3 class="media__title">Banjir Jakarta Meluas</h3>
          </a>
          <span class="media__date"><span title="15 Jan 2024 10:00 WIB">2 jam yang lalu</span></span>
        </article>
        <article>
          <a href="https://news.detik.com/berita/d-7140001/harga-beras"><h3 class="dtr-ttl">Harga Beras Naik</h3></a>
        </article>
        </body></html>
    "#;

    #[test]
    fn test_extracts_title_attribute_date() {
        let page = extract(&PROFILE, PAGE, "banjir").unwrap();
        assert_eq!(page.blocks_found, 2);
        assert_eq!(page.keyword_misses, 1);
        let c = &page.candidates[0];
        assert_eq!(c.title, "Banjir Jakarta Meluas");
        assert_eq!(c.raw_date.as_deref(), Some("15 Jan 2024 10:00 WIB"));
        assert_eq!(
            c.published_at,
            PublishedAt::Resolved(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
        assert_eq!(
            c.link,
            "https://news.detik.com/berita/d-7140000/banjir-jakarta-meluas"
        );
    }

    #[test]
    fn test_newer_title_class() {
        let page = extract(&PROFILE, PAGE, "beras").unwrap();
        assert_eq!(page.candidates.len(), 1);
        assert_eq!(page.candidates[0].title, "Harga Beras Naik");
        assert_eq!(page.candidates[0].published_at, PublishedAt::Unresolved);
    }
}
