//! Tempo.co search results.

use super::{FieldRule, SiteProfile};
use crate::models::Platform;

pub static PROFILE: SiteProfile = SiteProfile {
    platform: Platform::Tempo,
    base_url: "https://www.tempo.co",
    search_url: "https://www.tempo.co/search?q={query}&page={page}",
    blocks: &[
        "div.card",
        "article.card",
        "div.article",
        "article.article",
        "div.list-item",
        "article.list-item",
        "div.news-item",
        "article.news-item",
    ],
    title: FieldRule::text(&["h2.title", "h3.title", "h2.judul"]),
    date: FieldRule::text(&["span.date", "div.date", "span.tanggal"]),
    link: FieldRule::attr(&["a[href]"], "href"),
    summary: &[],
    date_segment: None,
    date_formats: &["%d %b %Y, %H:%M WIB", "%d/%m/%Y %H:%M"],
    retry: false,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PublishedAt;
    use crate::scrapers::extract;
    use chrono::NaiveDate;

    #[test]
    fn test_card_with_indonesian_month() {
        let html = r#"
            <div class="card">
              <a href="/politik/banjir-anggaran"><h2 class="judul">Anggaran Banjir Dipangkas</h2></a>
              <span class="tanggal">14 Mei 2024, 09:00 WIB</span>
            </div>
        "#;
        let page = extract(&PROFILE, html, "banjir").unwrap();
        let c = &page.candidates[0];
        assert_eq!(c.link, "https://www.tempo.co/politik/banjir-anggaran");
        assert_eq!(
            c.published_at,
            PublishedAt::Resolved(NaiveDate::from_ymd_opt(2024, 5, 14).unwrap())
        );
    }
}
