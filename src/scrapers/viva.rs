//! Viva.co.id search results.
//!
//! Dates show up as `14 Mei 2025, 09:00 WIB` or `14/05/2025 09:00`.

use super::{FieldRule, SiteProfile};
use crate::models::Platform;

pub static PROFILE: SiteProfile = SiteProfile {
    platform: Platform::Viva,
    base_url: "https://www.viva.co.id",
    search_url: "https://www.viva.co.id/search?q={query}&page={page}",
    blocks: &[
        "div.article-list",
        "article.article-list",
        "div.article",
        "article.article",
        "div.list-item",
        "article.list-item",
        "div.news-item",
        "article.news-item",
    ],
    title: FieldRule::text(&["h3.title", "h4.title", "h2.article-title"]),
    date: FieldRule::text(&["span.date", "div.date", "time"]),
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
    fn test_both_date_styles() {
        let html = r#"
            <div class="article-list">
              <a href="/berita/1"><h3 class="title">Banjir Bandang Garut</h3></a>
              <span class="date">14 Mei 2025, 09:00 WIB</span>
            </div>
            <div class="article-list">
              <a href="/berita/2"><h4 class="title">Korban Banjir Bertambah</h4></a>
              <div class="date">14/05/2025 18:20</div>
            </div>
        "#;
        let page = extract(&PROFILE, html, "banjir").unwrap();
        let may14 = PublishedAt::Resolved(NaiveDate::from_ymd_opt(2025, 5, 14).unwrap());
        assert_eq!(page.candidates.len(), 2);
        assert!(page.candidates.iter().all(|c| c.published_at == may14));
    }
}
