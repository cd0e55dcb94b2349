//! Liputan6.com search results.

use super::{FieldRule, SiteProfile};
use crate::models::Platform;

pub static PROFILE: SiteProfile = SiteProfile {
    platform: Platform::Liputan6,
    base_url: "https://www.liputan6.com",
    search_url: "https://www.liputan6.com/search?q={query}&page={page}",
    blocks: &[
        "article.articles--item",
        "div.articles--item",
        "article.article",
        "div.article",
        "article.list-item",
        "div.list-item",
        "article.news-item",
        "div.news-item",
    ],
    title: FieldRule::text(&["h4.articles--title", "h3.articles--title", "h2.title"]),
    date: FieldRule::text(&["span.articles--date", "div.articles--date", "time"]),
    link: FieldRule::attr(&["a[href]"], "href"),
    summary: &[],
    date_segment: None,
    date_formats: &["%d %b %Y, %H:%M WIB", "%d/%m/%Y %H:%M"],
    retry: false,
};
