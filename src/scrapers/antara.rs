//! AntaraNews.com search results.
//!
//! Antara's search matches on article bodies, so many hits never mention the
//! keyword in the headline. A block is kept when either the title or the
//! excerpt (`p.summary` / `div.excerpt`) contains the keyword. Result links are
//! site-relative.

use super::{FieldRule, SiteProfile};
use crate::models::Platform;

pub static PROFILE: SiteProfile = SiteProfile {
    platform: Platform::Antara,
    base_url: "https://www.antaranews.com",
    search_url: "https://www.antaranews.com/search?q={query}&page={page}",
    blocks: &[
        "div.search-result-item",
        "article.search-result-item",
        "div.news-article",
        "article.news-article",
        "div.post-item",
        "article.post-item",
        "div.article-item",
        "article.article-item",
        "div.news-post",
        "article.news-post",
        "div.post",
        "article.post",
        "div.article",
        "article.article",
        "div.list-item",
        "article.list-item",
        "div.news-item",
        "article.news-item",
    ],
    title: FieldRule::text(&[
        "h3.post-title, h3.title, h3.article-title",
        "h2.post-title, h2.title, h2.article-title",
        "h4.post-title, h4.title, h4.article-title",
    ]),
    date: FieldRule::text(&[
        "span.post-date, span.date, span.article-date",
        "div.post-date, div.date, div.article-date",
        "time",
    ]),
    link: FieldRule::attr(&["a[href]"], "href"),
    summary: &["p.summary", "div.excerpt"],
    date_segment: None,
    date_formats: &["%d %b %Y, %H:%M WIB", "%d/%m/%Y %H:%M", "%d %b %Y", "%Y-%m-%d %H:%M"],
    retry: false,
};
