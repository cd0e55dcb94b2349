//! CNN Indonesia search results.
//!
//! The search page has gone through several redesigns and nothing marks the
//! result list in a stable way, so a long list of container classes is probed
//! in order, `<article>` before `<div>` for each class.
//!
//! # URL Pattern
//!
//! Result links are absolute, e.g.
//! `https://www.cnnindonesia.com/nasional/20240115100000-20-1000000/article-slug`.

use super::{FieldRule, SiteProfile};
use crate::models::Platform;

pub static PROFILE: SiteProfile = SiteProfile {
    platform: Platform::CnnIndonesia,
    base_url: "https://www.cnnindonesia.com",
    search_url: "https://www.cnnindonesia.com/search/?query={query}&page={page}",
    blocks: &[
        "article.nhl-box",
        "div.nhl-box",
        "article.article-list",
        "div.article-list",
        "article.list-news",
        "div.list-news",
        "article.article-item",
        "div.article-item",
        "article.list",
        "div.list",
        "article.article",
        "div.article",
        "article.news-item",
        "div.news-item",
        "article.media__item",
        "div.media__item",
    ],
    title: FieldRule::text(&["h2.title", "h3.title"]),
    date: FieldRule::text(&["span.date", "div.date"]),
    link: FieldRule::attr(&["a[href]"], "href"),
    summary: &[],
    date_segment: None,
    date_formats: &["%d %b %Y %H:%M", "%d/%m/%Y %H:%M"],
    retry: false,
};
