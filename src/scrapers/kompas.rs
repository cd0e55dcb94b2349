//! Kompas.com search results.
//!
//! Kompas' search frontend is flaky under load, so this site is fetched
//! through the retry wrapper with a longer timeout. The date element reads
//! like `Senin, 15/01/2024` and only the part after the weekday is parsed.

use super::{FieldRule, SiteProfile};
use crate::models::Platform;

pub static PROFILE: SiteProfile = SiteProfile {
    platform: Platform::Kompas,
    base_url: "https://www.kompas.com",
    search_url: "https://search.kompas.com/search?q={query}&page={page}",
    blocks: &["div.article__item"],
    title: FieldRule::text(&["h3.article__title"]),
    date: FieldRule::text(&["div.article__date"]),
    link: FieldRule::attr(&["a.article__link[href]"], "href"),
    summary: &[],
    date_segment: Some(1),
    date_formats: &["%d/%m/%Y %H:%M", "%d/%m/%Y"],
    retry: true,
};
