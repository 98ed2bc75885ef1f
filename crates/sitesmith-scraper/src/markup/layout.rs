//! Keyword classification of page structure. Matching runs over the lowercased
//! markup, so class names, ids and inline CSS all count.

use sitesmith_core::LayoutSignal;

/// Pages with at least this many `<section>` elements read as long-scroll.
pub(crate) const LONG_SCROLL_SECTIONS: usize = 6;

pub(crate) fn classify_layout(html: &str) -> LayoutSignal {
    let lower = html.to_ascii_lowercase();
    let section_count = lower.matches("<section").count();

    LayoutSignal {
        style: layout_style(&lower, section_count).to_string(),
        hero_style: hero_style(&lower).to_string(),
        nav_style: nav_style(&lower).to_string(),
        section_count,
    }
}

fn has_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn hero_style(lower: &str) -> &'static str {
    if lower.contains("hero") && lower.contains("video") {
        "video"
    } else if has_any(lower, &["slider", "carousel", "swiper"]) {
        "slider"
    } else if has_any(lower, &["100vh", "full-height", "fullscreen", "full-screen"]) {
        "full-bleed"
    } else if has_any(lower, &["split", "two-column", "col-md-6", "grid-cols-2"]) {
        "split"
    } else {
        "minimal"
    }
}

fn layout_style(lower: &str, section_count: usize) -> &'static str {
    if has_any(lower, &["display:grid", "display: grid", "grid-template", "masonry"])
        || lower.contains("class=\"grid")
    {
        "grid"
    } else if has_any(lower, &["sidebar", "<aside"]) {
        "sidebar"
    } else if section_count >= LONG_SCROLL_SECTIONS {
        "long-scroll"
    } else {
        "classic"
    }
}

fn nav_style(lower: &str) -> &'static str {
    if has_any(
        lower,
        &["sticky", "position:fixed", "position: fixed", "fixed-top", "navbar-fixed"],
    ) {
        "sticky"
    } else if has_any(lower, &["hamburger", "menu-toggle", "nav-toggle"]) {
        "hamburger"
    } else if has_any(lower, &["mega-menu", "megamenu"]) {
        "mega"
    } else {
        "standard"
    }
}
