//! Logo, hero and gallery imagery. Logo candidates are scored so a real
//! wordmark asset beats a favicon-sized icon.

use std::sync::LazyLock;

use regex::Regex;
use sitesmith_core::ImageSignal;

use crate::parse_helpers::{absolutize_url, extract_attr, find_meta_content};

static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("valid regex"));
static LINK_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<link\b[^>]*>").expect("valid regex"));
static SIZES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*x\s*(\d+)").expect("valid sizes regex"));

pub(crate) const MAX_GALLERY_IMAGES: usize = 12;

const HERO_MARKERS: &[&str] = &["hero", "banner", "slide", "cover"];

#[derive(Debug, Clone, Copy)]
enum LogoSource {
    OgLogo,
    ImgLogo,
    LinkIcon,
}

#[derive(Debug, Clone)]
struct LogoCandidate {
    url: String,
    source: LogoSource,
    width: Option<i32>,
    height: Option<i32>,
}

/// One `<img>` with its resolved source and the class/id/alt text used to
/// recognise logos and heroes.
struct PageImage {
    url: String,
    marker: String,
    width: Option<i32>,
    height: Option<i32>,
}

pub(crate) fn extract_images(page_url: &str, html: &str) -> ImageSignal {
    let page_images = collect_page_images(page_url, html);
    let logo = best_logo(page_url, html, &page_images);

    let mut gallery: Vec<String> = Vec::new();
    for image in &page_images {
        if Some(&image.url) == logo.as_ref() || gallery.contains(&image.url) {
            continue;
        }
        gallery.push(image.url.clone());
        if gallery.len() == MAX_GALLERY_IMAGES {
            break;
        }
    }

    let hero = find_meta_content(html, "property", "og:image")
        .and_then(|raw| absolutize_url(page_url, &raw))
        .or_else(|| {
            page_images
                .iter()
                .filter(|img| Some(&img.url) != logo.as_ref())
                .find(|img| HERO_MARKERS.iter().any(|m| img.marker.contains(m)))
                .map(|img| img.url.clone())
        })
        .or_else(|| gallery.first().cloned());

    ImageSignal {
        logo,
        hero,
        gallery,
    }
}

fn collect_page_images(page_url: &str, html: &str) -> Vec<PageImage> {
    IMG_TAG_RE
        .find_iter(html)
        .filter_map(|m| {
            let tag = m.as_str();
            let src = extract_attr(tag, "src")
                .or_else(|| extract_attr(tag, "data-src"))
                .and_then(|raw| absolutize_url(page_url, &raw))?;
            let marker = ["class", "id", "alt"]
                .into_iter()
                .filter_map(|attr| extract_attr(tag, attr))
                .collect::<Vec<_>>()
                .join(" ")
                .to_ascii_lowercase();
            Some(PageImage {
                url: src,
                marker,
                width: extract_attr(tag, "width").and_then(|v| v.parse().ok()),
                height: extract_attr(tag, "height").and_then(|v| v.parse().ok()),
            })
        })
        .collect()
}

fn best_logo(page_url: &str, html: &str, images: &[PageImage]) -> Option<String> {
    let mut candidates: Vec<LogoCandidate> = Vec::new();

    if let Some(url) = find_meta_content(html, "property", "og:logo")
        .and_then(|raw| absolutize_url(page_url, &raw))
    {
        candidates.push(LogoCandidate {
            url,
            source: LogoSource::OgLogo,
            width: None,
            height: None,
        });
    }

    for image in images {
        if image.marker.contains("logo") || image.url.to_ascii_lowercase().contains("logo") {
            candidates.push(LogoCandidate {
                url: image.url.clone(),
                source: LogoSource::ImgLogo,
                width: image.width,
                height: image.height,
            });
        }
    }

    for m in LINK_TAG_RE.find_iter(html) {
        let tag = m.as_str();
        let Some(rel) = extract_attr(tag, "rel") else {
            continue;
        };
        if !rel.to_ascii_lowercase().contains("icon") {
            continue;
        }
        let Some(href) = extract_attr(tag, "href").and_then(|raw| absolutize_url(page_url, &raw))
        else {
            continue;
        };
        let (width, height) = extract_attr(tag, "sizes")
            .as_deref()
            .and_then(parse_sizes_attr)
            .unwrap_or((None, None));
        candidates.push(LogoCandidate {
            url: href,
            source: LogoSource::LinkIcon,
            width,
            height,
        });
    }

    // Highest score wins; on ties the earliest candidate is kept.
    let mut best: Option<(i32, LogoCandidate)> = None;
    for candidate in candidates {
        let score = score_candidate(&candidate);
        if best.as_ref().is_none_or(|(top, _)| score > *top) {
            best = Some((score, candidate));
        }
    }
    best.map(|(_, c)| c.url)
}

#[allow(clippy::case_sensitive_file_extension_comparisons)] // url_lower is already lowercased
fn score_candidate(candidate: &LogoCandidate) -> i32 {
    let mut score = match candidate.source {
        LogoSource::OgLogo => 600,
        LogoSource::ImgLogo => 500,
        LogoSource::LinkIcon => -30,
    };

    let url_lower = candidate.url.to_ascii_lowercase();
    let has_ext = |ext: &str| url_lower.ends_with(ext) || url_lower.contains(&format!("{ext}?"));

    score += if has_ext(".svg") {
        120
    } else if has_ext(".png") {
        100
    } else if has_ext(".webp") {
        70
    } else if has_ext(".jpg") || has_ext(".jpeg") {
        50
    } else if has_ext(".ico") {
        -260
    } else {
        0
    };

    if url_lower.contains("favicon") {
        score -= 220;
    }
    if url_lower.contains("apple-touch-icon") {
        score -= 130;
    }
    if url_lower.contains("logo") {
        score += 80;
    }

    if let (Some(w), Some(h)) = (candidate.width, candidate.height) {
        let min_dim = w.min(h);
        score += match min_dim {
            ..=32 => -260,
            33..=64 => -160,
            65..=96 => -70,
            220.. => 90,
            120.. => 45,
            _ => 0,
        };
    }

    score
}

fn parse_sizes_attr(value: &str) -> Option<(Option<i32>, Option<i32>)> {
    let caps = SIZES_RE.captures(value)?;
    let width = caps.get(1).and_then(|m| m.as_str().parse::<i32>().ok());
    let height = caps.get(2).and_then(|m| m.as_str().parse::<i32>().ok());
    Some((width, height))
}
