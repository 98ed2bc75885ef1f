//! Copy fragments: tagline, description, service candidates, trust phrases,
//! calls to action and direct contact links.

use std::sync::LazyLock;

use regex::Regex;
use sitesmith_core::ContentFragments;

use crate::parse_helpers::{extract_attr, find_meta_content, strip_tags};

static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1\b[^>]*>(.*?)</h1>").expect("valid regex"));
static SERVICE_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(h2|h3|strong)\b[^>]*>(.*?)</(?:h2|h3|strong)>").expect("valid regex")
});
static CTA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(<(?:a|button)\b[^>]*>)(.*?)</(?:a|button)>").expect("valid regex")
});
static TEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)href\s*=\s*["']tel:([^"']+)["']"#).expect("valid regex"));
static MAILTO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)href\s*=\s*["']mailto:([^"'?]+)"#).expect("valid regex")
});

pub(crate) const MAX_TAGLINE_CHARS: usize = 200;
pub(crate) const MAX_SERVICE_CANDIDATES: usize = 10;
pub(crate) const MAX_CALLS_TO_ACTION: usize = 5;

/// Phrases recognised as trust signals, reported in this order.
pub(crate) const TRUST_VOCABULARY: &[&str] = &[
    "licensed",
    "insured",
    "bonded",
    "certified",
    "family owned",
    "family-owned",
    "locally owned",
    "award-winning",
    "award winning",
    "satisfaction guaranteed",
    "money-back guarantee",
    "free estimate",
    "free quote",
    "24/7",
    "years of experience",
    "5-star",
    "five star",
    "accredited",
    "warranty",
    "background checked",
];

pub(crate) fn extract_content(html: &str) -> ContentFragments {
    let tagline = H1_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| truncate_chars(&strip_tags(m.as_str()), MAX_TAGLINE_CHARS))
        .filter(|t| !t.is_empty());

    let description = find_meta_content(html, "name", "description")
        .or_else(|| find_meta_content(html, "property", "og:description"));

    let service_candidates = service_candidates(html, tagline.as_deref());
    let visible = strip_tags(html).to_lowercase();
    let trust_signals = TRUST_VOCABULARY
        .iter()
        .filter(|phrase| visible.contains(*phrase))
        .map(|phrase| (*phrase).to_string())
        .collect();

    let phone = TEL_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|p| !p.is_empty());
    let email = MAILTO_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|e| e.contains('@'));

    ContentFragments {
        tagline,
        description,
        service_candidates,
        trust_signals,
        calls_to_action: calls_to_action(html),
        phone,
        email,
    }
}

fn service_candidates(html: &str, tagline: Option<&str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for caps in SERVICE_HEADING_RE.captures_iter(html) {
        let Some(inner) = caps.get(2) else { continue };
        let text = strip_tags(inner.as_str());
        let len = text.chars().count();
        if !(3..=60).contains(&len) || text.split_whitespace().count() > 6 {
            continue;
        }
        if tagline.is_some_and(|t| t.eq_ignore_ascii_case(&text)) {
            continue;
        }
        if out.iter().any(|s| s.eq_ignore_ascii_case(&text)) {
            continue;
        }
        out.push(text);
        if out.len() == MAX_SERVICE_CANDIDATES {
            break;
        }
    }
    out
}

fn calls_to_action(html: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for caps in CTA_RE.captures_iter(html) {
        let (Some(open), Some(inner)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let class = extract_attr(open.as_str(), "class")
            .unwrap_or_default()
            .to_ascii_lowercase();
        if !["btn", "button", "cta"].iter().any(|k| class.contains(k)) {
            continue;
        }
        let text = strip_tags(inner.as_str());
        let len = text.chars().count();
        if !(2..=40).contains(&len) || out.iter().any(|c| c.eq_ignore_ascii_case(&text)) {
            continue;
        }
        out.push(text);
        if out.len() == MAX_CALLS_TO_ACTION {
            break;
        }
    }
    out
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect::<String>().trim_end().to_string()
}
