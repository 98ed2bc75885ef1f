//! Font detection from CSS declarations and hosted-font stylesheet links.

use std::sync::LazyLock;

use regex::Regex;
use sitesmith_core::FontSet;

static FONT_FAMILY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)font-family\s*:\s*([^;}<>]+)").expect("valid regex"));
static FONT_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)fonts\.(?:googleapis|bunny)\.(?:com|net)/css2?\?([^"'\s>]+)"#)
        .expect("valid regex")
});

const GENERIC_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "ui-serif",
    "ui-sans-serif",
    "ui-monospace",
    "ui-rounded",
    "emoji",
    "math",
    "inherit",
    "initial",
    "unset",
    "revert",
    "-apple-system",
    "blinkmacsystemfont",
];

/// Font-name fragments that suggest a face meant for headings.
const DISPLAY_KEYWORDS: &[&str] = &["bold", "display", "heading", "title"];

pub(crate) fn extract_fonts(html: &str) -> FontSet {
    let mut found: Vec<(usize, String)> = Vec::new();

    for caps in FONT_LINK_RE.captures_iter(html) {
        if let Some(m) = caps.get(1) {
            for family in families_from_query(m.as_str()) {
                found.push((m.start(), family));
            }
        }
    }

    for caps in FONT_FAMILY_RE.captures_iter(html) {
        if let Some(m) = caps.get(1) {
            for family in m.as_str().split(',').filter_map(clean_family_name) {
                found.push((m.start(), family));
            }
        }
    }

    // Stable: families from one declaration keep their written order.
    found.sort_by_key(|(pos, _)| *pos);

    let mut detected: Vec<String> = Vec::new();
    for (_, family) in found {
        if !detected.iter().any(|d| d.eq_ignore_ascii_case(&family)) {
            detected.push(family);
        }
    }

    let (heading, body) = guess_roles(&detected);
    FontSet {
        heading,
        body,
        detected,
    }
}

/// Heading is the first display-ish face, body the first face that is not.
fn guess_roles(fonts: &[String]) -> (Option<String>, Option<String>) {
    let is_display = |name: &String| {
        let lower = name.to_lowercase();
        DISPLAY_KEYWORDS.iter().any(|k| lower.contains(k))
    };
    let heading = fonts.iter().find(|f| is_display(*f)).cloned();
    let body = fonts.iter().find(|f| !is_display(*f)).cloned();
    (heading, body)
}

fn families_from_query(query: &str) -> Vec<String> {
    query
        .replace("&amp;", "&")
        .split('&')
        .filter_map(|pair| pair.strip_prefix("family="))
        .flat_map(|value| value.split('|').map(str::to_owned).collect::<Vec<_>>())
        .filter_map(|raw| {
            let name = raw.split(':').next().unwrap_or_default();
            clean_family_name(&name.replace('+', " ").replace("%20", " "))
        })
        .collect()
}

fn clean_family_name(raw: &str) -> Option<String> {
    let mut name = raw.trim();
    // Inline style attributes end at the closing attribute quote.
    if let Some(cut) = name.find(['=', '>']) {
        name = &name[..cut];
    }
    let name = name
        .trim()
        .trim_end_matches("!important")
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim();

    if name.is_empty()
        || name.len() > 40
        || name.contains('"')
        || name.starts_with("var(")
        || GENERIC_FAMILIES.contains(&name.to_ascii_lowercase().as_str())
    {
        return None;
    }
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_css_declarations_and_strips_generics() {
        let html = r#"<style>body{font-family: "Open Sans", Arial, sans-serif;} h1{font-family:'Playfair Display',serif}</style>"#;
        let fonts = extract_fonts(html);
        assert_eq!(
            fonts.detected,
            vec!["Open Sans", "Arial", "Playfair Display"]
        );
        assert_eq!(fonts.heading.as_deref(), Some("Playfair Display"));
        assert_eq!(fonts.body.as_deref(), Some("Open Sans"));
    }

    #[test]
    fn reads_hosted_font_links() {
        let html = r#"<link href="https://fonts.googleapis.com/css2?family=Oswald:wght@700&amp;family=Roboto+Slab:wght@400&display=swap" rel="stylesheet">"#;
        let fonts = extract_fonts(html);
        assert_eq!(fonts.detected, vec!["Oswald", "Roboto Slab"]);
    }

    #[test]
    fn legacy_pipe_separated_families() {
        let html = r#"<link href="https://fonts.googleapis.com/css?family=Lato|Montserrat:400,700">"#;
        assert_eq!(extract_fonts(html).detected, vec!["Lato", "Montserrat"]);
    }

    #[test]
    fn inline_style_attribute_is_cut_at_quote() {
        let html = r#"<p style="font-family: 'Lora', serif" class="intro">Hi</p>"#;
        assert_eq!(extract_fonts(html).detected, vec!["Lora"]);
    }

    #[test]
    fn duplicates_are_case_insensitive() {
        let html = "font-family: Inter; font-family: inter, sans-serif;";
        assert_eq!(extract_fonts(html).detected, vec!["Inter"]);
    }

    #[test]
    fn css_variables_are_ignored() {
        let html = "font-family: var(--brand-font), sans-serif;";
        assert!(extract_fonts(html).detected.is_empty());
    }

    #[test]
    fn heading_guess_uses_display_keywords() {
        let fonts = vec!["Inter".to_string(), "Bebas Display".to_string()];
        let (heading, body) = guess_roles(&fonts);
        assert_eq!(heading.as_deref(), Some("Bebas Display"));
        assert_eq!(body.as_deref(), Some("Inter"));
    }

    #[test]
    fn no_display_font_leaves_heading_empty() {
        let fonts = vec!["Inter".to_string(), "Lato".to_string()];
        let (heading, body) = guess_roles(&fonts);
        assert!(heading.is_none());
        assert_eq!(body.as_deref(), Some("Inter"));
    }
}
