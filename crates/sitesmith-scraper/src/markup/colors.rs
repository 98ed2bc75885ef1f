//! Palette extraction and color-role classification.
//!
//! Roles are inferred from each color's saturation and lightness rather than
//! from how often it appears: frequency alone keeps electing whites and grays.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use sitesmith_core::color::{normalize_hex, rgb_to_hex, to_hsl, Hsl};
use sitesmith_core::{ColorRoles, MarkupPalette};

static HEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^&\w])#([0-9a-fA-F]{8}|[0-9a-fA-F]{6}|[0-9a-fA-F]{3})\b")
        .expect("valid hex regex")
});
static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)rgba?\(\s*(\d{1,3})[\s,]+(\d{1,3})[\s,]+(\d{1,3})").expect("valid rgb regex")
});

/// Neutrals that say nothing about a brand.
pub(crate) const BLOCKED_COLORS: &[&str] = &[
    "#ffffff", "#000000", "#fafafa", "#f5f5f5", "#eeeeee", "#e5e5e5", "#dddddd", "#cccccc",
    "#999999", "#666666", "#333333",
];

/// Saturation a color needs before it is trusted as an accent.
const ACCENT_MIN_SATURATION: f64 = 0.5;

/// Distinct non-neutral colors in first-seen order, with their roles.
pub(crate) fn extract_palette(html: &str) -> MarkupPalette {
    let colors = extract_colors(html);
    let roles = classify_colors(&colors);
    MarkupPalette { colors, roles }
}

pub(crate) fn extract_colors(html: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = Vec::new();

    for caps in HEX_RE.captures_iter(html) {
        if let Some(m) = caps.get(1) {
            if let Some(hex) = normalize_hex(m.as_str()) {
                found.push((m.start(), hex));
            }
        }
    }

    for caps in RGB_RE.captures_iter(html) {
        let channel = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u8>().ok());
        if let (Some(r), Some(g), Some(b)) = (channel(1), channel(2), channel(3)) {
            let start = caps.get(0).map_or(0, |m| m.start());
            found.push((start, rgb_to_hex(r, g, b)));
        }
    }

    found.sort_by_key(|(pos, _)| *pos);

    let mut colors: Vec<String> = Vec::new();
    for (_, hex) in found {
        if BLOCKED_COLORS.contains(&hex.as_str()) || colors.contains(&hex) {
            continue;
        }
        colors.push(hex);
    }
    colors
}

/// Assign palette roles.
///
/// Saturation ordering picks primary, accent and secondary; lightness ordering
/// independently picks background (lightest) and text (darkest). Background and
/// text stay unset when fewer than two colors exist.
pub(crate) fn classify_colors(colors: &[String]) -> ColorRoles {
    let mut with_hsl: Vec<(&String, Hsl)> = colors
        .iter()
        .filter_map(|c| to_hsl(c).map(|hsl| (c, hsl)))
        .collect();

    if with_hsl.is_empty() {
        return ColorRoles::default();
    }

    let (background, text) = if with_hsl.len() >= 2 {
        let lightest = with_hsl
            .iter()
            .fold(None::<&(&String, Hsl)>, |best, cur| match best {
                Some(b) if b.1.l >= cur.1.l => Some(b),
                _ => Some(cur),
            });
        let darkest = with_hsl
            .iter()
            .fold(None::<&(&String, Hsl)>, |best, cur| match best {
                Some(b) if b.1.l <= cur.1.l => Some(b),
                _ => Some(cur),
            });
        (
            lightest.map(|(c, _)| (*c).clone()),
            darkest.map(|(c, _)| (*c).clone()),
        )
    } else {
        (None, None)
    };

    // Stable sort keeps first-seen order among equally saturated colors.
    with_hsl.sort_by(|a, b| b.1.s.partial_cmp(&a.1.s).unwrap_or(Ordering::Equal));

    let primary = with_hsl.first().map(|(c, _)| (*c).clone());
    let accent = with_hsl
        .get(1)
        .filter(|(_, hsl)| hsl.s > ACCENT_MIN_SATURATION)
        .map(|(c, _)| (*c).clone());
    let secondary = with_hsl
        .iter()
        .skip(1)
        .map(|(c, _)| (*c).clone())
        .find(|c| Some(c) != accent.as_ref());

    ColorRoles {
        primary,
        secondary,
        accent,
        background,
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_hex_and_rgb_literals_in_order() {
        let html = r#"<style>.a{color:#1E3A5F} .b{background: rgb(245, 158, 11)} .c{border-color:#0f0}</style>"#;
        assert_eq!(extract_colors(html), vec!["#1e3a5f", "#f59e0b", "#00ff00"]);
    }

    #[test]
    fn rgba_and_space_separated_rgb_are_accepted() {
        let html = "color: rgba(255, 0, 85, 0.5); fill: rgb(16 185 129);";
        assert_eq!(extract_colors(html), vec!["#ff0055", "#10b981"]);
    }

    #[test]
    fn blocked_neutrals_and_duplicates_are_dropped() {
        let html = "#fff #000000 #FFFFFF #ff0055 #FF0055 #333";
        assert_eq!(extract_colors(html), vec!["#ff0055"]);
    }

    #[test]
    fn numeric_entities_are_not_colors() {
        let html = "<p>Caf&#233; &#123; open</p>";
        assert!(extract_colors(html).is_empty());
    }

    #[test]
    fn out_of_range_rgb_is_ignored() {
        assert!(extract_colors("rgb(300, 20, 20)").is_empty());
    }

    #[test]
    fn roles_follow_saturation_and_lightness() {
        let html = "#ffffff #000000 #ff0055 #222222";
        let palette = extract_palette(html);
        assert_eq!(palette.colors, vec!["#ff0055", "#222222"]);
        assert_eq!(palette.roles.primary.as_deref(), Some("#ff0055"));
        assert_eq!(palette.roles.background.as_deref(), Some("#ff0055"));
        assert_eq!(palette.roles.text.as_deref(), Some("#222222"));
    }

    #[test]
    fn roles_are_independent_of_input_order() {
        let forward = extract_palette("#ffffff #000000 #ff0055 #222222").roles;
        let reversed = extract_palette("#222222 #ff0055 #000000 #ffffff").roles;
        assert_eq!(forward, reversed);
    }

    #[test]
    fn accent_requires_high_saturation() {
        let vivid = classify_colors(&[
            "#ff0055".to_string(),
            "#10b981".to_string(),
            "#f1f5f9".to_string(),
        ]);
        assert_eq!(vivid.primary.as_deref(), Some("#ff0055"));
        assert_eq!(vivid.accent.as_deref(), Some("#10b981"));
        assert_eq!(vivid.secondary.as_deref(), Some("#f1f5f9"));
        assert_eq!(vivid.background.as_deref(), Some("#f1f5f9"));

        let muted = classify_colors(&["#1e3a5f".to_string(), "#6b7280".to_string()]);
        assert!(muted.accent.is_none());
        assert_eq!(muted.secondary.as_deref(), Some("#6b7280"));
    }

    #[test]
    fn single_color_sets_only_brand_roles() {
        let roles = classify_colors(&["#1e3a5f".to_string()]);
        assert_eq!(roles.primary.as_deref(), Some("#1e3a5f"));
        assert!(roles.background.is_none());
        assert!(roles.text.is_none());
    }

    #[test]
    fn no_colors_yields_empty_roles() {
        assert_eq!(classify_colors(&[]), ColorRoles::default());
    }
}
