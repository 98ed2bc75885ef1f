//! Keyword scoring of style presets against free-text preferences.

use sitesmith_core::{Catalog, StylePreset};

/// Outcome of matching preference text against the catalog.
#[derive(Debug, Clone, Copy)]
pub struct StyleMatch<'a> {
    pub preset: &'a StylePreset,
    pub score: usize,
    /// `false` when the preset is the category default because nothing scored.
    pub matched: bool,
}

/// Sum of the character lengths of every trigger found in `text`
/// (case-insensitive substring match).
#[must_use]
pub fn score_preset(preset: &StylePreset, text: &str) -> usize {
    let haystack = text.to_lowercase();
    preset
        .triggers
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty() && haystack.contains(t.as_str()))
        .map(|t| t.chars().count())
        .sum()
}

/// Score of every catalog preset against `text`, in catalog order.
#[must_use]
pub fn score_presets<'a>(catalog: &'a Catalog, text: &str) -> Vec<(&'a StylePreset, usize)> {
    catalog
        .presets()
        .iter()
        .map(|p| (p, score_preset(p, text)))
        .collect()
}

/// Best preset for `text`, falling back to the category's default preset.
///
/// Blank text skips scoring. Equal scores resolve to the earlier preset in the
/// catalog.
#[must_use]
pub fn match_style_preset<'a>(
    catalog: &'a Catalog,
    text: &str,
    category: &str,
) -> StyleMatch<'a> {
    let fallback = StyleMatch {
        preset: catalog.category_preset(category),
        score: 0,
        matched: false,
    };
    if text.trim().is_empty() {
        return fallback;
    }

    let mut best: Option<(&StylePreset, usize)> = None;
    for (preset, score) in score_presets(catalog, text) {
        if score > 0 && best.is_none_or(|(_, top)| score > top) {
            best = Some((preset, score));
        }
    }

    match best {
        Some((preset, score)) => StyleMatch {
            preset,
            score,
            matched: true,
        },
        None => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r##"
presets:
  - name: steady
    triggers: [professional, calm]
    palette: ["#1e3a5f", "#2c5282", "#f59e0b", "#f8fafc", "#1a202c"]
    typography: { heading: Montserrat, body: Open Sans }
    layout: { style: classic, hero_style: full-bleed, nav_style: sticky, spacing: balanced, card_style: shadowed }
    vibe: Steady.
  - name: loud
    triggers: [bold, fast, neon]
    palette: ["#dc2626", "#991b1b", "#facc15", "#fafafa", "#111111"]
    typography: { heading: Oswald, body: Roboto }
    layout: { style: grid, hero_style: video, nav_style: sticky, spacing: compact, card_style: angled }
    vibe: Loud.
categories:
  - key: general
    preset: loud
    palette: ["#111111", "#222222", "#333333", "#ffffff", "#000000"]
    tone: professional
    aesthetic: plain
    target_audience: Everyone
    stock_images: { hero: "https://img.test/hero.jpg", gallery: ["https://img.test/1.jpg"] }
    services: [Things]
    trust_signals: [Trusted]
    must_haves: [Contact section]
    call_to_action: Say Hello
    tagline: Hello from {location}
    description: "{name} does things."
  - key: accountant
    preset: steady
    palette: ["#111111", "#222222", "#333333", "#ffffff", "#000000"]
    tone: professional
    aesthetic: plain
    target_audience: Businesses
    stock_images: { hero: "https://img.test/hero.jpg", gallery: ["https://img.test/1.jpg"] }
    services: [Books]
    trust_signals: [Certified]
    must_haves: [Contact section]
    call_to_action: Call
    tagline: Numbers in {location}
    description: "{name} keeps books."
"##;

    fn fixture() -> Catalog {
        Catalog::from_yaml_str(FIXTURE).expect("fixture catalog is valid")
    }

    #[test]
    fn score_sums_trigger_lengths() {
        let catalog = fixture();
        let loud = catalog.preset("loud").unwrap();
        assert_eq!(score_preset(loud, "BOLD and fast"), 8);
        assert_eq!(score_preset(loud, "quiet"), 0);
    }

    #[test]
    fn one_long_trigger_beats_two_short_ones() {
        let catalog = fixture();
        let result = match_style_preset(&catalog, "professional but bold and fast", "general");
        assert_eq!(result.preset.name, "steady");
        assert_eq!(result.score, 12);
        assert!(result.matched);
    }

    #[test]
    fn no_hits_fall_back_to_category_preset() {
        let catalog = fixture();
        let result = match_style_preset(&catalog, "something else entirely", "accountant");
        assert_eq!(result.preset.name, "steady");
        assert!(!result.matched);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn blank_text_skips_scoring() {
        let catalog = fixture();
        let result = match_style_preset(&catalog, "   ", "unknown trade");
        assert_eq!(result.preset.name, "loud");
        assert!(!result.matched);
    }

    #[test]
    fn ties_go_to_catalog_order() {
        let catalog = fixture();
        // "calm" (4) vs "bold" (4)
        let result = match_style_preset(&catalog, "bold yet calm", "general");
        assert_eq!(result.preset.name, "steady");
    }

    #[test]
    fn score_presets_lists_every_preset() {
        let catalog = fixture();
        let scores: Vec<(String, usize)> = score_presets(&catalog, "neon calm")
            .into_iter()
            .map(|(p, s)| (p.name.clone(), s))
            .collect();
        assert_eq!(
            scores,
            vec![("steady".to_string(), 4), ("loud".to_string(), 4)]
        );
    }

    #[test]
    fn builtin_catalog_matches_luxury_language() {
        let catalog = Catalog::builtin();
        let result = match_style_preset(&catalog, "an elegant, upscale feel", "plumber");
        assert_eq!(result.preset.name, "luxury-elegant");
    }
}
