use super::*;

const MINIMAL_YAML: &str = r##"
presets:
  - name: plain
    triggers: [plain]
    palette: ["#111111", "#222222", "#333333", "#ffffff", "#000000"]
    typography: { heading: Inter, body: Inter }
    layout: { style: minimal, hero_style: split, nav_style: standard, spacing: airy, card_style: flat }
    vibe: Plain.
categories:
  - key: general
    preset: plain
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
"##;

#[test]
fn builtin_catalog_parses_and_validates() {
    let catalog = Catalog::builtin();
    assert!(catalog.presets().len() >= 8);
    assert!(catalog.categories().iter().any(|c| c.key == FALLBACK_CATEGORY));
}

#[test]
fn builtin_palettes_are_normalized() {
    let catalog = Catalog::builtin();
    for preset in catalog.presets() {
        for color in &preset.palette {
            assert_eq!(normalize_hex(color).as_deref(), Some(color.as_str()));
        }
    }
}

#[test]
fn category_exact_key_match() {
    let catalog = Catalog::builtin();
    assert_eq!(catalog.category("plumber").key, "plumber");
    assert_eq!(catalog.category("  Plumber ").key, "plumber");
}

#[test]
fn category_alias_and_substring_match() {
    let catalog = Catalog::builtin();
    assert_eq!(catalog.category("dentist").key, "health");
    assert_eq!(catalog.category("emergency plumbing service").key, "plumber");
    assert_eq!(catalog.category("Barber shop").key, "salon");
}

#[test]
fn unknown_category_falls_back_to_general() {
    let catalog = Catalog::builtin();
    assert_eq!(catalog.category("quantum consulting").key, "general");
    assert_eq!(catalog.category("").key, "general");
}

#[test]
fn category_preset_resolves() {
    let catalog = Catalog::builtin();
    assert_eq!(catalog.category_preset("plumber").name, "trusted-professional");
    assert_eq!(catalog.category_preset("day spa").name, "luxury-elegant");
}

#[test]
fn minimal_catalog_is_accepted() {
    let catalog = Catalog::from_yaml_str(MINIMAL_YAML).unwrap();
    assert_eq!(catalog.presets().len(), 1);
    assert_eq!(catalog.category("anything").key, "general");
}

#[test]
fn missing_fallback_category_is_rejected() {
    let yaml = MINIMAL_YAML.replace("key: general", "key: bakery");
    let result = Catalog::from_yaml_str(&yaml);
    assert!(
        matches!(result, Err(ConfigError::Validation(ref m)) if m.contains("general")),
        "expected Validation error, got: {result:?}"
    );
}

#[test]
fn unknown_preset_reference_is_rejected() {
    let yaml = MINIMAL_YAML.replace("preset: plain", "preset: fancy");
    let result = Catalog::from_yaml_str(&yaml);
    assert!(
        matches!(result, Err(ConfigError::Validation(ref m)) if m.contains("fancy")),
        "expected Validation error, got: {result:?}"
    );
}

#[test]
fn short_palette_is_rejected() {
    let yaml = MINIMAL_YAML.replacen(
        r##"["#111111", "#222222", "#333333", "#ffffff", "#000000"]"##,
        r##"["#111111", "#222222"]"##,
        1,
    );
    let result = Catalog::from_yaml_str(&yaml);
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let result = Catalog::from_yaml_str("presets: [");
    assert!(matches!(result, Err(ConfigError::CatalogFileParse(_))));
}

#[test]
fn templates_substitute_name_and_location() {
    let catalog = Catalog::builtin();
    let plumber = catalog.category("plumber");
    assert_eq!(
        plumber.render_tagline("Acme Plumbing", "plumber", Some("Richmond")),
        "Fast, honest plumbing in Richmond"
    );
    assert_eq!(
        plumber.render_tagline("Acme Plumbing", "plumber", None),
        "Fast, honest plumbing in your area"
    );
    assert!(plumber
        .render_description("Acme Plumbing", "plumber", Some("Richmond"))
        .starts_with("Acme Plumbing"));
}

#[test]
fn templates_substitute_category() {
    let catalog = Catalog::builtin();
    let general = catalog.category("Dog Grooming");
    assert_eq!(general.key, "general");
    assert_eq!(
        general.render_description("Fluffy Co", "Dog Grooming", Some("Austin")),
        "Fluffy Co serves Austin as a trusted local dog grooming."
    );
    assert_eq!(
        general.render_description("Fluffy Co", "  ", None),
        "Fluffy Co serves your area as a trusted local general."
    );
}

#[test]
fn load_catalog_reports_missing_file() {
    let result = load_catalog(Path::new("/nonexistent/sitesmith/catalog.yaml"));
    assert!(matches!(result, Err(ConfigError::CatalogFileIo { .. })));
}
