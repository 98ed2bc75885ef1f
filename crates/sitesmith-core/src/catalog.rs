//! Static style presets and per-category default bundles.
//!
//! The catalog is an immutable lookup table that callers pass into the matcher and
//! the fusion engine. [`Catalog::builtin`] parses the embedded YAML; deployments can
//! point `SITESMITH_CATALOG_PATH` at their own file and tests can build fixtures.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::color::normalize_hex;
use crate::ConfigError;

/// Key of the category used when nothing else matches. Every catalog must define it.
pub const FALLBACK_CATEGORY: &str = "general";

const BUILTIN_YAML: &str = include_str!("../catalog/builtin.yaml");

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::from_yaml_str(BUILTIN_YAML).expect("embedded catalog is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypographyPairing {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutBundle {
    pub style: String,
    pub hero_style: String,
    pub nav_style: String,
    pub spacing: String,
    pub card_style: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylePreset {
    pub name: String,
    pub triggers: Vec<String>,
    /// Primary, secondary, accent, background, text.
    pub palette: Vec<String>,
    pub typography: TypographyPairing,
    pub layout: LayoutBundle,
    pub vibe: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockImages {
    pub hero: String,
    pub gallery: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDefaults {
    pub key: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub preset: String,
    /// Primary, secondary, accent, background, text.
    pub palette: Vec<String>,
    pub tone: String,
    pub aesthetic: String,
    pub target_audience: String,
    pub stock_images: StockImages,
    pub services: Vec<String>,
    pub trust_signals: Vec<String>,
    pub must_haves: Vec<String>,
    pub call_to_action: String,
    pub tagline: String,
    pub description: String,
}

impl CategoryDefaults {
    /// Tagline template with `{name}`, `{category}` and `{location}` filled in.
    ///
    /// A blank `category` renders as this entry's key; a missing location as
    /// "your area".
    #[must_use]
    pub fn render_tagline(&self, name: &str, category: &str, location: Option<&str>) -> String {
        self.render_template(&self.tagline, name, category, location)
    }

    #[must_use]
    pub fn render_description(
        &self,
        name: &str,
        category: &str,
        location: Option<&str>,
    ) -> String {
        self.render_template(&self.description, name, category, location)
    }

    fn render_template(
        &self,
        template: &str,
        name: &str,
        category: &str,
        location: Option<&str>,
    ) -> String {
        let location = location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or("your area");
        let category = match category.trim() {
            "" => self.key.replace('-', " "),
            raw => raw.to_lowercase(),
        };
        template
            .replace("{name}", name.trim())
            .replace("{category}", &category)
            .replace("{location}", location)
    }
}

#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub presets: Vec<StylePreset>,
    pub categories: Vec<CategoryDefaults>,
}

/// Validated preset + category tables.
///
/// Construction resolves every category's preset name to an index, so lookups
/// after construction cannot miss.
#[derive(Debug, Clone)]
pub struct Catalog {
    presets: Vec<StylePreset>,
    categories: Vec<CategoryDefaults>,
    category_presets: Vec<usize>,
    fallback: usize,
}

impl Catalog {
    /// Validate a parsed catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when preset names repeat, a palette is
    /// not five valid hex colors, a category names an unknown preset, or the
    /// `general` fallback category is missing.
    pub fn new(file: CatalogFile) -> Result<Self, ConfigError> {
        let CatalogFile {
            mut presets,
            mut categories,
        } = file;

        if presets.is_empty() {
            return Err(ConfigError::Validation(
                "catalog must define at least one preset".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for preset in &mut presets {
            if !seen.insert(preset.name.to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate preset name: '{}'",
                    preset.name
                )));
            }
            preset.palette = validate_palette(&preset.palette, &preset.name)?;
        }

        let mut category_presets = Vec::with_capacity(categories.len());
        let mut seen_keys = HashSet::new();
        for category in &mut categories {
            category.key = category.key.trim().to_lowercase();
            if !seen_keys.insert(category.key.clone()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate category key: '{}'",
                    category.key
                )));
            }
            category.palette = validate_palette(&category.palette, &category.key)?;
            let Some(index) = presets
                .iter()
                .position(|p| p.name.eq_ignore_ascii_case(&category.preset))
            else {
                return Err(ConfigError::Validation(format!(
                    "category '{}' references unknown preset '{}'",
                    category.key, category.preset
                )));
            };
            if category.services.is_empty()
                || category.trust_signals.is_empty()
                || category.must_haves.is_empty()
                || category.stock_images.gallery.is_empty()
            {
                return Err(ConfigError::Validation(format!(
                    "category '{}' must define services, trust signals, must-haves and gallery images",
                    category.key
                )));
            }
            category_presets.push(index);
        }

        let fallback = categories
            .iter()
            .position(|c| c.key == FALLBACK_CATEGORY)
            .ok_or_else(|| {
                ConfigError::Validation(format!(
                    "catalog must define a '{FALLBACK_CATEGORY}' category"
                ))
            })?;

        Ok(Self {
            presets,
            categories,
            category_presets,
            fallback,
        })
    }

    /// Parse and validate a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CatalogFileParse`] on malformed YAML or any
    /// validation error from [`Catalog::new`].
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::new(file)
    }

    /// The catalog shipped with the binary.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    #[must_use]
    pub fn presets(&self) -> &[StylePreset] {
        &self.presets
    }

    #[must_use]
    pub fn categories(&self) -> &[CategoryDefaults] {
        &self.categories
    }

    #[must_use]
    pub fn preset(&self, name: &str) -> Option<&StylePreset> {
        self.presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Resolve free-text category input to a defaults bundle.
    ///
    /// Exact key/alias matches win; otherwise the first category whose key or an
    /// alias appears inside the input; otherwise the `general` fallback.
    #[must_use]
    pub fn category(&self, raw: &str) -> &CategoryDefaults {
        &self.categories[self.category_index(raw)]
    }

    /// Default style preset for a free-text category.
    #[must_use]
    pub fn category_preset(&self, raw: &str) -> &StylePreset {
        &self.presets[self.category_presets[self.category_index(raw)]]
    }

    fn category_index(&self, raw: &str) -> usize {
        let needle = raw.trim().to_lowercase();
        if needle.is_empty() {
            return self.fallback;
        }

        let names = |c: &CategoryDefaults| {
            std::iter::once(c.key.clone())
                .chain(c.aliases.iter().map(|a| a.to_lowercase()))
                .collect::<Vec<_>>()
        };

        if let Some(i) = self
            .categories
            .iter()
            .position(|c| names(c).iter().any(|n| *n == needle))
        {
            return i;
        }

        self.categories
            .iter()
            .position(|c| {
                c.key != FALLBACK_CATEGORY
                    && names(c).iter().any(|n| !n.is_empty() && needle.contains(n.as_str()))
            })
            .unwrap_or(self.fallback)
    }
}

fn validate_palette(palette: &[String], owner: &str) -> Result<Vec<String>, ConfigError> {
    if palette.len() != 5 {
        return Err(ConfigError::Validation(format!(
            "'{owner}' palette must have exactly 5 colors, found {}",
            palette.len()
        )));
    }
    palette
        .iter()
        .map(|raw| {
            normalize_hex(raw).ok_or_else(|| {
                ConfigError::Validation(format!("'{owner}' palette has invalid color '{raw}'"))
            })
        })
        .collect()
}

/// Load and validate a catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    Catalog::from_yaml_str(&content)
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
