//! The fused, provenance-tagged brand profile handed to generation.

use serde::{Deserialize, Serialize};

/// Which precedence tier produced a resolved attribute family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTier {
    User,
    Social,
    Markup,
    Competitors,
    Default,
}

impl SourceTier {
    pub const ALL: [SourceTier; 5] = [
        SourceTier::User,
        SourceTier::Social,
        SourceTier::Markup,
        SourceTier::Competitors,
        SourceTier::Default,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SourceTier::User => "user",
            SourceTier::Social => "social",
            SourceTier::Markup => "markup",
            SourceTier::Competitors => "competitors",
            SourceTier::Default => "default",
        }
    }
}

impl std::fmt::Display for SourceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved value together with the tier that won it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sourced<T> {
    #[serde(flatten)]
    pub value: T,
    pub source: SourceTier,
}

impl<T> Sourced<T> {
    pub fn new(value: T, source: SourceTier) -> Self {
        Self { value, source }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Typography {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub style: String,
    pub hero_style: String,
    pub nav_style: String,
    pub spacing: String,
    pub card_style: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneProfile {
    pub label: String,
    pub aesthetic: String,
    pub vibe: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSpec {
    pub tagline: String,
    pub description: String,
    pub services: Vec<String>,
    pub trust_signals: Vec<String>,
    pub calls_to_action: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LogoSpec {
    Image { url: String },
    /// No usable logo asset; render the business name as a wordmark.
    Wordmark { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSet {
    pub logo: LogoSpec,
    pub hero: String,
    pub gallery: Vec<String>,
}

/// Contact channels are only ever copied from real sources, never invented, so
/// an absent channel is a resolved "omit this" rather than a gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub business_name: String,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryContext {
    pub category: String,
    pub must_have_elements: Vec<String>,
    pub differentiators: Vec<String>,
    pub target_audience: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandProfile {
    pub business_name: String,
    pub category: String,
    pub location: Option<String>,
    pub slug: String,
    /// Name of the style preset the profile defaults were drawn from.
    pub style_preset: String,
    pub colors: Sourced<ColorPalette>,
    pub fonts: Sourced<Typography>,
    pub layout: Sourced<LayoutSpec>,
    pub tone: Sourced<ToneProfile>,
    pub content: Sourced<ContentSpec>,
    pub images: Sourced<ImageSet>,
    pub contact: Sourced<ContactDetails>,
    pub industry: Sourced<IndustryContext>,
}

impl BrandProfile {
    /// Provenance of every attribute family, in a fixed order.
    #[must_use]
    pub fn provenance(&self) -> [(&'static str, SourceTier); 8] {
        [
            ("colors", self.colors.source),
            ("fonts", self.fonts.source),
            ("layout", self.layout.source),
            ("tone", self.tone.source),
            ("content", self.content.source),
            ("images", self.images.source),
            ("contact", self.contact.source),
            ("industry", self.industry.source),
        ]
    }
}
