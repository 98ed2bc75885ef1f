//! Signal sets produced by the extractors. Each is built once and never mutated.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorRoles {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
    pub background: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkupPalette {
    /// Candidate brand colors in first-seen order, block-listed neutrals removed.
    pub colors: Vec<String>,
    pub roles: ColorRoles,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FontSet {
    pub heading: Option<String>,
    pub body: Option<String>,
    pub detected: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSignal {
    pub style: String,
    pub hero_style: String,
    pub nav_style: String,
    pub section_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentFragments {
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub service_candidates: Vec<String>,
    pub trust_signals: Vec<String>,
    pub calls_to_action: Vec<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageSignal {
    pub logo: Option<String>,
    pub hero: Option<String>,
    pub gallery: Vec<String>,
}

/// Everything the markup heuristics pulled out of one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupSignalSet {
    pub url: String,
    pub palette: MarkupPalette,
    pub fonts: FontSet,
    pub layout: LayoutSignal,
    pub content: ContentFragments,
    pub images: ImageSignal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialProfile {
    pub display_name: String,
    pub bio: String,
    pub follower_count: u64,
    pub post_count: u64,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialBrandSignal {
    /// Hex values for color words actually found in the bio/captions.
    pub color_hits: Vec<String>,
    /// `color_hits`, or a neutral two-color default when nothing was found.
    pub palette: Vec<String>,
    pub tone: String,
    pub aesthetic: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialContentSignal {
    pub hashtags: Vec<HashtagCount>,
    pub themes: Vec<String>,
    pub posting_style: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialMedia {
    pub url: String,
    pub caption: String,
    pub engagement: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialSignalSet {
    pub handle: String,
    pub profile: SocialProfile,
    pub brand: SocialBrandSignal,
    pub content: SocialContentSignal,
    /// Recent media, highest engagement first.
    pub media: Vec<SocialMedia>,
}

/// Frequency-reduced view over several competitor pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorPatternSet {
    pub analyzed_urls: Vec<String>,
    pub colors: Vec<String>,
    pub fonts: Vec<String>,
    pub layout_style: String,
    pub hero_style: String,
    pub nav_style: String,
    pub trust_signals: Vec<String>,
    pub insights: Vec<String>,
}
