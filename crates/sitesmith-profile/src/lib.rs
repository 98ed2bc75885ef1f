//! Brand profile resolution: style-preset matching, signal collection and the
//! precedence-based fusion of every signal into one [`BrandProfile`].
//!
//! [`BrandProfile`]: sitesmith_core::BrandProfile

pub mod collect;
pub mod fusion;
pub mod matcher;

pub use collect::{build_brand_profile, collect_signals, SignalSources};
pub use fusion::{fuse_brand_profile, ExtractedSignals, FALLBACK_BUSINESS_NAME};
pub use matcher::{match_style_preset, score_preset, score_presets, StyleMatch};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("scraper setup error: {0}")]
    Scraper(#[from] sitesmith_scraper::ScraperError),

    #[error("social client setup error: {0}")]
    Social(#[from] sitesmith_social::SocialError),
}
