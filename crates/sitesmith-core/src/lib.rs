//! Shared domain model for sitesmith: request input, extracted signal sets, the
//! fused brand profile, catalogs and environment configuration.

pub mod app_config;
pub mod artifact;
pub mod catalog;
pub mod color;
pub mod config;
pub mod input;
pub mod profile;
pub mod signals;

pub use app_config::{AppConfig, Environment};
pub use artifact::GenerationArtifact;
pub use catalog::{
    load_catalog, Catalog, CategoryDefaults, LayoutBundle, StockImages, StylePreset,
    TypographyPairing,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use input::{ContactFields, RawExtractionInput, UserPreferences};
pub use profile::{
    BrandProfile, ColorPalette, ContactDetails, ContentSpec, ImageSet, IndustryContext,
    LayoutSpec, LogoSpec, SourceTier, Sourced, ToneProfile, Typography,
};
pub use signals::{
    ColorRoles, CompetitorPatternSet, ContentFragments, FontSet, HashtagCount, ImageSignal,
    LayoutSignal, MarkupPalette, MarkupSignalSet, SocialBrandSignal, SocialContentSignal,
    SocialMedia, SocialProfile, SocialSignalSet,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}
