//! Social profile lookup and the text heuristics that turn a bio and recent
//! captions into tone, aesthetic, color and content signals.

pub mod analysis;
pub mod client;
pub mod error;
pub mod extract;

pub use analysis::{
    detect_aesthetic, detect_color_words, detect_posting_style, detect_themes, detect_tone,
    rank_hashtags, DEFAULT_TONE, NEUTRAL_PALETTE,
};
pub use client::{MediaItem, ProfileResponse, SocialClient, MAX_MEDIA_ITEMS};
pub use error::SocialError;
pub use extract::{analyze_social, extract_social_signals, normalize_handle};
