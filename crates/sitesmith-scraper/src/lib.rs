//! Page fetching and heuristic markup analysis.
//!
//! [`extract_markup_signals`] turns one URL into a [`MarkupSignalSet`]; the
//! [`CompetitorAggregator`] runs it across competitor sites and reduces the
//! results to ranked patterns.
//!
//! [`MarkupSignalSet`]: sitesmith_core::MarkupSignalSet

pub mod client;
pub mod competitors;
pub mod error;
pub mod markup;
pub mod search;

mod parse_helpers;

pub use client::{normalize_page_url, PageFetcher};
pub use competitors::{aggregate_patterns, CompetitorAggregator, MAX_COMPETITOR_PAGES};
pub use error::ScraperError;
pub use markup::{analyze_markup, extract_markup_signals};
pub use search::{SearchClient, SearchResult};
