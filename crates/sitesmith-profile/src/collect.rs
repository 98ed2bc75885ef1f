//! Signal collection: the concurrent markup/social fan-out followed by the
//! sequential competitor pass.

use sitesmith_core::{AppConfig, BrandProfile, Catalog, RawExtractionInput};
use sitesmith_scraper::{extract_markup_signals, CompetitorAggregator, PageFetcher, SearchClient};
use sitesmith_social::{extract_social_signals, SocialClient};

use crate::fusion::{fuse_brand_profile, ExtractedSignals};
use crate::ProfileError;

/// HTTP clients for every signal source. Sources without a credential are
/// `None` and simply contribute nothing.
pub struct SignalSources {
    fetcher: PageFetcher,
    search: Option<SearchClient>,
    social: Option<SocialClient>,
    max_competitors: usize,
}

impl SignalSources {
    /// # Errors
    ///
    /// Returns [`ProfileError`] when an HTTP client cannot be constructed or a
    /// configured base URL is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProfileError> {
        let fetcher = PageFetcher::new(config.page_timeout_secs, &config.user_agent)?;
        let search = config
            .search_api_key
            .as_deref()
            .map(|key| {
                SearchClient::with_base_url(key, config.page_timeout_secs, &config.search_api_url)
            })
            .transpose()?;
        let social = SocialClient::from_config(config)?;

        tracing::debug!(
            search = search.is_some(),
            social = social.is_some(),
            "signal sources configured"
        );

        Ok(Self {
            fetcher,
            search,
            social,
            max_competitors: config.max_competitors,
        })
    }

    /// Run every extractor for `input`.
    ///
    /// The existing-site markup and the social profile are fetched
    /// concurrently; neither failure affects the other. Competitor pages are
    /// analyzed afterwards.
    pub async fn collect(&self, input: &RawExtractionInput) -> ExtractedSignals {
        let markup = async {
            match input.website_url.as_deref().map(str::trim) {
                Some(url) if !url.is_empty() => extract_markup_signals(&self.fetcher, url).await,
                _ => None,
            }
        };
        let social = async {
            match input.social_handle.as_deref().map(str::trim) {
                Some(handle) if !handle.is_empty() => {
                    extract_social_signals(self.social.as_ref(), handle).await
                }
                _ => None,
            }
        };
        let (markup, social) = futures::join!(markup, social);

        let competitors =
            CompetitorAggregator::new(&self.fetcher, self.search.as_ref(), self.max_competitors)
                .aggregate(input)
                .await;

        tracing::info!(
            business = %input.business_name,
            markup = markup.is_some(),
            social = social.is_some(),
            competitors = competitors.is_some(),
            "signal collection finished"
        );

        ExtractedSignals {
            markup,
            social,
            competitors,
        }
    }
}

/// Build the sources from `config` and collect signals for `input`.
///
/// # Errors
///
/// Only client construction can fail; unavailable sources are `None`.
pub async fn collect_signals(
    config: &AppConfig,
    input: &RawExtractionInput,
) -> Result<ExtractedSignals, ProfileError> {
    let sources = SignalSources::from_config(config)?;
    Ok(sources.collect(input).await)
}

/// Collect signals and fuse them into a [`BrandProfile`].
///
/// # Errors
///
/// See [`collect_signals`].
pub async fn build_brand_profile(
    config: &AppConfig,
    catalog: &Catalog,
    input: &RawExtractionInput,
) -> Result<BrandProfile, ProfileError> {
    let signals = collect_signals(config, input).await?;
    Ok(fuse_brand_profile(input, &signals, catalog))
}
