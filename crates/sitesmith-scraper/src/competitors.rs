//! Competitor discovery and frequency reduction of their markup signals.

use reqwest::Url;
use sitesmith_core::{CompetitorPatternSet, MarkupSignalSet, RawExtractionInput};

use crate::client::{extract_domain, normalize_page_url, PageFetcher};
use crate::markup::extract_markup_signals;
use crate::search::SearchClient;

/// Hard ceiling on competitor pages analyzed per request.
pub const MAX_COMPETITOR_PAGES: usize = 5;

const TOP_COLORS: usize = 5;
const TOP_FONTS: usize = 3;
const TOP_TRUST_SIGNALS: usize = 6;

/// Social networks, directories and aggregators that are never a competitor's
/// own site. Subdomains match too.
const EXCLUDED_DOMAINS: &[&str] = &[
    "facebook.com",
    "instagram.com",
    "twitter.com",
    "x.com",
    "linkedin.com",
    "youtube.com",
    "tiktok.com",
    "pinterest.com",
    "yelp.com",
    "nextdoor.com",
    "reddit.com",
    "google.com",
    "yellowpages.com",
    "angi.com",
    "thumbtack.com",
    "homeadvisor.com",
    "bbb.org",
];

/// Runs the markup extractor over competitor pages and reduces the results.
///
/// Pages are fetched one after another so a single request never fans out
/// across many third-party sites at once.
pub struct CompetitorAggregator<'a> {
    fetcher: &'a PageFetcher,
    search: Option<&'a SearchClient>,
    max_pages: usize,
}

impl<'a> CompetitorAggregator<'a> {
    /// `max_pages` is clamped to `1..=MAX_COMPETITOR_PAGES`.
    #[must_use]
    pub fn new(
        fetcher: &'a PageFetcher,
        search: Option<&'a SearchClient>,
        max_pages: usize,
    ) -> Self {
        Self {
            fetcher,
            search,
            max_pages: max_pages.clamp(1, MAX_COMPETITOR_PAGES),
        }
    }

    /// Aggregate competitor patterns for `input`.
    ///
    /// Uses the request's explicit competitor URLs when present, otherwise a
    /// category + location web search. Returns `None` when there is nothing to
    /// analyze (no URLs and no search credential, a failed search) or when
    /// every page analysis fails.
    pub async fn aggregate(&self, input: &RawExtractionInput) -> Option<CompetitorPatternSet> {
        let candidates = self.candidate_urls(input).await?;
        let own_domain = input
            .website_url
            .as_deref()
            .and_then(|u| normalize_page_url(u).ok())
            .and_then(|u| extract_domain(&u));
        let urls = filter_candidate_urls(&candidates, own_domain.as_deref(), self.max_pages);
        if urls.is_empty() {
            tracing::debug!(category = %input.category, "no competitor urls to analyze");
            return None;
        }

        let mut analyses = Vec::with_capacity(urls.len());
        for url in &urls {
            if let Some(signals) = extract_markup_signals(self.fetcher, url).await {
                analyses.push(signals);
            }
        }

        tracing::info!(
            attempted = urls.len(),
            analyzed = analyses.len(),
            "competitor analysis finished"
        );
        aggregate_patterns(&analyses)
    }

    async fn candidate_urls(&self, input: &RawExtractionInput) -> Option<Vec<String>> {
        if !input.competitor_urls.is_empty() {
            return Some(input.competitor_urls.clone());
        }

        let Some(search) = self.search else {
            tracing::debug!("search credential not configured; skipping competitor discovery");
            return None;
        };

        let query = search_query(input);
        match search.search(&query).await {
            Ok(results) => Some(results.into_iter().map(|r| r.link).collect()),
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "competitor search failed");
                None
            }
        }
    }
}

fn search_query(input: &RawExtractionInput) -> String {
    match input.location.as_deref().map(str::trim) {
        Some(location) if !location.is_empty() => {
            format!("best {} in {location}", input.category.trim())
        }
        _ => format!("best {}", input.category.trim()),
    }
}

/// Normalize, drop social/directory hosts and the business's own site, keep
/// one URL per host, and cap at `max`.
fn filter_candidate_urls(
    candidates: &[String],
    own_domain: Option<&str>,
    max: usize,
) -> Vec<String> {
    let mut seen_sites: Vec<String> = Vec::new();
    let mut out = Vec::new();

    for raw in candidates {
        let Ok(url) = normalize_page_url(raw) else {
            continue;
        };
        let Some(domain) = extract_domain(&url) else {
            continue;
        };
        let excluded = EXCLUDED_DOMAINS
            .iter()
            .any(|d| domain == *d || domain.ends_with(&format!(".{d}")));
        if excluded || own_domain == Some(domain.as_str()) {
            continue;
        }
        // One page per site; an explicit port distinguishes sites on one host.
        let site = match Url::parse(&url).ok().and_then(|u| u.port()) {
            Some(port) => format!("{domain}:{port}"),
            None => domain,
        };
        if seen_sites.contains(&site) {
            continue;
        }
        seen_sites.push(site);
        out.push(url);
        if out.len() == max {
            break;
        }
    }
    out
}

/// Reduce per-page analyses to ranked common patterns.
///
/// Returns `None` for an empty slice. Counting is case-insensitive and ties
/// keep first-seen order, so a single analysis reduces to its own values.
#[must_use]
pub fn aggregate_patterns(pages: &[MarkupSignalSet]) -> Option<CompetitorPatternSet> {
    if pages.is_empty() {
        return None;
    }

    let colors = rank_by_frequency(pages.iter().flat_map(|p| &p.palette.colors), TOP_COLORS);
    let fonts = rank_by_frequency(pages.iter().flat_map(|p| &p.fonts.detected), TOP_FONTS);
    let trust_signals = rank_by_frequency(
        pages.iter().flat_map(|p| &p.content.trust_signals),
        TOP_TRUST_SIGNALS,
    );

    let mode = |pick: fn(&MarkupSignalSet) -> &String| {
        rank_by_frequency(pages.iter().map(pick), 1)
            .into_iter()
            .next()
            .unwrap_or_default()
    };
    let layout_style = mode(|p| &p.layout.style);
    let hero_style = mode(|p| &p.layout.hero_style);
    let nav_style = mode(|p| &p.layout.nav_style);

    let insights = build_insights(
        pages.len(),
        (layout_style.as_str(), hero_style.as_str(), nav_style.as_str()),
        &trust_signals,
        &colors,
        &fonts,
    );

    Some(CompetitorPatternSet {
        analyzed_urls: pages.iter().map(|p| p.url.clone()).collect(),
        colors,
        fonts,
        layout_style,
        hero_style,
        nav_style,
        trust_signals,
        insights,
    })
}

/// Frequency ranking with case-insensitive keys. The first spelling seen is
/// the one reported; equal counts keep first-seen order.
fn rank_by_frequency<'a>(items: impl Iterator<Item = &'a String>, top: usize) -> Vec<String> {
    let mut counts: Vec<(String, &'a String, usize)> = Vec::new();
    for item in items {
        let key = item.to_lowercase();
        match counts.iter_mut().find(|(k, _, _)| *k == key) {
            Some(entry) => entry.2 += 1,
            None => counts.push((key, item, 1)),
        }
    }
    // sort_by is stable, which preserves first-seen order on ties.
    counts.sort_by(|a, b| b.2.cmp(&a.2));
    counts
        .into_iter()
        .take(top)
        .map(|(_, display, _)| display.clone())
        .collect()
}

fn build_insights(
    analyzed: usize,
    (layout, hero, nav): (&str, &str, &str),
    trust_signals: &[String],
    colors: &[String],
    fonts: &[String],
) -> Vec<String> {
    let mut insights = vec![
        format!(
            "Analyzed {analyzed} competitor site{}",
            if analyzed == 1 { "" } else { "s" }
        ),
        format!("Most competitors use a {layout} layout with a {hero} hero and {nav} navigation"),
    ];
    if !trust_signals.is_empty() {
        insights.push(format!(
            "Common trust signals: {}",
            trust_signals.join(", ")
        ));
    }
    if !colors.is_empty() {
        insights.push(format!("Common palette colors: {}", colors.join(", ")));
    }
    if !fonts.is_empty() {
        insights.push(format!("Common fonts: {}", fonts.join(", ")));
    }
    insights
}
