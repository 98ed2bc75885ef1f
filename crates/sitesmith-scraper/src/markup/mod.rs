//! Heuristic signal extraction from a single page of markup.
//!
//! Every heuristic is a pure function of the markup, so [`analyze_markup`] is
//! deterministic. The async wrapper only adds fetching and the "missing page
//! is just absent" policy.

mod colors;
mod content;
mod fonts;
mod images;
mod layout;

use sitesmith_core::MarkupSignalSet;

use crate::client::{normalize_page_url, PageFetcher};

/// Run every markup heuristic over `html` fetched from `page_url`.
#[must_use]
pub fn analyze_markup(page_url: &str, html: &str) -> MarkupSignalSet {
    MarkupSignalSet {
        url: page_url.to_string(),
        palette: colors::extract_palette(html),
        fonts: fonts::extract_fonts(html),
        layout: layout::classify_layout(html),
        content: content::extract_content(html),
        images: images::extract_images(page_url, html),
    }
}

/// Fetch `raw_url` and analyze it.
///
/// Any failure (bad URL, network error, non-2xx, non-HTML body) is logged and
/// reported as `None`; a page that cannot be read contributes no signals.
pub async fn extract_markup_signals(
    fetcher: &PageFetcher,
    raw_url: &str,
) -> Option<MarkupSignalSet> {
    let url = match normalize_page_url(raw_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(url = %raw_url, error = %e, "skipping markup extraction");
            return None;
        }
    };

    match fetcher.fetch_html(&url).await {
        Ok(html) => {
            let signals = analyze_markup(&url, &html);
            tracing::debug!(
                url = %url,
                colors = signals.palette.colors.len(),
                fonts = signals.fonts.detected.len(),
                "markup signals extracted"
            );
            Some(signals)
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "markup fetch failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_is_deterministic() {
        let html = r#"<style>h1{color:#ff0055;font-family:Lato}</style><h1>Hello there</h1>"#;
        let first = analyze_markup("https://acme.com/", html);
        let second = analyze_markup("https://acme.com/", html);
        assert_eq!(first, second);
        assert_eq!(first.url, "https://acme.com/");
        assert_eq!(first.palette.colors, vec!["#ff0055"]);
        assert_eq!(first.fonts.detected, vec!["Lato"]);
        assert_eq!(first.content.tagline.as_deref(), Some("Hello there"));
    }
}
