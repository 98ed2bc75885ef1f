//! HTTP fetching of candidate pages.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ScraperError;

/// Fetches raw page markup with a fixed timeout and a descriptive `User-Agent`.
///
/// There is deliberately no retry: a slow or failing site is reported once and
/// the caller degrades to the next signal source.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// GET `url` and return the body when it is a 2xx HTML (or untyped) response.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] on network failure or timeout.
    /// - [`ScraperError::UnexpectedStatus`] for any non-2xx status.
    /// - [`ScraperError::NotHtml`] when the `Content-Type` is clearly not markup.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase);
        if let Some(content_type) = content_type {
            if !(content_type.contains("html") || content_type.starts_with("text/")) {
                return Err(ScraperError::NotHtml {
                    url: url.to_owned(),
                    content_type,
                });
            }
        }

        Ok(response.text().await?)
    }
}

/// Normalize a user-supplied site locator into an absolute `http(s)` URL.
///
/// `"acmeplumbing.com"` becomes `"https://acmeplumbing.com/"`.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] for empty input, unparseable URLs, or
/// schemes other than `http`/`https`.
pub fn normalize_page_url(raw: &str) -> Result<String, ScraperError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ScraperError::InvalidUrl {
            url: raw.to_owned(),
            reason: "empty".to_string(),
        });
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_owned()
    } else if let Some(rest) = trimmed.strip_prefix("//") {
        format!("https://{rest}")
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&with_scheme).map_err(|e| ScraperError::InvalidUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ScraperError::InvalidUrl {
            url: raw.to_owned(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ScraperError::InvalidUrl {
            url: raw.to_owned(),
            reason: "missing host".to_string(),
        });
    }

    Ok(url.to_string())
}

/// Hostname without a leading `www.`, lowercased.
#[must_use]
pub fn extract_domain(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
        .map(|host| host.trim_start_matches("www.").to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_adds_https_scheme() {
        assert_eq!(
            normalize_page_url("acmeplumbing.com").unwrap(),
            "https://acmeplumbing.com/"
        );
        assert_eq!(
            normalize_page_url("  www.acme.com/about ").unwrap(),
            "https://www.acme.com/about"
        );
    }

    #[test]
    fn normalize_keeps_existing_scheme() {
        assert_eq!(
            normalize_page_url("http://acme.com").unwrap(),
            "http://acme.com/"
        );
    }

    #[test]
    fn normalize_handles_protocol_relative() {
        assert_eq!(
            normalize_page_url("//cdn.acme.com/page").unwrap(),
            "https://cdn.acme.com/page"
        );
    }

    #[test]
    fn normalize_rejects_empty_and_foreign_schemes() {
        assert!(matches!(
            normalize_page_url("   "),
            Err(ScraperError::InvalidUrl { .. })
        ));
        assert!(matches!(
            normalize_page_url("ftp://acme.com"),
            Err(ScraperError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn extract_domain_strips_www() {
        assert_eq!(
            extract_domain("https://www.Acme.com/x").as_deref(),
            Some("acme.com")
        );
        assert_eq!(extract_domain("not a url"), None);
    }
}
