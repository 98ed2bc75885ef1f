//! HTTP client for the social-data provider.
//!
//! Two calls per handle: `GET /profile?username=` and
//! `GET /media?username=&count=`. The credential travels in `X-API-Key`.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sitesmith_core::AppConfig;

use crate::error::SocialError;

/// Upper bound on recent media requested per profile.
pub const MAX_MEDIA_ITEMS: usize = 12;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub username: String,
    #[serde(default, alias = "name")]
    pub full_name: String,
    #[serde(default, alias = "bio")]
    pub biography: String,
    #[serde(default, alias = "followers")]
    pub follower_count: u64,
    #[serde(default, alias = "post_count")]
    pub media_count: u64,
    #[serde(default, alias = "avatar_url")]
    pub profile_pic_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaItem {
    #[serde(default, alias = "url")]
    pub image_url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default, alias = "likes")]
    pub like_count: u64,
}

#[derive(Debug, Deserialize)]
struct MediaResponse {
    #[serde(default)]
    items: Vec<MediaItem>,
}

/// Client for the social-data API.
///
/// Use [`SocialClient::from_config`] in the pipeline; it yields `None` when
/// no credential is configured, which disables social extraction.
pub struct SocialClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl SocialClient {
    /// Build a client from the application config, or `None` when
    /// `SITESMITH_SOCIAL_API_KEY` is unset.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError`] if the HTTP client or base URL is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, SocialError> {
        let Some(api_key) = config.social_api_key.as_deref() else {
            return Ok(None);
        };
        Self::with_base_url(api_key, config.social_timeout_secs, &config.social_api_url).map(Some)
    }

    /// # Errors
    ///
    /// Returns [`SocialError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`SocialError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SocialError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SocialError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// # Errors
    ///
    /// - [`SocialError::Http`] on network failure or a non-2xx status.
    /// - [`SocialError::Deserialize`] if the body is not a profile.
    pub async fn fetch_profile(&self, handle: &str) -> Result<ProfileResponse, SocialError> {
        let url = self.build_url("profile", &[("username", handle)])?;
        self.get_json(url, &format!("profile({handle})")).await
    }

    /// Up to `count` recent media items, capped at [`MAX_MEDIA_ITEMS`].
    ///
    /// # Errors
    ///
    /// - [`SocialError::Http`] on network failure or a non-2xx status.
    /// - [`SocialError::Deserialize`] if the body is not a media list.
    pub async fn fetch_recent_media(
        &self,
        handle: &str,
        count: usize,
    ) -> Result<Vec<MediaItem>, SocialError> {
        let count = count.min(MAX_MEDIA_ITEMS).to_string();
        let url = self.build_url("media", &[("username", handle), ("count", &count)])?;
        let mut response: MediaResponse =
            self.get_json(url, &format!("media({handle})")).await?;
        response.items.truncate(MAX_MEDIA_ITEMS);
        Ok(response.items)
    }

    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, SocialError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| SocialError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, SocialError> {
        let body = self
            .client
            .get(url)
            .header("X-API-Key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        serde_json::from_str(&body).map_err(|e| SocialError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> SocialClient {
        SocialClient::with_base_url("test-key", 5, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_encodes_handle() {
        let client = test_client("https://social.example.com/v1");
        let url = client
            .build_url("profile", &[("username", "acme plumbing")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://social.example.com/v1/profile?username=acme+plumbing"
        );
    }

    #[test]
    fn profile_accepts_alternate_field_names() {
        let profile: ProfileResponse = serde_json::from_str(
            r#"{"username":"acme","name":"Acme","bio":"Hi","followers":10,"avatar_url":"https://x/a.jpg"}"#,
        )
        .unwrap();
        assert_eq!(profile.full_name, "Acme");
        assert_eq!(profile.biography, "Hi");
        assert_eq!(profile.follower_count, 10);
        assert_eq!(profile.profile_pic_url.as_deref(), Some("https://x/a.jpg"));
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            SocialClient::with_base_url("k", 5, "::"),
            Err(SocialError::InvalidBaseUrl { .. })
        ));
    }
}
