use serde::{Deserialize, Serialize};

/// Everything the caller knows about the business before any extraction runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawExtractionInput {
    pub business_name: String,
    pub category: String,
    pub location: Option<String>,
    /// Existing website, with or without a scheme.
    pub website_url: Option<String>,
    pub social_handle: Option<String>,
    /// Explicit competitor sites; when empty, competitors are discovered by search.
    pub competitor_urls: Vec<String>,
    pub preferences: UserPreferences,
    pub contact: ContactFields,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub colors: Vec<String>,
    pub tone: Option<String>,
    pub services: Vec<String>,
    pub usps: Vec<String>,
    pub target_customers: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactFields {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl ContactFields {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.email.is_none() && self.address.is_none()
    }
}

impl UserPreferences {
    /// Free text used for style-preset matching: notes followed by the tone keyword.
    #[must_use]
    pub fn style_text(&self) -> String {
        [self.notes.as_deref(), self.tone.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl RawExtractionInput {
    /// Generate a URL-safe slug from the business name.
    #[must_use]
    pub fn slug(&self) -> String {
        let slug = self
            .business_name
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-");
        if slug.is_empty() {
            "site".to_string()
        } else {
            slug
        }
    }
}
