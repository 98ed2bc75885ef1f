use std::path::PathBuf;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub user_agent: String,
    pub page_timeout_secs: u64,
    pub social_timeout_secs: u64,
    pub social_api_url: String,
    pub social_api_key: Option<String>,
    pub search_api_url: String,
    pub search_api_key: Option<String>,
    pub max_competitors: usize,
    pub generation_api_key: Option<String>,
    pub generation_api_url: String,
    pub generation_model: String,
    pub generation_timeout_secs: u64,
    pub catalog_path: Option<PathBuf>,
    pub output_dir: PathBuf,
}

impl AppConfig {
    /// Returns the text-generation credential.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `ANTHROPIC_API_KEY` was not set.
    pub fn require_generation_key(&self) -> Result<&str, ConfigError> {
        self.generation_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("ANTHROPIC_API_KEY".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("user_agent", &self.user_agent)
            .field("page_timeout_secs", &self.page_timeout_secs)
            .field("social_timeout_secs", &self.social_timeout_secs)
            .field("social_api_url", &self.social_api_url)
            .field(
                "social_api_key",
                &self.social_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("search_api_url", &self.search_api_url)
            .field(
                "search_api_key",
                &self.search_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("max_competitors", &self.max_competitors)
            .field(
                "generation_api_key",
                &self.generation_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("generation_api_url", &self.generation_api_url)
            .field("generation_model", &self.generation_model)
            .field("generation_timeout_secs", &self.generation_timeout_secs)
            .field("catalog_path", &self.catalog_path)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}
