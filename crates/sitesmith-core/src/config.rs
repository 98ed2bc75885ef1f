use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional. Credentials that are absent disable the
/// corresponding external source instead of failing the load.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty strings count as unset so `KEY=` in a .env file disables a source.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("SITESMITH_ENV", "development"));
    let log_level = or_default("SITESMITH_LOG_LEVEL", "info");
    let user_agent = or_default("SITESMITH_USER_AGENT", "sitesmith/0.1 (brand-analysis)");

    let page_timeout_secs = parse_u64("SITESMITH_PAGE_TIMEOUT_SECS", "10")?;
    let social_timeout_secs = parse_u64("SITESMITH_SOCIAL_TIMEOUT_SECS", "15")?;

    let social_api_url = or_default(
        "SITESMITH_SOCIAL_API_URL",
        "https://social-data.example-provider.com",
    );
    let social_api_key = optional("SITESMITH_SOCIAL_API_KEY");
    let search_api_url = or_default("SITESMITH_SEARCH_API_URL", "https://google.serper.dev");
    let search_api_key = optional("SITESMITH_SEARCH_API_KEY");

    let max_competitors = parse_usize("SITESMITH_MAX_COMPETITORS", "5")?;
    if max_competitors == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SITESMITH_MAX_COMPETITORS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let generation_api_key = optional("ANTHROPIC_API_KEY");
    let generation_api_url =
        or_default("SITESMITH_GENERATION_API_URL", "https://api.anthropic.com");
    let generation_model = or_default("SITESMITH_GENERATION_MODEL", "claude-sonnet-4-5");
    let generation_timeout_secs = parse_u64("SITESMITH_GENERATION_TIMEOUT_SECS", "300")?;

    let catalog_path = optional("SITESMITH_CATALOG_PATH").map(PathBuf::from);
    let output_dir = PathBuf::from(or_default("SITESMITH_OUTPUT_DIR", "./generated"));

    Ok(AppConfig {
        env,
        log_level,
        user_agent,
        page_timeout_secs,
        social_timeout_secs,
        social_api_url,
        social_api_key,
        search_api_url,
        search_api_key,
        max_competitors,
        generation_api_key,
        generation_api_url,
        generation_model,
        generation_timeout_secs,
        catalog_path,
        output_dir,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
