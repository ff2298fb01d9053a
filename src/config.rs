// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.

use std::env;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://10.0.2.2:8000/scoutbase";
const DEFAULT_MEDIA_URL: &str = "http://10.0.2.2:8000";

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, including the `/scoutbase` prefix
    pub api_url: String,
    /// Host that relative media paths (profile pictures) are served from
    pub media_url: String,
    /// Delay before sending the user back to login after the session expires
    pub expiry_redirect_delay: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000/scoutbase".to_string(),
            media_url: "http://127.0.0.1:8000".to_string(),
            expiry_redirect_delay: Duration::ZERO,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_url = env::var("SCOUTBASE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let media_url =
            env::var("SCOUTBASE_MEDIA_URL").unwrap_or_else(|_| DEFAULT_MEDIA_URL.to_string());
        let delay_secs = match env::var("SCOUTBASE_EXPIRY_REDIRECT_SECS") {
            Ok(v) => v
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("SCOUTBASE_EXPIRY_REDIRECT_SECS", v))?,
            Err(_) => 2,
        };

        Ok(Self {
            api_url: normalize_url("SCOUTBASE_API_URL", &api_url)?,
            media_url: normalize_url("SCOUTBASE_MEDIA_URL", &media_url)?,
            expiry_redirect_delay: Duration::from_secs(delay_secs),
        })
    }

    /// Override the API URL, e.g. from a command-line flag.
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self, ConfigError> {
        self.api_url = normalize_url("--api-url", api_url)?;
        Ok(self)
    }
}

/// Check the scheme and strip trailing slashes so paths can be appended.
fn normalize_url(name: &'static str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::Invalid(name, value.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
