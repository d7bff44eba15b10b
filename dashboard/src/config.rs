//! Client configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Base URL used when none is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://reqres.in/api";
/// API key sent when none is configured.
pub const DEFAULT_API_KEY: &str = "reqres-free-v1";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The base URL did not parse.
    #[error("invalid API base URL `{value}`: {source}")]
    InvalidBaseUrl {
        /// Configured value.
        value: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The base URL parsed but cannot carry path segments.
    #[error("API base URL `{value}` cannot be used as a base")]
    NotABase {
        /// Configured value.
        value: String,
    },
}

/// Remote API settings, layered from config file and `DASHBOARD_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DASHBOARD")]
pub struct DashboardSettings {
    /// Base URL of the users API.
    pub api_base_url: Option<String>,
    /// Value of the `x-api-key` header.
    pub api_key: Option<String>,
    /// Per-request timeout in seconds. Unset or zero means no timeout.
    pub request_timeout_secs: Option<u64>,
}

impl DashboardSettings {
    /// Parsed base URL, falling back to [`DEFAULT_API_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the configured value is not a usable
    /// base URL.
    pub fn api_base_url(&self) -> Result<Url, SettingsError> {
        let value = self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL);
        let url = Url::parse(value).map_err(|source| SettingsError::InvalidBaseUrl {
            value: value.to_owned(),
            source,
        })?;
        if url.cannot_be_a_base() {
            return Err(SettingsError::NotABase {
                value: value.to_owned(),
            });
        }
        Ok(url)
    }

    /// Configured API key, falling back to [`DEFAULT_API_KEY`].
    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or(DEFAULT_API_KEY)
    }

    /// Request timeout, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
