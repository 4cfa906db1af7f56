//! Client configuration types

use super::constants::{env_vars, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
use crate::{ChapaError, Result};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// How responses are handed back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Decoded JSON, unchanged
    #[default]
    Raw,
    /// JSON objects converted into [`crate::response::Record`]s
    Object,
}

impl ResponseFormat {
    /// Get the canonical name of this format
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Raw => "raw",
            ResponseFormat::Object => "object",
        }
    }
}

impl FromStr for ResponseFormat {
    type Err = ChapaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "raw" | "json" => Ok(ResponseFormat::Raw),
            "object" | "obj" => Ok(ResponseFormat::Object),
            other => Err(ChapaError::invalid_response_format(other)),
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chapa client configuration
#[derive(Clone)]
pub struct ChapaConfig {
    /// Secret key used for the `Authorization` header and webhook verification
    pub secret_key: SecretString,
    /// API host, without the version segment
    pub base_url: String,
    /// API version segment, e.g. `v1`
    pub api_version: String,
    /// Response shaping applied to every call
    pub response_format: ResponseFormat,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl fmt::Debug for ChapaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChapaConfig")
            .field("secret_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("response_format", &self.response_format)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ChapaConfig {
    /// Create a new config for the given secret key with default endpoint settings
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: SecretString::from(secret_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            response_format: ResponseFormat::Raw,
            timeout: None,
        }
    }

    /// Load configuration from `CHAPA_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup(env_vars::SECRET_KEY)
            .ok_or_else(|| ChapaError::config(format!("{} must be set", env_vars::SECRET_KEY)))?;

        let mut config = Self::new(secret_key);

        if let Some(base_url) = lookup(env_vars::BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(api_version) = lookup(env_vars::API_VERSION) {
            config.api_version = api_version;
        }
        if let Some(format) = lookup(env_vars::RESPONSE_FORMAT) {
            config.response_format = format.parse()?;
        }
        if let Some(timeout) = lookup(env_vars::TIMEOUT_SECS) {
            let secs: u64 = timeout.parse().map_err(|_| {
                ChapaError::config(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    env_vars::TIMEOUT_SECS,
                    timeout
                ))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.secret_key.expose_secret().is_empty() {
            return Err(ChapaError::config("Secret key cannot be empty"));
        }

        if self.base_url.is_empty() {
            return Err(ChapaError::config("Base URL cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ChapaError::config(
                "Base URL must start with http:// or https://",
            ));
        }

        url::Url::parse(&self.base_url)
            .map_err(|e| ChapaError::config(format!("Invalid base URL: {}", e)))?;

        if self.api_version.is_empty() {
            return Err(ChapaError::config("API version cannot be empty"));
        }

        Ok(())
    }

    /// Set the API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the API version segment
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Set the response format
    pub fn with_response_format(mut self, response_format: ResponseFormat) -> Self {
        self.response_format = response_format;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the full URL for an API path such as `/banks`
    pub fn endpoint(&self, path: &str) -> Result<url::Url> {
        let url = format!(
            "{}/{}{}",
            self.base_url.trim_end_matches('/'),
            self.api_version.trim_matches('/'),
            path
        );
        url::Url::parse(&url).map_err(|e| ChapaError::config(format!("Invalid URL '{}': {}", url, e)))
    }

    /// Value of the `Authorization` header
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.secret_key.expose_secret())
    }
}
