//! API endpoint configuration.
//!
//! One externally supplied value selects where the remote API lives. The
//! browser bakes it in at build time, the CLI reads it from flags or the
//! environment; both funnel it through [`ApiConfig::from_env_value`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use url::Url;

use crate::error::ConfigError;

/// Local development API used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Environment variable that overrides [`DEFAULT_API_URL`].
pub const API_URL_ENV: &str = "GECOS_API_URL";

/// Normalized API base endpoint.
///
/// The stored base always ends in exactly one `/`, so joining a relative
/// endpoint path (`"salones/"`) is plain concatenation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Validate and normalize a base endpoint.
    ///
    /// Accepts an absolute `http`/`https` URL or a root-relative path such as
    /// `/api` (served from the same origin as the client).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the value is empty, is not a URL, or uses
    /// a scheme other than `http`/`https`.
    pub fn new(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        let relative = raw.starts_with('/');
        let trimmed = raw.trim_end_matches('/');
        if trimmed.is_empty() && !relative {
            return Err(ConfigError::Empty);
        }

        if !relative {
            let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
                value: raw.to_owned(),
                reason: e.to_string(),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::UnsupportedScheme(parsed.scheme().to_owned()));
            }
        }

        Ok(Self { base_url: format!("{trimmed}/") })
    }

    /// Build a config from an optional override, falling back to
    /// [`DEFAULT_API_URL`] when the value is absent or blank.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a non-blank override is invalid.
    pub fn from_env_value(value: Option<&str>) -> Result<Self, ConfigError> {
        match value.map(str::trim) {
            Some(raw) if !raw.is_empty() => Self::new(raw),
            _ => Self::new(DEFAULT_API_URL),
        }
    }

    /// Base endpoint, always ending in `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute (or root-relative) URL for an endpoint path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: format!("{DEFAULT_API_URL}/") }
    }
}
