//! Form configuration
//!
//! Loaded from TOML, with an environment override for the endpoint.
//!
//! ```toml
//! endpoint = "https://example.test/phases"
//! timeout_secs = 10
//! unknown_field_policy = "ignore_and_log"
//!
//! [headers]
//! x-tenant = "acme"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding [`FormConfig::endpoint`]
pub const ENDPOINT_ENV: &str = "PHASE_FORM_ENDPOINT";

/// Endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";

/// How an edit naming an unknown field is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFieldPolicy {
    /// Return `FormError::UnknownField` to the caller
    FailFast,
    /// Log a warning and drop the edit
    IgnoreAndLog,
}

impl Default for UnknownFieldPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            UnknownFieldPolicy::FailFast
        } else {
            UnknownFieldPolicy::IgnoreAndLog
        }
    }
}

/// Phase form configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Submission endpoint (POST)
    pub endpoint: String,
    /// Bound on a single submission request, in seconds
    pub timeout_secs: u64,
    /// User agent sent with the request
    pub user_agent: String,
    /// Extra headers injected by the host application
    pub headers: BTreeMap<String, String>,
    /// Handling of edits that name an unknown field
    pub unknown_field_policy: UnknownFieldPolicy,
}

impl FormConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With submission endpoint
    #[inline]
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// With an extra request header
    #[inline]
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// With unknown field policy
    #[inline]
    #[must_use]
    pub fn with_unknown_field_policy(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_field_policy = policy;
        self
    }

    /// Request timeout as a duration
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parse from a TOML document
    ///
    /// # Errors
    /// Returns error if the TOML is malformed or the result is invalid
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Apply `PHASE_FORM_ENDPOINT` if set
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(ENDPOINT_ENV) {
            Ok(endpoint) if !endpoint.trim().is_empty() => self.with_endpoint(endpoint.trim()),
            _ => self,
        }
    }

    /// Check endpoint, timeout and header values
    ///
    /// # Errors
    /// Returns the first invalid setting found
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.endpoint)
            .map_err(|e| ConfigError::InvalidEndpoint(format!("{}: {e}", self.endpoint)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint(format!(
                "{}: unsupported scheme {}",
                self.endpoint,
                url.scheme()
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        for (name, value) in &self.headers {
            reqwest::header::HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ConfigError::InvalidHeader(name.clone()))?;
            reqwest::header::HeaderValue::from_str(value)
                .map_err(|_| ConfigError::InvalidHeader(name.clone()))?;
        }

        Ok(())
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 30,
            user_agent: format!("phase-form/{}", crate::VERSION),
            headers: BTreeMap::new(),
            unknown_field_policy: UnknownFieldPolicy::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Endpoint is not an http(s) URL
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Timeout must be at least one second
    #[error("timeout must be greater than zero")]
    InvalidTimeout,

    /// Header name or value cannot be sent
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// HTTP client could not be built
    #[error("http client setup failed: {0}")]
    Client(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_is_valid() {
        let config = FormConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_partial_toml() {
        let config = FormConfig::from_toml_str(
            r#"
            endpoint = "http://localhost:8080/phases"
            unknown_field_policy = "ignore_and_log"

            [headers]
            x-tenant = "acme"
            "#,
        )
        .unwrap();

        assert_eq!(config.endpoint, "http://localhost:8080/phases");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.unknown_field_policy, UnknownFieldPolicy::IgnoreAndLog);
        assert_eq!(config.headers.get("x-tenant").map(String::as_str), Some("acme"));
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let result = FormConfig::from_toml_str(r#"endpoint = "ftp://example.test/x""#);
        assert!(matches!(result, Err(ConfigError::InvalidEndpoint(_))));
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = FormConfig::new().with_timeout_secs(0);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTimeout)));
    }

    #[test]
    fn rejects_bad_header_name() {
        let config = FormConfig::new().with_header("bad header", "v");
        assert!(matches!(config.validate(), Err(ConfigError::InvalidHeader(_))));
    }

    #[test]
    fn rejects_malformed_toml() {
        let result = FormConfig::from_toml_str("timeout_secs = \"soon\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phase-form.toml");
        std::fs::write(&path, "timeout_secs = 5\n").unwrap();

        let config = FormConfig::load(&path).unwrap();
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = FormConfig::load("/nonexistent/phase-form.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/phase-form.toml"));
    }
}
