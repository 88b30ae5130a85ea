//! Outbound submission transport
//!
//! The pipeline talks to the backend through [`SubmissionTransport`] so tests
//! and host applications can swap the HTTP client out.

use crate::config::{ConfigError, FormConfig};
use crate::error::TransportError;
use async_trait::async_trait;
use phase_model::PhaseDateSet;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

/// Accepted (2xx) response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    /// HTTP status code
    pub status: u16,
    /// Response body; non-JSON bodies are kept as a string
    pub body: Value,
}

impl Acknowledgement {
    /// Create acknowledgement
    #[inline]
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Dates echoed back by the backend, if the body carries them
    #[must_use]
    pub fn echoed_dates(&self) -> Option<PhaseDateSet> {
        if !self.body.is_object() {
            return None;
        }
        serde_json::from_value(self.body.clone()).ok()
    }
}

/// Sends one submission payload
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// Send the payload once
    ///
    /// # Errors
    /// Returns `TransportError` on transport failure or a non-2xx status
    async fn post(&self, payload: &Value) -> Result<Acknowledgement, TransportError>;
}

/// `reqwest` transport posting JSON to the configured endpoint
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Build from configuration
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration is invalid or the client
    /// cannot be constructed
    pub fn from_config(config: &FormConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ConfigError::InvalidHeader(name.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| ConfigError::InvalidHeader(name.as_str().to_string()))?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Target endpoint
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionTransport for HttpTransport {
    async fn post(&self, payload: &Value) -> Result<Acknowledgement, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str::<Value>(&text) {
                Ok(json) => json,
                Err(_) => Value::String(text),
            }
        };

        Ok(Acknowledgement::new(status.as_u16(), body))
    }
}
