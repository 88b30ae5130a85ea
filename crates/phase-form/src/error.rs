//! Error types for the phase form
//!
//! Every error is terminal for the attempt that raised it. Nothing here is
//! retried; the user has to act again.

use crate::config::ConfigError;
use phase_model::{FieldErrors, ModelError};

/// Main form error type
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Edit named a field outside the schema
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A submission is already in flight
    #[error("a submission is already in progress")]
    AlreadyInProgress,

    /// One or more fields hold invalid dates
    #[error("validation failed: {0}")]
    ValidationFailed(FieldErrors),

    /// Request failed or the server rejected it
    #[error("submission failed: {0}")]
    SubmissionFailed(#[from] TransportError),

    /// The form was torn down
    #[error("form is no longer active")]
    Detached,

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl FormError {
    /// Check if error is a transient notice rather than a failure
    #[inline]
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::AlreadyInProgress)
    }

    /// Check if error should be shown to the user
    ///
    /// `UnknownField` and `Detached` are integration defects and only logged.
    #[inline]
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, Self::UnknownField(_) | Self::Detached)
    }

    /// Per-field errors, when validation blocked the submission
    #[inline]
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::ValidationFailed(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ModelError> for FormError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::UnknownField(name) => Self::UnknownField(name),
        }
    }
}

impl From<FieldErrors> for FormError {
    fn from(errors: FieldErrors) -> Self {
        Self::ValidationFailed(errors)
    }
}

/// Outbound request failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Connection, DNS or body read failure
    #[error("network error: {0}")]
    Network(String),

    /// Server answered with a non-2xx status
    #[error("server returned {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// No response within the configured bound
    #[error("no response after {after_secs}s")]
    Timeout {
        /// Configured bound
        after_secs: u64,
    },

    /// Payload could not be encoded
    #[error("failed to encode payload: {0}")]
    Encode(String),
}
