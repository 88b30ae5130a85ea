//! User-facing notices
//!
//! Turns outcomes and errors into the signals a presentation layer shows:
//! a confirmation, a failure message, a transient hint, or inline field
//! guidance.

use crate::error::FormError;
use crate::pipeline::Outcome;
use phase_model::{FieldErrorKind, FieldId, FieldSchema};

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Submission went through
    Success,
    /// Transient, no action needed
    Info,
    /// Something failed; user may retry
    Error,
}

/// Message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Main message
    pub message: String,
    /// Inline guidance per field
    pub field_messages: Vec<(FieldId, String)>,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            field_messages: Vec::new(),
        }
    }

    /// Notice for a submission that reached the network
    #[must_use]
    pub fn from_outcome(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Success(_) => Self::new(NoticeLevel::Success, "Form submitted successfully!"),
            Outcome::Failure(reason) => Self::new(
                NoticeLevel::Error,
                format!("Form submission failed. {reason}"),
            ),
        }
    }

    /// Notice for an error, if the user should see one
    ///
    /// Integration defects (unknown fields, detached forms) return `None`.
    #[must_use]
    pub fn from_error(err: &FormError) -> Option<Self> {
        if !err.is_user_facing() {
            return None;
        }
        match err {
            FormError::AlreadyInProgress => Some(Self::new(
                NoticeLevel::Info,
                "A submission is already in progress.",
            )),
            FormError::ValidationFailed(errors) => {
                let mut notice = Self::new(
                    NoticeLevel::Error,
                    "Some dates are not valid. Please correct the highlighted fields.",
                );
                notice.field_messages = errors
                    .iter()
                    .map(|(id, kind)| (id, field_message(id, kind)))
                    .collect();
                Some(notice)
            }
            FormError::SubmissionFailed(reason) => Some(Self::new(
                NoticeLevel::Error,
                format!("Form submission failed. {reason}"),
            )),
            FormError::Config(_) => Some(Self::new(
                NoticeLevel::Error,
                "Form submission failed. The form is not configured correctly.",
            )),
            FormError::UnknownField(_) | FormError::Detached => None,
        }
    }

    /// Notice for either branch of a submit call
    #[must_use]
    pub fn from_submit(result: &Result<Outcome, FormError>) -> Option<Self> {
        match result {
            Ok(outcome) => Some(Self::from_outcome(outcome)),
            Err(err) => Self::from_error(err),
        }
    }
}

fn field_message(id: FieldId, kind: &FieldErrorKind) -> String {
    let label = FieldSchema::descriptor(id).label;
    match kind {
        FieldErrorKind::InvalidDate { raw } => {
            format!("{label}: '{raw}' is not a valid date (use DD/MM/YYYY)")
        }
    }
}
