//! Error types for the phase model

/// Model-level errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Identifier is not one of the ten known fields
    #[error("unknown field: {0}")]
    UnknownField(String),
}

/// Per-field validation failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldErrorKind {
    /// Value is present but not a calendar date
    #[error("'{raw}' is not a valid date")]
    InvalidDate {
        /// Text as it was entered
        raw: String,
    },
}

impl FieldErrorKind {
    /// Build an invalid date error from the entered text
    #[inline]
    pub fn invalid_date(raw: impl Into<String>) -> Self {
        Self::InvalidDate { raw: raw.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_field_display() {
        let err = ModelError::UnknownField("startDate".to_string());
        assert_eq!(err.to_string(), "unknown field: startDate");
    }

    #[test]
    fn invalid_date_display() {
        let err = FieldErrorKind::invalid_date("tomorrow");
        assert!(err.to_string().contains("'tomorrow'"));
    }
}
