//! Phase Model
//!
//! Static description and value types for the phase milestone form.
//!
//! # Overview
//!
//! The model provides:
//! - **FieldSchema**: the ten nullable date fields and their five sections
//! - **FieldValues**: the raw, not yet validated value bound to every field
//! - **PhaseDateSet**: the validated record that gets submitted
//! - **ValidationEngine**: table-driven check that every value is null or a date
//!
//! # Example
//!
//! ```rust
//! use phase_model::{FieldId, FieldValue, FieldValues, ValidationEngine};
//!
//! let mut values = FieldValues::new();
//! values.set(FieldId::DocumentStart, FieldValue::from("2025-01-01"));
//! values.set(FieldId::MarketEnd, FieldValue::from("31/03/2025"));
//!
//! let dates = ValidationEngine::new().validate(&values).unwrap();
//! assert!(dates.document_start.is_some());
//! assert!(dates.award_end.is_none());
//! ```

#![warn(missing_docs)]

pub mod date_set;
pub mod error;
pub mod field;
pub mod schema;
pub mod validation;
pub mod value;

// Re-exports
pub use date_set::PhaseDateSet;
pub use error::{FieldErrorKind, ModelError};
pub use field::{FieldId, Section};
pub use schema::{FieldDescriptor, FieldSchema, ValueType, DISPLAY_FORMAT};
pub use validation::{FieldErrors, ValidationEngine};
pub use value::{parse_date_text, FieldValue, FieldValues};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the phase model
    pub use crate::{
        FieldDescriptor, FieldErrors, FieldId, FieldSchema, FieldValue, FieldValues,
        PhaseDateSet, Section, ValidationEngine,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
