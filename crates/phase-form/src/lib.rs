//! Phase Form - form state, validation and submission
//!
//! The core behind the phase milestone form:
//! - Holds field values with dirty/submitting flags
//! - Validates at submit time only
//! - Posts the ten dates once, with no retry
//! - Resets on success, keeps values on failure
//!
//! # Example
//!
//! ```rust,ignore
//! use phase_form::{FormConfig, Notice, PhaseForm};
//!
//! # async fn example() -> Result<(), phase_form::FormError> {
//! let config = FormConfig::load("phase-form.toml")?.with_env_overrides();
//! let form = PhaseForm::mount(&config)?;
//!
//! form.edit("documentStart", "01/01/2025")?;
//! let result = form.save().await;
//!
//! if let Some(notice) = Notice::from_submit(&result) {
//!     println!("{}", notice.message);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod notice;
pub mod pipeline;
pub mod session;
pub mod store;
pub mod telemetry;
pub mod transport;

// Re-exports for convenience
pub use config::{ConfigError, FormConfig, UnknownFieldPolicy};
pub use error::{FormError, TransportError};
pub use notice::{Notice, NoticeLevel};
pub use pipeline::{Outcome, SubmissionPipeline};
pub use session::PhaseForm;
pub use store::FormStateStore;
pub use telemetry::init_tracing;
pub use transport::{Acknowledgement, HttpTransport, SubmissionTransport};

pub use phase_model::{
    FieldErrors, FieldId, FieldSchema, FieldValue, FieldValues, PhaseDateSet, Section,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the phase form
    pub use crate::{
        FieldId, FieldValue, FormConfig, FormError, FormStateStore, Notice, Outcome, PhaseForm,
        SubmissionPipeline, SubmissionTransport,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
