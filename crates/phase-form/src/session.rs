//! Mounted form session
//!
//! Ties a store to its submission pipeline for the lifetime of one mounted
//! form. Dropping the session unmounts the form: any submission still in
//! flight finishes without touching the discarded state.

use crate::config::{FormConfig, UnknownFieldPolicy};
use crate::error::FormError;
use crate::pipeline::{Outcome, SubmissionPipeline};
use crate::store::FormStateStore;
use crate::transport::{HttpTransport, SubmissionTransport};
use phase_model::{FieldDescriptor, FieldSchema, FieldValue};
use std::sync::Arc;

/// One mounted phase form
#[derive(Debug)]
pub struct PhaseForm<T: SubmissionTransport = HttpTransport> {
    store: Arc<FormStateStore>,
    pipeline: SubmissionPipeline<T>,
    unknown_field_policy: UnknownFieldPolicy,
}

impl PhaseForm<HttpTransport> {
    /// Mount a form that posts over HTTP
    ///
    /// # Errors
    /// Returns `FormError::Config` if the configuration is invalid
    pub fn mount(config: &FormConfig) -> Result<Self, FormError> {
        let transport = HttpTransport::from_config(config)?;
        tracing::debug!("Mounting phase form against {}", transport.endpoint());
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: SubmissionTransport> PhaseForm<T> {
    /// Mount a form with a custom transport
    #[must_use]
    pub fn with_transport(config: &FormConfig, transport: T) -> Self {
        let store = Arc::new(FormStateStore::new());
        let pipeline = SubmissionPipeline::new(&store, transport, config.timeout());
        Self {
            store,
            pipeline,
            unknown_field_policy: config.unknown_field_policy,
        }
    }

    /// Field declarations to render
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &'static [FieldDescriptor] {
        FieldSchema::fields()
    }

    /// Underlying state store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Arc<FormStateStore> {
        &self.store
    }

    /// Handle for submitting from a spawned task
    #[must_use]
    pub fn submitter(&self) -> SubmissionPipeline<T> {
        self.pipeline.clone()
    }

    /// Apply a user edit
    ///
    /// # Errors
    /// Returns `FormError::UnknownField` for unknown identifiers under
    /// `UnknownFieldPolicy::FailFast`
    pub fn edit(&self, field: &str, value: impl Into<FieldValue>) -> Result<(), FormError> {
        match self.store.update(field, value) {
            Err(FormError::UnknownField(name))
                if self.unknown_field_policy == UnknownFieldPolicy::IgnoreAndLog =>
            {
                tracing::warn!("Ignoring edit to unknown field '{}'", name);
                Ok(())
            }
            other => other,
        }
    }

    /// Discard all edits
    pub fn cancel(&self) {
        tracing::debug!("Phase form cancelled");
        self.store.reset();
    }

    /// Submit the current values
    ///
    /// # Errors
    /// See [`SubmissionPipeline::submit`]
    pub async fn save(&self) -> Result<Outcome, FormError> {
        self.pipeline.submit().await
    }
}

impl<T: SubmissionTransport> Drop for PhaseForm<T> {
    fn drop(&mut self) {
        self.store.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::transport::{Acknowledgement, MockSubmissionTransport};
    use phase_model::FieldId;

    fn config(policy: UnknownFieldPolicy) -> FormConfig {
        FormConfig::new().with_unknown_field_policy(policy)
    }

    #[test]
    fn fail_fast_surfaces_unknown_field() {
        let form = PhaseForm::with_transport(
            &config(UnknownFieldPolicy::FailFast),
            MockSubmissionTransport::new(),
        );
        let err = form.edit("kickoffDate", "2025-01-01").unwrap_err();
        assert!(matches!(err, FormError::UnknownField(_)));
    }

    #[test]
    fn ignore_and_log_drops_unknown_field() {
        let form = PhaseForm::with_transport(
            &config(UnknownFieldPolicy::IgnoreAndLog),
            MockSubmissionTransport::new(),
        );
        assert!(form.edit("kickoffDate", "2025-01-01").is_ok());
        assert!(!form.store().is_dirty());
    }

    #[test]
    fn cancel_resets() {
        let form = PhaseForm::with_transport(&FormConfig::new(), MockSubmissionTransport::new());
        form.edit("evaluationStart", "01/07/2025").unwrap();
        form.cancel();

        assert!(form.store().snapshot().is_all_null());
        assert!(!form.store().is_dirty());
    }

    #[test]
    fn drop_deactivates_store() {
        let form = PhaseForm::with_transport(&FormConfig::new(), MockSubmissionTransport::new());
        let store = Arc::clone(form.store());
        drop(form);
        assert!(!store.is_active());
    }

    #[tokio::test]
    async fn save_after_failure_can_retry() {
        let mut transport = MockSubmissionTransport::new();
        let mut seq = mockall::Sequence::new();
        transport
            .expect_post()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(TransportError::Network("connection refused".to_string())));
        transport
            .expect_post()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Acknowledgement::new(200, serde_json::Value::Null)));

        let form = PhaseForm::with_transport(&FormConfig::new(), transport);
        form.edit("awardEnd", "2025-12-31").unwrap();

        let first = form.save().await.unwrap();
        assert!(!first.is_success());
        assert!(!form.store().snapshot().get(FieldId::AwardEnd).is_null());

        let second = form.save().await.unwrap();
        assert!(second.is_success());
        assert!(form.store().snapshot().is_all_null());
    }

    #[test]
    fn exposes_schema() {
        let form = PhaseForm::with_transport(&FormConfig::new(), MockSubmissionTransport::new());
        assert_eq!(form.fields().len(), FieldId::COUNT);
    }
}
