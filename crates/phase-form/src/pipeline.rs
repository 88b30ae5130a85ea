//! Submission pipeline
//!
//! Drives one submit action end to end:
//! 1. Reject if a submission is already in flight
//! 2. Validate the current values; invalid input never reaches the network
//! 3. Mark submitting and serialize the validated dates
//! 4. Send exactly once, bounded by the configured timeout
//! 5. On success reset the form; on failure leave it untouched
//!
//! Steps 1-3 run under the store's lock. Only a weak reference to the store
//! is held while the request is pending, so a form torn down mid-flight is
//! never mutated afterwards.

use crate::error::{FormError, TransportError};
use crate::store::FormStateStore;
use crate::transport::{Acknowledgement, SubmissionTransport};
use phase_model::ValidationEngine;
use std::sync::{Arc, Weak};
use std::time::Duration;

/// Terminal result of a submission attempt that reached the network
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Backend accepted the submission; the form was reset
    Success(Acknowledgement),
    /// Request failed; the form keeps its values for a retry
    Failure(TransportError),
}

impl Outcome {
    /// Check for success
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Convert into a result, mapping failure to `FormError::SubmissionFailed`
    ///
    /// # Errors
    /// Returns the failure reason wrapped in `FormError`
    pub fn into_result(self) -> Result<Acknowledgement, FormError> {
        match self {
            Outcome::Success(ack) => Ok(ack),
            Outcome::Failure(reason) => Err(FormError::SubmissionFailed(reason)),
        }
    }
}

/// Submits the values of one form store
pub struct SubmissionPipeline<T> {
    store: Weak<FormStateStore>,
    transport: Arc<T>,
    engine: ValidationEngine,
    timeout: Duration,
}

impl<T> Clone for SubmissionPipeline<T> {
    fn clone(&self) -> Self {
        Self {
            store: Weak::clone(&self.store),
            transport: Arc::clone(&self.transport),
            engine: self.engine,
            timeout: self.timeout,
        }
    }
}

impl<T> std::fmt::Debug for SubmissionPipeline<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionPipeline")
            .field("store_alive", &(self.store.strong_count() > 0))
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl<T: SubmissionTransport> SubmissionPipeline<T> {
    /// Bind a pipeline to a store
    #[must_use]
    pub fn new(store: &Arc<FormStateStore>, transport: T, timeout: Duration) -> Self {
        Self {
            store: Arc::downgrade(store),
            transport: Arc::new(transport),
            engine: ValidationEngine::new(),
            timeout,
        }
    }

    /// Transport used by this pipeline
    #[inline]
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submit the store's current values
    ///
    /// # Returns
    /// `Outcome` once a request was sent; the store is reset on success
    ///
    /// # Errors
    /// - `FormError::AlreadyInProgress` if a submission is pending
    /// - `FormError::ValidationFailed` if any field holds an invalid date
    /// - `FormError::Detached` if the form was torn down
    pub async fn submit(&self) -> Result<Outcome, FormError> {
        let (dates, mount) = {
            let store = self.live_store().ok_or(FormError::Detached)?;
            match store.begin_submission(&self.engine) {
                Ok(started) => started,
                Err(err) => {
                    tracing::info!("Submission blocked: {}", err);
                    return Err(err);
                }
            }
        };
        let in_flight = InFlight::new(Weak::clone(&self.store), mount);

        tracing::info!(
            "Submitting phase dates ({} of 10 fields set)",
            dates.populated().count()
        );

        let outcome = match serde_json::to_value(dates) {
            Ok(payload) => {
                tracing::debug!("Submission payload: {}", payload);
                self.send(&payload).await
            }
            Err(e) => Outcome::Failure(TransportError::Encode(e.to_string())),
        };

        match &outcome {
            Outcome::Success(ack) => {
                tracing::info!("Submission accepted with status {}", ack.status);
                tracing::debug!("Acknowledgement body: {}", ack.body);
            }
            Outcome::Failure(reason) => tracing::error!("Submission failed: {}", reason),
        }

        if !in_flight.finish(outcome.is_success()) {
            tracing::warn!("Form was torn down before the submission resolved; result discarded");
        }

        Ok(outcome)
    }

    async fn send(&self, payload: &serde_json::Value) -> Outcome {
        match tokio::time::timeout(self.timeout, self.transport.post(payload)).await {
            Ok(Ok(ack)) => Outcome::Success(ack),
            Ok(Err(reason)) => Outcome::Failure(reason),
            Err(_) => Outcome::Failure(TransportError::Timeout {
                after_secs: self.timeout.as_secs(),
            }),
        }
    }

    fn live_store(&self) -> Option<Arc<FormStateStore>> {
        live(&self.store)
    }
}

fn live(store: &Weak<FormStateStore>) -> Option<Arc<FormStateStore>> {
    store.upgrade().filter(|store| store.is_active())
}

/// Clears the submitting flag of a pending submission
///
/// If the submit future is dropped before the request resolves, the store
/// is released as a failed attempt so the user can submit again.
struct InFlight {
    store: Weak<FormStateStore>,
    mount: u64,
    settled: bool,
}

impl InFlight {
    fn new(store: Weak<FormStateStore>, mount: u64) -> Self {
        Self {
            store,
            mount,
            settled: false,
        }
    }

    /// Apply the result; `false` if the form is gone or was remounted
    fn finish(mut self, succeeded: bool) -> bool {
        self.settled = true;
        live(&self.store).is_some_and(|store| store.finish_submission(self.mount, succeeded))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        if let Some(store) = live(&self.store) {
            if store.finish_submission(self.mount, false) {
                tracing::warn!("Submission abandoned before it resolved; form released for retry");
            }
        }
    }
}
