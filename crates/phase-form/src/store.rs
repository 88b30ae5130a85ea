//! Form state store
//!
//! Owns the current field values plus the dirty and submitting flags.
//! Edits are never validated here; half-typed input is a legal state until
//! the user submits.
//!
//! Consumers re-render by watching the revision counter from
//! [`FormStateStore::subscribe`]; it moves on every state change.

use crate::error::FormError;
use parking_lot::Mutex;
use phase_model::{FieldId, FieldValue, FieldValues, PhaseDateSet, ValidationEngine};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

#[derive(Debug, Default)]
struct StoreState {
    values: FieldValues,
    dirty: bool,
    submitting: bool,
    mount: u64,
}

/// In-memory state of one mounted form
#[derive(Debug)]
pub struct FormStateStore {
    state: Mutex<StoreState>,
    active: AtomicBool,
    revision: watch::Sender<u64>,
}

impl FormStateStore {
    /// Create a store with every field null
    #[must_use]
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: Mutex::new(StoreState::default()),
            active: AtomicBool::new(true),
            revision,
        }
    }

    /// Set every field to null and clear the dirty flag
    ///
    /// On a mounted store a pending submission keeps the submitting flag;
    /// only its completion clears it. Re-initializing a deactivated store
    /// starts a new mount: the flag is cleared and results still pending
    /// from the previous mount are ignored.
    pub fn initialize(&self) {
        {
            let mut state = self.state.lock();
            state.values = FieldValues::new();
            state.dirty = false;
            if !self.active.swap(true, Ordering::AcqRel) {
                state.mount = state.mount.wrapping_add(1);
                state.submitting = false;
            }
        }
        self.bump();
    }

    /// Replace the value of a field named by its wire identifier
    ///
    /// # Errors
    /// Returns `FormError::UnknownField` if `field` is not in the schema
    pub fn update(&self, field: &str, value: impl Into<FieldValue>) -> Result<(), FormError> {
        let id: FieldId = field.parse()?;
        self.set(id, value);
        Ok(())
    }

    /// Replace the value of a field and mark the form dirty
    pub fn set(&self, id: FieldId, value: impl Into<FieldValue>) {
        {
            let mut state = self.state.lock();
            state.values.set(id, value);
            state.dirty = true;
        }
        self.bump();
    }

    /// Set every field back to null and clear the dirty flag
    pub fn reset(&self) {
        {
            let mut state = self.state.lock();
            state.values = FieldValues::new();
            state.dirty = false;
        }
        self.bump();
    }

    /// Copy of the current values
    #[must_use]
    pub fn snapshot(&self) -> FieldValues {
        self.state.lock().values.clone()
    }

    /// Whether any edit happened since the last reset
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.state.lock().dirty
    }

    /// Whether a submission is in flight
    #[inline]
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.state.lock().submitting
    }

    /// Whether the form is still mounted
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Mark the form as unmounted
    ///
    /// Pending submissions will discard their results instead of touching
    /// this store.
    pub fn deactivate(&self) {
        self.active.store(false, Ordering::Release);
    }

    /// Receiver for the revision counter
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Guard, validate and mark submitting in one step
    ///
    /// Holding the lock across all three means two callers can never both
    /// pass the guard. Returns the validated dates and the current mount.
    pub(crate) fn begin_submission(
        &self,
        engine: &ValidationEngine,
    ) -> Result<(PhaseDateSet, u64), FormError> {
        let started = {
            let mut state = self.state.lock();
            if state.submitting {
                return Err(FormError::AlreadyInProgress);
            }
            let dates = engine.validate(&state.values)?;
            state.submitting = true;
            (dates, state.mount)
        };
        self.bump();
        Ok(started)
    }

    /// Clear the submitting flag; reset values if the request succeeded
    ///
    /// Returns `false` without touching state if `mount` is stale.
    pub(crate) fn finish_submission(&self, mount: u64, succeeded: bool) -> bool {
        {
            let mut state = self.state.lock();
            if state.mount != mount {
                return false;
            }
            state.submitting = false;
            if succeeded {
                state.values = FieldValues::new();
                state.dirty = false;
            }
        }
        self.bump();
        true
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
    }
}

impl Default for FormStateStore {
    fn default() -> Self {
        Self::new()
    }
}
