//! Testing utilities for the phase form workspace
//!
//! Shared fixtures and a scripted in-memory transport.

#![allow(missing_docs)]

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use phase_form::{Acknowledgement, FormStateStore, SubmissionTransport, TransportError};
use phase_model::{FieldId, FieldValue};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Semaphore;

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn store_with(entries: &[(FieldId, FieldValue)]) -> Arc<FormStateStore> {
    let store = Arc::new(FormStateStore::new());
    for (id, value) in entries {
        store.set(*id, value.clone());
    }
    store
}

/// Echo of a payload the way jsonplaceholder answers: body plus an `id`
pub fn echo_ack(payload: &Value) -> Acknowledgement {
    let mut body = payload.clone();
    if let Some(object) = body.as_object_mut() {
        object.insert("id".to_string(), Value::from(101));
    }
    Acknowledgement::new(201, body)
}

/// Transport answering from a script and recording every payload
///
/// Unscripted calls echo the payload. With a gate, each call waits for a
/// permit before answering, which keeps a submission pending.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Acknowledgement, TransportError>>>,
    requests: Mutex<Vec<Value>>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated() -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let transport = Self {
            gate: Some(Arc::clone(&gate)),
            ..Self::default()
        };
        (transport, gate)
    }

    pub fn then_respond(self, response: Result<Acknowledgement, TransportError>) -> Self {
        self.responses.lock().push_back(response);
        self
    }

    pub fn then_fail_with_status(self, status: u16) -> Self {
        self.then_respond(Err(TransportError::Status {
            status,
            body: String::new(),
        }))
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl SubmissionTransport for ScriptedTransport {
    async fn post(&self, payload: &Value) -> Result<Acknowledgement, TransportError> {
        self.requests.lock().push(payload.clone());

        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|_| TransportError::Network("gate closed".to_string()))?
                .forget();
        }

        let scripted = self.responses.lock().pop_front();
        scripted.unwrap_or_else(|| Ok(echo_ack(payload)))
    }
}
