//! In-memory transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::clients::{HttpError, RawRequest, Transport};

/// Replays queued responses and records every request.
///
/// An empty queue answers with `null`.
#[derive(Clone, Default)]
pub struct StubTransport {
    responses: Arc<Mutex<VecDeque<Result<Value, HttpError>>>>,
    requests: Arc<Mutex<Vec<RawRequest>>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, body: Value) {
        self.responses.lock().unwrap().push_back(Ok(body));
    }

    pub fn push_err(&self, error: HttpError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<RawRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for StubTransport {
    async fn send(&self, request: &RawRequest) -> Result<Value, HttpError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Value::Null))
    }
}
