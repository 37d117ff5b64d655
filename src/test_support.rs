//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::device::{DeviceRequest, RequestFailed, Transport};
use crate::dispatch::registry::{ActionKind, OutputField};
use crate::dispatch::{FailureSink, OutputSink};

/// A transport that records every request and answers from a script.
///
/// Actions without a scripted answer get `Ok("{}")`. A held action waits
/// until its gate is notified, which lets tests observe the in-flight state.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<HashMap<ActionKind, VecDeque<Result<String, RequestFailed>>>>,
    gates: Mutex<HashMap<ActionKind, Arc<Notify>>>,
    requests: Mutex<Vec<DeviceRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, kind: ActionKind, result: Result<String, RequestFailed>) -> Self {
        self.respond_sequence(kind, vec![result])
    }

    /// Answers in order; the last answer repeats once the others are used up.
    pub fn respond_sequence(
        self,
        kind: ActionKind,
        results: Vec<Result<String, RequestFailed>>,
    ) -> Self {
        self.script
            .lock()
            .unwrap()
            .insert(kind, results.into_iter().collect());
        self
    }

    /// Holds responses for `kind` until the returned gate is notified.
    pub fn hold(&self, kind: ActionKind) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(kind, gate.clone());
        gate
    }

    pub fn requests(&self) -> Vec<DeviceRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_result(&self, kind: ActionKind) -> Result<String, RequestFailed> {
        let mut script = self.script.lock().unwrap();
        match script.get_mut(&kind) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap_or_else(|| Ok("{}".to_string())),
            None => Ok("{}".to_string()),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &DeviceRequest) -> Result<String, RequestFailed> {
        self.requests.lock().unwrap().push(request.clone());
        let gate = self.gates.lock().unwrap().get(&request.kind).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.next_result(request.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Output(OutputField, String),
    Notice(String),
}

/// Implements both sinks and records every call in arrival order.
#[derive(Default)]
pub struct RecordingSurface {
    events: Mutex<Vec<Recorded>>,
}

impl RecordingSurface {
    pub fn events(&self) -> Vec<Recorded> {
        self.events.lock().unwrap().clone()
    }

    pub fn outputs(&self, field: OutputField) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Recorded::Output(f, value) if f == field => Some(value),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Recorded::Notice(message) => Some(message),
                _ => None,
            })
            .collect()
    }
}

impl OutputSink for RecordingSurface {
    fn set_output(&self, field: OutputField, value: String) {
        self.events.lock().unwrap().push(Recorded::Output(field, value));
    }
}

impl FailureSink for RecordingSurface {
    fn notify(&self, message: String) {
        self.events.lock().unwrap().push(Recorded::Notice(message));
    }
}

/// Creates an empty panel pointed at a local device.
pub fn test_panel() -> crate::core::state::Panel {
    crate::core::state::Panel::new("http://localhost:8080".to_string())
}
