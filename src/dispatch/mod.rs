//! # Action Dispatcher
//!
//! Turns a trigger into exactly one device request and routes the outcome.
//!
//! ```text
//!  fire(kind, inputs)
//!     │  build request (sync)
//!     │  query? ──► OutputSink::set_output(field, "?")   (sync, before send)
//!     │
//!     └─ tokio::spawn ──► Transport::send
//!                            ├─ Ok, query      ──► OutputSink::set_output(field, value)
//!                            ├─ Ok, otherwise  ──► nothing
//!                            └─ Err(e)         ──► FailureSink::notify("Error: {e}")
//! ```
//!
//! Each spawned request owns clones of the sinks and nothing else, so requests
//! in flight never share state. Nothing is cancelled or retried.

pub mod registry;
pub mod response;

use std::sync::Arc;

use log::debug;
use tokio::task::JoinHandle;

use crate::device::{DeviceRequest, RequestFailed, Transport};
use registry::{ActionKind, ActionSpec, Inputs, OutputField};

/// Shown in a query's output field while its request is in flight.
pub const PENDING_MARKER: &str = "?";

/// Receives values destined for UI output fields.
pub trait OutputSink: Send + Sync {
    fn set_output(&self, field: OutputField, value: String);
}

/// Receives user-facing failure notifications.
pub trait FailureSink: Send + Sync {
    fn notify(&self, message: String);
}

pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    outputs: Arc<dyn OutputSink>,
    failures: Arc<dyn FailureSink>,
}

impl Dispatcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        outputs: Arc<dyn OutputSink>,
        failures: Arc<dyn FailureSink>,
    ) -> Self {
        Self {
            transport,
            outputs,
            failures,
        }
    }

    /// Fires the action registered under `trigger_id`. Unknown ids send nothing.
    pub fn trigger(&self, trigger_id: &str, inputs: &Inputs) -> Option<JoinHandle<()>> {
        match ActionKind::from_trigger(trigger_id) {
            Some(kind) => Some(self.fire(kind, inputs)),
            None => {
                debug!("Ignoring unknown trigger '{}'", trigger_id);
                None
            }
        }
    }

    /// Sends one request for `kind`. Must be called from within a tokio runtime.
    ///
    /// Returns as soon as the request is spawned. The handle is only useful to
    /// callers that want to wait for the outcome (the CLI, tests).
    pub fn fire(&self, kind: ActionKind, inputs: &Inputs) -> JoinHandle<()> {
        let spec = registry::spec(kind);
        let request = spec.build_request(inputs);

        if let Some(field) = spec.output {
            self.outputs.set_output(field, PENDING_MARKER.to_string());
        }

        debug!("Dispatching {}: {} {}", kind, request.method, request.path);

        let transport = Arc::clone(&self.transport);
        let outputs = Arc::clone(&self.outputs);
        let failures = Arc::clone(&self.failures);

        tokio::spawn(async move {
            match execute(transport.as_ref(), spec, &request).await {
                Ok(Some((field, value))) => {
                    debug!("{} resolved: {}={}", kind, field.id(), value);
                    outputs.set_output(field, value);
                }
                Ok(None) => debug!("{} done", kind),
                Err(e) => {
                    debug!("{} failed: {}", kind, e);
                    failures.notify(format!("Error: {e}"));
                }
            }
        })
    }
}

async fn execute(
    transport: &dyn Transport,
    spec: &ActionSpec,
    request: &DeviceRequest,
) -> Result<Option<(OutputField, String)>, RequestFailed> {
    let body = transport.send(request).await?;
    match spec.output {
        Some(field) => response::read_output(field, &body).map(|value| Some((field, value))),
        // Fire-and-forget: whatever came back is not looked at.
        None => Ok(None),
    }
}
