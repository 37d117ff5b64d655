//! # Device Transport
//!
//! The seam between the dispatcher and the robot's HTTP server. The
//! dispatcher only ever sees `Transport`; `HttpTransport` is the real one,
//! tests substitute their own.

pub mod http;

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::dispatch::registry::ActionKind;

pub use http::{HttpTransport, PingReply};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built request: path already percent-encoded, body already shaped.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRequest {
    pub kind: ActionKind,
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// The one failure type for device calls.
///
/// Variants only shape the description; callers treat them all the same.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailed {
    /// Connection refused, DNS, reset, transport-level timeout.
    Network(String),
    /// Server answered with a non-2xx status.
    Status { status: u16, reason: String },
    /// Body did not match the expected response shape.
    Parse(String),
}

impl fmt::Display for RequestFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestFailed::Network(msg) => write!(f, "{msg}"),
            RequestFailed::Status { status, reason } => write!(f, "HTTP {status} {reason}"),
            RequestFailed::Parse(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for RequestFailed {}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request and returns the raw response body on 2xx.
    async fn send(&self, request: &DeviceRequest) -> Result<String, RequestFailed>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_descriptions() {
        assert_eq!(
            RequestFailed::Network("connection refused".to_string()).to_string(),
            "connection refused"
        );
        assert_eq!(
            RequestFailed::Status {
                status: 400,
                reason: "Bad Request".to_string()
            }
            .to_string(),
            "HTTP 400 Bad Request"
        );
        assert_eq!(
            RequestFailed::Parse("missing field `state`".to_string()).to_string(),
            "malformed response: missing field `state`"
        );
    }

    #[test]
    fn test_method_names() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.as_str(), "POST");
    }
}
