//! reqwest-backed transport talking to the RRB3 server.

use async_trait::async_trait;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use super::{DeviceRequest, Method, RequestFailed, Transport};

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Reply to the API discovery probe, `GET /ping`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PingReply {
    pub server: String,
    #[serde(default)]
    pub v1: Option<String>,
}

impl PingReply {
    pub fn supports_v1(&self) -> bool {
        self.v1.as_deref() == Some("supported")
    }
}

/// Reply to `GET /v1/ping`.
#[derive(Deserialize)]
struct V1PingReply {
    server: String,
}

pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// `base_url` is scheme + authority, e.g. `http://raspberrypi.local:8080`.
    /// A trailing slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Probes `GET /ping` to check the server is up and speaks the v1 API.
    pub async fn ping(&self) -> Result<PingReply, RequestFailed> {
        let response = self
            .client
            .get(self.url("/ping"))
            .send()
            .await
            .map_err(|e| RequestFailed::Network(e.to_string()))?;

        let response = check_status(response)?;
        response
            .json::<PingReply>()
            .await
            .map_err(|e| RequestFailed::Parse(e.to_string()))
    }

    /// Checks the v1 routes answer. Returns the server name.
    pub async fn ping_v1(&self) -> Result<String, RequestFailed> {
        let response = self
            .client
            .get(self.url("/v1/ping"))
            .send()
            .await
            .map_err(|e| RequestFailed::Network(e.to_string()))?;

        let response = check_status(response)?;
        response
            .json::<V1PingReply>()
            .await
            .map(|reply| reply.server)
            .map_err(|e| RequestFailed::Parse(e.to_string()))
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RequestFailed> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(RequestFailed::Status {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
    })
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &DeviceRequest) -> Result<String, RequestFailed> {
        let url = self.url(&request.path);
        debug!("{} {} body={:?}", request.method, url, request.body);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };

        if let Some(ref body) = request.body {
            let bytes =
                serde_json::to_vec(body).map_err(|e| RequestFailed::Parse(e.to_string()))?;
            builder = builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(bytes);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| RequestFailed::Network(e.to_string()))?;

        debug!("{} {} -> {}", request.method, url, response.status());

        let response = check_status(response)?;
        response
            .text()
            .await
            .map_err(|e| RequestFailed::Network(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let transport = HttpTransport::new("http://robot.local:8080/");
        assert_eq!(transport.base_url(), "http://robot.local:8080");
        assert_eq!(
            transport.url("/v1/stop"),
            "http://robot.local:8080/v1/stop"
        );
    }

    #[test]
    fn test_ping_reply_v1_support() {
        let reply: PingReply =
            serde_json::from_str(r#"{"server": "rrb", "v1": "supported"}"#).unwrap();
        assert!(reply.supports_v1());

        let reply: PingReply = serde_json::from_str(r#"{"server": "rrb"}"#).unwrap();
        assert!(!reply.supports_v1());
    }
}
