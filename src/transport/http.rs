use super::{Transport, TransportError};
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use reqwest::Proxy;
use serde::Serialize;
use serde_json::Value;
use std::env;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: &'a Value,
    id: u64,
}

/// JSON-RPC 2.0 over HTTP POST.
///
/// Request ids start at 0 and increase by one per request sent through this
/// transport instance.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint_url: String,
    next_id: AtomicU64,
}

impl HttpTransport {
    /// Build a transport for `endpoint_url`.
    ///
    /// Env overrides:
    /// - `MODELRPC_HTTP_TIMEOUT_SECS` (default 30)
    /// - `MODELRPC_PROXY_URL`
    pub fn new(endpoint_url: &str) -> Result<Self> {
        let timeout_secs = env::var("MODELRPC_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(timeout_secs));

        if let Ok(proxy_url) = env::var("MODELRPC_PROXY_URL") {
            let proxy = Proxy::all(&proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("invalid proxy URL: {}", e),
                    ErrorContext::new()
                        .with_field_path("MODELRPC_PROXY_URL")
                        .with_details(proxy_url.clone())
                        .with_source("http_transport"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self::with_client(endpoint_url, client))
    }

    /// Build a transport around a preconfigured `reqwest` client.
    pub fn with_client(endpoint_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint_url: endpoint_url.into(),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// Number of requests sent so far.
    pub fn requests_sent(&self) -> u64 {
        self.next_id.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, method: &str, params: Value) -> Result<Value> {
        let payload = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params: &params,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };
        tracing::trace!(
            endpoint = %self.endpoint_url,
            method,
            id = payload.id,
            "sending JSON-RPC request"
        );

        let response = self
            .client
            .post(&self.endpoint_url)
            .header("content-type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(TransportError::Http)?;

        let status = response.status();
        let body = response.bytes().await.map_err(TransportError::Http)?;

        match serde_json::from_slice::<Value>(&body) {
            Ok(document) => {
                tracing::trace!(status = status.as_u16(), "received JSON-RPC response");
                Ok(document)
            }
            Err(_) if !status.is_success() => Err(TransportError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            }
            .into()),
            Err(e) => Err(TransportError::Decode(e.to_string()).into()),
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
