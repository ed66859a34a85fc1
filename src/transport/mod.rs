//! Transport layer: one request/response exchange per call.
//!
//! The dispatcher only needs [`Transport::send`]: hand over a method name and
//! validated params, get back the raw response document
//! (`{"result": ...}` or `{"error": {...}}`). Framing and request correlation
//! are the transport's business.

pub mod http;

pub use http::HttpTransport;

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return the raw response document.
    async fn send(&self, method: &str, params: Value) -> Result<Value>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Undecodable response body: {0}")]
    Decode(String),

    #[error("Transport error: {0}")]
    Other(String),
}
