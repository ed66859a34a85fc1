//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use modelrpc::model::ModelLoader;
use modelrpc::transport::Transport;
use modelrpc::ApiModel;
use serde_json::Value;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub async fn calculator() -> ApiModel {
    ModelLoader::new()
        .load_from_file(fixture("calculator.json"))
        .await
        .expect("calculator fixture should load")
}

/// Transport double: records every request and replays queued responses.
/// With nothing queued it answers `{"result": null}`.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<(String, Value)>>,
    responses: Mutex<VecDeque<Value>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: Value) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, method: &str, params: Value) -> modelrpc::Result<Value> {
        self.requests
            .lock()
            .unwrap()
            .push((method.to_string(), params));
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| serde_json::json!({"result": null})))
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
