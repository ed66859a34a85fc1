//! API model loader for local files, in-memory documents, and remote URLs

use super::validator::ModelValidator;
use super::{ApiModel, ModelError};
use serde_json::Value;
use std::path::Path;

/// Source format of a model document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Json,
    Yaml,
}

impl ModelFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(ModelFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Some(ModelFormat::Yaml)
            }
            _ => None,
        }
    }
}

/// Loads API models and runs the [`ModelValidator`] over them.
pub struct ModelLoader {
    validate: bool,
}

impl ModelLoader {
    pub fn new() -> Self {
        Self { validate: true }
    }

    /// Enable or disable document validation (enabled by default).
    pub fn with_validation(mut self, enable: bool) -> Self {
        self.validate = enable;
        self
    }

    /// Load a model from a local file. `.json` and `.yaml`/`.yml` are
    /// recognised; anything else is tried as JSON, then YAML.
    pub async fn load_from_file(&self, path: impl AsRef<Path>) -> Result<ApiModel, ModelError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ModelError::LoadError {
                path: path.to_string_lossy().to_string(),
                reason: e.to_string(),
                hint: Some("Check if the file exists and you have read permissions.".to_string()),
            })?;

        let content = Self::decode_utf8(&bytes).map_err(|reason| ModelError::LoadError {
            path: path.to_string_lossy().to_string(),
            reason,
            hint: None,
        })?;

        tracing::debug!(path = %path.display(), "loading API model");
        match ModelFormat::from_path(path) {
            Some(format) => self.load_from_str(&content, format),
            None => self
                .load_from_str(&content, ModelFormat::Json)
                .or_else(|_| self.load_from_str(&content, ModelFormat::Yaml)),
        }
    }

    /// Load a model from an in-memory document.
    pub fn load_from_str(&self, content: &str, format: ModelFormat) -> Result<ApiModel, ModelError> {
        let document: Value = match format {
            ModelFormat::Json => serde_json::from_str(content)
                .map_err(|e| ModelError::Parse(format!("Invalid JSON model: {}", e)))?,
            ModelFormat::Yaml => serde_yaml::from_str(content).map_err(|e| {
                let location = e
                    .location()
                    .map(|l| format!(" at line {}, column {}", l.line(), l.column()))
                    .unwrap_or_default();
                ModelError::Parse(format!("Invalid YAML model{}: {}", location, e))
            })?,
        };
        self.load_from_value(document)
    }

    /// Load a model from an already-parsed document.
    pub fn load_from_value(&self, document: Value) -> Result<ApiModel, ModelError> {
        let validator = if self.validate {
            let validator = ModelValidator::new()?;
            validator.validate_document(&document)?;
            Some(validator)
        } else {
            None
        };

        let model: ApiModel = serde_json::from_value(document)
            .map_err(|e| ModelError::Parse(format!("Invalid API model: {}", e)))?;

        if let Some(validator) = validator {
            validator.validate_model(&model)?;
        }

        tracing::debug!(
            endpoint = %model.endpoint_url,
            operations = model.operations.len(),
            "API model loaded"
        );
        Ok(model)
    }

    /// Load a model from a remote URL serving a JSON document.
    pub async fn load_from_url(&self, url: &str) -> Result<ApiModel, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ModelError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| ModelError::LoadError {
                path: url.to_string(),
                reason: format!("HTTP request failed: {}", e),
                hint: Some(
                    "Check your internet connection and verify the URL is accessible.".to_string(),
                ),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let err = ModelError::LoadError {
                path: url.to_string(),
                reason: format!("HTTP {}", status),
                hint: None,
            };
            return Err(if status == reqwest::StatusCode::NOT_FOUND {
                err.with_hint("The model URL does not exist; check the path.")
            } else {
                err
            });
        }

        let content = response.bytes().await.map_err(|e| ModelError::LoadError {
            path: url.to_string(),
            reason: format!("Failed to read bytes: {}", e),
            hint: None,
        })?;

        let document: Value = serde_json::from_slice(&content)
            .map_err(|e| ModelError::Parse(format!("Invalid JSON model from URL: {}", e)))?;
        self.load_from_value(document)
    }

    fn decode_utf8(bytes: &[u8]) -> Result<String, String> {
        let body = bytes.strip_prefix(&[0xEFu8, 0xBB, 0xBF][..]).unwrap_or(bytes);
        String::from_utf8(body.to_vec()).map_err(|e| format!("Invalid UTF-8: {}", e))
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}
