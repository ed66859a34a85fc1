//! API model error types

/// Errors raised while loading or validating an API model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to load API model from {path}: {reason}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    LoadError {
        path: String,
        reason: String,
        hint: Option<String>,
    },

    #[error("API model validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid schema at {path}: {reason}")]
    InvalidSchema { path: String, reason: String },

    #[error("API model parse error: {0}")]
    Parse(String),

    #[error("Internal model error: {0}")]
    Internal(String),
}

impl ModelError {
    /// Attach an actionable hint to the error
    pub fn with_hint(mut self, hint_val: impl Into<String>) -> Self {
        if let ModelError::LoadError { ref mut hint, .. } = self {
            *hint = Some(hint_val.into());
        }
        self
    }
}
