use crate::model::ModelError;
use crate::transport::TransportError;
use serde_json::Value;
use thiserror::Error;

/// Structured error context for configuration failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Configuration key or field that caused the error (e.g., "builder.endpoint_override")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the rejected value)
    pub details: Option<String>,
    /// Source of the error (e.g., "client_builder", "http_transport")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the runtime.
///
/// The first six variants are raised by the schema interpreter and the
/// dispatcher and reach the caller unchanged; nothing in the crate retries.
#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "Only positional args or keyword args can be provided, not both \
         (got {positional} positional and {keyword} keyword)"
    )]
    AmbiguousArgumentMode { positional: usize, keyword: usize },

    #[error("Got unexpected parameter '{name}' at {path}")]
    UnknownParameter { name: String, path: String },

    #[error("Param {value} at {path} is of type {actual}, expecting parameter of type {expected} instead")]
    TypeMismatch {
        path: String,
        value: Value,
        actual: &'static str,
        expected: &'static str,
    },

    #[error("Unsupported schema kind '{kind}' at {path}")]
    UnsupportedSchemaKind { kind: String, path: String },

    #[error("Unknown operation {name}")]
    UnknownOperation { name: String },

    #[error("Remote operation failed: {message}")]
    RemoteOperationFailed {
        message: String,
        code: Option<i64>,
        data: Option<Value>,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("API model error: {0}")]
    Model(#[from] ModelError),

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// True when the caller can fix the failure by changing the call itself.
    ///
    /// Model defects, remote failures and transport failures return false.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Error::AmbiguousArgumentMode { .. }
                | Error::UnknownParameter { .. }
                | Error::TypeMismatch { .. }
                | Error::UnknownOperation { .. }
        )
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_mismatch_message_names_value_and_types() {
        let err = Error::TypeMismatch {
            path: "$.x".into(),
            value: json!("two"),
            actual: "string",
            expected: "integer",
        };
        let msg = err.to_string();
        assert!(msg.contains("\"two\""));
        assert!(msg.contains("$.x"));
        assert!(msg.contains("of type string"));
        assert!(msg.contains("type integer instead"));
    }

    #[test]
    fn test_caller_error_classification() {
        assert!(Error::UnknownOperation { name: "nope".into() }.is_caller_error());
        assert!(Error::AmbiguousArgumentMode { positional: 1, keyword: 1 }.is_caller_error());
        assert!(!Error::UnsupportedSchemaKind {
            kind: "float".into(),
            path: "$".into()
        }
        .is_caller_error());
        assert!(!Error::RemoteOperationFailed {
            message: "boom".into(),
            code: None,
            data: None
        }
        .is_caller_error());
    }

    #[test]
    fn test_configuration_context_is_rendered() {
        let err = Error::configuration_with_context(
            "invalid endpoint",
            ErrorContext::new()
                .with_field_path("builder.endpoint_override")
                .with_source("client_builder"),
        );
        let msg = err.to_string();
        assert!(msg.contains("field: builder.endpoint_override"));
        assert!(msg.contains("source: client_builder"));
        assert!(err.context().is_some());
    }
}
