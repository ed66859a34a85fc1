//! API model validator using JSON Schema

use super::schema::{SchemaKind, SchemaNode};
use super::{ApiModel, ModelError};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

/// Validates API model documents before they are turned into an [`ApiModel`].
///
/// Three passes, each failing fast:
/// 1. the raw document against the embedded JSON Schema,
/// 2. every operation's input/output node against the schema node rules,
/// 3. basic logic checks on the typed model.
pub struct ModelValidator {
    schema: JSONSchema,
}

impl ModelValidator {
    pub fn new() -> Result<Self, ModelError> {
        let schema_value: Value = serde_json::from_str(Self::embedded_schema_v1())
            .map_err(|e| ModelError::Internal(format!("Invalid JSON Schema: {}", e)))?;

        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema_value)
            .map_err(|e| ModelError::Internal(format!("Failed to compile schema: {}", e)))?;

        Ok(Self { schema })
    }

    fn embedded_schema_v1() -> &'static str {
        include_str!("api_model_v1.json")
    }

    /// Validate a raw model document (JSON Schema + schema node rules).
    pub fn validate_document(&self, document: &Value) -> Result<(), ModelError> {
        if let Err(errors) = self.schema.validate(document) {
            let error_msgs: Vec<String> = errors
                .map(|e| format!("{} (at {})", e, e.instance_path))
                .collect();
            return Err(ModelError::ValidationError(format!(
                "JSON Schema validation failed:\n  - {}",
                error_msgs.join("\n  - ")
            )));
        }

        let operations = document
            .get("operations")
            .and_then(Value::as_object)
            .into_iter()
            .flatten();
        for (name, operation) in operations {
            for part in ["input", "output"] {
                if let Some(node) = operation.get(part) {
                    serde_json::from_value::<SchemaNode>(node.clone()).map_err(|e| {
                        ModelError::InvalidSchema {
                            path: format!("operations.{}.{}", name, part),
                            reason: e.to_string(),
                        }
                    })?;
                }
            }
        }

        Ok(())
    }

    /// Basic logic checks on a typed model.
    pub fn validate_model(&self, model: &ApiModel) -> Result<(), ModelError> {
        let endpoint = url::Url::parse(&model.endpoint_url).map_err(|e| {
            ModelError::ValidationError(format!(
                "endpoint_url '{}' is not an absolute URL: {}",
                model.endpoint_url, e
            ))
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(ModelError::ValidationError(format!(
                "endpoint_url '{}' cannot be used as a request target",
                model.endpoint_url
            )));
        }

        for (name, operation) in &model.operations {
            if name.trim().is_empty() {
                return Err(ModelError::ValidationError(
                    "Operation names must be non-empty".to_string(),
                ));
            }

            // Scalar inputs can never be satisfied by positional or keyword args.
            if !matches!(
                operation.input.kind,
                SchemaKind::Structure(_) | SchemaKind::List(_)
            ) {
                tracing::warn!(
                    operation = %name,
                    input = %operation.input.type_name(),
                    "top-level input is neither a structure nor a list; calls will be rejected"
                );
            }

            for (part, node) in [("input", &operation.input), ("output", &operation.output)] {
                for (path, tag) in node.unsupported_kinds() {
                    tracing::warn!(
                        operation = %name,
                        part,
                        path = %path,
                        kind = %tag,
                        "unsupported schema kind"
                    );
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn calculator() -> Value {
        json!({
            "endpoint_url": "http://localhost:4000",
            "operations": {
                "add": {
                    "documentation": "Adds numbers",
                    "input": {"type": "list", "members": {"type": "integer"}},
                    "output": {"type": "integer"}
                }
            }
        })
    }

    #[test]
    fn test_valid_document_passes() {
        let validator = ModelValidator::new().unwrap();
        validator.validate_document(&calculator()).unwrap();
        let model: ApiModel = serde_json::from_value(calculator()).unwrap();
        validator.validate_model(&model).unwrap();
    }

    #[test]
    fn test_missing_endpoint_fails_schema_validation() {
        let validator = ModelValidator::new().unwrap();
        let doc = json!({"operations": {}});
        match validator.validate_document(&doc) {
            Err(ModelError::ValidationError(msg)) => assert!(msg.contains("endpoint_url")),
            other => panic!("Expected ValidationError, got: {:?}", other),
        }
    }

    #[test]
    fn test_operation_without_output_fails() {
        let validator = ModelValidator::new().unwrap();
        let doc = json!({
            "endpoint_url": "http://localhost:4000",
            "operations": {"add": {"input": {"type": "list", "members": {"type": "integer"}}}}
        });
        assert!(matches!(
            validator.validate_document(&doc),
            Err(ModelError::ValidationError(_))
        ));
    }

    #[test]
    fn test_bad_schema_node_reports_its_path() {
        let validator = ModelValidator::new().unwrap();
        let doc = json!({
            "endpoint_url": "http://localhost:4000",
            "operations": {
                "add": {"input": {"type": "list"}, "output": {"type": "integer"}}
            }
        });
        match validator.validate_document(&doc) {
            Err(ModelError::InvalidSchema { path, .. }) => assert_eq!(path, "operations.add.input"),
            other => panic!("Expected InvalidSchema, got: {:?}", other),
        }
    }

    #[test]
    fn test_relative_endpoint_is_rejected() {
        let validator = ModelValidator::new().unwrap();
        let model = ApiModel::new("localhost-without-scheme");
        assert!(validator.validate_model(&model).is_err());
    }

    #[test]
    fn test_unsupported_kind_is_not_a_load_error() {
        let validator = ModelValidator::new().unwrap();
        let model = ApiModel::new("http://localhost:4000").with_operation(
            "ratio",
            "",
            SchemaNode::structure([("r", SchemaNode::new(SchemaKind::Unsupported("float".into())))]),
            SchemaNode::integer(),
        );
        assert!(validator.validate_model(&model).is_ok());
    }
}
