//! Response parser: projects a raw response through an output schema.

use crate::model::{SchemaKind, SchemaNode};
use crate::{Error, Result};
use serde_json::{Map, Value};

/// Projects raw responses through an operation's output schema.
///
/// Unlike the validator this is permissive: undeclared structure fields are
/// dropped, values whose shape disagrees with the schema and values under
/// unsupported kinds pass through unchanged. The only failure on a well-formed
/// response is the remote error indicator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseParser;

impl ResponseParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a raw `{"result": ...}` / `{"error": {...}}` response.
    pub fn parse(&self, output: &SchemaNode, response: Value) -> Result<Value> {
        let mut response = match response {
            Value::Object(map) => map,
            other => {
                return Err(Error::MalformedResponse(format!(
                    "expected a response object, got {}",
                    super::value_type_name(&other)
                )))
            }
        };

        if let Some(error) = response.remove("error").filter(|e| !e.is_null()) {
            return Err(remote_failure(error));
        }

        let result = response.remove("result").ok_or_else(|| {
            Error::MalformedResponse("response carries neither 'result' nor 'error'".to_string())
        })?;
        Ok(self.project(output, result))
    }

    /// Recursively project one value through one schema node.
    pub fn project(&self, node: &SchemaNode, value: Value) -> Value {
        match (&node.kind, value) {
            (SchemaKind::Structure(members), Value::Object(fields)) => {
                let parsed: Map<String, Value> = fields
                    .into_iter()
                    .filter_map(|(name, field)| {
                        let member = members.get(&name)?;
                        Some((name, self.project(member, field)))
                    })
                    .collect();
                Value::Object(parsed)
            }
            (SchemaKind::List(element), Value::Array(items)) => Value::Array(
                items
                    .into_iter()
                    .map(|item| self.project(element, item))
                    .collect(),
            ),
            (_, value) => value,
        }
    }
}

fn remote_failure(error: Value) -> Error {
    let message = match error.get("message") {
        Some(Value::String(message)) => message.clone(),
        Some(other) => other.to_string(),
        None => match error.as_str() {
            Some(message) => message.to_string(),
            None => error.to_string(),
        },
    };
    Error::RemoteOperationFailed {
        message,
        code: error.get("code").and_then(Value::as_i64),
        data: error.get("data").cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user() -> SchemaNode {
        SchemaNode::structure([
            ("name", SchemaNode::string()),
            (
                "roles",
                SchemaNode::list(SchemaNode::structure([("id", SchemaNode::integer())])),
            ),
        ])
    }

    #[test]
    fn test_scalar_result() {
        let parsed = ResponseParser::new()
            .parse(&SchemaNode::integer(), json!({"jsonrpc": "2.0", "result": 5, "id": 0}))
            .unwrap();
        assert_eq!(parsed, json!(5));
    }

    #[test]
    fn test_undeclared_fields_are_dropped_recursively() {
        let raw = json!({"result": {
            "name": "ada",
            "internal": true,
            "roles": [{"id": 1, "secret": "x"}, {"id": 2}]
        }});
        let parsed = ResponseParser::new().parse(&user(), raw).unwrap();
        assert_eq!(parsed, json!({"name": "ada", "roles": [{"id": 1}, {"id": 2}]}));
    }

    #[test]
    fn test_declared_field_order_follows_response() {
        let raw = json!({"result": {"roles": [], "name": "ada"}});
        let parsed = ResponseParser::new().parse(&user(), raw).unwrap();
        let keys: Vec<&String> = parsed.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["roles", "name"]);
    }

    #[test]
    fn test_error_short_circuits() {
        let err = ResponseParser::new()
            .parse(&user(), json!({"error": {"message": "boom", "code": -32000}}))
            .unwrap_err();
        match err {
            Error::RemoteOperationFailed { message, code, .. } => {
                assert_eq!(message, "boom");
                assert_eq!(code, Some(-32000));
            }
            other => panic!("Expected RemoteOperationFailed, got: {:?}", other),
        }
    }

    #[test]
    fn test_bare_string_error_is_the_message() {
        let err = ResponseParser::new()
            .parse(&SchemaNode::integer(), json!({"error": "boom"}))
            .unwrap_err();
        match err {
            Error::RemoteOperationFailed { message, code, .. } => {
                assert_eq!(message, "boom");
                assert_eq!(code, None);
            }
            other => panic!("expected remote failure, got {:?}", other),
        }
    }

    #[test]
    fn test_error_wins_over_result() {
        let err = ResponseParser::new()
            .parse(&SchemaNode::integer(), json!({"result": 1, "error": {"message": "boom"}}))
            .unwrap_err();
        assert!(matches!(err, Error::RemoteOperationFailed { .. }));
    }

    #[test]
    fn test_null_error_is_ignored() {
        let parsed = ResponseParser::new()
            .parse(&SchemaNode::integer(), json!({"result": 7, "error": null}))
            .unwrap();
        assert_eq!(parsed, json!(7));
    }

    #[test]
    fn test_missing_result_is_malformed() {
        let err = ResponseParser::new()
            .parse(&SchemaNode::integer(), json!({"id": 3}))
            .unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
        let err = ResponseParser::new()
            .parse(&SchemaNode::integer(), json!([1, 2]))
            .unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn test_unsupported_kind_and_shape_mismatch_pass_through() {
        let schema = SchemaNode::structure([
            ("ratio", SchemaNode::new(SchemaKind::Unsupported("float".into()))),
            ("items", SchemaNode::list(SchemaNode::integer())),
        ]);
        let raw = json!({"result": {"ratio": 0.25, "items": "not-a-list"}});
        let parsed = ResponseParser::new().parse(&schema, raw).unwrap();
        assert_eq!(parsed, json!({"ratio": 0.25, "items": "not-a-list"}));
    }

    #[test]
    fn test_scalars_are_not_type_checked() {
        let parsed = ResponseParser::new()
            .parse(&SchemaNode::integer(), json!({"result": "five"}))
            .unwrap();
        assert_eq!(parsed, json!("five"));
    }
}
