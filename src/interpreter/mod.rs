//! Schema interpreter: validation of call arguments and parsing of responses.
//!
//! Both halves walk the same [`SchemaNode`](crate::model::SchemaNode) tree by
//! matching on its kind. They treat mismatches differently:
//!
//! | Component | Unknown fields | Wrong types | Unsupported kinds |
//! |-----------|----------------|-------------|-------------------|
//! | [`ParamsValidator`] | `UnknownParameter` | `TypeMismatch` | `UnsupportedSchemaKind` |
//! | [`ResponseParser`] | dropped | passed through | passed through |
//!
//! # Examples
//!
//! ```
//! use modelrpc::interpreter::{Args, ParamsValidator, ResponseParser};
//! use modelrpc::model::SchemaNode;
//! use serde_json::json;
//!
//! let input = SchemaNode::structure([("x", SchemaNode::integer()), ("y", SchemaNode::integer())]);
//! let params = ParamsValidator::new()
//!     .validate(&input, Args::keyword([("x", 2), ("y", 3)]))
//!     .unwrap();
//! assert_eq!(params.into_value(), json!({"x": 2, "y": 3}));
//!
//! let result = ResponseParser::new()
//!     .parse(&SchemaNode::integer(), json!({"result": 5}))
//!     .unwrap();
//! assert_eq!(result, json!(5));
//! ```

pub mod args;
pub mod parser;
pub mod validator;

pub use args::{Args, Params};
pub use parser::ResponseParser;
pub use validator::ParamsValidator;

use serde_json::Value;

/// Runtime type of a JSON value, named in schema vocabulary where one exists.
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "structure",
    }
}
