//! Parameter validator: checks caller arguments against an input schema.

use super::args::{Args, Params};
use super::value_type_name;
use crate::model::{SchemaKind, SchemaNode};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Validates call arguments against an operation's input schema.
///
/// Positional arguments are checked as a sequence, keyword arguments as a
/// mapping; the top-level schema must agree with the mode used. The first
/// violation found is returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParamsValidator;

impl ParamsValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate `args` against `input` and return them in canonical form.
    pub fn validate(&self, input: &SchemaNode, args: Args) -> Result<Params> {
        let (positional, keyword) = args.into_parts();
        if !positional.is_empty() && !keyword.is_empty() {
            return Err(Error::AmbiguousArgumentMode {
                positional: positional.len(),
                keyword: keyword.len(),
            });
        }

        let params = if positional.is_empty() {
            Params::Keyword(keyword.into_iter().collect())
        } else {
            Params::Positional(positional)
        };
        self.validate_params(input, &params)?;
        Ok(params)
    }

    fn validate_params(&self, input: &SchemaNode, params: &Params) -> Result<()> {
        match (&input.kind, params) {
            (SchemaKind::Structure(members), Params::Keyword(fields)) => {
                self.validate_fields(members, fields, "$")
            }
            (SchemaKind::List(element), Params::Positional(items)) => {
                self.validate_items(element, items, "$")
            }
            // Mode disagrees with the declared shape, or the top level is not a container.
            _ => self.validate_value(input, &params.as_value(), "$"),
        }
    }

    /// Recursively validate one value against one schema node.
    pub fn validate_value(&self, node: &SchemaNode, value: &Value, path: &str) -> Result<()> {
        match &node.kind {
            SchemaKind::Structure(members) => match value {
                Value::Object(fields) => self.validate_fields(members, fields, path),
                other => Err(mismatch(other, "structure", path)),
            },
            SchemaKind::List(element) => match value {
                Value::Array(items) => self.validate_items(element, items, path),
                other => Err(mismatch(other, "list", path)),
            },
            SchemaKind::String => expect(value.is_string(), value, "string", path),
            SchemaKind::Integer => {
                expect(value.is_i64() || value.is_u64(), value, "integer", path)
            }
            SchemaKind::Boolean => expect(value.is_boolean(), value, "boolean", path),
            SchemaKind::Unsupported(kind) => Err(Error::UnsupportedSchemaKind {
                kind: kind.clone(),
                path: path.to_string(),
            }),
        }
    }

    fn validate_fields(
        &self,
        members: &IndexMap<String, SchemaNode>,
        fields: &Map<String, Value>,
        path: &str,
    ) -> Result<()> {
        for (name, field) in fields {
            let member = members.get(name).ok_or_else(|| Error::UnknownParameter {
                name: name.clone(),
                path: path.to_string(),
            })?;
            self.validate_value(member, field, &format!("{}.{}", path, name))?;
        }
        Ok(())
    }

    fn validate_items(&self, element: &SchemaNode, items: &[Value], path: &str) -> Result<()> {
        for (index, item) in items.iter().enumerate() {
            self.validate_value(element, item, &format!("{}[{}]", path, index))?;
        }
        Ok(())
    }
}

fn expect(ok: bool, value: &Value, expected: &'static str, path: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(mismatch(value, expected, path))
    }
}

fn mismatch(value: &Value, expected: &'static str, path: &str) -> Error {
    Error::TypeMismatch {
        path: path.to_string(),
        value: value.clone(),
        actual: value_type_name(value),
        expected,
    }
}
