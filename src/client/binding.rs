//! Per-operation bindings and their help text.

use super::factory::DynamicClient;
use crate::interpreter::Args;
use crate::model::{OperationModel, SchemaKind};
use crate::Result;
use serde_json::Value;
use std::fmt;

/// One documented parameter of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDoc {
    pub name: String,
    pub type_name: String,
    pub documentation: String,
    /// Positional, repeated parameter (list-typed input).
    pub variadic: bool,
}

/// Presentation-only description of an operation, derived from its model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDoc {
    pub name: String,
    pub summary: String,
    pub params: Vec<ParamDoc>,
    pub return_type: String,
    pub return_documentation: String,
}

impl OperationDoc {
    pub fn from_operation(operation: &OperationModel) -> Self {
        let params = match &operation.input.kind {
            SchemaKind::List(element) => vec![ParamDoc {
                name: "args".to_string(),
                type_name: element.type_name(),
                documentation: operation.input.documentation().to_string(),
                variadic: true,
            }],
            SchemaKind::Structure(members) => members
                .iter()
                .map(|(name, member)| ParamDoc {
                    name: name.clone(),
                    type_name: member.type_name(),
                    documentation: member.documentation().to_string(),
                    variadic: false,
                })
                .collect(),
            _ => Vec::new(),
        };

        Self {
            name: operation.name.clone(),
            summary: operation.documentation.clone(),
            params,
            return_type: operation.output.type_name(),
            return_documentation: operation.output.documentation().to_string(),
        }
    }

    /// `add(x: integer, y: integer) -> integer`
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| {
                if p.variadic {
                    format!("{}...: {}", p.name, p.type_name)
                } else {
                    format!("{}: {}", p.name, p.type_name)
                }
            })
            .collect();
        format!("{}({}) -> {}", self.name, params.join(", "), self.return_type)
    }
}

impl fmt::Display for OperationDoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.signature())?;
        if !self.summary.is_empty() {
            writeln!(f, "    {}", self.summary)?;
        }
        if !self.params.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Parameters:")?;
            for p in &self.params {
                let type_name = if p.variadic {
                    format!("{}(s)", p.type_name)
                } else {
                    p.type_name.clone()
                };
                if p.documentation.is_empty() {
                    writeln!(f, "        {} ({})", p.name, type_name)?;
                } else {
                    writeln!(f, "        {} ({}): {}", p.name, type_name, p.documentation)?;
                }
            }
        }
        writeln!(f)?;
        writeln!(f, "    Returns:")?;
        if self.return_documentation.is_empty() {
            writeln!(f, "        {}", self.return_type)
        } else {
            writeln!(f, "        {}: {}", self.return_type, self.return_documentation)
        }
    }
}

/// A callable handle for one operation of a [`DynamicClient`].
#[derive(Clone, Copy)]
pub struct OperationBinding<'a> {
    pub(crate) client: &'a DynamicClient,
    pub(crate) name: &'a str,
}

impl<'a> OperationBinding<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn doc(&self) -> Option<&'a OperationDoc> {
        self.client.doc(self.name)
    }

    /// Invoke the operation.
    pub async fn call(&self, args: Args) -> Result<Value> {
        self.client.call(self.name, args).await
    }
}

impl fmt::Debug for OperationBinding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationBinding")
            .field("name", &self.name)
            .finish()
    }
}
