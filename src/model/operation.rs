//! Operation and API models.

use super::schema::SchemaNode;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A named remote procedure with its input/output schemas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationModel {
    /// Filled in from the key of the `operations` map.
    #[serde(skip)]
    pub name: String,
    #[serde(default)]
    pub documentation: String,
    pub input: SchemaNode,
    pub output: SchemaNode,
}

/// A loaded API description. Read-only once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ApiModelDocument", into = "ApiModelDocument")]
pub struct ApiModel {
    pub endpoint_url: String,
    pub operations: IndexMap<String, OperationModel>,
}

impl ApiModel {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            operations: IndexMap::new(),
        }
    }

    /// Add an operation, taking its name as the map key.
    pub fn with_operation(
        mut self,
        name: impl Into<String>,
        documentation: impl Into<String>,
        input: SchemaNode,
        output: SchemaNode,
    ) -> Self {
        let name = name.into();
        self.operations.insert(
            name.clone(),
            OperationModel {
                name,
                documentation: documentation.into(),
                input,
                output,
            },
        );
        self
    }

    pub fn operation(&self, name: &str) -> Option<&OperationModel> {
        self.operations.get(name)
    }

    /// Operation names in declaration order.
    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(|k| k.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiModelDocument {
    endpoint_url: String,
    #[serde(default)]
    operations: IndexMap<String, OperationModel>,
}

impl From<ApiModelDocument> for ApiModel {
    fn from(doc: ApiModelDocument) -> Self {
        let operations = doc
            .operations
            .into_iter()
            .map(|(name, mut op)| {
                op.name = name.clone();
                (name, op)
            })
            .collect();
        ApiModel {
            endpoint_url: doc.endpoint_url,
            operations,
        }
    }
}

impl From<ApiModel> for ApiModelDocument {
    fn from(model: ApiModel) -> Self {
        ApiModelDocument {
            endpoint_url: model.endpoint_url,
            operations: model.operations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_names_come_from_map_keys() {
        let model: ApiModel = serde_json::from_value(json!({
            "endpoint_url": "http://localhost:4000",
            "operations": {
                "multiply": {
                    "documentation": "Multiplies numbers",
                    "input": {"type": "list", "members": {"type": "integer"}},
                    "output": {"type": "integer"}
                },
                "add": {
                    "input": {"type": "list", "members": {"type": "integer"}},
                    "output": {"type": "integer"}
                }
            }
        }))
        .unwrap();

        assert_eq!(model.operation("multiply").unwrap().name, "multiply");
        assert_eq!(model.operation("add").unwrap().documentation, "");
        assert_eq!(model.operation_names().collect::<Vec<_>>(), vec!["multiply", "add"]);
        assert!(model.operation("divide").is_none());
    }
}
