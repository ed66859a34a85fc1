//! Schema node tree.
//!
//! A schema node describes the shape of one value in an operation's input or
//! output. On disk a node looks like
//! `{"type": "structure", "members": {...}, "documentation": "..."}`; in memory
//! the `type`/`members` pair becomes a single tagged [`SchemaKind`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One node of a schema tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSchemaNode", into = "RawSchemaNode")]
pub struct SchemaNode {
    pub kind: SchemaKind,
    pub documentation: Option<String>,
}

/// The kind of a schema node, with its children.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// Named fields, kept in declaration order.
    Structure(IndexMap<String, SchemaNode>),
    /// Homogeneous sequence described by a single element node.
    List(Box<SchemaNode>),
    String,
    Integer,
    Boolean,
    /// A `type` tag this runtime does not know. Kept so that the model still
    /// loads; the validator rejects it and the parser passes values through.
    Unsupported(String),
}

impl SchemaKind {
    /// The `type` tag as written in the model document.
    pub fn tag(&self) -> &str {
        match self {
            SchemaKind::Structure(_) => "structure",
            SchemaKind::List(_) => "list",
            SchemaKind::String => "string",
            SchemaKind::Integer => "integer",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Unsupported(tag) => tag,
        }
    }
}

impl SchemaNode {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            documentation: None,
        }
    }

    pub fn structure<I, K>(members: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaNode)>,
        K: Into<String>,
    {
        Self::new(SchemaKind::Structure(
            members.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    pub fn list(element: SchemaNode) -> Self {
        Self::new(SchemaKind::List(Box::new(element)))
    }

    pub fn string() -> Self {
        Self::new(SchemaKind::String)
    }

    pub fn integer() -> Self {
        Self::new(SchemaKind::Integer)
    }

    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    pub fn with_documentation(mut self, doc: impl Into<String>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    /// Member nodes of a `structure`, if this is one.
    pub fn members(&self) -> Option<&IndexMap<String, SchemaNode>> {
        match &self.kind {
            SchemaKind::Structure(members) => Some(members),
            _ => None,
        }
    }

    /// Element node of a `list`, if this is one.
    pub fn element(&self) -> Option<&SchemaNode> {
        match &self.kind {
            SchemaKind::List(element) => Some(element),
            _ => None,
        }
    }

    pub fn documentation(&self) -> &str {
        self.documentation.as_deref().unwrap_or("")
    }

    /// Human-readable type name, e.g. `list<integer>`.
    pub fn type_name(&self) -> String {
        match &self.kind {
            SchemaKind::List(element) => format!("list<{}>", element.type_name()),
            other => other.tag().to_string(),
        }
    }

    /// Depth-first walk yielding every unsupported tag with its path.
    pub fn unsupported_kinds(&self) -> Vec<(String, String)> {
        let mut found = Vec::new();
        self.collect_unsupported("$", &mut found);
        found
    }

    fn collect_unsupported(&self, path: &str, found: &mut Vec<(String, String)>) {
        match &self.kind {
            SchemaKind::Structure(members) => {
                for (name, member) in members {
                    member.collect_unsupported(&format!("{}.{}", path, name), found);
                }
            }
            SchemaKind::List(element) => {
                element.collect_unsupported(&format!("{}[]", path), found)
            }
            SchemaKind::Unsupported(tag) => found.push((path.to_string(), tag.clone())),
            SchemaKind::String | SchemaKind::Integer | SchemaKind::Boolean => {}
        }
    }
}

impl fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}

/// Wire shape of a schema node.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawSchemaNode {
    #[serde(rename = "type")]
    type_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    members: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    documentation: Option<String>,
}

impl TryFrom<RawSchemaNode> for SchemaNode {
    type Error = String;

    fn try_from(raw: RawSchemaNode) -> Result<Self, Self::Error> {
        let kind = match raw.type_tag.as_str() {
            "structure" => {
                let members = match raw.members {
                    None | Some(Value::Null) => IndexMap::new(),
                    Some(Value::Object(map)) => {
                        let mut members = IndexMap::with_capacity(map.len());
                        for (name, node) in map {
                            let node: SchemaNode = serde_json::from_value(node)
                                .map_err(|e| format!("member '{}': {}", name, e))?;
                            members.insert(name, node);
                        }
                        members
                    }
                    Some(other) => {
                        return Err(format!(
                            "structure members must be an object, found {}",
                            crate::interpreter::value_type_name(&other)
                        ))
                    }
                };
                SchemaKind::Structure(members)
            }
            "list" => {
                let element = raw
                    .members
                    .ok_or_else(|| "list node requires a 'members' element schema".to_string())?;
                let element: SchemaNode = serde_json::from_value(element)
                    .map_err(|e| format!("list element: {}", e))?;
                SchemaKind::List(Box::new(element))
            }
            "string" => SchemaKind::String,
            "integer" => SchemaKind::Integer,
            "boolean" => SchemaKind::Boolean,
            other => SchemaKind::Unsupported(other.to_string()),
        };
        Ok(SchemaNode {
            kind,
            documentation: raw.documentation,
        })
    }
}

impl From<SchemaNode> for RawSchemaNode {
    fn from(node: SchemaNode) -> Self {
        let type_tag = node.kind.tag().to_string();
        let members = match node.kind {
            SchemaKind::Structure(members) => Some(Value::Object(
                members
                    .into_iter()
                    .map(|(name, member)| (name, Value::from(member)))
                    .collect(),
            )),
            SchemaKind::List(element) => Some(Value::from(*element)),
            _ => None,
        };
        RawSchemaNode {
            type_tag,
            members,
            documentation: node.documentation,
        }
    }
}

impl From<SchemaNode> for Value {
    fn from(node: SchemaNode) -> Self {
        let raw = RawSchemaNode::from(node);
        let mut map = serde_json::Map::new();
        map.insert("type".into(), Value::String(raw.type_tag));
        if let Some(members) = raw.members {
            map.insert("members".into(), members);
        }
        if let Some(doc) = raw.documentation {
            map.insert("documentation".into(), Value::String(doc));
        }
        Value::Object(map)
    }
}
