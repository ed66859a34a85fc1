//! Call key generation.

use crate::interpreter::Args;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Deterministic identity of one call: operation name plus arguments.
///
/// Positional order is significant. Keyword arguments (and the fields of any
/// nested structure) are sorted by name, so `f(a=1, b=2)` and `f(b=2, a=1)`
/// share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallKey {
    pub hash: String,
    pub operation: String,
    /// Canonical text the hash was computed from.
    pub encoded: String,
}

impl CallKey {
    pub fn new(operation: &str, args: &Args) -> Self {
        let positional = Value::Array(args.positional_args().iter().map(canonicalize).collect());
        let keyword = Value::Object(sorted(args.keyword_args().iter()));
        let encoded = format!("{}(args={},kwargs={})", operation, positional, keyword);

        let mut hasher = Sha256::new();
        hasher.update(encoded.as_bytes());
        let hash: String = hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();

        Self {
            hash,
            operation: operation.to_string(),
            encoded,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }
}

impl std::fmt::Display for CallKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hash)
    }
}

fn sorted<'a>(entries: impl Iterator<Item = (&'a String, &'a Value)>) -> Map<String, Value> {
    let mut entries: Vec<_> = entries.collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
        .into_iter()
        .map(|(k, v)| (k.clone(), canonicalize(v)))
        .collect()
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(sorted(map.iter())),
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keyword_order_does_not_change_key() {
        let a = CallKey::new("add", &Args::new().kwarg("x", 2).kwarg("y", 3));
        let b = CallKey::new("add", &Args::new().kwarg("y", 3).kwarg("x", 2));
        assert_eq!(a, b);
        assert_eq!(a.encoded, r#"add(args=[],kwargs={"x":2,"y":3})"#);
        assert_eq!(a.hash.len(), 64);
    }

    #[test]
    fn test_positional_order_changes_key() {
        let a = CallKey::new("subtract", &Args::positional([5, 3]));
        let b = CallKey::new("subtract", &Args::positional([3, 5]));
        assert_ne!(a, b);
    }

    #[test]
    fn test_nested_structures_are_sorted() {
        let a = CallKey::new("plot", &Args::new().kwarg("p", json!({"b": 1, "a": [{"d": 1, "c": 2}]})));
        let b = CallKey::new("plot", &Args::new().kwarg("p", json!({"a": [{"c": 2, "d": 1}], "b": 1})));
        assert_eq!(a, b);
    }

    #[test]
    fn test_operation_name_is_part_of_key() {
        let args = Args::positional([1, 2]);
        assert_ne!(CallKey::new("add", &args), CallKey::new("multiply", &args));
    }
}
