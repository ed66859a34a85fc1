//! Call arguments and their validated form.

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Arguments for one operation call: positional values, keyword values, or
/// neither. Supplying both is rejected by the validator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    positional: Vec<Value>,
    keyword: IndexMap<String, Value>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// All-positional arguments, e.g. `add(1, 2)`.
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            keyword: IndexMap::new(),
        }
    }

    /// All-keyword arguments, e.g. `add(x=2, y=3)`.
    pub fn keyword<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            positional: Vec::new(),
            keyword: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a keyword argument.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(name.into(), value.into());
        self
    }

    pub fn positional_args(&self) -> &[Value] {
        &self.positional
    }

    pub fn keyword_args(&self) -> &IndexMap<String, Value> {
        &self.keyword
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<Value>, IndexMap<String, Value>) {
        (self.positional, self.keyword)
    }
}

/// Validated call parameters, in the form sent to the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum Params {
    Positional(Vec<Value>),
    Keyword(Map<String, Value>),
}

impl Params {
    pub fn as_value(&self) -> Value {
        self.clone().into_value()
    }

    pub fn into_value(self) -> Value {
        match self {
            Params::Positional(values) => Value::Array(values),
            Params::Keyword(map) => Value::Object(map),
        }
    }

    pub fn is_positional(&self) -> bool {
        matches!(self, Params::Positional(_))
    }
}

impl From<Params> for Value {
    fn from(params: Params) -> Self {
        params.into_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builders_collect_values() {
        let args = Args::new().arg(1).arg("two");
        assert_eq!(args.positional_args(), &[json!(1), json!("two")]);
        assert!(args.keyword_args().is_empty());

        let args = Args::keyword([("x", 2), ("y", 3)]).kwarg("z", 4);
        let names: Vec<&str> = args.keyword_args().keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["x", "y", "z"]);
        assert!(!args.is_empty());
        assert!(Args::new().is_empty());
    }

    #[test]
    fn test_params_into_value() {
        assert_eq!(Params::Positional(vec![json!(1)]).into_value(), json!([1]));
        let mut map = Map::new();
        map.insert("x".into(), json!(1));
        assert_eq!(Value::from(Params::Keyword(map)), json!({"x": 1}));
    }
}
