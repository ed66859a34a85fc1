//! Client factory: one binding per operation declared in the model.

use super::binding::{OperationBinding, OperationDoc};
use super::core::Dispatch;
use crate::interpreter::Args;
use crate::model::ApiModel;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

/// Build a [`DynamicClient`] exposing every operation of the dispatcher's model.
pub fn create_client(dispatcher: Arc<dyn Dispatch>) -> DynamicClient {
    let bindings = dispatcher
        .model()
        .operations
        .values()
        .map(|op| (op.name.clone(), OperationDoc::from_operation(op)))
        .collect();
    DynamicClient {
        dispatcher,
        bindings,
    }
}

/// A client whose operations are only known once the model is loaded.
///
/// Operations are reached through a dispatch table keyed by name:
/// [`call`](Self::call) for direct invocation, or
/// [`operation`](Self::operation) for a bound handle.
pub struct DynamicClient {
    dispatcher: Arc<dyn Dispatch>,
    bindings: IndexMap<String, OperationDoc>,
}

impl DynamicClient {
    /// Invoke a declared operation.
    pub async fn call(&self, operation: &str, args: Args) -> Result<Value> {
        if !self.bindings.contains_key(operation) {
            return Err(Error::UnknownOperation {
                name: operation.to_string(),
            });
        }
        self.dispatcher.call(operation, args).await
    }

    /// Bound handle for one operation.
    pub fn operation(&self, name: &str) -> Result<OperationBinding<'_>> {
        let (name, _) = self
            .bindings
            .get_key_value(name)
            .ok_or_else(|| Error::UnknownOperation {
                name: name.to_string(),
            })?;
        Ok(OperationBinding { client: self, name })
    }

    /// All bindings in model declaration order.
    pub fn operations(&self) -> impl Iterator<Item = OperationBinding<'_>> {
        self.bindings
            .keys()
            .map(move |name| OperationBinding { client: self, name })
    }

    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(|k| k.as_str())
    }

    pub fn has_operation(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn doc(&self, name: &str) -> Option<&OperationDoc> {
        self.bindings.get(name)
    }

    /// Help text for every operation.
    pub fn help(&self) -> String {
        self.bindings
            .values()
            .map(|doc| doc.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn model(&self) -> &ApiModel {
        self.dispatcher.model()
    }

    pub fn dispatcher(&self) -> &Arc<dyn Dispatch> {
        &self.dispatcher
    }
}

impl std::fmt::Debug for DynamicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicClient")
            .field("endpoint_url", &self.model().endpoint_url)
            .field("operations", &self.bindings.keys().collect::<Vec<_>>())
            .finish()
    }
}
