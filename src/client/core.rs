use crate::interpreter::{Args, Params, ParamsValidator, ResponseParser};
use crate::model::{ApiModel, OperationModel};
use crate::transport::{HttpTransport, Transport};
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// The call contract shared by the dispatcher and its decorators.
#[async_trait]
pub trait Dispatch: Send + Sync {
    /// Invoke `operation` with `args` and return the parsed result.
    async fn call(&self, operation: &str, args: Args) -> Result<Value>;

    /// The API model calls are checked against.
    fn model(&self) -> &ApiModel;
}

#[async_trait]
impl<D: Dispatch + ?Sized> Dispatch for Arc<D> {
    async fn call(&self, operation: &str, args: Args) -> Result<Value> {
        (**self).call(operation, args).await
    }

    fn model(&self) -> &ApiModel {
        (**self).model()
    }
}

/// Operation dispatcher: validate, send, parse.
///
/// Holds no per-call state; request correlation belongs to the transport.
pub struct ModeledClient {
    model: Arc<ApiModel>,
    transport: Arc<dyn Transport>,
    validator: ParamsValidator,
    parser: ResponseParser,
}

impl ModeledClient {
    pub fn new(model: Arc<ApiModel>, transport: Arc<dyn Transport>) -> Self {
        Self {
            model,
            transport,
            validator: ParamsValidator::new(),
            parser: ResponseParser::new(),
        }
    }

    /// Dispatcher talking JSON-RPC over HTTP to the model's `endpoint_url`.
    pub fn from_model(model: Arc<ApiModel>) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(&model.endpoint_url)?);
        Ok(Self::new(model, transport))
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Look up an operation model by name.
    pub fn operation(&self, name: &str) -> Result<&OperationModel> {
        self.model
            .operation(name)
            .ok_or_else(|| Error::UnknownOperation {
                name: name.to_string(),
            })
    }

    /// Validate `args` against the input schema of `operation`.
    pub fn validate_params(&self, operation: &str, args: Args) -> Result<Params> {
        let op = self.operation(operation)?;
        self.validator.validate(&op.input, args)
    }

    /// Parse a raw response with the output schema of `operation`.
    pub fn parse_response(&self, operation: &str, response: Value) -> Result<Value> {
        let op = self.operation(operation)?;
        self.parser.parse(&op.output, response)
    }
}

#[async_trait]
impl Dispatch for ModeledClient {
    async fn call(&self, operation: &str, args: Args) -> Result<Value> {
        let params = self.validate_params(operation, args)?;
        debug!(
            operation,
            positional = params.is_positional(),
            transport = self.transport.name(),
            "dispatching operation"
        );
        let response = self.transport.send(operation, params.into_value()).await?;
        self.parse_response(operation, response)
    }

    fn model(&self) -> &ApiModel {
        &self.model
    }
}
