use super::core::{Dispatch, ModeledClient};
use super::factory::{create_client, DynamicClient};
use crate::cache::CachedClient;
use crate::model::{ApiModel, ModelLoader};
use crate::transport::{HttpTransport, Transport};
use crate::{Error, ErrorContext, Result};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

/// Builder for creating clients with custom configuration.
///
/// Env overrides (explicit builder settings win):
/// - `MODELRPC_ENDPOINT_URL`: replace the model's `endpoint_url`
/// - `MODELRPC_MEMOIZE=1`: wrap the dispatcher in a [`CachedClient`]
/// - `MODELRPC_CACHE_MAX_ENTRIES`: bound the memoizer (LRU)
pub struct ClientBuilder {
    model: Option<Arc<ApiModel>>,
    model_path: Option<PathBuf>,
    transport: Option<Arc<dyn Transport>>,
    endpoint_override: Option<String>,
    memoize: Option<bool>,
    cache_max_entries: Option<usize>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            model: None,
            model_path: None,
            transport: None,
            endpoint_override: None,
            memoize: None,
            cache_max_entries: None,
        }
    }

    /// Use an already-loaded model.
    pub fn model(mut self, model: impl Into<Arc<ApiModel>>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Load the model from a JSON or YAML file at build time.
    pub fn model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }

    /// Inject a transport. Default is [`HttpTransport`] on the endpoint URL.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Override the endpoint URL from the model.
    pub fn endpoint_override(mut self, url: impl Into<String>) -> Self {
        self.endpoint_override = Some(url.into());
        self
    }

    /// Memoize results by operation and arguments.
    ///
    /// Only safe for idempotent, read-like operations: a memoized call never
    /// reaches the server again for the same arguments.
    pub fn memoize(mut self, enable: bool) -> Self {
        self.memoize = Some(enable);
        self
    }

    /// Bound the memoizer to `n` entries, evicting least recently used.
    pub fn cache_max_entries(mut self, n: usize) -> Self {
        self.cache_max_entries = Some(n);
        self
    }

    /// Build the client.
    pub async fn build(self) -> Result<DynamicClient> {
        let model = match (self.model, self.model_path) {
            (Some(model), _) => model,
            (None, Some(path)) => Arc::new(ModelLoader::new().load_from_file(&path).await?),
            (None, None) => {
                return Err(Error::configuration_with_context(
                    "an API model is required",
                    ErrorContext::new()
                        .with_field_path("builder.model")
                        .with_source("client_builder"),
                ))
            }
        };

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let endpoint = self
                    .endpoint_override
                    .or_else(|| std::env::var("MODELRPC_ENDPOINT_URL").ok())
                    .unwrap_or_else(|| model.endpoint_url.clone());
                url::Url::parse(&endpoint).map_err(|e| {
                    Error::configuration_with_context(
                        format!("invalid endpoint URL: {}", e),
                        ErrorContext::new()
                            .with_field_path("endpoint_url")
                            .with_details(endpoint.clone())
                            .with_source("client_builder"),
                    )
                })?;
                Arc::new(HttpTransport::new(&endpoint)?) as Arc<dyn Transport>
            }
        };

        let memoize = self
            .memoize
            .unwrap_or_else(|| std::env::var("MODELRPC_MEMOIZE").ok().as_deref() == Some("1"));
        let cache_max_entries = self.cache_max_entries.or_else(|| {
            std::env::var("MODELRPC_CACHE_MAX_ENTRIES")
                .ok()?
                .parse::<usize>()
                .ok()
        });

        let modeled = ModeledClient::new(model, transport);
        let dispatcher: Arc<dyn Dispatch> = if !memoize {
            Arc::new(modeled)
        } else if let Some(max) = cache_max_entries.and_then(NonZeroUsize::new) {
            Arc::new(CachedClient::bounded(modeled, max))
        } else {
            Arc::new(CachedClient::new(modeled))
        };

        Ok(create_client(dispatcher))
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
