//! # modelrpc
//!
//! Model-driven RPC client runtime: load a declarative API model, get a
//! client whose operations come from that model, with every call checked
//! against the declared input schema and every result shaped by the
//! declared output schema.
//!
//! ## Overview
//!
//! An API model names an endpoint and a set of operations. Each operation
//! carries an input and an output schema built from five kinds: `structure`,
//! `list`, `string`, `integer` and `boolean`. Nothing about the API is
//! compiled in; a new operation only needs a new model entry.
//!
//! Per call:
//!
//! 1. the [`DynamicClient`] looks the operation up in its dispatch table
//! 2. the [`ModeledClient`] validates the arguments against the input schema
//! 3. the [`Transport`](transport::Transport) performs one request/response exchange
//! 4. the response is unwrapped and projected through the output schema
//!
//! Optionally a [`CachedClient`] memoizes results per operation and arguments.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use modelrpc::{Args, ClientBuilder};
//!
//! #[tokio::main]
//! async fn main() -> modelrpc::Result<()> {
//!     let client = ClientBuilder::new()
//!         .model_path("calculator.json")
//!         .build()
//!         .await?;
//!
//!     let sum = client.call("add", Args::new().kwarg("x", 2).kwarg("y", 3)).await?;
//!     let product = client.call("multiply", Args::positional([2, 3, 4])).await?;
//!     println!("{sum} {product}");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`model`] | Schema model, API model, loading and validation |
//! | [`interpreter`] | Parameter validator and response parser |
//! | [`client`] | Dispatcher, client factory, builder |
//! | [`transport`] | JSON-RPC over HTTP |
//! | [`cache`] | Call memoizer |
//! | [`error`] | Error types |

pub mod cache;
pub mod client;
pub mod interpreter;
pub mod model;
pub mod transport;

// Re-export main types for convenience
pub use cache::CachedClient;
pub use client::{create_client, ClientBuilder, Dispatch, DynamicClient, ModeledClient};
pub use interpreter::{Args, Params};
pub use model::{ApiModel, ModelLoader, OperationModel, SchemaKind, SchemaNode};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
