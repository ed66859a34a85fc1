//! # Call memoization
//!
//! [`CachedClient`] wraps any [`Dispatch`](crate::client::Dispatch) and
//! short-circuits repeated calls whose operation name and arguments match a
//! previous successful call.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`CachedClient`] | Memoizing decorator, unbounded or LRU-bounded |
//! | [`CallKey`] | Canonical encoding and SHA-256 hash of one call |
//! | [`CallRecord`] | A stored call, as returned by `history()` |
//! | [`CacheStats`] | Hit and miss counters |
//!
//! Memoized results are never invalidated. A non-idempotent operation
//! behind a memoizer silently stops reaching the server after its first
//! success, so enable it only for read-like APIs.
//!
//! ```rust,no_run
//! use modelrpc::cache::CachedClient;
//! use modelrpc::client::{create_client, ModeledClient};
//! use modelrpc::model::ModelLoader;
//! use std::sync::Arc;
//!
//! # async fn run() -> modelrpc::Result<()> {
//! let model = ModelLoader::new().load_from_file("calculator.json").await?;
//! let dispatcher = ModeledClient::from_model(Arc::new(model))?;
//! let client = create_client(Arc::new(CachedClient::new(dispatcher)));
//! # Ok(())
//! # }
//! ```

mod key;
mod memoizer;

pub use key::CallKey;
pub use memoizer::{CacheStats, CachedClient, CallRecord};
