//! Client surface: the dispatcher, the factory that binds operations from a
//! model, and the builder tying model, transport and memoizer together.
//!
//! Implementation details are split into submodules under `src/client/`.

pub mod binding;
pub mod builder;
pub mod core;
pub mod factory;

pub use binding::{OperationBinding, OperationDoc, ParamDoc};
pub use builder::ClientBuilder;
pub use core::{Dispatch, ModeledClient};
pub use factory::{create_client, DynamicClient};
