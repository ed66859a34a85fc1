//! API model layer: the declarative description a client is built from.
//!
//! # API Model Layer
//!
//! An API model names an endpoint and a catalogue of operations. Every
//! operation declares an input schema, an output schema and a line of
//! documentation. Models are loaded once and shared read-only by clients.
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`schema`] | Schema node tree (`structure`, `list`, `string`, `integer`, `boolean`) |
//! | [`operation`] | Operation and API model types |
//! | [`loader`] | Loading models from JSON/YAML files, strings and URLs |
//! | [`validator`] | Model document validation using JSON Schema |
//! | [`error`] | Model-specific error types |
//!
//! ## Example
//!
//! ```rust,no_run
//! use modelrpc::model::ModelLoader;
//!
//! #[tokio::main]
//! async fn main() -> modelrpc::Result<()> {
//!     let model = ModelLoader::new().load_from_file("models/calculator.json").await?;
//!     for name in model.operation_names() {
//!         println!("{}", name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loader;
pub mod operation;
pub mod schema;
pub mod validator;

pub use error::ModelError;
pub use loader::{ModelFormat, ModelLoader};
pub use operation::{ApiModel, OperationModel};
pub use schema::{SchemaKind, SchemaNode};
pub use validator::ModelValidator;
