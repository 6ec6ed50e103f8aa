//! Declarative model schemas.

pub mod builder;
pub mod metaschema;
pub mod schema;
pub mod validate;
pub mod walker;

pub use builder::{SchemaBuilder, S};
pub use metaschema::{model_from_json, model_to_json};
pub use schema::*;
pub use validate::validate_model;
pub use walker::Walker;
