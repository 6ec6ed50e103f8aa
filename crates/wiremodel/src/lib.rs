//! Schema-driven marshalling between JSON wire values and typed model
//! instances.
//!
//! A [`ModelSchema`] declares the fields of one model type: wire key,
//! requiredness, nullability, and value kind (scalar, enum, nested model,
//! list, map, or mixed). Schemas are published once in a
//! [`SchemaRegistry`]; [`decode`] turns an untyped wire value into a
//! typed [`ModelInstance`] and [`encode`] is its lossless inverse.
//! Unknown wire keys are captured into an overflow bag and re-emitted
//! verbatim, unset optional fields are distinct from explicit nulls, and
//! enums are open by default so upstream API additions do not break
//! older clients.
//!
//! ```
//! use serde_json::json;
//! use wiremodel::{decode, encode, SchemaRegistry, S};
//!
//! let registry = SchemaRegistry::new();
//! registry
//!     .declare(S.schema(
//!         "Customer",
//!         vec![
//!             S.field("id", S.str()),
//!             S.opt("tags", S.list(S.str())),
//!             S.opt("status", S.enum_of(["active", "paused"])),
//!         ],
//!     ))
//!     .unwrap();
//!
//! let wire = json!({"id": "abc", "status": "unknown_future_value"});
//! let customer = decode(&wire, "Customer", &registry).unwrap();
//! assert!(!customer.is_set("tags"));
//! assert_eq!(customer.get("status").unwrap().as_str(), Some("unknown_future_value"));
//! assert_eq!(encode(&customer, &registry).unwrap(), wire);
//! ```

pub mod decode;
pub mod encode;
pub mod instance;
pub mod json_schema;
pub mod path;
pub mod registry;
pub mod schema;

pub use decode::{decode, decode_opts, decode_with, DecodeError, DecodeOptions};
pub use encode::{encode, EncodeError};
pub use instance::{FieldValue, ModelInstance};
pub use json_schema::to_json_schema;
pub use path::{FieldPath, PathSegment};
pub use registry::{global, SchemaRegistry};
pub use schema::{
    model_from_json, model_to_json, validate_model, EnumSchema, FieldKind, FieldSchema,
    ModelSchema, ScalarKind, SchemaBuilder, Walker, S,
};
