//! Model → wire encoding.
//!
//! The inverse of decoding: produces a wire value suitable for JSON
//! serialization. Output keys follow schema declaration order; unset
//! optional fields are omitted entirely (never emitted as null), and the
//! overflow bag is re-emitted verbatim, so decode→encode round trips are
//! lossless.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::instance::{FieldValue, ModelInstance};
use crate::path::FieldPath;
use crate::registry::SchemaRegistry;
use crate::schema::{FieldKind, ScalarKind};

/// Errors produced while encoding a model instance into a wire value.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EncodeError {
    #[error("{path}: missing required field")]
    MissingRequiredField { path: FieldPath },
    #[error("{path}: value does not match the declared field kind")]
    InvalidFieldValue { path: FieldPath },
    #[error("{path}: unknown model {model:?}")]
    UnknownModel { path: FieldPath, model: String },
}

impl EncodeError {
    /// Wire location the error refers to.
    pub fn path(&self) -> &FieldPath {
        match self {
            Self::MissingRequiredField { path }
            | Self::InvalidFieldValue { path }
            | Self::UnknownModel { path, .. } => path,
        }
    }
}

/// Encode a model instance into a wire value.
pub fn encode(
    instance: &ModelInstance,
    registry: &SchemaRegistry,
) -> Result<Value, EncodeError> {
    encode_model(instance, registry, &FieldPath::root())
}

fn encode_model(
    instance: &ModelInstance,
    registry: &SchemaRegistry,
    path: &FieldPath,
) -> Result<Value, EncodeError> {
    let schema = registry
        .schema_for(instance.model())
        .map_err(|_| EncodeError::UnknownModel {
            path: path.clone(),
            model: instance.model().to_string(),
        })?;

    let mut out = Map::new();
    for field in &schema.fields {
        let wire_key = field.wire_key();
        match instance.get(&field.name) {
            None => {
                if field.required {
                    // The enforcement point for the direct-construction
                    // path: a forgotten required field fails at first
                    // encode.
                    return Err(EncodeError::MissingRequiredField {
                        path: path.key(wire_key),
                    });
                }
            }
            Some(FieldValue::Null) => {
                if !field.nullable {
                    return Err(EncodeError::InvalidFieldValue {
                        path: path.key(wire_key),
                    });
                }
                out.insert(wire_key.to_string(), Value::Null);
            }
            Some(value) => {
                let encoded =
                    encode_value(value, &field.kind, registry, &path.key(wire_key))?;
                out.insert(wire_key.to_string(), encoded);
            }
        }
    }

    for (key, value) in instance.extra() {
        // Declared fields win over a hand-edited overflow bag.
        if schema.field_by_wire_key(key).is_some() {
            continue;
        }
        out.insert(key.clone(), value.clone());
    }

    Ok(Value::Object(out))
}

fn encode_value(
    value: &FieldValue,
    kind: &FieldKind,
    registry: &SchemaRegistry,
    path: &FieldPath,
) -> Result<Value, EncodeError> {
    let invalid = || EncodeError::InvalidFieldValue { path: path.clone() };
    match kind {
        FieldKind::Scalar(scalar) => encode_scalar(value, *scalar, path),
        // Enum fields emit the raw wire value, declared or not.
        FieldKind::Enum(_) => match value {
            FieldValue::Str(s) => Ok(Value::String(s.clone())),
            FieldValue::Num(n) => Ok(Value::Number(n.clone())),
            _ => Err(invalid()),
        },
        FieldKind::Model(name) => match value {
            FieldValue::Model(nested) if nested.model() == name => {
                encode_model(nested, registry, path)
            }
            _ => Err(invalid()),
        },
        FieldKind::List(element) => match value {
            FieldValue::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    out.push(encode_value(item, element, registry, &path.index(index))?);
                }
                Ok(Value::Array(out))
            }
            _ => Err(invalid()),
        },
        FieldKind::Map(value_kind) => match value {
            FieldValue::Map(entries) => {
                let mut out = Map::new();
                for (key, item) in entries {
                    out.insert(
                        key.clone(),
                        encode_value(item, value_kind, registry, &path.key(key))?,
                    );
                }
                Ok(Value::Object(out))
            }
            _ => Err(invalid()),
        },
        FieldKind::Mixed => loose_wire(value, registry, path),
    }
}

fn encode_scalar(
    value: &FieldValue,
    scalar: ScalarKind,
    path: &FieldPath,
) -> Result<Value, EncodeError> {
    let invalid = || EncodeError::InvalidFieldValue { path: path.clone() };
    match (scalar, value) {
        (ScalarKind::Bool, FieldValue::Bool(b)) => Ok(Value::Bool(*b)),
        (ScalarKind::Str, FieldValue::Str(s)) => Ok(Value::String(s.clone())),
        (ScalarKind::Int, FieldValue::Num(n)) if n.is_i64() || n.is_u64() => {
            Ok(Value::Number(n.clone()))
        }
        (ScalarKind::Uint, FieldValue::Num(n)) if n.is_u64() => Ok(Value::Number(n.clone())),
        (ScalarKind::Float, FieldValue::Num(n)) => Ok(Value::Number(n.clone())),
        _ => Err(invalid()),
    }
}

/// Convert any typed value back to untyped wire form (mixed fields).
fn loose_wire(
    value: &FieldValue,
    registry: &SchemaRegistry,
    path: &FieldPath,
) -> Result<Value, EncodeError> {
    match value {
        FieldValue::Null => Ok(Value::Null),
        FieldValue::Bool(b) => Ok(Value::Bool(*b)),
        FieldValue::Num(n) => Ok(Value::Number(n.clone())),
        FieldValue::Str(s) => Ok(Value::String(s.clone())),
        FieldValue::Raw(v) => Ok(v.clone()),
        FieldValue::Model(nested) => encode_model(nested, registry, path),
        FieldValue::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                out.push(loose_wire(item, registry, &path.index(index))?);
            }
            Ok(Value::Array(out))
        }
        FieldValue::Map(entries) => {
            let mut out = Map::new();
            for (key, item) in entries {
                out.insert(key.clone(), loose_wire(item, registry, &path.key(key))?);
            }
            Ok(Value::Object(out))
        }
    }
}
