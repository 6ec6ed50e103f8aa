//! Wire → model decoding.
//!
//! Converts an untyped wire value (decoded JSON) into a typed
//! [`ModelInstance`] driven by a declared [`ModelSchema`], recursively for
//! nested models and containers. Decoding is fail-fast: the first
//! violation is returned, carrying a field-path breadcrumb into the wire
//! document.

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

use crate::instance::{FieldValue, ModelInstance};
use crate::path::FieldPath;
use crate::registry::SchemaRegistry;
use crate::schema::{EnumSchema, FieldKind, ModelSchema, ScalarKind};

/// Errors produced while decoding a wire value into a model instance.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DecodeError {
    #[error("{path}: missing required field")]
    MissingRequiredField { path: FieldPath },
    #[error("{path}: unexpected null")]
    UnexpectedNull { path: FieldPath },
    #[error("{path}: expected {expected}, found {actual}")]
    TypeMismatch {
        path: FieldPath,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("{path}: unknown enum value {value}")]
    UnknownEnumValue { path: FieldPath, value: Value },
    #[error("{path}: expected {expected} container, found {actual}")]
    MalformedContainer {
        path: FieldPath,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("{path}: unknown field {key:?}")]
    UnknownField { path: FieldPath, key: String },
    #[error("{path}: unknown model {model:?}")]
    UnknownModel { path: FieldPath, model: String },
}

impl DecodeError {
    /// Wire location the error refers to.
    pub fn path(&self) -> &FieldPath {
        match self {
            Self::MissingRequiredField { path }
            | Self::UnexpectedNull { path }
            | Self::TypeMismatch { path, .. }
            | Self::UnknownEnumValue { path, .. }
            | Self::MalformedContainer { path, .. }
            | Self::UnknownField { path, .. }
            | Self::UnknownModel { path, .. } => path,
        }
    }
}

/// Per-call decode policy switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Reject undeclared enum wire values everywhere, overriding per-enum
    /// openness.
    pub strict_enums: bool,
    /// Reject unknown wire keys everywhere, overriding per-model
    /// permissive capture.
    pub deny_unknown_fields: bool,
}

/// Decode a wire value into an instance of the named model.
pub fn decode(
    wire: &Value,
    model: &str,
    registry: &SchemaRegistry,
) -> Result<ModelInstance, DecodeError> {
    decode_opts(wire, model, registry, &DecodeOptions::default())
}

/// Decode with explicit policy switches.
pub fn decode_opts(
    wire: &Value,
    model: &str,
    registry: &SchemaRegistry,
    options: &DecodeOptions,
) -> Result<ModelInstance, DecodeError> {
    let schema = registry
        .schema_for(model)
        .map_err(|_| DecodeError::UnknownModel {
            path: FieldPath::root(),
            model: model.to_string(),
        })?;
    decode_model(wire, &schema, registry, options, &FieldPath::root())
}

/// Decode against a schema held by the caller (still resolving nested
/// model references through the registry).
pub fn decode_with(
    wire: &Value,
    schema: &ModelSchema,
    registry: &SchemaRegistry,
) -> Result<ModelInstance, DecodeError> {
    decode_model(
        wire,
        schema,
        registry,
        &DecodeOptions::default(),
        &FieldPath::root(),
    )
}

fn decode_model(
    wire: &Value,
    schema: &ModelSchema,
    registry: &SchemaRegistry,
    options: &DecodeOptions,
    path: &FieldPath,
) -> Result<ModelInstance, DecodeError> {
    let Some(map) = wire.as_object() else {
        return Err(DecodeError::MalformedContainer {
            path: path.clone(),
            expected: "object",
            actual: wire_type_name(wire),
        });
    };

    let mut instance = ModelInstance::new(schema.name.clone());
    for field in &schema.fields {
        let wire_key = field.wire_key();
        match map.get(wire_key) {
            None => {
                if field.required {
                    return Err(DecodeError::MissingRequiredField {
                        path: path.key(wire_key),
                    });
                }
                // Left unset, never materialized as null: re-encoding must
                // not invent a key the wire never sent.
            }
            Some(Value::Null) => {
                if field.nullable {
                    instance.set(field.name.clone(), FieldValue::Null);
                } else if matches!(field.kind, FieldKind::Mixed) {
                    // A mixed field accepts any JSON value, null included.
                    instance.set(field.name.clone(), FieldValue::Raw(Value::Null));
                } else {
                    return Err(DecodeError::UnexpectedNull {
                        path: path.key(wire_key),
                    });
                }
            }
            Some(value) => {
                let decoded =
                    decode_value(value, &field.kind, registry, options, &path.key(wire_key))?;
                instance.set(field.name.clone(), decoded);
            }
        }
    }

    let strict = schema.strict || options.deny_unknown_fields;
    for (key, value) in map {
        if schema.field_by_wire_key(key).is_some() {
            continue;
        }
        if strict {
            return Err(DecodeError::UnknownField {
                path: path.clone(),
                key: key.clone(),
            });
        }
        instance.extra_mut().insert(key.clone(), value.clone());
    }

    Ok(instance)
}

fn decode_value(
    value: &Value,
    kind: &FieldKind,
    registry: &SchemaRegistry,
    options: &DecodeOptions,
    path: &FieldPath,
) -> Result<FieldValue, DecodeError> {
    match kind {
        FieldKind::Scalar(scalar) => decode_scalar(value, *scalar, path),
        FieldKind::Enum(e) => decode_enum(value, e, options, path),
        FieldKind::Model(name) => {
            let schema = registry
                .schema_for(name)
                .map_err(|_| DecodeError::UnknownModel {
                    path: path.clone(),
                    model: name.clone(),
                })?;
            Ok(FieldValue::Model(decode_model(
                value, &schema, registry, options, path,
            )?))
        }
        FieldKind::List(element) => {
            let Some(items) = value.as_array() else {
                return Err(DecodeError::MalformedContainer {
                    path: path.clone(),
                    expected: "array",
                    actual: wire_type_name(value),
                });
            };
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                out.push(decode_value(
                    item,
                    element,
                    registry,
                    options,
                    &path.index(index),
                )?);
            }
            Ok(FieldValue::List(out))
        }
        FieldKind::Map(value_kind) => {
            let Some(entries) = value.as_object() else {
                return Err(DecodeError::MalformedContainer {
                    path: path.clone(),
                    expected: "object",
                    actual: wire_type_name(value),
                });
            };
            // Keys are data, preserved verbatim in wire order.
            let mut out = IndexMap::with_capacity(entries.len());
            for (key, item) in entries {
                let decoded =
                    decode_value(item, value_kind, registry, options, &path.key(key))?;
                out.insert(key.clone(), decoded);
            }
            Ok(FieldValue::Map(out))
        }
        FieldKind::Mixed => Ok(FieldValue::Raw(value.clone())),
    }
}

fn decode_scalar(
    value: &Value,
    scalar: ScalarKind,
    path: &FieldPath,
) -> Result<FieldValue, DecodeError> {
    let mismatch = || DecodeError::TypeMismatch {
        path: path.clone(),
        expected: scalar.as_str(),
        actual: wire_type_name(value),
    };
    match scalar {
        ScalarKind::Bool => value.as_bool().map(FieldValue::Bool).ok_or_else(mismatch),
        ScalarKind::Str => value
            .as_str()
            .map(|s| FieldValue::Str(s.to_string()))
            .ok_or_else(mismatch),
        ScalarKind::Int => match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(FieldValue::Num(n.clone())),
            _ => Err(mismatch()),
        },
        ScalarKind::Uint => match value {
            Value::Number(n) if n.is_u64() => Ok(FieldValue::Num(n.clone())),
            _ => Err(mismatch()),
        },
        // JSON has one numeric type: integers are valid floats.
        ScalarKind::Float => match value {
            Value::Number(n) => Ok(FieldValue::Num(n.clone())),
            _ => Err(mismatch()),
        },
    }
}

fn decode_enum(
    value: &Value,
    e: &EnumSchema,
    options: &DecodeOptions,
    path: &FieldPath,
) -> Result<FieldValue, DecodeError> {
    let stored = match value {
        Value::String(s) => FieldValue::Str(s.clone()),
        Value::Number(n) => FieldValue::Num(n.clone()),
        _ => {
            return Err(DecodeError::TypeMismatch {
                path: path.clone(),
                expected: "string or number",
                actual: wire_type_name(value),
            })
        }
    };
    if e.contains(value) {
        return Ok(stored);
    }
    if e.strict || options.strict_enums {
        return Err(DecodeError::UnknownEnumValue {
            path: path.clone(),
            value: value.clone(),
        });
    }
    // Open enum: preserve the undeclared value raw so newer upstream
    // variants survive a round trip.
    Ok(stored)
}

/// Wire-side type name for diagnostics; numbers split into int/float.
pub(crate) fn wire_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
