//! Model schemas as JSON data.
//!
//! Generated schema catalogs ship as plain JSON documents and load through
//! [`model_from_json`]; [`model_to_json`] is its lossless inverse. Parse
//! failures are programming errors in a declaration and are reported as
//! short stable codes.

use serde_json::{Map, Value};

use super::schema::{EnumSchema, FieldKind, FieldSchema, ModelSchema, ScalarKind};

/// Serialize a model schema to its JSON declaration form.
pub fn model_to_json(model: &ModelSchema) -> Value {
    let mut out = Map::new();
    out.insert("name".into(), Value::String(model.name.clone()));
    if model.strict {
        out.insert("strict".into(), Value::Bool(true));
    }
    if let Some(description) = &model.description {
        out.insert("description".into(), Value::String(description.clone()));
    }
    out.insert(
        "fields".into(),
        Value::Array(model.fields.iter().map(field_to_json).collect()),
    );
    Value::Object(out)
}

/// Parse a model schema from its JSON declaration form.
pub fn model_from_json(json: &Value) -> Result<ModelSchema, String> {
    let Some(map) = json.as_object() else {
        return Err("MODEL_NOT_OBJECT".into());
    };
    let Some(name) = map.get("name").and_then(Value::as_str) else {
        return Err("MODEL_NAME_MISSING".into());
    };
    let Some(fields) = map.get("fields").and_then(Value::as_array) else {
        return Err("FIELDS_NOT_ARRAY".into());
    };
    let mut model = ModelSchema::new(
        name,
        fields
            .iter()
            .map(field_from_json)
            .collect::<Result<Vec<_>, String>>()?,
    );
    if map.get("strict").and_then(Value::as_bool) == Some(true) {
        model = model.strict();
    }
    if let Some(description) = map.get("description").and_then(Value::as_str) {
        model = model.description(description);
    }
    Ok(model)
}

fn field_to_json(field: &FieldSchema) -> Value {
    let mut out = Map::new();
    out.insert("name".into(), Value::String(field.name.clone()));
    for (key, value) in kind_to_json(&field.kind) {
        out.insert(key, value);
    }
    if let Some(wire) = &field.wire {
        out.insert("wire".into(), Value::String(wire.clone()));
    }
    if !field.required {
        out.insert("optional".into(), Value::Bool(true));
    }
    if field.nullable {
        out.insert("nullable".into(), Value::Bool(true));
    }
    if let Some(default) = &field.default {
        out.insert("default".into(), default.clone());
    }
    if let Some(description) = &field.description {
        out.insert("description".into(), Value::String(description.clone()));
    }
    Value::Object(out)
}

fn field_from_json(json: &Value) -> Result<FieldSchema, String> {
    let Some(map) = json.as_object() else {
        return Err("FIELD_NOT_OBJECT".into());
    };
    let Some(name) = map.get("name").and_then(Value::as_str) else {
        return Err("FIELD_NAME_MISSING".into());
    };
    let mut field = FieldSchema::new(name, kind_from_json(map)?);
    if let Some(wire) = map.get("wire").and_then(Value::as_str) {
        field = field.wire(wire);
    }
    if map.get("optional").and_then(Value::as_bool) == Some(true) {
        field = field.optional();
    }
    if map.get("nullable").and_then(Value::as_bool) == Some(true) {
        field = field.nullable();
    }
    if let Some(default) = map.get("default") {
        field = field.default_value(default.clone());
    }
    if let Some(description) = map.get("description").and_then(Value::as_str) {
        field = field.description(description);
    }
    Ok(field)
}

fn kind_to_json(kind: &FieldKind) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert("kind".into(), Value::String(kind.kind().into()));
    match kind {
        FieldKind::Scalar(_) | FieldKind::Mixed => {}
        FieldKind::Enum(e) => {
            out.insert("values".into(), Value::Array(e.values.clone()));
            if e.strict {
                out.insert("closed".into(), Value::Bool(true));
            }
        }
        FieldKind::Model(name) => {
            out.insert("model".into(), Value::String(name.clone()));
        }
        FieldKind::List(inner) | FieldKind::Map(inner) => {
            out.insert("of".into(), Value::Object(kind_to_json(inner)));
        }
    }
    out
}

fn kind_from_json(map: &Map<String, Value>) -> Result<FieldKind, String> {
    let Some(kind) = map.get("kind").and_then(Value::as_str) else {
        return Err("KIND_MISSING".into());
    };
    match kind {
        "bool" => Ok(FieldKind::Scalar(ScalarKind::Bool)),
        "int" => Ok(FieldKind::Scalar(ScalarKind::Int)),
        "uint" => Ok(FieldKind::Scalar(ScalarKind::Uint)),
        "float" => Ok(FieldKind::Scalar(ScalarKind::Float)),
        "str" => Ok(FieldKind::Scalar(ScalarKind::Str)),
        "mixed" => Ok(FieldKind::Mixed),
        "enum" => {
            let Some(values) = map.get("values").and_then(Value::as_array) else {
                return Err("ENUM_VALUES_MISSING".into());
            };
            let mut e = EnumSchema::new(values.clone());
            if map.get("closed").and_then(Value::as_bool) == Some(true) {
                e = e.strict();
            }
            Ok(FieldKind::Enum(e))
        }
        "model" => {
            let Some(name) = map.get("model").and_then(Value::as_str) else {
                return Err("MODEL_REF_MISSING".into());
            };
            Ok(FieldKind::Model(name.into()))
        }
        "list" | "map" => {
            let Some(inner) = map.get("of").and_then(Value::as_object) else {
                return Err("ELEMENT_KIND_MISSING".into());
            };
            let inner = Box::new(kind_from_json(inner)?);
            if kind == "list" {
                Ok(FieldKind::List(inner))
            } else {
                Ok(FieldKind::Map(inner))
            }
        }
        _ => Err("UNKNOWN_KIND".into()),
    }
}
