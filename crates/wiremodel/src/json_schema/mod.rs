//! JSON Schema (draft-07) export.
//!
//! Maps model schemas to a self-contained JSON Schema document for
//! documentation and codegen consumers. Nested models become `$defs`
//! entries referenced with `$ref`; open enums export their declared
//! values as `examples` rather than a closed `enum` list.

use std::collections::BTreeSet;

use serde_json::{json, Map, Value};

use crate::registry::SchemaRegistry;
use crate::schema::{FieldKind, FieldSchema, ModelSchema, ScalarKind, Walker};

/// Export the named model (and every model it references) as a JSON
/// Schema document.
pub fn to_json_schema(model: &str, registry: &SchemaRegistry) -> Result<Value, String> {
    let mut defs = Map::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut queue = vec![model.to_string()];
    while let Some(name) = queue.pop() {
        if !seen.insert(name.clone()) {
            continue;
        }
        let schema = registry.schema_for(&name)?;
        defs.insert(name, model_def(&schema));
        for referenced in Walker::model_refs(&schema) {
            if !seen.contains(&referenced) {
                queue.push(referenced);
            }
        }
    }
    Ok(json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "$ref": format!("#/$defs/{}", model),
        "$defs": Value::Object(defs),
    }))
}

fn model_def(schema: &ModelSchema) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for field in &schema.fields {
        properties.insert(field.wire_key().to_string(), field_def(field));
        if field.required {
            required.push(Value::String(field.wire_key().to_string()));
        }
    }
    let mut def = Map::new();
    def.insert("type".into(), json!("object"));
    def.insert("title".into(), Value::String(schema.name.clone()));
    if let Some(description) = &schema.description {
        def.insert("description".into(), Value::String(description.clone()));
    }
    def.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        def.insert("required".into(), Value::Array(required));
    }
    if schema.strict {
        def.insert("additionalProperties".into(), Value::Bool(false));
    }
    Value::Object(def)
}

fn field_def(field: &FieldSchema) -> Value {
    let mut def = kind_def(&field.kind);
    if field.nullable {
        def = json!({"oneOf": [def, {"type": "null"}]});
    }
    if let Some(obj) = def.as_object_mut() {
        if let Some(description) = &field.description {
            obj.insert("description".into(), Value::String(description.clone()));
        }
        if let Some(default) = &field.default {
            obj.insert("default".into(), default.clone());
        }
    }
    def
}

fn kind_def(kind: &FieldKind) -> Value {
    match kind {
        FieldKind::Scalar(ScalarKind::Bool) => json!({"type": "boolean"}),
        FieldKind::Scalar(ScalarKind::Int) => json!({"type": "integer"}),
        FieldKind::Scalar(ScalarKind::Uint) => json!({"type": "integer", "minimum": 0}),
        FieldKind::Scalar(ScalarKind::Float) => json!({"type": "number"}),
        FieldKind::Scalar(ScalarKind::Str) => json!({"type": "string"}),
        FieldKind::Enum(e) => {
            if e.strict {
                json!({"enum": e.values.clone()})
            } else {
                let mut def = Map::new();
                if let Some(base) = enum_base_type(&e.values) {
                    def.insert("type".into(), Value::String(base.into()));
                }
                def.insert("examples".into(), Value::Array(e.values.clone()));
                Value::Object(def)
            }
        }
        FieldKind::Model(name) => json!({"$ref": format!("#/$defs/{}", name)}),
        FieldKind::List(inner) => json!({"type": "array", "items": kind_def(inner)}),
        FieldKind::Map(inner) => {
            json!({"type": "object", "additionalProperties": kind_def(inner)})
        }
        FieldKind::Mixed => json!({}),
    }
}

/// The common JSON type of an enum's declared values, if they share one.
fn enum_base_type(values: &[Value]) -> Option<&'static str> {
    let mut base = None;
    for value in values {
        let t = if value.is_string() {
            "string"
        } else if value.is_number() {
            "integer"
        } else {
            return None;
        };
        match base {
            None => base = Some(t),
            Some(b) if b == t => {}
            Some(_) => return None,
        }
    }
    base
}
