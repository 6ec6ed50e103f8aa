//! Typed in-memory model values.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use crate::schema::{FieldKind, ModelSchema};

/// A typed value held by one model field.
///
/// `Null` is an explicit wire null; an *unset* field is simply absent from
/// its instance. Enum fields hold their raw wire value (`Str` or `Num`),
/// declared or not; mixed fields hold untyped JSON in `Raw`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Num(Number),
    Str(String),
    Model(ModelInstance),
    List(Vec<FieldValue>),
    Map(IndexMap<String, FieldValue>),
    Raw(Value),
}

impl FieldValue {
    /// Returns the "kind" string identifier for this value.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Num(_) => "num",
            Self::Str(_) => "str",
            Self::Model(_) => "model",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Raw(_) => "raw",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Num(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Num(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Num(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_model(&self) -> Option<&ModelInstance> {
        match self {
            Self::Model(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, FieldValue>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&Value> {
        match self {
            Self::Raw(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Num(Number::from(v))
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        Self::Num(Number::from(v))
    }
}

impl From<f64> for FieldValue {
    /// Non-finite numbers have no JSON form and convert to `Null`.
    fn from(v: f64) -> Self {
        Number::from_f64(v).map(Self::Num).unwrap_or(Self::Null)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Value> for FieldValue {
    fn from(v: Value) -> Self {
        Self::Raw(v)
    }
}

impl From<ModelInstance> for FieldValue {
    fn from(v: ModelInstance) -> Self {
        Self::Model(v)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(v: Vec<FieldValue>) -> Self {
        Self::List(v)
    }
}

/// An in-memory instance conforming to one model schema.
///
/// Holds a value per *set* field plus an overflow bag of wire keys that
/// were present in decoded input but are not declared in the schema. The
/// bag is re-emitted verbatim on encode, so decode→encode round trips are
/// lossless for unknown fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInstance {
    model: String,
    fields: HashMap<String, FieldValue>,
    extra: Map<String, Value>,
}

impl ModelInstance {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            fields: HashMap::new(),
            extra: Map::new(),
        }
    }

    /// Builder-path constructor that seeds declared defaults.
    ///
    /// Only the direct-construction path applies defaults; decoding never
    /// materializes a key the wire did not send.
    pub fn with_defaults(schema: &ModelSchema) -> Self {
        let mut instance = Self::new(schema.name.clone());
        for field in &schema.fields {
            if let Some(default) = &field.default {
                instance.fields.insert(
                    field.name.clone(),
                    default_field_value(default, &field.kind),
                );
            }
        }
        instance
    }

    /// Name of the model schema this instance conforms to.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Whether the field is set (an explicit null counts as set).
    pub fn is_set(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Returns a copy with `name` set; the receiver is unchanged.
    pub fn with(&self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        let mut copy = self.clone();
        copy.set(name, value);
        copy
    }

    /// Removes a field value, returning it. The field becomes unset.
    pub fn unset(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    /// Names of the set fields, sorted.
    pub fn set_fields(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The overflow bag of undeclared wire keys, in wire order.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    pub fn extra_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.extra
    }
}

/// Convert a declared default (a wire value) into its typed form.
///
/// Schema validation restricts defaults to scalar, enum, and mixed kinds,
/// so no registry is needed here.
fn default_field_value(default: &Value, kind: &FieldKind) -> FieldValue {
    if default.is_null() {
        return FieldValue::Null;
    }
    match (kind, default) {
        (FieldKind::Mixed, _) => FieldValue::Raw(default.clone()),
        (_, Value::Bool(b)) => FieldValue::Bool(*b),
        (_, Value::Number(n)) => FieldValue::Num(n.clone()),
        (_, Value::String(s)) => FieldValue::Str(s.clone()),
        _ => FieldValue::Raw(default.clone()),
    }
}
