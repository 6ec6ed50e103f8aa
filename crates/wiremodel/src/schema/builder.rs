//! Fluent factory for field kinds and model declarations.

use serde_json::Value;

use super::schema::*;

/// Builder for field kinds, field declarations, and model schemas.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder;

impl SchemaBuilder {
    pub fn new() -> Self {
        Self
    }

    // ------------------------------------------------------------------
    // Field kinds

    pub fn bool(&self) -> FieldKind {
        FieldKind::Scalar(ScalarKind::Bool)
    }

    pub fn int(&self) -> FieldKind {
        FieldKind::Scalar(ScalarKind::Int)
    }

    pub fn uint(&self) -> FieldKind {
        FieldKind::Scalar(ScalarKind::Uint)
    }

    pub fn float(&self) -> FieldKind {
        FieldKind::Scalar(ScalarKind::Float)
    }

    pub fn str(&self) -> FieldKind {
        FieldKind::Scalar(ScalarKind::Str)
    }

    pub fn mixed(&self) -> FieldKind {
        FieldKind::Mixed
    }

    /// An open enum over the given wire values.
    pub fn enum_of<I>(&self, values: I) -> FieldKind
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        FieldKind::Enum(EnumSchema::new(
            values.into_iter().map(Into::into).collect(),
        ))
    }

    /// A closed enum: undeclared wire values are rejected at decode time.
    pub fn enum_strict<I>(&self, values: I) -> FieldKind
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        FieldKind::Enum(
            EnumSchema::new(values.into_iter().map(Into::into).collect()).strict(),
        )
    }

    /// A nested model, resolved by name through the registry.
    pub fn model(&self, name: impl Into<String>) -> FieldKind {
        FieldKind::Model(name.into())
    }

    pub fn list(&self, element: FieldKind) -> FieldKind {
        FieldKind::List(Box::new(element))
    }

    pub fn map(&self, value: FieldKind) -> FieldKind {
        FieldKind::Map(Box::new(value))
    }

    // ------------------------------------------------------------------
    // Fields and models

    /// A required field.
    pub fn field(&self, name: impl Into<String>, kind: FieldKind) -> FieldSchema {
        FieldSchema::new(name, kind)
    }

    /// An optional field.
    pub fn opt(&self, name: impl Into<String>, kind: FieldKind) -> FieldSchema {
        FieldSchema::new(name, kind).optional()
    }

    pub fn schema(&self, name: impl Into<String>, fields: Vec<FieldSchema>) -> ModelSchema {
        ModelSchema::new(name, fields)
    }
}

/// Global default schema builder.
pub static S: SchemaBuilder = SchemaBuilder;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn s() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    #[test]
    fn scalar_shorthands() {
        assert_eq!(s().bool().kind(), "bool");
        assert_eq!(s().int().kind(), "int");
        assert_eq!(s().uint().kind(), "uint");
        assert_eq!(s().float().kind(), "float");
        assert_eq!(s().str().kind(), "str");
        assert_eq!(s().mixed().kind(), "mixed");
    }

    #[test]
    fn enum_of_collects_values() {
        let kind = s().enum_of(["active", "paused"]);
        if let FieldKind::Enum(e) = &kind {
            assert_eq!(e.values, vec![json!("active"), json!("paused")]);
            assert!(!e.strict);
        } else {
            panic!("Expected Enum");
        }
    }

    #[test]
    fn enum_strict_sets_flag() {
        let kind = s().enum_strict([1, 2, 3]);
        if let FieldKind::Enum(e) = &kind {
            assert!(e.strict);
            assert_eq!(e.values.len(), 3);
        } else {
            panic!("Expected Enum");
        }
    }

    #[test]
    fn model_holds_name() {
        if let FieldKind::Model(name) = s().model("Plan") {
            assert_eq!(name, "Plan");
        } else {
            panic!("Expected Model");
        }
    }

    #[test]
    fn list_wraps_element_kind() {
        if let FieldKind::List(inner) = s().list(s().str()) {
            assert_eq!(inner.kind(), "str");
        } else {
            panic!("Expected List");
        }
    }

    #[test]
    fn map_wraps_value_kind() {
        if let FieldKind::Map(inner) = s().map(s().int()) {
            assert_eq!(inner.kind(), "int");
        } else {
            panic!("Expected Map");
        }
    }

    #[test]
    fn field_is_required() {
        let f = s().field("id", s().str());
        assert!(f.required);
        assert_eq!(f.name, "id");
    }

    #[test]
    fn opt_is_optional() {
        let f = s().opt("tags", s().list(s().str()));
        assert!(!f.required);
    }

    #[test]
    fn schema_assembles_model() {
        let m = s().schema(
            "Customer",
            vec![s().field("id", s().str()), s().opt("name", s().str())],
        );
        assert_eq!(m.name, "Customer");
        assert_eq!(m.fields.len(), 2);
        assert!(!m.strict);
    }

    #[test]
    fn global_static_s_works() {
        assert_eq!(S.str().kind(), "str");
        assert_eq!(S.field("x", S.int()).name, "x");
    }
}
