//! Model schema integrity checks.
//!
//! A malformed schema is a programming error in a declaration, surfaced
//! once at registration time. Violations are reported as short stable
//! codes, not recoverable runtime errors.

use std::collections::HashSet;

use super::schema::{EnumSchema, FieldKind, ModelSchema};

/// Validate a model schema for structural integrity.
///
/// Returns `Ok(())` if the declaration is well formed, or `Err(code)`.
pub fn validate_model(model: &ModelSchema) -> Result<(), String> {
    if model.name.is_empty() {
        return Err("MODEL_NAME_EMPTY".into());
    }
    let mut names: HashSet<&str> = HashSet::new();
    let mut wire_keys: HashSet<&str> = HashSet::new();
    for field in &model.fields {
        if field.name.is_empty() {
            return Err("FIELD_NAME_EMPTY".into());
        }
        if field.wire_key().is_empty() {
            return Err("WIRE_KEY_EMPTY".into());
        }
        if !names.insert(field.name.as_str()) {
            return Err("DUPLICATE_FIELD".into());
        }
        if !wire_keys.insert(field.wire_key()) {
            return Err("DUPLICATE_WIRE_KEY".into());
        }
        if field.default.is_some() {
            if field.required {
                return Err("DEFAULT_ON_REQUIRED".into());
            }
            if matches!(
                field.kind,
                FieldKind::Model(_) | FieldKind::List(_) | FieldKind::Map(_)
            ) {
                return Err("DEFAULT_KIND".into());
            }
        }
        validate_kind(&field.kind)?;
    }
    Ok(())
}

fn validate_kind(kind: &FieldKind) -> Result<(), String> {
    match kind {
        FieldKind::Scalar(_) | FieldKind::Mixed => Ok(()),
        FieldKind::Enum(e) => validate_enum(e),
        FieldKind::Model(name) => {
            if name.is_empty() {
                return Err("MODEL_REF_EMPTY".into());
            }
            Ok(())
        }
        FieldKind::List(inner) | FieldKind::Map(inner) => validate_kind(inner),
    }
}

fn validate_enum(e: &EnumSchema) -> Result<(), String> {
    if e.values.is_empty() {
        return Err("EMPTY_ENUM".into());
    }
    for value in &e.values {
        let is_integer = value.as_i64().is_some() || value.as_u64().is_some();
        if !value.is_string() && !is_integer {
            return Err("ENUM_VALUE_TYPE".into());
        }
    }
    let mut seen = Vec::with_capacity(e.values.len());
    for value in &e.values {
        if seen.contains(&value) {
            return Err("DUPLICATE_ENUM_VALUE".into());
        }
        seen.push(value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::builder::S;
    use serde_json::json;

    #[test]
    fn valid_model_ok() {
        let m = S.schema(
            "Customer",
            vec![
                S.field("id", S.str()),
                S.opt("tags", S.list(S.str())),
                S.opt("status", S.enum_of(["active", "paused"])),
            ],
        );
        assert!(validate_model(&m).is_ok());
    }

    #[test]
    fn empty_model_name_err() {
        let m = S.schema("", vec![]);
        assert_eq!(validate_model(&m), Err("MODEL_NAME_EMPTY".into()));
    }

    #[test]
    fn empty_field_name_err() {
        let m = S.schema("M", vec![S.field("", S.str())]);
        assert_eq!(validate_model(&m), Err("FIELD_NAME_EMPTY".into()));
    }

    #[test]
    fn empty_wire_key_err() {
        let m = S.schema("M", vec![S.field("id", S.str()).wire("")]);
        assert_eq!(validate_model(&m), Err("WIRE_KEY_EMPTY".into()));
    }

    #[test]
    fn duplicate_field_name_err() {
        let m = S.schema(
            "M",
            vec![S.field("id", S.str()).wire("a"), S.field("id", S.int()).wire("b")],
        );
        assert_eq!(validate_model(&m), Err("DUPLICATE_FIELD".into()));
    }

    #[test]
    fn duplicate_wire_key_err() {
        let m = S.schema(
            "M",
            vec![S.field("a", S.str()).wire("k"), S.field("b", S.str()).wire("k")],
        );
        assert_eq!(validate_model(&m), Err("DUPLICATE_WIRE_KEY".into()));
    }

    #[test]
    fn renamed_wire_key_colliding_with_name_err() {
        // "b" renames onto the wire key already used by "a".
        let m = S.schema(
            "M",
            vec![S.field("a", S.str()), S.field("b", S.str()).wire("a")],
        );
        assert_eq!(validate_model(&m), Err("DUPLICATE_WIRE_KEY".into()));
    }

    #[test]
    fn default_on_required_err() {
        let m = S.schema(
            "M",
            vec![S.field("page", S.uint()).default_value(json!(1))],
        );
        assert_eq!(validate_model(&m), Err("DEFAULT_ON_REQUIRED".into()));
    }

    #[test]
    fn default_on_container_err() {
        let m = S.schema(
            "M",
            vec![S.opt("tags", S.list(S.str())).default_value(json!([]))],
        );
        assert_eq!(validate_model(&m), Err("DEFAULT_KIND".into()));
    }

    #[test]
    fn default_on_optional_scalar_ok() {
        let m = S.schema(
            "M",
            vec![S.opt("page", S.uint()).default_value(json!(1))],
        );
        assert!(validate_model(&m).is_ok());
    }

    #[test]
    fn empty_enum_err() {
        let m = S.schema("M", vec![S.opt("status", S.enum_of(Vec::<&str>::new()))]);
        assert_eq!(validate_model(&m), Err("EMPTY_ENUM".into()));
    }

    #[test]
    fn enum_value_type_err() {
        let kind = FieldKind::Enum(EnumSchema::new(vec![json!("ok"), json!(1.5)]));
        let m = S.schema("M", vec![S.opt("status", kind)]);
        assert_eq!(validate_model(&m), Err("ENUM_VALUE_TYPE".into()));
    }

    #[test]
    fn enum_integer_values_ok() {
        let m = S.schema("M", vec![S.opt("code", S.enum_of([1, 2, 3]))]);
        assert!(validate_model(&m).is_ok());
    }

    #[test]
    fn duplicate_enum_value_err() {
        let m = S.schema("M", vec![S.opt("status", S.enum_of(["a", "a"]))]);
        assert_eq!(validate_model(&m), Err("DUPLICATE_ENUM_VALUE".into()));
    }

    #[test]
    fn empty_model_ref_err() {
        let m = S.schema("M", vec![S.field("plan", S.model(""))]);
        assert_eq!(validate_model(&m), Err("MODEL_REF_EMPTY".into()));
    }

    #[test]
    fn nested_container_kinds_are_checked() {
        let bad = S.list(S.map(S.enum_of(Vec::<&str>::new())));
        let m = S.schema("M", vec![S.opt("grid", bad)]);
        assert_eq!(validate_model(&m), Err("EMPTY_ENUM".into()));
    }
}
