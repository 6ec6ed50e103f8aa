use proptest::prelude::*;
use serde_json::json;
use wiremodel::{decode, encode, FieldValue, ModelInstance, SchemaRegistry, S};

fn scalar_registry() -> SchemaRegistry {
    let registry = SchemaRegistry::new();
    registry
        .declare(S.schema(
            "Reading",
            vec![
                S.field("id", S.str()),
                S.field("count", S.int()),
                S.field("ratio", S.float()),
                S.field("enabled", S.bool()),
                S.opt("note", S.str()).nullable(),
            ],
        ))
        .unwrap();
    registry
}

proptest! {
    #[test]
    fn scalar_instances_round_trip(
        id in "[a-zA-Z0-9_-]{0,24}",
        count in any::<i64>(),
        ratio in -1.0e12f64..1.0e12f64,
        enabled in any::<bool>(),
        note in proptest::option::of("[a-z ]{0,16}"),
    ) {
        let registry = scalar_registry();
        let mut reading = ModelInstance::new("Reading")
            .with("id", id)
            .with("count", count)
            .with("ratio", ratio)
            .with("enabled", enabled);
        if let Some(note) = note {
            reading = reading.with("note", note);
        }

        let wire = encode(&reading, &registry).unwrap();
        let back = decode(&wire, "Reading", &registry).unwrap();
        prop_assert_eq!(back, reading);
    }

    #[test]
    fn unset_optionals_never_appear_on_the_wire(
        id in "[a-z]{1,8}",
        count in any::<i64>(),
        ratio in -1.0e6f64..1.0e6f64,
        enabled in any::<bool>(),
    ) {
        let registry = scalar_registry();
        let reading = ModelInstance::new("Reading")
            .with("id", id)
            .with("count", count)
            .with("ratio", ratio)
            .with("enabled", enabled);

        let wire = encode(&reading, &registry).unwrap();
        prop_assert!(wire.as_object().unwrap().get("note").is_none());
    }

    #[test]
    fn explicit_null_always_appears_on_the_wire(
        id in "[a-z]{1,8}",
        count in any::<i64>(),
    ) {
        let registry = scalar_registry();
        let reading = ModelInstance::new("Reading")
            .with("id", id)
            .with("count", count)
            .with("ratio", 0.5)
            .with("enabled", true)
            .with("note", FieldValue::Null);

        let wire = encode(&reading, &registry).unwrap();
        prop_assert_eq!(wire.as_object().unwrap().get("note"), Some(&json!(null)));
    }

    #[test]
    fn decoded_wire_values_re_encode_unchanged(
        count in any::<i64>(),
        extra in "[a-z]{1,8}",
    ) {
        let registry = scalar_registry();
        let wire = json!({
            "id": "r1",
            "count": count,
            "ratio": 2.25,
            "enabled": false,
            "undeclared": extra
        });
        let reading = decode(&wire, "Reading", &registry).unwrap();
        prop_assert_eq!(encode(&reading, &registry).unwrap(), wire);
    }
}
