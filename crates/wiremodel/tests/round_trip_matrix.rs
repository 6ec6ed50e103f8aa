use serde_json::json;
use wiremodel::{decode, encode, EncodeError, FieldPath, FieldValue, ModelInstance, SchemaRegistry, S};

fn registry() -> SchemaRegistry {
    let registry = SchemaRegistry::new();
    registry
        .declare(S.schema(
            "Customer",
            vec![
                S.field("id", S.str()),
                S.opt("tags", S.list(S.str())),
                S.opt("status", S.enum_of(["active", "paused"])),
                S.opt("plan", S.model("Plan")).nullable().wire("plan_id"),
                S.opt("limits", S.map(S.uint())),
                S.opt("meta", S.mixed()),
            ],
        ))
        .unwrap();
    registry
        .declare(S.schema(
            "Plan",
            vec![S.field("slug", S.str()), S.opt("seats", S.uint())],
        ))
        .unwrap();
    registry
}

#[test]
fn spec_scenario_unknown_enum_and_unset_list() {
    let registry = registry();
    let wire = json!({"id": "abc", "status": "unknown_future_value"});

    let customer = decode(&wire, "Customer", &registry).unwrap();
    assert_eq!(customer.get("id").unwrap().as_str(), Some("abc"));
    assert!(!customer.is_set("tags"));
    assert_eq!(
        customer.get("status").unwrap().as_str(),
        Some("unknown_future_value")
    );

    // Re-encoding yields exactly the input: tags omitted, not null.
    let encoded = encode(&customer, &registry).unwrap();
    assert_eq!(encoded, wire);
    assert!(encoded.as_object().unwrap().get("tags").is_none());
}

#[test]
fn builder_round_trip_law() {
    let registry = registry();
    let plan = ModelInstance::new("Plan").with("slug", "pro").with("seats", 5u64);
    let customer = ModelInstance::new("Customer")
        .with("id", "abc")
        .with("tags", FieldValue::List(vec!["a".into(), "b".into()]))
        .with("status", "active")
        .with("plan", plan)
        .with("meta", json!({"source": "import", "attempt": 2}));

    let wire = encode(&customer, &registry).unwrap();
    let back = decode(&wire, "Customer", &registry).unwrap();
    assert_eq!(back, customer);
}

#[test]
fn omission_law() {
    let registry = registry();

    let unset = ModelInstance::new("Customer").with("id", "abc");
    let wire = encode(&unset, &registry).unwrap();
    assert!(wire.as_object().unwrap().get("plan_id").is_none());

    let explicit_null = unset.with("plan", FieldValue::Null);
    let wire = encode(&explicit_null, &registry).unwrap();
    assert_eq!(wire.as_object().unwrap().get("plan_id"), Some(&json!(null)));
}

#[test]
fn unknown_field_preservation() {
    let registry = registry();
    let wire = json!({
        "id": "abc",
        "x_rollout": {"cohort": "b", "until": 1735689600},
        "undocumented": [1, 2, 3]
    });
    let customer = decode(&wire, "Customer", &registry).unwrap();
    assert_eq!(encode(&customer, &registry).unwrap(), wire);
}

#[test]
fn enum_openness_round_trip() {
    let registry = registry();
    let wire = json!({"id": "abc", "status": "archived"});
    let customer = decode(&wire, "Customer", &registry).unwrap();
    assert_eq!(customer.get("status").unwrap().as_str(), Some("archived"));
    assert_eq!(encode(&customer, &registry).unwrap()["status"], json!("archived"));
}

#[test]
fn required_field_enforced_at_first_encode() {
    let registry = registry();
    let incomplete = ModelInstance::new("Customer").with("status", "active");
    let err = encode(&incomplete, &registry).unwrap_err();
    assert_eq!(
        err,
        EncodeError::MissingRequiredField {
            path: FieldPath::root().key("id")
        }
    );
}

#[test]
fn decode_encode_decode_is_idempotent() {
    let registry = registry();
    let wire = json!({
        "id": "abc",
        "tags": ["x"],
        "status": "paused",
        "plan_id": {"slug": "starter", "extra_plan_key": true},
        "limits": {"calls": 100, "sms": 50},
        "meta": {"n": null},
        "x_unknown": "kept"
    });
    let first = decode(&wire, "Customer", &registry).unwrap();
    let second = decode(&encode(&first, &registry).unwrap(), "Customer", &registry).unwrap();
    assert_eq!(first, second);
}

#[test]
fn nested_overflow_bags_survive_round_trip() {
    let registry = registry();
    let wire = json!({"id": "abc", "plan_id": {"slug": "pro", "x_beta": 1}});
    let customer = decode(&wire, "Customer", &registry).unwrap();
    let plan = customer.get("plan").unwrap().as_model().unwrap();
    assert_eq!(plan.extra().get("x_beta"), Some(&json!(1)));
    assert_eq!(encode(&customer, &registry).unwrap(), wire);
}

#[test]
fn map_keys_and_order_survive_round_trip() {
    let registry = registry();
    let wire = json!({"id": "abc", "limits": {"zz": 1, "aa": 2}});
    let customer = decode(&wire, "Customer", &registry).unwrap();
    let limits = customer.get("limits").unwrap().as_map().unwrap();
    let keys: Vec<&str> = limits.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zz", "aa"]);
    assert_eq!(encode(&customer, &registry).unwrap(), wire);
}

#[test]
fn encode_emits_schema_declaration_order() {
    let registry = registry();
    let customer = ModelInstance::new("Customer")
        .with("status", "active")
        .with("id", "abc")
        .with("tags", FieldValue::List(vec!["t".into()]));
    let wire = encode(&customer, &registry).unwrap();
    assert_eq!(
        serde_json::to_string(&wire).unwrap(),
        r#"{"id":"abc","tags":["t"],"status":"active"}"#
    );
}

#[test]
fn with_defaults_round_trips() {
    let registry = SchemaRegistry::new();
    let schema = registry
        .declare(S.schema(
            "Search",
            vec![
                S.field("query", S.str()),
                S.opt("page_size", S.uint()).default_value(json!(25)),
            ],
        ))
        .unwrap();
    let request = ModelInstance::with_defaults(&schema).with("query", "tele");
    let wire = encode(&request, &registry).unwrap();
    assert_eq!(wire, json!({"query": "tele", "page_size": 25}));
    assert_eq!(decode(&wire, "Search", &registry).unwrap(), request);
}
