use petstore_core::{DataValidationError, Pet, PetValidationError, MAX_TEXT_CHARS};
use serde_json::json;

#[test]
fn pet_new_is_unpersisted() {
    let pet = Pet::new("Rex", "dog", true);

    assert_eq!(pet.id, None);
    assert!(!pet.is_persisted());
    assert_eq!(pet.name, "Rex");
    assert_eq!(pet.category, "dog");
    assert!(pet.available);
    assert_eq!(pet.to_string(), "<Pet 'Rex'>");
}

#[test]
fn serialize_emits_exactly_the_wire_keys() {
    let mut pet = Pet::new("Rex", "dog", true);
    pet.id = Some(1);

    let map = pet.serialize();
    let mut keys: Vec<_> = map.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, ["available", "category", "id", "name"]);
    assert_eq!(
        serde_json::Value::Object(map),
        json!({"id": 1, "name": "Rex", "category": "dog", "available": true})
    );
}

#[test]
fn serialize_unsaved_pet_has_null_id() {
    let map = Pet::new("Tom", "cat", false).serialize();
    assert_eq!(map["id"], serde_json::Value::Null);
    assert_eq!(map["available"], false);
}

#[test]
fn serde_shape_matches_serialize() {
    let mut pet = Pet::new("Fido", "dog", false);
    pet.id = Some(7);

    let via_serde = serde_json::to_value(&pet).unwrap();
    assert_eq!(via_serde, serde_json::Value::Object(pet.serialize()));
}

#[test]
fn deserialize_then_serialize_keeps_field_values() {
    let inputs = [
        json!({"name": "Rex", "category": "dog", "available": true}),
        json!({"name": "", "category": "fish", "available": false}),
        json!({"name": "Ünïcødé 猫", "category": "cat", "available": true}),
    ];

    for input in inputs {
        let pet = Pet::from_json(&input).unwrap();
        let output = pet.serialize();
        assert_eq!(output["name"], input["name"]);
        assert_eq!(output["category"], input["category"]);
        assert_eq!(output["available"], input["available"]);
    }
}

#[test]
fn deserialize_ignores_id_and_extra_keys() {
    let mut pet = Pet::new("old", "old", false);
    pet.id = Some(42);

    pet.deserialize(&json!({
        "id": 999,
        "name": "Rex",
        "category": "dog",
        "available": true,
        "color": "brown"
    }))
    .unwrap();

    assert_eq!(pet.id, Some(42));
    assert_eq!(pet.name, "Rex");
    assert_eq!(pet.category, "dog");
    assert!(pet.available);
}

#[test]
fn deserialize_returns_self_for_chaining() {
    let mut pet = Pet::default();
    let name = pet
        .deserialize(&json!({"name": "Rex", "category": "dog", "available": true}))
        .unwrap()
        .name
        .clone();
    assert_eq!(name, "Rex");
}

#[test]
fn deserialize_names_each_missing_key() {
    let cases = [
        ("name", json!({"category": "dog", "available": true})),
        ("category", json!({"name": "Rex", "available": true})),
        ("available", json!({"name": "Rex", "category": "dog"})),
    ];

    for (missing, input) in cases {
        let err = Pet::from_json(&input).unwrap_err();
        assert_eq!(err, DataValidationError::MissingField(missing));
        assert_eq!(err.to_string(), format!("Invalid pet: missing {missing}"));
    }
}

#[test]
fn deserialize_rejects_non_object_bodies() {
    for input in [json!(null), json!("Rex"), json!(3), json!(["Rex", "dog", true])] {
        let err = Pet::from_json(&input).unwrap_err();
        assert_eq!(err, DataValidationError::MalformedBody);
        assert!(err.to_string().contains("bad or no data"));
    }
}

#[test]
fn deserialize_rejects_wrong_types_and_leaves_pet_untouched() {
    let mut pet = Pet::new("Rex", "dog", true);

    let err = pet
        .deserialize(&json!({"name": "Tom", "category": "cat", "available": "yes"}))
        .unwrap_err();
    assert_eq!(
        err,
        DataValidationError::InvalidField {
            field: "available",
            expected: "boolean"
        }
    );
    assert_eq!(pet, Pet::new("Rex", "dog", true));

    let err = Pet::from_json(&json!({"name": 5, "category": "cat", "available": true}))
        .unwrap_err();
    assert!(matches!(
        err,
        DataValidationError::InvalidField { field: "name", .. }
    ));
}

#[test]
fn validate_enforces_column_width() {
    let at_limit = Pet::new("a".repeat(MAX_TEXT_CHARS), "dog", true);
    assert!(at_limit.validate().is_ok());

    let too_long = Pet::new("Rex", "c".repeat(MAX_TEXT_CHARS + 1), true);
    assert_eq!(
        too_long.validate().unwrap_err(),
        PetValidationError::FieldTooLong {
            field: "category",
            max: MAX_TEXT_CHARS,
            actual: MAX_TEXT_CHARS + 1,
        }
    );
}
