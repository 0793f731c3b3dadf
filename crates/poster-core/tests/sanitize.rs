use indexmap::IndexMap;
use poster_core::{FieldValue, sanitize};

#[test]
fn nan_becomes_null() {
    assert_eq!(sanitize(FieldValue::Number(f64::NAN)), FieldValue::Null);
}

#[test]
fn infinities_become_null() {
    assert_eq!(sanitize(FieldValue::Number(f64::INFINITY)), FieldValue::Null);
    assert_eq!(
        sanitize(FieldValue::Number(f64::NEG_INFINITY)),
        FieldValue::Null
    );
}

#[test]
fn finite_and_non_numeric_values_pass_through() {
    assert_eq!(
        sanitize(FieldValue::Number(3.25)),
        FieldValue::Number(3.25)
    );
    assert_eq!(
        sanitize(FieldValue::Text("NaN".to_string())),
        FieldValue::Text("NaN".to_string())
    );
    assert_eq!(sanitize(FieldValue::Bool(true)), FieldValue::Bool(true));
    assert_eq!(sanitize(FieldValue::Null), FieldValue::Null);
}

#[test]
fn recurses_into_lists_and_maps() {
    let mut map = IndexMap::new();
    map.insert("ok".to_string(), FieldValue::Number(1.0));
    map.insert("bad".to_string(), FieldValue::Number(f64::NAN));
    let value = FieldValue::List(vec![
        FieldValue::Number(f64::INFINITY),
        FieldValue::Map(map),
        FieldValue::Text("kept".to_string()),
    ]);

    let cleaned = sanitize(value);

    let FieldValue::List(items) = &cleaned else {
        panic!("expected list");
    };
    assert_eq!(items[0], FieldValue::Null);
    let FieldValue::Map(inner) = &items[1] else {
        panic!("expected map");
    };
    assert_eq!(inner["ok"], FieldValue::Number(1.0));
    assert_eq!(inner["bad"], FieldValue::Null);
    assert_eq!(items[2], FieldValue::Text("kept".to_string()));
}

#[test]
fn sanitize_is_idempotent() {
    let value = FieldValue::List(vec![
        FieldValue::Number(f64::NAN),
        FieldValue::Number(2.5),
        FieldValue::Text("x".to_string()),
    ]);
    let once = sanitize(value);
    let twice = sanitize(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn null_serializes_as_json_null() {
    let json = serde_json::to_string(&sanitize(FieldValue::Number(f64::NAN))).unwrap();
    assert_eq!(json, "null");
}
