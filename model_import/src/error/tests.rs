//! Unit tests for error construction and rendering.

use rstest::rstest;
use serde_json::{Value, json};

use super::ImportError;
use crate::JsonKind;

#[rstest]
#[case::string(json!("not an object"), JsonKind::String)]
#[case::array(json!([1, 2]), JsonKind::Array)]
#[case::null(Value::Null, JsonKind::Null)]
#[case::number(json!(4), JsonKind::Number)]
fn shape_mismatch_records_found_kind(#[case] value: Value, #[case] kind: JsonKind) {
    let err = ImportError::shape_mismatch(JsonKind::Object, &value);
    assert!(
        matches!(err, ImportError::ShapeMismatch { expected: JsonKind::Object, found } if found == kind),
        "unexpected error: {err:?}"
    );
}

#[test]
fn shape_mismatch_renders_both_kinds() {
    let err = ImportError::shape_mismatch(JsonKind::Array, &json!({"a": 1}));
    assert_eq!(err.to_string(), "expected a JSON array but found object");
}

#[test]
fn unresolvable_joins_problems() {
    let err = ImportError::unresolvable("demo::Empty", ["declares no importable properties"]);
    assert_eq!(
        err.to_string(),
        "type 'demo::Empty' cannot be imported: declares no importable properties"
    );
}

#[test]
fn configuration_names_the_option() {
    let err = ImportError::configuration("max_depth", "must be greater than zero");
    assert_eq!(
        err.to_string(),
        "invalid import option 'max_depth': must be greater than zero"
    );
}
