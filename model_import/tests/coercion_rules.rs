//! Behavioural tests for best-effort coercion of property values.

use std::collections::BTreeMap;

use anyhow::{Result, anyhow, ensure};
use model_import::{
    Importable, Importer, JsonKind, PropertyStatus, SemanticType, SkipReason,
};
use rstest::rstest;
use serde_json::{Value, json};

#[derive(Debug, Default, PartialEq, Importable)]
struct Reading {
    sensor: String,
    count: u32,
    offset: i8,
    level: f64,
    ratio: f32,
    active: bool,
    note: Option<String>,
    samples: Vec<i64>,
    labels: BTreeMap<String, String>,
    raw: Value,
}

fn report_status(source: &Value, property: &str) -> Result<PropertyStatus> {
    let (_, report) = Importer::default().populate_with_report::<Reading>(source, None)?;
    report
        .status(property)
        .cloned()
        .ok_or_else(|| anyhow!("{property} missing from report"))
}

#[test]
fn matching_kinds_are_assigned_directly() -> Result<()> {
    let reading = Reading::from_json(&json!({
        "sensor": "north",
        "count": 12,
        "offset": -3,
        "level": 0.25,
        "ratio": 0.5,
        "active": true,
        "note": "calibrated",
        "samples": [1, 2, 3],
        "labels": {"site": "roof"},
        "raw": {"anything": [null, true]},
    }))?;
    ensure!(reading.sensor == "north");
    ensure!(reading.count == 12 && reading.offset == -3);
    ensure!(reading.active);
    ensure!(reading.note.as_deref() == Some("calibrated"));
    ensure!(reading.samples == [1, 2, 3]);
    ensure!(reading.labels.get("site").map(String::as_str) == Some("roof"));
    ensure!(reading.raw == json!({"anything": [null, true]}));
    Ok(())
}

#[rstest]
#[case::truncates_positive(json!(7.9), 7)]
#[case::integer(json!(7), 7)]
fn floats_narrow_to_integers_by_truncation(#[case] value: Value, #[case] expected: u32) -> Result<()> {
    let reading = Reading::from_json(&json!({"count": value}))?;
    ensure!(reading.count == expected, "count was {}", reading.count);
    Ok(())
}

#[test]
fn integers_widen_to_floats() -> Result<()> {
    let reading = Reading::from_json(&json!({"level": 3, "ratio": -2}))?;
    ensure!(reading.level.to_bits() == 3.0_f64.to_bits());
    ensure!(reading.ratio.to_bits() == (-2.0_f32).to_bits());
    Ok(())
}

#[rstest]
#[case::text_for_integer("count", json!("12"), SkipReason::TypeMismatch { expected: SemanticType::Integer, found: JsonKind::String })]
#[case::number_for_text("sensor", json!(12), SkipReason::TypeMismatch { expected: SemanticType::Text, found: JsonKind::Number })]
#[case::text_for_boolean("active", json!("true"), SkipReason::TypeMismatch { expected: SemanticType::Boolean, found: JsonKind::String })]
#[case::negative_unsigned("count", json!(-1), SkipReason::OutOfRange { expected: SemanticType::Integer })]
#[case::overflowing_i8("offset", json!(200), SkipReason::OutOfRange { expected: SemanticType::Integer })]
#[case::object_for_sequence("samples", json!({"a": 1}), SkipReason::ShapeMismatch { expected: JsonKind::Array, found: JsonKind::Object })]
#[case::array_for_mapping("labels", json!(["roof"]), SkipReason::ShapeMismatch { expected: JsonKind::Object, found: JsonKind::Array })]
fn mismatches_are_skipped_not_errors(
    #[case] property: &str,
    #[case] value: Value,
    #[case] reason: SkipReason,
) -> Result<()> {
    let mut object = serde_json::Map::new();
    object.insert(property.to_owned(), value);
    let source = Value::Object(object);

    let reading = Reading::from_json(&source)?;
    ensure!(reading == Reading::default(), "skipped value was assigned: {reading:?}");
    let status = report_status(&source, property)?;
    ensure!(status == PropertyStatus::Skipped(reason), "status: {status:?}");
    Ok(())
}

#[test]
fn one_bad_property_does_not_block_the_rest() -> Result<()> {
    let reading = Reading::from_json(&json!({"sensor": 5, "count": 9, "active": false}))?;
    ensure!(reading.sensor.is_empty());
    ensure!(reading.count == 9);
    ensure!(!reading.active);
    Ok(())
}

#[test]
fn null_clears_optional_properties() -> Result<()> {
    let mut reading = Reading {
        note: Some("stale".to_owned()),
        ..Reading::default()
    };
    let report = reading.import_values(&json!({"note": null, "sensor": null}))?;
    ensure!(reading.note.is_none());
    ensure!(report.status("note") == Some(&PropertyStatus::Assigned));
    ensure!(matches!(
        report.status("sensor"),
        Some(PropertyStatus::Skipped(SkipReason::TypeMismatch { found: JsonKind::Null, .. }))
    ));
    Ok(())
}

#[test]
fn collections_keep_convertible_elements() -> Result<()> {
    let reading = Reading::from_json(&json!({
        "samples": [1, "2", 3.7, null, -4],
        "labels": {"site": "roof", "floor": 3, "zone": "b"},
    }))?;
    ensure!(reading.samples == [1, 3, -4], "samples: {:?}", reading.samples);
    let keys: Vec<_> = reading.labels.keys().map(String::as_str).collect();
    ensure!(keys == ["site", "zone"], "labels: {keys:?}");
    Ok(())
}
