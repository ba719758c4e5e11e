//! Behavioural tests for nested objects, sequences of objects and arrays of
//! models.

use anyhow::{Result, anyhow, ensure};
use model_import::{
    ImportError, ImportOptions, Importable, Importer, JsonKind, PropertyStatus, SkipReason,
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use test_helpers::load_json_fixture;
use time::OffsetDateTime;
use time::macros::datetime;

#[derive(Debug, Default, Clone, PartialEq, Eq, Importable)]
struct ModelObject {
    #[import(key = "ID")]
    id: Option<u64>,
    last_updated: Option<OffsetDateTime>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Importable)]
struct Address {
    street: Option<String>,
    city: Option<String>,
    postcode: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Importable)]
struct Job {
    title: String,
    employer: Option<String>,
    started: Option<OffsetDateTime>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Importable)]
struct Person {
    #[import(flatten)]
    base: ModelObject,
    first_name: Option<String>,
    last_name: Option<String>,
    address: Option<Address>,
    jobs: Vec<Job>,
}

#[derive(Debug, Default, Importable)]
struct Node {
    name: Option<String>,
    child: Option<Box<Node>>,
}

#[fixture]
fn people() -> Result<Vec<Person>> {
    let source = load_json_fixture("people.json")?;
    Ok(Person::from_json_array(&source)?)
}

#[rstest]
fn arrays_skip_elements_that_are_not_objects(people: Result<Vec<Person>>) -> Result<()> {
    let people = people?;
    let names: Vec<_> = people.iter().map(|p| p.first_name.as_deref()).collect();
    ensure!(names == [Some("Ada"), Some("Grace"), None], "names: {names:?}");
    Ok(())
}

#[rstest]
fn nested_objects_and_sequences_populate_recursively(people: Result<Vec<Person>>) -> Result<()> {
    let people = people?;
    let ada = people.first().ok_or_else(|| anyhow!("Ada missing"))?;
    ensure!(ada.base.id == Some(1));
    ensure!(ada.base.last_updated == Some(datetime!(2014-05-22 16:04:00 UTC)));
    let address = ada.address.as_ref().ok_or_else(|| anyhow!("address missing"))?;
    ensure!(address.city.as_deref() == Some("London"));
    ensure!(address.postcode.as_deref() == Some("SW1Y 4JH"));

    let [analyst, translator] = ada.jobs.as_slice() else {
        return Err(anyhow!("expected two jobs, got {:?}", ada.jobs));
    };
    ensure!(analyst.title == "Analyst");
    ensure!(analyst.employer.as_deref() == Some("Analytical Engine"));
    ensure!(analyst.started == Some(datetime!(1842-10-01 00:00:00 UTC)));
    ensure!(translator.title == "Translator");
    ensure!(translator.started.is_none(), "unparseable date was assigned");
    Ok(())
}

#[rstest]
fn nested_shape_mismatches_are_skipped(people: Result<Vec<Person>>) -> Result<()> {
    let people = people?;
    let grace = people.get(1).ok_or_else(|| anyhow!("Grace missing"))?;
    ensure!(grace.base.id == Some(2));
    ensure!(grace.last_name.as_deref() == Some("Hopper"));
    ensure!(grace.base.last_updated == Some(datetime!(2014-05-22 16:04:00 UTC)));
    ensure!(grace.address.is_none(), "string address was imported");
    ensure!(grace.jobs.is_empty());
    Ok(())
}

#[rstest]
fn mismatched_scalars_leave_defaults(people: Result<Vec<Person>>) -> Result<()> {
    let people = people?;
    let third = people.get(2).ok_or_else(|| anyhow!("third person missing"))?;
    ensure!(*third == Person::default(), "got {third:?}");
    Ok(())
}

#[test]
fn report_records_nested_skips_at_the_owning_property() -> Result<()> {
    let source = json!({"ID": 5, "address": "Arlington", "jobs": {"title": "Admiral"}});
    let (person, report) = Importer::default().populate_with_report::<Person>(&source, None)?;
    ensure!(person.base.id == Some(5));
    let object_expected = PropertyStatus::Skipped(SkipReason::ShapeMismatch {
        expected: JsonKind::Object,
        found: JsonKind::String,
    });
    ensure!(report.status("address") == Some(&object_expected));
    let array_expected = PropertyStatus::Skipped(SkipReason::ShapeMismatch {
        expected: JsonKind::Array,
        found: JsonKind::Object,
    });
    ensure!(report.status("jobs") == Some(&array_expected));
    let skipped: Vec<_> = report.skipped().map(|(name, _)| name).collect();
    ensure!(skipped == ["address", "jobs"], "skipped: {skipped:?}");
    ensure!(report.assigned().eq(["id"]));
    ensure!(report.type_name().ends_with("Person"));
    Ok(())
}

#[test]
fn nesting_stops_at_the_depth_limit() -> Result<()> {
    let source = json!({
        "name": "a",
        "child": {"name": "b", "child": {"name": "c", "child": {"name": "d"}}},
    });
    let importer = Importer::new(ImportOptions::default().with_max_depth(2))?;
    let root: Node = importer.populate(&source, None)?;
    let b = root.child.as_deref().ok_or_else(|| anyhow!("b missing"))?;
    let c = b.child.as_deref().ok_or_else(|| anyhow!("c missing"))?;
    ensure!(c.name.as_deref() == Some("c"));
    ensure!(c.child.is_none(), "object beyond the depth limit was imported");

    let unlimited: Node = Node::from_json(&source)?;
    let d = unlimited
        .child
        .as_deref()
        .and_then(|b| b.child.as_deref())
        .and_then(|c| c.child.as_deref())
        .ok_or_else(|| anyhow!("d missing"))?;
    ensure!(d.name.as_deref() == Some("d"));
    Ok(())
}

#[rstest]
#[case::object(json!({"ID": 1}))]
#[case::string(json!("people"))]
fn top_level_arrays_are_required(#[case] value: Value) -> Result<()> {
    let err = Person::from_json_array(&value)
        .err()
        .ok_or_else(|| anyhow!("non-array was imported"))?;
    ensure!(
        matches!(&*err, ImportError::ShapeMismatch { expected: JsonKind::Array, .. }),
        "unexpected error: {err:?}"
    );
    Ok(())
}
