//! Unit tests for descriptor assembly and validation.

use std::borrow::Cow;

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use serde_json::json;

use crate::{
    DateStrategy, DescriptorBuilder, ImportError, ImportHooks, Importable, Property,
    PropertyDescriptor, SemanticType,
};

#[derive(Debug, Default)]
struct Stamp {
    id: Option<u64>,
    updated: Option<time::OffsetDateTime>,
}

impl ImportHooks for Stamp {
    fn date_strategy_for_key(key: &str) -> Option<DateStrategy> {
        (key == "updated_ms").then_some(DateStrategy::EpochMilliseconds)
    }
}

impl Importable for Stamp {
    fn describe() -> DescriptorBuilder<Self> {
        DescriptorBuilder::new()
            .property(Property::new("id", |s: &mut Self| &mut s.id).key("ID"))
            .property(
                Property::new("updated", |s: &mut Self| &mut s.updated)
                    .key("updated")
                    .key("updated_ms"),
            )
    }
}

#[derive(Debug, Default)]
struct Article {
    stamp: Stamp,
    title: String,
}

impl ImportHooks for Article {
    fn custom_key_mappings() -> Vec<(&'static str, &'static str)> {
        vec![("headline", "title")]
    }
}

impl Importable for Article {
    fn describe() -> DescriptorBuilder<Self> {
        DescriptorBuilder::new()
            .flatten(|a: &mut Self| &mut a.stamp)
            .property(Property::new("title", |a: &mut Self| &mut a.title))
    }
}

#[derive(Debug, Default)]
struct Misnamed {
    body: String,
    written: Option<time::OffsetDateTime>,
}

impl ImportHooks for Misnamed {
    fn custom_key_mappings() -> Vec<(&'static str, &'static str)> {
        vec![("content", "text")]
    }
}

impl Importable for Misnamed {
    fn describe() -> DescriptorBuilder<Self> {
        DescriptorBuilder::new()
            .property(Property::new("body", |m: &mut Self| &mut m.body))
            .property(Property::new("body", |m: &mut Self| &mut m.body))
            .property(
                Property::new("written", |m: &mut Self| &mut m.written)
                    .date_strategy(DateStrategy::Format("[hour".to_owned())),
            )
    }
}

#[derive(Debug, Default)]
struct Wrapper {
    inner: Misnamed,
}

impl ImportHooks for Wrapper {}

impl Importable for Wrapper {
    fn describe() -> DescriptorBuilder<Self> {
        DescriptorBuilder::new().flatten(|w: &mut Self| &mut w.inner)
    }
}

#[test]
fn keys_default_to_the_property_name() -> Result<()> {
    let descriptor = Article::import_mapping()?;
    let title = descriptor
        .property("title")
        .ok_or_else(|| anyhow!("title missing"))?;
    ensure!(title.keys() == ["headline", "title"], "keys: {:?}", title.keys());
    ensure!(*title.semantic_type() == SemanticType::Text);
    Ok(())
}

#[test]
fn flattened_properties_come_first_in_declaration_order() -> Result<()> {
    let descriptor = Article::import_mapping()?;
    let names: Vec<_> = descriptor.properties().iter().map(PropertyDescriptor::name).collect();
    ensure!(names == ["id", "updated", "title"], "names: {names:?}");
    ensure!(descriptor.len() == 3);
    ensure!(!descriptor.is_empty());
    Ok(())
}

#[rstest]
#[case::hooked("updated_ms", Some(DateStrategy::EpochMilliseconds))]
#[case::plain("updated", None)]
fn date_hooks_follow_flattened_properties(
    #[case] key: &str,
    #[case] expected: Option<DateStrategy>,
) -> Result<()> {
    let descriptor = Article::import_mapping()?;
    let updated = descriptor
        .property("updated")
        .ok_or_else(|| anyhow!("updated missing"))?;
    let strategy = updated.effective_date_strategy(key).map(Cow::into_owned);
    ensure!(strategy == expected, "strategy: {strategy:?}");
    Ok(())
}

#[test]
fn flattened_assignments_reach_the_inner_field() -> Result<()> {
    let article = Article::from_json(&json!({"ID": 7, "headline": "Rust"}))
        .map_err(|err| anyhow!("{err}"))?;
    ensure!(article.stamp.id == Some(7));
    ensure!(article.title == "Rust");
    Ok(())
}

#[test]
fn every_descriptor_problem_is_reported() -> Result<()> {
    let err = Misnamed::import_mapping().err().ok_or_else(|| anyhow!("descriptor built"))?;
    let ImportError::UnresolvableType { reason, .. } = &*err else {
        return Err(anyhow!("unexpected error: {err:?}"));
    };
    ensure!(reason.contains("invalid date format"), "reason: {reason}");
    ensure!(reason.contains("unknown property 'text'"), "reason: {reason}");
    ensure!(reason.contains("'body' is declared more than once"), "reason: {reason}");
    Ok(())
}

#[test]
fn failing_fragments_poison_the_embedding_type() -> Result<()> {
    let err = Wrapper::import_mapping().err().ok_or_else(|| anyhow!("descriptor built"))?;
    ensure!(
        matches!(&*err, ImportError::UnresolvableType { reason, .. } if reason.contains("flattened type")),
        "unexpected error: {err:?}"
    );
    Ok(())
}
