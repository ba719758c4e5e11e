//! Unit tests for the generated trait implementations.

use anyhow::{Result, anyhow, ensure};
use syn::{DeriveInput, parse_quote};

use super::expand;

fn expand_to_string(input: &DeriveInput) -> Result<String> {
    expand(input)
        .map(|tokens| tokens.to_string())
        .map_err(|err| anyhow!(err))
}

#[test]
fn emits_properties_in_declaration_order() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Person {
            first_name: Option<String>,
            last_name: Option<String>,
        }
    };
    let expanded = expand_to_string(&input)?;
    let first = expanded
        .find("\"first_name\"")
        .ok_or_else(|| anyhow!("first_name missing: {expanded}"))?;
    let last = expanded
        .find("\"last_name\"")
        .ok_or_else(|| anyhow!("last_name missing: {expanded}"))?;
    ensure!(first < last, "properties out of order");
    ensure!(expanded.contains("impl :: model_import :: Importable for Person"));
    ensure!(expanded.contains("impl :: model_import :: Coerce for Person"));
    ensure!(expanded.contains("impl :: model_import :: ImportHooks for Person { }"));
    ensure!(expanded.contains("coerce_object :: < Self >"));
    Ok(())
}

#[test]
fn keys_follow_rename_rules_and_overrides() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[import(rename_all = "camelCase")]
        struct Person {
            #[import(key = "ID", alias = "person_id")]
            id: u64,
            last_updated: Option<String>,
        }
    };
    let expanded = expand_to_string(&input)?;
    ensure!(
        expanded.contains(". key (\"ID\") . key (\"person_id\")"),
        "explicit keys missing: {expanded}"
    );
    ensure!(
        expanded.contains("Property :: new (\"last_updated\"")
            && expanded.contains(". key (\"lastUpdated\")"),
        "renamed key missing: {expanded}"
    );
    Ok(())
}

#[test]
fn hooks_flatten_and_dates_are_wired() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[import(hooks, crate = "importer")]
        struct Post {
            #[import(flatten)]
            base: Base,
            #[import(with = "parse_tags")]
            tags: Vec<String>,
            #[import(date = "epoch_milliseconds")]
            published: Option<time::OffsetDateTime>,
            #[import(skip)]
            cached: bool,
        }
    };
    let expanded = expand_to_string(&input)?;
    ensure!(expanded.contains(". flatten (| this : & mut Self | & mut this . base)"));
    ensure!(expanded.contains("importer :: Property :: with_hook (\"tags\""));
    ensure!(expanded.contains(", parse_tags)"));
    ensure!(expanded.contains(". date_strategy (importer :: DateStrategy :: EpochMilliseconds)"));
    ensure!(!expanded.contains("cached"), "skipped field emitted: {expanded}");
    ensure!(!expanded.contains("ImportHooks"), "hooks impl emitted: {expanded}");
    Ok(())
}
