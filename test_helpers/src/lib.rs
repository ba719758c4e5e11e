//! Test helpers shared across crates.
//!
//! This crate loads the JSON fixtures kept under `tests/fixtures` at the
//! workspace root, so every crate's tests read the same documents.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;

/// Directory holding the shared JSON fixtures.
#[must_use]
pub fn fixtures_dir() -> Utf8PathBuf {
    Utf8Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap_or_else(|| Utf8Path::new("."))
        .join("tests")
        .join("fixtures")
}

/// Path of the fixture called `name`, for example `test_person.json`.
#[must_use]
pub fn fixture_path(name: &str) -> Utf8PathBuf {
    fixtures_dir().join(name)
}

/// Read and decode the JSON fixture called `name`.
///
/// # Errors
///
/// Returns an error when the file cannot be read or is not valid JSON.
///
/// # Examples
///
/// ```
/// let person = model_import_test_helpers::load_json_fixture("test_person.json")
///     .expect("fixture loads");
/// assert_eq!(person["firstName"], "John");
/// ```
pub fn load_json_fixture(name: &str) -> Result<Value> {
    let path = fixture_path(name);
    let text =
        std::fs::read_to_string(&path).with_context(|| format!("failed to read fixture {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("fixture {path} is not valid JSON"))
}
