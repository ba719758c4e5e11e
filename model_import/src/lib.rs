//! Core crate for populating model types from decoded JSON.
//!
//! A model type describes its importable properties once, through
//! [`Importable::describe`] (normally generated by `#[derive(Importable)]`).
//! The description is cached process-wide and drives [`Importer`], which
//! matches JSON keys to properties, coerces values to each property's type,
//! and assigns them. Values that cannot be coerced are skipped rather than
//! failing the whole import; see [`ImportReport`].
//!
//! ```
//! use model_import::Importable;
//! use serde_json::json;
//!
//! #[derive(Debug, Default, Importable)]
//! struct Person {
//!     #[import(key = "ID")]
//!     id: Option<u64>,
//!     first_name: Option<String>,
//!     last_name: Option<String>,
//! }
//!
//! let person = Person::from_json(&json!({
//!     "ID": 12345,
//!     "firstName": "John",
//!     "lastName": "Doe",
//! }))
//! .expect("person imports");
//! assert_eq!(person.id, Some(12345));
//! assert_eq!(person.last_name.as_deref(), Some("Doe"));
//! ```

use std::sync::Arc;

use serde_json::{Map, Value};

pub use model_import_macros::Importable;
pub use serde_json;
pub use time;

mod coerce;
mod date;
mod descriptor;
mod error;
mod importer;
mod options;
mod registry;
mod value;

pub use coerce::{Coerce, Coercion, SemanticType, SkipReason, coerce_object};
pub use date::DateStrategy;
pub use descriptor::{
    CoercionHook, DescriptorBuilder, Property, PropertyDescriptor, TypeDescriptor,
};
pub use error::ImportError;
pub use importer::{ImportContext, ImportReport, Importer, PropertyOutcome, PropertyStatus};
pub use options::{DEFAULT_MAX_DEPTH, ImportOptions, KeyMatching};
pub use value::JsonKind;

/// Result type used throughout the crate.
///
/// Errors are shared behind an [`Arc`] so a failed descriptor build can be
/// cached and returned to every caller.
pub type ImportResult<T> = Result<T, Arc<ImportError>>;

/// Normalize a key for [`KeyMatching::Normalized`] comparison by removing
/// underscores and converting to lowercase.
///
/// # Examples
///
/// ```
/// assert_eq!(model_import::normalize_key("last_Name"), "lastname");
/// ```
#[must_use]
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Optional customisation points for an importable type.
///
/// Every method has a default, so `impl ImportHooks for MyType {}` is a
/// complete implementation. `#[derive(Importable)]` emits that empty impl
/// unless the struct is marked `#[import(hooks)]`.
pub trait ImportHooks: Sized {
    /// Extra `(json_key, property_name)` pairs.
    ///
    /// Mapped keys are tried before the property's own candidates. Naming a
    /// property the type does not declare makes the type unresolvable.
    #[must_use]
    fn custom_key_mappings() -> Vec<(&'static str, &'static str)> {
        Vec::new()
    }

    /// Date strategy for the matched JSON key, consulted when the property
    /// declares none of its own.
    #[must_use]
    fn date_strategy_for_key(_key: &str) -> Option<DateStrategy> {
        None
    }

    /// A unique pre-existing instance matching the JSON object, to be updated in
    /// place instead of constructing a default one.
    #[must_use]
    fn existing_instance(_object: &Map<String, Value>) -> Option<Self> {
        None
    }

    /// Whether the value found under a key should be imported. Returning
    /// `false` skips the property with [`SkipReason::Vetoed`].
    #[must_use]
    fn should_import(&mut self, _key: &str, _value: &Value) -> bool {
        true
    }
}

/// A model type that can be populated from JSON.
pub trait Importable: Default + ImportHooks + 'static {
    /// Declare the importable properties of `Self` in order.
    ///
    /// Called once per process; the result is validated and cached.
    fn describe() -> DescriptorBuilder<Self>;

    /// Populate a new instance from a JSON object using default options.
    ///
    /// # Errors
    ///
    /// See [`Importer::populate`].
    fn from_json(value: &Value) -> ImportResult<Self> {
        Importer::default().populate(value, None)
    }

    /// Populate one instance per object in a JSON array using default
    /// options.
    ///
    /// # Errors
    ///
    /// See [`Importer::populate_array`].
    fn from_json_array(value: &Value) -> ImportResult<Vec<Self>> {
        Importer::default().populate_array(value)
    }

    /// Overlay the values of a JSON object onto `self` using default
    /// options.
    ///
    /// # Errors
    ///
    /// See [`Importer::populate_into`]; a nested unresolvable type can leave
    /// `self` partially overlaid.
    fn import_values(&mut self, value: &Value) -> ImportResult<ImportReport> {
        Importer::default().populate_into(self, value)
    }

    /// The cached descriptor for `Self`, building it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::UnresolvableType`] when the descriptor is
    /// invalid.
    fn import_mapping() -> ImportResult<Arc<TypeDescriptor<Self>>> {
        registry::descriptor::<Self>()
    }
}

/// Populate a `T` from `value` with default options.
///
/// # Errors
///
/// See [`Importer::populate`].
pub fn populate<T: Importable>(value: &Value, existing: Option<T>) -> ImportResult<T> {
    Importer::default().populate(value, existing)
}

/// Populate a `Vec<T>` from a JSON array with default options.
///
/// # Errors
///
/// See [`Importer::populate_array`].
pub fn populate_array<T: Importable>(value: &Value) -> ImportResult<Vec<T>> {
    Importer::default().populate_array(value)
}
