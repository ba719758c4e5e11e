//! The object populator.
//!
//! [`Importer`] walks a type's descriptor, finds each property's key in the
//! JSON object, and coerces and assigns the value. Population is best
//! effort: a property whose value cannot be converted is skipped and
//! recorded in the [`ImportReport`], and the call carries on. A call fails
//! only when the top-level value has the wrong shape or a type involved has
//! no usable descriptor.

use serde_json::{Map, Value};

use crate::{
    Coercion, ImportError, ImportOptions, ImportResult, Importable, JsonKind, SkipReason, registry,
};

mod context;
mod keys;
mod report;

pub use context::ImportContext;
pub use report::{ImportReport, PropertyOutcome, PropertyStatus};

use keys::KeyIndex;

/// Populates model instances from decoded JSON.
///
/// # Examples
///
/// ```
/// use model_import::{ImportOptions, Importable, Importer, KeyMatching};
/// use serde_json::json;
///
/// #[derive(Debug, Default, Importable)]
/// struct Person {
///     first_name: Option<String>,
/// }
///
/// let importer = Importer::new(ImportOptions::default().with_key_matching(KeyMatching::Exact))
///     .expect("options are valid");
/// let person: Person = importer
///     .populate(&json!({"first_name": "Jane", "firstName": "ignored"}), None)
///     .expect("object imports");
/// assert_eq!(person.first_name.as_deref(), Some("Jane"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Importer {
    options: ImportOptions,
}

impl Importer {
    /// Create an importer after validating `options`.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Configuration`] for invalid options.
    pub fn new(options: ImportOptions) -> ImportResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Active options.
    #[must_use]
    pub const fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Populate a `T` from a JSON object.
    ///
    /// When `existing` is `None` the instance comes from
    /// [`crate::ImportHooks::existing_instance`], falling back to
    /// `T::default()`.
    ///
    /// # Errors
    ///
    /// [`ImportError::ShapeMismatch`] when `value` is not an object (no
    /// instance is constructed), [`ImportError::UnresolvableType`] when `T` or
    /// a nested type has no usable descriptor.
    pub fn populate<T: Importable>(&self, value: &Value, existing: Option<T>) -> ImportResult<T> {
        self.populate_with_report(value, existing)
            .map(|(instance, _)| instance)
    }

    /// Like [`Self::populate`], also returning the per-property report.
    ///
    /// # Errors
    ///
    /// As for [`Self::populate`].
    pub fn populate_with_report<T: Importable>(
        &self,
        value: &Value,
        existing: Option<T>,
    ) -> ImportResult<(T, ImportReport)> {
        let object = top_level_object(value)?;
        let mut instance = existing
            .or_else(|| T::existing_instance(object))
            .unwrap_or_default();
        let report = populate_object(&mut instance, object, &self.options, 0)?;
        Ok((instance, report))
    }

    /// Import the values of a JSON object into an existing instance.
    ///
    /// Properties whose keys are absent keep their current values.
    ///
    /// # Errors
    ///
    /// As for [`Self::populate`]; on error `instance` is left untouched
    /// when the failure is a shape mismatch or an unresolvable `T`. When a
    /// nested type turns out to be unresolvable partway through the walk,
    /// the properties assigned before it keep their new values, so
    /// `instance` may be partially populated.
    pub fn populate_into<T: Importable>(
        &self,
        instance: &mut T,
        value: &Value,
    ) -> ImportResult<ImportReport> {
        let object = top_level_object(value)?;
        populate_object(instance, object, &self.options, 0)
    }

    /// Populate one `T` per object in a JSON array.
    ///
    /// Elements that are not objects are skipped individually.
    ///
    /// # Errors
    ///
    /// [`ImportError::ShapeMismatch`] when `value` is not an array,
    /// [`ImportError::UnresolvableType`] as for [`Self::populate`].
    pub fn populate_array<T: Importable>(&self, value: &Value) -> ImportResult<Vec<T>> {
        let Value::Array(items) = value else {
            return Err(ImportError::shape_mismatch_arc(JsonKind::Array, value));
        };
        registry::descriptor::<T>()?;
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let Value::Object(object) = item else {
                tracing::debug!(
                    index,
                    found = %JsonKind::of(item),
                    "skipped array element that is not an object"
                );
                continue;
            };
            let mut instance = T::existing_instance(object).unwrap_or_default();
            populate_object(&mut instance, object, &self.options, 0)?;
            out.push(instance);
        }
        Ok(out)
    }
}

fn top_level_object(value: &Value) -> ImportResult<&Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ImportError::shape_mismatch_arc(JsonKind::Object, value))
}

/// Populate `instance` from `object`, property by property.
pub(crate) fn populate_object<T: Importable>(
    instance: &mut T,
    object: &Map<String, Value>,
    options: &ImportOptions,
    depth: usize,
) -> ImportResult<ImportReport> {
    let descriptor = registry::descriptor::<T>()?;
    let index = KeyIndex::new(object, options.key_matching);
    let mut report = ImportReport::new(descriptor.type_name());

    for property in descriptor.properties() {
        let Some((key, value)) = index.find(property.keys(), property.normalized_keys()) else {
            report.record(property.name(), None, PropertyStatus::Absent);
            continue;
        };
        let status = if instance.should_import(key, value) {
            let strategy = property.effective_date_strategy(key);
            let ctx = ImportContext::for_property(options, key, strategy.as_deref(), depth);
            match property.assign(instance, value, &ctx)? {
                Coercion::Value(()) => PropertyStatus::Assigned,
                Coercion::Skip(reason) => PropertyStatus::Skipped(reason),
            }
        } else {
            PropertyStatus::Skipped(SkipReason::Vetoed)
        };
        if let PropertyStatus::Skipped(reason) = &status {
            tracing::debug!(
                type_name = descriptor.type_name(),
                property = property.name(),
                key,
                %reason,
                "skipped property"
            );
        }
        report.record(property.name(), Some(key), status);
    }
    Ok(report)
}
