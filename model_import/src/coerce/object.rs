//! Coercion for nested importable types.

use serde_json::Value;

use super::{Coercion, SkipReason};
use crate::importer::populate_object;
use crate::{ImportContext, ImportResult, Importable, JsonKind};

/// Populate a fresh `T` from a nested JSON object.
///
/// This is the [`crate::Coerce`] implementation generated by
/// `#[derive(Importable)]`. A non-object value is a shape mismatch and the
/// property is skipped; so is an object nested deeper than
/// [`crate::ImportOptions::max_depth`]. The instance comes from
/// [`crate::ImportHooks::existing_instance`] when the hook recognises the
/// object, otherwise from `T::default()`.
///
/// # Errors
///
/// Returns [`crate::ImportError::UnresolvableType`] when `T` (or a type it
/// flattens) has no usable descriptor.
pub fn coerce_object<T: Importable>(
    value: &Value,
    ctx: &ImportContext<'_>,
) -> ImportResult<Coercion<T>> {
    let Value::Object(object) = value else {
        return Ok(Coercion::shape(JsonKind::Object, value));
    };
    let limit = ctx.options().max_depth;
    if ctx.depth() >= limit {
        return Ok(Coercion::Skip(SkipReason::DepthExceeded { limit }));
    }
    let mut instance = T::existing_instance(object).unwrap_or_default();
    populate_object(&mut instance, object, ctx.options(), ctx.depth() + 1)?;
    Ok(Coercion::Value(instance))
}
