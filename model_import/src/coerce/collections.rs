//! Coercion for wrapper and collection types.
//!
//! Collections are coerced element by element: an element that cannot be
//! converted is dropped and logged, the rest of the collection survives.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde_json::Value;

use super::{Coerce, Coercion, SemanticType};
use crate::{ImportContext, ImportResult, JsonKind};

impl<T: Coerce> Coerce for Option<T> {
    fn semantic_type() -> SemanticType {
        T::semantic_type()
    }

    /// JSON `null` clears the property; anything else is coerced as `T`.
    fn coerce(value: &Value, ctx: &ImportContext<'_>) -> ImportResult<Coercion<Self>> {
        if value.is_null() {
            return Ok(Coercion::Value(None));
        }
        Ok(T::coerce(value, ctx)?.map(Some))
    }
}

impl<T: Coerce> Coerce for Box<T> {
    fn semantic_type() -> SemanticType {
        T::semantic_type()
    }

    fn coerce(value: &Value, ctx: &ImportContext<'_>) -> ImportResult<Coercion<Self>> {
        Ok(T::coerce(value, ctx)?.map(Self::new))
    }
}

impl<T: Coerce> Coerce for Vec<T> {
    fn semantic_type() -> SemanticType {
        SemanticType::Sequence(Box::new(T::semantic_type()))
    }

    fn coerce(value: &Value, ctx: &ImportContext<'_>) -> ImportResult<Coercion<Self>> {
        let Value::Array(items) = value else {
            return Ok(Coercion::shape(JsonKind::Array, value));
        };
        let mut out = Self::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match T::coerce(item, ctx)? {
                Coercion::Value(element) => out.push(element),
                Coercion::Skip(reason) => tracing::debug!(
                    key = ctx.key(),
                    index,
                    %reason,
                    "skipped sequence element"
                ),
            }
        }
        Ok(Coercion::Value(out))
    }
}

fn coerce_entries<T, F>(
    value: &Value,
    ctx: &ImportContext<'_>,
    mut insert: F,
) -> ImportResult<Coercion<()>>
where
    T: Coerce,
    F: FnMut(String, T),
{
    let Value::Object(entries) = value else {
        return Ok(Coercion::shape(JsonKind::Object, value));
    };
    for (entry_key, item) in entries {
        match T::coerce(item, ctx)? {
            Coercion::Value(element) => insert(entry_key.clone(), element),
            Coercion::Skip(reason) => tracing::debug!(
                key = ctx.key(),
                entry = entry_key.as_str(),
                %reason,
                "skipped mapping entry"
            ),
        }
    }
    Ok(Coercion::Value(()))
}

impl<T: Coerce> Coerce for BTreeMap<String, T> {
    fn semantic_type() -> SemanticType {
        SemanticType::Mapping(Box::new(T::semantic_type()))
    }

    fn coerce(value: &Value, ctx: &ImportContext<'_>) -> ImportResult<Coercion<Self>> {
        let mut out = Self::new();
        let outcome = coerce_entries::<T, _>(value, ctx, |key, element| {
            out.insert(key, element);
        })?;
        Ok(outcome.map(|()| out))
    }
}

impl<T, S> Coerce for HashMap<String, T, S>
where
    T: Coerce,
    S: BuildHasher + Default,
{
    fn semantic_type() -> SemanticType {
        SemanticType::Mapping(Box::new(T::semantic_type()))
    }

    fn coerce(value: &Value, ctx: &ImportContext<'_>) -> ImportResult<Coercion<Self>> {
        let mut out = Self::default();
        let outcome = coerce_entries::<T, _>(value, ctx, |key, element| {
            out.insert(key, element);
        })?;
        Ok(outcome.map(|()| out))
    }
}
