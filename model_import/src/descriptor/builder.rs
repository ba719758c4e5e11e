//! Assembly and validation of type descriptors.

use std::any::type_name;
use std::collections::HashSet;
use std::sync::Arc;

use super::{Property, PropertyDescriptor, TypeDescriptor};
use crate::{ImportError, ImportResult, Importable, registry};

/// Accumulates the properties of `T` in declaration order.
///
/// Problems found while declaring properties (an invalid date format, a
/// flattened type that cannot be imported) are collected and reported
/// together when the registry builds the descriptor, as a single
/// [`ImportError::UnresolvableType`].
///
/// # Examples
///
/// ```
/// use model_import::{DescriptorBuilder, ImportHooks, Importable, Property};
/// use serde_json::json;
///
/// #[derive(Debug, Default)]
/// struct Tag {
///     label: String,
/// }
///
/// impl ImportHooks for Tag {}
///
/// impl Importable for Tag {
///     fn describe() -> DescriptorBuilder<Self> {
///         DescriptorBuilder::new().property(Property::new("label", |tag: &mut Tag| &mut tag.label))
///     }
/// }
///
/// let tag = Tag::from_json(&json!({"label": "rust"})).expect("tag imports");
/// assert_eq!(tag.label, "rust");
/// ```
pub struct DescriptorBuilder<T> {
    properties: Vec<PropertyDescriptor<T>>,
    problems: Vec<String>,
}

impl<T: Importable> DescriptorBuilder<T> {
    /// Start an empty descriptor.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            properties: Vec::new(),
            problems: Vec::new(),
        }
    }

    /// Append a property.
    #[must_use]
    pub fn property(mut self, property: Property<T>) -> Self {
        if let Some(Err(message)) = property.declared_date_strategy().map(|s| s.validate()) {
            self.problems
                .push(format!("property '{}' has an invalid date format: {message}", property.name()));
        }
        self.properties
            .push(property.into_descriptor(T::date_strategy_for_key));
        self
    }

    /// Merge the properties of another importable type, reached via `access`.
    ///
    /// This is how a reusable fragment, such as a base entity carrying an
    /// identifier and a timestamp, contributes its properties to every type
    /// embedding it.
    #[must_use]
    pub fn flatten<U: Importable>(mut self, access: fn(&mut T) -> &mut U) -> Self {
        match registry::descriptor::<U>() {
            Ok(fragment) => self.properties.extend(
                fragment
                    .properties()
                    .iter()
                    .map(|property| property.project(access, T::date_strategy_for_key)),
            ),
            Err(err) => self
                .problems
                .push(format!("flattened type '{}' failed: {err}", type_name::<U>())),
        }
        self
    }

    /// Apply the type's custom key mappings and validate the result.
    pub(crate) fn build(mut self) -> ImportResult<TypeDescriptor<T>> {
        for (key, property_name) in T::custom_key_mappings() {
            match self
                .properties
                .iter_mut()
                .find(|property| property.name() == property_name)
            {
                Some(property) => property.prepend_key(key),
                None => self.problems.push(format!(
                    "custom key mapping '{key}' names unknown property '{property_name}'"
                )),
            }
        }
        if self.properties.is_empty() {
            self.problems
                .push("declares no importable properties".to_owned());
        }
        let mut seen = HashSet::new();
        for property in &self.properties {
            if !seen.insert(property.name()) {
                self.problems
                    .push(format!("property '{}' is declared more than once", property.name()));
            }
        }
        if !self.problems.is_empty() {
            return Err(Arc::new(ImportError::unresolvable(
                type_name::<T>(),
                &self.problems,
            )));
        }
        Ok(TypeDescriptor {
            type_name: type_name::<T>(),
            properties: self.properties,
        })
    }
}

impl<T: Importable> Default for DescriptorBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
