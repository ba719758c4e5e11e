//! Type descriptors: the static description of how a model type is imported.
//!
//! A descriptor lists the importable properties of a type in declaration
//! order. Each property records its candidate JSON keys, its semantic type,
//! an optional date strategy, and the routine that coerces and assigns a JSON
//! value. Descriptors are built once per type by [`DescriptorBuilder`] and
//! cached process-wide; see [`crate::Importable::import_mapping`].

mod builder;
mod property;

pub use builder::DescriptorBuilder;
pub use property::{CoercionHook, Property, PropertyDescriptor};

/// Immutable import metadata for `T`.
pub struct TypeDescriptor<T> {
    type_name: &'static str,
    properties: Vec<PropertyDescriptor<T>>,
}

impl<T> TypeDescriptor<T> {
    /// Fully qualified name of `T`.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Properties in descriptor order.
    #[must_use]
    pub fn properties(&self) -> &[PropertyDescriptor<T>] {
        &self.properties
    }

    /// Look up a property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor<T>> {
        self.properties.iter().find(|property| property.name() == name)
    }

    /// Number of importable properties.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.properties.len()
    }

    /// Always `false` for a built descriptor; empty types are rejected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<T> std::fmt::Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("properties", &self.properties)
            .finish()
    }
}

#[cfg(test)]
mod tests;
