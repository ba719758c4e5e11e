//! Per-type coercion from JSON values.
//!
//! Every property value passes through [`Coerce::coerce`], which returns a
//! [`Coercion`]: either the converted value or the [`SkipReason`] explaining
//! why the property is left untouched. Only failures that must abort the
//! whole call (an unresolvable nested type) travel through the error channel.

use std::fmt;

use serde_json::Value;

use crate::{ImportContext, ImportResult, JsonKind};

mod collections;
mod date;
mod object;
mod primitive;

pub use object::coerce_object;

/// Semantic type of a property, as recorded in its descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SemanticType {
    /// `bool`.
    Boolean,
    /// Signed or unsigned integers.
    Integer,
    /// `f32` and `f64`.
    Float,
    /// `String`.
    Text,
    /// [`time::OffsetDateTime`].
    Date,
    /// Raw [`serde_json::Value`], accepted verbatim.
    Json,
    /// A nested importable type.
    Object(&'static str),
    /// A sequence of elements.
    Sequence(Box<SemanticType>),
    /// A string-keyed mapping of values.
    Mapping(Box<SemanticType>),
    /// Converted by a custom coercion hook.
    Custom,
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => f.write_str("boolean"),
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
            Self::Text => f.write_str("text"),
            Self::Date => f.write_str("date"),
            Self::Json => f.write_str("json"),
            Self::Object(name) => write!(f, "object {name}"),
            Self::Sequence(element) => write!(f, "sequence of {element}"),
            Self::Mapping(value) => write!(f, "mapping of {value}"),
            Self::Custom => f.write_str("custom"),
        }
    }
}

/// Why a property (or an element of a collection) was left unset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The JSON kind cannot represent the declared type.
    TypeMismatch {
        /// Declared semantic type.
        expected: SemanticType,
        /// Kind found in the JSON.
        found: JsonKind,
    },
    /// A nested object or collection had the wrong structural kind.
    ShapeMismatch {
        /// Kind the property requires.
        expected: JsonKind,
        /// Kind found in the JSON.
        found: JsonKind,
    },
    /// A number does not fit the declared numeric type.
    OutOfRange {
        /// Declared semantic type.
        expected: SemanticType,
    },
    /// A date string or number could not be parsed.
    InvalidDate,
    /// Nested objects went deeper than [`crate::ImportOptions::max_depth`].
    DepthExceeded {
        /// Configured limit.
        limit: usize,
    },
    /// [`crate::ImportHooks::should_import`] refused the value.
    Vetoed,
    /// A custom coercion hook declined the value.
    Declined,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { expected, found } => {
                write!(f, "cannot coerce {found} to {expected}")
            }
            Self::ShapeMismatch { expected, found } => {
                write!(f, "expected a JSON {expected} but found {found}")
            }
            Self::OutOfRange { expected } => write!(f, "number out of range for {expected}"),
            Self::InvalidDate => f.write_str("unparseable date"),
            Self::DepthExceeded { limit } => write!(f, "nesting deeper than {limit} levels"),
            Self::Vetoed => f.write_str("refused by should_import"),
            Self::Declined => f.write_str("declined by coercion hook"),
        }
    }
}

/// Outcome of coercing one JSON value.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub enum Coercion<T> {
    /// The converted value.
    Value(T),
    /// The value was skipped.
    Skip(SkipReason),
}

impl<T> Coercion<T> {
    /// Skip because `value`'s kind cannot represent `expected`.
    pub const fn mismatch(expected: SemanticType, value: &Value) -> Self {
        Self::Skip(SkipReason::TypeMismatch {
            expected,
            found: JsonKind::of(value),
        })
    }

    /// Skip because `value` has the wrong structural kind.
    pub const fn shape(expected: JsonKind, value: &Value) -> Self {
        Self::Skip(SkipReason::ShapeMismatch {
            expected,
            found: JsonKind::of(value),
        })
    }

    /// Map the converted value, leaving skips untouched.
    pub fn map<U, F>(self, f: F) -> Coercion<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Value(value) => Coercion::Value(f(value)),
            Self::Skip(reason) => Coercion::Skip(reason),
        }
    }

    /// Discard the skip reason.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Skip(_) => None,
        }
    }

    /// Returns `true` when a value was produced.
    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl<T> From<Option<T>> for Coercion<T> {
    /// `None` becomes [`SkipReason::Declined`], which suits coercion hooks.
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Skip(SkipReason::Declined), Self::Value)
    }
}

/// Conversion from a JSON value into a property type.
///
/// Implemented for primitives, [`String`], [`time::OffsetDateTime`],
/// [`serde_json::Value`], `Option`, `Box`, `Vec`, string-keyed maps, and, via
/// `#[derive(Importable)]`, for every importable model type.
pub trait Coerce: Sized {
    /// Semantic type recorded in the descriptor.
    fn semantic_type() -> SemanticType;

    /// Convert `value`.
    ///
    /// # Errors
    ///
    /// Returns an error only when a nested type cannot be imported at all;
    /// ordinary mismatches are [`Coercion::Skip`].
    fn coerce(value: &Value, ctx: &ImportContext<'_>) -> ImportResult<Coercion<Self>>;
}
