//! Primary error enum for import flows.

use thiserror::Error;

use crate::JsonKind;

/// Errors that abort an import call.
///
/// Per-property coercion failures are not errors; they are reported as
/// [`crate::SkipReason`] values in the [`crate::ImportReport`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    /// The JSON value does not have the structural kind the call requires.
    #[error("expected a JSON {expected} but found {found}")]
    ShapeMismatch {
        /// Kind required by the call.
        expected: JsonKind,
        /// Kind actually supplied.
        found: JsonKind,
    },

    /// The target type cannot provide a usable descriptor.
    #[error("type '{type_name}' cannot be imported: {reason}")]
    UnresolvableType {
        /// Fully qualified name of the offending type.
        type_name: &'static str,
        /// Every problem found while building the descriptor.
        reason: String,
    },

    /// Import options failed validation.
    #[error("invalid import option '{key}': {message}")]
    Configuration {
        /// Option that failed validation.
        key: String,
        /// Human-readable explanation of the failure.
        message: String,
    },
}
