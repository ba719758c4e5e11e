//! Constructors for `ImportError`.

use std::sync::Arc;

use serde_json::Value;

use super::ImportError;
use crate::JsonKind;

impl ImportError {
    /// Construct a shape mismatch between `expected` and the kind of `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use model_import::{ImportError, JsonKind};
    /// use serde_json::json;
    ///
    /// let err = ImportError::shape_mismatch(JsonKind::Object, &json!("text"));
    /// assert!(matches!(
    ///     err,
    ///     ImportError::ShapeMismatch { found: JsonKind::String, .. }
    /// ));
    /// ```
    #[must_use]
    pub fn shape_mismatch(expected: JsonKind, value: &Value) -> Self {
        Self::ShapeMismatch {
            expected,
            found: JsonKind::of(value),
        }
    }

    /// Shape mismatch wrapped in an [`Arc`], ready to return from an
    /// [`crate::ImportResult`].
    #[must_use]
    pub fn shape_mismatch_arc(expected: JsonKind, value: &Value) -> Arc<Self> {
        Arc::new(Self::shape_mismatch(expected, value))
    }

    /// Construct an unresolvable-type error from one or more problems.
    ///
    /// Problems are joined with `"; "` so a single error describes every
    /// defect in the descriptor.
    ///
    /// # Examples
    ///
    /// ```
    /// use model_import::ImportError;
    ///
    /// let err = ImportError::unresolvable("app::Person", ["no properties", "bad key"]);
    /// assert_eq!(
    ///     err.to_string(),
    ///     "type 'app::Person' cannot be imported: no properties; bad key"
    /// );
    /// ```
    #[must_use]
    pub fn unresolvable<I, S>(type_name: &'static str, problems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let reason = problems
            .into_iter()
            .map(|problem| problem.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join("; ");
        Self::UnresolvableType { type_name, reason }
    }

    /// Construct a configuration error for the option named `key`.
    #[must_use]
    pub fn configuration(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            key: key.into(),
            message: message.into(),
        }
    }
}
