//! Structural classification of decoded JSON values.

use std::fmt;

use serde_json::Value;

/// Structural kind of a [`serde_json::Value`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum JsonKind {
    /// `null`.
    Null,
    /// `true` or `false`.
    Boolean,
    /// Any JSON number.
    Number,
    /// A JSON string.
    String,
    /// An ordered sequence of values.
    Array,
    /// A mapping from string keys to values.
    Object,
}

impl JsonKind {
    /// Classify `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use model_import::JsonKind;
    /// use serde_json::json;
    ///
    /// assert_eq!(JsonKind::of(&json!({"ID": 1})), JsonKind::Object);
    /// assert_eq!(JsonKind::of(&json!(1.5)), JsonKind::Number);
    /// ```
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Lowercase name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
