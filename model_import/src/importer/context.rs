//! Per-property context handed to coercion.

use crate::{DateStrategy, ImportOptions};

/// Context for coercing one JSON value.
///
/// Carries the active [`ImportOptions`], the JSON key that matched, the date
/// strategy in force for the property, and the current nesting depth.
#[derive(Clone, Copy, Debug)]
pub struct ImportContext<'a> {
    options: &'a ImportOptions,
    key: &'a str,
    date_strategy: Option<&'a DateStrategy>,
    depth: usize,
}

impl<'a> ImportContext<'a> {
    /// Context for a top-level value, with no matched key.
    ///
    /// Useful when exercising a [`crate::CoercionHook`] or a
    /// [`crate::Coerce`] implementation directly.
    #[must_use]
    pub const fn root(options: &'a ImportOptions) -> Self {
        Self {
            options,
            key: "",
            date_strategy: None,
            depth: 0,
        }
    }

    pub(crate) const fn for_property(
        options: &'a ImportOptions,
        key: &'a str,
        date_strategy: Option<&'a DateStrategy>,
        depth: usize,
    ) -> Self {
        Self {
            options,
            key,
            date_strategy,
            depth,
        }
    }

    /// Replace the matched key.
    #[must_use]
    pub const fn with_key(mut self, key: &'a str) -> Self {
        self.key = key;
        self
    }

    /// Override the date strategy.
    #[must_use]
    pub const fn with_date_strategy(mut self, strategy: &'a DateStrategy) -> Self {
        self.date_strategy = Some(strategy);
        self
    }

    /// Options for the current call.
    #[must_use]
    pub const fn options(&self) -> &'a ImportOptions {
        self.options
    }

    /// JSON key that matched the property (empty at the top level).
    #[must_use]
    pub const fn key(&self) -> &'a str {
        self.key
    }

    /// Date strategy in force: the property's or type's override, otherwise
    /// the options default.
    #[must_use]
    pub fn date_strategy(&self) -> &'a DateStrategy {
        self.date_strategy.unwrap_or(&self.options.date_strategy)
    }

    /// Number of nested objects between the top-level mapping and this value.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }
}
