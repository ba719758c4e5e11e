//! Import options.
//!
//! [`ImportOptions`] is plain serde data so applications can load it from
//! whatever configuration layers they already use. [`crate::Importer::new`]
//! validates it before use.

use serde::{Deserialize, Serialize};

use crate::{DateStrategy, ImportError, ImportResult};

/// Default limit on nested object levels below the top-level mapping.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// How JSON keys are compared with a property's candidate keys.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum KeyMatching {
    /// Keys must match a candidate byte for byte.
    Exact,
    /// Exact matches win; otherwise keys are compared case-insensitively
    /// with underscores removed, so `lastName`, `lastname` and `last_name`
    /// are equivalent.
    #[default]
    Normalized,
}

/// Options controlling a populate call.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ImportOptions {
    /// Key comparison mode.
    pub key_matching: KeyMatching,
    /// Date strategy used when neither the property nor its type supplies one.
    pub date_strategy: DateStrategy,
    /// Number of nested object levels populated below the top-level mapping.
    pub max_depth: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            key_matching: KeyMatching::default(),
            date_strategy: DateStrategy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ImportOptions {
    /// Replace the key matching mode.
    #[must_use]
    pub const fn with_key_matching(mut self, key_matching: KeyMatching) -> Self {
        self.key_matching = key_matching;
        self
    }

    /// Replace the default date strategy.
    #[must_use]
    pub fn with_date_strategy(mut self, date_strategy: DateStrategy) -> Self {
        self.date_strategy = date_strategy;
        self
    }

    /// Replace the nesting limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Validate the options.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Configuration`] when `max_depth` is zero or the
    /// default date strategy carries an invalid format description.
    pub fn validate(&self) -> ImportResult<()> {
        if self.max_depth == 0 {
            return Err(ImportError::configuration("max_depth", "must be greater than zero").into());
        }
        self.date_strategy
            .validate()
            .map_err(|message| ImportError::configuration("date_strategy", message).into())
    }
}
