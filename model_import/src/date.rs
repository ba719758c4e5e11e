//! Date parsing strategies for date-typed properties.
//!
//! Strings are parsed according to the active [`DateStrategy`]; numbers are
//! read as Unix timestamps (seconds, unless the strategy says milliseconds).
//! Custom format descriptions are compiled once per process and shared.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use time::format_description::OwnedFormatItem;
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// How JSON strings and numbers become [`OffsetDateTime`] values.
///
/// Serialised in `snake_case`, so `"iso8601"`, `"epoch_seconds"`,
/// `"epoch_milliseconds"` and `{"format": "[year]-[month]-[day]"}` are all
/// valid configuration values.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateStrategy {
    /// RFC 3339 and ISO 8601 strings. Date-only strings resolve to midnight
    /// UTC; numbers are epoch seconds.
    #[default]
    Iso8601,
    /// Numbers (or numeric strings) counting seconds since the Unix epoch.
    EpochSeconds,
    /// Numbers (or numeric strings) counting milliseconds since the Unix epoch.
    EpochMilliseconds,
    /// A `time` format description, for example
    /// `"[year]-[month]-[day] [hour]:[minute]"`. Values without an offset
    /// are taken as UTC; numbers are epoch seconds.
    Format(String),
}

impl DateStrategy {
    /// Check that a custom format description can be compiled.
    ///
    /// # Errors
    ///
    /// Returns the parser's message when the description is invalid.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Format(description) => compiled(description)
                .as_ref()
                .as_ref()
                .map(|_| ())
                .map_err(String::clone),
            Self::Iso8601 | Self::EpochSeconds | Self::EpochMilliseconds => Ok(()),
        }
    }

    /// Parse a JSON string or number. Other kinds yield `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use model_import::DateStrategy;
    /// use serde_json::json;
    ///
    /// let parsed = DateStrategy::Iso8601.parse_value(&json!("2014-05-22T16:04:00Z"));
    /// assert_eq!(parsed.map(|date| date.unix_timestamp()), Some(1_400_774_640));
    /// ```
    #[must_use]
    pub fn parse_value(&self, value: &Value) -> Option<OffsetDateTime> {
        match value {
            Value::String(text) => self.parse_text(text),
            Value::Number(number) => self.from_number(number),
            Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Parse a textual date.
    #[must_use]
    pub fn parse_text(&self, text: &str) -> Option<OffsetDateTime> {
        let trimmed = text.trim();
        match self {
            Self::Iso8601 => parse_iso8601(trimmed),
            Self::EpochSeconds | Self::EpochMilliseconds => trimmed
                .parse::<Number>()
                .ok()
                .and_then(|number| self.from_number(&number)),
            Self::Format(description) => compiled(description)
                .as_ref()
                .as_ref()
                .ok()
                .and_then(|format| parse_with(trimmed, format)),
        }
    }

    /// Interpret a number as a Unix timestamp in this strategy's unit.
    #[must_use]
    pub fn from_number(&self, number: &Number) -> Option<OffsetDateTime> {
        let nanos_per_unit: i64 = match self {
            Self::EpochMilliseconds => 1_000_000,
            Self::Iso8601 | Self::EpochSeconds | Self::Format(_) => 1_000_000_000,
        };
        let nanos = if let Some(whole) = number.as_i64() {
            i128::from(whole).checked_mul(i128::from(nanos_per_unit))?
        } else {
            fractional_nanos(number.as_f64()?, nanos_per_unit)?
        };
        OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "fractional timestamps are rounded to whole nanoseconds"
)]
fn fractional_nanos(units: f64, nanos_per_unit: i64) -> Option<i128> {
    let nanos = (units * nanos_per_unit as f64).round();
    // `as` saturates; out-of-range values are rejected by `time` afterwards.
    nanos.is_finite().then_some(nanos as i128)
}

type Compiled = Arc<Result<OwnedFormatItem, String>>;

static FORMATS: LazyLock<RwLock<HashMap<String, Compiled>>> = LazyLock::new(RwLock::default);

fn compiled(description: &str) -> Compiled {
    if let Some(format) = FORMATS.read().get(description) {
        return Arc::clone(format);
    }
    Arc::clone(
        FORMATS
            .write()
            .entry(description.to_owned())
            .or_insert_with(|| Arc::new(compile(description))),
    )
}

fn compile(description: &str) -> Result<OwnedFormatItem, String> {
    time::format_description::parse_owned::<2>(description).map_err(|err| err.to_string())
}

fn parse_iso8601(text: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(text, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(text, &Iso8601::DEFAULT))
        .ok()
        .or_else(|| {
            PrimitiveDateTime::parse(text, &Iso8601::DEFAULT)
                .ok()
                .map(PrimitiveDateTime::assume_utc)
        })
        .or_else(|| {
            Date::parse(text, &Iso8601::DEFAULT)
                .ok()
                .map(|date| date.midnight().assume_utc())
        })
}

fn parse_with(text: &str, format: &OwnedFormatItem) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(text, format)
        .ok()
        .or_else(|| {
            PrimitiveDateTime::parse(text, format)
                .ok()
                .map(PrimitiveDateTime::assume_utc)
        })
        .or_else(|| {
            Date::parse(text, format)
                .ok()
                .map(|date| date.midnight().assume_utc())
        })
}
