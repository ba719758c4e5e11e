//! Coercion for date properties.

use serde_json::Value;
use time::OffsetDateTime;

use super::{Coerce, Coercion, SemanticType, SkipReason};
use crate::{ImportContext, ImportResult};

impl Coerce for OffsetDateTime {
    fn semantic_type() -> SemanticType {
        SemanticType::Date
    }

    fn coerce(value: &Value, ctx: &ImportContext<'_>) -> ImportResult<Coercion<Self>> {
        if !(value.is_string() || value.is_number()) {
            return Ok(Coercion::mismatch(SemanticType::Date, value));
        }
        Ok(ctx
            .date_strategy()
            .parse_value(value)
            .map_or(Coercion::Skip(SkipReason::InvalidDate), Coercion::Value))
    }
}
