//! Coercion for scalar property types.

use serde_json::{Number, Value};

use super::{Coerce, Coercion, SemanticType, SkipReason};
use crate::{ImportContext, ImportResult};

impl Coerce for bool {
    fn semantic_type() -> SemanticType {
        SemanticType::Boolean
    }

    fn coerce(value: &Value, _ctx: &ImportContext<'_>) -> ImportResult<Coercion<Self>> {
        Ok(match value {
            Value::Bool(flag) => Coercion::Value(*flag),
            other => Coercion::mismatch(SemanticType::Boolean, other),
        })
    }
}

impl Coerce for String {
    fn semantic_type() -> SemanticType {
        SemanticType::Text
    }

    fn coerce(value: &Value, _ctx: &ImportContext<'_>) -> ImportResult<Coercion<Self>> {
        Ok(match value {
            Value::String(text) => Coercion::Value(text.clone()),
            other => Coercion::mismatch(SemanticType::Text, other),
        })
    }
}

impl Coerce for Value {
    fn semantic_type() -> SemanticType {
        SemanticType::Json
    }

    fn coerce(value: &Value, _ctx: &ImportContext<'_>) -> ImportResult<Coercion<Self>> {
        Ok(Coercion::Value(value.clone()))
    }
}

/// Whole-number view of a JSON number.
///
/// Floats are truncated toward zero; values beyond the 64-bit range yield
/// `None`.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "float-to-integer narrowing is part of the coercion rules"
)]
fn whole_number(number: &Number) -> Option<WholeNumber> {
    if let Some(signed) = number.as_i64() {
        return Some(WholeNumber::Signed(signed));
    }
    if let Some(unsigned) = number.as_u64() {
        return Some(WholeNumber::Unsigned(unsigned));
    }
    let float = number.as_f64()?.trunc();
    if !float.is_finite() {
        return None;
    }
    if float >= i64::MIN as f64 && float < i64::MAX as f64 {
        Some(WholeNumber::Signed(float as i64))
    } else if float >= 0.0 && float < u64::MAX as f64 {
        Some(WholeNumber::Unsigned(float as u64))
    } else {
        None
    }
}

#[derive(Clone, Copy)]
enum WholeNumber {
    Signed(i64),
    Unsigned(u64),
}

fn integer<T>(value: &Value) -> Coercion<T>
where
    T: TryFrom<i64> + TryFrom<u64>,
{
    let Value::Number(number) = value else {
        return Coercion::mismatch(SemanticType::Integer, value);
    };
    let converted = match whole_number(number) {
        Some(WholeNumber::Signed(signed)) => <T as TryFrom<i64>>::try_from(signed).ok(),
        Some(WholeNumber::Unsigned(unsigned)) => <T as TryFrom<u64>>::try_from(unsigned).ok(),
        None => None,
    };
    converted.map_or(
        Coercion::Skip(SkipReason::OutOfRange {
            expected: SemanticType::Integer,
        }),
        Coercion::Value,
    )
}

macro_rules! coerce_integers {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Coerce for $ty {
                fn semantic_type() -> SemanticType {
                    SemanticType::Integer
                }

                fn coerce(value: &Value, _ctx: &ImportContext<'_>) -> ImportResult<Coercion<Self>> {
                    Ok(integer::<$ty>(value))
                }
            }
        )+
    };
}

coerce_integers!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Coerce for f64 {
    fn semantic_type() -> SemanticType {
        SemanticType::Float
    }

    fn coerce(value: &Value, _ctx: &ImportContext<'_>) -> ImportResult<Coercion<Self>> {
        Ok(match value {
            Value::Number(number) => number.as_f64().map_or(
                Coercion::Skip(SkipReason::OutOfRange {
                    expected: SemanticType::Float,
                }),
                Coercion::Value,
            ),
            other => Coercion::mismatch(SemanticType::Float, other),
        })
    }
}

impl Coerce for f32 {
    fn semantic_type() -> SemanticType {
        SemanticType::Float
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "narrowing to f32 happens only once the value is known to fit"
    )]
    fn coerce(value: &Value, ctx: &ImportContext<'_>) -> ImportResult<Coercion<Self>> {
        Ok(match f64::coerce(value, ctx)? {
            Coercion::Value(wide) if wide.abs() <= f64::from(Self::MAX) => {
                Coercion::Value(wide as Self)
            }
            Coercion::Value(_) => Coercion::Skip(SkipReason::OutOfRange {
                expected: SemanticType::Float,
            }),
            Coercion::Skip(reason) => Coercion::Skip(reason),
        })
    }
}
