//! Per-kind primitive codecs.
//!
//! Both directions work on the unquoted text of a value: it must be non-empty
//! and match the kind's grammar before it is converted. Values travel as JSON
//! booleans, numbers or strings according to [`PrimitiveKind::json_shape`].

use std::borrow::Cow;

use atrius_fhir_lib::date_time::{
    PrecisionDate, PrecisionDateTime, PrecisionInstant, PrecisionTime,
};
use atrius_fhir_lib::{JsonShape, PreciseDecimal, PrimitiveKind, Scalar, ScalarValue, SchemaError};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Number, Value};

use crate::error::{CodecError, Result};
use crate::grammar;
use crate::tree::shape_of;

/// Kinds whose value is plain text.
fn is_textual(kind: PrimitiveKind) -> bool {
    matches!(
        kind,
        PrimitiveKind::Code
            | PrimitiveKind::Id
            | PrimitiveKind::Markdown
            | PrimitiveKind::Oid
            | PrimitiveKind::String
            | PrimitiveKind::Uri
            | PrimitiveKind::Uuid
            | PrimitiveKind::Xhtml
    )
}

fn validate(kind: PrimitiveKind, text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(CodecError::EmptyValue { kind });
    }
    grammar::check(kind, text)
}

fn unrepresentable(kind: PrimitiveKind, value_us: i64) -> CodecError {
    CodecError::InvalidValue {
        kind,
        input: format!("{} microseconds", value_us),
    }
}

/// Encodes a primitive value as its canonical JSON token.
pub fn encode(kind: PrimitiveKind, scalar: Scalar<'_>) -> Result<Value> {
    let text: Cow<'_, str> = match (kind, scalar) {
        (PrimitiveKind::Boolean, Scalar::Boolean(value)) => {
            Cow::Borrowed(if value { "true" } else { "false" })
        }
        (PrimitiveKind::Integer, Scalar::Integer(value)) => Cow::Owned(value.to_string()),
        (PrimitiveKind::PositiveInt | PrimitiveKind::UnsignedInt, Scalar::Unsigned(value)) => {
            Cow::Owned(value.to_string())
        }
        (PrimitiveKind::Decimal, Scalar::Decimal(value)) => Cow::Borrowed(value.original_string()),
        (PrimitiveKind::Base64Binary, Scalar::Binary(bytes)) => Cow::Owned(STANDARD.encode(bytes)),
        (PrimitiveKind::Date, Scalar::Date(date)) => {
            if let Some(zone) = date.timezone() {
                return Err(CodecError::TimezoneNotAllowed {
                    kind,
                    zone: zone.to_string(),
                });
            }
            Cow::Owned(date.format().ok_or_else(|| unrepresentable(kind, date.value_us()))?)
        }
        (PrimitiveKind::DateTime, Scalar::DateTime(value)) => {
            Cow::Owned(value.format().ok_or_else(|| unrepresentable(kind, value.value_us()))?)
        }
        (PrimitiveKind::Instant, Scalar::Instant(value)) => {
            Cow::Owned(value.format().ok_or_else(|| unrepresentable(kind, value.value_us()))?)
        }
        (PrimitiveKind::Time, Scalar::Time(value)) => {
            Cow::Owned(value.format().ok_or_else(|| unrepresentable(kind, value.value_us()))?)
        }
        (kind, Scalar::Text(text)) if is_textual(kind) => Cow::Borrowed(text),
        (kind, other) => {
            return Err(SchemaError::ScalarMismatch {
                expected: kind.fhir_name(),
                found: other.representation(),
            }
            .into());
        }
    };

    validate(kind, &text)?;
    Ok(match kind.json_shape() {
        JsonShape::Boolean => Value::Bool(text == "true"),
        JsonShape::Number => Value::Number(parse_number(kind, &text)?),
        _ => Value::String(text.into_owned()),
    })
}

/// Keeps the exact text; the JSON layer runs with arbitrary precision.
fn parse_number(kind: PrimitiveKind, text: &str) -> Result<Number> {
    serde_json::from_str::<Number>(text).map_err(|_| CodecError::InvalidValue {
        kind,
        input: text.to_string(),
    })
}

/// Decodes a JSON token into a primitive value.
///
/// The grammar is checked before the token shape, so a quoted `"x"` for an
/// integer reports the grammar and a quoted `"42"` reports the shape.
pub fn decode(kind: PrimitiveKind, value: &Value) -> Result<ScalarValue> {
    let text: Cow<'_, str> = match value {
        Value::String(text) => Cow::Borrowed(text),
        Value::Number(number) => Cow::Owned(number.to_string()),
        Value::Bool(flag) => Cow::Borrowed(if *flag { "true" } else { "false" }),
        other => {
            return Err(CodecError::TypeMismatch {
                expected: kind.json_shape(),
                actual: shape_of(other),
            });
        }
    };

    validate(kind, &text)?;
    let actual = shape_of(value);
    if actual != kind.json_shape() {
        return Err(CodecError::TypeMismatch {
            expected: kind.json_shape(),
            actual,
        });
    }
    from_text(kind, &text)
}

fn overflow(kind: PrimitiveKind, bounds: &'static str, text: &str) -> CodecError {
    CodecError::RangeOverflow {
        kind,
        bounds,
        input: text.to_string(),
    }
}

/// Converts grammar-checked text into a value.
fn from_text(kind: PrimitiveKind, text: &str) -> Result<ScalarValue> {
    let invalid = || CodecError::InvalidValue {
        kind,
        input: text.to_string(),
    };
    let value = match kind {
        PrimitiveKind::Boolean => ScalarValue::Boolean(text == "true"),
        PrimitiveKind::Integer => ScalarValue::Integer(
            text.parse()
                .map_err(|_| overflow(kind, "signed 32-bit", text))?,
        ),
        PrimitiveKind::PositiveInt => {
            let value: u32 = text
                .parse()
                .map_err(|_| overflow(kind, "positive 32-bit", text))?;
            if value == 0 {
                return Err(overflow(kind, "positive 32-bit", text));
            }
            ScalarValue::Unsigned(value)
        }
        PrimitiveKind::UnsignedInt => ScalarValue::Unsigned(
            text.parse()
                .map_err(|_| overflow(kind, "unsigned 32-bit", text))?,
        ),
        PrimitiveKind::Decimal => ScalarValue::Decimal(PreciseDecimal::from_text(text)),
        PrimitiveKind::Base64Binary => {
            let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            ScalarValue::Binary(STANDARD.decode(compact).map_err(|_| invalid())?)
        }
        PrimitiveKind::Date => ScalarValue::Date(PrecisionDate::parse(text).ok_or_else(invalid)?),
        PrimitiveKind::DateTime => {
            ScalarValue::DateTime(PrecisionDateTime::parse(text).ok_or_else(invalid)?)
        }
        PrimitiveKind::Instant => {
            ScalarValue::Instant(PrecisionInstant::parse(text).ok_or_else(invalid)?)
        }
        PrimitiveKind::Time => ScalarValue::Time(PrecisionTime::parse(text).ok_or_else(invalid)?),
        PrimitiveKind::Code
        | PrimitiveKind::Id
        | PrimitiveKind::Markdown
        | PrimitiveKind::Oid
        | PrimitiveKind::String
        | PrimitiveKind::Uri
        | PrimitiveKind::Uuid
        | PrimitiveKind::Xhtml => ScalarValue::Text(text.to_string()),
    };
    Ok(value)
}

/// Encodes a single primitive to JSON bytes, e.g. `true` or `"1986-10"`.
pub fn encode_primitive(kind: PrimitiveKind, scalar: Scalar<'_>) -> Result<Vec<u8>> {
    let value = encode(kind, scalar)?;
    Ok(serde_json::to_vec(&value)?)
}

/// Decodes a single primitive from JSON bytes.
pub fn decode_primitive(kind: PrimitiveKind, bytes: &[u8]) -> Result<ScalarValue> {
    let value: Value = serde_json::from_slice(bytes)?;
    decode(kind, &value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrius_fhir_lib::date_time::{DatePrecision, TimeZone};

    #[test]
    fn test_date_with_zone_is_rejected() {
        let date = PrecisionDate::new(529_977_600_000_000, DatePrecision::Day)
            .with_timezone(TimeZone::from_offset_minutes(60).unwrap());
        let err = encode(PrimitiveKind::Date, Scalar::Date(&date)).unwrap_err();
        assert!(matches!(err, CodecError::TimezoneNotAllowed { .. }));
        assert!(err.to_string().contains("zone +01:00"));
    }

    #[test]
    fn test_scalar_must_fit_kind() {
        let err = encode(PrimitiveKind::Integer, Scalar::Text("42")).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Schema(SchemaError::ScalarMismatch {
                expected: "integer",
                found: "string"
            })
        ));
    }

    #[test]
    fn test_shape_checked_after_grammar() {
        let quoted = Value::String("42".into());
        assert!(matches!(
            decode(PrimitiveKind::Integer, &quoted),
            Err(CodecError::TypeMismatch {
                expected: JsonShape::Number,
                actual: JsonShape::String
            })
        ));
        let garbage = Value::String("x".into());
        assert!(matches!(
            decode(PrimitiveKind::Integer, &garbage),
            Err(CodecError::GrammarViolation { .. })
        ));
        assert!(matches!(
            decode(PrimitiveKind::String, &Value::Null),
            Err(CodecError::TypeMismatch {
                actual: JsonShape::Null,
                ..
            })
        ));
    }

    #[test]
    fn test_impossible_date_is_invalid() {
        let err = decode(PrimitiveKind::Date, &Value::String("2019-02-30".into())).unwrap_err();
        assert!(matches!(err, CodecError::InvalidValue { .. }));
    }

    #[test]
    fn test_text_kinds_reject_empty() {
        for kind in [PrimitiveKind::Uri, PrimitiveKind::Xhtml, PrimitiveKind::Markdown] {
            assert!(matches!(
                encode(kind, Scalar::Text("")),
                Err(CodecError::EmptyValue { .. })
            ));
        }
    }
}
