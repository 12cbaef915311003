#![cfg(feature = "STU3")]

mod common;

use atrius_fhir_json::{decode_primitive, encode_primitive, CodecError};
use atrius_fhir_lib::date_time::{
    DatePrecision, DateTimePrecision, PrecisionDate, PrecisionDateTime, PrecisionInstant,
    PrecisionTime, TimePrecision, TimeZone,
};
use atrius_fhir_lib::{PreciseDecimal, PrimitiveKind, Scalar, ScalarValue};

fn encoded(kind: PrimitiveKind, scalar: Scalar<'_>) -> String {
    common::init_tracing();
    let bytes = encode_primitive(kind, scalar)
        .unwrap_or_else(|e| panic!("encoding {} failed: {}", kind.fhir_name(), e));
    String::from_utf8(bytes).unwrap()
}

fn decoded(kind: PrimitiveKind, json: &str) -> ScalarValue {
    decode_primitive(kind, json.as_bytes())
        .unwrap_or_else(|e| panic!("decoding {} from {} failed: {}", kind.fhir_name(), json, e))
}

fn decode_error(kind: PrimitiveKind, json: &str) -> CodecError {
    match decode_primitive(kind, json.as_bytes()) {
        Ok(value) => panic!("{} decoded from {} as {:?}", kind.fhir_name(), json, value),
        Err(e) => e,
    }
}

#[test]
fn test_base64_binary() {
    let bytes = b"foo\0bar";
    assert_eq!(
        encoded(PrimitiveKind::Base64Binary, Scalar::Binary(bytes)),
        r#""Zm9vAGJhcg==""#
    );
    assert_eq!(
        decoded(PrimitiveKind::Base64Binary, r#""Zm9vAGJhcg==""#),
        ScalarValue::Binary(bytes.to_vec())
    );
}

#[test]
fn test_boolean() {
    assert_eq!(encoded(PrimitiveKind::Boolean, Scalar::Boolean(true)), "true");
    assert_eq!(encoded(PrimitiveKind::Boolean, Scalar::Boolean(false)), "false");
    assert_eq!(decoded(PrimitiveKind::Boolean, "false"), ScalarValue::Boolean(false));
}

#[test]
fn test_date_precisions() {
    let cases = [
        (504_921_600_000_000, DatePrecision::Year, "\"1986\""),
        (528_508_800_000_000, DatePrecision::Month, "\"1986-10\""),
        (529_977_600_000_000, DatePrecision::Day, "\"1986-10-18\""),
    ];
    for (value_us, precision, json) in cases {
        let date = PrecisionDate::new(value_us, precision);
        assert_eq!(encoded(PrimitiveKind::Date, Scalar::Date(&date)), json);

        let ScalarValue::Date(back) = decoded(PrimitiveKind::Date, json) else {
            panic!("{} did not decode to a date", json);
        };
        assert_eq!(back.value_us(), value_us);
        assert_eq!(back.precision(), precision);
        assert_eq!(back.timezone(), None);
    }
}

#[test]
fn test_date_with_timezone_cannot_be_encoded() {
    let zone = TimeZone::from_offset_minutes(-300).unwrap();
    let date = PrecisionDate::new(529_977_600_000_000, DatePrecision::Day).with_timezone(zone);
    let err = encode_primitive(PrimitiveKind::Date, Scalar::Date(&date)).unwrap_err();
    assert!(matches!(err, CodecError::TimezoneNotAllowed { .. }));
    assert!(err.to_string().contains("zone"), "{}", err);
}

#[test]
fn test_decimal_keeps_its_text() {
    for text in ["2.71828", "-3.14159", "0.000", "0.14285700000", "42"] {
        let decimal = PreciseDecimal::from_text(text);
        assert_eq!(encoded(PrimitiveKind::Decimal, Scalar::Decimal(&decimal)), text);

        let ScalarValue::Decimal(back) = decoded(PrimitiveKind::Decimal, text) else {
            panic!("{} did not decode to a decimal", text);
        };
        assert_eq!(back.original_string(), text);
    }
}

#[test]
fn test_decimal_outside_grammar_cannot_be_encoded() {
    let decimal = PreciseDecimal::from_text("42x");
    let err = encode_primitive(PrimitiveKind::Decimal, Scalar::Decimal(&decimal)).unwrap_err();
    assert!(matches!(err, CodecError::GrammarViolation { .. }));
    assert!(err.to_string().contains("regex"), "{}", err);
}

#[test]
fn test_integer_family() {
    for value in [0, 42, -42, i32::MAX, i32::MIN] {
        let json = encoded(PrimitiveKind::Integer, Scalar::Integer(value));
        assert_eq!(json, value.to_string());
        assert_eq!(decoded(PrimitiveKind::Integer, &json), ScalarValue::Integer(value));
    }
    for value in [1, 42, u32::MAX] {
        let json = encoded(PrimitiveKind::PositiveInt, Scalar::Unsigned(value));
        assert_eq!(json, value.to_string());
        assert_eq!(decoded(PrimitiveKind::PositiveInt, &json), ScalarValue::Unsigned(value));
    }
    for value in [0, 42, u32::MAX] {
        let json = encoded(PrimitiveKind::UnsignedInt, Scalar::Unsigned(value));
        assert_eq!(json, value.to_string());
        assert_eq!(decoded(PrimitiveKind::UnsignedInt, &json), ScalarValue::Unsigned(value));
    }
}

#[test]
fn test_zero_is_not_a_positive_int() {
    let err = encode_primitive(PrimitiveKind::PositiveInt, Scalar::Unsigned(0)).unwrap_err();
    assert!(matches!(err, CodecError::GrammarViolation { .. }));
    assert!(decode_error(PrimitiveKind::PositiveInt, "0").to_string().contains("regex"));
}

#[test]
fn test_strings_are_json_escaped() {
    assert_eq!(
        encoded(PrimitiveKind::String, Scalar::Text("hello world")),
        r#""hello world""#
    );
    assert_eq!(
        encoded(PrimitiveKind::String, Scalar::Text(r#""double" 'single'"#)),
        r#""\"double\" 'single'""#
    );
    assert_eq!(
        decoded(PrimitiveKind::String, r#""\"double\" 'single'""#),
        ScalarValue::Text(r#""double" 'single'"#.to_string())
    );
}

#[test]
fn test_empty_string_is_rejected_both_ways() {
    let err = encode_primitive(PrimitiveKind::String, Scalar::Text("")).unwrap_err();
    assert!(err.to_string().contains("empty"), "{}", err);
    let err = decode_error(PrimitiveKind::String, r#""""#);
    assert!(matches!(err, CodecError::EmptyValue { .. }));
    assert!(err.to_string().contains("empty"), "{}", err);
}

#[test]
fn test_grammar_violations_mention_the_regex() {
    let cases = [
        (PrimitiveKind::Date, r#""1986-""#),
        (PrimitiveKind::Decimal, r#""42y""#),
        (PrimitiveKind::Integer, r#""x""#),
        (PrimitiveKind::PositiveInt, r#""y""#),
        (PrimitiveKind::UnsignedInt, r#""z""#),
    ];
    for (kind, json) in cases {
        let err = decode_error(kind, json);
        assert!(
            matches!(err, CodecError::GrammarViolation { .. }),
            "{} {}: {:?}",
            kind.fhir_name(),
            json,
            err
        );
        assert!(err.to_string().contains("regex"), "{}", err);
    }
}

#[test]
fn test_out_of_range_integers() {
    let cases = [
        (PrimitiveKind::Integer, "2147483648"),
        (PrimitiveKind::Integer, "-2147483649"),
        (PrimitiveKind::PositiveInt, "4294967296"),
        (PrimitiveKind::UnsignedInt, "4294967296"),
    ];
    for (kind, json) in cases {
        let err = decode_error(kind, json);
        assert!(matches!(err, CodecError::RangeOverflow { .. }), "{:?}", err);
        assert!(err.to_string().contains("32"), "{}", err);
    }
}

#[test]
fn test_token_shape_must_match_kind() {
    assert!(matches!(
        decode_error(PrimitiveKind::Integer, r#""42""#),
        CodecError::TypeMismatch { .. }
    ));
    assert!(matches!(
        decode_error(PrimitiveKind::Boolean, r#""true""#),
        CodecError::TypeMismatch { .. }
    ));
    assert!(matches!(
        decode_error(PrimitiveKind::Code, "[]"),
        CodecError::TypeMismatch { .. }
    ));
}

#[test]
fn test_code_grammar() {
    assert_eq!(
        decoded(PrimitiveKind::Code, r#""in progress""#),
        ScalarValue::Text("in progress".to_string())
    );
    for json in [r#"" active""#, r#""active ""#, r#""in  progress""#] {
        assert!(matches!(
            decode_error(PrimitiveKind::Code, json),
            CodecError::GrammarViolation { .. }
        ));
    }
}

fn encode_error(kind: PrimitiveKind, scalar: Scalar<'_>) -> CodecError {
    match encode_primitive(kind, scalar) {
        Ok(bytes) => panic!(
            "{} encoded as {}",
            kind.fhir_name(),
            String::from_utf8_lossy(&bytes)
        ),
        Err(e) => e,
    }
}

#[test]
fn test_text_kinds_checked_on_encode() {
    let cases = [
        (PrimitiveKind::Code, " final"),
        (PrimitiveKind::Code, "entered  in error"),
        (PrimitiveKind::Id, "has_underscore"),
        (PrimitiveKind::Oid, "1.2.3"),
        (PrimitiveKind::Oid, "urn:oid:3.1"),
        (PrimitiveKind::Uuid, "c757873d-ec9a-4326-a141-556f43239520"),
        (PrimitiveKind::Uuid, "urn:uuid:C757873D-EC9A-4326-A141-556F43239520"),
        (PrimitiveKind::Uri, "has space"),
    ];
    for (kind, text) in cases {
        let err = encode_error(kind, Scalar::Text(text));
        assert!(
            matches!(err, CodecError::GrammarViolation { .. }),
            "{} {:?}: {:?}",
            kind.fhir_name(),
            text,
            err
        );
    }
    let long_id = "a".repeat(65);
    assert!(matches!(
        encode_error(PrimitiveKind::Id, Scalar::Text(&long_id)),
        CodecError::GrammarViolation { .. }
    ));
}

#[test]
fn test_empty_binary_cannot_be_encoded() {
    assert!(matches!(
        encode_error(PrimitiveKind::Base64Binary, Scalar::Binary(&[])),
        CodecError::EmptyValue { .. }
    ));
    assert!(matches!(
        decode_error(PrimitiveKind::Base64Binary, r#""Zm9v!""#),
        CodecError::GrammarViolation { .. } | CodecError::InvalidValue { .. }
    ));
}

#[test]
fn test_base64_whitespace_is_dropped() {
    let ScalarValue::Binary(bytes) = decoded(PrimitiveKind::Base64Binary, r#""Zm9v AGJh cg==""#)
    else {
        panic!("base64 did not decode to bytes");
    };
    assert_eq!(bytes, b"foo\0bar");
    assert_eq!(
        encoded(PrimitiveKind::Base64Binary, Scalar::Binary(&bytes)),
        r#""Zm9vAGJhcg==""#
    );
}

#[test]
fn test_unprintable_temporal_values_cannot_be_encoded() {
    let far = PrecisionDateTime::new(i64::MAX, DateTimePrecision::Second);
    assert!(matches!(
        encode_error(PrimitiveKind::DateTime, Scalar::DateTime(&far)),
        CodecError::InvalidValue { .. }
    ));

    // one microsecond past what three fraction digits can show
    let lossy =
        PrecisionInstant::new(1_483_228_800_000_001, TimePrecision::Millisecond, TimeZone::Utc);
    assert!(matches!(
        encode_error(PrimitiveKind::Instant, Scalar::Instant(&lossy)),
        CodecError::InvalidValue { .. }
    ));

    let past_midnight = PrecisionTime::new(86_400_000_000, TimePrecision::Second);
    assert!(matches!(
        encode_error(PrimitiveKind::Time, Scalar::Time(&past_midnight)),
        CodecError::InvalidValue { .. }
    ));
}

#[test]
fn test_leap_seconds_are_rejected() {
    let cases = [
        (PrimitiveKind::Time, r#""23:59:60""#),
        (PrimitiveKind::Instant, r#""2016-12-31T23:59:60Z""#),
        (PrimitiveKind::DateTime, r#""2016-12-31T23:59:60Z""#),
    ];
    for (kind, json) in cases {
        let err = decode_error(kind, json);
        assert!(matches!(err, CodecError::InvalidValue { .. }), "{:?}", err);
    }
}

#[test]
fn test_fractions_past_microseconds_are_rejected() {
    for (kind, json) in [
        (PrimitiveKind::Time, r#""09:30:00.1234567""#),
        (PrimitiveKind::Instant, r#""2017-01-01T00:00:00.1234567Z""#),
    ] {
        let err = decode_error(kind, json);
        assert!(matches!(err, CodecError::InvalidValue { .. }), "{:?}", err);
    }
}

#[test]
fn test_negative_zero_is_not_an_integer() {
    let err = decode_error(PrimitiveKind::Integer, "-0");
    assert!(matches!(err, CodecError::GrammarViolation { .. }), "{:?}", err);
}

#[test]
fn test_decode_of_encoded_temporal_values() {
    let zone = TimeZone::from_offset_minutes(-300).unwrap();
    let datetimes = [
        PrecisionDateTime::new(1_423_333_697_000_000, DateTimePrecision::Second).with_timezone(zone),
        PrecisionDateTime::new(1_483_228_800_500_000, DateTimePrecision::Millisecond)
            .with_timezone(TimeZone::Utc)
            .with_fraction_digits(1)
            .unwrap(),
        PrecisionDateTime::new(528_508_800_000_000, DateTimePrecision::Month),
    ];
    for value in datetimes {
        let json = encoded(PrimitiveKind::DateTime, Scalar::DateTime(&value));
        assert_eq!(decoded(PrimitiveKind::DateTime, &json), ScalarValue::DateTime(value), "{}", json);
    }

    let instant =
        PrecisionInstant::new(1_483_228_800_123_400, TimePrecision::Microsecond, TimeZone::Utc)
            .with_fraction_digits(4)
            .unwrap();
    let json = encoded(PrimitiveKind::Instant, Scalar::Instant(&instant));
    assert_eq!(json, r#""2017-01-01T00:00:00.1234Z""#);
    assert_eq!(decoded(PrimitiveKind::Instant, &json), ScalarValue::Instant(instant));

    for time in [
        PrecisionTime::from_hms(9, 30, 0).unwrap(),
        PrecisionTime::from_hms_milli(13, 28, 17, 239).unwrap(),
        PrecisionTime::new(34_200_500_000, TimePrecision::Millisecond)
            .with_fraction_digits(1)
            .unwrap(),
    ] {
        let json = encoded(PrimitiveKind::Time, Scalar::Time(&time));
        assert_eq!(decoded(PrimitiveKind::Time, &json), ScalarValue::Time(time), "{}", json);
    }
}

#[test]
fn test_decode_of_encoded_text_kinds() {
    let cases = [
        (PrimitiveKind::Id, "example-1.a"),
        (PrimitiveKind::Oid, "urn:oid:1.2.840.10008"),
        (PrimitiveKind::Uuid, "urn:uuid:c757873d-ec9a-4326-a141-556f43239520"),
        (PrimitiveKind::Uri, "http://hl7.org/fhir/StructureDefinition/patient-birthPlace"),
        (PrimitiveKind::Markdown, "# Notes\n\n*bold* and `code`"),
        (PrimitiveKind::Xhtml, r#"<div xmlns="http://www.w3.org/1999/xhtml"><p>"hi"</p></div>"#),
    ];
    for (kind, text) in cases {
        let json = encoded(kind, Scalar::Text(text));
        assert_eq!(decoded(kind, &json), ScalarValue::Text(text.to_string()), "{}", json);
    }
}
