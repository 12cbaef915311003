//! Primitive kinds and the scalar values they hold.
//!
//! Every FHIR primitive maps onto one [`PrimitiveKind`]. The kind decides the
//! grammar and JSON shape of the value; the Rust value type behind it is one of
//! the [`ScalarType`] implementors (`bool`, `i32`, `u32`, `String`, `Vec<u8>`,
//! [`PreciseDecimal`] and the precision-aware temporal types).

use std::fmt;

use crate::date_time::{PrecisionDate, PrecisionDateTime, PrecisionInstant, PrecisionTime};
use crate::precise_decimal::PreciseDecimal;

/// The closed set of FHIR primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Base64Binary,
    Boolean,
    Code,
    Date,
    DateTime,
    Decimal,
    Id,
    Instant,
    Integer,
    Markdown,
    Oid,
    PositiveInt,
    String,
    Time,
    UnsignedInt,
    Uri,
    Uuid,
    Xhtml,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 18] = [
        PrimitiveKind::Base64Binary,
        PrimitiveKind::Boolean,
        PrimitiveKind::Code,
        PrimitiveKind::Date,
        PrimitiveKind::DateTime,
        PrimitiveKind::Decimal,
        PrimitiveKind::Id,
        PrimitiveKind::Instant,
        PrimitiveKind::Integer,
        PrimitiveKind::Markdown,
        PrimitiveKind::Oid,
        PrimitiveKind::PositiveInt,
        PrimitiveKind::String,
        PrimitiveKind::Time,
        PrimitiveKind::UnsignedInt,
        PrimitiveKind::Uri,
        PrimitiveKind::Uuid,
        PrimitiveKind::Xhtml,
    ];

    /// The FHIR type name, e.g. `positiveInt`.
    pub fn fhir_name(self) -> &'static str {
        match self {
            PrimitiveKind::Base64Binary => "base64Binary",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Code => "code",
            PrimitiveKind::Date => "date",
            PrimitiveKind::DateTime => "dateTime",
            PrimitiveKind::Decimal => "decimal",
            PrimitiveKind::Id => "id",
            PrimitiveKind::Instant => "instant",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Markdown => "markdown",
            PrimitiveKind::Oid => "oid",
            PrimitiveKind::PositiveInt => "positiveInt",
            PrimitiveKind::String => "string",
            PrimitiveKind::Time => "time",
            PrimitiveKind::UnsignedInt => "unsignedInt",
            PrimitiveKind::Uri => "uri",
            PrimitiveKind::Uuid => "uuid",
            PrimitiveKind::Xhtml => "xhtml",
        }
    }

    /// Looks a kind up by its FHIR type name.
    pub fn from_fhir_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.fhir_name() == name)
    }

    /// The regular expression every value of this kind must match, unanchored.
    ///
    /// `xhtml` has no grammar. Numeric grammars follow JSON number syntax, so
    /// there is no leading `+`.
    pub fn pattern(self) -> Option<&'static str> {
        let pattern = match self {
            PrimitiveKind::Base64Binary => r"(\s*([0-9a-zA-Z\+/=]){4}\s*)+",
            PrimitiveKind::Boolean => r"true|false",
            PrimitiveKind::Code => r"[^\s]+(\s[^\s]+)*",
            PrimitiveKind::Date => {
                r"([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)(-(0[1-9]|1[0-2])(-(0[1-9]|[1-2][0-9]|3[0-1]))?)?"
            }
            PrimitiveKind::DateTime => {
                r"([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)(-(0[1-9]|1[0-2])(-(0[1-9]|[1-2][0-9]|3[0-1])(T([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]+)?(Z|(\+|-)((0[0-9]|1[0-3]):[0-5][0-9]|14:00)))?)?)?"
            }
            PrimitiveKind::Decimal => r"-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?",
            PrimitiveKind::Id => r"[A-Za-z0-9\-\.]{1,64}",
            PrimitiveKind::Instant => {
                r"([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)-(0[1-9]|1[0-2])-(0[1-9]|[1-2][0-9]|3[0-1])T([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]+)?(Z|(\+|-)((0[0-9]|1[0-3]):[0-5][0-9]|14:00))"
            }
            PrimitiveKind::Integer => r"0|-?[1-9][0-9]*",
            PrimitiveKind::Markdown => r"\s*(\S|\s)*",
            PrimitiveKind::Oid => r"urn:oid:[0-2](\.(0|[1-9][0-9]*))+",
            PrimitiveKind::PositiveInt => r"[1-9][0-9]*",
            PrimitiveKind::String => r"[ \r\n\t\S]+",
            PrimitiveKind::Time => r"([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]+)?",
            PrimitiveKind::UnsignedInt => r"[0]|([1-9][0-9]*)",
            PrimitiveKind::Uri => r"\S*",
            PrimitiveKind::Uuid => {
                r"urn:uuid:[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}"
            }
            PrimitiveKind::Xhtml => return None,
        };
        Some(pattern)
    }

    /// The JSON token shape values of this kind travel as.
    pub fn json_shape(self) -> JsonShape {
        match self {
            PrimitiveKind::Boolean => JsonShape::Boolean,
            PrimitiveKind::Decimal
            | PrimitiveKind::Integer
            | PrimitiveKind::PositiveInt
            | PrimitiveKind::UnsignedInt => JsonShape::Number,
            _ => JsonShape::String,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fhir_name())
    }
}

/// Shape of a JSON value, used when reporting mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonShape {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for JsonShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JsonShape::Null => "null",
            JsonShape::Boolean => "boolean",
            JsonShape::Number => "number",
            JsonShape::String => "string",
            JsonShape::Array => "array",
            JsonShape::Object => "object",
        })
    }
}

/// Borrowed view of a primitive's value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Boolean(bool),
    Integer(i32),
    Unsigned(u32),
    Text(&'a str),
    Binary(&'a [u8]),
    Decimal(&'a PreciseDecimal),
    Date(&'a PrecisionDate),
    DateTime(&'a PrecisionDateTime),
    Instant(&'a PrecisionInstant),
    Time(&'a PrecisionTime),
}

impl Scalar<'_> {
    pub fn representation(&self) -> &'static str {
        match self {
            Scalar::Boolean(_) => "bool",
            Scalar::Integer(_) => "i32",
            Scalar::Unsigned(_) => "u32",
            Scalar::Text(_) => "string",
            Scalar::Binary(_) => "bytes",
            Scalar::Decimal(_) => "decimal",
            Scalar::Date(_) => "date",
            Scalar::DateTime(_) => "dateTime",
            Scalar::Instant(_) => "instant",
            Scalar::Time(_) => "time",
        }
    }
}

/// Owned primitive value, as produced by the JSON decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Boolean(bool),
    Integer(i32),
    Unsigned(u32),
    Text(String),
    Binary(Vec<u8>),
    Decimal(PreciseDecimal),
    Date(PrecisionDate),
    DateTime(PrecisionDateTime),
    Instant(PrecisionInstant),
    Time(PrecisionTime),
}

impl ScalarValue {
    /// Name of the Rust representation, for error messages.
    pub fn representation(&self) -> &'static str {
        match self {
            ScalarValue::Boolean(_) => "bool",
            ScalarValue::Integer(_) => "i32",
            ScalarValue::Unsigned(_) => "u32",
            ScalarValue::Text(_) => "string",
            ScalarValue::Binary(_) => "bytes",
            ScalarValue::Decimal(_) => "decimal",
            ScalarValue::Date(_) => "date",
            ScalarValue::DateTime(_) => "dateTime",
            ScalarValue::Instant(_) => "instant",
            ScalarValue::Time(_) => "time",
        }
    }
}

/// Rust value types that can sit inside a primitive [`Element`](crate::Element).
pub trait ScalarType: Sized + fmt::Debug + Send + Sync + 'static {
    /// Representation name, matching [`ScalarValue::representation`].
    const REPRESENTATION: &'static str;

    fn as_scalar(&self) -> Scalar<'_>;

    /// Takes the value back out, returning the input on a representation mismatch.
    fn from_scalar(value: ScalarValue) -> Result<Self, ScalarValue>;
}

macro_rules! scalar_type {
    ($ty:ty, $variant:ident, $repr:literal, |$v:ident| $borrow:expr) => {
        impl ScalarType for $ty {
            const REPRESENTATION: &'static str = $repr;

            fn as_scalar(&self) -> Scalar<'_> {
                let $v = self;
                Scalar::$variant($borrow)
            }

            fn from_scalar(value: ScalarValue) -> Result<Self, ScalarValue> {
                match value {
                    ScalarValue::$variant(inner) => Ok(inner),
                    other => Err(other),
                }
            }
        }
    };
}

scalar_type!(bool, Boolean, "bool", |v| *v);
scalar_type!(i32, Integer, "i32", |v| *v);
scalar_type!(u32, Unsigned, "u32", |v| *v);
scalar_type!(String, Text, "string", |v| v.as_str());
scalar_type!(Vec<u8>, Binary, "bytes", |v| v.as_slice());
scalar_type!(PreciseDecimal, Decimal, "decimal", |v| v);
scalar_type!(PrecisionDate, Date, "date", |v| v);
scalar_type!(PrecisionDateTime, DateTime, "dateTime", |v| v);
scalar_type!(PrecisionInstant, Instant, "instant", |v| v);
scalar_type!(PrecisionTime, Time, "time", |v| v);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(PrimitiveKind::from_fhir_name(kind.fhir_name()), Some(kind));
        }
        assert_eq!(PrimitiveKind::from_fhir_name("Patient"), None);
    }

    #[test]
    fn test_only_xhtml_lacks_grammar() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(kind.pattern().is_none(), kind == PrimitiveKind::Xhtml, "{kind}");
        }
    }

    #[test]
    fn test_scalar_conversion() {
        let text = String::from("hello");
        assert_eq!(text.as_scalar(), Scalar::Text("hello"));
        assert_eq!(
            String::from_scalar(ScalarValue::Text("hello".into())),
            Ok("hello".to_string())
        );
        assert_eq!(
            i32::from_scalar(ScalarValue::Boolean(true)),
            Err(ScalarValue::Boolean(true))
        );
    }
}
