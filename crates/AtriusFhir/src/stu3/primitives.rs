use crate::date_time::{PrecisionDate, PrecisionDateTime, PrecisionInstant, PrecisionTime};
use crate::element::Element;
use crate::precise_decimal::PreciseDecimal;
use super::Extension;

/// FHIR primitive type Base64Binary
///
/// A stream of bytes, base64 encoded
///
/// See: [base64Binary](http://hl7.org/fhir/STU3/datatypes.html#base64Binary)
pub type Base64Binary = Element<Vec<u8>, Extension>;

/// FHIR primitive type Boolean
///
/// See: [boolean](http://hl7.org/fhir/STU3/datatypes.html#boolean)
pub type Boolean = Element<bool, Extension>;

/// FHIR primitive type Code
///
/// A string which has at least one character and no leading or trailing
/// whitespace, and no internal run of more than one space
///
/// See: [code](http://hl7.org/fhir/STU3/datatypes.html#code)
pub type Code = Element<std::string::String, Extension>;

/// FHIR primitive type Date
///
/// See: [date](http://hl7.org/fhir/STU3/datatypes.html#date)
pub type Date = Element<PrecisionDate, Extension>;

/// FHIR primitive type DateTime
///
/// See: [dateTime](http://hl7.org/fhir/STU3/datatypes.html#dateTime)
pub type DateTime = Element<PrecisionDateTime, Extension>;

/// FHIR primitive type Decimal
///
/// The original text is kept, so `0.000` and `0` stay distinct.
///
/// See: [decimal](http://hl7.org/fhir/STU3/datatypes.html#decimal)
pub type Decimal = Element<PreciseDecimal, Extension>;

/// FHIR primitive type Id
///
/// Any combination of letters, numerals, "-" and ".", with a length limit of 64
///
/// See: [id](http://hl7.org/fhir/STU3/datatypes.html#id)
pub type Id = Element<std::string::String, Extension>;

/// FHIR primitive type Instant
///
/// See: [instant](http://hl7.org/fhir/STU3/datatypes.html#instant)
pub type Instant = Element<PrecisionInstant, Extension>;

/// FHIR primitive type Integer
///
/// See: [integer](http://hl7.org/fhir/STU3/datatypes.html#integer)
pub type Integer = Element<i32, Extension>;

/// FHIR primitive type Markdown
///
/// See: [markdown](http://hl7.org/fhir/STU3/datatypes.html#markdown)
pub type Markdown = Element<std::string::String, Extension>;

/// FHIR primitive type Oid
///
/// See: [oid](http://hl7.org/fhir/STU3/datatypes.html#oid)
pub type Oid = Element<std::string::String, Extension>;

/// FHIR primitive type PositiveInt
///
/// An integer with a value that is positive (e.g. >0)
///
/// See: [positiveInt](http://hl7.org/fhir/STU3/datatypes.html#positiveInt)
pub type PositiveInt = Element<u32, Extension>;

/// FHIR primitive type String
///
/// A sequence of Unicode characters; never empty
///
/// See: [string](http://hl7.org/fhir/STU3/datatypes.html#string)
pub type String = Element<std::string::String, Extension>;

/// FHIR primitive type Time
///
/// See: [time](http://hl7.org/fhir/STU3/datatypes.html#time)
pub type Time = Element<PrecisionTime, Extension>;

/// FHIR primitive type UnsignedInt
///
/// See: [unsignedInt](http://hl7.org/fhir/STU3/datatypes.html#unsignedInt)
pub type UnsignedInt = Element<u32, Extension>;

/// FHIR primitive type Uri
///
/// See: [uri](http://hl7.org/fhir/STU3/datatypes.html#uri)
pub type Uri = Element<std::string::String, Extension>;

/// FHIR primitive type Uuid
///
/// See: [uuid](http://hl7.org/fhir/STU3/datatypes.html#uuid)
pub type Uuid = Element<std::string::String, Extension>;

/// FHIR primitive type Xhtml
///
/// See: [xhtml](http://hl7.org/fhir/STU3/narrative.html#xhtml)
pub type Xhtml = Element<std::string::String, Extension>;
