//! FHIR object model consumed by the JSON codec.
//!
//! - [`Element`] holds a primitive value with its optional id and extensions.
//! - [`PreciseDecimal`] and the [`date_time`] types keep the precision of
//!   decimal and temporal values.
//! - [`schema`] describes composite types through static descriptor tables.
//! - Release catalogs (currently [`stu3`]) define the concrete types.

pub mod precise_decimal;
pub mod date_time;
pub mod primitives;
pub mod schema;
#[cfg(feature = "STU3")]
pub mod stu3;
mod element;

pub use element::Element;
pub use precise_decimal::PreciseDecimal;
pub use primitives::{JsonShape, PrimitiveKind, Scalar, ScalarType, ScalarValue};
pub use schema::{
    Catalog, ChoiceType, Composite, Datum, DatumRef, Described, FieldRef, FieldValue,
    PrimitiveData, PrimitiveElement, SchemaError, TypeSchema,
};

// Lets the derives refer to `::atrius_fhir_lib` from inside this crate too.
extern crate self as atrius_fhir_lib;
