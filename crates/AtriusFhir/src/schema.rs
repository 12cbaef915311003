//! Schema registry for composite FHIR types.
//!
//! Each composite type carries a static [`TypeSchema`]: its FHIR name, whether it
//! is a resource, and an ordered table of [`FieldDescriptor`]s. The tables are
//! emitted by the `FhirComposite` / `FhirChoice` derives, so the codec walks any
//! type through the object-safe [`Composite`] trait without knowing it
//! statically.
//!
//! Values cross that boundary in two forms:
//! - [`FieldRef`] / [`DatumRef`]: borrowed views, produced when marshalling.
//! - [`FieldValue`] / [`Datum`]: owned values, consumed when unmarshalling.

use std::any::Any;
use std::fmt;

use crate::primitives::{PrimitiveKind, Scalar, ScalarValue};

/// Builds an empty instance of a composite type.
pub type Constructor = fn() -> Box<dyn Composite>;

/// [`Constructor`] for any defaultable composite.
pub fn new_boxed<T: Composite + Default>() -> Box<dyn Composite> {
    Box::new(T::default())
}

/// The type carried by a plain field or a choice alternative.
#[derive(Debug, Clone, Copy)]
pub enum ElementType {
    Primitive(PrimitiveKind),
    Composite {
        name: &'static str,
        new: Constructor,
    },
}

impl ElementType {
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Primitive(kind) => kind.fhir_name(),
            ElementType::Composite { name, .. } => name,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, ElementType::Primitive(_))
    }
}

/// One alternative of a choice field. `name` is the PascalCase key suffix.
#[derive(Debug, Clone, Copy)]
pub struct Alternative {
    pub name: &'static str,
    pub ty: ElementType,
}

#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    Element(ElementType),
    Choice(&'static [Alternative]),
}

/// Describes one field of a composite type.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// JSON key; for choice fields this is the base key without suffix
    pub json_key: &'static str,
    /// `true` for 0..* fields
    pub repeated: bool,
    pub ty: FieldType,
}

impl FieldDescriptor {
    pub fn is_choice(&self) -> bool {
        matches!(self.ty, FieldType::Choice(_))
    }

    /// The element type of a plain field, `None` for choice fields.
    pub fn element_type(&self) -> Option<ElementType> {
        match self.ty {
            FieldType::Element(ty) => Some(ty),
            FieldType::Choice(_) => None,
        }
    }

    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self.element_type() {
            Some(ElementType::Primitive(kind)) => Some(kind),
            _ => None,
        }
    }

    pub fn alternatives(&self) -> &'static [Alternative] {
        match self.ty {
            FieldType::Choice(alternatives) => alternatives,
            FieldType::Element(_) => &[],
        }
    }

    /// Finds the alternative named by a key suffix.
    pub fn alternative(&self, name: &str) -> Option<&'static Alternative> {
        self.alternatives().iter().find(|alt| alt.name == name)
    }

    /// JSON key used when `alternative` is the active one, e.g. `deceasedBoolean`.
    pub fn choice_key(&self, alternative: &Alternative) -> String {
        format!("{}{}", self.json_key, alternative.name)
    }
}

/// How a JSON key maps onto a [`TypeSchema`].
#[derive(Debug, Clone, Copy)]
pub enum KeyResolution<'k> {
    Field(&'static FieldDescriptor),
    Choice(&'static FieldDescriptor, &'static Alternative),
    /// A choice field's base key followed by an unrecognised type suffix
    UnknownVariant {
        field: &'static FieldDescriptor,
        suffix: &'k str,
    },
    Unknown,
}

/// Static description of a composite type.
#[derive(Debug)]
pub struct TypeSchema {
    pub name: &'static str,
    /// Resources get a `resourceType` member in JSON
    pub resource: bool,
    pub fields: &'static [FieldDescriptor],
}

impl TypeSchema {
    pub fn field(&'static self, json_key: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.json_key == json_key)
    }

    /// Resolves a JSON key, stripping choice suffixes.
    ///
    /// Plain fields win over choice prefixes, so a `valueSet` field is never
    /// read as the `value[x]` alternative `Set`.
    pub fn resolve<'k>(&'static self, key: &'k str) -> KeyResolution<'k> {
        if let Some(field) = self
            .fields
            .iter()
            .find(|field| !field.is_choice() && field.json_key == key)
        {
            return KeyResolution::Field(field);
        }
        for field in self.fields.iter().filter(|field| field.is_choice()) {
            let Some(suffix) = key.strip_prefix(field.json_key) else {
                continue;
            };
            if !suffix.starts_with(|c: char| c.is_ascii_uppercase()) {
                continue;
            }
            return match field.alternative(suffix) {
                Some(alternative) => KeyResolution::Choice(field, alternative),
                None => KeyResolution::UnknownVariant { field, suffix },
            };
        }
        KeyResolution::Unknown
    }
}

/// Static access to a type's schema, implemented by the derives.
pub trait Described {
    fn type_schema() -> &'static TypeSchema;
}

/// A composite FHIR value (complex type or resource), walked generically.
pub trait Composite: Any + fmt::Debug + Send + Sync {
    fn schema(&self) -> &'static TypeSchema;

    /// Borrowed view of the field with the given (base) JSON key.
    fn field(&self, json_key: &str) -> FieldRef<'_>;

    /// Stores a decoded value into the field with the given (base) JSON key.
    fn set_field(&mut self, json_key: &str, value: FieldValue) -> Result<(), SchemaError>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// FHIR name of the type, e.g. `HumanName`.
    fn type_name(&self) -> &'static str {
        self.schema().name
    }

    fn is_resource(&self) -> bool {
        self.schema().resource
    }
}

impl dyn Composite {
    pub fn downcast_ref<T: Composite>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Moves a boxed composite back into its concrete type.
pub fn downcast_composite<T: Composite + Described>(
    value: Box<dyn Composite>,
) -> Result<T, SchemaError> {
    let found = value.type_name();
    value
        .into_any()
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| SchemaError::WrongComposite {
            expected: T::type_schema().name,
            found,
        })
}

/// A primitive element seen through the codec: value plus id and extensions.
pub trait PrimitiveElement: fmt::Debug + Send + Sync {
    /// `None` when the element carries only an id and/or extensions.
    fn scalar(&self) -> Option<Scalar<'_>>;

    fn element_id(&self) -> Option<&str>;

    fn extensions(&self) -> Vec<&dyn Composite>;
}

/// Borrowed single value of a field.
#[derive(Debug, Clone, Copy)]
pub enum DatumRef<'a> {
    Primitive(&'a dyn PrimitiveElement),
    Composite(&'a dyn Composite),
}

/// Owned primitive data, before it is typed into an `Element`.
#[derive(Debug, Default)]
pub struct PrimitiveData {
    pub value: Option<ScalarValue>,
    pub id: Option<String>,
    pub extension: Vec<Box<dyn Composite>>,
}

impl PrimitiveData {
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.id.is_none() && self.extension.is_empty()
    }
}

/// Owned single value of a field.
#[derive(Debug)]
pub enum Datum {
    Primitive(PrimitiveData),
    Composite(Box<dyn Composite>),
}

impl Datum {
    pub fn into_primitive(self) -> Result<PrimitiveData, SchemaError> {
        match self {
            Datum::Primitive(data) => Ok(data),
            Datum::Composite(composite) => Err(SchemaError::ExpectedPrimitive {
                found: composite.type_name(),
            }),
        }
    }

    pub fn into_composite<T: Composite + Described>(self) -> Result<T, SchemaError> {
        match self {
            Datum::Composite(composite) => downcast_composite(composite),
            Datum::Primitive(_) => Err(SchemaError::ExpectedComposite {
                expected: T::type_schema().name,
            }),
        }
    }
}

/// Borrowed view of a whole field.
#[derive(Debug)]
pub enum FieldRef<'a> {
    Absent,
    Single(DatumRef<'a>),
    Repeated(Vec<DatumRef<'a>>),
    Choice {
        variant: &'static str,
        datum: DatumRef<'a>,
    },
}

impl<'a> FieldRef<'a> {
    pub fn from_option<T: AsDatum>(value: &'a Option<T>) -> Self {
        match value {
            Some(value) => FieldRef::Single(value.as_datum()),
            None => FieldRef::Absent,
        }
    }

    /// Empty vectors count as absent.
    pub fn from_repeated<T: AsDatum>(values: &'a Option<Vec<T>>) -> Self {
        match values {
            Some(values) if !values.is_empty() => {
                FieldRef::Repeated(values.iter().map(AsDatum::as_datum).collect())
            }
            _ => FieldRef::Absent,
        }
    }

    pub fn from_choice<C: ChoiceType>(value: &'a Option<C>) -> Self {
        match value {
            Some(choice) => {
                let (variant, datum) = choice.active_variant();
                FieldRef::Choice { variant, datum }
            }
            None => FieldRef::Absent,
        }
    }
}

/// Owned value for a whole field, handed to [`Composite::set_field`].
#[derive(Debug)]
pub enum FieldValue {
    Single(Datum),
    Repeated(Vec<Datum>),
    Choice {
        variant: &'static str,
        datum: Datum,
    },
}

impl FieldValue {
    fn describe(&self) -> &'static str {
        match self {
            FieldValue::Single(_) => "a single value",
            FieldValue::Repeated(_) => "a list",
            FieldValue::Choice { .. } => "a choice alternative",
        }
    }

    fn cardinality_error(self, field: &str, expected: &'static str) -> SchemaError {
        SchemaError::Cardinality {
            field: field.to_string(),
            expected,
            found: self.describe(),
        }
    }

    pub fn into_single<T: FromDatum>(self, field: &str) -> Result<T, SchemaError> {
        match self {
            FieldValue::Single(datum) => T::from_datum(datum),
            other => Err(other.cardinality_error(field, "a single value")),
        }
    }

    pub fn into_repeated<T: FromDatum>(self, field: &str) -> Result<Vec<T>, SchemaError> {
        match self {
            FieldValue::Repeated(items) => items.into_iter().map(T::from_datum).collect(),
            other => Err(other.cardinality_error(field, "a list")),
        }
    }

    pub fn into_choice<C: ChoiceType>(self, field: &str) -> Result<C, SchemaError> {
        match self {
            FieldValue::Choice { variant, datum } => C::from_variant(variant, datum),
            other => Err(other.cardinality_error(field, "a choice alternative")),
        }
    }
}

/// Types that can be viewed as a [`DatumRef`].
pub trait AsDatum {
    fn as_datum(&self) -> DatumRef<'_>;
}

/// Types that can be rebuilt from a [`Datum`].
pub trait FromDatum: Sized {
    fn from_datum(datum: Datum) -> Result<Self, SchemaError>;
}

impl<T: AsDatum> AsDatum for Box<T> {
    fn as_datum(&self) -> DatumRef<'_> {
        (**self).as_datum()
    }
}

impl<T: FromDatum> FromDatum for Box<T> {
    fn from_datum(datum: Datum) -> Result<Self, SchemaError> {
        T::from_datum(datum).map(Box::new)
    }
}

/// A choice (`[x]`) field: a sum type with one variant per alternative.
pub trait ChoiceType: Sized {
    const ALTERNATIVES: &'static [Alternative];

    /// Suffix name and value of the populated alternative.
    fn active_variant(&self) -> (&'static str, DatumRef<'_>);

    fn from_variant(variant: &str, datum: Datum) -> Result<Self, SchemaError>;
}

/// A set of composite types, addressable by name.
pub trait Catalog: Send + Sync {
    /// FHIR release the catalog follows, e.g. `STU3`.
    fn version(&self) -> &'static str;

    fn new_instance(&self, type_name: &str) -> Option<Box<dyn Composite>>;

    /// Name of the type used for extensions in underscore records.
    fn extension_type(&self) -> &'static str {
        "Extension"
    }

    fn is_resource(&self, type_name: &str) -> bool {
        self.new_instance(type_name)
            .is_some_and(|instance| instance.is_resource())
    }
}

/// Failure to move a value into or out of a typed composite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    UnknownField {
        type_name: &'static str,
        field: String,
    },
    Cardinality {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    ExpectedPrimitive {
        found: &'static str,
    },
    ExpectedComposite {
        expected: &'static str,
    },
    WrongComposite {
        expected: &'static str,
        found: &'static str,
    },
    UnknownVariant {
        choice: &'static str,
        variant: String,
    },
    ScalarMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::UnknownField { type_name, field } => {
                write!(f, "{} has no field {:?}", type_name, field)
            }
            SchemaError::Cardinality {
                field,
                expected,
                found,
            } => write!(f, "field {} expects {}, got {}", field, expected, found),
            SchemaError::ExpectedPrimitive { found } => {
                write!(f, "expected a primitive, got composite {}", found)
            }
            SchemaError::ExpectedComposite { expected } => {
                write!(f, "expected composite {}, got a primitive", expected)
            }
            SchemaError::WrongComposite { expected, found } => {
                write!(f, "expected composite {}, got {}", expected, found)
            }
            SchemaError::UnknownVariant { choice, variant } => {
                write!(f, "{} has no alternative {:?}", choice, variant)
            }
            SchemaError::ScalarMismatch { expected, found } => {
                write!(f, "expected a {} value, got {}", expected, found)
            }
        }
    }
}

impl std::error::Error for SchemaError {}

#[cfg(all(test, feature = "STU3"))]
mod tests {
    use super::*;
    use crate::stu3::{Observation, Patient};

    #[test]
    fn test_resolve_plain_and_choice_keys() {
        let schema = Patient::type_schema();
        assert!(matches!(schema.resolve("active"), KeyResolution::Field(f) if f.json_key == "active"));
        match schema.resolve("deceasedBoolean") {
            KeyResolution::Choice(field, alternative) => {
                assert_eq!(field.json_key, "deceased");
                assert_eq!(alternative.name, "Boolean");
                assert!(alternative.ty.is_primitive());
            }
            other => panic!("unexpected resolution {other:?}"),
        }
        assert!(matches!(
            schema.resolve("deceasedString"),
            KeyResolution::UnknownVariant { suffix: "String", .. }
        ));
        assert!(matches!(schema.resolve("deceased"), KeyResolution::Unknown));
        assert!(matches!(schema.resolve("nickname"), KeyResolution::Unknown));
    }

    #[test]
    fn test_schema_flags() {
        let schema = Observation::type_schema();
        assert!(schema.resource);
        let value = schema.field("value").unwrap();
        assert!(value.is_choice());
        assert!(value.alternative("Quantity").is_some());
        assert_eq!(value.choice_key(value.alternative("Quantity").unwrap()), "valueQuantity");
    }

    #[test]
    fn test_downcast_reports_types() {
        let boxed = new_boxed::<Patient>();
        let err = downcast_composite::<Observation>(boxed).unwrap_err();
        assert_eq!(
            err,
            SchemaError::WrongComposite {
                expected: "Observation",
                found: "Patient"
            }
        );
    }
}
