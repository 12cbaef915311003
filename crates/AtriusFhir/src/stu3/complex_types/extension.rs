use atrius_macros::{FhirChoice, FhirComposite};
use crate::stu3::*;

/// FHIR Extension type
///
/// Optional Extension Element - found in all resources. Extensions nest: an
/// extension may carry further extensions as well as a value of any type.
///
/// See: [Extension](http://hl7.org/fhir/STU3/extensibility.html#Extension)
#[derive(Debug, Clone, PartialEq, Default, FhirComposite)]
pub struct Extension {
    /// Unique id for inter-element referencing
    pub id: Option<String>,
    /// Additional content defined by implementations
    pub extension: Option<Vec<Extension>>,
    /// Identifies the meaning of the extension
    pub url: Option<Uri>,
    /// Value of extension
    #[fhir_serde(flatten)]
    pub value: Option<ExtensionValue>,
}

/// Choice of types for the value\[x\] field in Extension
#[derive(Debug, Clone, PartialEq, FhirChoice)]
pub enum ExtensionValue {
    Base64Binary(Base64Binary),
    Boolean(Boolean),
    Code(Code),
    Date(Date),
    DateTime(DateTime),
    Decimal(Decimal),
    Id(Id),
    Instant(Instant),
    Integer(Integer),
    Markdown(Markdown),
    Oid(Oid),
    PositiveInt(PositiveInt),
    String(String),
    Time(Time),
    UnsignedInt(UnsignedInt),
    Uri(Uri),
    Attachment(Attachment),
    CodeableConcept(CodeableConcept),
    Coding(Coding),
    ContactPoint(ContactPoint),
    HumanName(HumanName),
    Identifier(Identifier),
    Period(Period),
    Quantity(Quantity),
    Range(Range),
    Reference(Reference),
}

impl Extension {
    /// Creates an extension with a url and a value.
    pub fn new(url: &str, value: ExtensionValue) -> Self {
        Self {
            url: Some(Uri::new(url.to_string())),
            value: Some(value),
            ..Default::default()
        }
    }
}
