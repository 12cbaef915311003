use atrius_macros::FhirComposite;
use crate::stu3::*;

/// FHIR Quantity type
///
/// A measured or measurable amount
///
/// See: [Quantity](http://hl7.org/fhir/STU3/datatypes.html#Quantity)
#[derive(Debug, Clone, PartialEq, Default, FhirComposite)]
pub struct Quantity {
    pub id: Option<String>,
    pub extension: Option<Vec<Extension>>,
    /// Numerical value (with implicit precision)
    pub value: Option<Decimal>,
    /// < | <= | >= | > - how to understand the value
    pub comparator: Option<Code>,
    /// Unit representation
    pub unit: Option<String>,
    /// System that defines coded unit form
    pub system: Option<Uri>,
    /// Coded form of the unit
    pub code: Option<Code>,
}
