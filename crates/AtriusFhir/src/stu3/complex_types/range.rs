use atrius_macros::FhirComposite;
use crate::stu3::*;

/// FHIR Range type
///
/// Set of values bounded by low and high
///
/// See: [Range](http://hl7.org/fhir/STU3/datatypes.html#Range)
#[derive(Debug, Clone, PartialEq, Default, FhirComposite)]
pub struct Range {
    pub id: Option<String>,
    pub extension: Option<Vec<Extension>>,
    /// Low limit
    pub low: Option<Quantity>,
    /// High limit
    pub high: Option<Quantity>,
}
