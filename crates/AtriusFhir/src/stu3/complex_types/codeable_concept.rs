use atrius_macros::FhirComposite;
use crate::stu3::*;

/// FHIR CodeableConcept type
///
/// Concept - reference to a terminology or just text
///
/// See: [CodeableConcept](http://hl7.org/fhir/STU3/datatypes.html#CodeableConcept)
#[derive(Debug, Clone, PartialEq, Default, FhirComposite)]
pub struct CodeableConcept {
    pub id: Option<String>,
    pub extension: Option<Vec<Extension>>,
    /// Code defined by a terminology system
    pub coding: Option<Vec<Coding>>,
    /// Plain text representation of the concept
    pub text: Option<String>,
}
