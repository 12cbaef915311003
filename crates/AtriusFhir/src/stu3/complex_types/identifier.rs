use atrius_macros::FhirComposite;
use crate::stu3::*;

/// FHIR Identifier type
///
/// An identifier intended for computation
///
/// See: [Identifier](http://hl7.org/fhir/STU3/datatypes.html#Identifier)
#[derive(Debug, Clone, PartialEq, Default, FhirComposite)]
pub struct Identifier {
    pub id: Option<String>,
    pub extension: Option<Vec<Extension>>,
    /// usual | official | temp | secondary (If known)
    #[fhir_serde(rename = "use")]
    pub r#use: Option<Code>,
    /// Description of identifier
    #[fhir_serde(rename = "type")]
    pub r#type: Option<CodeableConcept>,
    /// The namespace for the identifier value
    pub system: Option<Uri>,
    /// The value that is unique
    pub value: Option<String>,
    /// Time period when id is/was valid for use
    pub period: Option<Period>,
    /// Organization that issued id (may be just text)
    pub assigner: Option<Box<Reference>>,
}
