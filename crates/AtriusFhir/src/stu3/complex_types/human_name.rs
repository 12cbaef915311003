use atrius_macros::FhirComposite;
use crate::stu3::*;

/// FHIR HumanName type
///
/// Name of a human - parts and usage
///
/// See: [HumanName](http://hl7.org/fhir/STU3/datatypes.html#HumanName)
#[derive(Debug, Clone, PartialEq, Default, FhirComposite)]
pub struct HumanName {
    pub id: Option<String>,
    pub extension: Option<Vec<Extension>>,
    /// usual | official | temp | nickname | anonymous | old | maiden
    #[fhir_serde(rename = "use")]
    pub r#use: Option<Code>,
    /// Text representation of the full name
    pub text: Option<String>,
    /// Family name (often called 'Surname')
    pub family: Option<String>,
    /// Given names (not always 'first'). Includes middle names
    pub given: Option<Vec<String>>,
    /// Parts that come before the name
    pub prefix: Option<Vec<String>>,
    /// Parts that come after the name
    pub suffix: Option<Vec<String>>,
    /// Time period when name was/is in use
    pub period: Option<Period>,
}
