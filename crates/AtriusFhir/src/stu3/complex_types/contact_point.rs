use atrius_macros::FhirComposite;
use crate::stu3::*;

/// FHIR ContactPoint type
///
/// Details of a Technology mediated contact point (phone, fax, email, etc.)
///
/// See: [ContactPoint](http://hl7.org/fhir/STU3/datatypes.html#ContactPoint)
#[derive(Debug, Clone, PartialEq, Default, FhirComposite)]
pub struct ContactPoint {
    pub id: Option<String>,
    pub extension: Option<Vec<Extension>>,
    /// phone | fax | email | pager | url | sms | other
    pub system: Option<Code>,
    /// The actual contact point details
    pub value: Option<String>,
    /// home | work | temp | old | mobile - purpose of this contact point
    #[fhir_serde(rename = "use")]
    pub r#use: Option<Code>,
    /// Specify preferred order of use (1 = highest)
    pub rank: Option<PositiveInt>,
    /// Time period when the contact point was/is in use
    pub period: Option<Period>,
}
