use atrius_macros::FhirComposite;
use crate::stu3::*;

/// FHIR Coding type
///
/// A reference to a code defined by a terminology system
///
/// See: [Coding](http://hl7.org/fhir/STU3/datatypes.html#Coding)
#[derive(Debug, Clone, PartialEq, Default, FhirComposite)]
pub struct Coding {
    pub id: Option<String>,
    pub extension: Option<Vec<Extension>>,
    /// Identity of the terminology system
    pub system: Option<Uri>,
    /// Version of the system - if relevant
    pub version: Option<String>,
    /// Symbol in syntax defined by the system
    pub code: Option<Code>,
    /// Representation defined by the system
    pub display: Option<String>,
    /// If this coding was chosen directly by the user
    #[fhir_serde(rename = "userSelected")]
    pub user_selected: Option<Boolean>,
}
