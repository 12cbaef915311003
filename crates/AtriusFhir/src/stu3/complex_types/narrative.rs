use atrius_macros::FhirComposite;
use crate::stu3::*;

/// FHIR Narrative type
///
/// A human-readable formatted text, including images
///
/// See: [Narrative](http://hl7.org/fhir/STU3/narrative.html#Narrative)
#[derive(Debug, Clone, PartialEq, Default, FhirComposite)]
pub struct Narrative {
    pub id: Option<String>,
    pub extension: Option<Vec<Extension>>,
    /// generated | extensions | additional | empty
    pub status: Option<Code>,
    /// Limited xhtml content
    pub div: Option<Xhtml>,
}
