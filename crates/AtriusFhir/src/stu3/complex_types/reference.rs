use atrius_macros::FhirComposite;
use crate::stu3::*;

/// FHIR Reference type
///
/// A reference from one resource to another
///
/// See: [Reference](http://hl7.org/fhir/STU3/references.html#Reference)
#[derive(Debug, Clone, PartialEq, Default, FhirComposite)]
pub struct Reference {
    pub id: Option<String>,
    pub extension: Option<Vec<Extension>>,
    /// Literal reference, Relative, internal or absolute URL
    pub reference: Option<String>,
    /// Logical reference, when literal reference is not known
    pub identifier: Option<Identifier>,
    /// Text alternative for the resource
    pub display: Option<String>,
}
