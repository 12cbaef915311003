use atrius_macros::FhirComposite;
use crate::stu3::*;

/// FHIR Period type
///
/// Time range defined by start and end date/time
///
/// See: [Period](http://hl7.org/fhir/STU3/datatypes.html#Period)
#[derive(Debug, Clone, PartialEq, Default, FhirComposite)]
pub struct Period {
    pub id: Option<String>,
    pub extension: Option<Vec<Extension>>,
    /// Starting time with inclusive boundary
    pub start: Option<DateTime>,
    /// End time with inclusive boundary, if not ongoing
    pub end: Option<DateTime>,
}
