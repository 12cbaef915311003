use atrius_macros::FhirComposite;
use crate::stu3::*;

/// FHIR Meta type
///
/// Metadata about a resource
///
/// See: [Meta](http://hl7.org/fhir/STU3/resource.html#Meta)
#[derive(Debug, Clone, PartialEq, Default, FhirComposite)]
pub struct Meta {
    pub id: Option<String>,
    pub extension: Option<Vec<Extension>>,
    /// Version specific identifier
    #[fhir_serde(rename = "versionId")]
    pub version_id: Option<Id>,
    /// When the resource version last changed
    #[fhir_serde(rename = "lastUpdated")]
    pub last_updated: Option<Instant>,
    /// Profiles this resource claims to conform to
    pub profile: Option<Vec<Uri>>,
    /// Security Labels applied to this resource
    pub security: Option<Vec<Coding>>,
    /// Tags applied to this resource
    pub tag: Option<Vec<Coding>>,
}
