use atrius_macros::{FhirChoice, FhirComposite};
use crate::stu3::*;

/// FHIR Patient resource
///
/// Information about an individual or animal receiving health care services
///
/// See: [Patient](http://hl7.org/fhir/STU3/patient.html)
#[derive(Debug, Clone, PartialEq, Default, FhirComposite)]
#[fhir_resource]
pub struct Patient {
    /// Logical id of this artifact
    pub id: Option<Id>,
    /// Metadata about the resource
    pub meta: Option<Meta>,
    /// A set of rules under which this content was created
    #[fhir_serde(rename = "implicitRules")]
    pub implicit_rules: Option<Uri>,
    /// Language of the resource content
    pub language: Option<Code>,
    /// Text summary of the resource, for human interpretation
    pub text: Option<Narrative>,
    /// Additional content defined by implementations
    pub extension: Option<Vec<Extension>>,
    /// Extensions that cannot be ignored
    #[fhir_serde(rename = "modifierExtension")]
    pub modifier_extension: Option<Vec<Extension>>,
    /// An identifier for this patient
    pub identifier: Option<Vec<Identifier>>,
    /// Whether this patient's record is in active use
    pub active: Option<Boolean>,
    /// A name associated with the patient
    pub name: Option<Vec<HumanName>>,
    /// A contact detail for the individual
    pub telecom: Option<Vec<ContactPoint>>,
    /// male | female | other | unknown
    pub gender: Option<Code>,
    /// The date of birth for the individual
    #[fhir_serde(rename = "birthDate")]
    pub birth_date: Option<Date>,
    /// Indicates if the individual is deceased or not
    #[fhir_serde(flatten)]
    pub deceased: Option<PatientDeceased>,
    /// Whether patient is part of a multiple birth
    #[fhir_serde(flatten)]
    pub multiple_birth: Option<PatientMultipleBirth>,
    /// Image of the patient
    pub photo: Option<Vec<Attachment>>,
    /// Patient's nominated primary care provider
    #[fhir_serde(rename = "generalPractitioner")]
    pub general_practitioner: Option<Vec<Reference>>,
    /// Organization that is the custodian of the patient record
    #[fhir_serde(rename = "managingOrganization")]
    pub managing_organization: Option<Reference>,
}

/// Choice of types for the deceased\[x\] field in Patient
#[derive(Debug, Clone, PartialEq, FhirChoice)]
pub enum PatientDeceased {
    Boolean(Boolean),
    DateTime(DateTime),
}

/// Choice of types for the multipleBirth\[x\] field in Patient
#[derive(Debug, Clone, PartialEq, FhirChoice)]
pub enum PatientMultipleBirth {
    Boolean(Boolean),
    Integer(Integer),
}
