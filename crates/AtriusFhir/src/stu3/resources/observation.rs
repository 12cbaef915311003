use atrius_macros::{FhirChoice, FhirComposite};
use crate::stu3::*;

/// FHIR Observation resource
///
/// Measurements and simple assertions
///
/// See: [Observation](http://hl7.org/fhir/STU3/observation.html)
#[derive(Debug, Clone, PartialEq, Default, FhirComposite)]
#[fhir_resource]
pub struct Observation {
    pub id: Option<Id>,
    pub meta: Option<Meta>,
    #[fhir_serde(rename = "implicitRules")]
    pub implicit_rules: Option<Uri>,
    pub language: Option<Code>,
    pub text: Option<Narrative>,
    pub extension: Option<Vec<Extension>>,
    #[fhir_serde(rename = "modifierExtension")]
    pub modifier_extension: Option<Vec<Extension>>,
    /// Business Identifier for observation
    pub identifier: Option<Vec<Identifier>>,
    /// Fulfills plan, proposal or order
    #[fhir_serde(rename = "basedOn")]
    pub based_on: Option<Vec<Reference>>,
    /// registered | preliminary | final | amended +
    pub status: Option<Code>,
    /// Classification of  type of observation
    pub category: Option<Vec<CodeableConcept>>,
    /// Type of observation (code / type)
    pub code: Option<CodeableConcept>,
    /// Who and/or what this is about
    pub subject: Option<Reference>,
    /// Healthcare event during which this observation is made
    pub context: Option<Reference>,
    /// Clinically relevant time/time-period for observation
    #[fhir_serde(flatten)]
    pub effective: Option<ObservationEffective>,
    /// Date/Time this was made available
    pub issued: Option<Instant>,
    /// Who is responsible for the observation
    pub performer: Option<Vec<Reference>>,
    /// Actual result
    #[fhir_serde(flatten)]
    pub value: Option<ObservationValue>,
    /// Why the result is missing
    #[fhir_serde(rename = "dataAbsentReason")]
    pub data_absent_reason: Option<CodeableConcept>,
    /// High, low, normal, etc.
    pub interpretation: Option<CodeableConcept>,
    /// Comments about result
    pub comment: Option<String>,
    /// Observed body part
    #[fhir_serde(rename = "bodySite")]
    pub body_site: Option<CodeableConcept>,
    /// How it was done
    pub method: Option<CodeableConcept>,
    /// Specimen used for this observation
    pub specimen: Option<Reference>,
    /// (Measurement) Device
    pub device: Option<Reference>,
}

/// Choice of types for the effective\[x\] field in Observation
#[derive(Debug, Clone, PartialEq, FhirChoice)]
pub enum ObservationEffective {
    DateTime(DateTime),
    Period(Period),
}

/// Choice of types for the value\[x\] field in Observation
#[derive(Debug, Clone, PartialEq, FhirChoice)]
pub enum ObservationValue {
    Quantity(Quantity),
    CodeableConcept(CodeableConcept),
    String(String),
    Boolean(Boolean),
    Range(Range),
    Attachment(Attachment),
    Time(Time),
    DateTime(DateTime),
    Period(Period),
}
