use atrius_macros::FhirComposite;
use crate::stu3::*;

/// FHIR PaymentNotice resource
///
/// PaymentNotice request
///
/// See: [PaymentNotice](http://hl7.org/fhir/STU3/paymentnotice.html)
#[derive(Debug, Clone, PartialEq, Default, FhirComposite)]
#[fhir_resource]
pub struct PaymentNotice {
    pub id: Option<Id>,
    pub meta: Option<Meta>,
    #[fhir_serde(rename = "implicitRules")]
    pub implicit_rules: Option<Uri>,
    pub language: Option<Code>,
    pub text: Option<Narrative>,
    pub extension: Option<Vec<Extension>>,
    #[fhir_serde(rename = "modifierExtension")]
    pub modifier_extension: Option<Vec<Extension>>,
    /// Business Identifier for the payment notice
    pub identifier: Option<Vec<Identifier>>,
    /// active | cancelled | draft | entered-in-error
    pub status: Option<Code>,
    /// Request reference
    pub request: Option<Reference>,
    /// Response reference
    pub response: Option<Reference>,
    /// Payment or clearing date
    #[fhir_serde(rename = "statusDate")]
    pub status_date: Option<Date>,
    /// Creation date
    pub created: Option<DateTime>,
    /// Insurer or Regulatory body
    pub target: Option<Reference>,
    /// Responsible practitioner
    pub provider: Option<Reference>,
    /// Responsible organization
    pub organization: Option<Reference>,
    /// Whether payment has been sent or cleared
    #[fhir_serde(rename = "paymentStatus")]
    pub payment_status: Option<CodeableConcept>,
}
