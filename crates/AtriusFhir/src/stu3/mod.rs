//! FHIR STU3 (3.0.x) data model.
//!
//! Covers the primitive types, the general-purpose complex types used by the
//! bundled resources, and the `Patient`, `Observation` and `PaymentNotice`
//! resources. Every composite is registered in [`Stu3Catalog`] under its FHIR
//! name.

pub mod primitives;
pub use primitives::*;

pub mod complex_types;
pub use complex_types::*;

pub mod resources;
pub use resources::*;

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::schema::{new_boxed, Catalog, Composite, Constructor};

static CONSTRUCTORS: Lazy<HashMap<&'static str, Constructor>> = Lazy::new(|| {
    let entries: [(&'static str, Constructor); 16] = [
        ("Attachment", new_boxed::<Attachment>),
        ("CodeableConcept", new_boxed::<CodeableConcept>),
        ("Coding", new_boxed::<Coding>),
        ("ContactPoint", new_boxed::<ContactPoint>),
        ("Extension", new_boxed::<Extension>),
        ("HumanName", new_boxed::<HumanName>),
        ("Identifier", new_boxed::<Identifier>),
        ("Meta", new_boxed::<Meta>),
        ("Narrative", new_boxed::<Narrative>),
        ("Period", new_boxed::<Period>),
        ("Quantity", new_boxed::<Quantity>),
        ("Range", new_boxed::<Range>),
        ("Reference", new_boxed::<Reference>),
        ("Observation", new_boxed::<Observation>),
        ("Patient", new_boxed::<Patient>),
        ("PaymentNotice", new_boxed::<PaymentNotice>),
    ];
    entries.into_iter().collect()
});

/// Registry of the STU3 composite types.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stu3Catalog;

impl Stu3Catalog {
    /// FHIR names of all registered types, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = CONSTRUCTORS.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Catalog for Stu3Catalog {
    fn version(&self) -> &'static str {
        "STU3"
    }

    fn new_instance(&self, type_name: &str) -> Option<Box<dyn Composite>> {
        CONSTRUCTORS.get(type_name).map(|new| new())
    }
}

/// The shared STU3 catalog.
pub static CATALOG: Stu3Catalog = Stu3Catalog;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_builds_registered_types() {
        let patient = CATALOG.new_instance("Patient").unwrap();
        assert_eq!(patient.type_name(), "Patient");
        assert!(patient.is_resource());
        assert!(CATALOG.is_resource("Observation"));
        assert!(!CATALOG.is_resource("HumanName"));
        assert!(CATALOG.new_instance("Basic").is_none());
    }

    #[test]
    fn test_every_registered_name_matches_its_schema() {
        for name in CATALOG.type_names() {
            let instance = CATALOG.new_instance(name).unwrap();
            assert_eq!(instance.type_name(), name);
        }
    }

    #[test]
    fn test_extension_value_alternatives() {
        use crate::schema::ChoiceType;
        let names: Vec<_> = ExtensionValue::ALTERNATIVES.iter().map(|alt| alt.name).collect();
        assert!(names.contains(&"Boolean"));
        assert!(names.contains(&"CodeableConcept"));
        assert!(!names.contains(&"Xhtml"));
    }
}
