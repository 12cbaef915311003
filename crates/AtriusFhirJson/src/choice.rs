//! Choice (`[x]`) field resolution, shared by the builder and the walker.

use std::collections::HashMap;

use atrius_fhir_lib::schema::{Alternative, FieldDescriptor};
use tracing::trace;

use crate::error::{CodecError, Result};

/// Finds the alternative behind a populated choice variant and the JSON key
/// it is written under, e.g. `deceased` + `Boolean` → `deceasedBoolean`.
pub(crate) fn active_alternative(
    field: &'static FieldDescriptor,
    variant: &str,
) -> Result<(&'static Alternative, String)> {
    let alternative = field
        .alternative(variant)
        .ok_or_else(|| unknown_variant(field, variant))?;
    let key = field.choice_key(alternative);
    trace!(field = field.json_key, key = %key, "resolved choice alternative");
    Ok((alternative, key))
}

pub(crate) fn unknown_variant(field: &FieldDescriptor, suffix: &str) -> CodecError {
    CodecError::UnknownVariant {
        field: field.json_key.to_string(),
        suffix: suffix.to_string(),
    }
}

/// Remembers which key populated each choice field of one JSON object, so a
/// second alternative for the same field is reported instead of overwriting
/// the first.
#[derive(Debug, Default)]
pub(crate) struct ChoiceSeen<'k> {
    keys: HashMap<&'static str, &'k str>,
}

impl<'k> ChoiceSeen<'k> {
    pub(crate) fn record(&mut self, field: &'static FieldDescriptor, key: &'k str) -> Result<()> {
        match self.keys.insert(field.json_key, key) {
            Some(previous) if previous != key => Err(CodecError::AmbiguousChoice {
                field: field.json_key.to_string(),
                first: previous.to_string(),
                second: key.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(all(test, feature = "STU3"))]
mod tests {
    use super::*;
    use atrius_fhir_lib::Described;
    use atrius_fhir_lib::stu3::Patient;

    fn deceased() -> &'static FieldDescriptor {
        Patient::type_schema().field("deceased").unwrap()
    }

    #[test]
    fn test_active_alternative_key() {
        let (alternative, key) = active_alternative(deceased(), "DateTime").unwrap();
        assert_eq!(alternative.name, "DateTime");
        assert_eq!(key, "deceasedDateTime");
        assert!(matches!(
            active_alternative(deceased(), "String"),
            Err(CodecError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn test_second_alternative_is_ambiguous() {
        let mut seen = ChoiceSeen::default();
        seen.record(deceased(), "deceasedBoolean").unwrap();
        seen.record(deceased(), "deceasedBoolean").unwrap();
        let err = seen.record(deceased(), "deceasedDateTime").unwrap_err();
        assert_eq!(
            err.to_string(),
            "choice field deceased[x] is set by both deceasedBoolean and deceasedDateTime"
        );
    }
}
