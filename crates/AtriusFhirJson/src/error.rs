use atrius_fhir_lib::{JsonShape, PrimitiveKind, SchemaError};
use thiserror::Error;

use crate::path::NodePath;

/// Result type used throughout the codec.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors raised while marshalling or unmarshalling FHIR JSON.
///
/// Failures found inside a tree are wrapped once in [`CodecError::Structural`]
/// carrying the path of the offending node; [`CodecError::cause`] gives the
/// underlying error back.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Primitive text does not match the kind's regular expression.
    #[error("{kind} value {input:?} does not match regex {pattern}")]
    GrammarViolation {
        kind: PrimitiveKind,
        pattern: &'static str,
        input: String,
    },

    #[error("{kind} value must not be empty")]
    EmptyValue { kind: PrimitiveKind },

    #[error("{kind} value {input} is outside the {bounds} range")]
    RangeOverflow {
        kind: PrimitiveKind,
        bounds: &'static str,
        input: String,
    },

    /// The JSON value has the wrong shape for its position in the schema.
    #[error("expected a JSON {expected}, got {actual}")]
    TypeMismatch {
        expected: JsonShape,
        actual: JsonShape,
    },

    /// More than one key populates the same choice field.
    #[error("choice field {field}[x] is set by both {first} and {second}")]
    AmbiguousChoice {
        field: String,
        first: String,
        second: String,
    },

    #[error("choice field {field}[x] has no alternative {suffix:?}")]
    UnknownVariant { field: String, suffix: String },

    /// Rejected under [`UnknownFieldPolicy::Reject`](crate::UnknownFieldPolicy::Reject).
    #[error("{type_name} has no field {field:?}")]
    UnknownField {
        type_name: &'static str,
        field: String,
    },

    #[error("{kind} does not support {precision} precision")]
    UnsupportedPrecision {
        kind: PrimitiveKind,
        precision: String,
    },

    #[error("no codec is implemented for {kind}")]
    UnimplementedCodec { kind: PrimitiveKind },

    #[error("{kind} values carry no timezone, found zone {zone}")]
    TimezoneNotAllowed { kind: PrimitiveKind, zone: String },

    /// The text passed the grammar but does not denote a real value
    /// (e.g. `2019-02-30`).
    #[error("{input:?} is not a valid {kind}")]
    InvalidValue { kind: PrimitiveKind, input: String },

    #[error("_{field} has {found} entries but {field} has {expected}")]
    UnderscoreLength {
        field: String,
        expected: usize,
        found: usize,
    },

    #[error("resourceType {found:?} does not match {expected}")]
    ResourceTypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("document has no resourceType")]
    MissingResourceType,

    #[error("unknown resourceType {0:?}")]
    UnknownResourceType(String),

    #[error("catalog has no type {0:?}")]
    UnknownType(String),

    #[error("nesting exceeds the depth limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("[{path}] {source}")]
    Structural {
        path: String,
        source: Box<CodecError>,
    },
}

impl CodecError {
    /// Attaches a node path, unless the error already carries one.
    pub(crate) fn at(self, path: &NodePath) -> Self {
        match self {
            CodecError::Structural { .. } => self,
            other => CodecError::Structural {
                path: path.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// The error without its path annotation.
    pub fn cause(&self) -> &CodecError {
        match self {
            CodecError::Structural { source, .. } => source,
            other => other,
        }
    }

    /// Path of the node that failed, e.g. `/name[0]/given[1]/`.
    pub fn path(&self) -> Option<&str> {
        match self {
            CodecError::Structural { path, .. } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_is_attached_once() {
        let inner = NodePath::root().index("name", 0).index("given", 1);
        let outer = NodePath::root().index("name", 0);
        let err = CodecError::EmptyValue {
            kind: PrimitiveKind::String,
        }
        .at(&inner)
        .at(&outer);
        assert_eq!(err.path(), Some("/name[0]/given[1]/"));
        assert!(matches!(err.cause(), CodecError::EmptyValue { .. }));
        assert_eq!(err.to_string(), "[/name[0]/given[1]/] string value must not be empty");
    }

    #[test]
    fn test_unannotated_error_is_its_own_cause() {
        let err = CodecError::MissingResourceType;
        assert!(err.path().is_none());
        assert!(matches!(err.cause(), CodecError::MissingResourceType));
    }
}
