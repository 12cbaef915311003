use crate::primitives::{Scalar, ScalarType};
use crate::schema::{
    AsDatum, Composite, Datum, DatumRef, Described, FromDatum, PrimitiveElement, SchemaError,
    downcast_composite,
};

/// Generic element container supporting FHIR's extension mechanism.
///
/// In FHIR, most primitive elements can be extended with additional metadata
/// through the `id` and `extension` fields. This container type provides
/// the infrastructure to support this pattern across all FHIR data types.
///
/// # Type Parameters
///
/// * `V` - The value type (e.g., `String`, `i32`, `PreciseDecimal`)
/// * `E` - The extension type (typically the catalog's `Extension` struct)
///
/// # FHIR Element Structure
///
/// FHIR elements can appear in three forms:
/// 1. **Primitive value**: Just the value itself (e.g., `"text"`, `42`)
/// 2. **Extended primitive**: A value plus an `id` and/or `extension`, written
///    in JSON as the value under `key` and the rest under `_key`
/// 3. **Extension-only**: Just `id` and/or `extension` (no value)
///
/// # Examples
///
/// ```rust
/// use atrius_fhir_lib::stu3::{Boolean, Extension};
///
/// // Simple primitive value
/// let simple = Boolean::new(true);
/// assert_eq!(simple.value, Some(true));
///
/// // Extended primitive with ID
/// let with_id = Boolean::new(true).with_id("is-active");
/// assert_eq!(with_id.id.as_deref(), Some("is-active"));
///
/// // Extension-only element (no value)
/// let extension_only = Boolean {
///     value: None,
///     id: None,
///     extension: Some(vec![Extension::default()]),
/// };
/// assert!(!extension_only.is_empty());
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Element<V, E> {
    /// Optional element identifier for referencing within the resource
    pub id: Option<String>,
    /// Optional extensions providing additional metadata
    pub extension: Option<Vec<E>>,
    /// The actual primitive value
    pub value: Option<V>,
}

impl<V, E> Element<V, E> {
    /// Creates an element holding just a value.
    pub fn new(value: V) -> Self {
        Self {
            id: None,
            extension: None,
            value: Some(value),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_extension(mut self, extension: Vec<E>) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Returns `true` if no value, id, or extensions are present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.id.is_none() && self.extension.is_none()
    }
}

impl<V, E> From<V> for Element<V, E> {
    fn from(value: V) -> Self {
        Self::new(value)
    }
}

impl<V: ScalarType, E: Composite> PrimitiveElement for Element<V, E> {
    fn scalar(&self) -> Option<Scalar<'_>> {
        self.value.as_ref().map(ScalarType::as_scalar)
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extensions(&self) -> Vec<&dyn Composite> {
        self.extension
            .iter()
            .flatten()
            .map(|extension| extension as &dyn Composite)
            .collect()
    }
}

impl<V: ScalarType, E: Composite> AsDatum for Element<V, E> {
    fn as_datum(&self) -> DatumRef<'_> {
        DatumRef::Primitive(self)
    }
}

impl<V: ScalarType, E: Composite + Described> FromDatum for Element<V, E> {
    fn from_datum(datum: Datum) -> Result<Self, SchemaError> {
        let data = datum.into_primitive()?;
        let value = data
            .value
            .map(|scalar| {
                V::from_scalar(scalar).map_err(|other| SchemaError::ScalarMismatch {
                    expected: V::REPRESENTATION,
                    found: other.representation(),
                })
            })
            .transpose()?;
        let extension = if data.extension.is_empty() {
            None
        } else {
            Some(
                data.extension
                    .into_iter()
                    .map(downcast_composite::<E>)
                    .collect::<Result<Vec<_>, _>>()?,
            )
        };
        Ok(Element {
            id: data.id,
            extension,
            value,
        })
    }
}
