//! # FHIR JSON
//!
//! Bidirectional codec between the typed FHIR object model of
//! `atrius-fhir-lib` and the FHIR JSON format.
//!
//! ## Overview
//!
//! - **Marshalling** walks any [`Composite`] through its static schema and
//!   builds a sorted node [`Tree`], which serializes to compact JSON with keys
//!   in lexicographic order.
//! - **Unmarshalling** parses JSON and walks it against the schema of a target
//!   type, instantiating nested composites and extensions from a [`Catalog`].
//! - **Primitives** are validated against their FHIR grammar in both
//!   directions; see [`encode_primitive`] and [`decode_primitive`].
//!
//! ## FHIR JSON Patterns
//!
//! - `_field` records carry a primitive's `id` and `extension`; for repeated
//!   primitives they form a parallel array padded with `null`.
//! - Choice fields are written as `baseKeyTypeName`, e.g. `deceasedBoolean`.
//! - Resources carry a `resourceType` member at the root.
//! - Decimals keep their exact source text (`0.000` stays `0.000`).
//!
//! ## Example
//!
//! ```rust
//! use atrius_fhir_lib::stu3::{Boolean, Patient};
//!
//! let patient = Patient {
//!     active: Some(Boolean::new(true).with_id("is-active")),
//!     ..Default::default()
//! };
//! let json = atrius_fhir_json::marshal_to_string(&patient).unwrap();
//! assert_eq!(json, r#"{"_active":{"id":"is-active"},"active":true,"resourceType":"Patient"}"#);
//!
//! let back: Patient = atrius_fhir_json::unmarshal_into(json.as_bytes()).unwrap();
//! assert_eq!(back, patient);
//! ```

pub mod config;
pub mod error;
pub mod grammar;
pub mod path;
pub mod primitives;
pub mod tree;

mod choice;
mod marshal;
mod unmarshal;

use atrius_fhir_lib::{Catalog, Composite};
use serde_json::Value;
use tracing::debug;

pub use config::{MarshalOptions, UnknownFieldPolicy, UnmarshalOptions};
pub use error::{CodecError, Result};
pub use path::NodePath;
pub use primitives::{decode_primitive, encode_primitive};
pub use tree::{Node, Tree};

use marshal::{RESOURCE_TYPE, TreeBuilder};
use unmarshal::TreeWalker;

/// Converts typed values to FHIR JSON.
#[derive(Debug, Clone, Default)]
pub struct Marshaler {
    options: MarshalOptions,
}

impl Marshaler {
    pub fn new(options: MarshalOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MarshalOptions {
        &self.options
    }

    /// Builds the node tree of a value without serializing it.
    pub fn to_tree(&self, value: &dyn Composite) -> Result<Tree> {
        TreeBuilder::new(&self.options).build_root(value)
    }

    pub fn to_value(&self, value: &dyn Composite) -> Result<Value> {
        Ok(Node::Composite(self.to_tree(value)?).into_value())
    }

    /// Marshals a value to compact JSON bytes.
    pub fn marshal(&self, value: &dyn Composite) -> Result<Vec<u8>> {
        debug!(type_name = value.type_name(), "marshalling");
        let tree = self.to_tree(value)?;
        let bytes = serde_json::to_vec(&tree)?;
        debug!(type_name = value.type_name(), bytes = bytes.len(), "marshalled");
        Ok(bytes)
    }

    pub fn marshal_to_string(&self, value: &dyn Composite) -> Result<String> {
        let tree = self.to_tree(value)?;
        Ok(serde_json::to_string(&tree)?)
    }
}

/// Converts FHIR JSON to typed values, creating instances from a [`Catalog`].
#[derive(Clone, Copy)]
pub struct Unmarshaler<'c> {
    catalog: &'c dyn Catalog,
    options: &'c UnmarshalOptions,
}

impl<'c> Unmarshaler<'c> {
    pub fn new(catalog: &'c dyn Catalog, options: &'c UnmarshalOptions) -> Self {
        Self { catalog, options }
    }

    pub fn options(&self) -> &UnmarshalOptions {
        self.options
    }

    /// Unmarshals a document into a new instance.
    ///
    /// With a `type_hint` the instance is of that type; otherwise the
    /// document's `resourceType` selects it, and must name a resource.
    pub fn unmarshal(&self, bytes: &[u8], type_hint: Option<&str>) -> Result<Box<dyn Composite>> {
        let value: Value = serde_json::from_slice(bytes)?;
        self.from_value(&value, type_hint)
    }

    pub fn from_value(&self, value: &Value, type_hint: Option<&str>) -> Result<Box<dyn Composite>> {
        let object = root_object(value)?;
        let mut target = match type_hint {
            Some(type_name) => self
                .catalog
                .new_instance(type_name)
                .ok_or_else(|| CodecError::UnknownType(type_name.to_string()))?,
            None => self.instance_for(object)?,
        };
        debug!(
            type_name = target.type_name(),
            catalog = self.catalog.version(),
            "unmarshalling"
        );
        TreeWalker::new(self.catalog, self.options).walk_root(object, target.as_mut())?;
        Ok(target)
    }

    /// Unmarshals a document into an existing value, overwriting the fields
    /// the document sets.
    pub fn unmarshal_into(&self, bytes: &[u8], target: &mut dyn Composite) -> Result<()> {
        let value: Value = serde_json::from_slice(bytes)?;
        debug!(type_name = target.type_name(), bytes = bytes.len(), "unmarshalling");
        TreeWalker::new(self.catalog, self.options).walk_root(root_object(&value)?, target)
    }

    /// Unmarshals a document into a fresh value of a known type.
    pub fn unmarshal_as<T: Composite + Default>(&self, bytes: &[u8]) -> Result<T> {
        let mut target = T::default();
        self.unmarshal_into(bytes, &mut target)?;
        Ok(target)
    }

    fn instance_for(&self, object: &serde_json::Map<String, Value>) -> Result<Box<dyn Composite>> {
        let name = match object.get(RESOURCE_TYPE) {
            None => return Err(CodecError::MissingResourceType),
            Some(Value::String(name)) => name,
            Some(other) => {
                return Err(CodecError::TypeMismatch {
                    expected: atrius_fhir_lib::JsonShape::String,
                    actual: tree::shape_of(other),
                }
                .at(&NodePath::root().child(RESOURCE_TYPE)));
            }
        };
        self.catalog
            .new_instance(name)
            .filter(|instance| instance.is_resource())
            .ok_or_else(|| CodecError::UnknownResourceType(name.clone()))
    }
}

fn root_object(value: &Value) -> Result<&serde_json::Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        CodecError::TypeMismatch {
            expected: atrius_fhir_lib::JsonShape::Object,
            actual: tree::shape_of(value),
        }
        .at(&NodePath::root())
    })
}

/// Marshals a value to JSON bytes with default options.
pub fn marshal(value: &dyn Composite) -> Result<Vec<u8>> {
    Marshaler::default().marshal(value)
}

/// Marshals a value to a JSON string with default options.
pub fn marshal_to_string(value: &dyn Composite) -> Result<String> {
    Marshaler::default().marshal_to_string(value)
}

#[cfg(feature = "STU3")]
static DEFAULT_UNMARSHAL: once_cell::sync::Lazy<UnmarshalOptions> =
    once_cell::sync::Lazy::new(UnmarshalOptions::default);

/// Unmarshals a STU3 document with default options. See [`Unmarshaler::unmarshal`].
#[cfg(feature = "STU3")]
pub fn unmarshal(bytes: &[u8], type_hint: Option<&str>) -> Result<Box<dyn Composite>> {
    Unmarshaler::new(&atrius_fhir_lib::stu3::CATALOG, &DEFAULT_UNMARSHAL).unmarshal(bytes, type_hint)
}

/// Unmarshals a STU3 document into a value of type `T` with default options.
#[cfg(feature = "STU3")]
pub fn unmarshal_into<T: Composite + Default>(bytes: &[u8]) -> Result<T> {
    Unmarshaler::new(&atrius_fhir_lib::stu3::CATALOG, &DEFAULT_UNMARSHAL).unmarshal_as(bytes)
}
