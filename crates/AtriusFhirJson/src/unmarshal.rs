//! Unmarshal tree walker: parsed JSON objects into typed composites.
//!
//! Keys are visited in document order. A `_foo` key is read together with
//! `foo`; it is only visited on its own when `foo` is missing, in which case
//! the field gets primitives without values.

use atrius_fhir_lib::schema::{Datum, ElementType, FieldDescriptor, FieldValue, KeyResolution};
use atrius_fhir_lib::{Catalog, Composite, JsonShape, PrimitiveData, PrimitiveKind};
use serde_json::{Map, Value};
use tracing::{trace, warn};

use crate::choice::{self, ChoiceSeen};
use crate::config::{UnknownFieldPolicy, UnmarshalOptions};
use crate::error::{CodecError, Result};
use crate::marshal::RESOURCE_TYPE;
use crate::path::{FieldSlot, NodePath};
use crate::primitives;
use crate::tree::shape_of;

type Object = Map<String, Value>;

/// Type name used when reporting unknown keys inside underscore records.
const ELEMENT: &str = "Element";

fn mismatch(expected: JsonShape, actual: &Value, path: &NodePath) -> CodecError {
    CodecError::TypeMismatch {
        expected,
        actual: shape_of(actual),
    }
    .at(path)
}

/// `None` for a missing key or an explicit `null`.
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| !value.is_null())
}

pub(crate) struct TreeWalker<'a> {
    catalog: &'a dyn Catalog,
    options: &'a UnmarshalOptions,
}

impl<'a> TreeWalker<'a> {
    pub(crate) fn new(catalog: &'a dyn Catalog, options: &'a UnmarshalOptions) -> Self {
        Self { catalog, options }
    }

    /// Populates `target` from a top-level JSON object.
    pub(crate) fn walk_root(&self, object: &Object, target: &mut dyn Composite) -> Result<()> {
        let root = NodePath::root();
        if target.is_resource() && self.options.check_resource_type {
            if let Some(found) = object.get(RESOURCE_TYPE) {
                let found = found
                    .as_str()
                    .ok_or_else(|| mismatch(JsonShape::String, found, &root.child(RESOURCE_TYPE)))?;
                if found != target.type_name() {
                    return Err(CodecError::ResourceTypeMismatch {
                        expected: target.type_name(),
                        found: found.to_string(),
                    });
                }
            }
        }
        self.walk_composite(object, target, &root, 0)
    }

    fn walk_composite(
        &self,
        object: &Object,
        target: &mut dyn Composite,
        path: &NodePath,
        depth: usize,
    ) -> Result<()> {
        if depth > self.options.max_depth {
            return Err(CodecError::DepthLimitExceeded {
                limit: self.options.max_depth,
            }
            .at(path));
        }

        let schema = target.schema();
        let mut seen = ChoiceSeen::default();
        for (key, value) in object {
            if key == RESOURCE_TYPE {
                continue;
            }
            let (base, primary, extras) = match key.strip_prefix('_') {
                Some(base) if object.contains_key(base) => continue,
                Some(base) => (base, None, Some(value)),
                None => (key.as_str(), Some(value), object.get(&format!("_{}", key))),
            };
            let slot = FieldSlot::new(path, base);

            let decoded = match schema.resolve(base) {
                KeyResolution::Field(field) => {
                    let Some(ty) = field.element_type() else {
                        continue;
                    };
                    self.read_field(schema.name, field, ty, slot, primary, extras, depth)?
                        .map(|value| (field.json_key, value))
                }
                KeyResolution::Choice(field, alternative) => {
                    seen.record(field, base).map_err(|e| e.at(&slot.path()))?;
                    trace!(field = field.json_key, alternative = alternative.name, "resolved choice key");
                    self.read_single(schema.name, alternative.ty, slot, primary, extras, depth)?
                        .map(|datum| {
                            let value = FieldValue::Choice {
                                variant: alternative.name,
                                datum,
                            };
                            (field.json_key, value)
                        })
                }
                KeyResolution::UnknownVariant { field, suffix } => {
                    return Err(choice::unknown_variant(field, suffix).at(&slot.path()));
                }
                KeyResolution::Unknown => {
                    self.unknown(schema.name, key, path)?;
                    continue;
                }
            };

            if let Some((json_key, value)) = decoded {
                trace!(type_name = schema.name, field = json_key, key = base, "read field");
                target
                    .set_field(json_key, value)
                    .map_err(|e| CodecError::from(e).at(&slot.path()))?;
            }
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn read_field(
        &self,
        owner: &'static str,
        field: &FieldDescriptor,
        ty: ElementType,
        slot: FieldSlot<'_>,
        primary: Option<&Value>,
        extras: Option<&Value>,
        depth: usize,
    ) -> Result<Option<FieldValue>> {
        if field.repeated {
            Ok(self
                .read_repeated(owner, ty, slot, primary, extras, depth)?
                .map(FieldValue::Repeated))
        } else {
            Ok(self
                .read_single(owner, ty, slot, primary, extras, depth)?
                .map(FieldValue::Single))
        }
    }

    fn read_single(
        &self,
        owner: &'static str,
        ty: ElementType,
        slot: FieldSlot<'_>,
        primary: Option<&Value>,
        extras: Option<&Value>,
        depth: usize,
    ) -> Result<Option<Datum>> {
        match ty {
            ElementType::Composite { new, .. } => {
                if extras.is_some() {
                    self.unknown(owner, &slot.underscore_key(), slot.parent)?;
                }
                match present(primary) {
                    None => Ok(None),
                    Some(Value::Object(object)) => {
                        let mut instance = new();
                        self.walk_composite(object, instance.as_mut(), &slot.path(), depth + 1)?;
                        Ok(Some(Datum::Composite(instance)))
                    }
                    Some(other) => Err(mismatch(JsonShape::Object, other, &slot.path())),
                }
            }
            ElementType::Primitive(kind) => {
                let value = present(primary)
                    .map(|value| primitives::decode(kind, value))
                    .transpose()
                    .map_err(|e| e.at(&slot.path()))?;
                let mut data = PrimitiveData {
                    value,
                    ..Default::default()
                };
                match present(extras) {
                    None => {}
                    Some(Value::Object(record)) => {
                        self.read_underscore(record, &mut data, &slot.underscore_path(), depth)?
                    }
                    Some(other) => {
                        return Err(mismatch(JsonShape::Object, other, &slot.underscore_path()));
                    }
                }
                Ok((!data.is_empty()).then_some(Datum::Primitive(data)))
            }
        }
    }

    fn read_repeated(
        &self,
        owner: &'static str,
        ty: ElementType,
        slot: FieldSlot<'_>,
        primary: Option<&Value>,
        extras: Option<&Value>,
        depth: usize,
    ) -> Result<Option<Vec<Datum>>> {
        let values = match present(primary) {
            None => None,
            Some(Value::Array(items)) => Some(items),
            Some(other) => return Err(mismatch(JsonShape::Array, other, &slot.path())),
        };

        let data = match ty {
            ElementType::Composite { new, .. } => {
                if extras.is_some() {
                    self.unknown(owner, &slot.underscore_key(), slot.parent)?;
                }
                let Some(items) = values else {
                    return Ok(None);
                };
                let mut data = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let Value::Object(object) = item else {
                        return Err(mismatch(JsonShape::Object, item, &slot.item(index)));
                    };
                    let mut instance = new();
                    self.walk_composite(object, instance.as_mut(), &slot.item(index), depth + 1)?;
                    data.push(Datum::Composite(instance));
                }
                data
            }
            ElementType::Primitive(kind) => {
                let companions = match present(extras) {
                    None => None,
                    Some(Value::Array(items)) => Some(items),
                    Some(other) => {
                        return Err(mismatch(JsonShape::Array, other, &slot.underscore_path()));
                    }
                };
                self.read_primitive_array(kind, slot, values, companions, depth)?
            }
        };
        Ok((!data.is_empty()).then_some(data))
    }

    /// Zips a primitive array with its underscore array.
    ///
    /// Either may be missing; when both are present they must be the same
    /// length. `null` entries stand for "no value" and "no id or extensions".
    fn read_primitive_array(
        &self,
        kind: PrimitiveKind,
        slot: FieldSlot<'_>,
        values: Option<&Vec<Value>>,
        companions: Option<&Vec<Value>>,
        depth: usize,
    ) -> Result<Vec<Datum>> {
        let len = match (values, companions) {
            (Some(values), Some(companions)) if values.len() != companions.len() => {
                return Err(CodecError::UnderscoreLength {
                    field: slot.key.to_string(),
                    expected: values.len(),
                    found: companions.len(),
                }
                .at(&slot.path()));
            }
            (Some(values), _) => values.len(),
            (None, Some(companions)) => companions.len(),
            (None, None) => 0,
        };

        let mut data = Vec::with_capacity(len);
        for index in 0..len {
            let value = present(values.and_then(|values| values.get(index)))
                .map(|value| primitives::decode(kind, value))
                .transpose()
                .map_err(|e| e.at(&slot.item(index)))?;
            let mut element = PrimitiveData {
                value,
                ..Default::default()
            };
            match present(companions.and_then(|companions| companions.get(index))) {
                None => {}
                Some(Value::Object(record)) => {
                    self.read_underscore(record, &mut element, &slot.underscore_item(index), depth)?
                }
                Some(other) => {
                    return Err(mismatch(JsonShape::Object, other, &slot.underscore_item(index)));
                }
            }
            data.push(Datum::Primitive(element));
        }
        Ok(data)
    }

    /// Reads an underscore record (`{"id": ..., "extension": [...]}`) into a
    /// primitive's id and extensions.
    fn read_underscore(
        &self,
        record: &Object,
        data: &mut PrimitiveData,
        path: &NodePath,
        depth: usize,
    ) -> Result<()> {
        for (key, value) in record {
            match (key.as_str(), value) {
                (_, Value::Null) => {}
                ("id", Value::String(id)) => data.id = Some(id.clone()),
                ("id", other) => return Err(mismatch(JsonShape::String, other, &path.child("id"))),
                ("extension", Value::Array(items)) => {
                    for (index, item) in items.iter().enumerate() {
                        let item_path = path.index("extension", index);
                        let Value::Object(object) = item else {
                            return Err(mismatch(JsonShape::Object, item, &item_path));
                        };
                        let type_name = self.catalog.extension_type();
                        let mut extension = self
                            .catalog
                            .new_instance(type_name)
                            .ok_or_else(|| CodecError::UnknownType(type_name.to_string()).at(&item_path))?;
                        self.walk_composite(object, extension.as_mut(), &item_path, depth + 1)?;
                        data.extension.push(extension);
                    }
                }
                ("extension", other) => {
                    return Err(mismatch(JsonShape::Array, other, &path.child("extension")));
                }
                _ => self.unknown(ELEMENT, key, path)?,
            }
        }
        Ok(())
    }

    fn unknown(&self, type_name: &'static str, key: &str, parent: &NodePath) -> Result<()> {
        match self.options.unknown_fields {
            UnknownFieldPolicy::Ignore => {
                warn!(type_name, field = key, path = %parent, "ignoring unknown field");
                Ok(())
            }
            UnknownFieldPolicy::Reject => Err(CodecError::UnknownField {
                type_name,
                field: key.to_string(),
            }
            .at(&parent.child(key))),
        }
    }
}
