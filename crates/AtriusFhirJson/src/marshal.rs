//! Marshal tree builder: typed composites to a sorted [`Tree`].

use atrius_fhir_lib::schema::{DatumRef, ElementType, FieldDescriptor, FieldRef};
use atrius_fhir_lib::{Composite, PrimitiveElement, PrimitiveKind, SchemaError};
use serde_json::Value;
use tracing::trace;

use crate::choice;
use crate::config::MarshalOptions;
use crate::error::{CodecError, Result};
use crate::path::{FieldSlot, NodePath};
use crate::primitives;
use crate::tree::{Node, Tree};

pub(crate) const RESOURCE_TYPE: &str = "resourceType";

/// One value built into nodes: the primary token and the underscore record.
///
/// A primitive carrying only an id and/or extensions has no primary node.
struct Built {
    value: Option<Node>,
    underscore: Option<Tree>,
}

impl Built {
    fn composite(tree: Tree) -> Self {
        Self {
            value: Some(Node::Composite(tree)),
            underscore: None,
        }
    }
}

/// The element type of a plain (non-choice) field.
fn plain_type(field: &FieldDescriptor) -> Result<ElementType> {
    field.element_type().ok_or_else(|| {
        SchemaError::Cardinality {
            field: field.json_key.to_string(),
            expected: "a choice alternative",
            found: "a plain value",
        }
        .into()
    })
}

pub(crate) struct TreeBuilder<'o> {
    options: &'o MarshalOptions,
}

impl<'o> TreeBuilder<'o> {
    pub(crate) fn new(options: &'o MarshalOptions) -> Self {
        Self { options }
    }

    /// Builds the tree of a top-level value. Resources get `resourceType`.
    pub(crate) fn build_root(&self, value: &dyn Composite) -> Result<Tree> {
        let mut tree = self.build_composite(value, &NodePath::root(), 0)?;
        if value.is_resource() {
            tree.insert(
                RESOURCE_TYPE.to_string(),
                Node::Primitive(Value::String(value.type_name().to_string())),
            );
        }
        Ok(tree)
    }

    fn build_composite(&self, value: &dyn Composite, path: &NodePath, depth: usize) -> Result<Tree> {
        if depth > self.options.max_depth {
            return Err(CodecError::DepthLimitExceeded {
                limit: self.options.max_depth,
            }
            .at(path));
        }

        let mut tree = Tree::new();
        for field in value.schema().fields {
            match value.field(field.json_key) {
                FieldRef::Absent => {}
                FieldRef::Single(datum) => {
                    let ty = plain_type(field).map_err(|e| e.at(path))?;
                    let slot = FieldSlot::new(path, field.json_key);
                    let built = self.build_datum(ty, datum, slot, None, depth)?;
                    insert_single(&mut tree, field.json_key, built);
                }
                FieldRef::Choice { variant, datum } => {
                    let (alternative, key) =
                        choice::active_alternative(field, variant).map_err(|e| e.at(path))?;
                    let slot = FieldSlot::new(path, &key);
                    let built = self.build_datum(alternative.ty, datum, slot, None, depth)?;
                    insert_single(&mut tree, &key, built);
                }
                FieldRef::Repeated(items) => {
                    let ty = plain_type(field).map_err(|e| e.at(path))?;
                    let slot = FieldSlot::new(path, field.json_key);
                    self.insert_repeated(&mut tree, ty, items, slot, depth)?;
                }
            }
            trace!(type_name = value.type_name(), field = field.json_key, "built field");
        }
        Ok(tree)
    }

    /// Builds the parallel value and underscore arrays of a repeated field.
    ///
    /// Each array is written only if one of its entries is non-null; the other
    /// positions are padded with `null` so both stay aligned.
    fn insert_repeated(
        &self,
        tree: &mut Tree,
        ty: ElementType,
        items: Vec<DatumRef<'_>>,
        slot: FieldSlot<'_>,
        depth: usize,
    ) -> Result<()> {
        let mut values = Vec::with_capacity(items.len());
        let mut underscores = Vec::with_capacity(items.len());
        for (index, datum) in items.into_iter().enumerate() {
            let built = self.build_datum(ty, datum, slot, Some(index), depth)?;
            values.push(built.value.unwrap_or(Node::Null));
            underscores.push(built.underscore.map_or(Node::Null, Node::Composite));
        }

        if values.iter().any(|node| !node.is_null()) {
            tree.insert(slot.key.to_string(), Node::Array(values));
        }
        if underscores.iter().any(|node| !node.is_null()) {
            tree.insert(slot.underscore_key(), Node::Array(underscores));
        }
        Ok(())
    }

    fn build_datum(
        &self,
        ty: ElementType,
        datum: DatumRef<'_>,
        slot: FieldSlot<'_>,
        index: Option<usize>,
        depth: usize,
    ) -> Result<Built> {
        let path = index.map_or_else(|| slot.path(), |index| slot.item(index));
        match (ty, datum) {
            (ElementType::Primitive(kind), DatumRef::Primitive(element)) => {
                self.build_primitive(kind, element, slot, index, depth)
            }
            (ElementType::Composite { .. }, DatumRef::Composite(value)) => Ok(Built::composite(
                self.build_composite(value, &path, depth + 1)?,
            )),
            (ElementType::Primitive(_), DatumRef::Composite(value)) => {
                Err(CodecError::from(SchemaError::ExpectedPrimitive {
                    found: value.type_name(),
                })
                .at(&path))
            }
            (ElementType::Composite { name, .. }, DatumRef::Primitive(_)) => {
                Err(CodecError::from(SchemaError::ExpectedComposite { expected: name }).at(&path))
            }
        }
    }

    fn build_primitive(
        &self,
        kind: PrimitiveKind,
        element: &dyn PrimitiveElement,
        slot: FieldSlot<'_>,
        index: Option<usize>,
        depth: usize,
    ) -> Result<Built> {
        let value = match element.scalar() {
            Some(scalar) => {
                let encoded = primitives::encode(kind, scalar).map_err(|e| {
                    e.at(&index.map_or_else(|| slot.path(), |index| slot.item(index)))
                })?;
                Some(Node::Primitive(encoded))
            }
            None => None,
        };

        let mut underscore = Tree::new();
        if let Some(id) = element.element_id().filter(|id| !id.is_empty()) {
            underscore.insert("id".to_string(), Node::Primitive(Value::String(id.to_string())));
        }
        let extensions = element.extensions();
        if !extensions.is_empty() {
            let record = index.map_or_else(|| slot.underscore_path(), |index| slot.underscore_item(index));
            let mut nodes = Vec::with_capacity(extensions.len());
            for (position, extension) in extensions.into_iter().enumerate() {
                let path = record.index("extension", position);
                nodes.push(Node::Composite(self.build_composite(extension, &path, depth + 1)?));
            }
            underscore.insert("extension".to_string(), Node::Array(nodes));
        }

        Ok(Built {
            value,
            underscore: (!underscore.is_empty()).then_some(underscore),
        })
    }
}

fn insert_single(tree: &mut Tree, key: &str, built: Built) {
    if let Some(value) = built.value {
        tree.insert(key.to_string(), value);
    }
    if let Some(underscore) = built.underscore {
        tree.insert(format!("_{}", key), Node::Composite(underscore));
    }
}
