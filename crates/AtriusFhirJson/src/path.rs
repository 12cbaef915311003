use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Field(String),
    Index(String, usize),
}

/// Location of a node inside a FHIR JSON document.
///
/// Displays as `/`-separated segments with a trailing slash, e.g.
/// `/name[0]/given[1]/`. The root displays as `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath {
    segments: Vec<Segment>,
}

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of the field `key` below this node.
    pub fn child(&self, key: &str) -> Self {
        self.extended(Segment::Field(key.to_string()))
    }

    /// Path of element `index` of the repeated field `key` below this node.
    pub fn index(&self, key: &str, index: usize) -> Self {
        self.extended(Segment::Index(key.to_string(), index))
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    fn extended(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        for segment in &self.segments {
            match segment {
                Segment::Field(key) => write!(f, "{}/", key)?,
                Segment::Index(key, index) => write!(f, "{}[{}]/", key, index)?,
            }
        }
        Ok(())
    }
}

/// A field's position below its parent object, with the positions of its
/// `_`-prefixed companion.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldSlot<'a> {
    pub parent: &'a NodePath,
    pub key: &'a str,
}

impl<'a> FieldSlot<'a> {
    pub(crate) fn new(parent: &'a NodePath, key: &'a str) -> Self {
        Self { parent, key }
    }

    pub(crate) fn path(&self) -> NodePath {
        self.parent.child(self.key)
    }

    pub(crate) fn item(&self, index: usize) -> NodePath {
        self.parent.index(self.key, index)
    }

    pub(crate) fn underscore_key(&self) -> String {
        format!("_{}", self.key)
    }

    pub(crate) fn underscore_path(&self) -> NodePath {
        self.parent.child(&self.underscore_key())
    }

    pub(crate) fn underscore_item(&self, index: usize) -> NodePath {
        self.parent.index(&self.underscore_key(), index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(NodePath::root().to_string(), "/");
        let path = NodePath::root().child("meta").child("tag").index("coding", 2);
        assert_eq!(path.to_string(), "/meta/tag/coding[2]/");
        assert_eq!(path.depth(), 3);
    }

    #[test]
    fn test_field_slot_paths() {
        let parent = NodePath::root().index("name", 0);
        let slot = FieldSlot::new(&parent, "given");
        assert_eq!(slot.path().to_string(), "/name[0]/given/");
        assert_eq!(slot.item(1).to_string(), "/name[0]/given[1]/");
        assert_eq!(slot.underscore_item(1).to_string(), "/name[0]/_given[1]/");
    }
}
