//! Patch operation types and their wire serialization.

use crate::diff::{Diff, MoveSet};
use crate::path::Path;
use crate::value::Value;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Wire code for a property-diff operation.
pub const OPERATE_PROPS: u8 = 1;
/// Wire code for an insert operation.
pub const OPERATE_INSERT: u8 = 2;
/// Wire code for a remove operation.
pub const OPERATE_REMOVE: u8 = 3;
/// Wire code for a list-reorder operation.
pub const OPERATE_ORDER: u8 = 4;

/// PatchOp is one atomic described change at a given path.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOp {
    /// Property changes on a mapping.
    Props { from: Path, diff: Diff },
    /// A new value appended into the sequence at `to`.
    Insert { from: Value, to: Path },
    /// The value at `from` was removed.
    Remove { from: Path },
    /// Move-set transforming the sequence at `to` into its new order.
    Order { from: MoveSet, to: Path },
}

impl PatchOp {
    /// Creates a PROPS operation.
    pub fn props(diff: Diff, from: Path) -> Self {
        PatchOp::Props { from, diff }
    }

    /// Creates an INSERT operation.
    pub fn insert(from: Value, to: Path) -> Self {
        PatchOp::Insert { from, to }
    }

    /// Creates a REMOVE operation.
    pub fn remove(from: Path) -> Self {
        PatchOp::Remove { from }
    }

    /// Creates an ORDER operation.
    pub fn order(moves: MoveSet, to: Path) -> Self {
        PatchOp::Order { from: moves, to }
    }

    /// Returns the numeric wire code of this operation.
    pub fn operate(&self) -> u8 {
        match self {
            PatchOp::Props { .. } => OPERATE_PROPS,
            PatchOp::Insert { .. } => OPERATE_INSERT,
            PatchOp::Remove { .. } => OPERATE_REMOVE,
            PatchOp::Order { .. } => OPERATE_ORDER,
        }
    }

    /// Returns the path this operation applies to.
    pub fn path(&self) -> &Path {
        match self {
            PatchOp::Props { from, .. } => from,
            PatchOp::Insert { to, .. } => to,
            PatchOp::Remove { from } => from,
            PatchOp::Order { to, .. } => to,
        }
    }
}

// Root paths serialize as an absent field, so a path entry is only written
// when the path has segments.
impl Serialize for PatchOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("operate", &self.operate())?;
        match self {
            PatchOp::Props { from, diff } => {
                if let Some(path) = from.to_wire() {
                    map.serialize_entry("from", &path)?;
                }
                map.serialize_entry("diff", diff)?;
            }
            PatchOp::Insert { from, to } => {
                map.serialize_entry("from", from)?;
                if let Some(path) = to.to_wire() {
                    map.serialize_entry("to", &path)?;
                }
            }
            PatchOp::Remove { from } => {
                if let Some(path) = from.to_wire() {
                    map.serialize_entry("from", &path)?;
                }
            }
            PatchOp::Order { from, to } => {
                map.serialize_entry("from", from)?;
                if let Some(path) = to.to_wire() {
                    map.serialize_entry("to", &path)?;
                }
            }
        }
        map.end()
    }
}

/// Patch is the ordered, append-only list of operations produced by a diff.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    ops: Vec<PatchOp>,
}

impl Patch {
    /// Creates a new empty patch.
    pub fn new() -> Self {
        Patch { ops: Vec::new() }
    }

    /// Appends an operation.
    pub fn push(&mut self, op: PatchOp) {
        self.ops.push(op);
    }

    /// Returns true if no operations were emitted.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns the number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns the operations as a slice.
    pub fn as_slice(&self) -> &[PatchOp] {
        &self.ops
    }

    /// Returns an iterator over the operations.
    pub fn iter(&self) -> impl Iterator<Item = &PatchOp> {
        self.ops.iter()
    }
}

impl IntoIterator for Patch {
    type Item = PatchOp;
    type IntoIter = std::vec::IntoIter<PatchOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl Serialize for Patch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.ops.len()))?;
        for op in &self.ops {
            seq.serialize_element(op)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operate_codes() {
        assert_eq!(PatchOp::remove(Path::new()).operate(), OPERATE_REMOVE);
        assert_eq!(
            PatchOp::insert(Value::Int(1), Path::new()).operate(),
            OPERATE_INSERT
        );
    }

    #[test]
    fn test_remove_wire_shape() {
        let op = PatchOp::remove(Path::new().with(1));
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"operate": 3, "from": "1"})
        );
    }

    #[test]
    fn test_root_path_is_omitted() {
        let op = PatchOp::remove(Path::new());
        assert_eq!(serde_json::to_value(&op).unwrap(), json!({"operate": 3}));
    }

    #[test]
    fn test_insert_wire_shape() {
        let op = PatchOp::insert(Value::Int(7), Path::new().with(0).with(2));
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"operate": 2, "from": 7, "to": "0.2"})
        );
    }

    #[test]
    fn test_patch_serializes_as_array() {
        let mut patch = Patch::new();
        assert!(patch.is_empty());
        patch.push(PatchOp::remove(Path::new().with(3)));
        assert_eq!(patch.len(), 1);
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!([{"operate": 3, "from": "3"}])
        );
    }
}
