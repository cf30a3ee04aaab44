//! Sequence differ and tree walker.

use super::options::DiffOptions;
use super::props::diff_props;
use super::reorder::reorder;
use super::shape::{is_object_like, Shape};
use crate::patch::{Patch, PatchOp};
use crate::path::Path;
use crate::value::Value;

/// Entry point for every comparison, root and recursive.
///
/// An absent or null `b` records a removal; sequence-shaped values route to
/// the sequence differ; everything else goes through the property differ,
/// with unequal leaf pairs recorded as value replacements.
pub(crate) fn walk(
    a: &Value,
    b: Option<&Value>,
    options: &DiffOptions,
    patch: &mut Patch,
    path: &Path,
) {
    let Some(b) = b.filter(|value| !value.is_null()) else {
        patch.push(PatchOp::remove(path.clone()));
        return;
    };

    if options.classify(a) == Shape::Sequence {
        if let (Some(a_items), Some(b_items)) = (a.as_list(), b.as_list()) {
            diff_sequence(a_items, b_items, options, patch, path);
            return;
        }
        // The predicate claims a sequence shape the values cannot supply on
        // both sides; fall through to the property/leaf comparison.
    }

    if is_object_like(a) && is_object_like(b) {
        if let Some(diff) = diff_props(a, b, options) {
            patch.push(PatchOp::props(diff, path.clone()));
        }
    } else if a != b {
        // Leaf replacement: INSERT is the only value-carrying operation, so
        // the new value rides on it at the item's own path.
        patch.push(PatchOp::insert(b.clone(), path.clone()));
    }
}

/// Diffs two sequences through the reorder engine.
///
/// Walks the old items against the realigned new array index-by-index, then
/// appends at most one ORDER operation carrying the move-set.
pub(crate) fn diff_sequence(
    a: &[Value],
    b: &[Value],
    options: &DiffOptions,
    patch: &mut Patch,
    path: &Path,
) {
    let reordered = reorder(a, b);
    let len = a.len().max(reordered.array.len());

    for i in 0..len {
        let left = a.get(i).filter(|value| !value.is_null());
        let right = reordered.array.get(i).copied().flatten();

        match left {
            None => {
                // Trailing or unmatched new content; the insert targets the
                // sequence itself.
                if let Some(item) = right {
                    patch.push(PatchOp::insert(item.clone(), path.clone()));
                }
            }
            Some(item) => walk(item, right, options, patch, &path.with(i)),
        }
    }

    if let Some(moves) = reordered.moves {
        patch.push(PatchOp::order(moves, path.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::from_json;

    fn v(json: &str) -> Value {
        from_json(json).unwrap()
    }

    fn run(a: &str, b: &str) -> Patch {
        let mut patch = Patch::new();
        walk(
            &v(a),
            Some(&v(b)),
            &DiffOptions::default(),
            &mut patch,
            &Path::new(),
        );
        patch
    }

    #[test]
    fn test_null_new_side_is_removal() {
        let patch = run(r#"{"x":1}"#, "null");
        assert_eq!(patch.as_slice(), &[PatchOp::remove(Path::new())]);
    }

    #[test]
    fn test_equal_leaves_emit_nothing() {
        assert!(run("3", "3").is_empty());
    }

    #[test]
    fn test_unequal_leaves_emit_replacement() {
        let patch = run("1", "2");
        assert_eq!(
            patch.as_slice(),
            &[PatchOp::insert(Value::Int(2), Path::new())]
        );
    }

    #[test]
    fn test_shape_change_is_replacement() {
        let patch = run(r#"{"x":1}"#, "7");
        assert_eq!(
            patch.as_slice(),
            &[PatchOp::insert(Value::Int(7), Path::new())]
        );
    }

    #[test]
    fn test_sequence_routing() {
        // Keyless lists diff positionally under item paths.
        let patch = run("[1,2]", "[1,5]");
        assert_eq!(
            patch.as_slice(),
            &[PatchOp::insert(Value::Int(5), Path::new().with(1))]
        );
    }

    #[test]
    fn test_sequence_truncation_removes_by_index() {
        let patch = run("[1,2,3]", "[1]");
        assert_eq!(
            patch.as_slice(),
            &[
                PatchOp::remove(Path::new().with(1)),
                PatchOp::remove(Path::new().with(2)),
            ]
        );
    }

    #[test]
    fn test_predicate_can_demote_sequences() {
        // With lists demoted to mappings, a list pair is prop-diffed under
        // index keys instead of sequence-diffed.
        let options = DiffOptions {
            array_predicate: Some(Box::new(|_: &Value| false)),
            ignore: None,
        };
        let mut patch = Patch::new();
        walk(
            &v("[1,2]"),
            Some(&v("[1,5]")),
            &options,
            &mut patch,
            &Path::new(),
        );
        assert_eq!(patch.len(), 1);
        assert!(matches!(patch.as_slice()[0], PatchOp::Props { .. }));
    }
}
