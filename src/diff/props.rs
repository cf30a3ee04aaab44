//! Property differ - recursive key-by-key comparison of mappings.

use super::options::DiffOptions;
use super::shape::is_object_like;
use crate::value::Value;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// DiffEntry is the recorded change for one key.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffEntry {
    /// The key exists in the old mapping but not the new one.
    Removed,
    /// The new value for the key (replacement or addition).
    Replaced(Value),
    /// Both values are object-like and differ somewhere below.
    Nested(Diff),
}

/// Diff describes the property changes at one nesting level.
///
/// A `Diff` is only ever constructed non-empty: "no difference" is
/// represented by the absence of a `Diff`, never by an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Diff {
    entries: BTreeMap<String, DiffEntry>,
}

impl Diff {
    fn new() -> Self {
        Diff {
            entries: BTreeMap::new(),
        }
    }

    /// Returns true if no changes were recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of changed keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the entry for a key.
    pub fn get(&self, key: &str) -> Option<&DiffEntry> {
        self.entries.get(key)
    }

    /// Returns true if the key has a recorded change.
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns an iterator over the changed keys and their entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &DiffEntry)> {
        self.entries.iter()
    }

    fn insert(&mut self, key: String, entry: DiffEntry) {
        self.entries.insert(key, entry);
    }
}

// Removed keys serialize as JSON null, the closest representable analog of
// the original wire format's `undefined` sentinel.
impl Serialize for DiffEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DiffEntry::Removed => serializer.serialize_unit(),
            DiffEntry::Replaced(value) => value.serialize(serializer),
            DiffEntry::Nested(diff) => diff.serialize(serializer),
        }
    }
}

/// Compares two object-like values key-by-key.
///
/// Returns `None` when no difference exists at this level. Keys matched by
/// the ignore predicate are skipped on both sides, at every recursion depth.
pub(crate) fn diff_props(a: &Value, b: &Value, options: &DiffOptions) -> Option<Diff> {
    let mut diff = Diff::new();

    for (key, a_val) in entries(a) {
        if options.is_ignored(&key) {
            continue;
        }

        let Some(b_val) = lookup(b, &key) else {
            diff.insert(key, DiffEntry::Removed);
            continue;
        };

        if a_val == b_val {
            continue;
        }

        if is_object_like(a_val) && is_object_like(b_val) {
            if let Some(nested) = diff_props(a_val, b_val, options) {
                diff.insert(key, DiffEntry::Nested(nested));
            }
        } else {
            diff.insert(key, DiffEntry::Replaced(b_val.clone()));
        }
    }

    for (key, b_val) in entries(b) {
        if options.is_ignored(&key) {
            continue;
        }
        if lookup(a, &key).is_none() {
            diff.insert(key, DiffEntry::Replaced(b_val.clone()));
        }
    }

    if diff.is_empty() {
        None
    } else {
        Some(diff)
    }
}

/// The key-value view the property differ traverses: map fields, or list
/// elements under their decimal index. Leaves have no entries.
fn entries(value: &Value) -> Vec<(String, &Value)> {
    match value {
        Value::Map(m) => m.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::List(l) => l
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => Vec::new(),
    }
}

fn lookup<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Map(m) => m.get(key),
        Value::List(l) => key.parse::<usize>().ok().and_then(|i| l.get(i)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::from_json;

    fn v(json: &str) -> Value {
        from_json(json).unwrap()
    }

    fn props(a: &str, b: &str) -> Option<Diff> {
        diff_props(&v(a), &v(b), &DiffOptions::default())
    }

    #[test]
    fn test_equal_maps_yield_none() {
        assert_eq!(props(r#"{"x":1,"y":[1,2]}"#, r#"{"x":1,"y":[1,2]}"#), None);
    }

    #[test]
    fn test_removed_replaced_added() {
        let diff = props(r#"{"x":1,"y":2}"#, r#"{"x":1,"z":3}"#).unwrap();
        assert_eq!(diff.len(), 2);
        assert!(!diff.has("x"));
        assert_eq!(diff.get("y"), Some(&DiffEntry::Removed));
        assert_eq!(diff.get("z"), Some(&DiffEntry::Replaced(Value::Int(3))));
    }

    #[test]
    fn test_nested_diff_is_not_flattened() {
        let diff = props(r#"{"p":{"q":1}}"#, r#"{"p":{"q":2}}"#).unwrap();
        let Some(DiffEntry::Nested(nested)) = diff.get("p") else {
            panic!("expected nested diff for p, got {:?}", diff.get("p"));
        };
        assert_eq!(nested.get("q"), Some(&DiffEntry::Replaced(Value::Int(2))));
    }

    #[test]
    fn test_nested_equal_subtree_yields_no_entry() {
        // The subtree differs in shape description but not content.
        assert_eq!(
            props(r#"{"p":{"q":[1,{"r":2}]}}"#, r#"{"p":{"q":[1,{"r":2}]}}"#),
            None
        );
    }

    #[test]
    fn test_list_inside_props_diffs_by_index() {
        let diff = props(r#"{"l":[1,2,3]}"#, r#"{"l":[1,9]}"#).unwrap();
        let Some(DiffEntry::Nested(nested)) = diff.get("l") else {
            panic!("expected nested diff for l");
        };
        assert!(!nested.has("0"));
        assert_eq!(nested.get("1"), Some(&DiffEntry::Replaced(Value::Int(9))));
        assert_eq!(nested.get("2"), Some(&DiffEntry::Removed));
    }

    #[test]
    fn test_scalar_replacement_is_exact() {
        // No numeric coercion: 1 and 1.0 differ.
        let diff = props(r#"{"n":1}"#, r#"{"n":1.0}"#).unwrap();
        assert_eq!(diff.get("n"), Some(&DiffEntry::Replaced(Value::Float(1.0))));
    }

    #[test]
    fn test_ignore_predicate_applies_at_every_level() {
        let options = DiffOptions {
            array_predicate: None,
            ignore: Some(Box::new(|key: &str| key == "meta")),
        };
        let diff = diff_props(
            &v(r#"{"meta":1,"child":{"meta":2,"x":1}}"#),
            &v(r#"{"meta":9,"child":{"meta":8,"x":1}}"#),
            &options,
        );
        assert_eq!(diff, None);
    }

    #[test]
    fn test_removed_serializes_as_null() {
        let diff = props(r#"{"y":2}"#, r#"{"z":3}"#).unwrap();
        assert_eq!(
            serde_json::to_value(&diff).unwrap(),
            serde_json::json!({"y": null, "z": 3})
        );
    }
}
