//! Shape classification for dispatch.

use crate::value::Value;

/// Shape is the traversal category of a value, decided once per value at
/// dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Traversable as a key-value mapping.
    Mapping,
    /// Traversable as an ordered sequence (per the array predicate).
    Sequence,
    /// Opaque; compared by equality only.
    Leaf,
}

/// Returns true if the value can be traversed by the property differ.
///
/// Lists count as object-like: recursed into by the property differ they are
/// viewed as mappings from decimal index strings to elements.
pub(crate) fn is_object_like(value: &Value) -> bool {
    value.is_map() || value.is_list()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Map;

    #[test]
    fn test_object_like() {
        assert!(is_object_like(&Value::Map(Map::new())));
        assert!(is_object_like(&Value::List(vec![])));
        assert!(!is_object_like(&Value::Null));
        assert!(!is_object_like(&Value::Int(1)));
        assert!(!is_object_like(&Value::String("x".into())));
    }
}
