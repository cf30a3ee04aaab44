//! Differ configuration and entry point.

use super::shape::{is_object_like, Shape};
use super::walk;
use crate::patch::Patch;
use crate::path::Path;
use crate::value::Value;

/// ArrayPredicate decides whether a value is sequence-shaped.
///
/// The default treats exactly [`Value::List`] as a sequence; callers can
/// narrow that (e.g. to diff certain lists as plain mappings).
pub trait ArrayPredicate: Send + Sync {
    fn is_array(&self, value: &Value) -> bool;
}

impl<F> ArrayPredicate for F
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn is_array(&self, value: &Value) -> bool {
        self(value)
    }
}

/// IgnorePredicate excludes property keys from diffing at every level.
pub trait IgnorePredicate: Send + Sync {
    fn ignore(&self, key: &str) -> bool;
}

impl<F> IgnorePredicate for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn ignore(&self, key: &str) -> bool {
        self(key)
    }
}

/// Immutable configuration shared by every comparison in one diff call.
#[derive(Default)]
pub(crate) struct DiffOptions {
    pub(crate) array_predicate: Option<Box<dyn ArrayPredicate>>,
    pub(crate) ignore: Option<Box<dyn IgnorePredicate>>,
}

impl DiffOptions {
    pub(crate) fn is_array(&self, value: &Value) -> bool {
        match &self.array_predicate {
            Some(predicate) => predicate.is_array(value),
            None => value.is_list(),
        }
    }

    pub(crate) fn is_ignored(&self, key: &str) -> bool {
        self.ignore.as_ref().is_some_and(|p| p.ignore(key))
    }

    pub(crate) fn classify(&self, value: &Value) -> Shape {
        if self.is_array(value) {
            Shape::Sequence
        } else if is_object_like(value) {
            Shape::Mapping
        } else {
            Shape::Leaf
        }
    }
}

/// Differ computes the patch transforming one value tree into another.
///
/// A `Differ` holds only immutable configuration; [`Differ::diff`] is a pure
/// function of its two inputs, so one instance can serve concurrent calls.
pub struct Differ {
    options: DiffOptions,
}

impl Differ {
    /// Creates a Differ with default configuration.
    pub fn new() -> Self {
        Differ {
            options: DiffOptions::default(),
        }
    }

    /// Creates a builder for a configured Differ.
    pub fn builder() -> DifferBuilder {
        DifferBuilder::default()
    }

    /// Computes the ordered patch transforming `old` into `new`.
    ///
    /// Total over any two tree-shaped inputs. Behavior for cyclic structures
    /// is undefined; keys within one sequence must be unique.
    pub fn diff(&self, old: &Value, new: &Value) -> Patch {
        let mut patch = Patch::new();
        walk::walk(old, Some(new), &self.options, &mut patch, &Path::new());
        patch
    }
}

impl Default for Differ {
    fn default() -> Self {
        Differ::new()
    }
}

/// DifferBuilder is a builder for creating a configured Differ.
#[derive(Default)]
pub struct DifferBuilder {
    array_predicate: Option<Box<dyn ArrayPredicate>>,
    ignore: Option<Box<dyn IgnorePredicate>>,
}

impl DifferBuilder {
    /// Creates a new DifferBuilder.
    pub fn new() -> Self {
        DifferBuilder::default()
    }

    /// Overrides sequence-shape detection.
    pub fn array_predicate(mut self, predicate: Box<dyn ArrayPredicate>) -> Self {
        self.array_predicate = Some(predicate);
        self
    }

    /// Sets the ignored-key predicate.
    pub fn ignore(mut self, predicate: Box<dyn IgnorePredicate>) -> Self {
        self.ignore = Some(predicate);
        self
    }

    /// Builds the Differ.
    pub fn build(self) -> Differ {
        Differ {
            options: DiffOptions {
                array_predicate: self.array_predicate,
                ignore: self.ignore,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Map;

    #[test]
    fn test_default_classify() {
        let options = DiffOptions::default();
        assert_eq!(options.classify(&Value::List(vec![])), Shape::Sequence);
        assert_eq!(options.classify(&Value::Map(Map::new())), Shape::Mapping);
        assert_eq!(options.classify(&Value::Int(1)), Shape::Leaf);
    }

    #[test]
    fn test_custom_array_predicate() {
        // Treat every list as opaque.
        let options = DiffOptions {
            array_predicate: Some(Box::new(|_: &Value| false)),
            ignore: None,
        };
        assert_eq!(options.classify(&Value::List(vec![])), Shape::Mapping);
    }

    #[test]
    fn test_ignore_predicate() {
        let options = DiffOptions {
            array_predicate: None,
            ignore: Some(Box::new(|key: &str| key.starts_with('_'))),
        };
        assert!(options.is_ignored("_internal"));
        assert!(!options.is_ignored("name"));
    }

    #[test]
    fn test_builder() {
        let differ = Differ::builder()
            .ignore(Box::new(|key: &str| key == "meta"))
            .build();
        assert!(differ.options.is_ignored("meta"));
        assert!(!differ.options.is_ignored("data"));
    }
}
