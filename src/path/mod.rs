//! Path module - Index paths into nested sequences.
//!
//! Paths are built structurally during traversal and only rendered to their
//! dotted wire form (`"0.2.1"`) at the serialization boundary. The root path
//! is empty and is omitted from the wire entirely.

use std::fmt;

/// Path represents the position of a value inside nested sequences.
///
/// Each segment is a zero-based index into the sequence one level up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<usize>,
}

impl Path {
    /// Creates a new empty (root) path.
    pub fn new() -> Self {
        Path {
            segments: Vec::new(),
        }
    }

    /// Creates a path from a vector of index segments.
    pub fn from_segments(segments: Vec<usize>) -> Self {
        Path { segments }
    }

    /// Returns the number of segments in the path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this is the root path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the index segments.
    pub fn iter(&self) -> impl Iterator<Item = &usize> {
        self.segments.iter()
    }

    /// Creates a new path with the given index appended.
    pub fn with(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(index);
        Path { segments }
    }

    /// Renders the dotted wire form, or `None` for the root path.
    pub fn to_wire(&self) -> Option<String> {
        if self.segments.is_empty() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
