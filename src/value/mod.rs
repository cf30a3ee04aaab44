//! Value module - In-memory representation of YAML/JSON values.
//!
//! This module provides the tree-shaped value type the differ operates on.

mod value;

pub use value::*;
