//! Diff module - The reconciliation core.
//!
//! This module computes patches: the property differ compares mappings
//! key-by-key, the reorder engine realigns keyed sequences, and the tree
//! walker dispatches between them while accumulating operations.

mod options;
mod props;
mod reorder;
mod shape;
mod walk;


pub use options::*;
pub use props::*;
pub use reorder::*;
pub use shape::*;
