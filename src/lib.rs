//! # Keyed Tree Diff
//!
//! Structural diffing of nested JSON/YAML values with keyed-list reordering.
//!
//! This library computes the ordered set of edit operations (a "patch") that
//! transforms one nested value tree into another. Sequence elements carrying
//! a stable `key` field keep their identity across the diff, so a reordered
//! list produces a compact move-set instead of remove/insert pairs.
//!
//! ## Modules
//!
//! - [`value`] - In-memory representation of YAML/JSON values
//! - [`path`] - Index paths into nested sequences and their dotted wire form
//! - [`patch`] - Patch operations and the ordered patch accumulator
//! - [`diff`] - The diffing core: property differ, keyed-list reorder engine,
//!   sequence differ and tree walker

pub mod diff;
pub mod patch;
pub mod path;
pub mod value;

pub use diff::{
    reorder, ArrayPredicate, Diff, DiffEntry, Differ, DifferBuilder, IgnorePredicate, InsertMove,
    MoveSet, RemoveMove, Reordered, Shape,
};
pub use patch::{Patch, PatchOp};
pub use path::Path;
pub use value::{Map, Value};
