//! Patch module - Patch operations and the ordered patch accumulator.
//!
//! The wire shape of every operation is fixed for compatibility with
//! downstream patch consumers.

mod operation;

pub use operation::*;
