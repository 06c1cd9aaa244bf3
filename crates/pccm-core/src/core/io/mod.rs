//! Tabular readers and writers for the descriptor pipeline.
//!
//! These are the file collaborators around the descriptor engine: they turn
//! comma-separated geometry, charge and label files into [`crate::core::models`]
//! values and write the generated descriptor rows back out. Parsing is strict: a
//! malformed line is reported with its line number rather than skipped.

pub mod charges;
pub mod descriptors;
pub mod error;
pub mod geometry;
