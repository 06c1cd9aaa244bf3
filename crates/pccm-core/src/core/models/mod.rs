//! In-memory representation of parsed geometry records.
//!
//! - [`atom`] - A labelled atom position
//! - [`sample`] - One ordered geometry record
//! - [`dataset`] - Samples with their partial charges and target labels, validated together
//! - [`error`] - Shape invariant violations

pub mod atom;
pub mod dataset;
pub mod error;
pub mod sample;
