//! # Workflows Module
//!
//! High-level entry points that run the descriptor engine over a whole dataset.
//!
//! ## Overview
//!
//! A workflow takes a validated [`Dataset`](crate::core::models::dataset::Dataset) and a
//! [`DescriptorConfig`](crate::engine::config::DescriptorConfig), dispatches every sample to
//! the engine and assembles the resulting descriptor matrix together with its replicated
//! label vector.
//!
//! - **Descriptor generation** ([`generate`]) - trim-only, randomized-sort and
//!   partial-permutation descriptors with aligned labels.

pub mod generate;
