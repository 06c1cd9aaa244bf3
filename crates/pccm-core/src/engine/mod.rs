//! # Engine Module
//!
//! The descriptor engine: everything that turns one validated sample into one or
//! more trimmed partial-charge Coulomb matrix descriptors.
//!
//! ## Overview
//!
//! Each sample is handled independently. The [`interaction`] engine builds the full
//! symmetric matrix (`q_i * q_j / r_ij` off the diagonal, a [`config::DiagonalMode`]
//! value on it), after which one of three strategies produces descriptors:
//!
//! - **Trim only** ([`trim`]) - one upper-triangular descriptor per sample
//! - **Randomized sort** ([`randomized`]) - `num_rep` descriptors ordered by noise-perturbed row norms
//! - **Partial permutation** ([`partial`]) - up to `num_rep` descriptors that only swap atoms with tied diagonals
//!
//! Labels are expanded in lock-step by [`labels`]. Random draws come from per-sample
//! streams seeded from one master stream, so results do not depend on how samples are scheduled.

pub mod config;
pub mod error;
pub mod interaction;
pub mod labels;
pub mod partial;
pub(crate) mod permutation;
pub mod progress;
pub mod randomized;
pub(crate) mod rng;
pub mod trim;
