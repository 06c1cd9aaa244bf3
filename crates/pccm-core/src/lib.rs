//! # PCCM Core Library
//!
//! Partial-charge Coulomb matrix descriptors for molecular machine learning.
//!
//! Each molecule of `N` atoms is described by a symmetric `N x N` matrix whose
//! off-diagonal entries are the Coulomb interactions `q_i * q_j / r_ij` between partial
//! charges, and whose diagonal holds a per-atom self term. The upper triangle of the
//! matrix becomes a fixed-length feature vector. Two augmentation schemes produce several
//! descriptors per molecule, with the regression labels replicated to match.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Data models (`Atom`, `Sample`, `Dataset`), the element
//!   parameter table and CSV readers and writers.
//!
//! - **[`engine`]: The Descriptor Engine.** Interaction matrices, trimming, randomized
//!   sorting, partial permutations and label replication, configured through
//!   `DescriptorConfig`.
//!
//! - **[`workflows`]: The Public API.** Runs the engine over a whole dataset and returns
//!   the descriptor matrix with its aligned labels.

pub mod core;
pub mod engine;
pub mod workflows;
