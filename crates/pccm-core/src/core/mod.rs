//! # Core Module
//!
//! Stateless building blocks shared by the descriptor engine and its collaborators.
//!
//! - **Geometry records** ([`models`]) - Atoms, samples and validated datasets
//! - **Element constants** ([`elements`]) - Nuclear charges and free-atom reference energies
//! - **File I/O** ([`io`]) - CSV readers for geometries, charges and labels, and the descriptor writer
//! - **Geometry utilities** ([`utils`]) - Interatomic distances

pub mod elements;
pub mod io;
pub mod models;
pub mod utils;
