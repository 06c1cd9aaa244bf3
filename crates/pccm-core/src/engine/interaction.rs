use super::config::DiagonalMode;
use super::error::SampleError;
use crate::core::elements::{ElementParams, ElementTable};
use crate::core::models::sample::Sample;
use crate::core::utils::geometry::distance;
use nalgebra::{DMatrix, DVector};
use tracing::trace;

/// Square symmetric `n_atoms x n_atoms` matrix of pairwise charge interactions.
pub type InteractionMatrix = DMatrix<f64>;

#[inline]
pub fn charge_interaction(q_i: f64, q_j: f64, dist: f64) -> f64 {
    q_i * q_j / dist
}

#[inline]
pub fn nuclear_charge_diagonal(z: f64) -> f64 {
    0.5 * z.powf(2.4)
}

/// Builds interaction matrices for one sample at a time.
///
/// The engine borrows an immutable element table and holds no per-sample state,
/// so one instance can be shared across worker threads.
#[derive(Debug, Clone, Copy)]
pub struct InteractionEngine<'a> {
    elements: &'a ElementTable,
    diagonal: DiagonalMode,
}

impl<'a> InteractionEngine<'a> {
    pub fn new(elements: &'a ElementTable, diagonal: DiagonalMode) -> Self {
        Self { elements, diagonal }
    }

    /// Looks up element constants for every atom, in atom order.
    ///
    /// Lookups happen in every diagonal mode so unknown labels are always rejected.
    pub fn element_params(&self, sample: &Sample) -> Result<Vec<ElementParams>, SampleError> {
        sample
            .labels()
            .enumerate()
            .map(|(atom, label)| {
                self.elements
                    .get(label)
                    .copied()
                    .ok_or_else(|| SampleError::UnknownElement {
                        atom,
                        label: label.to_string(),
                    })
            })
            .collect()
    }

    /// Diagonal values for this sample under the engine's diagonal mode.
    pub fn diagonal_values(
        &self,
        sample: &Sample,
        charges: &[f64],
    ) -> Result<Vec<f64>, SampleError> {
        check_charges(sample, charges)?;
        let params = self.element_params(sample)?;
        Ok(self.diagonal_from(&params, charges))
    }

    fn diagonal_from(&self, params: &[ElementParams], charges: &[f64]) -> Vec<f64> {
        match self.diagonal {
            DiagonalMode::Plain => charges.iter().map(|q| q * q).collect(),
            DiagonalMode::NuclearCharge => params
                .iter()
                .map(|p| nuclear_charge_diagonal(p.nuclear_charge))
                .collect(),
            DiagonalMode::ReferenceEnergy(level) => {
                params.iter().map(|p| p.reference_energy(level)).collect()
            }
        }
    }

    /// Builds the full interaction matrix of one sample.
    ///
    /// Off-diagonal entries are `q_i * q_j / r_ij`; the diagonal follows the engine's
    /// [`DiagonalMode`].
    ///
    /// # Errors
    ///
    /// - [`SampleError::ChargeCount`] if `charges` is not aligned with the atoms.
    /// - [`SampleError::UnknownElement`] for a label missing from the element table.
    /// - [`SampleError::DegenerateGeometry`] if two atoms share a position.
    pub fn build(
        &self,
        sample: &Sample,
        charges: &[f64],
    ) -> Result<InteractionMatrix, SampleError> {
        check_charges(sample, charges)?;
        let params = self.element_params(sample)?;
        let n = sample.n_atoms();
        let atoms = sample.atoms();

        let diagonal = DVector::from_vec(self.diagonal_from(&params, charges));
        let mut matrix = DMatrix::from_diagonal(&diagonal);

        for i in 0..n {
            for j in (i + 1)..n {
                let dist = distance(&atoms[i].position, &atoms[j].position);
                if dist == 0.0 {
                    return Err(SampleError::DegenerateGeometry {
                        atom_a: i,
                        atom_b: j,
                    });
                }
                let value = charge_interaction(charges[i], charges[j], dist);
                matrix[(i, j)] = value;
                matrix[(j, i)] = value;
            }
        }

        trace!(n_atoms = n, "Built interaction matrix.");
        Ok(matrix)
    }
}

fn check_charges(sample: &Sample, charges: &[f64]) -> Result<(), SampleError> {
    if charges.len() != sample.n_atoms() {
        return Err(SampleError::ChargeCount {
            expected: sample.n_atoms(),
            found: charges.len(),
        });
    }
    Ok(())
}
