use super::error::ShapeError;
use super::sample::Sample;

/// The in-memory store of parsed geometry records.
///
/// A `Dataset` owns the samples, their per-atom partial charges and one scalar label
/// per sample. Construction validates that every sample has the same atom count as
/// the first one and that charges and labels line up with the samples, so the
/// descriptor engine can rely on those invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    samples: Vec<Sample>,
    charges: Vec<Vec<f64>>,
    labels: Vec<f64>,
    n_atoms: usize,
}

impl Dataset {
    /// Creates a validated dataset.
    ///
    /// # Arguments
    ///
    /// * `samples` - The geometry records, all with the same number of atoms.
    /// * `charges` - One partial-charge vector per sample, aligned to its atom order.
    /// * `labels` - One target value per sample.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] describing the first inconsistency found.
    pub fn new(
        samples: Vec<Sample>,
        charges: Vec<Vec<f64>>,
        labels: Vec<f64>,
    ) -> Result<Self, ShapeError> {
        let first = samples.first().ok_or(ShapeError::EmptyDataset)?;
        let n_atoms = first.n_atoms();

        if charges.len() != samples.len() {
            return Err(ShapeError::ChargeRows {
                expected: samples.len(),
                found: charges.len(),
            });
        }
        if labels.len() != samples.len() {
            return Err(ShapeError::LabelCount {
                expected: samples.len(),
                found: labels.len(),
            });
        }

        for (index, (sample, q)) in samples.iter().zip(&charges).enumerate() {
            if sample.is_empty() {
                return Err(ShapeError::EmptySample { sample: index });
            }
            if sample.n_atoms() != n_atoms {
                return Err(ShapeError::AtomCount {
                    sample: index,
                    expected: n_atoms,
                    found: sample.n_atoms(),
                });
            }
            if q.len() != n_atoms {
                return Err(ShapeError::ChargeCount {
                    sample: index,
                    expected: n_atoms,
                    found: q.len(),
                });
            }
        }

        Ok(Self {
            samples,
            charges,
            labels,
            n_atoms,
        })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn charges(&self) -> &[Vec<f64>] {
        &self.charges
    }

    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    pub fn n_atoms(&self) -> usize {
        self.n_atoms
    }

    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    /// Length of one trimmed descriptor, `n_atoms * (n_atoms + 1) / 2`.
    pub fn n_features(&self) -> usize {
        self.n_atoms * (self.n_atoms + 1) / 2
    }
}
