use super::error::SampleError;
use super::permutation::{argsort_descending, permute_symmetric};
use super::trim::{TrimmedDescriptor, trim};
use nalgebra::{DMatrix, DVector};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Euclidean norm of every row.
pub fn row_norms(matrix: &DMatrix<f64>) -> DVector<f64> {
    DVector::from_iterator(matrix.nrows(), matrix.row_iter().map(|row| row.norm()))
}

/// Produces `num_rep` randomly sorted descriptors of one matrix.
///
/// Each repetition perturbs the row-norm vector with normal noise whose standard
/// deviation equals that of the norms themselves, sorts the perturbed norms in
/// descending order and applies the resulting permutation to rows and columns before
/// trimming.
pub fn randomized_sort<R: Rng + ?Sized>(
    matrix: &DMatrix<f64>,
    num_rep: usize,
    rng: &mut R,
) -> Result<Vec<TrimmedDescriptor>, SampleError> {
    if !matrix.is_square() {
        return Err(SampleError::NonSquareMatrix {
            rows: matrix.nrows(),
            cols: matrix.ncols(),
        });
    }

    let norms = row_norms(matrix);
    // Population spread (ddof = 0); an empty matrix has zero variance.
    let spread = norms.variance().sqrt();
    let noise = Normal::new(0.0, spread).map_err(|_| SampleError::NonFiniteNorms)?;

    (0..num_rep)
        .map(|_| {
            let perturbed: Vec<f64> = norms.iter().map(|n| n + noise.sample(rng)).collect();
            let order = argsort_descending(&perturbed);
            trim(&permute_symmetric(matrix, &order))
        })
        .collect()
}
