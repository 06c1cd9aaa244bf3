use super::error::SampleError;
use nalgebra::DMatrix;

/// Flattened upper triangle (diagonal included) of an interaction matrix.
pub type TrimmedDescriptor = Vec<f64>;

/// Descriptor length for an `n_atoms x n_atoms` matrix.
#[inline]
pub fn feature_count(n_atoms: usize) -> usize {
    n_atoms * (n_atoms + 1) / 2
}

/// Scans the upper triangle row by row (`j >= i`) into a flat vector.
///
/// Symmetry of the input is assumed, not checked.
pub fn trim(matrix: &DMatrix<f64>) -> Result<TrimmedDescriptor, SampleError> {
    let n = matrix.nrows();
    if matrix.ncols() != n {
        return Err(SampleError::NonSquareMatrix {
            rows: n,
            cols: matrix.ncols(),
        });
    }

    let mut descriptor = Vec::with_capacity(feature_count(n));
    for i in 0..n {
        for j in i..n {
            descriptor.push(matrix[(i, j)]);
        }
    }
    Ok(descriptor)
}

/// Rebuilds the symmetric matrix a descriptor was trimmed from.
///
/// Returns `None` when the length is not a triangular number.
pub fn untrim(descriptor: &[f64]) -> Option<DMatrix<f64>> {
    let n = atoms_for_features(descriptor.len())?;
    let mut matrix = DMatrix::zeros(n, n);
    let mut values = descriptor.iter();
    for i in 0..n {
        for j in i..n {
            let v = *values.next()?;
            matrix[(i, j)] = v;
            matrix[(j, i)] = v;
        }
    }
    Some(matrix)
}

/// Inverse of [`feature_count`].
pub fn atoms_for_features(n_features: usize) -> Option<usize> {
    let estimate = (((8 * n_features + 1) as f64).sqrt() as usize).saturating_sub(1) / 2;
    (estimate.saturating_sub(1)..=estimate + 1).find(|&n| feature_count(n) == n_features)
}

/// Positions of the diagonal entries inside a trimmed descriptor.
pub fn diagonal_positions(n_atoms: usize) -> impl Iterator<Item = usize> {
    // Row i starts after rows 0..i, which hold n, n-1, ..., n-i+1 entries.
    (0..n_atoms).map(move |i| i * n_atoms - i * (i.saturating_sub(1)) / 2)
}
