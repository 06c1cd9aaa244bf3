use nalgebra::DMatrix;

/// Reindexes rows and columns together: `out[(i, j)] = m[(p[i], p[j])]`.
///
/// Symmetric input stays symmetric.
pub fn permute_symmetric(matrix: &DMatrix<f64>, permutation: &[usize]) -> DMatrix<f64> {
    let n = permutation.len();
    DMatrix::from_fn(n, n, |i, j| matrix[(permutation[i], permutation[j])])
}

/// Indices that sort `values` ascending. Ties keep their original order.
pub fn argsort_ascending(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    order
}

/// Indices that sort `values` descending.
pub fn argsort_descending(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argsort_orders_indices() {
        let v = [0.3, -1.0, 2.5, 0.0];
        assert_eq!(argsort_ascending(&v), vec![1, 3, 0, 2]);
        assert_eq!(argsort_descending(&v), vec![2, 0, 3, 1]);
    }

    #[test]
    fn argsort_ascending_is_stable_for_ties() {
        let v = [1.0, 0.5, 1.0, 0.5];
        assert_eq!(argsort_ascending(&v), vec![1, 3, 0, 2]);
    }

    #[test]
    fn permute_symmetric_moves_rows_and_columns_together() {
        let m = DMatrix::from_row_slice(3, 3, &[1.0, 2.0, 3.0, 2.0, 4.0, 5.0, 3.0, 5.0, 6.0]);
        let p = permute_symmetric(&m, &[2, 0, 1]);
        assert_eq!(
            p,
            DMatrix::from_row_slice(3, 3, &[6.0, 3.0, 5.0, 3.0, 1.0, 2.0, 5.0, 2.0, 4.0])
        );
        assert_eq!(p, p.transpose());
    }

    #[test]
    fn identity_permutation_is_a_no_op() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, -1.0, -1.0, 1.0]);
        assert_eq!(permute_symmetric(&m, &[0, 1]), m);
    }
}
