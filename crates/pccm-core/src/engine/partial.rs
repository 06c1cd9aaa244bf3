use super::error::SampleError;
use super::permutation::{argsort_ascending, permute_symmetric};
use super::trim::{TrimmedDescriptor, trim};
use nalgebra::DMatrix;
use rand::Rng;
use rand::seq::SliceRandom;
use std::ops::Range;

/// Atoms grouped by identical diagonal value, in ascending diagonal order.
///
/// `order` is the canonical base ordering (original atom indices sorted by diagonal).
/// Each group is a range of positions in that base ordering whose atoms are
/// interchangeable; permutations never move an atom across groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapGroups {
    order: Vec<usize>,
    groups: Vec<Range<usize>>,
}

impl SwapGroups {
    pub fn from_diagonal(diagonal: &[f64]) -> Self {
        let order = argsort_ascending(diagonal);

        let mut groups = Vec::new();
        let mut start = 0;
        for pos in 1..=order.len() {
            if pos == order.len() || diagonal[order[pos]] != diagonal[order[start]] {
                groups.push(start..pos);
                start = pos;
            }
        }

        Self { order, groups }
    }

    pub fn base_order(&self) -> &[usize] {
        &self.order
    }

    pub fn groups(&self) -> &[Range<usize>] {
        &self.groups
    }

    /// Number of distinguishable permutations, `prod(size!)`, saturating at `usize::MAX`.
    pub fn permutation_count(&self) -> usize {
        self.groups
            .iter()
            .map(|g| saturating_factorial(g.len()))
            .fold(1usize, |acc, f| acc.saturating_mul(f))
    }

    /// One permutation of base positions, shuffled independently within each group.
    pub fn sample_permutation<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<usize> {
        let mut permutation: Vec<usize> = (0..self.order.len()).collect();
        for group in &self.groups {
            permutation[group.clone()].shuffle(rng);
        }
        permutation
    }
}

fn saturating_factorial(k: usize) -> usize {
    (2..=k).fold(1usize, |acc, i| acc.saturating_mul(i))
}

/// Produces `min(num_rep, n_perm)` descriptors permuting only tied-diagonal atoms.
///
/// The matrix is first reordered by ascending diagonal; every permutation is then
/// applied to that base ordering independently.
pub fn partial_permutations<R: Rng + ?Sized>(
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

    let diagonal: Vec<f64> = matrix.diagonal().iter().copied().collect();
    let groups = SwapGroups::from_diagonal(&diagonal);
    let count = num_rep.min(groups.permutation_count());

    let base = permute_symmetric(matrix, groups.base_order());

    (0..count)
        .map(|_| {
            let permutation = groups.sample_permutation(rng);
            trim(&permute_symmetric(&base, &permutation))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // Diagonal [C, H, N, H, C] style keys: two pairs of ties and one singleton.
    fn tied_matrix() -> DMatrix<f64> {
        DMatrix::from_row_slice(
            5,
            5,
            &[
                3.0, 0.1, 0.2, 0.3, 0.4, //
                0.1, 1.0, 0.5, 0.6, 0.7, //
                0.2, 0.5, 5.0, 0.8, 0.9, //
                0.3, 0.6, 0.8, 1.0, 1.1, //
                0.4, 0.7, 0.9, 1.1, 3.0,
            ],
        )
    }

    #[test]
    fn groups_follow_ascending_diagonal_runs() {
        let groups = SwapGroups::from_diagonal(&[3.0, 1.0, 5.0, 1.0, 3.0]);
        assert_eq!(groups.base_order(), &[1, 3, 0, 4, 2]);
        assert_eq!(groups.groups(), &[0..2, 2..4, 4..5]);
        assert_eq!(groups.permutation_count(), 4);
    }

    #[test]
    fn distinct_diagonal_has_single_permutation() {
        let groups = SwapGroups::from_diagonal(&[0.5, 18.0, 37.0]);
        assert_eq!(groups.permutation_count(), 1);
        assert_eq!(groups.groups().len(), 3);
    }

    #[test]
    fn permutation_count_saturates() {
        let groups = SwapGroups::from_diagonal(&vec![1.0; 40]);
        assert_eq!(groups.permutation_count(), usize::MAX);
    }

    #[test]
    fn sampled_permutations_stay_within_groups() {
        let groups = SwapGroups::from_diagonal(&[3.0, 1.0, 5.0, 1.0, 3.0]);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let p = groups.sample_permutation(&mut rng);
            for g in groups.groups() {
                let mut members: Vec<usize> = p[g.clone()].to_vec();
                members.sort_unstable();
                assert_eq!(members, g.clone().collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn emits_min_of_num_rep_and_permutation_count() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(partial_permutations(&tied_matrix(), 2, &mut rng).unwrap().len(), 2);
        assert_eq!(partial_permutations(&tied_matrix(), 10, &mut rng).unwrap().len(), 4);
    }

    // Off-diagonal (i, j) encodes its atom pair as 10 * (min + 1) + (max + 1).
    fn labelled_pair_matrix(diagonal: &[f64]) -> DMatrix<f64> {
        let n = diagonal.len();
        DMatrix::from_fn(n, n, |i, j| {
            if i == j {
                diagonal[i]
            } else {
                (10 * (i.min(j) + 1) + i.max(j) + 1) as f64
            }
        })
    }

    fn atom_at(matrix: &DMatrix<f64>, row: usize) -> usize {
        let pair = |v: f64| {
            let v = v.round() as usize;
            [v / 10 - 1, v % 10 - 1]
        };
        let others: Vec<usize> = (0..matrix.ncols()).filter(|&c| c != row).collect();
        let a = pair(matrix[(row, others[0])]);
        let b = pair(matrix[(row, others[1])]);
        if b.contains(&a[0]) { a[0] } else { a[1] }
    }

    #[test]
    fn shuffles_tied_atoms_without_crossing_groups() {
        // Atoms 0..4 share one key, atoms 4..7 another; base order is the identity.
        let diagonal = [1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0];
        let m = labelled_pair_matrix(&diagonal);
        let n_perm = SwapGroups::from_diagonal(&diagonal).permutation_count();
        assert_eq!(n_perm, 24 * 6);

        let mut rng = StdRng::seed_from_u64(13);
        let out = partial_permutations(&m, n_perm, &mut rng).unwrap();
        assert_eq!(out.len(), n_perm);

        let mut distinct: Vec<&TrimmedDescriptor> = Vec::new();
        for d in &out {
            if !distinct.contains(&d) {
                distinct.push(d);
            }
            let permuted = crate::engine::trim::untrim(d).unwrap();
            for row in 0..diagonal.len() {
                assert_eq!(atom_at(&permuted, row) < 4, row < 4);
            }
        }
        assert!(distinct.len() > 1, "found {} arrangement(s)", distinct.len());
    }

    #[test]
    fn all_distinct_diagonal_emits_one_base_ordered_descriptor() {
        let m = DMatrix::from_row_slice(3, 3, &[5.0, 0.1, 0.2, 0.1, 0.5, 0.3, 0.2, 0.3, 18.0]);
        let mut rng = StdRng::seed_from_u64(9);
        let out = partial_permutations(&m, 5, &mut rng).unwrap();
        assert_eq!(out, vec![vec![0.5, 0.1, 0.3, 5.0, 0.2, 18.0]]);
    }

    #[test]
    fn diagonal_of_every_descriptor_is_sorted_ascending() {
        let mut rng = StdRng::seed_from_u64(21);
        for d in partial_permutations(&tied_matrix(), 4, &mut rng).unwrap() {
            let diag: Vec<f64> = crate::engine::trim::diagonal_positions(5)
                .map(|p| d[p])
                .collect();
            assert_eq!(diag, vec![1.0, 1.0, 3.0, 3.0, 5.0]);
        }
    }
}
