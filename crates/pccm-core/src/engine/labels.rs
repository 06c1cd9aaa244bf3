use crate::core::models::error::ShapeError;

/// Repeats every label `factor` times in place: label `i` fills `[i*factor, (i+1)*factor)`.
pub fn replicate_labels(labels: &[f64], factor: usize) -> Vec<f64> {
    labels
        .iter()
        .flat_map(|&y| std::iter::repeat_n(y, factor))
        .collect()
}

/// Repeats label `i` `counts[i]` times, keeping each sample's replicas contiguous.
pub fn replicate_labels_by_counts(labels: &[f64], counts: &[usize]) -> Result<Vec<f64>, ShapeError> {
    if labels.len() != counts.len() {
        return Err(ShapeError::LabelCount {
            expected: counts.len(),
            found: labels.len(),
        });
    }
    Ok(labels
        .iter()
        .zip(counts)
        .flat_map(|(&y, &c)| std::iter::repeat_n(y, c))
        .collect())
}

/// The shared replica count, if every sample has the same one.
pub fn uniform_factor(counts: &[usize]) -> Option<usize> {
    let (&first, rest) = counts.split_first()?;
    rest.iter().all(|&c| c == first).then_some(first)
}
