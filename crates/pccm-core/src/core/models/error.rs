use thiserror::Error;

/// Violations of the shape invariants linking samples, charges and labels.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Dataset contains no samples")]
    EmptyDataset,

    #[error("Sample {sample} contains no atoms")]
    EmptySample { sample: usize },

    #[error("Sample {sample} has {found} atoms, expected {expected} (taken from the first sample)")]
    AtomCount {
        sample: usize,
        expected: usize,
        found: usize,
    },

    #[error("Sample {sample} has {found} partial charges, expected {expected}")]
    ChargeCount {
        sample: usize,
        expected: usize,
        found: usize,
    },

    #[error("Got {found} charge vectors for {expected} samples")]
    ChargeRows { expected: usize, found: usize },

    #[error("Got {found} labels for {expected} samples")]
    LabelCount { expected: usize, found: usize },

    #[error("Flat geometry record has {0} fields, which is not a multiple of 4")]
    FlatLength(usize),

    #[error("Flat geometry record field {index}: expected a {expected}")]
    FlatField {
        index: usize,
        expected: &'static str,
    },
}
