use super::config::ConfigError;
use crate::core::models::error::ShapeError;
use thiserror::Error;

/// Failures confined to a single sample's matrix construction or augmentation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SampleError {
    #[error("unknown element '{label}' at atom {atom}")]
    UnknownElement { atom: usize, label: String },

    #[error("atoms {atom_a} and {atom_b} coincide (zero interatomic distance)")]
    DegenerateGeometry { atom_a: usize, atom_b: usize },

    #[error("expected {expected} partial charges, found {found}")]
    ChargeCount { expected: usize, found: usize },

    #[error("matrix is not square ({rows}x{cols})")]
    NonSquareMatrix { rows: usize, cols: usize },

    #[error("row norms are not finite, cannot draw sorting noise")]
    NonFiniteNorms,
}

impl SampleError {
    pub fn in_sample(self, index: usize) -> DescriptorError {
        DescriptorError::Sample {
            index,
            source: self,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DescriptorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(#[from] ShapeError),

    #[error("Sample {index}: {source}")]
    Sample {
        index: usize,
        #[source]
        source: SampleError,
    },

    #[error(
        "Sample {sample} yields {found} descriptors but sample 0 yields {expected}; replication factor is not uniform"
    )]
    ReplicaMismatch {
        sample: usize,
        expected: usize,
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_errors_carry_their_index() {
        let err = SampleError::DegenerateGeometry {
            atom_a: 0,
            atom_b: 2,
        }
        .in_sample(4);
        assert_eq!(
            err.to_string(),
            "Sample 4: atoms 0 and 2 coincide (zero interatomic distance)"
        );
    }

    #[test]
    fn config_and_shape_errors_convert() {
        let err: DescriptorError = ConfigError::InvalidReplicaCount(0).into();
        assert!(matches!(err, DescriptorError::Config(_)));

        let err: DescriptorError = ShapeError::EmptyDataset.into();
        assert_eq!(err.to_string(), "Shape mismatch: Dataset contains no samples");
    }
}
