use crate::core::elements::{ElementTable, ReferenceLevel};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid replica count: {0}. At least one descriptor per sample must be generated")]
    InvalidReplicaCount(usize),
}

/// What goes on the diagonal of the interaction matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagonalMode {
    /// `q_i^2`.
    #[default]
    Plain,
    /// `0.5 * Z_i^2.4`.
    NuclearCharge,
    /// The free-atom energy of the element at the given level of theory.
    ReferenceEnergy(ReferenceLevel),
}

/// How each sample's matrix is turned into one or more descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Augmentation {
    /// A single trimmed descriptor per sample.
    #[default]
    None,
    /// `num_rep` descriptors sorted by noise-perturbed row norms.
    RandomSort { num_rep: usize },
    /// Up to `num_rep` descriptors permuting only rows/columns with tied diagonals.
    PartialPermutation { num_rep: usize },
}

impl Augmentation {
    /// The requested number of descriptors per sample (an upper bound for partial permutation).
    pub fn num_rep(&self) -> usize {
        match *self {
            Augmentation::None => 1,
            Augmentation::RandomSort { num_rep } | Augmentation::PartialPermutation { num_rep } => {
                num_rep
            }
        }
    }

    pub fn is_randomized(&self) -> bool {
        !matches!(self, Augmentation::None)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.num_rep() {
            0 => Err(ConfigError::InvalidReplicaCount(0)),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorConfig {
    pub diagonal: DiagonalMode,
    pub augmentation: Augmentation,
    /// Master seed for all random draws; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Fail instead of warning when samples yield different replica counts.
    pub require_uniform_replicas: bool,
    pub elements: ElementTable,
}

impl DescriptorConfig {
    /// Plain partial-charge matrices, randomly sorted `num_rep` times per sample.
    pub fn partial_charge(num_rep: usize) -> Result<Self, ConfigError> {
        DescriptorConfigBuilder::new()
            .diagonal(DiagonalMode::Plain)
            .augmentation(Augmentation::RandomSort { num_rep })
            .build()
    }

    /// Hybrid matrices with `0.5 * Z^2.4` diagonals and partial permutation.
    pub fn hybrid_nuclear_charge(num_rep: usize) -> Result<Self, ConfigError> {
        DescriptorConfigBuilder::new()
            .diagonal(DiagonalMode::NuclearCharge)
            .augmentation(Augmentation::PartialPermutation { num_rep })
            .build()
    }

    /// Hybrid matrices with free-atom energy diagonals and partial permutation.
    pub fn hybrid_reference_energy(
        level: ReferenceLevel,
        num_rep: usize,
    ) -> Result<Self, ConfigError> {
        DescriptorConfigBuilder::new()
            .diagonal(DiagonalMode::ReferenceEnergy(level))
            .augmentation(Augmentation::PartialPermutation { num_rep })
            .build()
    }
}

#[derive(Default)]
pub struct DescriptorConfigBuilder {
    diagonal: Option<DiagonalMode>,
    augmentation: Option<Augmentation>,
    seed: Option<u64>,
    require_uniform_replicas: bool,
    elements: Option<ElementTable>,
}

impl DescriptorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagonal(mut self, mode: DiagonalMode) -> Self {
        self.diagonal = Some(mode);
        self
    }
    pub fn augmentation(mut self, augmentation: Augmentation) -> Self {
        self.augmentation = Some(augmentation);
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
    pub fn require_uniform_replicas(mut self, require: bool) -> Self {
        self.require_uniform_replicas = require;
        self
    }
    pub fn elements(mut self, table: ElementTable) -> Self {
        self.elements = Some(table);
        self
    }

    pub fn build(self) -> Result<DescriptorConfig, ConfigError> {
        let augmentation = self
            .augmentation
            .ok_or(ConfigError::MissingParameter("augmentation"))?;
        augmentation.validate()?;

        Ok(DescriptorConfig {
            diagonal: self
                .diagonal
                .ok_or(ConfigError::MissingParameter("diagonal"))?,
            augmentation,
            seed: self.seed,
            require_uniform_replicas: self.require_uniform_replicas,
            elements: self.elements.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_succeeds_with_all_required_fields() {
        let config = DescriptorConfigBuilder::new()
            .diagonal(DiagonalMode::NuclearCharge)
            .augmentation(Augmentation::PartialPermutation { num_rep: 5 })
            .seed(Some(7))
            .build()
            .unwrap();

        assert_eq!(config.diagonal, DiagonalMode::NuclearCharge);
        assert_eq!(config.augmentation.num_rep(), 5);
        assert_eq!(config.seed, Some(7));
        assert!(!config.require_uniform_replicas);
        assert_eq!(config.elements, ElementTable::default());
    }

    #[test]
    fn builder_fails_if_diagonal_is_missing() {
        let result = DescriptorConfigBuilder::new()
            .augmentation(Augmentation::None)
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("diagonal")));
    }

    #[test]
    fn builder_fails_if_augmentation_is_missing() {
        let result = DescriptorConfigBuilder::new()
            .diagonal(DiagonalMode::Plain)
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("augmentation")));
    }

    #[test]
    fn zero_replicas_are_rejected_for_every_randomized_strategy() {
        assert_eq!(
            DescriptorConfig::partial_charge(0),
            Err(ConfigError::InvalidReplicaCount(0))
        );
        assert_eq!(
            DescriptorConfig::hybrid_nuclear_charge(0),
            Err(ConfigError::InvalidReplicaCount(0))
        );
        assert_eq!(
            DescriptorConfig::hybrid_reference_energy(ReferenceLevel::Pbe, 0),
            Err(ConfigError::InvalidReplicaCount(0))
        );
    }

    #[test]
    fn presets_select_expected_modes() {
        let pccm = DescriptorConfig::partial_charge(3).unwrap();
        assert_eq!(pccm.diagonal, DiagonalMode::Plain);
        assert_eq!(pccm.augmentation, Augmentation::RandomSort { num_rep: 3 });

        let hybrid = DescriptorConfig::hybrid_reference_energy(ReferenceLevel::Ccsd, 2).unwrap();
        assert_eq!(
            hybrid.diagonal,
            DiagonalMode::ReferenceEnergy(ReferenceLevel::Ccsd)
        );
        assert_eq!(
            hybrid.augmentation,
            Augmentation::PartialPermutation { num_rep: 2 }
        );
    }

    #[test]
    fn trim_only_augmentation_yields_one_replica() {
        assert_eq!(Augmentation::None.num_rep(), 1);
        assert!(!Augmentation::None.is_randomized());
        assert!(Augmentation::None.validate().is_ok());
    }
}
