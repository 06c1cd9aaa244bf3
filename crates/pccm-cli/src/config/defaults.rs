use crate::cli::{AugmentationKind, DiagonalKind, ReferenceLevelKind};

pub struct DefaultsConfig {
    pub diagonal: DiagonalKind,
    pub reference_level: ReferenceLevelKind,
    pub augmentation: AugmentationKind,
    pub num_rep: usize,
    pub require_uniform_replicas: bool,
    pub has_header: bool,
    pub index_column: bool,
    pub energy_columns: u8,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            diagonal: DiagonalKind::Plain,
            reference_level: ReferenceLevelKind::Pbe,
            augmentation: AugmentationKind::None,
            num_rep: 5,
            require_uniform_replicas: false,
            has_header: true,
            index_column: true,
            energy_columns: 2,
        }
    }
}
