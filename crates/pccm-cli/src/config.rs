pub mod defaults;
pub mod models;

use crate::cli::{AugmentationKind, DiagonalKind, GenerateArgs, ReferenceLevelKind};
use crate::error::{CliError, Result};
use clap::ValueEnum;
use defaults::DefaultsConfig;
use models::AppConfig;
use pccm::core::elements::{ElementTable, ReferenceLevel};
use pccm::core::io::geometry::{EnergyColumns, GeometryCsvOptions};
use pccm::engine::config::{Augmentation, DescriptorConfigBuilder, DiagonalMode};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialDescriptorConfig {
    diagonal: Option<DiagonalKind>,
    reference_level: Option<ReferenceLevelKind>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialAugmentationConfig {
    strategy: Option<AugmentationKind>,
    num_rep: Option<usize>,
    seed: Option<u64>,
    require_uniform_replicas: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialElementsConfig {
    table: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialInputConfig {
    has_header: Option<bool>,
    index_column: Option<bool>,
    energy_columns: Option<u8>,
}

/// The `generate` settings as read from a TOML file, before CLI overrides.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialGenerateConfig {
    descriptor: Option<PartialDescriptorConfig>,
    augmentation: Option<PartialAugmentationConfig>,
    elements: Option<PartialElementsConfig>,
    input: Option<PartialInputConfig>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl PartialGenerateConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self =
            toml::from_str(&content).map_err(|e| CliError::parsing(path, e))?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    pub fn merge_with_cli(mut self, args: &GenerateArgs) -> Result<AppConfig> {
        self.apply_set_values(&args.set_values)?;

        let defaults = DefaultsConfig::default();
        let descriptor = self.descriptor.take().unwrap_or_default();
        let augmentation = self.augmentation.take().unwrap_or_default();
        let elements = self.elements.take().unwrap_or_default();
        let input = self.input.take().unwrap_or_default();

        let reference_level = match args
            .reference_level
            .or(descriptor.reference_level)
            .unwrap_or(defaults.reference_level)
        {
            ReferenceLevelKind::Pbe => ReferenceLevel::Pbe,
            ReferenceLevelKind::Ccsd => ReferenceLevel::Ccsd,
        };
        let diagonal = match args
            .diagonal
            .or(descriptor.diagonal)
            .unwrap_or(defaults.diagonal)
        {
            DiagonalKind::Plain => DiagonalMode::Plain,
            DiagonalKind::NuclearCharge => DiagonalMode::NuclearCharge,
            DiagonalKind::ReferenceEnergy => DiagonalMode::ReferenceEnergy(reference_level),
        };

        let strategy = args
            .augmentation
            .or(augmentation.strategy)
            .unwrap_or(defaults.augmentation);
        let num_rep = args
            .num_rep
            .or(augmentation.num_rep)
            .unwrap_or(defaults.num_rep);
        let augmentation_mode = match strategy {
            AugmentationKind::None => {
                if args.num_rep.is_some() {
                    warn!("`--num-rep` has no effect without an augmentation strategy.");
                }
                Augmentation::None
            }
            AugmentationKind::RandomSort => Augmentation::RandomSort { num_rep },
            AugmentationKind::Partial => Augmentation::PartialPermutation { num_rep },
        };

        let table_path = args.element_table.clone().or_else(|| {
            elements
                .table
                .map(|p| self.resolve_relative(&p))
        });
        let table = match table_path {
            Some(path) => {
                debug!("Loading element table from {:?}", path);
                ElementTable::load(&path).map_err(|e| CliError::parsing(&path, e))?
            }
            None => ElementTable::default(),
        };

        let energy_columns = match args
            .energy_columns
            .or(input.energy_columns)
            .unwrap_or(defaults.energy_columns)
        {
            0 => EnergyColumns::None,
            1 => EnergyColumns::Single,
            2 => EnergyColumns::Difference,
            n => {
                return Err(CliError::Config(format!(
                    "`input.energy-columns` must be 0, 1 or 2, got {}",
                    n
                )));
            }
        };
        let input_options = GeometryCsvOptions {
            has_header: !args.no_header && input.has_header.unwrap_or(defaults.has_header),
            index_column: !args.no_index && input.index_column.unwrap_or(defaults.index_column),
            energy_columns,
        };

        let descriptor_config = DescriptorConfigBuilder::new()
            .diagonal(diagonal)
            .augmentation(augmentation_mode)
            .seed(args.seed.or(augmentation.seed))
            .require_uniform_replicas(
                args.require_uniform_replicas
                    || augmentation
                        .require_uniform_replicas
                        .unwrap_or(defaults.require_uniform_replicas),
            )
            .elements(table)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        Ok(AppConfig {
            descriptor: descriptor_config,
            input: input_options,
        })
    }

    fn resolve_relative(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "descriptor.diagonal" => {
                    self.descriptor
                        .get_or_insert_with(Default::default)
                        .diagonal = Some(parse_kind(key, value_str)?);
                }
                "descriptor.reference-level" => {
                    self.descriptor
                        .get_or_insert_with(Default::default)
                        .reference_level = Some(parse_kind(key, value_str)?);
                }
                "augmentation.strategy" => {
                    self.augmentation
                        .get_or_insert_with(Default::default)
                        .strategy = Some(parse_kind(key, value_str)?);
                }
                "augmentation.num-rep" => {
                    self.augmentation
                        .get_or_insert_with(Default::default)
                        .num_rep = Some(parse_value(key, value_str)?);
                }
                "augmentation.seed" => {
                    self.augmentation
                        .get_or_insert_with(Default::default)
                        .seed = Some(parse_value(key, value_str)?);
                }
                "augmentation.require-uniform-replicas" => {
                    self.augmentation
                        .get_or_insert_with(Default::default)
                        .require_uniform_replicas = Some(parse_value(key, value_str)?);
                }
                "elements.table" => {
                    self.elements.get_or_insert_with(Default::default).table =
                        Some(PathBuf::from(value_str));
                }
                "input.has-header" => {
                    self.input.get_or_insert_with(Default::default).has_header =
                        Some(parse_value(key, value_str)?);
                }
                "input.index-column" => {
                    self.input.get_or_insert_with(Default::default).index_column =
                        Some(parse_value(key, value_str)?);
                }
                "input.energy-columns" => {
                    self.input.get_or_insert_with(Default::default).energy_columns =
                        Some(parse_value(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value)))
}

fn parse_kind<T: ValueEnum>(key: &str, value: &str) -> Result<T> {
    T::from_str(value, true)
        .map_err(|e| CliError::Config(format!("Invalid value for {}: {}", key, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn write_config_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let file_path = dir.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn generate_args(extra: &[&str]) -> GenerateArgs {
        let mut args = vec![
            "pccm", "generate", "-g", "geo.csv", "--charges", "q.csv", "-o", "out.csv",
        ];
        args.extend_from_slice(extra);
        match Cli::parse_from(args).command {
            Commands::Generate(args) => args,
            _ => panic!("Expected 'generate' subcommand"),
        }
    }

    #[test]
    fn empty_config_falls_back_to_defaults() {
        let config = PartialGenerateConfig::default()
            .merge_with_cli(&generate_args(&[]))
            .unwrap();

        assert_eq!(config.descriptor.diagonal, DiagonalMode::Plain);
        assert_eq!(config.descriptor.augmentation, Augmentation::None);
        assert_eq!(config.descriptor.seed, None);
        assert!(!config.descriptor.require_uniform_replicas);
        assert_eq!(config.input, GeometryCsvOptions::default());
    }

    #[test]
    fn file_values_are_loaded() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            "pccm.toml",
            r#"
            [descriptor]
            diagonal = "reference-energy"
            reference-level = "ccsd"

            [augmentation]
            strategy = "partial"
            num-rep = 8
            seed = 42
            require-uniform-replicas = true

            [input]
            has-header = false
            index-column = false
            energy-columns = 1
            "#,
        );

        let config = PartialGenerateConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&generate_args(&[]))
            .unwrap();

        assert_eq!(
            config.descriptor.diagonal,
            DiagonalMode::ReferenceEnergy(ReferenceLevel::Ccsd)
        );
        assert_eq!(
            config.descriptor.augmentation,
            Augmentation::PartialPermutation { num_rep: 8 }
        );
        assert_eq!(config.descriptor.seed, Some(42));
        assert!(config.descriptor.require_uniform_replicas);
        assert_eq!(
            config.input,
            GeometryCsvOptions {
                has_header: false,
                index_column: false,
                energy_columns: EnergyColumns::Single,
            }
        );
    }

    #[test]
    fn cli_args_override_file_values() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            "pccm.toml",
            r#"
            [descriptor]
            diagonal = "plain"

            [augmentation]
            strategy = "partial"
            num-rep = 8 # Will be overridden
            "#,
        );
        let args = generate_args(&[
            "--diagonal",
            "nuclear-charge",
            "-a",
            "random-sort",
            "-n",
            "3",
            "--seed",
            "9",
        ]);

        let config = PartialGenerateConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(config.descriptor.diagonal, DiagonalMode::NuclearCharge);
        assert_eq!(
            config.descriptor.augmentation,
            Augmentation::RandomSort { num_rep: 3 }
        );
        assert_eq!(config.descriptor.seed, Some(9));
    }

    #[test]
    fn set_value_overrides_file_and_defaults() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            "pccm.toml",
            r#"
            [augmentation]
            strategy = "random-sort"
            num-rep = 5 # Will be overridden by --set
            "#,
        );
        let args = generate_args(&[
            "-S",
            "augmentation.num-rep=20",
            "-S",
            "descriptor.diagonal=nuclear-charge",
        ]);

        let config = PartialGenerateConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(
            config.descriptor.augmentation,
            Augmentation::RandomSort { num_rep: 20 }
        );
        assert_eq!(config.descriptor.diagonal, DiagonalMode::NuclearCharge);
    }

    #[test]
    fn unsupported_set_key_is_rejected() {
        let args = generate_args(&["-S", "augmentation.noise=0.1"]);
        let result = PartialGenerateConfig::default().merge_with_cli(&args);
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("augmentation.noise")));
    }

    #[test]
    fn zero_replicas_are_a_config_error() {
        let args = generate_args(&["-a", "partial", "-n", "0"]);
        let result = PartialGenerateConfig::default().merge_with_cli(&args);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = write_config_file(&dir, "bad.toml", "[descriptor]\nsigma = 1.0\n");
        let result = PartialGenerateConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn element_table_path_is_relative_to_config_file() {
        let dir = tempdir().unwrap();
        write_config_file(
            &dir,
            "elements.toml",
            "[elements.O]\nnuclear-charge = 8.0\npbe-energy = -75.0\nccsd-energy = -75.1\n",
        );
        let path = write_config_file(&dir, "pccm.toml", "[elements]\ntable = \"elements.toml\"\n");

        let config = PartialGenerateConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&generate_args(&[]))
            .unwrap();

        assert_eq!(config.descriptor.elements.get("O").unwrap().nuclear_charge, 8.0);
        assert!(config.descriptor.elements.get("H").is_some());
    }
}
