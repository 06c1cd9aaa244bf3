use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "SciFlow developers",
    version,
    about = "PCCM CLI - Generate partial-charge Coulomb matrix descriptors, with randomized-sort and partial-permutation augmentation, for molecular machine learning.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build descriptors for every sample of a dataset and write them with their labels.
    Generate(GenerateArgs),
    /// Print the element parameters used for diagonal terms.
    Elements(ElementsArgs),
}

/// Self-interaction term placed on the matrix diagonal.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DiagonalKind {
    /// Squared partial charge, `q_i^2`.
    Plain,
    /// `0.5 * Z^2.4` from the nuclear charge.
    NuclearCharge,
    /// Per-element reference energy at the chosen level of theory.
    ReferenceEnergy,
}

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceLevelKind {
    Pbe,
    Ccsd,
}

/// How many descriptors each sample contributes.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AugmentationKind {
    /// One trimmed descriptor per sample.
    None,
    /// `num-rep` descriptors ordered by noise-perturbed row norms.
    RandomSort,
    /// Up to `num-rep` descriptors permuting atoms with tied diagonals.
    Partial,
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    // --- Core Arguments ---
    /// Path to the geometry CSV (one sample per line).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub geometries: PathBuf,

    /// Path to the partial-charge CSV (one line of per-atom charges per sample).
    #[arg(long, required = true, value_name = "PATH")]
    pub charges: PathBuf,

    /// Path to a single-column label CSV.
    /// Required when the geometry file carries no energy columns.
    #[arg(short, long, value_name = "PATH")]
    pub labels: Option<PathBuf>,

    /// Path for the output descriptor CSV.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Descriptor Overrides ---
    /// Override the diagonal mode.
    #[arg(short, long, value_enum)]
    pub diagonal: Option<DiagonalKind>,

    /// Override the level of theory used by `reference-energy` diagonals.
    #[arg(long, value_enum)]
    pub reference_level: Option<ReferenceLevelKind>,

    /// Override the element parameter table with a TOML file.
    #[arg(long, value_name = "PATH")]
    pub element_table: Option<PathBuf>,

    // --- Augmentation Overrides ---
    /// Override the augmentation strategy.
    #[arg(short, long, value_enum)]
    pub augmentation: Option<AugmentationKind>,

    /// Override the number of replicas per sample.
    #[arg(short, long, value_name = "INT")]
    pub num_rep: Option<usize>,

    /// Seed for reproducible augmentation.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Fail instead of warning when samples yield different numbers of partial permutations.
    #[arg(long)]
    pub require_uniform_replicas: bool,

    // --- Input Layout Overrides ---
    /// Input CSV files have no header line.
    #[arg(long)]
    pub no_header: bool,

    /// The geometry CSV has no leading index column.
    #[arg(long)]
    pub no_index: bool,

    /// Number of trailing energy columns in the geometry CSV (0, 1 or 2).
    #[arg(long, value_name = "INT", value_parser = clap::value_parser!(u8).range(0..=2))]
    pub energy_columns: Option<u8>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S augmentation.num-rep=10
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `elements` subcommand.
#[derive(Args, Debug)]
pub struct ElementsArgs {
    /// Merge a TOML element table over the built-in parameters before printing.
    #[arg(short, long, value_name = "PATH")]
    pub table: Option<PathBuf>,
}
