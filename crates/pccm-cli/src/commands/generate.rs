use crate::cli::GenerateArgs;
use crate::config::PartialGenerateConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use pccm::{
    core::io::{charges, descriptors, geometry},
    core::models::dataset::Dataset,
    engine::{error::DescriptorError, progress::ProgressReporter},
    workflows,
};
use tracing::{info, warn};

pub fn run(args: GenerateArgs, show_progress: bool) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialGenerateConfig::from_file(path)?,
        None => PartialGenerateConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    info!("Loading geometries from {:?}", &args.geometries);
    let table = geometry::read_geometries_from_path(&args.geometries, config.input)
        .map_err(|e| CliError::parsing(&args.geometries, e))?;

    let labels = match (&args.labels, table.labels) {
        (Some(path), embedded) => {
            if embedded.is_some() {
                warn!("Labels from {:?} replace the energies in the geometry file.", path);
            }
            info!("Loading labels from {:?}", path);
            geometry::read_labels_from_path(path, config.input.has_header)
                .map_err(|e| CliError::parsing(path, e))?
        }
        (None, Some(embedded)) => embedded,
        (None, None) => {
            return Err(CliError::Argument(
                "The geometry file carries no energy columns; pass labels with --labels."
                    .to_string(),
            ));
        }
    };

    info!("Loading partial charges from {:?}", &args.charges);
    let charges = charges::read_charges_from_path(&args.charges, config.input.has_header)
        .map_err(|e| CliError::parsing(&args.charges, e))?;

    let dataset =
        Dataset::new(table.samples, charges, labels).map_err(DescriptorError::ShapeMismatch)?;
    println!(
        "Loaded {} samples of {} atoms ({} features per descriptor).",
        dataset.n_samples(),
        dataset.n_atoms(),
        dataset.n_features()
    );

    let progress_handler = if show_progress {
        CliProgressHandler::new()
    } else {
        CliProgressHandler::hidden()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the descriptor workflow...");
    let output = workflows::generate::run(&dataset, &config.descriptor, &reporter)?;

    match output.replication_factor() {
        Some(factor) => info!(factor, "Workflow finished, {} rows.", output.n_rows()),
        None => warn!(
            "Workflow finished, {} rows with a per-sample replication factor.",
            output.n_rows()
        ),
    }

    descriptors::write_descriptors_to_path(&args.output, &output.descriptors, &output.labels)
        .map_err(|e| CliError::FileWriting {
            path: args.output.clone(),
            source: e.into(),
        })?;

    println!(
        "✓ {} descriptors written to: {}",
        output.n_rows(),
        args.output.display()
    );

    Ok(())
}
