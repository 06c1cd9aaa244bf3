use crate::core::models::dataset::Dataset;
use crate::core::models::sample::Sample;
use crate::engine::config::{Augmentation, DescriptorConfig};
use crate::engine::error::{DescriptorError, SampleError};
use crate::engine::interaction::InteractionEngine;
use crate::engine::labels::{replicate_labels, replicate_labels_by_counts, uniform_factor};
use crate::engine::partial::partial_permutations;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::randomized::randomized_sort;
use crate::engine::rng::{sample_rng, sample_seeds};
use crate::engine::trim::{TrimmedDescriptor, trim};
use nalgebra::{DMatrix, DVector};
use std::ops::Range;
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Descriptor rows with their replicated labels.
///
/// Rows are grouped by sample in dataset order: the `replicas[i]` rows of sample `i`
/// precede those of sample `i + 1`, and each carries label `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedDataset {
    pub descriptors: DMatrix<f64>,
    pub labels: DVector<f64>,
    pub replicas: Vec<usize>,
}

impl AugmentedDataset {
    pub fn n_rows(&self) -> usize {
        self.descriptors.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.descriptors.ncols()
    }

    /// The shared number of rows per sample, or `None` if samples differ.
    pub fn replication_factor(&self) -> Option<usize> {
        uniform_factor(&self.replicas)
    }

    /// Row range belonging to sample `index`.
    pub fn rows_for_sample(&self, index: usize) -> Option<Range<usize>> {
        let count = *self.replicas.get(index)?;
        let start: usize = self.replicas[..index].iter().sum();
        Some(start..start + count)
    }
}

/// Generates descriptors and labels for a whole dataset.
///
/// Samples are processed independently (in parallel with the `parallel` feature).
/// Any sample error aborts the call; no partial output is returned.
#[instrument(skip_all, name = "descriptor_workflow")]
pub fn run(
    dataset: &Dataset,
    config: &DescriptorConfig,
    reporter: &ProgressReporter,
) -> Result<AugmentedDataset, DescriptorError> {
    config.augmentation.validate()?;

    let n_samples = dataset.n_samples();
    info!(
        samples = n_samples,
        n_atoms = dataset.n_atoms(),
        diagonal = ?config.diagonal,
        augmentation = ?config.augmentation,
        "Generating descriptors."
    );

    let engine = InteractionEngine::new(&config.elements, config.diagonal);
    let seeds = if config.augmentation.is_randomized() {
        sample_seeds(config.seed, n_samples)
    } else {
        vec![0; n_samples]
    };

    reporter.report(Progress::StageStart {
        name: "Building descriptors",
    });
    reporter.report(Progress::SamplesStart {
        total: n_samples as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = 0..n_samples;

    #[cfg(feature = "parallel")]
    let iterator = (0..n_samples).into_par_iter();

    let per_sample: Vec<Vec<TrimmedDescriptor>> = iterator
        .map(|i| -> Result<Vec<TrimmedDescriptor>, DescriptorError> {
            let descriptors = describe_sample(
                &engine,
                &dataset.samples()[i],
                &dataset.charges()[i],
                config.augmentation,
                seeds[i],
            )
            .map_err(|e| e.in_sample(i))?;
            reporter.report(Progress::SampleDone);
            Ok(descriptors)
        })
        .collect::<Result<_, DescriptorError>>()?;

    reporter.report(Progress::SamplesFinish);

    let replicas: Vec<usize> = per_sample.iter().map(Vec::len).collect();
    let labels = match config.augmentation {
        Augmentation::None => dataset.labels().to_vec(),
        Augmentation::RandomSort { num_rep } => replicate_labels(dataset.labels(), num_rep),
        Augmentation::PartialPermutation { .. } => {
            check_uniform_replicas(&replicas, config.require_uniform_replicas)?;
            replicate_labels_by_counts(dataset.labels(), &replicas)?
        }
    };

    let n_rows = labels.len();
    let descriptors = DMatrix::from_row_iterator(
        n_rows,
        dataset.n_features(),
        per_sample.iter().flatten().flat_map(|d| d.iter().copied()),
    );

    reporter.report(Progress::StageFinish);
    info!(rows = n_rows, "Descriptor generation complete.");

    Ok(AugmentedDataset {
        descriptors,
        labels: DVector::from_vec(labels),
        replicas,
    })
}

fn describe_sample(
    engine: &InteractionEngine,
    sample: &Sample,
    charges: &[f64],
    augmentation: Augmentation,
    seed: u64,
) -> Result<Vec<TrimmedDescriptor>, SampleError> {
    let matrix = engine.build(sample, charges)?;
    match augmentation {
        Augmentation::None => Ok(vec![trim(&matrix)?]),
        Augmentation::RandomSort { num_rep } => {
            randomized_sort(&matrix, num_rep, &mut sample_rng(seed))
        }
        Augmentation::PartialPermutation { num_rep } => {
            partial_permutations(&matrix, num_rep, &mut sample_rng(seed))
        }
    }
}

fn check_uniform_replicas(replicas: &[usize], strict: bool) -> Result<(), DescriptorError> {
    let Some(&expected) = replicas.first() else {
        return Ok(());
    };
    let Some((sample, &found)) = replicas
        .iter()
        .enumerate()
        .find(|&(_, &count)| count != expected)
    else {
        debug!(factor = expected, "Uniform replication factor.");
        return Ok(());
    };

    if strict {
        return Err(DescriptorError::ReplicaMismatch {
            sample,
            expected,
            found,
        });
    }
    warn!(
        sample,
        expected,
        found,
        "Samples yield different numbers of partial permutations; labels are replicated per sample."
    );
    Ok(())
}
