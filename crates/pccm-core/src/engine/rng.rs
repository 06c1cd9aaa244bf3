use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws one sub-seed per sample from a master stream.
///
/// Seeds are drawn in sample order before any work is dispatched, so each sample's
/// stream is fixed by the master seed alone, independent of scheduling.
pub fn sample_seeds(master_seed: Option<u64>, n_samples: usize) -> Vec<u64> {
    let mut master = match master_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    (0..n_samples).map(|_| master.r#gen::<u64>()).collect()
}

pub fn sample_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
