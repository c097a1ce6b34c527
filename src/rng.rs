//! Random number service.
//!
//! All randomness in the simulation (shuffle order, target picks, jitter) is
//! drawn from a generator the caller passes in. These helpers build the
//! seedable generator used throughout and the small draws the engine needs.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Generator type used by the CLI, benches and tests
pub type SimRng = ChaCha8Rng;

/// Create a generator with a fixed seed for reproducible runs
pub fn seeded(seed: u64) -> SimRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Create a generator seeded from the thread-local entropy source.
///
/// Returns the seed alongside so a run can be replayed later.
pub fn from_entropy() -> (SimRng, u64) {
    let seed = rand::thread_rng().gen();
    (seeded(seed), seed)
}

/// Uniform float in [0, 1)
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}

/// Random offset `floor(variance * threshold * (2u - 1))`.
///
/// The result lies in `[-variance * threshold, variance * threshold)` and may be
/// negative.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, variance: f64, threshold: u32) -> i64 {
    (variance * f64::from(threshold) * (2.0 * uniform(rng) - 1.0)).floor() as i64
}
