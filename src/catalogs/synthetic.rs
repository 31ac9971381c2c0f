//! Seeded synthetic star samples.
//!
//! Positions are uniform in RA and Dec (not uniform on the sphere, so the
//! poles are over-dense), which is what a flat RA/Dec plot wants.

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::StarRecord;

/// Default sample size.
pub const DEFAULT_COUNT: usize = 500;
/// Default seed.
pub const DEFAULT_SEED: u64 = 42;

/// Magnitude range of generated stars (naked-eye limit).
pub const MAGNITUDE_RANGE: std::ops::Range<f64> = 3.0..6.0;

/// Generate `count` stars with ids `0..count`.
///
/// RA ∈ [0, 360), Dec ∈ [-90, 90), BP-RP ∈ [-0.5, 2.0) and G ∈ [3, 6), each
/// drawn uniformly. The same `seed` always yields the same stars.
pub fn generate_stars(count: usize, seed: u64) -> Vec<StarRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let ra: f64 = rng.random_range(0.0..360.0);
            let dec: f64 = rng.random_range(-90.0..90.0);
            let bp_rp: f64 = rng.random_range(-0.5..2.0);
            let mag: f64 = rng.random_range(MAGNITUDE_RANGE);
            StarRecord::new(i as u64, ra, dec, mag, bp_rp)
        })
        .collect()
}
