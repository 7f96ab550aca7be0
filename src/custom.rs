//! User-tunable waveform defined by a per-harmonic weight vector.

// Based on GPL-3.0-licensed code (c) 2013-2017 by Matt Tytel

use alloc::vec;
use alloc::vec::Vec;

use crate::config::{ConfigError, CustomStrategy};
use crate::harmonics::{accumulate, SAW_SCALE};
use crate::table::WaveTable;
use crate::utils::random::Random;

/// Number of harmonics filled by [`CustomStrategy::Random10`].
pub const RANDOM_10_HARMONICS: usize = 10;

/// Produces `harmonics + 1` weights; weight `h` belongs to harmonic `h + 1`.
pub fn harmonic_weights(strategy: &CustomStrategy, harmonics: usize, rng: &mut Random) -> Vec<f32> {
    let len = harmonics + 1;
    match strategy {
        CustomStrategy::UpSaw => (0..len)
            .map(|h| {
                let w = SAW_SCALE / (h + 1) as f32;
                if h % 2 == 0 {
                    w
                } else {
                    -w
                }
            })
            .collect(),
        CustomStrategy::Random => (0..len)
            .map(|h| rng.get_bipolar() / (h * h + 1) as f32)
            .collect(),
        CustomStrategy::Random10 => {
            let mut weights = vec![0.0; len];
            for w in weights.iter_mut().take(RANDOM_10_HARMONICS) {
                *w = rng.get_bipolar();
            }
            weights
        }
        CustomStrategy::Weights(given) => {
            let mut weights = vec![0.0; len];
            for (w, g) in weights.iter_mut().zip(given) {
                *w = *g;
            }
            weights
        }
    }
}

/// Accumulates `weights` over the sine basis, then normalizes each level.
///
/// Samples are written half a cycle late, the same as the up-saw, so the
/// [`CustomStrategy::UpSaw`] weights reproduce the up-saw before
/// normalization. An empty weight vector has no fundamental and is
/// rejected.
pub fn custom(basis: &[f32], weights: &[f32]) -> Result<WaveTable, ConfigError> {
    if weights.is_empty() {
        return Err(ConfigError::Harmonics(0));
    }
    Ok(weighted(basis, weights))
}

fn weighted(basis: &[f32], weights: &[f32]) -> WaveTable {
    let harmonics = weights.len() - 1;
    let mut table = WaveTable::new(basis.len(), harmonics);
    accumulate(&mut table, basis, basis.len() / 2, |h| weights[h]);
    normalize(&mut table);
    table
}

/// Scales each level so its peak absolute sample is 1.
///
/// Levels are visited from 0 upwards. The first level whose peak is zero
/// stops the pass: it and every level after it keep their raw values.
pub fn normalize(table: &mut WaveTable) {
    for level in 0..table.num_levels() {
        let peak = table.peak(level);
        if peak == 0.0 {
            log::debug!("custom level {level} is silent, levels {level}.. left unnormalized");
            break;
        }
        for sample in table.samples_mut(level) {
            *sample /= peak;
        }
    }
}

/// Builds the custom table for `strategy`, drawing from `rng` as needed.
pub fn build(strategy: &CustomStrategy, basis: &[f32], harmonics: usize, rng: &mut Random) -> WaveTable {
    // Always `harmonics + 1` weights long.
    let weights = harmonic_weights(strategy, harmonics, rng);
    weighted(basis, &weights)
}
