//! Build configuration for the waveform lookup.

use alloc::vec::Vec;

use thiserror::Error;

use crate::utils::random::DEFAULT_SEED;

pub const DEFAULT_LOOKUP_BITS: u32 = 10;
pub const DEFAULT_HARMONICS: usize = 63;

pub const MIN_LOOKUP_BITS: u32 = 2;
pub const MAX_LOOKUP_BITS: u32 = 16;

/// Smallest step count accepted by the step and pyramid builders.
pub const MIN_STEPS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("lookup bits must be in {min}..={max}, got {0}", min = MIN_LOOKUP_BITS, max = MAX_LOOKUP_BITS)]
    LookupBits(u32),
    #[error("at least one harmonic is required, got {0}")]
    Harmonics(usize),
    #[error("{harmonics} harmonics do not fit below Nyquist of a {size} sample table")]
    HarmonicsAboveNyquist { harmonics: usize, size: usize },
    #[error("step count must be at least {min}, got {0}", min = MIN_STEPS)]
    StepCount(usize),
}

/// How the per-harmonic weights of the custom waveform are chosen.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CustomStrategy {
    /// Sawtooth Fourier coefficients, `±(2/π)/(h+1)`.
    UpSaw,
    /// Random weights decaying with `1/(h²+1)`.
    #[default]
    Random,
    /// Random weights on the lowest ten harmonics only.
    Random10,
    /// Explicit weights. Missing entries are zero, extra ones are ignored.
    Weights(Vec<f32>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupConfig {
    /// Samples per cycle is `1 << lookup_bits`.
    pub lookup_bits: u32,
    /// Highest harmonic level; tables hold `harmonics + 1` levels.
    pub harmonics: usize,
    pub custom_strategy: CustomStrategy,
    pub seed: u32,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            lookup_bits: DEFAULT_LOOKUP_BITS,
            harmonics: DEFAULT_HARMONICS,
            custom_strategy: CustomStrategy::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl LookupConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lookup_bits(mut self, lookup_bits: u32) -> Self {
        self.lookup_bits = lookup_bits;
        self
    }

    pub fn with_harmonics(mut self, harmonics: usize) -> Self {
        self.harmonics = harmonics;
        self
    }

    pub fn with_custom_strategy(mut self, strategy: CustomStrategy) -> Self {
        self.custom_strategy = strategy;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_LOOKUP_BITS..=MAX_LOOKUP_BITS).contains(&self.lookup_bits) {
            return Err(ConfigError::LookupBits(self.lookup_bits));
        }
        if self.harmonics == 0 {
            return Err(ConfigError::Harmonics(self.harmonics));
        }
        if self.harmonics >= self.max_harmonics() {
            return Err(ConfigError::HarmonicsAboveNyquist {
                harmonics: self.harmonics,
                size: self.table_size(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn table_size(&self) -> usize {
        1 << self.lookup_bits
    }

    /// Exclusive upper bound for `harmonics`: level 0 holds `harmonics + 1`
    /// harmonics, and the table can only represent those below `size / 2`.
    #[inline]
    pub fn max_harmonics(&self) -> usize {
        self.table_size() / 2
    }

    /// Low bits of a `u32` phase that hold the fraction between samples.
    #[inline]
    pub fn fractional_bits(&self) -> u32 {
        32 - self.lookup_bits
    }

    /// Scales a unit amplitude delta so that multiplying it by a raw
    /// fractional phase yields the interpolated offset.
    #[inline]
    pub fn fractional_mult(&self) -> f32 {
        1.0 / (1u64 << self.fractional_bits()) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validates() {
        let config = LookupConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.table_size(), 1024);
        assert_eq!(config.fractional_bits(), 22);
        assert_eq!(config.fractional_mult(), 1.0 / 4194304.0);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            LookupConfig::new().with_lookup_bits(1).validate(),
            Err(ConfigError::LookupBits(1))
        );
        assert_eq!(
            LookupConfig::new().with_lookup_bits(17).validate(),
            Err(ConfigError::LookupBits(17))
        );
        assert_eq!(
            LookupConfig::new().with_harmonics(0).validate(),
            Err(ConfigError::Harmonics(0))
        );
    }

    #[test]
    fn rejects_harmonics_above_nyquist() {
        assert_eq!(
            LookupConfig::new().with_harmonics(usize::MAX).validate(),
            Err(ConfigError::HarmonicsAboveNyquist {
                harmonics: usize::MAX,
                size: 1024
            })
        );
        assert_eq!(
            LookupConfig::new().with_lookup_bits(2).with_harmonics(63).validate(),
            Err(ConfigError::HarmonicsAboveNyquist {
                harmonics: 63,
                size: 4
            })
        );
        assert_eq!(LookupConfig::new().with_harmonics(511).validate(), Ok(()));
        assert!(LookupConfig::new().with_harmonics(512).validate().is_err());
        assert_eq!(
            LookupConfig::new().with_lookup_bits(2).with_harmonics(1).validate(),
            Ok(())
        );
    }
}
