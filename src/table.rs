//! Harmonic level tables with appended interpolation slopes.
//!
//! A [`WaveTable`] stores `harmonics + 1` rows of `2 * size` values. The
//! first `size` values of a row are one cycle of the waveform, the second
//! `size` values are forward differences pre-scaled by the fractional
//! multiplier, so a playback engine holding a `u32` phase can interpolate
//! with one multiply-add:
//!
//! ```text
//! value = row[index] + fraction * row[size + index]
//! ```

// Based on GPL-3.0-licensed code (c) 2013-2017 by Matt Tytel

use alloc::boxed::Box;
use alloc::vec;

#[allow(unused_imports)]
use num_traits::float::Float;

#[derive(Debug, Clone, PartialEq)]
pub struct WaveTable {
    size: usize,
    harmonics: usize,
    data: Box<[f32]>,
}

impl WaveTable {
    /// Creates a silent table. `size` must be a power of two.
    pub fn new(size: usize, harmonics: usize) -> Self {
        debug_assert!(size.is_power_of_two());
        Self {
            size,
            harmonics,
            data: vec![0.0; (harmonics + 1) * 2 * size].into_boxed_slice(),
        }
    }

    /// Samples per cycle.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Index of the most reduced level (pure fundamental).
    #[inline]
    pub fn harmonics(&self) -> usize {
        self.harmonics
    }

    #[inline]
    pub fn num_levels(&self) -> usize {
        self.harmonics + 1
    }

    /// Full row for `level`: samples followed by slopes.
    #[inline]
    pub fn level(&self, level: usize) -> &[f32] {
        let stride = 2 * self.size;
        &self.data[level * stride..(level + 1) * stride]
    }

    #[inline]
    pub fn samples(&self, level: usize) -> &[f32] {
        &self.level(level)[..self.size]
    }

    #[inline]
    pub fn slopes(&self, level: usize) -> &[f32] {
        &self.level(level)[self.size..]
    }

    #[inline]
    pub(crate) fn level_mut(&mut self, level: usize) -> &mut [f32] {
        let stride = 2 * self.size;
        &mut self.data[level * stride..(level + 1) * stride]
    }

    #[inline]
    pub(crate) fn samples_mut(&mut self, level: usize) -> &mut [f32] {
        let size = self.size;
        &mut self.level_mut(level)[..size]
    }

    /// Fills the slope half of every level from its samples.
    ///
    /// Slope `i` is `mult * (sample[i + 1] - sample[i])`; the last slope
    /// wraps around to `sample[0]`.
    pub fn compute_slopes(&mut self, fractional_mult: f32) {
        let size = self.size;
        for level in 0..self.num_levels() {
            let row = self.level_mut(level);
            let (samples, slopes) = row.split_at_mut(size);
            for i in 0..size - 1 {
                slopes[i] = fractional_mult * (samples[i + 1] - samples[i]);
            }
            let last_delta = samples[0] - samples[size - 1];
            slopes[size - 1] = fractional_mult * last_delta;
        }
    }

    /// Interpolated read at sample `index` plus a raw fixed-point
    /// `fraction` (`0..1 << fractional_bits`).
    ///
    /// Panics if `level` or `index` is out of range.
    #[inline]
    pub fn interpolate(&self, level: usize, index: usize, fraction: u32) -> f32 {
        let row = self.level(level);
        row[index] + fraction as f32 * row[self.size + index]
    }

    /// Interpolated read at a full-range `u32` phase, where `u32::MAX`
    /// wraps to the start of the cycle.
    #[inline]
    pub fn wave(&self, level: usize, phase: u32) -> f32 {
        let fractional_bits = 32 - self.size.trailing_zeros();
        let index = (phase >> fractional_bits) as usize;
        let fraction = phase & ((1u32 << fractional_bits) - 1);
        self.interpolate(level, index, fraction)
    }

    /// Largest absolute sample value of `level`.
    pub(crate) fn peak(&self, level: usize) -> f32 {
        self.samples(level)
            .iter()
            .fold(0.0, |peak: f32, &x| peak.max(x.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_table() -> WaveTable {
        let mut table = WaveTable::new(8, 1);
        for level in 0..2 {
            for (i, s) in table.samples_mut(level).iter_mut().enumerate() {
                *s = i as f32 * (level + 1) as f32;
            }
        }
        table
    }

    #[test]
    fn layout() {
        let table = WaveTable::new(16, 3);
        assert_eq!(table.num_levels(), 4);
        assert_eq!(table.level(3).len(), 32);
        assert_eq!(table.samples(0).len(), 16);
        assert_eq!(table.slopes(0).len(), 16);
    }

    #[test]
    fn slopes_wrap_around() {
        let mut table = ramp_table();
        table.compute_slopes(0.5);
        assert_eq!(table.slopes(0)[0], 0.5);
        assert_eq!(table.slopes(0)[6], 0.5);
        assert_eq!(table.slopes(0)[7], 0.5 * (0.0 - 7.0));
        assert_eq!(table.slopes(1)[3], 1.0);
        assert_eq!(table.slopes(1)[7], 0.5 * (0.0 - 14.0));
    }

    #[test]
    fn interpolate_midpoint() {
        let mut table = ramp_table();
        // 8 samples: 3 index bits, 29 fractional bits.
        let mult = 1.0 / (1u64 << 29) as f32;
        table.compute_slopes(mult);
        let half = 1u32 << 28;
        assert!((table.interpolate(0, 2, half) - 2.5).abs() < 1e-6);
        assert!((table.wave(0, (2 << 29) | half) - 2.5).abs() < 1e-6);
        assert_eq!(table.wave(1, 0), 0.0);
    }

    #[test]
    fn wave_wraps_at_last_sample() {
        let mut table = ramp_table();
        let mult = 1.0 / (1u64 << 29) as f32;
        table.compute_slopes(mult);
        // Halfway between sample 7 and sample 0 of the next cycle.
        let phase = (7 << 29) | (1 << 28);
        assert!((table.wave(0, phase) - 3.5).abs() < 1e-6);
    }

    #[test]
    fn peak_is_absolute() {
        let mut table = WaveTable::new(4, 0);
        table.samples_mut(0).copy_from_slice(&[0.25, -0.75, 0.5, 0.0]);
        assert_eq!(table.peak(0), 0.75);
    }
}
