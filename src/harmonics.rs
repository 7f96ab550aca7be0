//! Harmonic reduction of the base waveform families.
//!
//! Level `harmonics` of a table holds only the fundamental; each level
//! below it adds the next harmonic of the family's Fourier series, so
//! level `h` contains `harmonics + 1 - h` harmonics. Levels are built by
//! accumulating one sine term at a time on top of the level above, never
//! by re-summing the whole series.
//!
//! All harmonics are read from one sampled sine cycle: harmonic `n` at
//! sample `i` is `basis[(n * i) % size]`.

// Based on GPL-3.0-licensed code (c) 2013-2017 by Matt Tytel

use alloc::vec::Vec;
use core::f32::consts::PI;

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::table::WaveTable;

/// Fundamental amplitude of a unit triangle.
pub const TRIANGLE_SCALE: f32 = 8.0 / (PI * PI);
/// Fundamental amplitude of a unit square.
pub const SQUARE_SCALE: f32 = 4.0 / PI;
/// Fundamental amplitude of a unit sawtooth.
pub const SAW_SCALE: f32 = 2.0 / PI;

/// Number of harmonics present at `level` of a table topping out at
/// `harmonics`.
#[inline]
pub fn harmonic_count(level: usize, harmonics: usize) -> usize {
    harmonics + 1 - level
}

/// One cycle of `sin(2πi / size)`.
pub fn sine_basis(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| (2.0 * PI * i as f32 / size as f32).sin())
        .collect()
}

/// Relative weight of harmonic `h + 1` in the triangle series:
/// odd harmonics only, alternating in sign, falling with `1/n²`.
#[inline]
pub fn triangle_coefficient(h: usize) -> f32 {
    let n = (h + 1) as f32;
    match h % 4 {
        0 => 1.0 / (n * n),
        2 => -1.0 / (n * n),
        _ => 0.0,
    }
}

/// Relative weight of harmonic `h + 1` in the square series: odd
/// harmonics only, falling with `1/n`.
#[inline]
pub fn square_coefficient(h: usize) -> f32 {
    if h % 2 == 0 {
        1.0 / (h + 1) as f32
    } else {
        0.0
    }
}

/// Relative weight of harmonic `h + 1` in the sawtooth series: every
/// harmonic, alternating in sign, falling with `1/n`.
#[inline]
pub fn saw_coefficient(h: usize) -> f32 {
    let magnitude = 1.0 / (h + 1) as f32;
    if h % 2 == 0 {
        magnitude
    } else {
        -magnitude
    }
}

/// Builds every level of `table` from `basis`.
///
/// `weight(h)` is the absolute amplitude of harmonic `h + 1`. Sample `i`
/// of the series is stored at `(i + shift) % size`.
pub(crate) fn accumulate<F>(table: &mut WaveTable, basis: &[f32], shift: usize, weight: F)
where
    F: Fn(usize) -> f32,
{
    let size = table.size();
    let harmonics = table.harmonics();
    debug_assert_eq!(basis.len(), size);

    for i in 0..size {
        let index = (i + shift) % size;
        let mut p = i;
        let mut value = weight(0) * basis[p];
        table.samples_mut(harmonics)[index] = value;

        for h in 1..=harmonics {
            p = (p + i) % size;
            value += weight(h) * basis[p];
            table.samples_mut(harmonics - h)[index] = value;
        }
    }
}

/// Sine has a single harmonic, so every level is the basis itself.
pub fn sine(basis: &[f32], harmonics: usize) -> WaveTable {
    let mut table = WaveTable::new(basis.len(), harmonics);
    for level in 0..table.num_levels() {
        table.samples_mut(level).copy_from_slice(basis);
    }
    table
}

pub fn triangle(basis: &[f32], harmonics: usize) -> WaveTable {
    let mut table = WaveTable::new(basis.len(), harmonics);
    accumulate(&mut table, basis, 0, |h| {
        TRIANGLE_SCALE * triangle_coefficient(h)
    });
    table
}

pub fn square(basis: &[f32], harmonics: usize) -> WaveTable {
    let mut table = WaveTable::new(basis.len(), harmonics);
    accumulate(&mut table, basis, 0, |h| SQUARE_SCALE * square_coefficient(h));
    table
}

/// Rising sawtooth. The series crosses zero rising at phase 0, so it is
/// written half a cycle later to start at -1 like [`crate::wave::up_saw`].
pub fn up_saw(basis: &[f32], harmonics: usize) -> WaveTable {
    let mut table = WaveTable::new(basis.len(), harmonics);
    let shift = basis.len() / 2;
    accumulate(&mut table, basis, shift, |h| SAW_SCALE * saw_coefficient(h));
    table
}

/// Sample-wise negation of `up_saw`, level by level.
pub fn down_saw(up_saw: &WaveTable) -> WaveTable {
    let mut table = WaveTable::new(up_saw.size(), up_saw.harmonics());
    for level in 0..table.num_levels() {
        for (out, &x) in table.samples_mut(level).iter_mut().zip(up_saw.samples(level)) {
            *out = -x;
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_signs() {
        assert_eq!(triangle_coefficient(0), 1.0);
        assert_eq!(triangle_coefficient(1), 0.0);
        assert_eq!(triangle_coefficient(2), -1.0 / 9.0);
        assert_eq!(triangle_coefficient(3), 0.0);
        assert_eq!(triangle_coefficient(4), 1.0 / 25.0);
        assert_eq!(triangle_coefficient(6), -1.0 / 49.0);
    }

    #[test]
    fn square_odd_harmonics_only() {
        assert_eq!(square_coefficient(0), 1.0);
        assert_eq!(square_coefficient(1), 0.0);
        assert_eq!(square_coefficient(2), 1.0 / 3.0);
        assert_eq!(square_coefficient(5), 0.0);
        assert_eq!(square_coefficient(8), 1.0 / 9.0);
    }

    #[test]
    fn saw_alternates() {
        assert_eq!(saw_coefficient(0), 1.0);
        assert_eq!(saw_coefficient(1), -0.5);
        assert_eq!(saw_coefficient(2), 1.0 / 3.0);
        assert_eq!(saw_coefficient(3), -0.25);
    }

    #[test]
    fn harmonic_counts() {
        assert_eq!(harmonic_count(0, 63), 64);
        assert_eq!(harmonic_count(63, 63), 1);
    }

    #[test]
    fn basis_quadrants() {
        let basis = sine_basis(16);
        assert_eq!(basis[0], 0.0);
        assert!((basis[4] - 1.0).abs() < 1e-6);
        assert!((basis[12] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_weights_leave_levels_equal() {
        let basis = sine_basis(32);
        let mut table = WaveTable::new(32, 4);
        accumulate(&mut table, &basis, 0, |h| if h == 0 { 1.0 } else { 0.0 });
        for level in 0..4 {
            assert_eq!(table.samples(level), table.samples(4));
        }
    }
}
