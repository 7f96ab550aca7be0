//! Stepped and pyramid waveforms built from the base families.

// Based on GPL-3.0-licensed code (c) 2013-2017 by Matt Tytel

use crate::config::{ConfigError, MIN_STEPS};
use crate::table::WaveTable;

fn check_steps(steps: usize) -> Result<(), ConfigError> {
    if steps < MIN_STEPS {
        return Err(ConfigError::StepCount(steps));
    }
    Ok(())
}

/// Staircase with `steps` levels per cycle.
///
/// The up-saw is stretched by `steps / (steps - 1)` and a down-saw running
/// `steps` times faster is added on top, cancelling the ramp between the
/// stair edges. The fast down-saw only has room for every `steps`-th
/// harmonic, so at level `h` it is taken from the level holding
/// `(harmonics + 1 - h) / steps` harmonics and left out when that is zero.
///
/// # Panics
///
/// Panics if `up_saw` and `down_saw` differ in size or harmonic count.
pub fn step(up_saw: &WaveTable, down_saw: &WaveTable, steps: usize) -> Result<WaveTable, ConfigError> {
    check_steps(steps)?;
    assert_eq!(
        (up_saw.size(), up_saw.harmonics()),
        (down_saw.size(), down_saw.harmonics()),
        "up-saw and down-saw tables differ in shape"
    );
    Ok(stepped(up_saw, down_saw, steps))
}

pub(crate) fn stepped(up_saw: &WaveTable, down_saw: &WaveTable, steps: usize) -> WaveTable {
    let size = up_saw.size();
    let harmonics = up_saw.harmonics();
    let step_size = steps as f32 / (steps as f32 - 1.0);
    let mut table = WaveTable::new(size, harmonics);

    for h in 0..=harmonics {
        let base_num_harmonics = harmonics + 1 - h;
        let harmony_num_harmonics = base_num_harmonics / steps;
        let harmony_h = harmonics + 1 - harmony_num_harmonics;

        let up = up_saw.samples(h);
        let out = table.samples_mut(h);
        for (i, sample) in out.iter_mut().enumerate() {
            *sample = step_size * up[i];

            if harmony_num_harmonics != 0 {
                let harm_index = (steps * i) % size;
                *sample += step_size * down_saw.samples(harmony_h)[harm_index] / steps as f32;
            }
        }
    }

    table
}

/// Trapezoid-like ramp made of `steps - 1` overlapping square pulses.
///
/// The pulses are spread evenly over half a cycle and the sum is delayed
/// by three quarters of a cycle so the result rises through zero at phase
/// 0 like the sine.
pub fn pyramid(square: &WaveTable, steps: usize) -> Result<WaveTable, ConfigError> {
    check_steps(steps)?;
    Ok(pyramided(square, steps))
}

pub(crate) fn pyramided(square: &WaveTable, steps: usize) -> WaveTable {
    let size = square.size();
    let harmonics = square.harmonics();
    let squares = steps - 1;
    let offset = 3 * size / 4;
    let mut table = WaveTable::new(size, harmonics);

    for h in 0..=harmonics {
        let source = square.samples(h);
        let out = table.samples_mut(h);
        for (i, sample) in out.iter_mut().enumerate() {
            *sample = 0.0;
            for s in 0..squares {
                let square_offset = (s * size) / (2 * squares);
                let phase = (i + offset + square_offset) % size;
                *sample += source[phase] / squares as f32;
            }
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harmonics;

    #[test]
    fn rejects_small_step_counts() {
        let table = WaveTable::new(16, 3);
        assert_eq!(step(&table, &table, 2), Err(ConfigError::StepCount(2)));
        assert_eq!(pyramid(&table, 0), Err(ConfigError::StepCount(0)));
    }

    #[test]
    fn fundamental_level_has_no_harmony() {
        let basis = harmonics::sine_basis(64);
        let up = harmonics::up_saw(&basis, 7);
        let down = harmonics::down_saw(&up);
        let stepped = step(&up, &down, 3).unwrap();
        // One harmonic left at the top level: 1 / 3 == 0.
        for (s, u) in stepped.samples(7).iter().zip(up.samples(7)) {
            assert_eq!(*s, 1.5 * u);
        }
    }

    #[test]
    fn three_pyramid_of_fundamental() {
        let basis = harmonics::sine_basis(64);
        let square = harmonics::square(&basis, 3);
        let pyr = pyramid(&square, 3).unwrap();
        let fundamental = square.samples(3);
        for i in 0..64 {
            let a = fundamental[(i + 48) % 64];
            let b = fundamental[(i + 48 + 16) % 64];
            assert!((pyr.samples(3)[i] - (a + b) / 2.0).abs() < 1e-6);
        }
    }
}
