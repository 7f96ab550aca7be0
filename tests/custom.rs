//! Tests for the custom waveform

use fixed_point_wave::config::{ConfigError, CustomStrategy};
use fixed_point_wave::custom::{custom, harmonic_weights};
use fixed_point_wave::harmonics::{sine_basis, up_saw};
use fixed_point_wave::utils::random::Random;
use fixed_point_wave::{LookupConfig, WaveLookup};

const SIZE: usize = 256;
const HARMONICS: usize = 15;

fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0, |p: f32, x| p.max(x.abs()))
}

#[test]
fn random_levels_are_normalized() {
    let basis = sine_basis(SIZE);
    let weights = harmonic_weights(&CustomStrategy::Random, HARMONICS, &mut Random::new(0x21));
    let table = custom(&basis, &weights).unwrap();

    for level in 0..=HARMONICS {
        assert!((peak(table.samples(level)) - 1.0).abs() < 1e-6, "level {level}");
    }
}

#[test]
fn random_10_levels_are_normalized() {
    let basis = sine_basis(SIZE);
    let weights = harmonic_weights(&CustomStrategy::Random10, HARMONICS, &mut Random::new(7));
    let table = custom(&basis, &weights).unwrap();

    for level in 0..=HARMONICS {
        assert!((peak(table.samples(level)) - 1.0).abs() < 1e-6, "level {level}");
    }
}

#[test]
fn silent_level_stops_normalization() {
    // The lowest three harmonics are silent, so the three most reduced
    // levels contain nothing at all.
    let k = 3;
    let weights: Vec<f32> = (0..=HARMONICS)
        .map(|h| if h < k { 0.0 } else { 0.5 / (h + 1) as f32 })
        .collect();
    let basis = sine_basis(SIZE);
    let table = custom(&basis, &weights).unwrap();

    for level in 0..=HARMONICS - k {
        assert!((peak(table.samples(level)) - 1.0).abs() < 1e-6, "level {level}");
    }
    for level in HARMONICS - k + 1..=HARMONICS {
        for s in table.samples(level) {
            assert!(s.is_finite());
            assert_eq!(s.abs(), 0.0);
        }
    }
}

#[test]
fn up_saw_strategy_matches_up_saw_shape() {
    let basis = sine_basis(SIZE);
    let weights = harmonic_weights(&CustomStrategy::UpSaw, HARMONICS, &mut Random::default());
    let table = custom(&basis, &weights).unwrap();
    let saw = up_saw(&basis, HARMONICS);

    for level in 0..=HARMONICS {
        let saw_peak = peak(saw.samples(level));
        for (c, s) in table.samples(level).iter().zip(saw.samples(level)) {
            assert!((c * saw_peak - s).abs() < 1e-5);
        }
    }
}

#[test]
fn lookup_exposes_full_band_custom_cycle() {
    let config = LookupConfig::default().with_lookup_bits(8).with_harmonics(HARMONICS);
    let lookup = WaveLookup::new(&config).unwrap();
    let custom_lookup = lookup.custom_lookup();

    assert_eq!(custom_lookup.len(), 2 * SIZE);
    assert_eq!(&custom_lookup[..SIZE], lookup.custom().samples(0));
    assert_eq!(&custom_lookup[SIZE..], lookup.custom().slopes(0));
}

#[test]
fn seed_changes_custom_table() {
    let config = LookupConfig::default().with_lookup_bits(8).with_harmonics(HARMONICS);
    let a = WaveLookup::new(&config).unwrap();
    let b = WaveLookup::new(&config.clone().with_seed(1234)).unwrap();
    assert_ne!(a.custom(), b.custom());
    assert_eq!(a.tables(), b.tables());
}

#[test]
fn empty_weights_are_rejected() {
    let basis = sine_basis(SIZE);
    assert_eq!(custom(&basis, &[]).unwrap_err(), ConfigError::Harmonics(0));
}
