//! The complete set of band-limited tables.
//!
//! [`WaveLookup`] is built once, by whoever owns the audio engine, and
//! then only read. It holds no interior mutability, so a shared reference
//! (or an `Arc`) can be handed to any number of voices on any thread.

// Based on GPL-3.0-licensed code (c) 2013-2017 by Matt Tytel

use core::ops::Index;

use crate::config::{ConfigError, LookupConfig};
use crate::table::WaveTable;
use crate::utils::random::Random;
use crate::{custom, derived, harmonics};

pub const NUM_WAVEFORMS: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    DownSaw,
    UpSaw,
    ThreeStep,
    FourStep,
    EightStep,
    ThreePyramid,
    FivePyramid,
    NinePyramid,
}

impl Waveform {
    pub const ALL: [Waveform; NUM_WAVEFORMS] = [
        Waveform::Sine,
        Waveform::Triangle,
        Waveform::Square,
        Waveform::DownSaw,
        Waveform::UpSaw,
        Waveform::ThreeStep,
        Waveform::FourStep,
        Waveform::EightStep,
        Waveform::ThreePyramid,
        Waveform::FivePyramid,
        Waveform::NinePyramid,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Triangle => "triangle",
            Waveform::Square => "square",
            Waveform::DownSaw => "down_saw",
            Waveform::UpSaw => "up_saw",
            Waveform::ThreeStep => "three_step",
            Waveform::FourStep => "four_step",
            Waveform::EightStep => "eight_step",
            Waveform::ThreePyramid => "three_pyramid",
            Waveform::FivePyramid => "five_pyramid",
            Waveform::NinePyramid => "nine_pyramid",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaveLookup {
    config: LookupConfig,
    waves: [WaveTable; NUM_WAVEFORMS],
    custom: WaveTable,
}

impl Default for WaveLookup {
    fn default() -> Self {
        Self::build(&LookupConfig::default())
    }
}

impl WaveLookup {
    pub fn new(config: &LookupConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &LookupConfig) -> Self {
        let size = config.table_size();
        let h = config.harmonics;
        log::debug!("building wave lookup: {size} samples, {h} harmonics");

        let basis = harmonics::sine_basis(size);

        let mut rng = Random::new(config.seed);
        let mut custom = custom::build(&config.custom_strategy, &basis, h, &mut rng);

        let sine = harmonics::sine(&basis, h);
        let triangle = harmonics::triangle(&basis, h);
        let square = harmonics::square(&basis, h);
        let up_saw = harmonics::up_saw(&basis, h);
        let down_saw = harmonics::down_saw(&up_saw);

        let three_step = derived::stepped(&up_saw, &down_saw, 3);
        let four_step = derived::stepped(&up_saw, &down_saw, 4);
        let eight_step = derived::stepped(&up_saw, &down_saw, 8);
        let three_pyramid = derived::pyramided(&square, 3);
        let five_pyramid = derived::pyramided(&square, 5);
        let nine_pyramid = derived::pyramided(&square, 9);

        let mut waves = [
            sine,
            triangle,
            square,
            down_saw,
            up_saw,
            three_step,
            four_step,
            eight_step,
            three_pyramid,
            five_pyramid,
            nine_pyramid,
        ];

        let fractional_mult = config.fractional_mult();
        for (table, waveform) in waves.iter_mut().zip(Waveform::ALL) {
            table.compute_slopes(fractional_mult);
            log::trace!("finished {} table", waveform.name());
        }
        custom.compute_slopes(fractional_mult);

        Self {
            config: config.clone(),
            waves,
            custom,
        }
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    #[inline]
    pub fn table(&self, waveform: Waveform) -> &WaveTable {
        &self.waves[waveform.index()]
    }

    pub fn tables(&self) -> &[WaveTable; NUM_WAVEFORMS] {
        &self.waves
    }

    pub fn custom(&self) -> &WaveTable {
        &self.custom
    }

    /// Full-band custom cycle: samples followed by slopes.
    #[inline]
    pub fn custom_lookup(&self) -> &[f32] {
        self.custom.level(0)
    }

    /// Richest level that stays below Nyquist for a `u32` phase increment
    /// per sample, where `1 << 32` is one cycle.
    pub fn harmonic_level(&self, phase_increment: u32) -> usize {
        harmonic_level(self.config.harmonics, phase_increment)
    }

    /// Interpolated read at a full-range `u32` phase.
    #[inline]
    pub fn wave(&self, waveform: Waveform, level: usize, phase: u32) -> f32 {
        self.table(waveform).wave(level, phase)
    }
}

impl Index<Waveform> for WaveLookup {
    type Output = WaveTable;

    fn index(&self, waveform: Waveform) -> &WaveTable {
        self.table(waveform)
    }
}

/// Level selection for a table topping out at `harmonics`.
///
/// Harmonic `n` aliases once `n * phase_increment` reaches half a cycle.
pub fn harmonic_level(harmonics: usize, phase_increment: u32) -> usize {
    if phase_increment == 0 {
        return 0;
    }
    let max_harmonics = ((1u64 << 31) / phase_increment as u64) as usize;
    (harmonics + 1).saturating_sub(max_harmonics).min(harmonics)
}
