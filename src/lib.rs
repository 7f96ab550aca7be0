#![doc = include_str!("../README.md")]
#![cfg_attr(not(any(test, feature = "svg-export")), no_std)]

extern crate alloc;

pub mod config;
pub mod custom;
pub mod derived;
pub mod export;
pub mod harmonics;
pub mod lookup;
pub mod table;
pub mod utils;
pub mod wave;

pub use config::{ConfigError, CustomStrategy, LookupConfig};
pub use lookup::{WaveLookup, Waveform, NUM_WAVEFORMS};
pub use table::WaveTable;
