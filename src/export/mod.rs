//! Debug output of finished tables.
//!
//! Sinks are one-way: table construction never depends on them and never
//! sees their failures.

#[cfg(feature = "svg-export")]
pub mod svg;

use crate::lookup::{WaveLookup, Waveform};
use crate::table::WaveTable;

/// Receives a named table for inspection.
pub trait WaveformSink {
    fn export(&mut self, name: &str, table: &WaveTable);
}

/// Name under which [`export_lookup`] hands over the custom table.
pub const CUSTOM_NAME: &str = "custom";

/// Hands every table of `lookup` to `sink`, custom table last.
pub fn export_lookup<S: WaveformSink + ?Sized>(lookup: &WaveLookup, sink: &mut S) {
    for waveform in Waveform::ALL {
        sink.export(waveform.name(), lookup.table(waveform));
    }
    sink.export(CUSTOM_NAME, lookup.custom());
}
