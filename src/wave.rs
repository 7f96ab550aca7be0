//! Ideal (non band-limited) waveforms.
//!
//! Each function takes a phase in cycles and wraps it into `[0, 1)`, so any
//! finite phase is accepted.

// Based on GPL-3.0-licensed code (c) 2013-2017 by Matt Tytel

#[allow(unused_imports)]
use num_traits::float::Float;

use core::f32::consts::PI;

#[inline]
fn wrap(t: f32) -> f32 {
    t - t.floor()
}

#[inline]
pub fn sine(t: f32) -> f32 {
    (2.0 * PI * wrap(t)).sin()
}

/// Triangle in phase with [`sine`]: 0 at `t = 0`, +1 at `t = 0.25`.
#[inline]
pub fn triangle(t: f32) -> f32 {
    let fractional = wrap(t + 0.75);
    (2.0 - 4.0 * fractional).abs() - 1.0
}

/// +1 for the first half cycle, -1 for the second.
#[inline]
pub fn square(t: f32) -> f32 {
    if wrap(t) < 0.5 {
        1.0
    } else {
        -1.0
    }
}

/// Rising ramp from -1 at `t = 0` towards +1 at the end of the cycle.
#[inline]
pub fn up_saw(t: f32) -> f32 {
    2.0 * wrap(t) - 1.0
}

#[inline]
pub fn down_saw(t: f32) -> f32 {
    -up_saw(t)
}
