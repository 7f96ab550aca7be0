//! Utility functions.

pub mod random;
