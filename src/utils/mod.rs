//! Utility functions for the window models.

pub mod stats;

pub use stats::{linearly_weighted_mean, mean};
