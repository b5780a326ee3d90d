//! Baseline window models.
//!
//! Plain and linearly weighted averages over the window.

mod linear;
mod sma;

pub use linear::LinearWeightedAverage;
pub use sma::SimpleMovingAverage;
