// =============================================================================
// Series Statistics
// =============================================================================
//
// Leaf primitives every indicator is built from: trailing-window reductions
// and recursive exponential smoothing, plus element-wise helpers.

pub mod rolling;
pub mod series;
pub mod smoothing;

pub use rolling::{
    rolling_max, rolling_mean, rolling_min, rolling_reduce, rolling_std, rolling_sum, RollingOp,
};
pub use series::{diff, midpoint, shift, true_range, typical_price};
pub use smoothing::{ewm_mean, Smoothing};
