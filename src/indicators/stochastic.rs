// =============================================================================
// Stochastic Oscillator
// =============================================================================
//
//   %K = 100 * (close - lowest_low(k)) / (highest_high(k) - lowest_low(k))
//   %D = mean(%K, d)
//
// A window whose high and low coincide divides by zero; the result is left
// as NaN/inf.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ensure_window;
use crate::market_data::CandleFrame;
use crate::stats::{rolling_max, rolling_mean, rolling_min};

pub const STOCH_K: &str = "STOCH_K";
pub const STOCH_D: &str = "STOCH_D";

/// Parameters for [`stochastic`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StochasticParams {
    pub k_period: usize,
    pub d_period: usize,
}

impl Default for StochasticParams {
    fn default() -> Self {
        Self {
            k_period: 14,
            d_period: 3,
        }
    }
}

/// Append `STOCH_K` and `STOCH_D`.
pub fn stochastic(frame: &CandleFrame, params: &StochasticParams) -> Result<CandleFrame> {
    ensure_window("Stochastic", "k_period", params.k_period)?;
    ensure_window("Stochastic", "d_period", params.d_period)?;
    let (high, low, close) = frame.hlc()?;
    debug!(
        rows = frame.len(),
        k_period = params.k_period,
        d_period = params.d_period,
        "computing Stochastic"
    );

    let low_min = rolling_min(low, params.k_period);
    let high_max = rolling_max(high, params.k_period);

    let k: Vec<f64> = close
        .iter()
        .zip(low_min.iter().zip(&high_max))
        .map(|(c, (lo, hi))| 100.0 * ((c - lo) / (hi - lo)))
        .collect();
    let d = rolling_mean(&k, params.d_period);

    frame.augmented([(STOCH_K.to_string(), k), (STOCH_D.to_string(), d)])
}
