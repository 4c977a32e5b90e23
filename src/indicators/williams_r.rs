// =============================================================================
// Williams %R
// =============================================================================
//
//   %R = -100 * (highest_high - close) / (highest_high - lowest_low)
//
// Ranges from -100 (close at the window low) to 0 (close at the window high).

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ensure_window;
use crate::market_data::CandleFrame;
use crate::stats::{rolling_max, rolling_min};

pub const WILLIAMS_R: &str = "WILLIAMS_R";

/// Parameters for [`williams_r`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WilliamsRParams {
    pub period: usize,
}

impl Default for WilliamsRParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// Append `WILLIAMS_R`.
pub fn williams_r(frame: &CandleFrame, params: &WilliamsRParams) -> Result<CandleFrame> {
    ensure_window("WilliamsR", "period", params.period)?;
    let (high, low, close) = frame.hlc()?;
    debug!(rows = frame.len(), period = params.period, "computing Williams %R");

    let highest = rolling_max(high, params.period);
    let lowest = rolling_min(low, params.period);

    let values = close
        .iter()
        .zip(highest.iter().zip(&lowest))
        .map(|(c, (hh, ll))| -100.0 * (hh - c) / (hh - ll))
        .collect();

    frame.augmented([(WILLIAMS_R.to_string(), values)])
}
