// =============================================================================
// Aroon
// =============================================================================
//
//   AROON_UP   = 100 * (period - bars since highest high) / period
//   AROON_DOWN = 100 * (period - bars since lowest low)  / period
//   AROON_OSC  = AROON_UP - AROON_DOWN
//
// Both look-backs run over a trailing window of `period` bars, so the first
// value appears at index period - 1.  A tie for the extreme counts from the
// oldest occurrence in the window.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ensure_window;
use crate::market_data::CandleFrame;
use crate::stats::{rolling_reduce, RollingOp};

pub const AROON_UP: &str = "AROON_UP";
pub const AROON_DOWN: &str = "AROON_DOWN";
pub const AROON_OSC: &str = "AROON_OSC";

/// Parameters for [`aroon`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AroonParams {
    pub period: usize,
}

impl Default for AroonParams {
    fn default() -> Self {
        Self { period: 25 }
    }
}

/// Append `AROON_UP`, `AROON_DOWN` and `AROON_OSC`.
pub fn aroon(frame: &CandleFrame, params: &AroonParams) -> Result<CandleFrame> {
    ensure_window("Aroon", "period", params.period)?;
    let (high, low) = frame.hl()?;
    debug!(rows = frame.len(), period = params.period, "computing Aroon");

    let period = params.period as f64;
    let score = |bars_since: f64| 100.0 * (period - bars_since) / period;

    let up: Vec<f64> = rolling_reduce(high, params.period, RollingOp::BarsSinceMax)
        .into_iter()
        .map(score)
        .collect();
    let down: Vec<f64> = rolling_reduce(low, params.period, RollingOp::BarsSinceMin)
        .into_iter()
        .map(score)
        .collect();
    let oscillator = up.iter().zip(&down).map(|(u, d)| u - d).collect();

    frame.augmented([
        (AROON_UP.to_string(), up),
        (AROON_DOWN.to_string(), down),
        (AROON_OSC.to_string(), oscillator),
    ])
}
