// =============================================================================
// Relative Strength Index (RSI): Wilder's Smoothing
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1. Price changes (deltas) from consecutive closes.  The first bar has
//         no delta and counts as neither gain nor loss.
// Step 2. gains  = max(delta, 0)
//         losses = max(-delta, 0)
// Step 3. Wilder smoothing of both (alpha = 1/n, min_periods = n), seeded by
//         the simple mean of the first n values.
// Step 4. RS  = avg_gain / avg_loss
//         RSI = 100 - 100 / (1 + RS)
//
// When avg_loss is 0, RS is +inf and RSI evaluates to exactly 100.  When both
// averages are 0, RS is NaN and so is RSI.  Neither case is special-cased.
// =============================================================================

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ensure_window;
use crate::market_data::{CandleFrame, MID_C};
use crate::stats::{diff, ewm_mean, Smoothing};

/// Parameters for [`rsi`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiParams {
    pub n: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { n: 14 }
    }
}

/// Output column name for a given period, e.g. `RSI_14`.
pub fn rsi_column(n: usize) -> String {
    format!("RSI_{n}")
}

/// Append `RSI_{n}`.
pub fn rsi(frame: &CandleFrame, params: &RsiParams) -> Result<CandleFrame> {
    ensure_window("RSI", "n", params.n)?;
    let closes = frame.require(MID_C)?;
    debug!(rows = frame.len(), n = params.n, "computing RSI");

    frame.augmented([(rsi_column(params.n), rsi_series(closes, params.n))])
}

fn rsi_series(closes: &[f64], n: usize) -> Vec<f64> {
    let deltas = diff(closes);
    // NaN deltas (first bar) fail both comparisons and count as 0.
    let gains: Vec<f64> = deltas
        .iter()
        .map(|&d| if d >= 0.0 { d } else { 0.0 })
        .collect();
    let losses: Vec<f64> = deltas
        .iter()
        .map(|&d| if d < 0.0 { -d } else { 0.0 })
        .collect();

    let smoothing = Smoothing::wilder(n);
    let avg_gain = ewm_mean(&gains, smoothing, n);
    let avg_loss = ewm_mean(&losses, smoothing, n);

    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(g, l)| {
            let rs = g / l;
            100.0 - 100.0 / (1.0 + rs)
        })
        .collect()
}
