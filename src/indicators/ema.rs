// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = close_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The recursion starts at the first defined value and the output is hidden
// until `period` values have been folded in.
// =============================================================================

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ensure_window;
use crate::market_data::{CandleFrame, MID_C};
use crate::stats::{ewm_mean, Smoothing};

/// Parameters for [`ema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmaParams {
    /// Source column.
    pub column: String,
    pub period: usize,
}

impl Default for EmaParams {
    fn default() -> Self {
        Self {
            column: MID_C.to_string(),
            period: 20,
        }
    }
}

/// Output column name for a given period, e.g. `EMA_20`.
pub fn ema_column(period: usize) -> String {
    format!("EMA_{period}")
}

/// Span-mode EMA series with `min_periods = period`.
pub(crate) fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    ewm_mean(values, Smoothing::Span(period), period)
}

/// Append `EMA_{period}` computed over `params.column`.
pub fn ema(frame: &CandleFrame, params: &EmaParams) -> Result<CandleFrame> {
    ensure_window("EMA", "period", params.period)?;
    let source = frame.require(&params.column)?;
    debug!(rows = frame.len(), column = %params.column, period = params.period, "computing EMA");

    let values = ema_series(source, params.period);
    frame.augmented([(ema_column(params.period), values)])
}
