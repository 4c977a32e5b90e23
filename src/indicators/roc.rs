// =============================================================================
// Rate of Change (ROC): Momentum Indicator
// =============================================================================
//
// ROC measures the percentage change in price over a look-back period:
//   ROC = ((close - close_n) / close_n) * 100
//
// Positive ROC indicates upward momentum; negative indicates downward.  A
// zero reference close is not guarded and produces inf/NaN.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ensure_window;
use crate::market_data::{CandleFrame, MID_C};
use crate::stats::shift;

/// Parameters for [`roc`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RocParams {
    pub period: usize,
}

impl Default for RocParams {
    fn default() -> Self {
        Self { period: 12 }
    }
}

/// Output column name for a given period, e.g. `ROC_12`.
pub fn roc_column(period: usize) -> String {
    format!("ROC_{period}")
}

/// Append `ROC_{period}`.
pub fn roc(frame: &CandleFrame, params: &RocParams) -> Result<CandleFrame> {
    ensure_window("ROC", "period", params.period)?;
    let closes = frame.require(MID_C)?;
    debug!(rows = frame.len(), period = params.period, "computing ROC");

    let reference = shift(closes, params.period as isize);
    let values = closes
        .iter()
        .zip(&reference)
        .map(|(c, prev)| ((c - prev) / prev) * 100.0)
        .collect();

    frame.augmented([(roc_column(params.period), values)])
}
