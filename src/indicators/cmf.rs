// =============================================================================
// Chaikin Money Flow (CMF)
// =============================================================================
//
//   multiplier = ((close - low) - (high - close)) / (high - low)
//   mfv        = multiplier * volume
//   CMF        = sum(mfv, period) / sum(volume, period)
//
// A bar with high == low has an undefined multiplier (0 / 0 = NaN), which
// poisons every window it belongs to.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ensure_window;
use crate::market_data::CandleFrame;
use crate::stats::rolling_sum;

pub const CMF: &str = "CMF";

/// Parameters for [`cmf`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CmfParams {
    pub period: usize,
}

impl Default for CmfParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// Append `CMF`.
pub fn cmf(frame: &CandleFrame, params: &CmfParams) -> Result<CandleFrame> {
    ensure_window("CMF", "period", params.period)?;
    let (high, low, close, volume) = frame.hlcv()?;
    debug!(rows = frame.len(), period = params.period, "computing CMF");

    let mfv: Vec<f64> = high
        .iter()
        .zip(low)
        .zip(close.iter().zip(volume))
        .map(|((h, l), (c, v))| ((c - l) - (h - c)) / (h - l) * v)
        .collect();

    let mfv_sum = rolling_sum(&mfv, params.period);
    let volume_sum = rolling_sum(volume, params.period);
    let values = mfv_sum
        .iter()
        .zip(&volume_sum)
        .map(|(m, v)| m / v)
        .collect();

    frame.augmented([(CMF.to_string(), values)])
}
