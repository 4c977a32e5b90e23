// =============================================================================
// Commodity Channel Index (CCI)
// =============================================================================
//
//   tp        = (high + low + close) / 3
//   ma        = mean(tp, period)
//   deviation = mean(|tp - ma|, period)
//   CCI       = (tp - ma) / (0.015 * deviation)
//
// The absolute deviation of each bar is taken against that bar's own moving
// average and then averaged, so CCI is first defined at index 2 * period - 2.
// A zero deviation is left to IEEE semantics (inf or NaN).

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ensure_window;
use crate::market_data::CandleFrame;
use crate::stats::{rolling_mean, typical_price};

pub const CCI: &str = "CCI";

/// Lambert's scaling constant.
const SCALE: f64 = 0.015;

/// Parameters for [`cci`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CciParams {
    pub period: usize,
}

impl Default for CciParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// Append `CCI`.
pub fn cci(frame: &CandleFrame, params: &CciParams) -> Result<CandleFrame> {
    ensure_window("CCI", "period", params.period)?;
    let (high, low, close) = frame.hlc()?;
    debug!(rows = frame.len(), period = params.period, "computing CCI");

    let typical = typical_price(high, low, close);
    let moving_avg = rolling_mean(&typical, params.period);
    let abs_dev: Vec<f64> = typical
        .iter()
        .zip(&moving_avg)
        .map(|(tp, ma)| (tp - ma).abs())
        .collect();
    let mean_deviation = rolling_mean(&abs_dev, params.period);

    let values = typical
        .iter()
        .zip(moving_avg.iter().zip(&mean_deviation))
        .map(|(tp, (ma, md))| (tp - ma) / (SCALE * md))
        .collect();

    frame.augmented([(CCI.to_string(), values)])
}
