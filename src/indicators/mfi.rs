// =============================================================================
// Money Flow Index (MFI)
// =============================================================================
//
//   tp         = (high + low + close) / 3
//   raw_flow   = tp * volume
//   positive   = raw_flow where tp rose from the previous bar, else 0
//   negative   = raw_flow where tp fell from the previous bar, else 0
//   ratio      = sum(positive, period) / sum(negative, period)
//   MFI        = 100 - 100 / (1 + ratio)
//
// A window with no negative flow gives ratio = inf and MFI = 100; a window
// with no flow at all gives NaN.  Neither is clamped.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ensure_window;
use crate::market_data::CandleFrame;
use crate::stats::{diff, rolling_sum, typical_price};

pub const MFI: &str = "MFI";

/// Parameters for [`mfi`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MfiParams {
    pub period: usize,
}

impl Default for MfiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// Append `MFI`.
pub fn mfi(frame: &CandleFrame, params: &MfiParams) -> Result<CandleFrame> {
    ensure_window("MFI", "period", params.period)?;
    let (high, low, close, volume) = frame.hlcv()?;
    debug!(rows = frame.len(), period = params.period, "computing MFI");

    let typical = typical_price(high, low, close);
    let change = diff(&typical);

    let mut positive = vec![0.0; typical.len()];
    let mut negative = vec![0.0; typical.len()];
    for (i, (&tp, &vol)) in typical.iter().zip(volume).enumerate() {
        let flow = tp * vol;
        if change[i] > 0.0 {
            positive[i] = flow;
        } else if change[i] < 0.0 {
            negative[i] = flow;
        }
    }

    let positive_sum = rolling_sum(&positive, params.period);
    let negative_sum = rolling_sum(&negative, params.period);
    let values = positive_sum
        .iter()
        .zip(&negative_sum)
        .map(|(p, n)| {
            let ratio = p / n;
            100.0 - 100.0 / (1.0 + ratio)
        })
        .collect();

    frame.augmented([(MFI.to_string(), values)])
}
