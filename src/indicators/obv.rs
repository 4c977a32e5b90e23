// =============================================================================
// On-Balance Volume (OBV)
// =============================================================================
//
//   OBV_t = OBV_{t-1} + sign(close_t - close_{t-1}) * volume_t
//
// The first bar has no previous close and contributes 0, as does any bar
// whose contribution is undefined (NaN close or volume).  Requires a `volume`
// column.

use anyhow::Result;
use tracing::debug;

use crate::market_data::{CandleFrame, MID_C, VOLUME};
use crate::stats::diff;

pub const OBV: &str = "OBV";

/// Append `OBV`.
pub fn obv(frame: &CandleFrame) -> Result<CandleFrame> {
    let closes = frame.require(MID_C)?;
    let volume = frame.require(VOLUME)?;
    debug!(rows = frame.len(), "computing OBV");

    let mut running = 0.0;
    let values = diff(closes)
        .iter()
        .zip(volume)
        .map(|(&delta, &vol)| {
            let contribution = sign(delta) * vol;
            if !contribution.is_nan() {
                running += contribution;
            }
            running
        })
        .collect();

    frame.augmented([(OBV.to_string(), values)])
}

/// -1, 0 or +1; NaN stays NaN.
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x * 0.0
    }
}
