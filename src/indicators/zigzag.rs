// =============================================================================
// ZigZag
// =============================================================================
//
// Marks swing pivots on the close.  The last pivot candidate starts at bar 0;
// whenever the close moves at least `deviation` percent away from it, the
// candidate is confirmed and the current bar becomes the new candidate.  The
// final candidate is always marked.
//
//   ZIGZAG        pivot close at pivot bars, 0.0 elsewhere
//   ZIGZAG_PIVOT  1.0 at pivot bars, 0.0 elsewhere
// =============================================================================

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::ensure_positive;
use crate::market_data::{CandleFrame, MID_C};

pub const ZIGZAG: &str = "ZIGZAG";
pub const ZIGZAG_PIVOT: &str = "ZIGZAG_PIVOT";

/// Parameters for [`zigzag`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZigZagParams {
    /// Minimum swing, in percent, between consecutive pivots.
    pub deviation: f64,
}

impl Default for ZigZagParams {
    fn default() -> Self {
        Self { deviation: 5.0 }
    }
}

/// Pending pivot of one ZigZag pass.
#[derive(Debug, Clone, Copy)]
struct ZigZagState {
    last_pivot_price: f64,
    last_pivot_index: usize,
    /// 1 after an upswing, -1 after a downswing, 0 before the first swing.
    trend_direction: i8,
}

impl ZigZagState {
    /// Feed bar `index`; returns the index of a pivot confirmed by it.
    fn advance(&mut self, index: usize, price: f64, deviation: f64) -> Option<usize> {
        let change = (price - self.last_pivot_price) / self.last_pivot_price * 100.0;
        if change.abs() < deviation || change.is_nan() {
            return None;
        }

        let confirmed = self.last_pivot_index;
        self.last_pivot_price = price;
        self.last_pivot_index = index;
        self.trend_direction = if change > 0.0 { 1 } else { -1 };
        trace!(confirmed, change, direction = self.trend_direction, "ZigZag pivot");
        Some(confirmed)
    }
}

/// Append `ZIGZAG` and `ZIGZAG_PIVOT`.
pub fn zigzag(frame: &CandleFrame, params: &ZigZagParams) -> Result<CandleFrame> {
    ensure_positive("ZigZag", "deviation", params.deviation)?;
    let closes = frame.require(MID_C)?;
    debug!(rows = frame.len(), deviation = params.deviation, "computing ZigZag");

    let mut values = vec![0.0; closes.len()];
    let mut pivots = vec![0.0; closes.len()];

    if let Some(&first) = closes.first() {
        let mut state = ZigZagState {
            last_pivot_price: first,
            last_pivot_index: 0,
            trend_direction: 0,
        };
        for (i, &price) in closes.iter().enumerate().skip(1) {
            if let Some(pivot) = state.advance(i, price, params.deviation) {
                values[pivot] = closes[pivot];
                pivots[pivot] = 1.0;
            }
        }
        values[state.last_pivot_index] = state.last_pivot_price;
        pivots[state.last_pivot_index] = 1.0;
    }

    frame.augmented([
        (ZIGZAG.to_string(), values),
        (ZIGZAG_PIVOT.to_string(), pivots),
    ])
}
