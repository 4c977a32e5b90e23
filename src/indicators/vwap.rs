// =============================================================================
// Volume Weighted Average Price (VWAP): Session Anchored
// =============================================================================
//
//   VWAP_t = sum(typical_price * volume) / sum(volume)
//
// Both sums restart whenever the calendar date of the frame index changes
// from the previous bar, so each trading day gets its own VWAP.  A session
// whose cumulative volume is still zero yields NaN (0 / 0).

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::market_data::{CandleFrame, VOLUME};
use crate::stats::typical_price;

pub const VWAP: &str = "VWAP";

/// Cumulative sums for the current session.
#[derive(Debug, Default)]
struct Session {
    date: Option<NaiveDate>,
    tp_volume: f64,
    volume: f64,
}

impl Session {
    fn roll_if_new_day(&mut self, date: NaiveDate) {
        if self.date != Some(date) {
            trace!(%date, "VWAP session reset");
            *self = Self {
                date: Some(date),
                ..Self::default()
            };
        }
    }
}

/// Append `VWAP`.
pub fn vwap(frame: &CandleFrame) -> Result<CandleFrame> {
    let (high, low, close) = frame.hlc()?;
    let volume = frame.require(VOLUME)?;
    debug!(rows = frame.len(), "computing VWAP");

    let typical = typical_price(high, low, close);
    let mut session = Session::default();
    let mut values = Vec::with_capacity(frame.len());

    for ((time, tp), vol) in frame.index().iter().zip(&typical).zip(volume) {
        session.roll_if_new_day(time.date());
        session.tp_volume += tp * vol;
        session.volume += vol;
        values.push(session.tp_volume / session.volume);
    }

    frame.augmented([(VWAP.to_string(), values)])
}
