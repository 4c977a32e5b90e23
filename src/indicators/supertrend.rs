// =============================================================================
// SuperTrend
// =============================================================================
//
// Trend-following band built on ATR (simple-mean convention, see atr.rs):
//
//   upper_t = (high_t + low_t) / 2 + multiplier * ATR_t
//   lower_t = (high_t + low_t) / 2 - multiplier * ATR_t
//
// Direction at bar t (t >= 1), compared against the previous bar's bands as
// already adjusted:
//   close_t > upper_{t-1}  => up
//   close_t < lower_{t-1}  => down
//   otherwise              => carried over, and the bands ratchet:
//                             while up,   lower_t = max(lower_t, lower_{t-1})
//                             while down, upper_t = min(upper_t, upper_{t-1})
//
// SUPERTREND = lower band while up, upper band otherwise.  ST_DIRECTION is
// 1 (up), -1 (down) or 0 before the first breakout.  ATR is a private
// intermediate and is not returned.
// =============================================================================

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::atr::atr_series;
use super::{ensure_finite, ensure_window};
use crate::market_data::CandleFrame;

pub const SUPERTREND: &str = "SUPERTREND";
pub const ST_DIRECTION: &str = "ST_DIRECTION";

/// Parameters for [`supertrend`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuperTrendParams {
    pub atr_period: usize,
    pub multiplier: f64,
}

impl Default for SuperTrendParams {
    fn default() -> Self {
        Self {
            atr_period: 10,
            multiplier: 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Undetermined,
    Up,
    Down,
}

impl Direction {
    fn as_f64(self) -> f64 {
        match self {
            Self::Undetermined => 0.0,
            Self::Up => 1.0,
            Self::Down => -1.0,
        }
    }
}

/// Bands and direction of the previous bar.
#[derive(Debug, Clone, Copy)]
struct SuperTrendState {
    upper: f64,
    lower: f64,
    direction: Direction,
}

impl SuperTrendState {
    /// Advance to the next bar and store its (possibly ratcheted) bands.
    fn advance(&mut self, close: f64, mut upper: f64, mut lower: f64) {
        let previous = self.direction;

        if close > self.upper {
            self.direction = Direction::Up;
        } else if close < self.lower {
            self.direction = Direction::Down;
        } else {
            match self.direction {
                Direction::Up if lower < self.lower => lower = self.lower,
                Direction::Down if upper > self.upper => upper = self.upper,
                _ => {}
            }
        }

        if self.direction != previous {
            trace!(close, from = ?previous, to = ?self.direction, "SuperTrend direction change");
        }
        self.upper = upper;
        self.lower = lower;
    }

    fn value(&self) -> f64 {
        match self.direction {
            Direction::Up => self.lower,
            Direction::Down | Direction::Undetermined => self.upper,
        }
    }
}

/// Append `SUPERTREND` and `ST_DIRECTION`.
pub fn supertrend(frame: &CandleFrame, params: &SuperTrendParams) -> Result<CandleFrame> {
    ensure_window("SuperTrend", "atr_period", params.atr_period)?;
    ensure_finite("SuperTrend", "multiplier", params.multiplier)?;
    let (high, low, close) = frame.hlc()?;
    debug!(
        rows = frame.len(),
        atr_period = params.atr_period,
        multiplier = params.multiplier,
        "computing SuperTrend"
    );

    let atr = atr_series(high, low, close, params.atr_period);
    let n = close.len();
    let mut values = Vec::with_capacity(n);
    let mut directions = Vec::with_capacity(n);

    let band = |i: usize| {
        let mid = (high[i] + low[i]) / 2.0;
        (mid + params.multiplier * atr[i], mid - params.multiplier * atr[i])
    };

    if n > 0 {
        let (upper, lower) = band(0);
        let mut state = SuperTrendState {
            upper,
            lower,
            direction: Direction::Undetermined,
        };
        values.push(state.value());
        directions.push(state.direction.as_f64());

        for i in 1..n {
            let (upper, lower) = band(i);
            state.advance(close[i], upper, lower);
            values.push(state.value());
            directions.push(state.direction.as_f64());
        }
    }

    frame.augmented([
        (SUPERTREND.to_string(), values),
        (ST_DIRECTION.to_string(), directions),
    ])
}
