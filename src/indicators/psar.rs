// =============================================================================
// Parabolic SAR: Stop And Reverse
// =============================================================================
//
// Two-regime state machine carried bar to bar.
//
// Seed (bar 0):  trend = up, EP = high_0, SAR = low_0, AF = iaf
//
// Uptrend step:
//   SAR = SAR + AF * (EP - SAR), clamped to <= min(low_{t-1}, low_{t-2})
//   low_t < SAR   => reverse: trend = down, SAR = EP, EP = low_t, AF = iaf
//   high_t > EP   => EP = high_t, AF = min(AF + iaf, maxaf)
//
// Downtrend step (mirror):
//   SAR = SAR - AF * (SAR - EP), clamped to >= max(high_{t-1}, high_{t-2})
//   high_t > SAR  => reverse: trend = up, SAR = EP, EP = high_t, AF = iaf
//   low_t < EP    => EP = low_t, AF = min(AF + iaf, maxaf)
//
// On bar 1 the "two bars back" reference is bar 0 itself.  Only the SAR is
// exposed; trend, EP and AF stay inside the pass.
// =============================================================================

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::ensure_positive;
use crate::market_data::CandleFrame;

pub const PSAR: &str = "PSAR";

/// Parameters for [`psar`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsarParams {
    /// Initial acceleration factor, also the step added on each new extreme.
    pub iaf: f64,
    /// Acceleration factor ceiling.
    pub maxaf: f64,
}

impl Default for PsarParams {
    fn default() -> Self {
        Self {
            iaf: 0.02,
            maxaf: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trend {
    Up,
    Down,
}

/// Running state of one SAR pass.
#[derive(Debug, Clone, Copy)]
struct SarState {
    sar: f64,
    trend: Trend,
    extreme_point: f64,
    af: f64,
}

impl SarState {
    fn seed(high: f64, low: f64, iaf: f64) -> Self {
        Self {
            sar: low,
            trend: Trend::Up,
            extreme_point: high,
            af: iaf,
        }
    }

    /// Advance to bar `i` given the highs/lows of bars `i - 1` and `i - 2`.
    fn advance(&mut self, bar: (f64, f64), prior: [(f64, f64); 2], params: &PsarParams) {
        let (high, low) = bar;
        let [(high_1, low_1), (high_2, low_2)] = prior;

        match self.trend {
            Trend::Up => {
                let sar = self.sar + self.af * (self.extreme_point - self.sar);
                self.sar = sar.min(low_2).min(low_1);

                if low < self.sar {
                    trace!(sar = self.extreme_point, "PSAR reversal to downtrend");
                    self.trend = Trend::Down;
                    self.sar = self.extreme_point;
                    self.extreme_point = low;
                    self.af = params.iaf;
                } else if high > self.extreme_point {
                    self.extreme_point = high;
                    self.af = (self.af + params.iaf).min(params.maxaf);
                }
            }
            Trend::Down => {
                let sar = self.sar - self.af * (self.sar - self.extreme_point);
                self.sar = sar.max(high_2).max(high_1);

                if high > self.sar {
                    trace!(sar = self.extreme_point, "PSAR reversal to uptrend");
                    self.trend = Trend::Up;
                    self.sar = self.extreme_point;
                    self.extreme_point = high;
                    self.af = params.iaf;
                } else if low < self.extreme_point {
                    self.extreme_point = low;
                    self.af = (self.af + params.iaf).min(params.maxaf);
                }
            }
        }
    }
}

/// Append `PSAR`.
pub fn psar(frame: &CandleFrame, params: &PsarParams) -> Result<CandleFrame> {
    ensure_positive("PSAR", "iaf", params.iaf)?;
    ensure_positive("PSAR", "maxaf", params.maxaf)?;
    ensure!(
        params.maxaf >= params.iaf,
        "PSAR: `maxaf` must be >= `iaf` (received maxaf={}, iaf={})",
        params.maxaf,
        params.iaf
    );
    let (high, low) = frame.hl()?;
    debug!(rows = frame.len(), iaf = params.iaf, maxaf = params.maxaf, "computing PSAR");

    frame.augmented([(PSAR.to_string(), sar_series(high, low, params))])
}

fn sar_series(high: &[f64], low: &[f64], params: &PsarParams) -> Vec<f64> {
    let mut out = Vec::with_capacity(high.len());
    if high.is_empty() {
        return out;
    }

    let mut state = SarState::seed(high[0], low[0], params.iaf);
    out.push(state.sar);

    for i in 1..high.len() {
        let back_1 = i - 1;
        let back_2 = i.saturating_sub(2);
        state.advance(
            (high[i], low[i]),
            [(high[back_1], low[back_1]), (high[back_2], low[back_2])],
            params,
        );
        out.push(state.sar);
    }
    out
}
