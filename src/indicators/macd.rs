// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
//   MACD   = EMA(close, n_fast) - EMA(close, n_slow)
//   SIGNAL = EMA(MACD, n_signal)
//   HIST   = MACD - SIGNAL
//
// All three EMAs are span-mode with min_periods equal to their span, so MACD
// is defined from index n_slow - 1 and SIGNAL from n_slow + n_signal - 2.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ema::ema_series;
use super::ensure_window;
use crate::market_data::{CandleFrame, MID_C};

pub const MACD: &str = "MACD";
pub const SIGNAL: &str = "SIGNAL";
pub const HIST: &str = "HIST";

/// Parameters for [`macd`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    pub n_slow: usize,
    pub n_fast: usize,
    pub n_signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            n_slow: 26,
            n_fast: 12,
            n_signal: 9,
        }
    }
}

/// Append `MACD`, `SIGNAL` and `HIST`.
pub fn macd(frame: &CandleFrame, params: &MacdParams) -> Result<CandleFrame> {
    ensure_window("MACD", "n_slow", params.n_slow)?;
    ensure_window("MACD", "n_fast", params.n_fast)?;
    ensure_window("MACD", "n_signal", params.n_signal)?;
    let closes = frame.require(MID_C)?;
    debug!(
        rows = frame.len(),
        n_slow = params.n_slow,
        n_fast = params.n_fast,
        n_signal = params.n_signal,
        "computing MACD"
    );

    let ema_long = ema_series(closes, params.n_slow);
    let ema_short = ema_series(closes, params.n_fast);

    let line: Vec<f64> = ema_short
        .iter()
        .zip(&ema_long)
        .map(|(short, long)| short - long)
        .collect();
    let signal = ema_series(&line, params.n_signal);
    let hist = line.iter().zip(&signal).map(|(m, s)| m - s).collect();

    frame.augmented([
        (MACD.to_string(), line),
        (SIGNAL.to_string(), signal),
        (HIST.to_string(), hist),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stubs::{frame_closes, nan_prefix, wavy};

    #[test]
    fn macd_warmup_prefixes() {
        let out = macd(&wavy(100), &MacdParams::default()).unwrap();
        assert_eq!(nan_prefix(out.column(MACD).unwrap()), 25);
        assert_eq!(nan_prefix(out.column(SIGNAL).unwrap()), 33);
        assert_eq!(nan_prefix(out.column(HIST).unwrap()), 33);
    }

    #[test]
    fn hist_is_exactly_macd_minus_signal() {
        let out = macd(&wavy(200), &MacdParams::default()).unwrap();
        let m = out.column(MACD).unwrap();
        let s = out.column(SIGNAL).unwrap();
        let h = out.column(HIST).unwrap();
        for i in 0..m.len() {
            if m[i].is_nan() || s[i].is_nan() {
                continue;
            }
            assert_eq!(h[i], m[i] - s[i]);
        }
    }

    #[test]
    fn macd_positive_in_uptrend() {
        let closes: Vec<f64> = (1..=100).map(|x| x as f64).collect();
        let out = macd(&frame_closes(&closes), &MacdParams::default()).unwrap();
        assert!(*out.column(MACD).unwrap().last().unwrap() > 0.0);
    }

    #[test]
    fn macd_flat_is_zero() {
        let out = macd(&frame_closes(&[50.0; 60]), &MacdParams::default()).unwrap();
        let last = *out.column(HIST).unwrap().last().unwrap();
        assert!(last.abs() < 1e-9);
    }

    #[test]
    fn macd_rejects_zero_signal() {
        let p = MacdParams {
            n_signal: 0,
            ..MacdParams::default()
        };
        assert!(macd(&wavy(50), &p).is_err());
    }
}
