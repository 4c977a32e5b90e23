// =============================================================================
// Average True Range (ATR): Simple Mean of True Range
// =============================================================================
//
// ATR measures market volatility by decomposing the entire range of a bar.
//
// True Range (TR) for each bar:
//   TR = max(H - L, |H - prevClose|, |prevClose - L|)
//
// ATR is the *simple* rolling mean of TR over `n` bars, not Wilder's
// recursive smoothing.  Keltner Channels and SuperTrend are calibrated
// against this convention.
//
// The first bar has no previous close; its TR is H - L, so ATR is defined
// from index n - 1.
//
// Default period: 14
// =============================================================================

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ensure_window;
use crate::market_data::CandleFrame;
use crate::stats::{rolling_mean, true_range};

/// Parameters for [`atr`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtrParams {
    pub n: usize,
}

impl Default for AtrParams {
    fn default() -> Self {
        Self { n: 14 }
    }
}

/// Output column name for a given window, e.g. `ATR_14`.
pub fn atr_column(n: usize) -> String {
    format!("ATR_{n}")
}

/// ATR series used directly and as a private input of Keltner / SuperTrend.
pub(crate) fn atr_series(high: &[f64], low: &[f64], close: &[f64], n: usize) -> Vec<f64> {
    rolling_mean(&true_range(high, low, close), n)
}

/// Append `ATR_{n}`.
pub fn atr(frame: &CandleFrame, params: &AtrParams) -> Result<CandleFrame> {
    ensure_window("ATR", "n", params.n)?;
    let (high, low, close) = frame.hlc()?;
    debug!(rows = frame.len(), n = params.n, "computing ATR");

    frame.augmented([(atr_column(params.n), atr_series(high, low, close, params.n))])
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::stubs::{assert_close, frame_hlc, nan_prefix};

    #[test]
    fn atr_period_zero() {
        let frame = frame_hlc(&[(105.0, 95.0, 102.0); 20]);
        assert!(atr(&frame, &AtrParams { n: 0 }).is_err());
    }

    #[test]
    fn atr_missing_columns() {
        let frame = CandleFrame::new(crate::stubs::hourly(3));
        let err = atr(&frame, &AtrParams::default()).unwrap_err();
        assert!(err.to_string().contains("mid_h"));
    }

    #[test]
    fn atr_insufficient_data() {
        let frame = frame_hlc(&[(105.0, 95.0, 102.0); 10]);
        let out = atr(&frame, &AtrParams { n: 14 }).unwrap();
        assert!(out.column("ATR_14").unwrap().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn atr_defined_from_index_n_minus_one() {
        let frame = frame_hlc(&[
            (102.0, 98.0, 101.0),
            (104.0, 99.0, 103.0),
            (106.0, 100.0, 105.0),
            (108.0, 102.0, 107.0),
        ]);
        let out = atr(&frame, &AtrParams { n: 3 }).unwrap();
        let series = out.column("ATR_3").unwrap();
        assert_eq!(nan_prefix(series), 2);
        // TR = [4, 5, 6, 6]
        assert_close(series[2], 5.0);
        assert_close(series[3], 17.0 / 3.0);
    }

    #[test]
    fn atr_constant_range() {
        let rows: Vec<(f64, f64, f64)> = (0..30)
            .map(|i| {
                let base = 100.0 + i as f64 * 0.1;
                (base + 5.0, base - 5.0, base)
            })
            .collect();
        let out = atr(&frame_hlc(&rows), &AtrParams::default()).unwrap();
        let last = *out.column("ATR_14").unwrap().last().unwrap();
        assert!((last - 10.0).abs() < 0.2, "expected ATR near 10.0, got {last}");
    }

    #[test]
    fn atr_true_range_uses_prev_close() {
        // Gap scenario: |H - prevClose| > H - L
        let frame = frame_hlc(&[
            (105.0, 95.0, 95.0),
            (115.0, 108.0, 112.0),
            (118.0, 110.0, 115.0),
        ]);
        let out = atr(&frame, &AtrParams { n: 2 }).unwrap();
        // TR = [10, 20, 8]
        assert_close(out.column("ATR_2").unwrap()[1], 15.0);
        assert_close(out.column("ATR_2").unwrap()[2], 14.0);
    }
}
