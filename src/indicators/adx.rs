// =============================================================================
// Average Directional Index (ADX)
// =============================================================================
//
// ADX quantifies trend **strength** regardless of direction.
//
// Calculation pipeline:
//   1. Compute +DM and -DM per bar from consecutive high/low deltas:
//        up   = high_t - high_{t-1}
//        down = low_{t-1} - low_t
//        +DM  = max(up, 0)   if up > down   else 0
//        -DM  = max(down, 0) if down > up   else 0
//      The first bar has no predecessor and scores 0 on both.
//   2. Compute True Range (TR) per bar.
//   3. Rolling simple mean (period) of +DM, -DM and TR.
//   4. +DI = 100 * mean(+DM) / mean(TR)
//      -DI = 100 * mean(-DM) / mean(TR)
//   5. DX  = 100 * |+DI - -DI| / (+DI + -DI)
//   6. ADX = rolling simple mean of DX over `period` bars.
//
// +DI and -DI are kept on the output; TR, DM and DX are intermediates.
//
// Interpretation:
//   ADX > 25  => trending market
//   ADX < 20  => ranging / choppy market
// =============================================================================

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ensure_window;
use crate::market_data::CandleFrame;
use crate::stats::{rolling_mean, true_range};

pub const DI_PLUS: &str = "DI+";
pub const DI_MINUS: &str = "DI-";
pub const ADX: &str = "ADX";

/// Parameters for [`adx`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdxParams {
    pub period: usize,
}

impl Default for AdxParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// Append `DI+`, `DI-` and `ADX`.
pub fn adx(frame: &CandleFrame, params: &AdxParams) -> Result<CandleFrame> {
    ensure_window("ADX", "period", params.period)?;
    let (high, low, close) = frame.hlc()?;
    debug!(rows = frame.len(), period = params.period, "computing ADX");

    let (plus_dm, minus_dm) = directional_movement(high, low);
    let tr = true_range(high, low, close);

    let atr = rolling_mean(&tr, params.period);
    let plus_smooth = rolling_mean(&plus_dm, params.period);
    let minus_smooth = rolling_mean(&minus_dm, params.period);

    let di_plus: Vec<f64> = plus_smooth
        .iter()
        .zip(&atr)
        .map(|(dm, tr)| 100.0 * (dm / tr))
        .collect();
    let di_minus: Vec<f64> = minus_smooth
        .iter()
        .zip(&atr)
        .map(|(dm, tr)| 100.0 * (dm / tr))
        .collect();

    let dx: Vec<f64> = di_plus
        .iter()
        .zip(&di_minus)
        .map(|(p, m)| 100.0 * (p - m).abs() / (p + m))
        .collect();
    let adx = rolling_mean(&dx, params.period);

    frame.augmented([
        (DI_PLUS.to_string(), di_plus),
        (DI_MINUS.to_string(), di_minus),
        (ADX.to_string(), adx),
    ])
}

/// +DM / -DM per bar with the mutual-exclusion rule.
fn directional_movement(high: &[f64], low: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut plus_dm = vec![0.0; high.len()];
    let mut minus_dm = vec![0.0; high.len()];

    for i in 1..high.len() {
        let up_move = high[i] - high[i - 1];
        let down_move = low[i - 1] - low[i];

        if up_move > down_move {
            plus_dm[i] = up_move.max(0.0);
        }
        if down_move > up_move {
            minus_dm[i] = down_move.max(0.0);
        }
    }

    (plus_dm, minus_dm)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::stubs::{frame_hlc, nan_prefix, wavy};

    fn trending_up(n: usize) -> CandleFrame {
        let rows: Vec<(f64, f64, f64)> = (0..n)
            .map(|i| {
                let base = 100.0 + i as f64 * 2.0;
                (base + 1.0, base - 1.0, base + 0.5)
            })
            .collect();
        frame_hlc(&rows)
    }

    #[test]
    fn adx_period_zero() {
        assert!(adx(&wavy(40), &AdxParams { period: 0 }).is_err());
    }

    #[test]
    fn adx_warmup() {
        let out = adx(&wavy(100), &AdxParams::default()).unwrap();
        assert_eq!(nan_prefix(out.column(DI_PLUS).unwrap()), 13);
        assert_eq!(nan_prefix(out.column(ADX).unwrap()), 26);
    }

    #[test]
    fn directional_movement_mutual_exclusion() {
        // bar1: up 2, down -1 => +DM 2; bar2: up -3, down 4 => -DM 4;
        // bar3: up 1, down 1 => tie, both 0.
        let high = [10.0, 12.0, 9.0, 10.0];
        let low = [8.0, 9.0, 5.0, 4.0];
        let (p, m) = directional_movement(&high, &low);
        assert_eq!(p, vec![0.0, 2.0, 0.0, 0.0]);
        assert_eq!(m, vec![0.0, 0.0, 4.0, 0.0]);
    }

    #[test]
    fn directional_movement_clips_negative_moves() {
        // Inside bar: up = -1, down = -1 ... then up = -0.5 > down = -2
        let high = [10.0, 9.0, 8.5];
        let low = [5.0, 6.0, 8.0];
        let (p, m) = directional_movement(&high, &low);
        assert_eq!(p, vec![0.0, 0.0, 0.0]);
        assert_eq!(m, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn adx_strong_uptrend() {
        let out = adx(&trending_up(60), &AdxParams::default()).unwrap();
        let adx = *out.column(ADX).unwrap().last().unwrap();
        let di_plus = *out.column(DI_PLUS).unwrap().last().unwrap();
        let di_minus = *out.column(DI_MINUS).unwrap().last().unwrap();
        assert!(adx > 90.0, "expected strong trend, got {adx}");
        assert!(di_plus > di_minus);
        assert_eq!(di_minus, 0.0);
    }

    #[test]
    fn adx_range_check() {
        let out = adx(&wavy(150), &AdxParams::default()).unwrap();
        for &v in out.column(ADX).unwrap().iter().filter(|v| !v.is_nan()) {
            assert!((0.0..=100.0).contains(&v), "ADX {v} out of range");
        }
    }
}
