// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA of the typical price), an
// upper band (SMA + s*σ) and a lower band (SMA - s*σ), where σ is the
// population standard deviation of the typical price over the same window.
//
//   typical = (high + low + close) / 3
//   BB_MA   = mean(typical, n)
//   BB_UP   = BB_MA + s * std(typical, n)
//   BB_LW   = BB_MA - s * std(typical, n)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ensure_finite, ensure_window};
use crate::market_data::CandleFrame;
use crate::stats::{rolling_mean, rolling_std, typical_price};

pub const BB_MA: &str = "BB_MA";
pub const BB_UP: &str = "BB_UP";
pub const BB_LW: &str = "BB_LW";

/// Parameters for [`bollinger_bands`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerParams {
    /// Window length.
    pub n: usize,
    /// Band width in standard deviations.
    pub s: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self { n: 20, s: 2.0 }
    }
}

/// Append `BB_MA`, `BB_UP` and `BB_LW`.
pub fn bollinger_bands(frame: &CandleFrame, params: &BollingerParams) -> Result<CandleFrame> {
    ensure_window("BollingerBands", "n", params.n)?;
    ensure_finite("BollingerBands", "s", params.s)?;
    let (high, low, close) = frame.hlc()?;
    debug!(rows = frame.len(), n = params.n, s = params.s, "computing Bollinger Bands");

    let typical = typical_price(high, low, close);
    let middle = rolling_mean(&typical, params.n);
    let std_dev = rolling_std(&typical, params.n);

    let upper = middle
        .iter()
        .zip(&std_dev)
        .map(|(m, sd)| m + sd * params.s)
        .collect();
    let lower = middle
        .iter()
        .zip(&std_dev)
        .map(|(m, sd)| m - sd * params.s)
        .collect();

    frame.augmented([
        (BB_MA.to_string(), middle),
        (BB_UP.to_string(), upper),
        (BB_LW.to_string(), lower),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stubs::{assert_close, frame_closes, frame_hlc, nan_prefix, wavy};

    #[test]
    fn bollinger_basic() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let out = bollinger_bands(&frame_closes(&closes), &BollingerParams::default()).unwrap();
        let (ma, up, lw) = (
            out.column(BB_MA).unwrap()[19],
            out.column(BB_UP).unwrap()[19],
            out.column(BB_LW).unwrap()[19],
        );
        assert_close(ma, 10.5);
        assert!(up > ma);
        assert!(lw < ma);
    }

    #[test]
    fn bollinger_insufficient_data() {
        let out = bollinger_bands(&frame_closes(&[1.0, 2.0, 3.0]), &BollingerParams::default())
            .unwrap();
        assert!(out.column(BB_UP).unwrap().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn bollinger_flat_collapses_bands() {
        let out = bollinger_bands(&frame_closes(&[100.0; 20]), &BollingerParams::default())
            .unwrap();
        assert_eq!(out.column(BB_UP).unwrap()[19], out.column(BB_LW).unwrap()[19]);
    }

    #[test]
    fn bollinger_uses_typical_price() {
        // typical = (3 + 0 + 0) / 3 = 1 for every bar
        let out = bollinger_bands(
            &frame_hlc(&[(3.0, 0.0, 0.0); 4]),
            &BollingerParams { n: 2, s: 2.0 },
        )
        .unwrap();
        assert_close(out.column(BB_MA).unwrap()[1], 1.0);
    }

    #[test]
    fn band_width_is_two_s_sigma() {
        let frame = wavy(120);
        let params = BollingerParams { n: 20, s: 2.5 };
        let out = bollinger_bands(&frame, &params).unwrap();

        let (h, l, c) = frame.hlc().unwrap();
        let sigma = rolling_std(&typical_price(h, l, c), 20);
        let up = out.column(BB_UP).unwrap();
        let lw = out.column(BB_LW).unwrap();

        assert_eq!(nan_prefix(up), 19);
        for i in 19..frame.len() {
            assert!((up[i] - lw[i] - 2.0 * 2.5 * sigma[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn bollinger_rejects_zero_window() {
        let frame = frame_closes(&[1.0; 5]);
        assert!(bollinger_bands(&frame, &BollingerParams { n: 0, s: 2.0 }).is_err());
    }
}
