// =============================================================================
// Relative Volume (RVOL)
// =============================================================================
//
//   RVOL = volume / SMA(volume, length)
//
// The average includes the current bar, so the first value appears at index
// length - 1.  A window with no traded volume gives 0 / 0 = NaN.  Requires a
// `volume` column.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ensure_window;
use crate::market_data::{CandleFrame, VOLUME};
use crate::stats::rolling_mean;

pub const RVOL: &str = "RVOL";

/// Parameters for [`rvol`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RvolParams {
    pub length: usize,
}

impl Default for RvolParams {
    fn default() -> Self {
        Self { length: 20 }
    }
}

/// Append `RVOL`.
pub fn rvol(frame: &CandleFrame, params: &RvolParams) -> Result<CandleFrame> {
    ensure_window("RVOL", "length", params.length)?;
    let volume = frame.require(VOLUME)?;
    debug!(rows = frame.len(), length = params.length, "computing RVOL");

    let average = rolling_mean(volume, params.length);
    let values = volume.iter().zip(&average).map(|(v, avg)| v / avg).collect();

    frame.augmented([(RVOL.to_string(), values)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stubs::{assert_close, frame_closes, frame_ohlcv, nan_prefix, wavy};

    fn volumes(vols: &[f64]) -> CandleFrame {
        let rows: Vec<(f64, f64, f64, f64, f64)> =
            vols.iter().map(|&v| (10.0, 11.0, 9.0, 10.0, v)).collect();
        frame_ohlcv(&rows)
    }

    #[test]
    fn rvol_compares_bar_to_its_window() {
        let out = rvol(&volumes(&[100.0, 100.0, 100.0, 400.0]), &RvolParams { length: 4 }).unwrap();
        let v = out.column(RVOL).unwrap();
        assert_eq!(nan_prefix(v), 3);
        // 400 / mean(100, 100, 100, 400)
        assert_close(v[3], 400.0 / 175.0);
    }

    #[test]
    fn rvol_steady_volume_is_one() {
        let out = rvol(&volumes(&[250.0; 6]), &RvolParams { length: 3 }).unwrap();
        for &v in &out.column(RVOL).unwrap()[2..] {
            assert_close(v, 1.0);
        }
    }

    #[test]
    fn rvol_silent_window_is_nan() {
        let out = rvol(&volumes(&[50.0, 0.0, 0.0, 0.0]), &RvolParams { length: 3 }).unwrap();
        let v = out.column(RVOL).unwrap();
        assert_close(v[2], 0.0);
        assert!(v[3].is_nan());
    }

    #[test]
    fn rvol_default_warmup() {
        let out = rvol(&wavy(40), &RvolParams::default()).unwrap();
        assert_eq!(nan_prefix(out.column(RVOL).unwrap()), 19);
    }

    #[test]
    fn rvol_requires_volume() {
        let err = rvol(&frame_closes(&[1.0; 5]), &RvolParams { length: 2 }).unwrap_err();
        assert!(err.to_string().contains("volume"), "{err}");
    }

    #[test]
    fn rvol_rejects_zero_length() {
        assert!(rvol(&wavy(10), &RvolParams { length: 0 }).is_err());
    }
}
