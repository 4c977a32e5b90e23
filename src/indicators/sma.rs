// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
//   SMA_t = mean(x_{t-period+1} .. x_t)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ensure_window;
use crate::market_data::{CandleFrame, MID_C};
use crate::stats::rolling_mean;

/// Parameters for [`sma`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmaParams {
    /// Source column.
    pub column: String,
    pub period: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        Self {
            column: MID_C.to_string(),
            period: 20,
        }
    }
}

/// Output column name for a given period, e.g. `SMA_20`.
pub fn sma_column(period: usize) -> String {
    format!("SMA_{period}")
}

/// Append `SMA_{period}` computed over `params.column`.
pub fn sma(frame: &CandleFrame, params: &SmaParams) -> Result<CandleFrame> {
    ensure_window("SMA", "period", params.period)?;
    let source = frame.require(&params.column)?;
    debug!(rows = frame.len(), column = %params.column, period = params.period, "computing SMA");

    frame.augmented([(sma_column(params.period), rolling_mean(source, params.period))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stubs::{assert_close, frame_closes, nan_prefix};

    #[test]
    fn sma_over_close() {
        let frame = frame_closes(&[1.0, 2.0, 3.0, 4.0]);
        let out = sma(
            &frame,
            &SmaParams {
                period: 2,
                ..SmaParams::default()
            },
        )
        .unwrap();
        let s = out.column("SMA_2").unwrap();
        assert_eq!(nan_prefix(s), 1);
        assert_close(s[1], 1.5);
        assert_close(s[3], 3.5);
    }

    #[test]
    fn sma_over_other_column() {
        let frame = frame_closes(&[1.0, 2.0, 3.0]);
        let out = sma(
            &frame,
            &SmaParams {
                column: "mid_h".into(),
                period: 3,
            },
        )
        .unwrap();
        assert_close(out.column("SMA_3").unwrap()[2], 3.0);
    }
}
