// =============================================================================
// Donchian Channels
// =============================================================================
//
//   DC_UPPER  = max(high, period)
//   DC_LOWER  = min(low, period)
//   DC_MIDDLE = (DC_UPPER + DC_LOWER) / 2

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ensure_window;
use crate::market_data::CandleFrame;
use crate::stats::{midpoint, rolling_max, rolling_min};

pub const DC_UPPER: &str = "DC_UPPER";
pub const DC_LOWER: &str = "DC_LOWER";
pub const DC_MIDDLE: &str = "DC_MIDDLE";

/// Parameters for [`donchian_channels`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DonchianParams {
    pub period: usize,
}

impl Default for DonchianParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// Append `DC_UPPER`, `DC_LOWER` and `DC_MIDDLE`.
pub fn donchian_channels(frame: &CandleFrame, params: &DonchianParams) -> Result<CandleFrame> {
    ensure_window("DonchianChannels", "period", params.period)?;
    let (high, low) = frame.hl()?;
    debug!(rows = frame.len(), period = params.period, "computing Donchian Channels");

    let upper = rolling_max(high, params.period);
    let lower = rolling_min(low, params.period);
    let middle = midpoint(&upper, &lower);

    frame.augmented([
        (DC_UPPER.to_string(), upper),
        (DC_LOWER.to_string(), lower),
        (DC_MIDDLE.to_string(), middle),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stubs::{frame_hl, frame_hlc, nan_prefix};

    #[test]
    fn donchian_tracks_extremes() {
        let rows = [
            (10.0, 5.0, 7.0),
            (12.0, 6.0, 8.0),
            (11.0, 4.0, 9.0),
            (9.0, 8.0, 8.5),
        ];
        let out = donchian_channels(&frame_hlc(&rows), &DonchianParams { period: 3 }).unwrap();
        let up = out.column(DC_UPPER).unwrap();
        let lo = out.column(DC_LOWER).unwrap();
        let mid = out.column(DC_MIDDLE).unwrap();
        assert_eq!(nan_prefix(up), 2);
        assert_eq!(up[2], 12.0);
        assert_eq!(lo[2], 4.0);
        assert_eq!(mid[2], 8.0);
        assert_eq!(up[3], 12.0);
        assert_eq!(lo[3], 4.0);
    }

    #[test]
    fn donchian_runs_without_close() {
        let rows = [(10.0, 5.0), (12.0, 6.0), (11.0, 4.0)];
        let out = donchian_channels(&frame_hl(&rows), &DonchianParams { period: 3 }).unwrap();
        assert_eq!(out.column(DC_UPPER).unwrap()[2], 12.0);
        assert_eq!(out.column(DC_LOWER).unwrap()[2], 4.0);
        assert_eq!(out.column(DC_MIDDLE).unwrap()[2], 8.0);
    }
}
