// =============================================================================
// Ichimoku Cloud
// =============================================================================
//
//   TENKAN   = (max(high, tenkan) + min(low, tenkan)) / 2
//   KIJUN    = (max(high, kijun) + min(low, kijun)) / 2
//   SENKOU_A = ((TENKAN + KIJUN) / 2)                      shifted forward by kijun
//   SENKOU_B = ((max(high, senkou_b) + min(low, senkou_b)) / 2) shifted forward by kijun
//   CHIKOU   = close                                       shifted backward by kijun
//
// The frame keeps its own index, so the shifts leave NaN at the start of the
// leading spans and at the end of CHIKOU.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ensure_window;
use crate::market_data::CandleFrame;
use crate::stats::{midpoint, rolling_max, rolling_min, shift};

pub const TENKAN: &str = "TENKAN";
pub const KIJUN: &str = "KIJUN";
pub const SENKOU_A: &str = "SENKOU_A";
pub const SENKOU_B: &str = "SENKOU_B";
pub const CHIKOU: &str = "CHIKOU";

/// Parameters for [`ichimoku`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IchimokuParams {
    pub tenkan: usize,
    pub kijun: usize,
    pub senkou_b: usize,
}

impl Default for IchimokuParams {
    fn default() -> Self {
        Self {
            tenkan: 9,
            kijun: 26,
            senkou_b: 52,
        }
    }
}

/// Append `TENKAN`, `KIJUN`, `SENKOU_A`, `SENKOU_B` and `CHIKOU`.
pub fn ichimoku(frame: &CandleFrame, params: &IchimokuParams) -> Result<CandleFrame> {
    ensure_window("Ichimoku", "tenkan", params.tenkan)?;
    ensure_window("Ichimoku", "kijun", params.kijun)?;
    ensure_window("Ichimoku", "senkou_b", params.senkou_b)?;
    let (high, low, close) = frame.hlc()?;
    debug!(
        rows = frame.len(),
        tenkan = params.tenkan,
        kijun = params.kijun,
        senkou_b = params.senkou_b,
        "computing Ichimoku"
    );

    let channel_mid = |window: usize| midpoint(&rolling_max(high, window), &rolling_min(low, window));

    let tenkan = channel_mid(params.tenkan);
    let kijun = channel_mid(params.kijun);
    let lead = params.kijun as isize;

    let senkou_a = shift(&midpoint(&tenkan, &kijun), lead);
    let senkou_b = shift(&channel_mid(params.senkou_b), lead);
    let chikou = shift(close, -lead);

    frame.augmented([
        (TENKAN.to_string(), tenkan),
        (KIJUN.to_string(), kijun),
        (SENKOU_A.to_string(), senkou_a),
        (SENKOU_B.to_string(), senkou_b),
        (CHIKOU.to_string(), chikou),
    ])
}
