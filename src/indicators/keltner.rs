// =============================================================================
// Keltner Channels
// =============================================================================
//
//   EMA  = EMA(close, n_ema)            (span mode, min_periods = n_ema)
//   KeUp = EMA + 2 * ATR(n_atr)
//   KeLo = EMA - 2 * ATR(n_atr)
//
// ATR is computed as a private intermediate series and never appears on the
// returned frame.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::atr::atr_series;
use super::ema::ema_series;
use super::ensure_window;
use crate::market_data::CandleFrame;

pub const EMA: &str = "EMA";
pub const KE_UP: &str = "KeUp";
pub const KE_LO: &str = "KeLo";

const ATR_MULTIPLIER: f64 = 2.0;

/// Parameters for [`keltner_channels`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeltnerParams {
    pub n_ema: usize,
    pub n_atr: usize,
}

impl Default for KeltnerParams {
    fn default() -> Self {
        Self { n_ema: 20, n_atr: 10 }
    }
}

/// Append `EMA`, `KeUp` and `KeLo`.
pub fn keltner_channels(frame: &CandleFrame, params: &KeltnerParams) -> Result<CandleFrame> {
    ensure_window("KeltnerChannels", "n_ema", params.n_ema)?;
    ensure_window("KeltnerChannels", "n_atr", params.n_atr)?;
    let (high, low, close) = frame.hlc()?;
    debug!(
        rows = frame.len(),
        n_ema = params.n_ema,
        n_atr = params.n_atr,
        "computing Keltner Channels"
    );

    let ema = ema_series(close, params.n_ema);
    let atr = atr_series(high, low, close, params.n_atr);

    let upper = ema
        .iter()
        .zip(&atr)
        .map(|(e, a)| a * ATR_MULTIPLIER + e)
        .collect();
    let lower = ema
        .iter()
        .zip(&atr)
        .map(|(e, a)| e - a * ATR_MULTIPLIER)
        .collect();

    frame.augmented([
        (EMA.to_string(), ema),
        (KE_UP.to_string(), upper),
        (KE_LO.to_string(), lower),
    ])
}
