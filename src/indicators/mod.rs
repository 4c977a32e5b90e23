// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free indicator functions over a `CandleFrame`.  Every
// public function takes the frame by reference plus a parameter struct and
// returns a new frame with its derived columns appended, leaving the input
// untouched.
//
// Warm-up prefixes are NaN ("no value").  Numeric degeneracy (zero ranges,
// zero volume, zero losses) surfaces as NaN/inf rather than an error.  Errors
// are reserved for missing input columns and unusable parameters.

use anyhow::{ensure, Result};

// Moving averages
pub mod ema;
pub mod sma;

// Composite windowed indicators
pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod cci;
pub mod cmf;
pub mod donchian;
pub mod ichimoku;
pub mod keltner;
pub mod macd;
pub mod mfi;
pub mod obv;
pub mod roc;
pub mod rsi;
pub mod rvol;
pub mod stochastic;
pub mod vwap;
pub mod williams_r;

// Sequential state-machine indicators
pub mod aroon;
pub mod psar;
pub mod supertrend;
pub mod zigzag;

pub use adx::{adx, AdxParams};
pub use aroon::{aroon, AroonParams};
pub use atr::{atr, AtrParams};
pub use bollinger::{bollinger_bands, BollingerParams};
pub use cci::{cci, CciParams};
pub use cmf::{cmf, CmfParams};
pub use donchian::{donchian_channels, DonchianParams};
pub use ema::{ema, EmaParams};
pub use ichimoku::{ichimoku, IchimokuParams};
pub use keltner::{keltner_channels, KeltnerParams};
pub use macd::{macd, MacdParams};
pub use mfi::{mfi, MfiParams};
pub use obv::obv;
pub use psar::{psar, PsarParams};
pub use roc::{roc, RocParams};
pub use rsi::{rsi, RsiParams};
pub use rvol::{rvol, RvolParams};
pub use sma::{sma, SmaParams};
pub use stochastic::{stochastic, StochasticParams};
pub use supertrend::{supertrend, SuperTrendParams};
pub use vwap::vwap;
pub use williams_r::{williams_r, WilliamsRParams};
pub use zigzag::{zigzag, ZigZagParams};

// =============================================================================
// Parameter validation
// =============================================================================

/// Windows and periods must be at least one bar.
pub(crate) fn ensure_window(indicator: &str, name: &str, value: usize) -> Result<()> {
    ensure!(
        value > 0,
        "{indicator}: `{name}` must be > 0 (received {value})"
    );
    Ok(())
}

/// Multipliers must be finite.
pub(crate) fn ensure_finite(indicator: &str, name: &str, value: f64) -> Result<()> {
    ensure!(
        value.is_finite(),
        "{indicator}: `{name}` must be finite (received {value})"
    );
    Ok(())
}

/// Rates and thresholds must be finite and strictly positive.
pub(crate) fn ensure_positive(indicator: &str, name: &str, value: f64) -> Result<()> {
    ensure!(
        value.is_finite() && value > 0.0,
        "{indicator}: `{name}` must be > 0 (received {value})"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_validation_message_names_indicator_and_param() {
        let err = ensure_window("RSI", "n", 0).unwrap_err().to_string();
        assert!(err.contains("RSI"));
        assert!(err.contains("`n`"));
        assert!(ensure_window("RSI", "n", 1).is_ok());
    }

    #[test]
    fn positive_rejects_zero_nan_and_negative() {
        assert!(ensure_positive("PSAR", "iaf", 0.0).is_err());
        assert!(ensure_positive("PSAR", "iaf", -0.1).is_err());
        assert!(ensure_positive("PSAR", "iaf", f64::NAN).is_err());
        assert!(ensure_positive("PSAR", "iaf", 0.02).is_ok());
    }

    #[test]
    fn finite_accepts_negative_multipliers() {
        assert!(ensure_finite("Bollinger", "s", -1.0).is_ok());
        assert!(ensure_finite("Bollinger", "s", f64::INFINITY).is_err());
    }
}
