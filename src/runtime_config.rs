// =============================================================================
// Indicator Configuration: JSON-driven indicator pipelines with atomic save
// =============================================================================
//
// Lets a batch job or CSV glue tool describe which indicators to compute, and
// with which parameters, in a JSON file instead of code:
//
//   {
//     "indicators": [
//       { "indicator": "rsi", "n": 14 },
//       { "indicator": "bollinger_bands", "n": 20, "s": 2.0 },
//       { "indicator": "obv" }
//     ]
//   }
//
// Every parameter struct carries `#[serde(default)]`, so an entry only needs
// the fields it overrides.  Persistence uses the tmp + rename pattern so a
// crash mid-write never leaves a truncated file behind.
//
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::indicators::{
    self, AdxParams, AroonParams, AtrParams, BollingerParams, CciParams, CmfParams,
    DonchianParams, EmaParams, IchimokuParams, KeltnerParams, MacdParams, MfiParams, PsarParams,
    RocParams, RsiParams, RvolParams, SmaParams, StochasticParams, SuperTrendParams,
    WilliamsRParams, ZigZagParams,
};
use crate::market_data::CandleFrame;

/// Environment variable holding the path of the indicator config file.
pub const CONFIG_PATH_ENV: &str = "ALGOTRADER_INDICATOR_CONFIG";

// =============================================================================
// IndicatorSpec
// =============================================================================

/// One indicator invocation, tagged by name in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "indicator", rename_all = "snake_case")]
pub enum IndicatorSpec {
    Sma(SmaParams),
    Ema(EmaParams),
    BollingerBands(BollingerParams),
    Atr(AtrParams),
    KeltnerChannels(KeltnerParams),
    Rsi(RsiParams),
    Macd(MacdParams),
    Stochastic(StochasticParams),
    Adx(AdxParams),
    Obv,
    Vwap,
    Ichimoku(IchimokuParams),
    Cci(CciParams),
    WilliamsR(WilliamsRParams),
    Cmf(CmfParams),
    DonchianChannels(DonchianParams),
    Roc(RocParams),
    Mfi(MfiParams),
    Psar(PsarParams),
    SuperTrend(SuperTrendParams),
    ZigZag(ZigZagParams),
    Aroon(AroonParams),
    #[serde(alias = "relative_volume")]
    Rvol(RvolParams),
}

impl IndicatorSpec {
    /// Name used in the JSON tag and in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sma(_) => "sma",
            Self::Ema(_) => "ema",
            Self::BollingerBands(_) => "bollinger_bands",
            Self::Atr(_) => "atr",
            Self::KeltnerChannels(_) => "keltner_channels",
            Self::Rsi(_) => "rsi",
            Self::Macd(_) => "macd",
            Self::Stochastic(_) => "stochastic",
            Self::Adx(_) => "adx",
            Self::Obv => "obv",
            Self::Vwap => "vwap",
            Self::Ichimoku(_) => "ichimoku",
            Self::Cci(_) => "cci",
            Self::WilliamsR(_) => "williams_r",
            Self::Cmf(_) => "cmf",
            Self::DonchianChannels(_) => "donchian_channels",
            Self::Roc(_) => "roc",
            Self::Mfi(_) => "mfi",
            Self::Psar(_) => "psar",
            Self::SuperTrend(_) => "super_trend",
            Self::ZigZag(_) => "zig_zag",
            Self::Aroon(_) => "aroon",
            Self::Rvol(_) => "rvol",
        }
    }

    /// Run this indicator on `frame`.
    pub fn apply(&self, frame: &CandleFrame) -> Result<CandleFrame> {
        let result = match self {
            Self::Sma(p) => indicators::sma(frame, p),
            Self::Ema(p) => indicators::ema(frame, p),
            Self::BollingerBands(p) => indicators::bollinger_bands(frame, p),
            Self::Atr(p) => indicators::atr(frame, p),
            Self::KeltnerChannels(p) => indicators::keltner_channels(frame, p),
            Self::Rsi(p) => indicators::rsi(frame, p),
            Self::Macd(p) => indicators::macd(frame, p),
            Self::Stochastic(p) => indicators::stochastic(frame, p),
            Self::Adx(p) => indicators::adx(frame, p),
            Self::Obv => indicators::obv(frame),
            Self::Vwap => indicators::vwap(frame),
            Self::Ichimoku(p) => indicators::ichimoku(frame, p),
            Self::Cci(p) => indicators::cci(frame, p),
            Self::WilliamsR(p) => indicators::williams_r(frame, p),
            Self::Cmf(p) => indicators::cmf(frame, p),
            Self::DonchianChannels(p) => indicators::donchian_channels(frame, p),
            Self::Roc(p) => indicators::roc(frame, p),
            Self::Mfi(p) => indicators::mfi(frame, p),
            Self::Psar(p) => indicators::psar(frame, p),
            Self::SuperTrend(p) => indicators::supertrend(frame, p),
            Self::ZigZag(p) => indicators::zigzag(frame, p),
            Self::Aroon(p) => indicators::aroon(frame, p),
            Self::Rvol(p) => indicators::rvol(frame, p),
        };
        result.with_context(|| format!("indicator `{}` failed", self.name()))
    }
}

/// Run `specs` in order, each one seeing the columns added by the previous.
pub fn apply_all(frame: &CandleFrame, specs: &[IndicatorSpec]) -> Result<CandleFrame> {
    let mut current = frame.clone();
    for spec in specs {
        current = spec.apply(&current)?;
        debug!(indicator = spec.name(), columns = current.column_names().count(), "applied");
    }
    Ok(current)
}

// =============================================================================
// IndicatorConfig
// =============================================================================

fn default_indicators() -> Vec<IndicatorSpec> {
    vec![
        IndicatorSpec::Rsi(RsiParams::default()),
        IndicatorSpec::Macd(MacdParams::default()),
        IndicatorSpec::BollingerBands(BollingerParams::default()),
        IndicatorSpec::Atr(AtrParams::default()),
    ]
}

/// Ordered list of indicators to compute over a candle frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    #[serde(default = "default_indicators")]
    pub indicators: Vec<IndicatorSpec>,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            indicators: default_indicators(),
        }
    }
}

impl IndicatorConfig {
    /// Load the configuration from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read indicator config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse indicator config from {}", path.display()))?;

        info!(
            path = %path.display(),
            indicators = config.indicators.len(),
            "indicator config loaded"
        );

        Ok(config)
    }

    /// Persist the configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise indicator config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "indicator config saved (atomic)");
        Ok(())
    }

    /// Read `.env`, then load the file named by [`CONFIG_PATH_ENV`].
    ///
    /// Falls back to the default pipeline when the variable is unset or the
    /// file cannot be loaded.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        Self::load_or_default(std::env::var(CONFIG_PATH_ENV).ok().as_deref())
    }

    fn load_or_default(path: Option<&str>) -> Self {
        let Some(path) = path else {
            warn!("{CONFIG_PATH_ENV} not set, using default indicator config");
            return Self::default();
        };

        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path, error = %format!("{e:#}"), "using default indicator config");
                Self::default()
            }
        }
    }

    /// Run the configured pipeline on `frame`.
    pub fn apply(&self, frame: &CandleFrame) -> Result<CandleFrame> {
        apply_all(frame, &self.indicators)
    }
}
