// =============================================================================
// algotrader-indicators
// =============================================================================
//
// Technical indicators over OHLC(V) candle series for strategy research and
// backtesting.  A `CandleFrame` holds a timestamp index plus named `f64`
// columns; every indicator takes a frame by reference and returns a new frame
// with its derived columns appended.
//
//   market_data     Candle records and the columnar CandleFrame
//   stats           rolling-window and exponential-smoothing primitives
//   indicators      the indicator catalogue
//   runtime_config  JSON-described indicator pipelines
//   logging         tracing subscriber setup for drivers
//
// =============================================================================

pub mod indicators;
pub mod logging;
pub mod market_data;
pub mod runtime_config;
pub mod stats;

#[cfg(test)]
mod stubs;

pub use market_data::{Candle, CandleFrame};
pub use runtime_config::{apply_all, IndicatorConfig, IndicatorSpec};
