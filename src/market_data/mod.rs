pub mod candle;
pub mod frame;

// Re-exported for convenient access (e.g. `use crate::market_data::Candle`).
pub use candle::Candle;
pub use frame::{CandleFrame, MID_C, MID_H, MID_L, MID_O, VOLUME};
