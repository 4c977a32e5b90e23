//! Candle frame builders shared by the unit tests.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::market_data::{Candle, CandleFrame, MID_H, MID_L};

pub fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// `n` consecutive hourly timestamps starting at midnight.
pub fn hourly(n: usize) -> Vec<NaiveDateTime> {
    (0..n).map(|i| start() + Duration::hours(i as i64)).collect()
}

/// One candle per `(open, high, low, close, volume)` row, hourly spaced.
pub fn frame_ohlcv(rows: &[(f64, f64, f64, f64, f64)]) -> CandleFrame {
    let candles: Vec<Candle> = hourly(rows.len())
        .into_iter()
        .zip(rows)
        .map(|(t, &(o, h, l, c, v))| Candle::new(t, o, h, l, c).with_volume(v))
        .collect();
    CandleFrame::from_candles(&candles)
}

/// One candle per `(high, low, close)` row, open equal to close, no volume.
pub fn frame_hlc(rows: &[(f64, f64, f64)]) -> CandleFrame {
    let candles: Vec<Candle> = hourly(rows.len())
        .into_iter()
        .zip(rows)
        .map(|(t, &(h, l, c))| Candle::new(t, c, h, l, c))
        .collect();
    CandleFrame::from_candles(&candles)
}

/// Bare `mid_h`/`mid_l` frame with no close or volume columns.
pub fn frame_hl(rows: &[(f64, f64)]) -> CandleFrame {
    CandleFrame::new(hourly(rows.len()))
        .with_column(MID_H, rows.iter().map(|r| r.0).collect())
        .unwrap()
        .with_column(MID_L, rows.iter().map(|r| r.1).collect())
        .unwrap()
}

/// Candles whose high/low sit one unit above/below the close.
pub fn frame_closes(closes: &[f64]) -> CandleFrame {
    let rows: Vec<(f64, f64, f64)> = closes.iter().map(|&c| (c + 1.0, c - 1.0, c)).collect();
    frame_hlc(&rows)
}

/// Deterministic wavy price path with volume, long enough for every default
/// warm-up.
pub fn wavy(n: usize) -> CandleFrame {
    let rows: Vec<(f64, f64, f64, f64, f64)> = (0..n)
        .map(|i| {
            let x = i as f64;
            let mid = 100.0 + (x * 0.3).sin() * 5.0 + x * 0.05;
            let close = mid + (x * 0.7).cos();
            let open = mid - (x * 0.5).sin() * 0.5;
            let high = open.max(close) + 0.8 + (x * 0.11).sin().abs();
            let low = open.min(close) - 0.8 - (x * 0.13).cos().abs();
            let volume = 1_000.0 + ((i * 37) % 17) as f64 * 50.0;
            (open, high, low, close, volume)
        })
        .collect();
    frame_ohlcv(&rows)
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// Number of leading NaN values.
pub fn nan_prefix(values: &[f64]) -> usize {
    values.iter().take_while(|v| v.is_nan()).count()
}
