// =============================================================================
// Element-wise series helpers
// =============================================================================
//
// Small building blocks shared by the indicators: lagging/leading shifts,
// first differences, typical price and true range.  All of them keep the
// input length and use NaN for positions that have no source value.

/// Shift a series by `periods` positions.
///
/// Positive `periods` lags the series (`out[i] = values[i - periods]`),
/// negative `periods` leads it (`out[i] = values[i + |periods|]`).  Positions
/// without a source become NaN.
pub fn shift(values: &[f64], periods: isize) -> Vec<f64> {
    let len = values.len();
    let mut out = vec![f64::NAN; len];
    let offset = periods.unsigned_abs();
    if offset >= len {
        return out;
    }

    if periods >= 0 {
        out[offset..].copy_from_slice(&values[..len - offset]);
    } else {
        out[..len - offset].copy_from_slice(&values[offset..]);
    }
    out
}

/// First difference: `out[i] = values[i] - values[i - 1]`, NaN at index 0.
pub fn diff(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() {
        return out;
    }
    out.push(f64::NAN);
    out.extend(values.windows(2).map(|w| w[1] - w[0]));
    out
}

/// `(high + low + close) / 3` per bar.
pub fn typical_price(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    high.iter()
        .zip(low)
        .zip(close)
        .map(|((h, l), c)| (h + l + c) / 3.0)
        .collect()
}

/// Element-wise midpoint of two series.
pub fn midpoint(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| (x + y) / 2.0).collect()
}

/// True range per bar:
///
///   TR = max(H - L, |H - prevClose|, |prevClose - L|)
///
/// The first bar has no previous close and uses `H - L` alone.  Components
/// that are NaN are ignored, matching `f64::max`.
pub fn true_range(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    let prev_close = shift(close, 1);
    high.iter()
        .zip(low)
        .zip(&prev_close)
        .map(|((&h, &l), &pc)| {
            let hl = h - l;
            let hc = (h - pc).abs();
            let lc = (pc - l).abs();
            hl.max(hc).max(lc)
        })
        .collect()
}
