// =============================================================================
// Exponentially Weighted Moving Mean
// =============================================================================
//
// Single-accumulator recursive smoothing:
//
//   v_t = alpha * x_t + (1 - alpha) * v_{t-1}
//
// Two seeding modes share the primitive:
//
//   Span(n)   alpha = 2 / (n + 1).  Seeded by the first defined input; the
//             output stays hidden until `min_periods` consecutive defined
//             inputs have been seen.  Used by EMA and MACD.
//   Alpha(a)  explicit alpha (Wilder uses 1 / n).  Seeded by the simple mean
//             of the first `min_periods` consecutive defined inputs, which is
//             also the first emitted value.  Used by RSI.
//
// A NaN input emits NaN and restarts the warm-up from the next defined value.
// =============================================================================

/// How the smoothing factor is chosen and how the accumulator is seeded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Smoothing {
    Span(usize),
    Alpha(f64),
}

impl Smoothing {
    /// Wilder's smoothing: `alpha = 1 / n`.
    pub fn wilder(n: usize) -> Self {
        Self::Alpha(1.0 / n as f64)
    }

    pub fn alpha(self) -> f64 {
        match self {
            Self::Span(span) => 2.0 / (span as f64 + 1.0),
            Self::Alpha(alpha) => alpha,
        }
    }

    /// Alpha must lie in `(0, 1]`; `Span(0)` and `Alpha(0.0)` are rejected.
    pub fn is_valid(self) -> bool {
        let alpha = self.alpha();
        alpha > 0.0 && alpha <= 1.0
    }
}

/// Exponentially weighted mean of `values`.
///
/// Invalid smoothing factors yield an all-NaN series.  A `min_periods` of zero
/// behaves like one.
pub fn ewm_mean(values: &[f64], smoothing: Smoothing, min_periods: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if !smoothing.is_valid() {
        return out;
    }

    let alpha = smoothing.alpha();
    let warmup = min_periods.max(1);

    let mut count = 0_usize;
    let mut seed_sum = 0.0_f64;
    let mut value = f64::NAN;

    for (slot, &x) in out.iter_mut().zip(values) {
        if x.is_nan() {
            count = 0;
            seed_sum = 0.0;
            value = f64::NAN;
            continue;
        }
        count += 1;

        match smoothing {
            Smoothing::Span(_) => {
                value = if count == 1 {
                    x
                } else {
                    alpha * x + (1.0 - alpha) * value
                };
                if count >= warmup {
                    *slot = value;
                }
            }
            Smoothing::Alpha(_) => {
                if count < warmup {
                    seed_sum += x;
                    continue;
                }
                value = if count == warmup {
                    (seed_sum + x) / warmup as f64
                } else {
                    alpha * x + (1.0 - alpha) * value
                };
                *slot = value;
            }
        }
    }

    out
}
