// =============================================================================
// Rolling Window Reductions
// =============================================================================
//
// Fixed-size trailing-window statistics over a series:
//
//   out[i] = op(values[i - window + 1 ..= i])
//
// `out[i]` is NaN until `window` observations are available, and whenever any
// member of the window is itself NaN.
//
// The window is a ring buffer of the last `window` values plus two monotonic
// deques (one per extreme) so that min/max and "bars since extreme" are O(1)
// amortised per step.  Sums are re-accumulated over the window so that a
// window of zeros sums to exactly zero.
// =============================================================================

use std::collections::VecDeque;

/// Reduction applied to each trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollingOp {
    Mean,
    /// Population standard deviation (denominator = window).
    Std,
    Min,
    Max,
    Sum,
    /// Observations since the window maximum; the newest observation scores 0
    /// and ties resolve to the oldest maximum.
    BarsSinceMax,
    /// Observations since the window minimum, same convention as `BarsSinceMax`.
    BarsSinceMin,
}

/// Apply `op` over a trailing window of `window` observations.
///
/// A `window` of zero yields an all-NaN series; indicators reject it before
/// getting here.
pub fn rolling_reduce(values: &[f64], window: usize, op: RollingOp) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if window == 0 {
        return out;
    }

    let mut ring = RollingWindow::new(window);
    for (slot, &value) in out.iter_mut().zip(values) {
        ring.push(value);
        if let Some(reduced) = ring.reduce(op) {
            *slot = reduced;
        }
    }
    out
}

/// Rolling arithmetic mean.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    rolling_reduce(values, window, RollingOp::Mean)
}

/// Rolling population standard deviation.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    rolling_reduce(values, window, RollingOp::Std)
}

pub fn rolling_min(values: &[f64], window: usize) -> Vec<f64> {
    rolling_reduce(values, window, RollingOp::Min)
}

pub fn rolling_max(values: &[f64], window: usize) -> Vec<f64> {
    rolling_reduce(values, window, RollingOp::Max)
}

pub fn rolling_sum(values: &[f64], window: usize) -> Vec<f64> {
    rolling_reduce(values, window, RollingOp::Sum)
}

// =============================================================================
// Internal window state
// =============================================================================

struct RollingWindow {
    capacity: usize,
    values: VecDeque<f64>,
    /// NaN members currently inside the window.
    missing: usize,
    /// Total values pushed; positions below are absolute push counts.
    pushed: usize,
    /// (position, value), values non-increasing front to back.
    maxima: VecDeque<(usize, f64)>,
    /// (position, value), values non-decreasing front to back.
    minima: VecDeque<(usize, f64)>,
}

impl RollingWindow {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            values: VecDeque::with_capacity(capacity),
            missing: 0,
            pushed: 0,
            maxima: VecDeque::with_capacity(capacity),
            minima: VecDeque::with_capacity(capacity),
        }
    }

    fn push(&mut self, value: f64) {
        if self.values.len() == self.capacity {
            if let Some(evicted) = self.values.pop_front() {
                if evicted.is_nan() {
                    self.missing -= 1;
                }
            }
        }

        let position = self.pushed;
        self.pushed += 1;
        self.values.push_back(value);

        if value.is_nan() {
            self.missing += 1;
        } else {
            // Strict comparisons keep the oldest of equal extremes at the front.
            while matches!(self.maxima.back(), Some(&(_, v)) if v < value) {
                self.maxima.pop_back();
            }
            self.maxima.push_back((position, value));

            while matches!(self.minima.back(), Some(&(_, v)) if v > value) {
                self.minima.pop_back();
            }
            self.minima.push_back((position, value));
        }

        let capacity = self.capacity;
        let expired = |&(pos, _): &(usize, f64)| pos + capacity <= position;
        while self.maxima.front().is_some_and(expired) {
            self.maxima.pop_front();
        }
        while self.minima.front().is_some_and(expired) {
            self.minima.pop_front();
        }
    }

    fn is_ready(&self) -> bool {
        self.values.len() == self.capacity && self.missing == 0
    }

    fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    fn max(&self) -> Option<(usize, f64)> {
        self.maxima.front().copied()
    }

    fn min(&self) -> Option<(usize, f64)> {
        self.minima.front().copied()
    }

    fn newest_position(&self) -> usize {
        self.pushed - 1
    }

    fn reduce(&self, op: RollingOp) -> Option<f64> {
        if !self.is_ready() {
            return None;
        }

        let n = self.capacity as f64;
        let value = match op {
            RollingOp::Mean => self.sum() / n,
            RollingOp::Sum => self.sum(),
            RollingOp::Min => self.min()?.1,
            RollingOp::Max => self.max()?.1,
            RollingOp::Std => {
                let (_, lo) = self.min()?;
                let (_, hi) = self.max()?;
                if lo == hi {
                    0.0
                } else {
                    let mean = self.sum() / n;
                    let variance =
                        self.values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
                    variance.sqrt()
                }
            }
            RollingOp::BarsSinceMax => (self.newest_position() - self.max()?.0) as f64,
            RollingOp::BarsSinceMin => (self.newest_position() - self.min()?.0) as f64,
        };
        Some(value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn assert_series(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            if e.is_nan() {
                assert!(a.is_nan(), "index {i}: expected NaN, got {a}");
            } else {
                assert!((a - e).abs() < 1e-12, "index {i}: expected {e}, got {a}");
            }
        }
    }

    const NAN: f64 = f64::NAN;

    #[test]
    fn zero_window_is_all_nan() {
        let out = rolling_mean(&[1.0, 2.0, 3.0], 0);
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn empty_input() {
        assert!(rolling_sum(&[], 3).is_empty());
    }

    #[test]
    fn mean_and_sum() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_series(&rolling_mean(&xs, 3), &[NAN, NAN, 2.0, 3.0, 4.0]);
        assert_series(&rolling_sum(&xs, 2), &[NAN, 3.0, 5.0, 7.0, 9.0]);
    }

    #[test]
    fn zeros_after_large_values_sum_to_exactly_zero() {
        let xs = [1e17, 0.1, 0.2, 0.0, 0.0, 0.0];
        let sums = rolling_sum(&xs, 3);
        assert_eq!(sums[5], 0.0);
        assert_eq!(rolling_mean(&xs, 3)[5], 0.0);
    }

    #[test]
    fn window_of_one_is_identity() {
        let xs = [3.0, -1.0, 4.0];
        assert_series(&rolling_max(&xs, 1), &xs);
        assert_series(&rolling_std(&xs, 1), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn min_max_follow_the_window() {
        let xs = [5.0, 1.0, 3.0, 2.0, 4.0, 0.5];
        assert_series(&rolling_max(&xs, 3), &[NAN, NAN, 5.0, 3.0, 4.0, 4.0]);
        assert_series(&rolling_min(&xs, 3), &[NAN, NAN, 1.0, 1.0, 2.0, 0.5]);
    }

    #[test]
    fn std_is_population() {
        // Population std of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 2.
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let out = rolling_std(&xs, 8);
        assert!((out[7] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn std_of_identical_values_is_exactly_zero() {
        let xs = vec![0.1; 30];
        let out = rolling_std(&xs, 20);
        for v in &out[19..] {
            assert_eq!(*v, 0.0);
        }
    }

    #[test]
    fn missing_value_poisons_every_window_it_touches() {
        let xs = [1.0, 2.0, NAN, 4.0, 5.0, 6.0];
        assert_series(&rolling_sum(&xs, 2), &[NAN, 3.0, NAN, NAN, 9.0, 11.0]);
        assert_series(&rolling_max(&xs, 2), &[NAN, 2.0, NAN, NAN, 5.0, 6.0]);
    }

    #[test]
    fn bars_since_extreme() {
        let xs = [1.0, 5.0, 2.0, 3.0, 6.0, 1.0];
        let since_max = rolling_reduce(&xs, 3, RollingOp::BarsSinceMax);
        // windows: [1,5,2] -> 5 is 1 bar ago; [5,2,3] -> 2; [2,3,6] -> 0; [3,6,1] -> 1
        assert_series(&since_max, &[NAN, NAN, 1.0, 2.0, 0.0, 1.0]);

        let since_min = rolling_reduce(&xs, 3, RollingOp::BarsSinceMin);
        // [1,5,2] -> 2; [5,2,3] -> 1; [2,3,6] -> 2; [3,6,1] -> 0
        assert_series(&since_min, &[NAN, NAN, 2.0, 1.0, 2.0, 0.0]);
    }

    #[test]
    fn bars_since_max_ties_resolve_to_oldest() {
        let xs = [7.0, 7.0, 7.0];
        let out = rolling_reduce(&xs, 3, RollingOp::BarsSinceMax);
        assert_eq!(out[2], 2.0);
    }

    #[test]
    fn matches_brute_force_on_noisy_series() {
        let xs: Vec<f64> = (0..200)
            .map(|i| ((i * 37) % 101) as f64 * 0.5 - 20.0)
            .collect();
        let w = 7;
        let max = rolling_max(&xs, w);
        let min = rolling_min(&xs, w);
        let mean = rolling_mean(&xs, w);
        for i in (w - 1)..xs.len() {
            let win = &xs[i + 1 - w..=i];
            let bmax = win.iter().cloned().fold(f64::MIN, f64::max);
            let bmin = win.iter().cloned().fold(f64::MAX, f64::min);
            let bmean = win.iter().sum::<f64>() / w as f64;
            assert_eq!(max[i], bmax);
            assert_eq!(min[i], bmin);
            assert!((mean[i] - bmean).abs() < 1e-9);
        }
    }
}
