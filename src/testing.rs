//! Testing utilities for boost-steps.
//!
//! Assertion helpers plus a slow reference fitter used to cross-check the
//! prefix-sum search in unit tests, integration tests and benchmarks.
//!
//! ```ignore
//! use boost_steps::testing::{reference_fit, DEFAULT_TOLERANCE};
//! ```

// =============================================================================
// Constants
// =============================================================================

/// Default tolerance for floating point comparisons of O(1) values.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

// =============================================================================
// Floating Point Assertions
// =============================================================================

/// Assert that two f64 values are approximately equal.
///
/// Uses absolute difference comparison with the given tolerance.
///
/// # Examples
///
/// ```
/// # use boost_steps::assert_approx_eq;
/// assert_approx_eq!(1.0f64, 1.0001f64, 0.001);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let diff = (left_val - right_val).abs();
        if diff > tol {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                left_val, right_val, diff, tol
            );
        }
    }};
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let diff = (left_val - right_val).abs();
        if diff > tol {
            panic!(
                "assertion failed: `(left ≈ right)` - {}\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                format_args!($($arg)+), left_val, right_val, diff, tol
            );
        }
    }};
}

/// Assert that two slices are approximately equal element-wise.
///
/// # Panics
///
/// Panics if lengths differ or any element differs by more than tolerance.
pub fn assert_slice_approx_eq(actual: &[f64], expected: &[f64], tolerance: f64, context: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{context}: length mismatch - got {}, expected {}",
        actual.len(),
        expected.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        assert!(
            diff <= tolerance,
            "{context}[{i}]: {a} ≠ {e} (diff={diff}, tolerance={tolerance})"
        );
    }
}

// =============================================================================
// Reference fitter
// =============================================================================

/// Output of [`reference_fit`], in sorted-x order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceFit {
    pub xs: Vec<f64>,
    pub predictions: Vec<f64>,
    pub original_indices: Vec<usize>,
    pub mse: f64,
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn mse(ys: &[f64], preds: &[f64]) -> f64 {
    ys.iter().zip(preds).map(|(y, p)| (y - p) * (y - p)).sum::<f64>() / ys.len() as f64
}

/// Slice-copying O(n³) fitter with the same candidate order and boundary
/// policy as [`TwoLevelFitter`](crate::training::TwoLevelFitter).
///
/// Every candidate materializes its leaves and predictions and is scored
/// by a full pass, so it shares no code with the prefix-sum search.
///
/// # Panics
///
/// Panics on empty input or mismatched lengths.
pub fn reference_fit(xs: &[f64], ys: &[f64]) -> ReferenceFit {
    assert!(!xs.is_empty(), "reference_fit needs at least one sample");
    assert_eq!(xs.len(), ys.len());

    let mut order: Vec<usize> = (0..xs.len()).collect();
    order.sort_by(|&a, &b| xs[a].total_cmp(&xs[b]));
    let sx: Vec<f64> = order.iter().map(|&i| xs[i]).collect();
    let sy: Vec<f64> = order.iter().map(|&i| ys[i]).collect();
    let n = sy.len();

    let best = match n {
        1 | 2 => sy.clone(),
        _ => {
            let mut best_mse = f64::INFINITY;
            let mut best_preds = vec![mean(&sy); n];
            for i in 1..n {
                let (left, right) = sy.split_at(i);
                let left_mean = mean(left);
                let right_mean = mean(right);

                for j in 1..left.len() {
                    let (l1, l2) = left.split_at(j);
                    let (m1, m2) = (mean(l1), mean(l2));
                    let preds: Vec<f64> = (0..n)
                        .map(|k| if k < j { m1 } else if k < i { m2 } else { right_mean })
                        .collect();
                    let e = mse(&sy, &preds);
                    if e < best_mse {
                        best_mse = e;
                        best_preds = preds;
                    }
                }

                for j in 1..right.len() {
                    let (r1, r2) = right.split_at(j);
                    let (m1, m2) = (mean(r1), mean(r2));
                    let preds: Vec<f64> = (0..n)
                        .map(|k| if k < i { left_mean } else if k < i + j { m1 } else { m2 })
                        .collect();
                    let e = mse(&sy, &preds);
                    if e < best_mse {
                        best_mse = e;
                        best_preds = preds;
                    }
                }
            }
            best_preds
        }
    };

    ReferenceFit {
        mse: mse(&sy, &best),
        xs: sx,
        predictions: best,
        original_indices: order,
    }
}

/// Minimum MSE over every pair of cuts `0 < a < b < n`, enumerated directly.
///
/// Independent of candidate order; used to check optimality only.
pub fn brute_force_min_mse(sorted_ys: &[f64]) -> f64 {
    let n = sorted_ys.len();
    let mut best = f64::INFINITY;
    for a in 1..n {
        for b in a + 1..n {
            let preds: Vec<f64> = [0..a, a..b, b..n]
                .into_iter()
                .flat_map(|r| {
                    let m = mean(&sorted_ys[r.clone()]);
                    std::iter::repeat(m).take(r.len())
                })
                .collect();
            best = best.min(mse(sorted_ys, &preds));
        }
    }
    best
}
