//! Fitter integration tests.
//!
//! Focused on the properties every fit must satisfy and on agreement with
//! the slow reference implementation.

use boost_steps::data::{Dataset, Sample};
use boost_steps::testing::{assert_slice_approx_eq, brute_force_min_mse, reference_fit, DEFAULT_TOLERANCE};
use boost_steps::training::{Partition, TwoLevelFitter};
use proptest::prelude::*;
use rstest::rstest;

use crate::common::grid;

fn fit(xs: &[f64], ys: &[f64]) -> boost_steps::FittedTree {
    TwoLevelFitter::new().fit(&Dataset::from_xy(xs, ys).unwrap())
}

#[test]
fn parabola_golden_matches_reference() {
    let xs = [0.0, 1.0, 2.0, 3.0];
    let ys = [0.0, 1.0, 4.0, 9.0];
    let tree = fit(&xs, &ys);
    let reference = reference_fit(&xs, &ys);

    assert_eq!(tree.step().predictions(), reference.predictions.as_slice());
    assert_eq!(tree.step().predictions(), &[0.5, 0.5, 4.0, 9.0]);
    boost_steps::assert_approx_eq!(tree.mse(), 0.125, DEFAULT_TOLERANCE);
}

#[rstest]
#[case::single(&[4.0], &[2.5], Partition::Single, &[2.5])]
#[case::pair(&[0.0, 1.0], &[1.0, 3.0], Partition::Two { cut: 1 }, &[1.0, 3.0])]
#[case::pair_reversed(&[1.0, 0.0], &[1.0, 3.0], Partition::Two { cut: 1 }, &[3.0, 1.0])]
#[case::triple(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0], Partition::Three { first: 1, second: 2 }, &[1.0, 2.0, 3.0])]
fn boundary_sizes(
    #[case] xs: &[f64],
    #[case] ys: &[f64],
    #[case] partition: Partition,
    #[case] sorted_predictions: &[f64],
) {
    let tree = fit(xs, ys);
    assert_eq!(tree.partition(), partition);
    assert_eq!(tree.step().predictions(), sorted_predictions);
    assert_eq!(tree.mse(), 0.0);
}

#[rstest]
#[case(5.0)]
#[case(-3.0)]
#[case(0.0)]
fn constant_targets_have_zero_error(#[case] value: f64) {
    let xs = grid(8);
    let ys = vec![value; 8];
    let tree = fit(&xs, &ys);

    assert_eq!(tree.mse(), 0.0);
    assert!(tree.step().predictions().iter().all(|&p| p == value));
}

#[test]
fn symmetric_ties_resolve_to_first_candidate() {
    let xs = [0.0, 1.0, 2.0, 3.0];
    let ys = [0.0, 1.0, 2.0, 3.0];
    let tree = fit(&xs, &ys);
    let reference = reference_fit(&xs, &ys);

    assert_eq!(tree.partition(), Partition::Three { first: 1, second: 2 });
    assert_eq!(tree.step().predictions(), reference.predictions.as_slice());
}

#[test]
fn exact_tie_picks_first_scanned_partition() {
    let xs = grid(5);
    let ys = [0.0, 0.5, 0.0, 0.4, 0.5];
    let tree = fit(&xs, &ys);
    let reference = reference_fit(&xs, &ys);

    assert_eq!(tree.partition(), Partition::Three { first: 1, second: 3 });
    assert_eq!(tree.step().predictions(), reference.predictions.as_slice());
}

#[test]
fn repeated_x_values_keep_input_order() {
    let samples = vec![
        Sample::new(2.0, 1.0, 0),
        Sample::new(1.0, 5.0, 1),
        Sample::new(2.0, 9.0, 2),
        Sample::new(1.0, 4.0, 3),
    ];
    let tree = TwoLevelFitter::new().fit(&Dataset::new(samples).unwrap());
    assert_eq!(tree.step().original_indices(), &[1, 3, 0, 2]);
    assert_eq!(tree.step().xs(), &[1.0, 1.0, 2.0, 2.0]);
}

fn arb_xy(max_len: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1..=max_len).prop_flat_map(|n| {
        (
            prop::collection::vec(-10.0f64..10.0, n),
            prop::collection::vec(-50.0f64..50.0, n),
        )
    })
}

/// Targets drawn from `{0.0, 0.1, ..., 0.5}` or small integers.
fn arb_grid_targets(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop_oneof![
        prop::collection::vec((0u8..=5).prop_map(|k| f64::from(k) / 10.0), 3..=max_len),
        prop::collection::vec((-2i8..=2).prop_map(f64::from), 3..=max_len),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Lengths, order, permutation and piecewise-constant structure.
    #[test]
    fn structural_invariants((xs, ys) in arb_xy(14)) {
        let tree = fit(&xs, &ys);
        let step = tree.step();
        let n = xs.len();

        prop_assert_eq!(step.len(), n);
        prop_assert_eq!(step.predictions().len(), n);
        prop_assert_eq!(step.original_indices().len(), n);
        prop_assert!(step.xs().windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(step.change_points() <= 2);

        let mut idx = step.original_indices().to_vec();
        idx.sort_unstable();
        prop_assert_eq!(idx, (0..n).collect::<Vec<_>>());
    }

    /// The search reaches the global minimum over all two-cut partitions.
    #[test]
    fn optimal_against_brute_force((xs, ys) in arb_xy(10)) {
        prop_assume!(xs.len() >= 3);
        let tree = fit(&xs, &ys);
        let reference = reference_fit(&xs, &ys);
        let sorted_ys: Vec<f64> = reference.original_indices.iter().map(|&i| ys[i]).collect();

        let best = brute_force_min_mse(&sorted_ys);
        prop_assert!((tree.mse() - best).abs() <= 1e-9 * (1.0 + best));
    }

    /// Same order, leaves and error as the slice-copying reference.
    #[test]
    fn matches_reference((xs, ys) in arb_xy(12)) {
        let tree = fit(&xs, &ys);
        let reference = reference_fit(&xs, &ys);

        prop_assert_eq!(tree.step().original_indices(), reference.original_indices.as_slice());
        prop_assert_eq!(tree.step().xs(), reference.xs.as_slice());
        prop_assert_eq!(tree.step().predictions(), reference.predictions.as_slice());
        prop_assert_eq!(tree.mse(), reference.mse);
    }

    /// Targets on a coarse grid produce many exactly tied partitions; the
    /// first one scanned must win, as in the reference.
    #[test]
    fn grid_targets_break_ties_like_reference(ys in arb_grid_targets(10)) {
        let xs = grid(ys.len());
        let tree = fit(&xs, &ys);
        let reference = reference_fit(&xs, &ys);

        prop_assert_eq!(tree.step().predictions(), reference.predictions.as_slice());
        prop_assert_eq!(tree.mse(), reference.mse);
    }

    /// Two calls on the same data are bit-identical.
    #[test]
    fn deterministic((xs, ys) in arb_xy(12)) {
        let ds = Dataset::from_xy(&xs, &ys).unwrap();
        let fitter = TwoLevelFitter::new();
        prop_assert_eq!(fitter.fit(&ds), fitter.fit(&ds));
    }
}

#[test]
fn unique_optimum_predictions_match_reference() {
    // Each case has a single best partition by a wide margin, so both
    // searches must land on the same leaves.
    let cases: [&[f64]; 4] = [
        &[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0],
        &[1.0, 1.0, 2.0, 2.0, 1.0, 1.0],
        &[0.0, 0.0, 0.0, 10.0, 10.0, 10.0, 3.0, 3.0],
        &[-5.0, -4.0, 6.0, 7.0, 6.5, 20.0],
    ];
    for ys in cases {
        let xs = grid(ys.len());
        let tree = fit(&xs, ys);
        let reference = reference_fit(&xs, ys);
        assert_slice_approx_eq(tree.step().predictions(), &reference.predictions, 1e-12, "predictions");
    }
}
