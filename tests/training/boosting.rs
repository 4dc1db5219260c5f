//! End-to-end boosting tests.

use approx::assert_abs_diff_eq;
use boost_steps::data::Dataset;
use boost_steps::model::{BoostConfig, BoostedModel};
use boost_steps::testing::{assert_slice_approx_eq, reference_fit};
use boost_steps::training::{BoostTrainer, Rmse, Verbosity};
use rstest::rstest;

use crate::common::default_data;

/// Independent boosting loop on plain slices using the reference fitter.
fn reference_boost(xs: &[f64], ys: &[f64], n_stages: usize) -> Vec<f64> {
    let base = ys.iter().sum::<f64>() / ys.len() as f64;
    let mut approx = vec![base; ys.len()];
    for _ in 0..n_stages {
        let residuals: Vec<f64> = ys.iter().zip(&approx).map(|(y, a)| y - a).collect();
        let fit = reference_fit(xs, &residuals);
        for (&i, &p) in fit.original_indices.iter().zip(&fit.predictions) {
            approx[i] += p;
        }
    }
    approx
}

#[test]
fn final_prediction_is_base_plus_scattered_stages() {
    let data = default_data();
    let model = BoostedModel::train(&data, BoostConfig::default()).unwrap();

    let mut expected = vec![model.base_score(); data.len()];
    for stage in model.stages() {
        stage.step().scatter_add(&mut expected);
    }
    assert_slice_approx_eq(model.predictions(), &expected, 1e-9, "predictions");
}

#[test]
fn agrees_with_reference_boosting_loop() {
    let data = default_data();
    let model = BoostedModel::train(&data, BoostConfig::default()).unwrap();
    let expected = reference_boost(&data.xs(), &data.ys(), 4);

    assert_slice_approx_eq(model.predictions(), &expected, 1e-9, "boosted predictions");
}

#[rstest]
#[case(1)]
#[case(4)]
#[case(10)]
fn training_error_never_increases(#[case] n_stages: u32) {
    let config = BoostConfig::builder().n_stages(n_stages).build().unwrap();
    let model = BoostedModel::train(&default_data(), config).unwrap();

    assert_eq!(model.n_stages(), n_stages as usize);
    let metrics = model.stage_metrics();
    for w in metrics.windows(2) {
        assert!(w[1] <= w[0] + 1e-12, "metric rose: {} -> {}", w[0], w[1]);
    }
}

#[test]
fn stage_targets_are_previous_residuals() {
    let data = default_data();
    let model = BoostedModel::train(&data, BoostConfig::default()).unwrap();

    for (k, stage) in model.stages().iter().enumerate() {
        let residuals = model.residuals(k).unwrap();
        assert_slice_approx_eq(stage.targets(), &residuals, 1e-12, "stage targets");
    }

    let first = &model.stages()[0];
    let sum: f64 = first.targets().iter().sum();
    assert_abs_diff_eq!(sum, 0.0, epsilon = 1e-9);
}

#[test]
fn cumulative_step_matches_approximation() {
    let data = default_data();
    let model = BoostedModel::train(&data, BoostConfig::default()).unwrap();

    for k in 1..=model.n_stages() {
        let cumulative = model.cumulative_step(k).unwrap().offset(model.base_score());
        let scattered = cumulative.scatter();
        assert_slice_approx_eq(&scattered, model.approximation(k).unwrap(), 1e-9, "cumulative");
    }
    assert!(model.cumulative_step(0).is_err());
}

#[test]
fn predict_at_sample_x_matches_training_prediction() {
    // Evenly spaced x values are distinct, so every sample sits on its own step.
    let data = default_data();
    let model = BoostedModel::train(&data, BoostConfig::default()).unwrap();

    for (x, p) in data.xs().iter().zip(model.predictions()) {
        assert_abs_diff_eq!(model.predict(*x), *p, epsilon = 1e-9);
    }
}

#[test]
fn single_sample_converges_immediately() {
    let data = Dataset::from_xy(&[1.0], &[7.0]).unwrap();
    let model = BoostedModel::train(&data, BoostConfig::default()).unwrap();

    assert_eq!(model.predictions(), &[7.0]);
    assert!(model.stage_metrics().iter().all(|&m| m == 0.0));
}

#[test]
fn custom_metric_and_verbose_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("boost_steps=debug")
        .with_test_writer()
        .try_init();

    let config = BoostConfig::builder()
        .n_stages(3)
        .verbosity(Verbosity::Debug)
        .build()
        .unwrap();
    let trainer = BoostTrainer::with_metric(config, Rmse);
    let data = default_data();
    let model = trainer.train(&data).unwrap();

    let last = *model.stage_metrics().last().unwrap();
    let mse = model
        .targets()
        .iter()
        .zip(model.predictions())
        .map(|(y, p)| (y - p) * (y - p))
        .sum::<f64>()
        / data.len() as f64;
    assert_abs_diff_eq!(last, mse.sqrt(), epsilon = 1e-12);
}

#[test]
fn model_serializes_round_trip() {
    let model = BoostedModel::train(&default_data(), BoostConfig::default()).unwrap();
    let json = serde_json::to_string(&model).unwrap();
    let back: BoostedModel = serde_json::from_str(&json).unwrap();
    assert_eq!(back.n_stages(), model.n_stages());
    assert_slice_approx_eq(back.predictions(), model.predictions(), 1e-12, "deserialized");
}
