//! Fitter and boosting benchmarks.
//!
//! - Prefix-sum search vs the slice-copying reference fitter
//! - Sample count scaling of a full boosting run

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;

use boost_steps::data::Dataset;
use boost_steps::model::{BoostConfig, BoostedModel};
use boost_steps::testing::reference_fit;
use boost_steps::training::TwoLevelFitter;

// =============================================================================
// Data Generation
// =============================================================================

/// Noisy parabola on `[-2, 2]` with shuffled sample order.
fn generate(n: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut xs: Vec<f64> = (0..n)
        .map(|i| -2.0 + 4.0 * i as f64 / (n.max(2) - 1) as f64)
        .collect();
    xs.shuffle(&mut rng);
    let ys = xs
        .iter()
        .map(|x| x * x + (rng.r#gen::<f64>() - 0.5) * 1.5)
        .collect();
    (xs, ys)
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit/two_level");
    let fitter = TwoLevelFitter::new();

    for n in [10, 100, 1_000] {
        let (xs, ys) = generate(n, 42);
        let ds = Dataset::from_xy(&xs, &ys).expect("finite data");
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("prefix_sums", n), &ds, |b, ds| {
            b.iter(|| black_box(fitter.fit(black_box(ds))))
        });

        // Cubic; keep it to the small sizes.
        if n <= 100 {
            group.bench_with_input(BenchmarkId::new("reference", n), &(&xs, &ys), |b, (xs, ys)| {
                b.iter(|| black_box(reference_fit(black_box(xs), black_box(ys))))
            });
        }
    }

    group.finish();
}

fn bench_boost(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit/boost");
    let config = BoostConfig::default();

    for n in [10, 100, 1_000] {
        let (xs, ys) = generate(n, 7);
        let ds = Dataset::from_xy(&xs, &ys).expect("finite data");
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("four_stages", n), &ds, |b, ds| {
            b.iter(|| black_box(BoostedModel::train(ds, config.clone()).expect("valid dataset")))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fit, bench_boost);
criterion_main!(benches);
