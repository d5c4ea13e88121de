//! Criterion benchmarks for the local search.
//!
//! Uses random Euclidean instances so the numbers reflect the sweep and
//! lookahead cost rather than any particular dataset.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_tsp::rules::{AnnealingConfig, GreedyRule, RuleConfig};
use u_tsp::search::{two_opt_moves, LocalSearch};
use u_tsp::trials::{TrialConfig, TrialRunner};

fn euclidean_instance(n: usize, seed: u64) -> (Vec<String>, Vec<Vec<f64>>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)))
        .collect();
    let labels = (0..n).map(|i| format!("p{i}")).collect();
    let matrix = points
        .iter()
        .map(|a| {
            points
                .iter()
                .map(|b| ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt())
                .collect()
        })
        .collect();
    (labels, matrix)
}

fn bench_neighborhood(c: &mut Criterion) {
    let mut group = c.benchmark_group("two_opt_moves");

    for &n in &[16usize, 64, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(two_opt_moves(black_box(n)).count()))
        });
    }
    group.finish();
}

fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_fixed_point");
    group.sample_size(10);

    for &n in &[10usize, 20, 40] {
        let (labels, matrix) = euclidean_instance(n, 42);
        let search = LocalSearch::create(&labels, &matrix, || GreedyRule, Some(42)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &search, |b, s| {
            b.iter(|| {
                let mut trial = s.reinitialized_with_seed(7);
                black_box(trial.run_to_fixed_point())
            })
        });
    }
    group.finish();
}

fn bench_annealing_trials(c: &mut Criterion) {
    let mut group = c.benchmark_group("annealing_trials");
    group.sample_size(10);

    for &n in &[10usize, 20] {
        let (labels, matrix) = euclidean_instance(n, 42);
        let factory = RuleConfig::Annealing(AnnealingConfig::default())
            .factory()
            .unwrap();
        let search = LocalSearch::create(&labels, &matrix, factory, Some(42)).unwrap();
        let config = TrialConfig::default().with_num_trials(4).with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(search, config),
            |b, (s, c)| {
                b.iter(|| {
                    let result = TrialRunner::run(black_box(s), black_box(c)).unwrap();
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_neighborhood, bench_greedy, bench_annealing_trials);
criterion_main!(benches);
