//! Interval, significance, and posterior benchmarks.
//!
//! Run with: cargo bench -p lowcount-analysis --bench uncertainty_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use lowcount_analysis::{
    posterior, significance, uncertainties_fraction, uncertainties_rate,
    uncertainties_rate_with, BackgroundSpec, ConfidenceLevel, MemoizedQuantiles,
    PosteriorOptions, RateDistribution, SignificanceOptions,
};

fn bench_rate_interval(c: &mut Criterion) {
    let level = ConfidenceLevel::one_sigma();
    let mut group = c.benchmark_group("uncertainties_rate");
    for k in [0u64, 10, 1_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| uncertainties_rate(black_box(k), 1.0, level));
        });
    }
    group.finish();
}

fn bench_memoized_rate_interval(c: &mut Criterion) {
    let level = ConfidenceLevel::one_sigma();
    let memo = MemoizedQuantiles::new();
    c.bench_function("uncertainties_rate_memoized_0_to_100", |b| {
        b.iter(|| {
            for k in 0..100u64 {
                let _ = uncertainties_rate_with(&memo, black_box(k), 1.0, level);
            }
        });
    });
}

fn bench_fraction_interval(c: &mut Criterion) {
    let level = ConfidenceLevel::two_sigma();
    c.bench_function("uncertainties_fraction_37_of_500", |b| {
        b.iter(|| uncertainties_fraction(black_box(37), black_box(500), level));
    });
}

fn bench_significance(c: &mut Criterion) {
    let known = BackgroundSpec::known(3.2);
    let off = BackgroundSpec::off_region(140, 0.05);
    let sys = SignificanceOptions::with_systematic(0.1);

    c.bench_function("significance_known_background", |b| {
        b.iter(|| significance(black_box(15), &known, &SignificanceOptions::default()));
    });
    c.bench_function("significance_off_region_systematic", |b| {
        b.iter(|| significance(black_box(15), &off, &sys));
    });
}

fn bench_posterior_quantile(c: &mut Criterion) {
    let opts = PosteriorOptions::default();
    let mut group = c.benchmark_group("posterior_quantile_90");
    for (name, background) in [
        ("known", BackgroundSpec::known(4.0)),
        ("off_region", BackgroundSpec::off_region(80, 0.05)),
    ] {
        let post = posterior(12, &background, &opts).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| post.quantile(black_box(0.9)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_rate_interval,
    bench_memoized_rate_interval,
    bench_fraction_interval,
    bench_significance,
    bench_posterior_quantile
);
criterion_main!(benches);
