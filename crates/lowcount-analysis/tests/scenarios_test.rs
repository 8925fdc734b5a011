//! End-to-end scenarios across the public surface.

use lowcount_analysis::{
    posterior, rate_credible_interval, significance, uncertainties_fraction, uncertainties_rate,
    uncertainties_rate_with, BackgroundSpec, ConfidenceLevel, DomainError, MemoizedQuantiles,
    PosteriorOptions, RateDistribution, SignalBoundary, SignificanceOptions,
};
use lowcount_core::config::LowcountConfig;

fn cl(p: f64) -> ConfidenceLevel {
    ConfidenceLevel::new(p).unwrap()
}

// ---------------------------------------------------------------------------
// Intervals
// ---------------------------------------------------------------------------

#[test]
fn zero_events_one_sigma_upper_limit() {
    let iv = uncertainties_rate(0, 1.0, cl(0.6827)).unwrap();
    assert_eq!(iv.lower, 0.0);
    assert!((iv.upper - 1.841).abs() < 1e-3, "upper = {}", iv.upper);
}

#[test]
fn five_of_twenty_fraction() {
    let iv = uncertainties_fraction(5, 20, cl(0.6827)).unwrap();
    assert!(iv.lower > 0.0 && iv.upper < 1.0);
    assert!(iv.contains(0.25));
    assert!((iv.estimate - 0.25).abs() < 1e-12);
}

#[test]
fn credible_interval_brackets_frequentist_estimate() {
    let freq = uncertainties_rate(4, 1.0, ConfidenceLevel::one_sigma()).unwrap();
    let bayes = rate_credible_interval(4, 1.0, ConfidenceLevel::one_sigma()).unwrap();
    assert!(bayes.contains(freq.estimate));
    // The Garwood interval is conservative: it encloses the flat-prior one on
    // the low side.
    assert!(freq.lower <= bayes.lower);
}

#[test]
fn memoized_source_reuses_quantiles() {
    let memo = MemoizedQuantiles::new();
    for _ in 0..3 {
        let iv = uncertainties_rate_with(&memo, 9, 2.0, cl(0.95)).unwrap();
        assert!(iv.contains(4.5));
    }
    assert_eq!(memo.cached_count(), 2);
}

// ---------------------------------------------------------------------------
// Significance
// ---------------------------------------------------------------------------

#[test]
fn clear_excess_over_known_background() {
    let s = significance(10, &BackgroundSpec::known(2.0), &SignificanceOptions::default()).unwrap();
    assert!(s > 3.0, "s = {s}");
}

#[test]
fn on_equals_off_has_no_significance() {
    let s = significance(
        5,
        &BackgroundSpec::off_region(5, 1.0),
        &SignificanceOptions::default(),
    )
    .unwrap();
    assert_eq!(s, 0.0);
}

#[test]
fn observed_equals_expected_has_no_significance() {
    let s = significance(5, &BackgroundSpec::known(5.0), &SignificanceOptions::default()).unwrap();
    assert_eq!(s, 0.0);
}

#[test]
fn off_region_agrees_with_known_for_large_off_counts() {
    // α·k_off fixed at 4 with a huge off region: background is effectively known.
    let known =
        significance(15, &BackgroundSpec::known(4.0), &SignificanceOptions::default()).unwrap();
    let off = significance(
        15,
        &BackgroundSpec::off_region(400_000, 1e-5),
        &SignificanceOptions::default(),
    )
    .unwrap();
    assert!((known - off).abs() < 0.4, "known {known} vs off {off}");
}

#[test]
fn invalid_inputs_fail_before_computing() {
    assert!(matches!(
        ConfidenceLevel::new(1.0),
        Err(DomainError::InvalidConfidence { .. })
    ));
    assert!(matches!(
        uncertainties_rate(3, -2.0, cl(0.9)),
        Err(DomainError::NonPositiveExposure { .. })
    ));
    assert!(matches!(
        uncertainties_fraction(6, 5, cl(0.9)),
        Err(DomainError::CountExceedsTrials { .. })
    ));
    assert!(matches!(
        significance(3, &BackgroundSpec::known(1.0), &SignificanceOptions::with_systematic(-1.0)),
        Err(DomainError::NegativeSystematic { .. })
    ));
}

// ---------------------------------------------------------------------------
// Posterior
// ---------------------------------------------------------------------------

#[test]
fn posterior_upper_limit_with_known_background() {
    let opts = PosteriorOptions {
        boundary: SignalBoundary::Renormalize,
        ..Default::default()
    };
    let post = posterior(3, &BackgroundSpec::known(3.0), &opts).unwrap();
    let limit = post.quantile(0.9).unwrap();
    assert!(limit > 0.0);
    assert!((post.cdf(limit) - 0.9).abs() < 1e-9);

    // A background-free posterior with the same count sits higher.
    let free = posterior(3, &BackgroundSpec::known(0.0), &opts).unwrap();
    assert!(free.quantile(0.9).unwrap() > limit);
}

#[test]
fn off_region_posterior_between_extremes() {
    let opts = PosteriorOptions::default();
    let none = posterior(12, &BackgroundSpec::known(0.0), &opts).unwrap();
    let measured = posterior(12, &BackgroundSpec::off_region(20, 0.25), &opts).unwrap();
    assert!(measured.mean() < none.mean());
    assert!(measured.mean() > 0.0);
}

// ---------------------------------------------------------------------------
// Configuration drives the operations
// ---------------------------------------------------------------------------

#[test]
fn config_sections_feed_operations() {
    lowcount_core::tracing::init_tracing();
    lowcount_core::tracing::init_tracing();

    let config = LowcountConfig::from_toml(
        r#"
[intervals]
sigma = 2.0
sidedness = "one_sided"

[significance]
systematic = 0.3

[posterior]
exposure = 5.0
boundary = "renormalize"
"#,
    )
    .unwrap();

    let level = config.intervals.confidence_level().unwrap();
    let iv = uncertainties_rate(0, 1.0, level).unwrap();
    assert_eq!(iv.lower, 0.0);
    // One-sided 2σ upper limit on zero counts: -ln(1 - 0.97725).
    assert!((iv.upper - 3.783).abs() < 1e-3, "upper = {}", iv.upper);

    let bg = BackgroundSpec::known(2.0);
    let with_sys = significance(10, &bg, &config.significance.options()).unwrap();
    let without = significance(10, &bg, &SignificanceOptions::default()).unwrap();
    assert!(with_sys < without);

    let post = posterior(10, &bg, &config.posterior.options()).unwrap();
    assert_eq!(post.zero_mass(), 0.0);
    assert!((post.mean() - 1.8).abs() < 1e-3, "mean = {}", post.mean());

    let memo = MemoizedQuantiles::from(&config.solver);
    let iv = uncertainties_rate_with(&memo, 3, 1.0, level).unwrap();
    assert_eq!(iv, uncertainties_rate(3, 1.0, level).unwrap());
}
