//! Benchmarks for the statistical core.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use uplift::{
    aggregate, analyze_bayesian, analyze_frequentist, Arm, ArmSummary, BetaPrior, Metric,
    SimulationConfig,
};

fn bench_aggregate(c: &mut Criterion) {
    let records = uplift::generate_cohort(&SimulationConfig {
        n_users: 100_000,
        ..Default::default()
    });
    c.bench_function("aggregate_100k_records", |b| {
        b.iter(|| aggregate(black_box(&records), Metric::Conversion).unwrap())
    });
}

fn bench_frequentist(c: &mut Criterion) {
    let control = ArmSummary::proportion(Arm::Control, Metric::Conversion, 100_000, 15_000);
    let treatment = ArmSummary::proportion(Arm::Treatment, Metric::Conversion, 100_000, 16_500);
    c.bench_function("frequentist_z_test", |b| {
        b.iter(|| analyze_frequentist(black_box(&control), black_box(&treatment), 0.05).unwrap())
    });
}

fn bench_bayesian(c: &mut Criterion) {
    let control = ArmSummary::proportion(Arm::Control, Metric::Conversion, 100_000, 15_000);
    let treatment = ArmSummary::proportion(Arm::Treatment, Metric::Conversion, 100_000, 16_500);
    c.bench_function("bayesian_100k_draws", |b| {
        b.iter(|| {
            analyze_bayesian(
                black_box(&control),
                black_box(&treatment),
                BetaPrior::uniform(),
                42,
                100_000,
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, bench_aggregate, bench_frequentist, bench_bayesian);
criterion_main!(benches);
