//! Rateplan pricing benchmarks
//!
//! - Single quote evaluation against a seeded-size profile
//! - Evaluation as the adjustment list grows
//! - Truncation helper

use std::collections::BTreeMap;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rateplan_common::{
    truncate2, Adjustment, AdjustmentSet, CoverageRates, CoverageTier, PricingProfile,
    QuoteExtraSelection, UsState, MAX_ADJUSTMENTS,
};
use rateplan_engine::PricingEngine;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn profile_with(adjustments: Vec<Adjustment>) -> PricingProfile {
    let rates = CoverageRates::new(BTreeMap::from([
        (CoverageTier::Basic, dec!(20)),
        (CoverageTier::Premium, dec!(40)),
    ]))
    .expect("both tiers present");
    PricingProfile::new(
        UsState::Texas,
        dec!(0.005),
        rates,
        AdjustmentSet::from_adjustments(adjustments).expect("unique names"),
    )
}

// ============ PRICING BENCHMARKS ============

/// Benchmark pricing evaluation
fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("pricing");
    group.measurement_time(Duration::from_secs(5));

    // Seeded profile: one add-on, one surcharge
    group.bench_function("seeded_profile", |b| {
        let engine = PricingEngine::new();
        let profile = profile_with(vec![
            Adjustment::additive("pet", dec!(20)),
            Adjustment::multiplicative("flood", dec!(0.5)),
        ]);
        let selections = vec![
            QuoteExtraSelection::enabled("pet"),
            QuoteExtraSelection::enabled("flood"),
        ];

        b.iter(|| {
            black_box(engine.evaluate(
                black_box(&profile),
                black_box("premium"),
                black_box(&selections),
            ))
        });
    });

    // Scaling with the number of adjustments, half additive, half multiplicative
    for count in [4usize, 8, 16, MAX_ADJUSTMENTS].iter() {
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(BenchmarkId::new("adjustments", count), count, |b, &count| {
            let engine = PricingEngine::new();
            let adjustments = (0..count)
                .map(|i| {
                    if i % 2 == 0 {
                        Adjustment::additive(format!("extra{}", i), dec!(1.25))
                    } else {
                        Adjustment::multiplicative(format!("extra{}", i), dec!(0.01))
                    }
                })
                .collect();
            let profile = profile_with(adjustments);
            let selections: Vec<QuoteExtraSelection> = (0..count)
                .map(|i| QuoteExtraSelection::new(format!("extra{}", i), i % 3 != 0))
                .collect();

            b.iter(|| {
                black_box(engine.evaluate(
                    black_box(&profile),
                    black_box("basic"),
                    black_box(&selections),
                ))
            });
        });
    }

    group.finish();
}

/// Benchmark truncation
fn bench_truncate(c: &mut Criterion) {
    let mut group = c.benchmark_group("money");

    group.bench_function("truncate2", |b| {
        let values: Vec<Decimal> = (0..100).map(|i| Decimal::new(40_808 + i, 3)).collect();

        b.iter(|| {
            for value in black_box(&values) {
                black_box(truncate2(*value));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_truncate);
criterion_main!(benches);
