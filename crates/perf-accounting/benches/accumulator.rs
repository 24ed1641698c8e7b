//! Benchmarks for per-update accumulator throughput.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use perf_accounting::{AccumulatorConfig, PerformanceAccumulator};
use perf_commission::CommissionSchedule;
use perf_core::types::{Mode, TradeUpdate};

fn generate_updates(size: usize) -> Vec<TradeUpdate> {
    let mut position = 0i64;
    (0..size)
        .map(|i| {
            let price = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            let quantity = if position > 0 { -position } else { 10 };
            position += quantity;
            TradeUpdate::new(i as i64 * 1_000, quantity, price, position)
        })
        .collect()
}

fn benchmark_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_update");

    for size in [1000, 10000, 100000].iter() {
        let updates = generate_updates(*size);

        for mode in [Mode::BackTest, Mode::Optimization] {
            group.bench_with_input(
                BenchmarkId::new(mode.to_string(), size),
                &updates,
                |b, updates| {
                    b.iter(|| {
                        let config = AccumulatorConfig { multiplier: 1, mode };
                        let commission = CommissionSchedule::bundled_north_america_stock().build();
                        let mut acc = PerformanceAccumulator::new(config, commission).unwrap();
                        for update in updates {
                            acc.apply_update(black_box(update), None).unwrap();
                        }
                        acc.snapshot()
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, benchmark_apply);
criterion_main!(benches);
