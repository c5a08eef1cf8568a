//! Criterion benchmarks for paramsweep_core
//!
//! Run with: cargo bench -p paramsweep_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use paramsweep_core::{
    Builder, Design, NormalFactor, RandomOrderA, RangeFactor, Sequence, factor,
};

type Grid = (RangeFactor<i32>, RangeFactor<f64>, NormalFactor<f64>);

fn create_grid(levels: usize) -> Builder<Grid> {
    Builder::new((
        RangeFactor::new(0, levels as i32 * 10 - 1, levels),
        RangeFactor::new(0.0, 1.0, levels),
        NormalFactor::new(0.0, 1.0, levels / 2),
    ))
}

fn bench_full_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_enumeration");

    for levels in [4, 16, 32] {
        let builder = create_grid(levels);
        group.bench_with_input(BenchmarkId::from_parameter(levels), &builder, |b, builder| {
            b.iter(|| builder.iter().fold(0.0, |acc, (x, y, z)| acc + x as f64 + y + z))
        });
    }

    group.finish();
}

fn bench_one_at_a_time(c: &mut Criterion) {
    let builder = create_grid(64).with_design(Design::OneAtATime).with_replicants(10);

    c.bench_function("one_at_a_time_64_levels", |b| {
        b.iter(|| black_box(&builder).iter().count())
    });
}

fn bench_random_access(c: &mut Criterion) {
    let builder = create_grid(32).with_replicants(3);
    let size = builder.size();

    c.bench_function("random_access_value_at", |b| {
        let mut d = 0;
        b.iter(|| {
            d = (d + 7919) % size;
            builder.value_at(black_box(d))
        })
    });

    c.bench_function("random_access_parameters", |b| {
        let mut d = 0;
        b.iter(|| {
            d = (d + 7919) % size;
            builder.get_parameters(black_box(d))
        })
    });
}

fn bench_shuffled_traversal(c: &mut Criterion) {
    let levels = factor![
        RangeFactor::<i64>::new(0, 999, 1000),
        RangeFactor::<i64>::new(5000, 5999, 1000)
    ];
    let shuffled = RandomOrderA::new(levels);

    c.bench_function("shuffled_factor_2000", |b| {
        b.iter(|| black_box(&shuffled).values().sum::<i64>())
    });
}

criterion_group!(
    benches,
    bench_full_enumeration,
    bench_one_at_a_time,
    bench_random_access,
    bench_shuffled_traversal
);
criterion_main!(benches);
