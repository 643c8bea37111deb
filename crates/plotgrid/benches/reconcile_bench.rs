//! Criterion benchmarks for the reconciliation pipeline.
//! Focus sizes: square grids with n in {4, 8, 16, 32} plots per side.
//! Bucketing and snapping both scan every vertex, so expect roughly quadratic
//! growth in the plot count.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use plotgrid::prelude::*;

fn grid(n: usize, seed: u64) -> Vec<PlotRecord> {
    let spec = GridSpec {
        rows: n,
        cols: n,
        rotation: -0.02,
        jitter: 0.8,
        ..GridSpec::default()
    };
    synthetic_grid(&spec, seed)
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");
    for &n in &[4usize, 8, 16, 32] {
        group.bench_with_input(BenchmarkId::new("full", n), &n, |b, &n| {
            let cfg = ReconcileCfg {
                reference_pair: Some((1, 2)),
                ..ReconcileCfg::default()
            };
            b.iter_batched(
                || grid(n, 43),
                |records| {
                    let _out = reconcile(&records, &cfg).unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("no_snap", n), &n, |b, &n| {
            let cfg = ReconcileCfg {
                snap: false,
                ..ReconcileCfg::default()
            };
            b.iter_batched(
                || grid(n, 44),
                |records| {
                    let _out = reconcile(&records, &cfg).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reconcile);
criterion_main!(benches);
