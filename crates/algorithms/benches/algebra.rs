//! Benchmarks for coverage algebra

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rasalg_algorithms::algebra::{
    transform_roi_to_grid, AlgebraExecutor, ExecutionConfig, NoDataRange, Operator, Roi,
};
use rasalg_core::{AnyRaster, GeoTransform, PixelType, Raster};
use rasalg_parallel::ProcessingMode;

fn create_band(size: usize, base: f32) -> AnyRaster {
    let mut r = Raster::new(size, size);
    r.set_transform(GeoTransform::new(0.0, size as f64, 1.0, -1.0));
    for row in 0..size {
        for col in 0..size {
            let v = base + ((row * 7 + col * 13) % 200) as f32;
            r.set(row, col, v).unwrap();
        }
    }
    r.into()
}

fn bench_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("algebra/operators");
    let size = 1024;
    let a = create_band(size, 100.0);
    let b = create_band(size, 0.0);
    let executor = AlgebraExecutor::default();
    for op in [Operator::Sum, Operator::Subtract, Operator::Multiply, Operator::Divide] {
        group.bench_with_input(BenchmarkId::from_parameter(op), &op, |bench, &op| {
            bench.iter(|| {
                executor
                    .execute(black_box(&[&a, &b]), op, None, None, Some(-9999.0))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("algebra/mode");
    let range = NoDataRange::new(PixelType::Float32, 0.0, 10.0);
    for size in [256, 512, 1024, 2048] {
        let a = create_band(size, 100.0);
        let b = create_band(size, 0.0);
        let c_band = create_band(size, 50.0);
        for mode in [ProcessingMode::Sequential, ProcessingMode::Parallel] {
            let executor = AlgebraExecutor::new(ExecutionConfig::default().with_mode(mode));
            let id = BenchmarkId::new(format!("{mode:?}"), size);
            group.bench_with_input(id, &size, |bench, _| {
                bench.iter(|| {
                    executor
                        .execute(black_box(&[&a, &b, &c_band]), Operator::Sum, None, Some(&range), None)
                        .unwrap()
                })
            });
        }
    }
    group.finish();
}

fn bench_roi_mask(c: &mut Criterion) {
    let mut group = c.benchmark_group("algebra/roi_mask");
    for size in [256, 1024, 2048] {
        let s = size as f64;
        let transform = GeoTransform::new(0.0, s, 1.0, -1.0);
        let roi = Roi::from_exterior(vec![
            (0.1 * s, 0.2 * s),
            (0.9 * s, 0.1 * s),
            (0.7 * s, 0.9 * s),
            (0.2 * s, 0.8 * s),
        ]);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| transform_roi_to_grid(black_box(&roi), &transform, size, size).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_operators, bench_modes, bench_roi_mask);
criterion_main!(benches);
