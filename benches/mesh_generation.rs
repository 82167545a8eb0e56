use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shape_preview::geometry::{build_torus_knot, TorusKnotParams};
use shape_preview::shapes::ShapeKind;

/// Benchmark: Each shape at its default parameters
fn bench_default_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("default_shapes");

    for kind in ShapeKind::ALL {
        let descriptor = kind.descriptor();
        let record = descriptor.default_record();
        group.bench_with_input(BenchmarkId::from_parameter(kind.title()), &record, |b, record| {
            b.iter(|| descriptor.build(black_box(record)))
        });
    }

    group.finish();
}

/// Benchmark: Torus knot as the segment sliders go up
fn bench_torus_knot_density(c: &mut Criterion) {
    let mut group = c.benchmark_group("torus_knot_density");

    for segments in [16.0_f32, 50.0, 100.0] {
        let params = TorusKnotParams {
            tubular_segments: segments,
            radial_segments: (segments / 3.0).max(3.0),
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(segments as u32), &params, |b, params| {
            b.iter(|| build_torus_knot(black_box(params)))
        });
    }

    group.finish();
}

/// Benchmark: Wireframe edge extraction used by the GPU surface
fn bench_wireframe_indices(c: &mut Criterion) {
    let mesh = build_torus_knot(&TorusKnotParams::default());
    c.bench_function("wireframe_indices_torus_knot", |b| b.iter(|| black_box(&mesh).wireframe_indices()));
}

criterion_group!(
    benches,
    bench_default_shapes,
    bench_torus_knot_density,
    bench_wireframe_indices
);
criterion_main!(benches);
