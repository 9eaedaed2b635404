//! Benchmarks pour les transformations de points

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use geo::{coord, Coord};
use lambert_maroc::{CoordinateSystem, Transformer, Zone, ZoneRegistry};

fn make_points(count: usize) -> Vec<Coord> {
    (0..count)
        .map(|i| {
            let f = i as f64 / count as f64;
            coord! { x: -9.0 + 6.0 * f, y: 30.0 + 5.0 * f }
        })
        .collect()
}

fn bench_single_point(c: &mut Criterion) {
    let registry = ZoneRegistry::new();
    let t = Transformer::new(&registry);
    let nord = CoordinateSystem::Zone(Zone::NordMaroc);
    let sud = CoordinateSystem::Zone(Zone::SudMaroc);
    let p = coord! { x: -6.8498, y: 34.0209 };
    let grid = t.transform(p, CoordinateSystem::Wgs84, nord).unwrap();

    let mut group = c.benchmark_group("single_point");
    group.bench_function("wgs84_to_zone", |b| {
        b.iter(|| t.transform(black_box(p), CoordinateSystem::Wgs84, nord))
    });
    group.bench_function("zone_to_wgs84", |b| {
        b.iter(|| t.transform(black_box(grid), nord, CoordinateSystem::Wgs84))
    });
    group.bench_function("zone_to_zone", |b| {
        b.iter(|| t.transform(black_box(grid), nord, sud))
    });
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let t = Transformer::default();
    let target = CoordinateSystem::Zone(Zone::Z2);

    let mut group = c.benchmark_group("batch");
    for size in [1_000usize, 100_000] {
        let points = make_points(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &points, |b, points| {
            b.iter(|| {
                let mut coords = points.clone();
                t.transform_batch(&mut coords, CoordinateSystem::Wgs84, target)
                    .unwrap();
                black_box(coords)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_point, bench_batch);
criterion_main!(benches);
