//! Criterion benchmarks on a synthetic grid city.
//! Sizes: 5x5, 10x10 and 20x20 intersections, 60 m apart, so cell diagonals
//! become line-of-sight edges wherever no building is in the way.

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use geo::{Point, polygon};
use vtovosm_core::prelude::*;

fn grid_city(n: u64) -> (StreetGraph, BuildingSet) {
    let spacing = 60.0;
    let mut streets = StreetGraph::new();
    let mut footprints = Vec::new();
    for i in 0..n {
        for j in 0..n {
            streets.add_node(i * n + j, Point::new(i as f64 * spacing, j as f64 * spacing));
        }
    }
    for i in 0..n {
        for j in 0..n {
            let here = streets.node_by_id(i * n + j).unwrap();
            if i + 1 < n {
                let east = streets.node_by_id((i + 1) * n + j).unwrap();
                streets.add_street(here, east, None, None).unwrap();
            }
            if j + 1 < n {
                let north = streets.node_by_id(i * n + j + 1).unwrap();
                streets.add_street(here, north, None, None).unwrap();
            }
            // Every other cell is an open square
            if i + 1 < n && j + 1 < n && (i + j) % 2 == 0 {
                let (x, y) = (i as f64 * spacing, j as f64 * spacing);
                footprints.push(polygon![
                    (x: x + 5.0, y: y + 5.0),
                    (x: x + spacing - 5.0, y: y + 5.0),
                    (x: x + spacing - 5.0, y: y + spacing - 5.0),
                    (x: x + 5.0, y: y + spacing - 5.0),
                ]);
            }
        }
    }
    (streets, BuildingSet::new(footprints))
}

fn bench_visibility_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("visibility_graph");
    for &n in &[5u64, 10, 20] {
        let (streets, buildings) = grid_city(n);
        group.bench_with_input(BenchmarkId::new("build", n), &n, |b, _| {
            b.iter_batched(
                || streets.clone(),
                |streets| VisibilityGraph::build(streets, &buildings, 50.0),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");
    group.sample_size(20);
    for &n in &[5u64, 10, 20] {
        let (streets, buildings) = grid_city(n);
        let graph = VisibilityGraph::build(streets, &buildings, 50.0);
        let vehicles = generate_vehicles(graph.streets(), 100, 42).unwrap();
        let points: Vec<_> = vehicles.iter().map(|v| v.point).collect();
        let center = find_center_vehicle(&points).unwrap();
        let config = ClassifierConfig::default();

        group.bench_with_input(BenchmarkId::new("classify_from_center", n), &n, |b, _| {
            b.iter(|| classify_from(&graph, &buildings, &vehicles, center, &config))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_visibility_graph, bench_classification);
criterion_main!(benches);
