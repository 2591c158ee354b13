use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use ecal_builder::assembly;
use ecal_builder::config::EcalConfig;
use ecal_rs::builders::LayerGeometry;
use ecal_rs::geometry::Length;
use ecal_rs::packing::DiscPacking;

criterion_main!(benches);
criterion_group!(benches, disc_packing_bench, disc_assembly_bench);

const RADII_MM: [f64; 4] = [250.0, 500.0, 1000.0, 2000.0];
const PITCH_MM: f64 = 30.1;

/// Benchmark the disc packing algorithm on its own for increasing radii
fn disc_packing_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("disc_packing");
    for r in RADII_MM {
        group.bench_function(BenchmarkId::from_parameter(r), |b| {
            b.iter(|| DiscPacking::new(Length::mm(r), Length::mm(PITCH_MM)).unwrap())
        });
    }
    group.finish();
}

/// Benchmark the construction of a full tile, strip and disc assembly into a fresh registry
fn disc_assembly_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("disc_assembly");
    for r in RADII_MM {
        let mut config = EcalConfig::default();
        config.layer.geometry = LayerGeometry::Disc { r: Length::mm(r) };
        group.bench_function(BenchmarkId::from_parameter(r), |b| {
            b.iter(|| assembly::build(&config).unwrap())
        });
    }
    group.finish();
}
