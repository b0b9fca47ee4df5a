//! Criterion benchmarks for the keyed vehicle and emission stores.
//!
//! Benchmarks:
//!   - cached_update:    set-then-read on the same vehicle (cache hit path)
//!   - scattered_lookup: lookups that miss the cache slot every time
//!   - churn:            create/destroy cycles with id reuse
//!
//! Run with: cargo bench -p emissions --bench registry_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use emissions::emission_store::EmissionStore;
use emissions::vehicles::VehicleRegistry;
use emissions::{EmissionRates, VehicleField, VehicleId, VehicleTypeId};

const FLEET_SIZE: i64 = 10_000;

fn fleet() -> VehicleRegistry {
    let mut registry = VehicleRegistry::default();
    for id in 0..FLEET_SIZE {
        let _ = registry.create(VehicleId(id), VehicleTypeId(id % 7));
    }
    registry
}

// ---------------------------------------------------------------------------
// Benchmark: repeated access to one vehicle
// ---------------------------------------------------------------------------

fn bench_cached_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_cached_update");
    group.sample_size(500);

    let mut registry = fleet();
    let id = VehicleId(FLEET_SIZE / 2);

    group.bench_function("set_four_fields_then_get", |b| {
        b.iter(|| {
            registry.update(id, VehicleField::Velocity, 12.0);
            registry.update(id, VehicleField::Acceleration, 0.4);
            registry.update(id, VehicleField::Slope, 0.0);
            registry.update(id, VehicleField::Timestep, 0.1);
            let _ = black_box(registry.get(id));
        });
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: lookups across the fleet
// ---------------------------------------------------------------------------

fn bench_scattered_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_scattered_lookup");
    group.sample_size(100);

    let mut registry = fleet();
    let mut store = EmissionStore::default();
    for id in 0..FLEET_SIZE {
        store.put(VehicleId(id), EmissionRates::zeroed());
    }

    group.bench_function("vehicles_10k", |b| {
        b.iter(|| {
            for id in 0..FLEET_SIZE {
                let _ = black_box(registry.get(VehicleId(id)));
            }
        });
    });

    group.bench_function("emissions_10k", |b| {
        b.iter(|| {
            for id in 0..FLEET_SIZE {
                let _ = black_box(store.get(VehicleId(id)));
            }
        });
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: create/destroy churn
// ---------------------------------------------------------------------------

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_churn");
    group.sample_size(200);

    let mut registry = fleet();

    group.bench_function("destroy_create_1k", |b| {
        b.iter(|| {
            for id in 0..1_000 {
                let _ = registry.destroy(VehicleId(id));
                let _ = registry.create(VehicleId(id), VehicleTypeId(1));
            }
            black_box(registry.len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_cached_update, bench_scattered_lookup, bench_churn);
criterion_main!(benches);
