//! Criterion benchmarks for the emission computation engine.
//!
//! Benchmarks:
//!   - single_vehicle:  one computation per powertrain with the sample curves
//!   - state_timestep:  compute every live vehicle once, as the host does per step
//!
//! Run with: cargo bench -p emissions --bench engine_bench --features bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use emissions::engine::compute_emissions;
use emissions::test_harness::{
    electric_car, heavy_duty, model_pair, moving_vehicle, passenger_car, sample_registry,
    HDV_D_EU6_JSON, PC_BEV_JSON, PC_ICE_EURO6_JSON,
};
use emissions::{
    CreateVehicle, EmissionState, UpdateVehicle, VehicleField, VehicleId, VehicleTypeId,
};

// ---------------------------------------------------------------------------
// Benchmark: single vehicle computation
// ---------------------------------------------------------------------------

fn bench_single_vehicle(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_single_vehicle");
    group.sample_size(500);

    let cases = [
        ("pc_ice", model_pair(passenger_car(), PC_ICE_EURO6_JSON)),
        ("pc_bev", model_pair(electric_car(), PC_BEV_JSON)),
        ("hdv_diesel", model_pair(heavy_duty(), HDV_D_EU6_JSON)),
    ];
    let vehicle = moving_vehicle(1, 13.9, 0.6, 0.01);

    for (name, pair) in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), pair, |b, pair| {
            b.iter(|| black_box(compute_emissions(black_box(&vehicle), pair)));
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: one host timestep over N vehicles
// ---------------------------------------------------------------------------

fn populated_state(count: i64) -> EmissionState {
    let mut rng = ChaCha8Rng::seed_from_u64(806);
    let mut state = EmissionState::with_models(sample_registry());
    let types = [5, 200, 630];
    for id in 0..count {
        let vehicle = VehicleId(id);
        let type_id = VehicleTypeId(types[(id as usize) % types.len()]);
        // ids are unique, so create cannot fail
        let _ = state.create(CreateVehicle { id: vehicle, type_id });
        for (field, value) in [
            (VehicleField::Velocity, rng.gen_range(0.0..35.0)),
            (VehicleField::Acceleration, rng.gen_range(-3.0..2.5)),
            (VehicleField::Slope, rng.gen_range(-0.05..0.05)),
            (VehicleField::Timestep, 0.1),
        ] {
            state.update(UpdateVehicle {
                id: vehicle,
                field,
                value,
            });
        }
    }
    state
}

fn bench_state_timestep(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_state_timestep");
    group.sample_size(50);

    for count in [1_000i64, 10_000] {
        let mut state = populated_state(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                for id in 0..count {
                    let _ = black_box(state.compute(VehicleId(id)));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_vehicle, bench_state_timestep);
criterion_main!(benches);
