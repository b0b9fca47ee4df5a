//! Emission computation engine.
//!
//! Turns one vehicle's kinematic state into instantaneous emission rates using
//! the curve set of its model pair. The computation is pure: identical inputs
//! always give bit-identical output.
//!
//! ## Branches
//!
//! | Powertrain | Condition                                        | Result                   |
//! |------------|--------------------------------------------------|--------------------------|
//! | Electric   | always                                           | FC only, pollutants zero |
//! | Combustion | `a >= coast_decel` or `v <= ZERO_SPEED_ACCURACY` | FC, CO, CO2, HC, NOx, PM |
//! | Combustion | otherwise (coasting)                             | all rates zero           |
//!
//! The normalized power ratios are filled in on every branch.


use crate::config::{SECONDS_PER_HOUR, ZERO_SPEED_ACCURACY};
use crate::curves::EmissionCurves;
use crate::emission_error::EmissionError;
use crate::model_registry::ModelPair;
use crate::rates::{EmissionRates, Pollutant};
use crate::vehicle_class::Powertrain;
use crate::vehicles::VehicleRecord;

/// Velocity and acceleration after the physical limits have been applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrivingState {
    pub velocity: f64,
    pub acceleration: f64,
    pub grade: f64,
}

/// Computes the emission rates of `vehicle` with the curves bound to `pair`.
pub fn compute_emissions(
    vehicle: &VehicleRecord,
    pair: &ModelPair,
) -> Result<EmissionRates, EmissionError> {
    let curves = pair
        .curves()
        .ok_or_else(|| EmissionError::ModelUnavailable {
            class: pair.class.name().to_string(),
        })?;
    Ok(rates_from_curves(vehicle, curves, pair.class.powertrain))
}

/// Clamps the recorded kinematics to what the model can physically produce.
///
/// Negative velocity counts as standing still, a standing vehicle never
/// accelerates, and a moving one cannot exceed the model's maximum acceleration.
pub fn driving_state(vehicle: &VehicleRecord, curves: &dyn EmissionCurves) -> DrivingState {
    let grade = vehicle.grade();
    let velocity = vehicle.velocity.max(0.0);
    let acceleration = if velocity == 0.0 {
        0.0
    } else {
        vehicle
            .acceleration
            .min(curves.max_acceleration(velocity, grade))
    };
    DrivingState {
        velocity,
        acceleration,
        grade,
    }
}

pub fn rates_from_curves(
    vehicle: &VehicleRecord,
    curves: &dyn EmissionCurves,
    powertrain: Powertrain,
) -> EmissionRates {
    let state = driving_state(vehicle, curves);
    let power = curves.calc_power(state.velocity, state.acceleration, state.grade);
    let engine_power = curves.calc_engine_power(power);

    let mut rates = EmissionRates {
        norm_drive: engine_power / curves.driving_power(),
        norm_rated: engine_power / curves.rated_power(),
        ..EmissionRates::zeroed()
    };

    if powertrain.is_electric() {
        rates.fuel_consumption =
            curves.emission(Pollutant::FuelConsumption, power, state.velocity) / SECONDS_PER_HOUR;
        return rates;
    }

    if !is_under_load(&state, curves) {
        // coasting: fuel cut-off, engine load negligible
        return rates;
    }

    let fc = curves.emission(Pollutant::FuelConsumption, power, state.velocity);
    let co = curves.emission(Pollutant::Co, power, state.velocity);
    let hc = curves.emission(Pollutant::Hc, power, state.velocity);
    let nox = curves.emission(Pollutant::Nox, power, state.velocity);
    let pm = curves.emission(Pollutant::Pm, power, state.velocity);

    rates.co2 = curves.co2_emission(fc, co, hc) / SECONDS_PER_HOUR;
    rates.fuel_consumption = fc / SECONDS_PER_HOUR;
    rates.co = co / SECONDS_PER_HOUR;
    rates.hc = hc / SECONDS_PER_HOUR;
    rates.nox = nox / SECONDS_PER_HOUR;
    rates.pm = pm / SECONDS_PER_HOUR;
    rates
}

/// Idling or pulling: the acceleration is at or above the coasting threshold
/// (inclusive), or the vehicle is practically standing.
pub fn is_under_load(state: &DrivingState, curves: &dyn EmissionCurves) -> bool {
    let coast = curves.decel_coast(state.velocity, state.acceleration, state.grade);
    state.acceleration >= coast || state.velocity <= ZERO_SPEED_ACCURACY
}
