//! JSON-backed curve set: vehicle parameters plus pollutant tables over
//! normalized engine power.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::config::{
    AIR_DENSITY_CONST, CO2_CARBON_FRACTION, CO_CARBON_FRACTION, CURVE_FILE_EXTENSION,
    GRAVITY_CONST, HC_CARBON_FRACTION, ZERO_SPEED_ACCURACY,
};
use crate::emission_error::{ConfigError, CurveTableError};
use crate::rates::Pollutant;
use crate::vehicle_class::VehicleClass;

use super::{CurveSource, EmissionCurves};

/// Rolling resistance coefficients: `f0 + f1 * v + f4 * v^4`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RollingResistance {
    pub f0: f64,
    pub f1: f64,
    pub f4: f64,
}

impl RollingResistance {
    fn coefficient(&self, velocity: f64) -> f64 {
        self.f0 + self.f1 * velocity + self.f4 * velocity.powi(4)
    }
}

/// Pollutant rates (per hour) sampled on the table's power pattern.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PollutantTables {
    #[serde(rename = "FC")]
    pub fc: Vec<f64>,
    #[serde(rename = "CO", default)]
    pub co: Vec<f64>,
    #[serde(rename = "HC", default)]
    pub hc: Vec<f64>,
    #[serde(rename = "NOx", default)]
    pub nox: Vec<f64>,
    #[serde(rename = "PM", default)]
    pub pm: Vec<f64>,
}

impl PollutantTables {
    fn get(&self, pollutant: Pollutant) -> &[f64] {
        match pollutant {
            Pollutant::FuelConsumption => &self.fc,
            Pollutant::Co => &self.co,
            Pollutant::Hc => &self.hc,
            Pollutant::Nox => &self.nox,
            Pollutant::Pm => &self.pm,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurveTable {
    /// Empty vehicle mass (kg).
    pub vehicle_mass: f64,
    /// Payload and passengers (kg).
    pub vehicle_loading: f64,
    /// Mass equivalent of rotating parts (kg), only counted for acceleration.
    pub rotating_mass: f64,
    /// Frontal area (m^2).
    pub cross_section_area: f64,
    pub drag_coefficient: f64,
    pub rolling_resistance: RollingResistance,
    /// kW
    pub rated_power: f64,
    /// Nominal power of typical driving (kW).
    pub driving_power: f64,
    /// Constant auxiliary draw (kW).
    pub auxiliary_power: f64,
    /// Motoring drag at zero throttle as a fraction of rated power.
    pub engine_drag: f64,
    /// Overrides the powertrain default when present.
    #[serde(default)]
    pub fuel_carbon_fraction: Option<f64>,
    /// `[velocity, normalized max power]` points, sorted by velocity.
    pub full_load: Vec<[f64; 2]>,
    /// Normalized power (engine power / rated power) sample points, ascending.
    pub power_pattern: Vec<f64>,
    pub emissions: PollutantTables,
}

impl CurveTable {
    /// Parses and validates a curve table for `class`.
    pub fn from_json(json: &str, class: &VehicleClass) -> Result<Self, CurveTableError> {
        let mut table: CurveTable = serde_json::from_str(json)?;
        if table.fuel_carbon_fraction.is_none() {
            table.fuel_carbon_fraction = Some(class.powertrain.fuel_carbon_fraction());
        }
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), CurveTableError> {
        if self.rated_power <= 0.0 || self.driving_power <= 0.0 {
            return Err(CurveTableError::NonPositivePower);
        }
        if self.vehicle_mass + self.vehicle_loading <= 0.0 {
            return Err(CurveTableError::NonPositiveMass);
        }
        if self.power_pattern.is_empty() {
            return Err(CurveTableError::EmptyPowerPattern);
        }
        if self.power_pattern.windows(2).any(|w| w[0] >= w[1]) {
            return Err(CurveTableError::UnsortedPowerPattern);
        }
        if self.full_load.is_empty() || self.full_load.windows(2).any(|w| w[0][0] >= w[1][0]) {
            return Err(CurveTableError::InvalidFullLoad);
        }
        for pollutant in Pollutant::ALL {
            let column = self.emissions.get(pollutant);
            let required = pollutant == Pollutant::FuelConsumption;
            if (required || !column.is_empty()) && column.len() != self.power_pattern.len() {
                return Err(CurveTableError::ColumnLength {
                    pollutant,
                    found: column.len(),
                    expected: self.power_pattern.len(),
                });
            }
        }
        Ok(())
    }

    fn total_mass(&self) -> f64 {
        self.vehicle_mass + self.vehicle_loading
    }

    fn inertial_mass(&self) -> f64 {
        self.total_mass() + self.rotating_mass
    }

    /// Resistance forces (N) acting on a vehicle rolling at `velocity`.
    fn road_load(&self, velocity: f64, grade: f64) -> f64 {
        let mass = self.total_mass();
        let rolling = mass * GRAVITY_CONST * self.rolling_resistance.coefficient(velocity);
        let air = 0.5
            * AIR_DENSITY_CONST
            * self.drag_coefficient
            * self.cross_section_area
            * velocity
            * velocity;
        let climbing = mass * GRAVITY_CONST * grade.sin();
        rolling + air + climbing
    }

    fn full_load_norm(&self, velocity: f64) -> f64 {
        let xs: Vec<f64> = self.full_load.iter().map(|p| p[0]).collect();
        let ys: Vec<f64> = self.full_load.iter().map(|p| p[1]).collect();
        interpolate(&xs, &ys, velocity)
    }
}

impl EmissionCurves for CurveTable {
    fn calc_power(&self, velocity: f64, acceleration: f64, grade: f64) -> f64 {
        let traction = self.road_load(velocity, grade) + self.inertial_mass() * acceleration;
        traction * velocity / 1000.0 + self.auxiliary_power
    }

    fn calc_engine_power(&self, power: f64) -> f64 {
        let lowest = self.power_pattern[0] * self.rated_power;
        let highest = self.power_pattern[self.power_pattern.len() - 1] * self.rated_power;
        power.clamp(lowest, highest)
    }

    fn emission(&self, pollutant: Pollutant, power: f64, _velocity: f64) -> f64 {
        let column = self.emissions.get(pollutant);
        if column.is_empty() {
            return 0.0;
        }
        interpolate(&self.power_pattern, column, power / self.rated_power)
    }

    fn max_acceleration(&self, velocity: f64, grade: f64) -> f64 {
        // full-load power is undefined at standstill
        let velocity = velocity.max(ZERO_SPEED_ACCURACY);
        let full_load = self.full_load_norm(velocity) * self.rated_power;
        let reserve = full_load - self.calc_power(velocity, 0.0, grade);
        reserve * 1000.0 / (self.inertial_mass() * velocity)
    }

    fn decel_coast(&self, velocity: f64, _acceleration: f64, grade: f64) -> f64 {
        if velocity < ZERO_SPEED_ACCURACY {
            return 0.0;
        }
        let drag = self.engine_drag * self.rated_power * 1000.0 / velocity;
        -(self.road_load(velocity, grade) + drag) / self.inertial_mass()
    }

    fn co2_emission(&self, fuel: f64, co: f64, hc: f64) -> f64 {
        let carbon = self.fuel_carbon_fraction.unwrap_or_default();
        (fuel * carbon - co * CO_CARBON_FRACTION - hc * HC_CARBON_FRACTION) / CO2_CARBON_FRACTION
    }

    fn driving_power(&self) -> f64 {
        self.driving_power
    }

    fn rated_power(&self) -> f64 {
        self.rated_power
    }
}

/// Piecewise-linear lookup, held constant beyond either end. NaN reads the first value.
fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let last = xs.len() - 1;
    if x.is_nan() || x <= xs[0] {
        return ys[0];
    }
    if x >= xs[last] {
        return ys[last];
    }
    let upper = xs.partition_point(|&p| p <= x);
    let (x0, x1) = (xs[upper - 1], xs[upper]);
    let (y0, y1) = (ys[upper - 1], ys[upper]);
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

/// Reads `<base>/<classification>.json` for every requested class.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCurveSource;

impl CurveSource for JsonCurveSource {
    fn load(
        &self,
        class: &VehicleClass,
        base_path: &Path,
    ) -> Result<Arc<dyn EmissionCurves>, ConfigError> {
        let path = base_path.join(format!("{}.{}", class.name(), CURVE_FILE_EXTENSION));
        let missing = |reason: String| ConfigError::MissingCurves {
            class: class.name().to_string(),
            path: path.clone(),
            reason,
        };
        let json = fs::read_to_string(&path).map_err(|e| missing(e.to_string()))?;
        let table = CurveTable::from_json(&json, class).map_err(|e| missing(e.to_string()))?;
        Ok(Arc::new(table))
    }
}

#[cfg(test)]
mod interpolate_tests {
    use super::interpolate;

    #[test]
    fn test_interpolate_midpoint() {
        let v = interpolate(&[0.0, 1.0, 2.0], &[0.0, 10.0, 30.0], 1.5);
        assert!((v - 20.0).abs() < 1e-12, "got {v}");
    }

    #[test]
    fn test_interpolate_clamps_outside_range() {
        let xs = [-0.1, 0.0, 1.0];
        let ys = [5.0, 6.0, 100.0];
        assert_eq!(interpolate(&xs, &ys, -3.0), 5.0);
        assert_eq!(interpolate(&xs, &ys, 7.0), 100.0);
    }

    #[test]
    fn test_interpolate_nan_reads_first_value() {
        let xs = [-0.1, 0.0, 1.0];
        let ys = [5.0, 6.0, 100.0];
        assert_eq!(interpolate(&xs, &ys, f64::NAN), 5.0);
        assert_eq!(interpolate(&xs, &ys, f64::INFINITY), 100.0);
        assert_eq!(interpolate(&xs, &ys, f64::NEG_INFINITY), 5.0);
    }

    #[test]
    fn test_interpolate_exact_points() {
        let xs = [0.0, 0.5, 1.0];
        let ys = [1.0, 2.0, 4.0];
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_eq!(interpolate(&xs, &ys, *x), *y);
        }
    }
}
