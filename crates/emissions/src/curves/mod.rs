//! Capability contract of the emission-curve library.
//!
//! The state manager only needs a handful of physical functions per vehicle
//! class: wheel power, engine power, per-pollutant rates over (power, velocity),
//! acceleration and coasting limits, the CO2 carbon balance, and the nominal
//! power constants used for normalisation. [`EmissionCurves`] is that contract;
//! [`CurveSource`] resolves a class to a curve set at configuration time.
//! [`CurveTable`] is the bundled JSON-backed implementation.

mod table;

pub use table::{CurveTable, JsonCurveSource, RollingResistance};

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::emission_error::ConfigError;
use crate::rates::Pollutant;
use crate::vehicle_class::VehicleClass;

/// Physical model of one vehicle class.
///
/// Powers are kW, velocities m/s, accelerations m/s^2, grades radians.
/// Pollutant rates are per hour.
pub trait EmissionCurves: Send + Sync + fmt::Debug {
    /// Power demand at the wheels for the given driving state.
    fn calc_power(&self, velocity: f64, acceleration: f64, grade: f64) -> f64;

    /// Engine power draw for a wheel power demand.
    fn calc_engine_power(&self, power: f64) -> f64;

    /// Rate of `pollutant` at (power, velocity).
    fn emission(&self, pollutant: Pollutant, power: f64, velocity: f64) -> f64;

    /// Highest acceleration the vehicle can reach at this speed and grade.
    fn max_acceleration(&self, velocity: f64, grade: f64) -> f64;

    /// Deceleration reached with zero throttle (negative when slowing down).
    fn decel_coast(&self, velocity: f64, acceleration: f64, grade: f64) -> f64;

    /// CO2 rate derived from the carbon balance of fuel, CO and HC rates.
    fn co2_emission(&self, fuel: f64, co: f64, hc: f64) -> f64;

    fn driving_power(&self) -> f64;

    fn rated_power(&self) -> f64;
}

/// Resolves a vehicle class to curve data under a base directory.
pub trait CurveSource: Send + Sync {
    fn load(
        &self,
        class: &VehicleClass,
        base_path: &Path,
    ) -> Result<Arc<dyn EmissionCurves>, ConfigError>;
}

/// Curve sets bound to one model pair, keyed by classification name.
#[derive(Debug, Clone, Default)]
pub struct CurveProvider {
    sets: HashMap<String, Arc<dyn EmissionCurves>>,
}

impl CurveProvider {
    /// Loads the curve set for `class` from `source`.
    pub fn load(
        source: &dyn CurveSource,
        class: &VehicleClass,
        base_path: &Path,
    ) -> Result<Self, ConfigError> {
        let curves = source.load(class, base_path)?;
        Ok(Self::with_curves(class.name(), curves))
    }

    pub fn with_curves(class_name: &str, curves: Arc<dyn EmissionCurves>) -> Self {
        let mut sets = HashMap::new();
        sets.insert(class_name.to_string(), curves);
        Self { sets }
    }

    pub fn curves_for(&self, class: &VehicleClass) -> Option<&dyn EmissionCurves> {
        self.sets.get(class.name()).map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
