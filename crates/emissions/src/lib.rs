//! Per-vehicle emission state for traffic microsimulation.
//!
//! The host creates vehicles, streams their kinematics field by field, asks for
//! an emission computation once per timestep, reads the rates back, and
//! finally destroys the vehicle. [`EmissionState`] owns all of that state;
//! [`EmissionsPlugin`] exposes it as a bevy resource for in-process embedding.

use std::path::PathBuf;

use bevy::prelude::*;

mod arena;
pub mod config;
pub mod curves;
pub mod emission_error;
pub mod emission_state;
pub mod emission_store;
pub mod engine;
pub mod model_registry;
pub mod rates;
pub mod request;
pub mod vehicle_class;
pub mod vehicles;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use emission_error::{ConfigError, CurveTableError, EmissionError};
pub use emission_state::EmissionState;
pub use rates::EmissionRates;
pub use request::{CreateVehicle, UpdateVehicle};
pub use vehicles::{VehicleField, VehicleId, VehicleTypeId};

/// Inserts an [`EmissionState`] reading its model configuration from `config_path`.
pub struct EmissionsPlugin {
    pub config_path: PathBuf,
}

impl Default for EmissionsPlugin {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(config::DEFAULT_CONFIG_FILE),
        }
    }
}

impl Plugin for EmissionsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(EmissionState::new(self.config_path.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_inserts_state_without_loading() {
        let mut app = App::new();
        app.add_plugins(EmissionsPlugin {
            config_path: PathBuf::from("does/not/exist.cfg"),
        });
        let state = app.world().resource::<EmissionState>();
        assert_eq!(state.config_path(), std::path::Path::new("does/not/exist.cfg"));
        assert!(!state.models_loaded());
        assert!(state.vehicles().is_empty());
    }

    #[test]
    fn test_plugin_state_is_usable_from_world() {
        let mut app = App::new();
        app.add_plugins(EmissionsPlugin::default());
        let mut state = app.world_mut().resource_mut::<EmissionState>();
        state
            .create(CreateVehicle {
                id: VehicleId(1),
                type_id: VehicleTypeId(5),
            })
            .unwrap();
        assert_eq!(state.vehicle(VehicleId(1)).unwrap().type_id(), VehicleTypeId(5));
    }
}
