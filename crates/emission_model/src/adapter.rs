//! Safe core of the host entry points.
//!
//! The host never names a vehicle in its calls. It sets `VEH_ID` (and
//! `VEH_TYPE` before a create) and every later value or command refers to
//! that vehicle. [`ValueBuffer`] holds those staged values and turns them into
//! explicit requests for the [`EmissionState`].

use std::env;
use std::path::PathBuf;

use bevy::prelude::*;

use emissions::config::{DEFAULT_CONFIG_FILE, UNSET};
use emissions::{
    CreateVehicle, EmissionError, EmissionState, UpdateVehicle, VehicleField, VehicleId,
    VehicleTypeId,
};

use crate::tags::{emission_value, is_emission_tag, Command, SetTag};

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV: &str = "EMISSION_MODEL_CONFIG";

/// Values staged by the host since its last calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueBuffer {
    pub vehicle_id: VehicleId,
    pub vehicle_type: VehicleTypeId,
    pub timestep: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub weight: f64,
    pub slope: f64,
}

impl Default for ValueBuffer {
    fn default() -> Self {
        Self {
            vehicle_id: VehicleId(0),
            vehicle_type: VehicleTypeId(0),
            timestep: UNSET,
            velocity: UNSET,
            acceleration: UNSET,
            weight: UNSET,
            slope: UNSET,
        }
    }
}

impl ValueBuffer {
    fn stage(&mut self, field: VehicleField, value: f64) {
        match field {
            VehicleField::Timestep => self.timestep = value,
            VehicleField::Velocity => self.velocity = value,
            VehicleField::Acceleration => self.acceleration = value,
            VehicleField::Mass => self.weight = value,
            VehicleField::Slope => self.slope = value,
        }
    }

    pub fn create_request(&self) -> CreateVehicle {
        CreateVehicle {
            id: self.vehicle_id,
            type_id: self.vehicle_type,
        }
    }

    pub fn update_request(&self, field: VehicleField, value: f64) -> UpdateVehicle {
        UpdateVehicle {
            id: self.vehicle_id,
            field,
            value,
        }
    }
}

pub struct HostAdapter {
    state: EmissionState,
    buffer: ValueBuffer,
}

impl HostAdapter {
    pub fn new(state: EmissionState) -> Self {
        Self {
            state,
            buffer: ValueBuffer::default(),
        }
    }

    /// Adapter reading the configuration named by [`CONFIG_ENV`], or the
    /// default file in the working directory.
    pub fn from_env() -> Self {
        let path = env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        info!("Emission model using configuration {}", path.display());
        Self::new(EmissionState::new(path))
    }

    pub fn buffer(&self) -> &ValueBuffer {
        &self.buffer
    }

    pub fn state(&self) -> &EmissionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EmissionState {
        &mut self.state
    }

    /// Stages a value and applies kinematics to the buffered vehicle if it is live.
    ///
    /// Returns `false` only for tags the protocol does not define.
    pub fn set_value(&mut self, tag: i64, long_value: i64, double_value: f64) -> bool {
        let Some(set_tag) = SetTag::from_raw(tag) else {
            debug!("Ignoring unknown set tag {tag}");
            return false;
        };
        match set_tag {
            SetTag::VehicleId => self.buffer.vehicle_id = VehicleId(long_value),
            SetTag::VehicleType => self.buffer.vehicle_type = VehicleTypeId(long_value),
            _ => {
                if let Some(field) = set_tag.vehicle_field() {
                    self.buffer.stage(field, double_value);
                    let request = self.buffer.update_request(field, double_value);
                    self.state.update(request);
                }
            }
        }
        true
    }

    /// Reads an emission quantity of the buffered vehicle. Anything without a
    /// value (no record yet, unpopulated or unknown tag) reads as zero.
    pub fn get_value(&mut self, tag: i64) -> f64 {
        if !is_emission_tag(tag) {
            debug!("Read of non-emission tag {tag}");
            return 0.0;
        }
        match self.state.emission(self.buffer.vehicle_id) {
            Ok(rates) => emission_value(tag, rates),
            Err(_) => 0.0,
        }
    }

    pub fn execute_command(&mut self, number: i64) -> bool {
        let Some(command) = Command::from_raw(number) else {
            warn!("Unknown emission model command {number}");
            return false;
        };
        match self.run(command) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "{command:?} failed for vehicle {}: {e}",
                    self.buffer.vehicle_id
                );
                false
            }
        }
    }

    fn run(&mut self, command: Command) -> Result<(), EmissionError> {
        let id = self.buffer.vehicle_id;
        match command {
            Command::Init => Ok(()),
            Command::CreateVehicle => self.state.create(self.buffer.create_request()),
            Command::KillVehicle => self.state.destroy(id),
            Command::CalculateVehicle => self.state.compute(id).map(|_| ()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::{CO2, FUEL, TIME, VEH_ID, VEH_TYPE, VEH_VELOCITY, VEH_WEIGHT};
    use emissions::test_harness::sample_registry;

    fn adapter() -> HostAdapter {
        HostAdapter::new(EmissionState::with_models(sample_registry()))
    }

    #[test]
    fn test_set_id_and_type_only_buffer() {
        let mut adapter = adapter();
        assert!(adapter.set_value(VEH_ID, 17, 0.0));
        assert!(adapter.set_value(VEH_TYPE, 630, 0.0));
        assert_eq!(adapter.buffer().vehicle_id, VehicleId(17));
        assert_eq!(adapter.buffer().vehicle_type, VehicleTypeId(630));
        assert!(adapter.state().vehicles().is_empty());
    }

    #[test]
    fn test_kinematics_before_create_are_buffered_only() {
        let mut adapter = adapter();
        adapter.set_value(VEH_ID, 1, 0.0);
        assert!(adapter.set_value(VEH_VELOCITY, 0, 12.0));
        assert_eq!(adapter.buffer().velocity, 12.0);

        assert!(adapter.execute_command(1));
        let record = *adapter.state_mut().vehicle(VehicleId(1)).unwrap();
        assert_eq!(record.velocity, UNSET, "create does not copy staged kinematics");
    }

    #[test]
    fn test_weight_maps_to_mass() {
        let mut adapter = adapter();
        adapter.set_value(VEH_ID, 2, 0.0);
        adapter.execute_command(1);
        adapter.set_value(VEH_WEIGHT, 0, 1450.0);
        assert_eq!(adapter.state_mut().vehicle(VehicleId(2)).unwrap().mass, 1450.0);
    }

    #[test]
    fn test_ignored_and_unknown_set_tags() {
        let mut adapter = adapter();
        assert!(adapter.set_value(TIME, 0, 3600.0));
        assert!(!adapter.set_value(999, 0, 1.0));
        assert_eq!(*adapter.buffer(), ValueBuffer::default());
    }

    #[test]
    fn test_read_without_record_is_zero() {
        let mut adapter = adapter();
        adapter.set_value(VEH_ID, 44, 0.0);
        assert_eq!(adapter.get_value(FUEL), 0.0);
        assert_eq!(adapter.get_value(CO2), 0.0);
        assert_eq!(adapter.get_value(12), 0.0);
    }

    #[test]
    fn test_failed_commands_return_false() {
        let mut adapter = adapter();
        adapter.set_value(VEH_ID, 5, 0.0);
        assert!(!adapter.execute_command(2), "kill of unknown vehicle");
        assert!(!adapter.execute_command(3), "calculate of unknown vehicle");
        assert!(adapter.execute_command(1));
        assert!(!adapter.execute_command(1), "duplicate create");
        assert!(!adapter.execute_command(42));
        assert!(adapter.execute_command(0));
    }
}
