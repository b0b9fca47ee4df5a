use std::fmt;

use crate::config::UNSET;

/// Host-assigned vehicle number. Unique while live, reusable after destruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub i64);

/// User-defined vehicle type number, used to pick a model pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleTypeId(pub i64);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for VehicleTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kinematic fields the host may set on a live vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleField {
    /// m/s
    Velocity,
    /// m/s^2
    Acceleration,
    /// Road grade in radians.
    Slope,
    /// kg
    Mass,
    /// Simulation timestep length in seconds.
    Timestep,
}

/// Per-vehicle state as last reported by the host.
///
/// Every kinematic field starts at [`UNSET`] until the host provides it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleRecord {
    type_id: VehicleTypeId,
    pub velocity: f64,
    pub acceleration: f64,
    pub slope: f64,
    pub mass: f64,
    pub timestep: f64,
}

impl VehicleRecord {
    pub fn new(type_id: VehicleTypeId) -> Self {
        Self {
            type_id,
            velocity: UNSET,
            acceleration: UNSET,
            slope: UNSET,
            mass: UNSET,
            timestep: UNSET,
        }
    }

    /// The type is fixed at creation.
    pub fn type_id(&self) -> VehicleTypeId {
        self.type_id
    }

    pub fn set(&mut self, field: VehicleField, value: f64) {
        match field {
            VehicleField::Velocity => self.velocity = value,
            VehicleField::Acceleration => self.acceleration = value,
            VehicleField::Slope => self.slope = value,
            VehicleField::Mass => self.mass = value,
            VehicleField::Timestep => self.timestep = value,
        }
    }

    pub fn field(&self, field: VehicleField) -> f64 {
        match field {
            VehicleField::Velocity => self.velocity,
            VehicleField::Acceleration => self.acceleration,
            VehicleField::Slope => self.slope,
            VehicleField::Mass => self.mass,
            VehicleField::Timestep => self.timestep,
        }
    }

    /// Slope with the "not yet reported" sentinel and non-finite values read
    /// as a flat road.
    pub fn grade(&self) -> f64 {
        if self.slope == UNSET || !self.slope.is_finite() {
            0.0
        } else {
            self.slope
        }
    }
}
