//! Vehicle registry: the mutable kinematic record of every live vehicle.
//!
//! The host creates a vehicle when it enters the network, then sets its
//! velocity, acceleration, slope, mass and timestep field by field as each
//! value becomes known within a timestep. Setting a field on an id that is
//! not live is tolerated as a no-op.

mod registry;
mod types;

pub use registry::VehicleRegistry;
pub use types::{VehicleField, VehicleId, VehicleRecord, VehicleTypeId};
