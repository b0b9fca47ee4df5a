//! Explicit operands for the state manager's mutating calls.
//!
//! The host stages values one at a time; the adapter gathers them into these
//! requests so the core never reads ambient "current vehicle" state.

use crate::vehicles::{VehicleField, VehicleId, VehicleTypeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateVehicle {
    pub id: VehicleId,
    pub type_id: VehicleTypeId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateVehicle {
    pub id: VehicleId,
    pub field: VehicleField,
    pub value: f64,
}
