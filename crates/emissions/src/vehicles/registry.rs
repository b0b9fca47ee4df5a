use crate::arena::KeyedArena;
use crate::emission_error::EmissionError;

use super::types::{VehicleField, VehicleId, VehicleRecord, VehicleTypeId};

/// Owns the kinematic record of every live vehicle.
#[derive(Debug, Default)]
pub struct VehicleRegistry {
    records: KeyedArena<VehicleRecord>,
}

impl VehicleRegistry {
    /// Registers a new vehicle with all kinematic fields unset.
    pub fn create(&mut self, id: VehicleId, type_id: VehicleTypeId) -> Result<(), EmissionError> {
        if self.records.insert_new(id, VehicleRecord::new(type_id)) {
            Ok(())
        } else {
            Err(EmissionError::DuplicateId(id))
        }
    }

    /// Sets one field. Unknown ids are ignored; returns whether a vehicle was updated.
    pub fn update(&mut self, id: VehicleId, field: VehicleField, value: f64) -> bool {
        match self.records.get_mut(id) {
            Some(record) => {
                record.set(field, value);
                true
            }
            None => false,
        }
    }

    pub fn get(&mut self, id: VehicleId) -> Result<&VehicleRecord, EmissionError> {
        self.records.get(id).ok_or(EmissionError::NotFound(id))
    }

    /// Read-only lookup that does not move the cache slot.
    pub fn peek(&self, id: VehicleId) -> Option<&VehicleRecord> {
        self.records.peek(id)
    }

    pub fn destroy(&mut self, id: VehicleId) -> Result<VehicleRecord, EmissionError> {
        self.records.remove(id).ok_or(EmissionError::NotFound(id))
    }

    pub fn contains(&self, id: VehicleId) -> bool {
        self.records.contains(id)
    }

    pub fn cached_id(&self) -> Option<VehicleId> {
        self.records.cached_id()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
