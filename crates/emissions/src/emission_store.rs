//! Last computed emission record per vehicle, with a single-slot cache.

use crate::arena::KeyedArena;
use crate::emission_error::EmissionError;
use crate::rates::EmissionRates;
use crate::vehicles::VehicleId;

#[derive(Debug, Default)]
pub struct EmissionStore {
    records: KeyedArena<EmissionRates>,
}

impl EmissionStore {
    /// Replaces any existing record for `id` and points the cache at it.
    pub fn put(&mut self, id: VehicleId, rates: EmissionRates) {
        self.records.upsert(id, rates);
    }

    pub fn get(&mut self, id: VehicleId) -> Result<&EmissionRates, EmissionError> {
        self.records.get(id).ok_or(EmissionError::NotFound(id))
    }

    pub fn peek(&self, id: VehicleId) -> Option<&EmissionRates> {
        self.records.peek(id)
    }

    pub fn remove(&mut self, id: VehicleId) -> Option<EmissionRates> {
        self.records.remove(id)
    }

    pub fn invalidate(&mut self, id: VehicleId) {
        self.records.invalidate(id);
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

#[cfg(test)]
mod tests {
    use super::*;

    fn rates(fc: f64) -> EmissionRates {
        EmissionRates {
            fuel_consumption: fc,
            ..EmissionRates::zeroed()
        }
    }

    #[test]
    fn test_put_replaces_previous_record() {
        let mut store = EmissionStore::default();
        store.put(VehicleId(1), rates(1.0));
        store.put(VehicleId(1), rates(2.0));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(VehicleId(1)).unwrap().fuel_consumption, 2.0);
    }

    #[test]
    fn test_put_warms_cache() {
        let mut store = EmissionStore::default();
        store.put(VehicleId(1), rates(1.0));
        store.put(VehicleId(2), rates(1.0));
        assert_eq!(store.cached_id(), Some(VehicleId(2)));
        store.put(VehicleId(1), rates(3.0));
        assert_eq!(store.cached_id(), Some(VehicleId(1)));
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let mut store = EmissionStore::default();
        assert_eq!(
            store.get(VehicleId(3)).unwrap_err(),
            EmissionError::NotFound(VehicleId(3))
        );
    }

    #[test]
    fn test_invalidate_only_clears_matching_id() {
        let mut store = EmissionStore::default();
        store.put(VehicleId(1), rates(1.0));
        store.invalidate(VehicleId(2));
        assert_eq!(store.cached_id(), Some(VehicleId(1)));
        store.invalidate(VehicleId(1));
        assert_eq!(store.cached_id(), None);
        // the record itself survives invalidation
        assert!(store.contains(VehicleId(1)));
        assert_eq!(store.get(VehicleId(1)).unwrap().fuel_consumption, 1.0);
    }

    #[test]
    fn test_remove_drops_record_and_cache() {
        let mut store = EmissionStore::default();
        store.put(VehicleId(1), rates(1.0));
        assert_eq!(store.remove(VehicleId(1)), Some(rates(1.0)));
        assert!(store.is_empty());
        assert_eq!(store.cached_id(), None);
        assert_eq!(store.remove(VehicleId(1)), None);
    }
}
