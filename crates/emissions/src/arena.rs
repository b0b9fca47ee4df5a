//! Value-type storage keyed by vehicle id, fronted by a single-slot lookup cache.
//!
//! Records live inline in a slot vector; an id index maps each live vehicle to
//! its slot and freed slots are recycled. The cache remembers the last
//! `(id, slot)` pair that was touched so the common "set a value, then read the
//! same vehicle back" pattern skips the hash lookup. The cache never owns a
//! record and is cleared whenever the id it names is removed.

use std::collections::HashMap;

use crate::vehicles::VehicleId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheSlot {
    id: VehicleId,
    slot: usize,
}

#[derive(Debug)]
pub struct KeyedArena<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
    index: HashMap<VehicleId, usize>,
    cache: Option<CacheSlot>,
}

impl<T> Default for KeyedArena<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            cache: None,
        }
    }
}

impl<T> KeyedArena<T> {
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, id: VehicleId) -> bool {
        self.index.contains_key(&id)
    }

    /// Id currently held by the cache slot, if any.
    pub fn cached_id(&self) -> Option<VehicleId> {
        self.cache.map(|c| c.id)
    }

    /// Inserts `value` under a fresh id and warms the cache.
    ///
    /// Returns `false` without touching anything if `id` is already present.
    pub fn insert_new(&mut self, id: VehicleId, value: T) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }
        let slot = self.allocate(value);
        self.index.insert(id, slot);
        self.cache = Some(CacheSlot { id, slot });
        true
    }

    /// Inserts or replaces the value for `id`, returning the previous one.
    pub fn upsert(&mut self, id: VehicleId, value: T) -> Option<T> {
        let (slot, previous) = match self.index.get(&id) {
            Some(&slot) => (slot, self.slots[slot].replace(value)),
            None => {
                let slot = self.allocate(value);
                self.index.insert(id, slot);
                (slot, None)
            }
        };
        self.cache = Some(CacheSlot { id, slot });
        previous
    }

    /// Cache-first lookup. A hit through the index re-points the cache.
    pub fn get(&mut self, id: VehicleId) -> Option<&T> {
        let slot = self.lookup(id)?;
        self.slots.get(slot)?.as_ref()
    }

    pub fn get_mut(&mut self, id: VehicleId) -> Option<&mut T> {
        let slot = self.lookup(id)?;
        self.slots.get_mut(slot)?.as_mut()
    }

    /// Lookup that leaves the cache alone, for read-only callers.
    pub fn peek(&self, id: VehicleId) -> Option<&T> {
        let slot = *self.index.get(&id)?;
        self.slots.get(slot)?.as_ref()
    }

    pub fn remove(&mut self, id: VehicleId) -> Option<T> {
        let slot = self.index.remove(&id)?;
        self.invalidate(id);
        let value = self.slots[slot].take();
        self.free.push(slot);
        value
    }

    /// Clears the cache slot if it names `id`.
    pub fn invalidate(&mut self, id: VehicleId) {
        if self.cached_id() == Some(id) {
            self.cache = None;
        }
    }

    fn lookup(&mut self, id: VehicleId) -> Option<usize> {
        if let Some(cache) = self.cache {
            if cache.id == id {
                return Some(cache.slot);
            }
        }
        let slot = *self.index.get(&id)?;
        self.cache = Some(CacheSlot { id, slot });
        Some(slot)
    }

    fn allocate(&mut self, value: T) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(value);
                slot
            }
            None => {
                self.slots.push(Some(value));
                self.slots.len() - 1
            }
        }
    }
}
