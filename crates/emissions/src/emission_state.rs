//! The vehicle/emission state manager.
//!
//! Owns the vehicle registry, the emission store and the lazily loaded model
//! registry. Every operation either completes fully or leaves the registries
//! untouched. Callers on several threads must put the whole state behind one
//! lock: the cache slots and the maps are updated together.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use bevy::prelude::*;

use crate::config::DEFAULT_CONFIG_FILE;
use crate::curves::{CurveSource, JsonCurveSource};
use crate::emission_error::{ConfigError, EmissionError};
use crate::emission_store::EmissionStore;
use crate::engine;
use crate::model_registry::ModelRegistry;
use crate::rates::EmissionRates;
use crate::request::{CreateVehicle, UpdateVehicle};
use crate::vehicles::{VehicleId, VehicleRecord, VehicleRegistry};

#[derive(Resource)]
pub struct EmissionState {
    vehicles: VehicleRegistry,
    emissions: EmissionStore,
    config_path: PathBuf,
    curve_source: Box<dyn CurveSource>,
    /// Filled exactly once, on the first computation; failures are kept too.
    models: OnceLock<Result<ModelRegistry, ConfigError>>,
}

impl Default for EmissionState {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_FILE)
    }
}

impl EmissionState {
    /// State that reads JSON curve tables for the classes in `config_path`.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self::with_curve_source(config_path, JsonCurveSource)
    }

    pub fn with_curve_source(
        config_path: impl Into<PathBuf>,
        curve_source: impl CurveSource + 'static,
    ) -> Self {
        Self {
            vehicles: VehicleRegistry::default(),
            emissions: EmissionStore::default(),
            config_path: config_path.into(),
            curve_source: Box::new(curve_source),
            models: OnceLock::new(),
        }
    }

    /// State with an already built model registry; no configuration is read.
    pub fn with_models(models: ModelRegistry) -> Self {
        let state = Self::new(PathBuf::new());
        // freshly created, so the cell is empty
        let _ = state.models.set(Ok(models));
        state
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn create(&mut self, request: CreateVehicle) -> Result<(), EmissionError> {
        self.vehicles.create(request.id, request.type_id)
    }

    /// Applies one field update. Unknown ids are ignored; returns whether a vehicle changed.
    pub fn update(&mut self, request: UpdateVehicle) -> bool {
        self.vehicles.update(request.id, request.field, request.value)
    }

    /// Computes and stores fresh emission rates for `id`.
    ///
    /// The first call loads the model configuration.
    pub fn compute(&mut self, id: VehicleId) -> Result<&EmissionRates, EmissionError> {
        let models = load_models(&self.models, &self.config_path, self.curve_source.as_ref())?;
        let vehicle = self.vehicles.get(id)?;
        let pair = models.resolve(vehicle.type_id());
        let rates = engine::compute_emissions(vehicle, pair)?;
        self.emissions.put(id, rates);
        self.emissions.get(id)
    }

    /// Removes the vehicle and, if one was computed, its emission record.
    pub fn destroy(&mut self, id: VehicleId) -> Result<(), EmissionError> {
        self.vehicles.destroy(id)?;
        self.emissions.remove(id);
        Ok(())
    }

    pub fn vehicle(&mut self, id: VehicleId) -> Result<&VehicleRecord, EmissionError> {
        self.vehicles.get(id)
    }

    pub fn emission(&mut self, id: VehicleId) -> Result<&EmissionRates, EmissionError> {
        self.emissions.get(id)
    }

    /// Model registry, loading it first if nothing has been computed yet.
    pub fn models(&self) -> Result<&ModelRegistry, EmissionError> {
        load_models(&self.models, &self.config_path, self.curve_source.as_ref())
    }

    pub fn models_loaded(&self) -> bool {
        self.models.get().is_some()
    }

    pub fn vehicles(&self) -> &VehicleRegistry {
        &self.vehicles
    }

    pub fn emissions(&self) -> &EmissionStore {
        &self.emissions
    }
}

fn load_models<'a>(
    cell: &'a OnceLock<Result<ModelRegistry, ConfigError>>,
    config_path: &Path,
    source: &dyn CurveSource,
) -> Result<&'a ModelRegistry, EmissionError> {
    let loaded = cell.get_or_init(|| ModelRegistry::load(config_path, source));
    match loaded {
        Ok(models) => Ok(models),
        Err(e) => Err(EmissionError::Config(e.clone())),
    }
}
