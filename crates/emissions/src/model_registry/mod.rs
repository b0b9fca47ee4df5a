//! Model registry: the (classification, curve provider) pair bound to every
//! configured vehicle type, plus the fallback pair for everything else.
//!
//! Built once from the configuration file and never mutated afterwards, so the
//! pairs can be shared read-only by every vehicle of the same type.

mod config_file;

pub use config_file::{parse_config, ConfigRow};

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use bevy::prelude::*;

use crate::curves::{CurveProvider, CurveSource, EmissionCurves};
use crate::emission_error::ConfigError;
use crate::vehicle_class::{classification_name, VehicleClass};
use crate::vehicles::VehicleTypeId;

/// Classification bound to the curve data that models it.
#[derive(Debug)]
pub struct ModelPair {
    pub class: VehicleClass,
    pub provider: CurveProvider,
}

impl ModelPair {
    pub fn new(class: VehicleClass, provider: CurveProvider) -> Self {
        Self { class, provider }
    }

    /// Curve set for this pair's class, if the provider has one.
    pub fn curves(&self) -> Option<&dyn EmissionCurves> {
        self.provider.curves_for(&self.class)
    }
}

#[derive(Debug)]
pub struct ModelRegistry {
    default: Arc<ModelPair>,
    by_type: HashMap<VehicleTypeId, Arc<ModelPair>>,
}

impl ModelRegistry {
    pub fn new(default: ModelPair) -> Self {
        Self {
            default: Arc::new(default),
            by_type: HashMap::new(),
        }
    }

    /// Builds a registry from already constructed pairs.
    pub fn from_pairs(
        default: ModelPair,
        pairs: impl IntoIterator<Item = (VehicleTypeId, ModelPair)>,
    ) -> Result<Self, ConfigError> {
        let mut registry = Self::new(default);
        for (type_id, pair) in pairs {
            registry.insert(type_id, pair)?;
        }
        Ok(registry)
    }

    /// Reads the configuration at `path` and loads every row's curve data.
    pub fn load(path: &Path, source: &dyn CurveSource) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::io(path, &e))?;
        let config_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let rows = parse_config(&text, config_dir)?;
        let registry = Self::from_rows(&rows, source)?;
        info!(
            "Loaded emission model configuration {}: {} vehicle types plus default {}",
            path.display(),
            registry.configured_types(),
            registry.default.class
        );
        Ok(registry)
    }

    pub fn from_rows(rows: &[ConfigRow], source: &dyn CurveSource) -> Result<Self, ConfigError> {
        let mut default = None;
        let mut pairs = Vec::new();

        for row in rows {
            let class =
                VehicleClass::resolve(&row.vehicle_class, &row.powertrain, &row.emissions_class)
                    .ok_or_else(|| ConfigError::UnknownClass {
                        line: row.line,
                        name: classification_name(
                            &row.vehicle_class,
                            &row.powertrain,
                            &row.emissions_class,
                        ),
                    })?;
            let provider = CurveProvider::load(source, &class, &row.curve_base)?;
            let pair = ModelPair::new(class, provider);

            match row.type_id {
                None if default.is_some() => {
                    return Err(ConfigError::DuplicateDefault { line: row.line })
                }
                None => default = Some(pair),
                Some(type_id) => pairs.push((type_id, pair)),
            }
        }

        let default = default.ok_or(ConfigError::MissingDefault)?;
        Self::from_pairs(default, pairs)
    }

    fn insert(&mut self, type_id: VehicleTypeId, pair: ModelPair) -> Result<(), ConfigError> {
        if self.by_type.contains_key(&type_id) {
            return Err(ConfigError::DuplicateTypeId(type_id));
        }
        self.by_type.insert(type_id, Arc::new(pair));
        Ok(())
    }

    /// Pair registered for `type_id`, or the default pair. Never fails.
    pub fn resolve(&self, type_id: VehicleTypeId) -> &Arc<ModelPair> {
        self.by_type.get(&type_id).unwrap_or(&self.default)
    }

    pub fn default_pair(&self) -> &Arc<ModelPair> {
        &self.default
    }

    pub fn is_configured(&self, type_id: VehicleTypeId) -> bool {
        self.by_type.contains_key(&type_id)
    }

    /// Number of explicitly configured vehicle types (the default is not counted).
    pub fn configured_types(&self) -> usize {
        self.by_type.len()
    }
}
