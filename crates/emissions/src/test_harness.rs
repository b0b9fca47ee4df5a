//! # Fixtures for emission tests and benches
//!
//! Curve tables come from the sample data shipped in `data/curves`, so unit
//! tests, integration tests and benches all exercise the same numbers.
//! [`ConfigFixture`] writes a configuration file into a scratch directory that
//! points at that data and is removed on drop.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::curves::{CurveProvider, CurveTable};
use crate::model_registry::{ModelPair, ModelRegistry};
use crate::vehicle_class::VehicleClass;
use crate::vehicles::{VehicleField, VehicleRecord, VehicleTypeId};

pub const PC_ICE_EURO6_JSON: &str = include_str!("../../../data/curves/PC_ICE_EURO6.json");
pub const PC_BEV_JSON: &str = include_str!("../../../data/curves/PC_BEV.json");
pub const HDV_D_EU6_JSON: &str = include_str!("../../../data/curves/HDV_D_EU6.json");

/// Directory holding the sample curve tables.
pub fn sample_curve_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/curves")
}

/// Sample configuration shipped with the repository.
pub fn sample_config_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/Vissim_PHEMlight.cfg")
}

pub fn passenger_car() -> VehicleClass {
    VehicleClass::resolve("PC", "ICE", "EURO6").expect("PC_ICE_EURO6 resolves")
}

pub fn electric_car() -> VehicleClass {
    VehicleClass::resolve("PC", "BEV", "ZEV").expect("PC_BEV resolves")
}

pub fn heavy_duty() -> VehicleClass {
    VehicleClass::resolve("HDV", "D", "EU6").expect("HDV_D_EU6 resolves")
}

pub fn curve_table(json: &str, class: &VehicleClass) -> CurveTable {
    CurveTable::from_json(json, class).expect("sample curve table is valid")
}

/// Model pair whose provider holds the given curve table.
pub fn model_pair(class: VehicleClass, json: &str) -> ModelPair {
    let table = curve_table(json, &class);
    let provider = CurveProvider::with_curves(class.name(), Arc::new(table));
    ModelPair::new(class, provider)
}

/// Registry with the passenger car as default, type 630 electric and type 200 heavy duty.
pub fn sample_registry() -> ModelRegistry {
    ModelRegistry::from_pairs(
        model_pair(passenger_car(), PC_ICE_EURO6_JSON),
        [
            (
                VehicleTypeId(630),
                model_pair(electric_car(), PC_BEV_JSON),
            ),
            (VehicleTypeId(200), model_pair(heavy_duty(), HDV_D_EU6_JSON)),
        ],
    )
    .expect("sample registry has unique types")
}

/// Vehicle record with velocity, acceleration and slope set.
pub fn moving_vehicle(
    type_id: i64,
    velocity: f64,
    acceleration: f64,
    slope: f64,
) -> VehicleRecord {
    let mut record = VehicleRecord::new(VehicleTypeId(type_id));
    record.set(VehicleField::Velocity, velocity);
    record.set(VehicleField::Acceleration, acceleration);
    record.set(VehicleField::Slope, slope);
    record.set(VehicleField::Timestep, 1.0);
    record
}

/// Scratch directory with a configuration file, removed on drop.
pub struct ConfigFixture {
    dir: PathBuf,
}

impl ConfigFixture {
    /// Writes `body` as the configuration. `{curves}` is replaced with the
    /// absolute sample curve directory.
    pub fn new(name: &str, body: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "emissions_config_test_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let curves = sample_curve_dir();
        let text = body.replace("{curves}", &curves.to_string_lossy());
        fs::write(dir.join("emission.cfg"), text).unwrap();
        Self { dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join("emission.cfg")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Drop for ConfigFixture {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}
