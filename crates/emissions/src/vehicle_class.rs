//! Classification descriptor: vehicle segment, powertrain and emissions class.
//!
//! A configuration row names the three parts separately. They are joined into
//! the classification name `segment_powertrain`, suffixed with
//! `_emissionsClass` when the emissions class starts with `EU`; the name is the
//! key a curve provider uses to find the curve set.

use std::fmt;

use crate::config::EMISSIONS_CLASS_PREFIX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleSegment {
    PassengerCar,
    LightCommercial,
    HeavyDuty,
    UrbanBus,
    Coach,
    Motorcycle,
}

impl VehicleSegment {
    pub fn parse(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "PC" => Some(VehicleSegment::PassengerCar),
            "LCV" => Some(VehicleSegment::LightCommercial),
            "HDV" => Some(VehicleSegment::HeavyDuty),
            "UBUS" | "BUS" => Some(VehicleSegment::UrbanBus),
            "COACH" => Some(VehicleSegment::Coach),
            "MC" => Some(VehicleSegment::Motorcycle),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Powertrain {
    Gasoline,
    Diesel,
    /// Generic internal combustion engine without a fuel split.
    Combustion,
    Cng,
    Lpg,
    Hybrid,
    PlugInHybrid,
    BatteryElectric,
}

impl Powertrain {
    pub fn parse(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "G" => Some(Powertrain::Gasoline),
            "D" => Some(Powertrain::Diesel),
            "ICE" => Some(Powertrain::Combustion),
            "CNG" => Some(Powertrain::Cng),
            "LPG" => Some(Powertrain::Lpg),
            "HEV" => Some(Powertrain::Hybrid),
            "PHEV" => Some(Powertrain::PlugInHybrid),
            "BEV" => Some(Powertrain::BatteryElectric),
            _ => None,
        }
    }

    pub fn is_electric(self) -> bool {
        self == Powertrain::BatteryElectric
    }

    /// Carbon mass fraction of the fuel, used when a curve set does not give one.
    pub fn fuel_carbon_fraction(self) -> f64 {
        match self {
            Powertrain::Gasoline
            | Powertrain::Combustion
            | Powertrain::Hybrid
            | Powertrain::PlugInHybrid => 0.865,
            Powertrain::Diesel => 0.863,
            Powertrain::Cng => 0.693,
            Powertrain::Lpg => 0.825,
            Powertrain::BatteryElectric => 0.0,
        }
    }
}

/// Builds the classification name for a configuration row.
pub fn classification_name(segment: &str, powertrain: &str, emissions_class: &str) -> String {
    if emissions_class.starts_with(EMISSIONS_CLASS_PREFIX) {
        format!("{segment}_{powertrain}_{emissions_class}")
    } else {
        format!("{segment}_{powertrain}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VehicleClass {
    pub segment: VehicleSegment,
    pub powertrain: Powertrain,
    /// Kept even when it does not take part in the name.
    pub emissions_class: String,
    name: String,
}

impl VehicleClass {
    /// Resolves a row's three classification cells, or `None` if the segment or
    /// powertrain is not recognised.
    pub fn resolve(segment: &str, powertrain: &str, emissions_class: &str) -> Option<Self> {
        Some(Self {
            segment: VehicleSegment::parse(segment)?,
            powertrain: Powertrain::parse(powertrain)?,
            emissions_class: emissions_class.to_string(),
            name: classification_name(segment, powertrain, emissions_class),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
