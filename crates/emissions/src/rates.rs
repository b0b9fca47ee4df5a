//! Emission-rate record produced once per vehicle per computation.

use std::fmt;

/// Quantities a curve set can be asked for at a given (power, velocity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pollutant {
    FuelConsumption,
    Co,
    Hc,
    Nox,
    Pm,
}

impl Pollutant {
    pub const ALL: [Pollutant; 5] = [
        Pollutant::FuelConsumption,
        Pollutant::Co,
        Pollutant::Hc,
        Pollutant::Nox,
        Pollutant::Pm,
    ];

    /// Column tag used by curve tables.
    pub fn tag(self) -> &'static str {
        match self {
            Pollutant::FuelConsumption => "FC",
            Pollutant::Co => "CO",
            Pollutant::Hc => "HC",
            Pollutant::Nox => "NOx",
            Pollutant::Pm => "PM",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Instantaneous rates for one vehicle.
///
/// Mass rates are g/s. `fuel_consumption` is g/s for combustion vehicles and
/// kWh/s for battery-electric ones. `norm_drive` and `norm_rated` are engine
/// power over the model's nominal driving and rated power.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EmissionRates {
    pub fuel_consumption: f64,
    pub norm_drive: f64,
    pub norm_rated: f64,
    pub co: f64,
    pub co2: f64,
    pub hc: f64,
    pub nox: f64,
    pub pm: f64,
}

impl EmissionRates {
    pub fn zeroed() -> Self {
        Self::default()
    }
}
