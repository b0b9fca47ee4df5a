//! Numeric tags of the host call protocol.
//!
//! The host addresses every value and command by a small integer. Set tags
//! carry inputs for the buffered vehicle, emission tags (801..=836) are read
//! back after a calculation, command numbers drive the vehicle lifecycle.

use emissions::{EmissionRates, VehicleField};

pub const TIMESTEP: i64 = 101;
pub const TIME: i64 = 102;
pub const TIME_OF_DAY: i64 = 103;
pub const EMI_LEVEL: i64 = 104;
pub const VEH_ID: i64 = 201;
pub const VEH_TYPE: i64 = 202;
pub const VEH_VELOCITY: i64 = 203;
pub const VEH_ACCELERATION: i64 = 204;
pub const VEH_WEIGHT: i64 = 205;
pub const SLOPE: i64 = 301;
pub const LINKTYPE: i64 = 302;

pub const BENZ: i64 = 801;
pub const CO: i64 = 802;
pub const CO2: i64 = 803;
pub const HC: i64 = 804;
pub const FUEL: i64 = 805;
pub const NOX: i64 = 808;
pub const PART: i64 = 809;
pub const PM10TOT: i64 = 823;
pub const PM25TOT: i64 = 826;
pub const NAPHT_GAS: i64 = 836;

/// Tags accepted by the set-value entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetTag {
    Timestep,
    Time,
    TimeOfDay,
    EmiLevel,
    VehicleId,
    VehicleType,
    Velocity,
    Acceleration,
    Weight,
    Slope,
    LinkType,
}

impl SetTag {
    pub fn from_raw(tag: i64) -> Option<Self> {
        match tag {
            TIMESTEP => Some(SetTag::Timestep),
            TIME => Some(SetTag::Time),
            TIME_OF_DAY => Some(SetTag::TimeOfDay),
            EMI_LEVEL => Some(SetTag::EmiLevel),
            VEH_ID => Some(SetTag::VehicleId),
            VEH_TYPE => Some(SetTag::VehicleType),
            VEH_VELOCITY => Some(SetTag::Velocity),
            VEH_ACCELERATION => Some(SetTag::Acceleration),
            VEH_WEIGHT => Some(SetTag::Weight),
            SLOPE => Some(SetTag::Slope),
            LINKTYPE => Some(SetTag::LinkType),
            _ => None,
        }
    }

    /// Vehicle field the tag updates, for tags that carry kinematics.
    pub fn vehicle_field(self) -> Option<VehicleField> {
        match self {
            SetTag::Timestep => Some(VehicleField::Timestep),
            SetTag::Velocity => Some(VehicleField::Velocity),
            SetTag::Acceleration => Some(VehicleField::Acceleration),
            SetTag::Weight => Some(VehicleField::Mass),
            SetTag::Slope => Some(VehicleField::Slope),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Init,
    CreateVehicle,
    KillVehicle,
    CalculateVehicle,
}

impl Command {
    pub fn from_raw(number: i64) -> Option<Self> {
        match number {
            0 => Some(Command::Init),
            1 => Some(Command::CreateVehicle),
            2 => Some(Command::KillVehicle),
            3 => Some(Command::CalculateVehicle),
            _ => None,
        }
    }
}

/// Value reported for an emission tag. Quantities the engine does not
/// produce read as zero; PM10 and PM2.5 totals both report particulates.
pub fn emission_value(tag: i64, rates: &EmissionRates) -> f64 {
    match tag {
        CO => rates.co,
        CO2 => rates.co2,
        HC => rates.hc,
        FUEL => rates.fuel_consumption,
        NOX => rates.nox,
        PART | PM10TOT | PM25TOT => rates.pm,
        _ => 0.0,
    }
}

pub fn is_emission_tag(tag: i64) -> bool {
    (BENZ..=NAPHT_GAS).contains(&tag)
}
