/// Value every kinematic field holds until the host sets it.
pub const UNSET: f64 = -1.0;

/// Velocity (m/s) at or below which a combustion vehicle counts as idling.
pub const ZERO_SPEED_ACCURACY: f64 = 0.5;

/// Curve tables are expressed per hour; the host expects per-second rates.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

pub const GRAVITY_CONST: f64 = 9.81;

/// Air density (kg/m^3) used for aerodynamic drag.
pub const AIR_DENSITY_CONST: f64 = 1.182;

/// Carbon mass fractions used to derive CO2 from the carbon balance.
pub const CO_CARBON_FRACTION: f64 = 0.429;
pub const HC_CARBON_FRACTION: f64 = 0.866;
/// Carbon share of CO2 (12 / 44).
pub const CO2_CARBON_FRACTION: f64 = 0.273;

/// Marker in the type-id column that selects the fallback model pair.
pub const DEFAULT_ROW_MARKER: &str = "DEFAULT";

/// Keyword identifying the curve base-directory line in the configuration file.
pub const PATH_KEYWORD: &str = "PATH";

/// Emissions classes starting with this prefix are part of the classification name.
pub const EMISSIONS_CLASS_PREFIX: &str = "EU";

/// File extension of reference curve tables under the curve base directory.
pub const CURVE_FILE_EXTENSION: &str = "json";

/// Configuration file looked up in the working directory when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = "Vissim_PHEMlight.cfg";
