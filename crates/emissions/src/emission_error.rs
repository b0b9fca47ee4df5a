// ---------------------------------------------------------------------------
// EmissionError / ConfigError: typed failures of the state manager
// ---------------------------------------------------------------------------

use std::fmt;
use std::path::PathBuf;

use crate::rates::Pollutant;
use crate::vehicles::{VehicleId, VehicleTypeId};

/// Errors raised while loading the per-vehicle-type model configuration.
///
/// `Clone` so the outcome of the once-only lazy load can be handed to every
/// caller that asks for the model registry afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The configuration file could not be opened or read.
    Io {
        path: PathBuf,
        kind: std::io::ErrorKind,
        message: String,
    },
    /// A row did not have the `typeId;vehicleClass;powertrain;emissionsClass` shape.
    MalformedRow { line: usize, reason: String },
    /// A row's classification string did not resolve to a known vehicle class.
    UnknownClass { line: usize, name: String },
    /// The curve provider could not load curve data for a resolved class.
    MissingCurves {
        class: String,
        path: PathBuf,
        reason: String,
    },
    /// The same non-default vehicle type id appeared on two rows.
    DuplicateTypeId(VehicleTypeId),
    /// More than one `DEFAULT` row.
    DuplicateDefault { line: usize },
    /// No `DEFAULT` row, so unknown vehicle types would have nothing to resolve to.
    MissingDefault,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io {
                path,
                kind,
                message,
            } => write!(
                f,
                "Cannot read configuration {}: {message} ({kind:?})",
                path.display()
            ),
            ConfigError::MalformedRow { line, reason } => {
                write!(f, "Malformed configuration row at line {line}: {reason}")
            }
            ConfigError::UnknownClass { line, name } => {
                write!(f, "Unknown vehicle class '{name}' at line {line}")
            }
            ConfigError::MissingCurves {
                class,
                path,
                reason,
            } => write!(
                f,
                "No curve data for class '{class}' at {}: {reason}",
                path.display()
            ),
            ConfigError::DuplicateTypeId(id) => {
                write!(f, "Vehicle type {id} is configured more than once")
            }
            ConfigError::DuplicateDefault { line } => {
                write!(f, "Second DEFAULT row at line {line}")
            }
            ConfigError::MissingDefault => write!(f, "Configuration has no DEFAULT row"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, e: &std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

/// Reasons a curve table is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveTableError {
    /// The JSON did not match the curve table schema.
    Parse(String),
    /// Rated or driving power is zero or negative.
    NonPositivePower,
    /// Vehicle mass plus loading is zero or negative.
    NonPositiveMass,
    EmptyPowerPattern,
    /// Normalized power sample points are not strictly ascending.
    UnsortedPowerPattern,
    /// The full-load curve is empty or not sorted by velocity.
    InvalidFullLoad,
    /// A pollutant column does not have one value per power sample point.
    ColumnLength {
        pollutant: Pollutant,
        found: usize,
        expected: usize,
    },
}

impl fmt::Display for CurveTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveTableError::Parse(msg) => write!(f, "Invalid curve table JSON: {msg}"),
            CurveTableError::NonPositivePower => {
                write!(f, "rated_power and driving_power must be positive")
            }
            CurveTableError::NonPositiveMass => write!(f, "vehicle mass must be positive"),
            CurveTableError::EmptyPowerPattern => write!(f, "power_pattern is empty"),
            CurveTableError::UnsortedPowerPattern => {
                write!(f, "power_pattern must be strictly ascending")
            }
            CurveTableError::InvalidFullLoad => {
                write!(f, "full_load must be non-empty and sorted by velocity")
            }
            CurveTableError::ColumnLength {
                pollutant,
                found,
                expected,
            } => write!(
                f,
                "{pollutant} has {found} values for {expected} power points"
            ),
        }
    }
}

impl std::error::Error for CurveTableError {}

impl From<serde_json::Error> for CurveTableError {
    fn from(e: serde_json::Error) -> Self {
        CurveTableError::Parse(e.to_string())
    }
}

/// Errors surfaced by the vehicle/emission state manager.
///
/// The host adapter collapses every variant to a boolean failure; the variants
/// exist so embedders and tests can tell the cases apart.
#[derive(Debug, Clone, PartialEq)]
pub enum EmissionError {
    /// No vehicle (or no emission record) for this id.
    NotFound(VehicleId),
    /// A vehicle with this id is already live.
    DuplicateId(VehicleId),
    /// Loading the model configuration failed.
    Config(ConfigError),
    /// The resolved model pair has no curve set for its class.
    ModelUnavailable { class: String },
}

impl fmt::Display for EmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmissionError::NotFound(id) => write!(f, "Vehicle {id} not found"),
            EmissionError::DuplicateId(id) => write!(f, "Vehicle {id} already exists"),
            EmissionError::Config(e) => write!(f, "Configuration error: {e}"),
            EmissionError::ModelUnavailable { class } => {
                write!(f, "No curve set available for class '{class}'")
            }
        }
    }
}

impl std::error::Error for EmissionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EmissionError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for EmissionError {
    fn from(e: ConfigError) -> Self {
        EmissionError::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emission_error_display_not_found() {
        let err = EmissionError::NotFound(VehicleId(7));
        let msg = format!("{err}");
        assert!(msg.contains("Vehicle 7"), "got: {msg}");
        assert!(msg.contains("not found"), "got: {msg}");
    }

    #[test]
    fn test_config_error_display_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ConfigError::io("missing.cfg", &io);
        let msg = format!("{err}");
        assert!(msg.contains("missing.cfg"), "got: {msg}");
        assert!(msg.contains("no such file"), "got: {msg}");
    }

    #[test]
    fn test_config_error_display_duplicate_type() {
        let err = ConfigError::DuplicateTypeId(VehicleTypeId(12));
        let msg = format!("{err}");
        assert!(msg.contains("12"), "got: {msg}");
    }

    #[test]
    fn test_curve_table_error_display_column_length() {
        let err = CurveTableError::ColumnLength {
            pollutant: Pollutant::Nox,
            found: 3,
            expected: 9,
        };
        let msg = format!("{err}");
        assert!(msg.contains("NOx"), "got: {msg}");
        assert!(msg.contains("3 values for 9"), "got: {msg}");
    }

    #[test]
    fn test_curve_table_error_from_json() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: CurveTableError = json_err.into();
        assert!(matches!(err, CurveTableError::Parse(_)), "got: {err:?}");
    }

    #[test]
    fn test_emission_error_from_config() {
        let err: EmissionError = ConfigError::MissingDefault.into();
        assert!(matches!(err, EmissionError::Config(ConfigError::MissingDefault)));
    }

    #[test]
    fn test_emission_error_source_is_config() {
        let err = EmissionError::Config(ConfigError::MissingDefault);
        let source = std::error::Error::source(&err);
        assert!(source.is_some());
        assert!(std::error::Error::source(&EmissionError::NotFound(VehicleId(1))).is_none());
    }
}
