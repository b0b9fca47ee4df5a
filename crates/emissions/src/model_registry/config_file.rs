//! Parser for the line-oriented vehicle-type configuration file.
//!
//! ```text
//! # comment
//! PATH = C:\PHEMlight\curves\
//! DEFAULT;PC;ICE;EURO6
//! 100;HDV;D;EU6
//! ```

use std::path::{Path, PathBuf};

use crate::config::{DEFAULT_ROW_MARKER, PATH_KEYWORD};
use crate::emission_error::ConfigError;
use crate::vehicles::VehicleTypeId;

/// One `typeId;vehicleClass;powertrain;emissionsClass` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRow {
    /// 1-based line number, for error messages.
    pub line: usize,
    /// `None` for the `DEFAULT` row.
    pub type_id: Option<VehicleTypeId>,
    pub vehicle_class: String,
    pub powertrain: String,
    pub emissions_class: String,
    /// Curve directory in effect when the row was read.
    pub curve_base: PathBuf,
}

/// Parses configuration text. Relative `PATH` values are resolved against `config_dir`.
pub fn parse_config(text: &str, config_dir: &Path) -> Result<Vec<ConfigRow>, ConfigError> {
    let mut curve_base = config_dir.to_path_buf();
    let mut rows = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.trim_end_matches('\r');
        if content.trim().is_empty() || content.starts_with('#') {
            continue;
        }
        if content.contains(PATH_KEYWORD) {
            curve_base = parse_path_line(content, config_dir);
            continue;
        }
        rows.push(parse_row(content, line, &curve_base)?);
    }
    Ok(rows)
}

fn parse_path_line(content: &str, config_dir: &Path) -> PathBuf {
    let value = match content.find('=') {
        Some(pos) => &content[pos + 1..],
        None => "",
    };
    let value = value.trim().trim_end_matches(['/', '\\']);
    if value.is_empty() {
        return config_dir.to_path_buf();
    }
    let path = PathBuf::from(value);
    if path.is_absolute() {
        path
    } else {
        config_dir.join(path)
    }
}

fn parse_row(content: &str, line: usize, curve_base: &Path) -> Result<ConfigRow, ConfigError> {
    let cells: Vec<&str> = content.split(';').map(str::trim).collect();
    if cells.len() < 4 {
        return Err(ConfigError::MalformedRow {
            line,
            reason: format!("expected 4 cells, found {}", cells.len()),
        });
    }

    let type_id = if cells[0] == DEFAULT_ROW_MARKER {
        None
    } else {
        let id = cells[0]
            .parse::<i64>()
            .map_err(|_| ConfigError::MalformedRow {
                line,
                reason: format!("vehicle type '{}' is neither an integer nor DEFAULT", cells[0]),
            })?;
        Some(VehicleTypeId(id))
    };

    Ok(ConfigRow {
        line,
        type_id,
        vehicle_class: cells[1].to_string(),
        powertrain: cells[2].to_string(),
        emissions_class: cells[3].to_string(),
        curve_base: curve_base.to_path_buf(),
    })
}
