//! Optional diagnostics file for the adapter.
//!
//! The host loads the library without any logging set up. When
//! `EMISSION_MODEL_LOG` names a file, a plain-text subscriber writing to it is
//! installed on first use; otherwise log macros are no-ops.

use std::env;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use bevy::log::tracing_subscriber;
use bevy::log::Level;

/// Environment variable naming the diagnostics file.
pub const LOG_ENV: &str = "EMISSION_MODEL_LOG";

/// Installs the file subscriber if [`LOG_ENV`] is set. Returns whether one was installed.
pub fn init_from_env() -> bool {
    match env::var_os(LOG_ENV) {
        Some(path) => init_file_logging(Path::new(&path)),
        None => false,
    }
}

/// Appends log lines to `path`. Fails quietly if the file cannot be opened or
/// a global subscriber already exists.
pub fn init_file_logging(path: &Path) -> bool {
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(_) => return false,
    };
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(Level::DEBUG)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use bevy::prelude::*;

    use super::*;

    #[test]
    fn test_unopenable_file_is_not_fatal() {
        assert!(!init_file_logging(Path::new("/nonexistent/dir/emission.log")));
    }

    #[test]
    fn test_file_receives_log_lines() {
        let path = std::env::temp_dir().join(format!(
            "emission_model_log_test_{}.log",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        assert!(init_file_logging(&path));
        warn!("vehicle 12 could not be calculated");

        let text = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert!(text.contains("vehicle 12 could not be calculated"), "got: {text}");
        assert!(text.contains("WARN"), "got: {text}");
    }
}
