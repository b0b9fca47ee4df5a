//! # Emission model DLL
//!
//! C entry points the traffic simulator calls once it has loaded this library
//! as its emission model:
//!
//! ```c
//! int EmissionModelSetValue(long type, long index1, long index2,
//!                           long long_value, double double_value, char *string_value);
//! int EmissionModelGetValue(long type, long index1, long index2,
//!                           long *long_value, double *double_value, char **string_value);
//! int EmissionModelExecuteCommand(long number);
//! ```
//!
//! Each returns 1 on success and 0 on failure. A typical step for one vehicle:
//! set `VEH_ID`, set velocity/acceleration/slope/timestep, execute
//! `CALCULATE_VEHICLE`, then read the emission tags.
//!
//! ## Environment
//!
//! - `EMISSION_MODEL_CONFIG`: configuration file (default `Vissim_PHEMlight.cfg`
//!   in the working directory)
//! - `EMISSION_MODEL_LOG`: append diagnostics to this file

use std::ffi::{c_char, c_int, c_long};
use std::sync::{Mutex, OnceLock, PoisonError};

pub mod adapter;
pub mod logging;
pub mod tags;

pub use adapter::{HostAdapter, ValueBuffer};

static ADAPTER: OnceLock<Mutex<HostAdapter>> = OnceLock::new();

/// Runs `f` on the process-wide adapter, creating it on first use.
fn with_adapter<R>(f: impl FnOnce(&mut HostAdapter) -> R) -> R {
    let adapter = ADAPTER.get_or_init(|| {
        logging::init_from_env();
        Mutex::new(HostAdapter::from_env())
    });
    let mut guard = adapter.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

fn status(ok: bool) -> c_int {
    c_int::from(ok)
}

// =============================================================================
// Entry points
// =============================================================================

/// Stages a value for the current vehicle. Strings are not used by any tag.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn EmissionModelSetValue(
    type_: c_long,
    _index1: c_long,
    _index2: c_long,
    long_value: c_long,
    double_value: f64,
    _string_value: *mut c_char,
) -> c_int {
    status(with_adapter(|adapter| {
        adapter.set_value(i64::from(type_), i64::from(long_value), double_value)
    }))
}

/// Writes the requested emission quantity of the current vehicle to
/// `double_value`. Always succeeds; quantities without a value read as 0.
///
/// # Safety
///
/// `double_value` must be null or point to writable memory for one `double`.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn EmissionModelGetValue(
    type_: c_long,
    _index1: c_long,
    _index2: c_long,
    _long_value: *mut c_long,
    double_value: *mut f64,
    _string_value: *mut *mut c_char,
) -> c_int {
    let value = with_adapter(|adapter| adapter.get_value(i64::from(type_)));
    if !double_value.is_null() {
        *double_value = value;
    }
    status(true)
}

/// Executes a lifecycle command on the current vehicle.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn EmissionModelExecuteCommand(number: c_long) -> c_int {
    status(with_adapter(|adapter| {
        adapter.execute_command(i64::from(number))
    }))
}
