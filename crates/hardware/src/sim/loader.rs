//! Workload Loader.
//!
//! A workload is a pair of hex images sharing one path prefix:
//! 1. **`<case>.exe`:** instruction memory image, required.
//! 2. **`<case>.data`:** data memory image, optional; data memory stays zeroed without it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::common::error::SimError;
use crate::config::Config;
use crate::soc::System;

/// Extension of the instruction image.
pub const PROGRAM_EXT: &str = "exe";

/// Extension of the data image.
pub const DATA_EXT: &str = "data";

/// Appends `.ext` to a case prefix without replacing any existing extension.
fn with_suffix(case: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(case.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Builds a `System` with both memories loaded for one test case.
///
/// # Arguments
///
/// * `config` - Simulator configuration (memory depth).
/// * `case` - Path prefix; `.exe` and `.data` are appended.
///
/// # Returns
///
/// The loaded system, or the first image error.
pub fn load_case(config: &Config, case: &Path) -> Result<System, SimError> {
    let mut system = System::new(config);

    let program = with_suffix(case, PROGRAM_EXT);
    system.load_program_file(&program)?;

    let data = with_suffix(case, DATA_EXT);
    if data.exists() {
        system.load_data_file(&data)?;
    } else {
        tracing::debug!("LOADER: no data image at {}", data.display());
    }

    tracing::info!("LOADER: loaded case {}", case.display());
    Ok(system)
}
