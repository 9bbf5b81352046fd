//! Run descriptor loading.
//!
//! The simulator writes a `desc.json` next to each run's data table. It holds
//! the seed, topology degree statistics, the serialized simulator config, and
//! the path of the CSV it describes. A missing or unparseable descriptor is a
//! contract violation by whoever produced the data directory, so it fails
//! loudly (exit code 2) rather than being coerced.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{DataPoint, Descriptor};
use crate::error::AppError;
use crate::io::table::load_phase_table;

/// Read and parse a descriptor file.
pub fn load_descriptor(path: &Path) -> Result<Descriptor, AppError> {
    let text = fs::read_to_string(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to read descriptor '{}': {e}", path.display()),
        )
    })?;
    serde_json::from_str(&text).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to parse descriptor '{}': {e}", path.display()),
        )
    })
}

/// Resolve the data path recorded in a descriptor.
///
/// The simulator records paths relative to its own working directory; when
/// the recorded path does not exist we retry relative to the descriptor's
/// parent directory, which is where the data actually sits in archived runs.
pub fn resolve_data_path(desc_path: &Path, desc: &Descriptor) -> PathBuf {
    if desc.data_path.exists() {
        return desc.data_path.clone();
    }
    match desc_path.parent() {
        Some(parent) => parent.join(
            desc.data_path
                .file_name()
                .unwrap_or(desc.data_path.as_os_str()),
        ),
        None => desc.data_path.clone(),
    }
}

/// Load one full run: descriptor plus its phase data table.
pub fn load_data_point(desc_path: &Path) -> Result<DataPoint, AppError> {
    let desc = load_descriptor(desc_path)?;
    let data_path = resolve_data_path(desc_path, &desc);
    let table = load_phase_table(&data_path)?;

    let mut point = DataPoint::new(
        table.temp,
        table.mag,
        table.energy,
        table.time,
        table.n,
        desc.seed,
    )
    .map_err(AppError::from)?;
    point.deg_avg = desc.deg_avg;
    point.deg_mse = desc.deg_mse;
    point.desc = Some(desc);
    Ok(point)
}
