//! Serialization of a decoded year to NetCDF-4.
//!
//! # Layout
//!
//! ```text
//! dimensions:  month = 12, x = rows, y = cols
//! variables:   float  thickness(month, x, y)   _FillValue = NaN, units = "m"
//!              double lon(x, y)                units = "degrees_east"
//!              double lat(x, y)                units = "degrees_north"
//!              int    month(month)             1..12
//! global:      rendered metadata template + Conventions, months_present,
//!              complete, date_created
//! ```

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use grid_decoder::{month_index, AnnotatedDataset, MONTHS_PER_YEAR};
use tracing::{debug, info, warn};

use crate::error::{NetCdfError, NetCdfResult};
use crate::native::silence_hdf5_errors;

pub const THICKNESS_VAR: &str = "thickness";
pub const LON_VAR: &str = "lon";
pub const LAT_VAR: &str = "lat";
pub const MONTH_VAR: &str = "month";

pub const MONTH_DIM: &str = "month";
pub const X_DIM: &str = "x";
pub const Y_DIM: &str = "y";

/// Global attribute holding the number of populated months.
pub const MONTHS_PRESENT_ATTR: &str = "months_present";
/// Global attribute set to "false" when trailing months are NaN.
pub const COMPLETE_ATTR: &str = "complete";

/// `<output_dir>/<year>.nc`
pub fn output_path(output_dir: impl AsRef<Path>, year: i32) -> PathBuf {
    output_dir.as_ref().join(format!("{year}.nc"))
}

/// Sibling of `path` the archive is written to before being renamed into
/// place.
pub fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `dataset` to `<output_dir>/<year>.nc`, replacing any existing file.
///
/// The file is written to `<year>.nc.tmp` and renamed over the final path
/// only once complete, so a failed write never leaves a partial archive
/// at `<year>.nc` nor disturbs a previous one. Every failure, including
/// creating `output_dir`, is reported as [`NetCdfError::IoWrite`].
pub fn write_output(
    dataset: &AnnotatedDataset<'_>,
    year: i32,
    output_dir: impl AsRef<Path>,
) -> NetCdfResult<PathBuf> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir).map_err(|e| NetCdfError::io_write(output_dir, e))?;

    let path = output_path(output_dir, year);
    if path.exists() {
        debug!(path = %path.display(), "Overwriting existing output");
    }

    write_staged(&path, |staging| write_dataset(dataset, staging))?;

    info!(
        year = year,
        path = %path.display(),
        months_present = dataset.report().months_present,
        "Wrote NetCDF output"
    );

    Ok(path)
}

/// Run `write` against the staging path for `path`, then rename the result
/// into place. The staging file is removed if either step fails.
pub(crate) fn write_staged<F, E>(path: &Path, write: F) -> NetCdfResult<()>
where
    F: FnOnce(&Path) -> Result<(), E>,
    E: std::fmt::Display,
{
    let staging = staging_path(path);

    let result = write(&staging)
        .map_err(|e| NetCdfError::io_write(path, e))
        .and_then(|()| {
            std::fs::rename(&staging, path).map_err(|e| NetCdfError::io_write(path, e))
        });

    if result.is_err() && staging.exists() {
        if let Err(e) = std::fs::remove_file(&staging) {
            warn!(path = %staging.display(), error = %e, "Failed to remove staging file");
        }
    }

    result
}

fn write_dataset(dataset: &AnnotatedDataset<'_>, path: &Path) -> Result<(), netcdf::Error> {
    silence_hdf5_errors();

    let shape = dataset.shape();
    let report = dataset.report();
    let mut file = netcdf::create(path)?;

    file.add_dimension(MONTH_DIM, MONTHS_PER_YEAR)?;
    file.add_dimension(X_DIM, shape.rows)?;
    file.add_dimension(Y_DIM, shape.cols)?;

    for attr in dataset.attributes() {
        file.add_attribute(&attr.name, attr.value.as_str())?;
    }
    let created = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    file.add_attribute("Conventions", "CF-1.8")?;
    file.add_attribute(MONTHS_PRESENT_ATTR, report.months_present as i32)?;
    file.add_attribute(
        COMPLETE_ATTR,
        if report.is_complete() { "true" } else { "false" },
    )?;
    file.add_attribute("date_created", created.as_str())?;

    {
        let mut month_var = file.add_variable::<i32>(MONTH_VAR, &[MONTH_DIM])?;
        month_var.put_attribute("long_name", "month of year")?;
        month_var.put_values(&month_index(), ..)?;
    }

    {
        let lon: Vec<f64> = dataset.grids().lon().iter().copied().collect();
        let mut lon_var = file.add_variable::<f64>(LON_VAR, &[X_DIM, Y_DIM])?;
        lon_var.put_attribute("standard_name", "longitude")?;
        lon_var.put_attribute("long_name", "longitude")?;
        lon_var.put_attribute("units", "degrees_east")?;
        lon_var.put_values(&lon, ..)?;
    }

    {
        let lat: Vec<f64> = dataset.grids().lat().iter().copied().collect();
        let mut lat_var = file.add_variable::<f64>(LAT_VAR, &[X_DIM, Y_DIM])?;
        lat_var.put_attribute("standard_name", "latitude")?;
        lat_var.put_attribute("long_name", "latitude")?;
        lat_var.put_attribute("units", "degrees_north")?;
        lat_var.put_values(&lat, ..)?;
    }

    {
        let thickness = dataset.thickness().flatten();
        let mut var = file.add_variable::<f32>(THICKNESS_VAR, &[MONTH_DIM, X_DIM, Y_DIM])?;
        // Fill value must be defined before any data is written.
        var.put_attribute("_FillValue", f32::NAN)?;
        var.put_attribute("standard_name", "sea_ice_thickness")?;
        var.put_attribute("long_name", "monthly mean sea ice thickness")?;
        var.put_attribute("units", "m")?;
        var.put_attribute("coordinates", "lon lat")?;
        var.put_values(&thickness, ..)?;
    }

    Ok(())
}
