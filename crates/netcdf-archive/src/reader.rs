//! Reading archive files back.

use std::collections::BTreeMap;
use std::path::Path;

use grid_decoder::{GridShape, MONTHS_PER_YEAR};
use ndarray::{Array2, Array3, Axis};
use tracing::debug;

use crate::error::{NetCdfError, NetCdfResult};
use crate::native::{attribute_text, get_string_attr, silence_hdf5_errors};
use crate::writer::{
    COMPLETE_ATTR, LAT_VAR, LON_VAR, MONTHS_PRESENT_ATTR, MONTH_VAR, THICKNESS_VAR,
};

/// Contents of an archive file.
#[derive(Debug, Clone)]
pub struct StoredDataset {
    pub thickness: Array3<f32>,
    pub lon: Array2<f64>,
    pub lat: Array2<f64>,
    pub months: Vec<i32>,
    pub thickness_units: Option<String>,
    /// Global attributes rendered as text.
    pub attributes: BTreeMap<String, String>,
}

impl StoredDataset {
    pub fn shape(&self) -> GridShape {
        let (rows, cols) = self.lon.dim();
        GridShape::new(rows, cols)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn months_present(&self) -> Option<usize> {
        self.attribute(MONTHS_PRESENT_ATTR)?.parse().ok()
    }

    pub fn is_complete(&self) -> bool {
        self.attribute(COMPLETE_ATTR) == Some("true")
    }
}

/// One month of thickness with its coordinates.
#[derive(Debug, Clone)]
pub struct MonthSlice {
    pub month: usize,
    pub thickness: Array2<f32>,
    pub lon: Array2<f64>,
    pub lat: Array2<f64>,
}

/// Read every variable and global attribute of an archive file.
pub fn read_dataset(path: impl AsRef<Path>) -> NetCdfResult<StoredDataset> {
    let path = path.as_ref();
    silence_hdf5_errors();

    let file = netcdf::open(path).map_err(|e| NetCdfError::open_failed(path, e))?;

    let thickness_var = file
        .variable(THICKNESS_VAR)
        .ok_or_else(|| NetCdfError::MissingData(format!("{THICKNESS_VAR} variable")))?;
    let dims: Vec<usize> = thickness_var.dimensions().iter().map(|d| d.len()).collect();
    let (rows, cols) = match dims.as_slice() {
        [months, rows, cols] if *months == MONTHS_PER_YEAR => (*rows, *cols),
        other => {
            return Err(NetCdfError::InvalidFormat(format!(
                "{THICKNESS_VAR} has dimensions {other:?}, expected [12, rows, cols]"
            )))
        }
    };
    let shape = GridShape::new(rows, cols);

    let raw: Vec<f32> = thickness_var.get_values(..)?;
    let thickness = Array3::from_shape_vec((MONTHS_PER_YEAR, rows, cols), raw)
        .map_err(|e| NetCdfError::InvalidFormat(format!("{THICKNESS_VAR}: {e}")))?;
    let thickness_units = get_string_attr(&thickness_var, "units");

    let lon = read_coordinate(&file, LON_VAR, shape)?;
    let lat = read_coordinate(&file, LAT_VAR, shape)?;

    let months: Vec<i32> = file
        .variable(MONTH_VAR)
        .ok_or_else(|| NetCdfError::MissingData(format!("{MONTH_VAR} variable")))?
        .get_values(..)?;

    let mut attributes = BTreeMap::new();
    for attr in file.attributes() {
        if let Some(text) = attr.value().ok().and_then(attribute_text) {
            attributes.insert(attr.name().to_string(), text);
        }
    }

    debug!(path = %path.display(), shape = %shape, "Read NetCDF archive");

    Ok(StoredDataset {
        thickness,
        lon,
        lat,
        months,
        thickness_units,
        attributes,
    })
}

/// Read a single 1-based month from an archive file.
pub fn read_month(path: impl AsRef<Path>, month: usize) -> NetCdfResult<MonthSlice> {
    if !(1..=MONTHS_PER_YEAR).contains(&month) {
        return Err(NetCdfError::InvalidMonth(month));
    }
    let dataset = read_dataset(path)?;

    let idx = dataset
        .months
        .iter()
        .position(|&m| m as usize == month)
        .ok_or_else(|| NetCdfError::MissingData(format!("month {month} coordinate")))?;

    Ok(MonthSlice {
        month,
        thickness: dataset.thickness.index_axis(Axis(0), idx).to_owned(),
        lon: dataset.lon,
        lat: dataset.lat,
    })
}

fn read_coordinate(file: &netcdf::File, name: &str, shape: GridShape) -> NetCdfResult<Array2<f64>> {
    let var = file
        .variable(name)
        .ok_or_else(|| NetCdfError::MissingData(format!("{name} variable")))?;
    let values: Vec<f64> = var.get_values(..)?;
    Array2::from_shape_vec(shape.dim(), values)
        .map_err(|e| NetCdfError::InvalidFormat(format!("{name}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_month_rejects_out_of_range() {
        let err = read_month("/nonexistent/1993.nc", 0).unwrap_err();
        assert!(matches!(err, NetCdfError::InvalidMonth(0)));

        let err = read_month("/nonexistent/1993.nc", 13).unwrap_err();
        assert!(matches!(err, NetCdfError::InvalidMonth(13)));
    }

    #[test]
    fn test_read_dataset_missing_file() {
        let err = read_dataset("/nonexistent/1993.nc").unwrap_err();
        assert!(matches!(err, NetCdfError::OpenFailed { .. }));
    }
}
