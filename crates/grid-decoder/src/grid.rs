//! Longitude/latitude coordinate grids.
//!
//! The grid-definition files are plain whitespace-delimited tables. Line
//! breaks carry no meaning: every number is read in file order and the flat
//! sequence is reshaped row-major onto the native grid.

use std::path::Path;

use ndarray::Array2;
use tracing::{debug, info};

use crate::error::{read_input, GridError, Result};
use crate::shape::GridShape;

/// Longitude and latitude of every native grid cell.
///
/// Loaded once per run and shared read-only by every decoded year.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateGrids {
    lon: Array2<f64>,
    lat: Array2<f64>,
}

impl CoordinateGrids {
    /// Pair two grids, which must have the same shape.
    pub fn new(lon: Array2<f64>, lat: Array2<f64>) -> Result<Self> {
        if lon.dim() != lat.dim() {
            return Err(GridError::shape_mismatch(
                "latitude grid vs longitude grid",
                format!("{:?}", lon.dim()),
                format!("{:?}", lat.dim()),
            ));
        }
        Ok(Self { lon, lat })
    }

    /// Build grids from flat row-major values.
    pub fn from_flat(shape: GridShape, lon: Vec<f64>, lat: Vec<f64>) -> Result<Self> {
        let lon = reshape_grid(shape, lon, "longitude grid")?;
        let lat = reshape_grid(shape, lat, "latitude grid")?;
        Self::new(lon, lat)
    }

    pub fn lon(&self) -> &Array2<f64> {
        &self.lon
    }

    pub fn lat(&self) -> &Array2<f64> {
        &self.lat
    }

    pub fn shape(&self) -> GridShape {
        let (rows, cols) = self.lon.dim();
        GridShape::new(rows, cols)
    }

    /// Fail unless these grids match `shape`.
    pub fn ensure_shape(&self, shape: GridShape) -> Result<()> {
        if self.shape() != shape {
            return Err(GridError::shape_mismatch(
                "coordinate grids vs decode shape",
                shape,
                self.shape(),
            ));
        }
        Ok(())
    }
}

/// Load the longitude and latitude grid files and reshape both to `shape`.
pub fn load_coordinate_grids(
    lon_path: impl AsRef<Path>,
    lat_path: impl AsRef<Path>,
    shape: GridShape,
) -> Result<CoordinateGrids> {
    let lon = read_grid_file(lon_path.as_ref(), shape)?;
    let lat = read_grid_file(lat_path.as_ref(), shape)?;

    info!(
        lon = %lon_path.as_ref().display(),
        lat = %lat_path.as_ref().display(),
        shape = %shape,
        "Loaded coordinate grids"
    );

    CoordinateGrids::new(lon, lat)
}

/// Read one grid-definition file onto `shape`.
pub fn read_grid_file(path: &Path, shape: GridShape) -> Result<Array2<f64>> {
    let bytes = read_input(path)?;
    let text = String::from_utf8_lossy(&bytes);
    let values = parse_grid_text(&text, path)?;

    debug!(path = %path.display(), values = values.len(), "Parsed grid file");

    reshape_grid(shape, values, &path.display().to_string())
}

/// Parse every whitespace-separated number in `text`.
///
/// `path` is only used for error reporting.
pub fn parse_grid_text(text: &str, path: &Path) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        for token in line.split_whitespace() {
            let value = token
                .parse::<f64>()
                .map_err(|_| GridError::InvalidGridValue {
                    path: path.to_path_buf(),
                    line: line_no + 1,
                    token: token.to_string(),
                })?;
            values.push(value);
        }
    }
    Ok(values)
}

fn reshape_grid(shape: GridShape, values: Vec<f64>, context: &str) -> Result<Array2<f64>> {
    if values.len() != shape.cells() {
        return Err(GridError::shape_mismatch(
            context,
            format!("{} values ({})", shape.cells(), shape),
            format!("{} values", values.len()),
        ));
    }
    Array2::from_shape_vec(shape.dim(), values)
        .map_err(|e| GridError::shape_mismatch(context, shape, e))
}
