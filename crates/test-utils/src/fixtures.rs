//! Common test fixtures for PIOMAS conversion tests.
//!
//! This module provides pre-defined grid sizes and a scratch directory laid
//! out the way the converter expects (`grids/`, `binaries/`, `output/`).

use std::fs;
use std::path::{Path, PathBuf};

use crate::generators::{grid_text, latitude_values, longitude_values, samples_to_le_bytes};
use crate::paths::{binary_file_name, layout_dirs, output_file_name, temp_test_dir_with_prefix};

/// Common grid sizes as `(rows, cols)`.
pub mod shapes {
    /// PIOMAS native grid
    pub const PIOMAS: (usize, usize) = (360, 120);

    /// Small non-square grid, fast enough for most tests
    pub const SMALL: (usize, usize) = (6, 4);

    /// Single-row grid
    pub const ONE_ROW: (usize, usize) = (1, 5);
}

/// Years used across the test suite.
pub mod years {
    /// First year of the default processing range
    pub const FIRST: i32 = 1993;

    /// Year used by the uniform end-to-end scenario
    pub const UNIFORM: i32 = 2000;
}

/// File names inside `grids/`.
pub const LON_GRID_FILE: &str = "longrid.dat";
pub const LAT_GRID_FILE: &str = "latgrid.dat";

/// A temporary `grids/ binaries/ output/` tree.
///
/// Removed when dropped.
pub struct ScratchLayout {
    dir: tempfile::TempDir,
    rows: usize,
    cols: usize,
}

impl ScratchLayout {
    /// Creates the directories and writes distinct-valued grid files for a
    /// `rows x cols` grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        let layout = Self {
            dir: temp_test_dir_with_prefix("piomas_layout_"),
            rows,
            cols,
        };
        let (grids, binaries, output) = layout_dirs(layout.base());
        for dir in [&grids, &binaries, &output] {
            fs::create_dir_all(dir).expect("Failed to create layout directory");
        }
        layout.write_grid(LON_GRID_FILE, &longitude_values(rows, cols));
        layout.write_grid(LAT_GRID_FILE, &latitude_values(rows, cols));
        layout
    }

    pub fn base(&self) -> &Path {
        self.dir.path()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn grids_dir(&self) -> PathBuf {
        layout_dirs(self.base()).0
    }

    pub fn binaries_dir(&self) -> PathBuf {
        layout_dirs(self.base()).1
    }

    pub fn output_dir(&self) -> PathBuf {
        layout_dirs(self.base()).2
    }

    pub fn lon_path(&self) -> PathBuf {
        self.grids_dir().join(LON_GRID_FILE)
    }

    pub fn lat_path(&self) -> PathBuf {
        self.grids_dir().join(LAT_GRID_FILE)
    }

    pub fn binary_path(&self, year: i32) -> PathBuf {
        self.binaries_dir().join(binary_file_name(year))
    }

    pub fn output_path(&self, year: i32) -> PathBuf {
        self.output_dir().join(output_file_name(year))
    }

    /// Overwrites a grid file under `grids/` with `values`, 8 per line.
    pub fn write_grid(&self, name: &str, values: &[f64]) -> PathBuf {
        let path = self.grids_dir().join(name);
        fs::write(&path, grid_text(values, 8)).expect("Failed to write grid file");
        path
    }

    /// Writes `samples` as a little-endian binary for `year`.
    pub fn write_binary(&self, year: i32, samples: &[f32]) -> PathBuf {
        self.write_binary_bytes(year, &samples_to_le_bytes(samples))
    }

    /// Writes raw bytes as the binary for `year`.
    pub fn write_binary_bytes(&self, year: i32, bytes: &[u8]) -> PathBuf {
        let path = self.binary_path(year);
        fs::write(&path, bytes).expect("Failed to write binary file");
        path
    }

    /// Number of samples in a complete year for this layout's grid.
    pub fn year_len(&self) -> usize {
        self.rows * self.cols * 12
    }
}
