//! Converter configuration.
//!
//! Loaded from an optional YAML file, then overridden by `PIOMAS_*`
//! environment variables and finally by command-line flags. Relative
//! directories are resolved against `base_dir`.
//!
//! ```yaml
//! base_dir: /data/piomas
//! layout:
//!   grids_dir: grids
//!   binaries_dir: binaries
//!   output_dir: output
//! years:
//!   start: 1979
//!   end: 2023
//! grid:
//!   shape: { rows: 360, cols: 120 }
//!   byte_order: little
//! require_complete: false
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use grid_decoder::{ByteOrder, DecodeOptions, GridShape, MetadataTemplate};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Years a configured range may start or end on.
pub const VALID_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Top-level converter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Directory the layout paths are relative to
    pub base_dir: PathBuf,

    /// Input/output directory and file naming
    pub layout: LayoutConfig,

    /// Years to convert
    pub years: YearRange,

    /// Native grid and binary encoding
    pub grid: GridConfig,

    /// Treat a binary with fewer than 12 months as a failure
    pub require_complete: bool,

    /// YAML metadata template replacing the built-in attribution block
    pub metadata_template: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub grids_dir: PathBuf,
    pub binaries_dir: PathBuf,
    pub output_dir: PathBuf,
    pub lon_grid_file: String,
    pub lat_grid_file: String,
    /// Binary file name is `<binary_prefix><year>`
    pub binary_prefix: String,
}

/// Inclusive range of years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub shape: GridShape,
    pub byte_order: ByteOrder,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            layout: LayoutConfig::default(),
            years: YearRange::default(),
            grid: GridConfig::default(),
            require_complete: false,
            metadata_template: None,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            grids_dir: PathBuf::from("grids"),
            binaries_dir: PathBuf::from("binaries"),
            output_dir: PathBuf::from("output"),
            lon_grid_file: "longrid.dat".to_string(),
            lat_grid_file: "latgrid.dat".to_string(),
            binary_prefix: "heff.H".to_string(),
        }
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            start: 1993,
            end: 1993,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            shape: GridShape::PIOMAS,
            byte_order: ByteOrder::Little,
        }
    }
}

impl YearRange {
    pub fn single(year: i32) -> Self {
        Self {
            start: year,
            end: year,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> {
        self.start..=self.end
    }

    pub fn len(&self) -> usize {
        match i64::from(self.end).checked_sub(i64::from(self.start)) {
            Some(span) if span >= 0 => usize::try_from(span + 1).unwrap_or(usize::MAX),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ConverterConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply `PIOMAS_*` environment variable overrides.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (the environment in production).
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("PIOMAS_BASE_DIR") {
            self.base_dir = PathBuf::from(val);
        }

        if let Some(val) = lookup("PIOMAS_START_YEAR") {
            match val.parse() {
                Ok(year) => self.years.start = year,
                Err(_) => warn!(value = %val, "Ignoring unparseable PIOMAS_START_YEAR"),
            }
        }

        if let Some(val) = lookup("PIOMAS_END_YEAR") {
            match val.parse() {
                Ok(year) => self.years.end = year,
                Err(_) => warn!(value = %val, "Ignoring unparseable PIOMAS_END_YEAR"),
            }
        }

        if let Some(val) = lookup("PIOMAS_BYTE_ORDER") {
            match ByteOrder::parse(&val) {
                Some(order) => self.grid.byte_order = order,
                None => warn!(
                    value = %val,
                    keeping = %self.grid.byte_order,
                    "Ignoring unknown PIOMAS_BYTE_ORDER"
                ),
            }
        }

        if let Some(val) = lookup("PIOMAS_METADATA") {
            self.metadata_template = Some(PathBuf::from(val));
        }

        if let Some(val) = lookup("PIOMAS_REQUIRE_COMPLETE") {
            self.require_complete = val.to_lowercase() == "true" || val == "1";
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid.shape.is_empty() {
            return Err(format!("grid shape must be non-empty, got {}", self.grid.shape));
        }

        if self.years.is_empty() {
            return Err(format!(
                "year range is empty: start {} > end {}",
                self.years.start, self.years.end
            ));
        }

        for year in [self.years.start, self.years.end] {
            if !VALID_YEARS.contains(&year) {
                return Err(format!(
                    "year {year} is outside {}..={}",
                    VALID_YEARS.start(),
                    VALID_YEARS.end()
                ));
            }
        }

        if self.layout.lon_grid_file.is_empty() || self.layout.lat_grid_file.is_empty() {
            return Err("grid file names must not be empty".to_string());
        }

        if self.layout.lon_grid_file == self.layout.lat_grid_file {
            return Err("longitude and latitude grid files must differ".to_string());
        }

        Ok(())
    }

    fn resolve(&self, dir: &Path) -> PathBuf {
        self.base_dir.join(dir)
    }

    pub fn lon_grid_path(&self) -> PathBuf {
        self.resolve(&self.layout.grids_dir)
            .join(&self.layout.lon_grid_file)
    }

    pub fn lat_grid_path(&self) -> PathBuf {
        self.resolve(&self.layout.grids_dir)
            .join(&self.layout.lat_grid_file)
    }

    pub fn binary_path(&self, year: i32) -> PathBuf {
        self.resolve(&self.layout.binaries_dir)
            .join(format!("{}{}", self.layout.binary_prefix, year))
    }

    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.layout.output_dir)
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            shape: self.grid.shape,
            byte_order: self.grid.byte_order,
            require_complete: self.require_complete,
        }
    }

    /// The configured metadata template, or the built-in PIOMAS block.
    pub fn load_template(&self) -> Result<MetadataTemplate> {
        match &self.metadata_template {
            Some(path) => {
                let path = self.base_dir.join(path);
                MetadataTemplate::from_yaml_file(&path)
                    .with_context(|| format!("Failed to load metadata template: {}", path.display()))
            }
            None => Ok(MetadataTemplate::default()),
        }
    }
}
