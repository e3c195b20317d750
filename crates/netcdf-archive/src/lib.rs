//! NetCDF-4 archive for decoded PIOMAS years.
//!
//! This crate writes one self-describing file per year (`<year>.nc`) with
//! the thickness array, its longitude/latitude grids, the month coordinate
//! and the descriptive attributes, and reads such files back.
//!
//! # Implementation Notes
//!
//! Uses the `netcdf` crate, which links libnetcdf and HDF5
//! (`libhdf5-dev libnetcdf-dev` at build time). Call
//! [`silence_hdf5_errors`] once at startup to keep HDF5 diagnostics off
//! stderr.
//!
//! # Example
//!
//! ```ignore
//! let path = netcdf_archive::write_output(&dataset, 1993, "output")?;
//! let march = netcdf_archive::read_month(&path, 3)?;
//! ```

pub mod error;
pub mod native;
pub mod reader;
pub mod writer;

pub use error::{NetCdfError, NetCdfResult};
pub use native::silence_hdf5_errors;
pub use reader::{read_dataset, read_month, MonthSlice, StoredDataset};
pub use writer::{
    output_path, staging_path, write_output, COMPLETE_ATTR, LAT_VAR, LON_VAR, MONTHS_PRESENT_ATTR,
    MONTH_VAR, THICKNESS_VAR,
};
