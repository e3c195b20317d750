//! PIOMAS grid decoding.
//!
//! Turns a raw yearly `heff.H<year>` binary into a `(month, x, y)` sea ice
//! thickness array on the native 360x120 grid, annotated with the
//! longitude/latitude grids and descriptive metadata.
//!
//! # Data flow
//!
//! ```text
//! heff.H<year>            longrid.dat / latgrid.dat
//!      │                          │
//!      ▼                          ▼
//! decode_samples (f32)     load_coordinate_grids
//!      │                          │
//!      ▼                          │
//! stack_months ──► NativeArray    │
//!      │                          │
//!      └──────────┬───────────────┘
//!                 ▼
//!          AnnotatedDataset ──► netcdf-archive
//! ```
//!
//! # Example
//!
//! ```ignore
//! use grid_decoder::{load_coordinate_grids, DecodeOptions, GridDecoder, GridShape, MetadataTemplate};
//!
//! let grids = load_coordinate_grids("grids/longrid.dat", "grids/latgrid.dat", GridShape::PIOMAS)?;
//! let decoder = GridDecoder::new(grids, MetadataTemplate::default(), DecodeOptions::default())?;
//! let dataset = decoder.decode_year(1993, "binaries/heff.H1993")?;
//! assert!(dataset.is_complete());
//! ```

pub mod dataset;
pub mod decode;
pub mod decoder;
pub mod error;
pub mod grid;
pub mod metadata;
pub mod shape;

pub use dataset::{month_index, AnnotatedDataset};
pub use decode::{decode_samples, stack_months, ByteOrder, DecodeReport, NativeArray};
pub use decoder::{DecodeOptions, GridDecoder};
pub use error::{GridError, Result};
pub use grid::{load_coordinate_grids, parse_grid_text, read_grid_file, CoordinateGrids};
pub use metadata::{MetadataAttribute, MetadataTemplate, YEAR_PLACEHOLDER};
pub use shape::{GridShape, MONTHS_PER_YEAR};
