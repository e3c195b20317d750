//! PIOMAS converter library.
//!
//! Exposes the configuration and batch runner used by the
//! `piomas-converter` binary so they can be exercised from integration
//! tests.

pub mod batch;
pub mod config;
pub mod error;

pub use batch::{BatchRunner, RunSummary, YearOutcome, YearStatus};
pub use config::{ConverterConfig, GridConfig, LayoutConfig, YearRange};
pub use error::ConvertError;
