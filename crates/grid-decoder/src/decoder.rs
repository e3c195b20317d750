//! Per-year decoding entry point.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::dataset::AnnotatedDataset;
use crate::decode::{decode_samples, stack_months, ByteOrder};
use crate::error::{read_input, GridError, Result};
use crate::grid::CoordinateGrids;
use crate::metadata::MetadataTemplate;
use crate::shape::GridShape;

/// Options controlling how a yearly binary is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Shape every monthly slice is reshaped to.
    pub shape: GridShape,

    /// Byte order of the stored floats.
    pub byte_order: ByteOrder,

    /// Fail with `TruncatedData` instead of returning a partial year.
    pub require_complete: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            shape: GridShape::PIOMAS,
            byte_order: ByteOrder::Little,
            require_complete: false,
        }
    }
}

/// Decodes yearly binaries against one set of coordinate grids.
#[derive(Debug, Clone)]
pub struct GridDecoder {
    grids: CoordinateGrids,
    template: MetadataTemplate,
    options: DecodeOptions,
}

impl GridDecoder {
    /// Fails with `ShapeMismatch` if the grids disagree with `options.shape`.
    pub fn new(
        grids: CoordinateGrids,
        template: MetadataTemplate,
        options: DecodeOptions,
    ) -> Result<Self> {
        grids.ensure_shape(options.shape)?;
        template.validate()?;
        Ok(Self {
            grids,
            template,
            options,
        })
    }

    pub fn grids(&self) -> &CoordinateGrids {
        &self.grids
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Read `binary_path` and build the annotated dataset for `year`.
    ///
    /// The year is only a label. A file holding fewer than 12 whole months
    /// yields a dataset whose report marks it incomplete, or `TruncatedData`
    /// when `require_complete` is set.
    pub fn decode_year(
        &self,
        year: i32,
        binary_path: impl AsRef<Path>,
    ) -> Result<AnnotatedDataset<'_>> {
        let path = binary_path.as_ref();
        let bytes = read_input(path)?;

        debug!(year = year, path = %path.display(), bytes = bytes.len(), "Read binary");

        self.decode_bytes(year, &bytes).map_err(|err| {
            if let GridError::MalformedBinary { len } = &err {
                warn!(year = year, path = %path.display(), len = len, "Malformed binary");
            }
            err
        })
    }

    /// Decode an in-memory yearly binary.
    pub fn decode_bytes(&self, year: i32, bytes: &[u8]) -> Result<AnnotatedDataset<'_>> {
        let shape = self.options.shape;
        self.grids.ensure_shape(shape)?;

        let samples = decode_samples(bytes, self.options.byte_order)?;
        let (thickness, report) = stack_months(&samples, shape)?;

        if !report.is_complete() {
            if self.options.require_complete {
                return Err(GridError::TruncatedData {
                    months_present: report.months_present,
                });
            }
            warn!(
                year = year,
                months_present = report.months_present,
                missing = ?report.missing_months(),
                "Truncated binary, trailing months left as NaN"
            );
        }
        if report.samples_ignored > 0 {
            warn!(
                year = year,
                samples_ignored = report.samples_ignored,
                "Samples beyond the last whole month were ignored"
            );
        }

        info!(
            year = year,
            shape = %shape,
            months = report.months_present,
            "Decoded year"
        );

        Ok(AnnotatedDataset::new(
            year,
            thickness,
            &self.grids,
            self.template.render(year),
            report,
        ))
    }
}
