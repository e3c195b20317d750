//! A decoded year ready for serialization.

use crate::decode::{DecodeReport, NativeArray};
use crate::grid::CoordinateGrids;
use crate::metadata::MetadataAttribute;
use crate::shape::{GridShape, MONTHS_PER_YEAR};

/// Month coordinate values, 1 through 12.
pub fn month_index() -> Vec<i32> {
    (1..=MONTHS_PER_YEAR as i32).collect()
}

/// Thickness array plus everything needed to describe it.
///
/// Borrows the coordinate grids, which outlive every per-year dataset.
#[derive(Debug, Clone)]
pub struct AnnotatedDataset<'a> {
    year: i32,
    thickness: NativeArray,
    grids: &'a CoordinateGrids,
    attributes: Vec<MetadataAttribute>,
    report: DecodeReport,
}

impl<'a> AnnotatedDataset<'a> {
    pub fn new(
        year: i32,
        thickness: NativeArray,
        grids: &'a CoordinateGrids,
        attributes: Vec<MetadataAttribute>,
        report: DecodeReport,
    ) -> Self {
        Self {
            year,
            thickness,
            grids,
            attributes,
            report,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn thickness(&self) -> &NativeArray {
        &self.thickness
    }

    pub fn grids(&self) -> &CoordinateGrids {
        self.grids
    }

    pub fn attributes(&self) -> &[MetadataAttribute] {
        &self.attributes
    }

    pub fn report(&self) -> &DecodeReport {
        &self.report
    }

    pub fn shape(&self) -> GridShape {
        self.thickness.shape()
    }

    pub fn months(&self) -> Vec<i32> {
        month_index()
    }

    /// False when trailing months were left at the sentinel.
    pub fn is_complete(&self) -> bool {
        self.report.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_index() {
        let months = month_index();
        assert_eq!(months.len(), 12);
        assert_eq!(months.first(), Some(&1));
        assert_eq!(months.last(), Some(&12));
    }
}
