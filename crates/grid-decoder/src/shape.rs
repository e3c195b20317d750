//! Native grid dimensions.
//!
//! PIOMAS output is stored as `rows = 360` (the `x` dimension) by
//! `cols = 120` (the `y` dimension). The same [`GridShape`] is used for the
//! coordinate grids, the monthly reshape and the output dimensions.

use serde::{Deserialize, Serialize};

/// Number of monthly slices in one yearly binary.
pub const MONTHS_PER_YEAR: usize = 12;

/// Row-major grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

impl GridShape {
    /// The PIOMAS native grid.
    pub const PIOMAS: GridShape = GridShape {
        rows: 360,
        cols: 120,
    };

    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of cells in one monthly slice.
    pub const fn cells(&self) -> usize {
        self.rows * self.cols
    }

    /// Number of samples in a complete 12-month binary.
    pub const fn year_len(&self) -> usize {
        self.cells() * MONTHS_PER_YEAR
    }

    /// Expected byte length of a complete little/big-endian f32 binary.
    pub const fn year_bytes(&self) -> usize {
        self.year_len() * 4
    }

    /// Position `(month_index, x, y)` of flat sample `k`, month index 0-based.
    pub const fn index_of(&self, k: usize) -> (usize, usize, usize) {
        let cells = self.cells();
        let within = k % cells;
        (k / cells, within / self.cols, within % self.cols)
    }

    /// Shape tuple as used by `ndarray`.
    pub const fn dim(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

impl Default for GridShape {
    fn default() -> Self {
        Self::PIOMAS
    }
}

impl std::fmt::Display for GridShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piomas_sizes() {
        let shape = GridShape::PIOMAS;
        assert_eq!(shape.cells(), 43_200);
        assert_eq!(shape.year_len(), 518_400);
        assert_eq!(shape.year_bytes(), 2_073_600);
        assert_eq!(shape.to_string(), "360x120");
    }

    #[test]
    fn test_index_of_row_major() {
        let shape = GridShape::new(3, 4);
        assert_eq!(shape.index_of(0), (0, 0, 0));
        assert_eq!(shape.index_of(3), (0, 0, 3));
        assert_eq!(shape.index_of(4), (0, 1, 0));
        assert_eq!(shape.index_of(11), (0, 2, 3));
        assert_eq!(shape.index_of(12), (1, 0, 0));
        assert_eq!(shape.index_of(29), (2, 1, 1));
    }

    #[test]
    fn test_empty_shape() {
        assert!(GridShape::new(0, 120).is_empty());
        assert!(!GridShape::PIOMAS.is_empty());
    }
}
