//! Binary decoding and monthly reshaping.
//!
//! A yearly binary is a headerless stream of 32-bit floats: month 1 first,
//! each month a row-major `rows x cols` slice. Sample `k` lands at
//! `(k / cells, (k % cells) / cols, (k % cells) % cols)`.

use ndarray::{Array3, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::shape::{GridShape, MONTHS_PER_YEAR};

/// Byte order of the floats in a binary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
    /// Whatever the host uses.
    Native,
}

impl ByteOrder {
    /// Parse from string (case-insensitive), defaulting to little-endian.
    pub fn from_str(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    /// Parse from string (case-insensitive); `None` for an unknown name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "little" | "le" => Some(Self::Little),
            "big" | "be" => Some(Self::Big),
            "native" | "ne" => Some(Self::Native),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Little => "little",
            Self::Big => "big",
            Self::Native => "native",
        }
    }

    #[inline]
    fn read(self, word: [u8; 4]) -> f32 {
        match self {
            Self::Little => f32::from_le_bytes(word),
            Self::Big => f32::from_be_bytes(word),
            Self::Native => f32::from_ne_bytes(word),
        }
    }
}

impl std::fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Interpret `bytes` as a sequence of 32-bit floats.
pub fn decode_samples(bytes: &[u8], order: ByteOrder) -> Result<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(GridError::MalformedBinary { len: bytes.len() });
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| order.read([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// How much of a yearly binary was usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeReport {
    /// Whole months copied into the array, always the leading ones.
    pub months_present: usize,
    /// Samples in the stream.
    pub samples_read: usize,
    /// Samples left over after the last whole month (partial month or
    /// anything past month 12).
    pub samples_ignored: usize,
}

impl DecodeReport {
    pub fn is_complete(&self) -> bool {
        self.months_present == MONTHS_PER_YEAR
    }

    /// 1-based months left at the NaN sentinel.
    pub fn missing_months(&self) -> Vec<usize> {
        (self.months_present + 1..=MONTHS_PER_YEAR).collect()
    }
}

/// Decoded `(month, x, y)` thickness array, NaN where no data was written.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeArray {
    data: Array3<f32>,
}

impl NativeArray {
    /// Array of the given shape with every entry at the NaN sentinel.
    pub fn missing(shape: GridShape) -> Self {
        Self {
            data: Array3::from_elem((MONTHS_PER_YEAR, shape.rows, shape.cols), f32::NAN),
        }
    }

    pub fn shape(&self) -> GridShape {
        let (_, rows, cols) = self.data.dim();
        GridShape::new(rows, cols)
    }

    pub fn data(&self) -> &Array3<f32> {
        &self.data
    }

    pub fn into_inner(self) -> Array3<f32> {
        self.data
    }

    /// Slice for a 1-based month, `None` outside 1..=12.
    pub fn month(&self, month: usize) -> Option<ArrayView2<'_, f32>> {
        if !(1..=MONTHS_PER_YEAR).contains(&month) {
            return None;
        }
        Some(self.data.index_axis(Axis(0), month - 1))
    }

    /// True when every cell of a 1-based month is the sentinel.
    pub fn is_month_missing(&self, month: usize) -> bool {
        self.month(month)
            .map(|slice| slice.iter().all(|v| v.is_nan()))
            .unwrap_or(true)
    }

    /// All values back in stream order.
    pub fn flatten(&self) -> Vec<f32> {
        self.data.iter().copied().collect()
    }
}

/// Partition `samples` by month and reshape each whole month onto `shape`.
///
/// Months without a complete slice in the stream stay at NaN and are
/// reflected in the returned report.
pub fn stack_months(samples: &[f32], shape: GridShape) -> Result<(NativeArray, DecodeReport)> {
    if shape.is_empty() {
        return Err(GridError::shape_mismatch(
            "decode shape",
            "non-empty grid",
            shape,
        ));
    }

    let cells = shape.cells();
    let mut array = NativeArray::missing(shape);
    let mut months_present = 0;

    for (month_idx, chunk) in samples.chunks_exact(cells).take(MONTHS_PER_YEAR).enumerate() {
        let slice = ArrayView2::from_shape(shape.dim(), chunk)
            .map_err(|e| GridError::shape_mismatch("monthly slice", shape, e))?;
        array.data.index_axis_mut(Axis(0), month_idx).assign(&slice);
        months_present += 1;
    }

    let report = DecodeReport {
        months_present,
        samples_read: samples.len(),
        samples_ignored: samples.len() - months_present * cells,
    };

    Ok((array, report))
}
