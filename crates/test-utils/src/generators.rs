//! Test data generators for synthetic PIOMAS inputs.
//!
//! These generators create predictable, verifiable patterns so a decoded
//! value can be traced back to its position in the raw stream.

/// Creates `count` samples whose value equals their stream index.
///
/// Exact for indices below 2^24, which covers a full 360x120x12 year.
///
/// # Example
///
/// ```
/// use test_utils::increasing_samples;
///
/// let samples = increasing_samples(5);
/// assert_eq!(samples, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
/// ```
pub fn increasing_samples(count: usize) -> Vec<f32> {
    (0..count).map(|k| k as f32).collect()
}

/// Creates `count` samples all set to `value`.
pub fn constant_samples(count: usize, value: f32) -> Vec<f32> {
    vec![value; count]
}

/// Creates thickness-like samples in metres (0 to ~5 m) for `months` whole
/// months of a `rows x cols` grid.
pub fn thickness_samples(rows: usize, cols: usize, months: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(rows * cols * months);
    for month in 0..months {
        // Thickest in late winter
        let seasonal = 1.0 + (month as f32 * std::f32::consts::PI / 6.0).cos();
        for row in 0..rows {
            for col in 0..cols {
                let spatial = (row as f32 / rows.max(1) as f32) + (col as f32 / cols.max(1) as f32);
                data.push(seasonal * 1.25 + spatial);
            }
        }
    }
    data
}

/// Little-endian bytes of `samples`.
pub fn samples_to_le_bytes(samples: &[f32]) -> Vec<u8> {
    samples.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Big-endian bytes of `samples`.
pub fn samples_to_be_bytes(samples: &[f32]) -> Vec<u8> {
    samples.iter().flat_map(|v| v.to_be_bytes()).collect()
}

/// Longitude values for a `rows x cols` grid in row-major order.
///
/// Every cell gets a distinct value so transposition bugs show up.
pub fn longitude_values(rows: usize, cols: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(rows * cols);
    let step = 360.0 / rows.max(1) as f64;
    for row in 0..rows {
        for col in 0..cols {
            data.push(-180.0 + row as f64 * step + col as f64 * 0.001);
        }
    }
    data
}

/// Latitude values for a `rows x cols` grid in row-major order.
pub fn latitude_values(rows: usize, cols: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(rows * cols);
    let step = 45.0 / cols.max(1) as f64;
    for row in 0..rows {
        for col in 0..cols {
            data.push(45.0 + col as f64 * step + row as f64 * 0.0001);
        }
    }
    data
}

/// Formats `values` as a whitespace-delimited table with `per_line` values
/// on each line.
///
/// Values use the shortest round-tripping representation, so parsing the
/// text yields the exact same `f64`s.
pub fn grid_text(values: &[f64], per_line: usize) -> String {
    let per_line = per_line.max(1);
    let mut text = String::new();
    for line in values.chunks(per_line) {
        let row: Vec<String> = line.iter().map(|v| format!("{v:>14}")).collect();
        text.push_str(&row.join(" "));
        text.push('\n');
    }
    text
}
