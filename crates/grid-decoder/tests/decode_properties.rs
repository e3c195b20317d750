//! Integration tests: decode synthetic binaries through the public API.
//!
//! Covers the placement, malformed-input, truncation and grid-shape
//! properties on the full 360x120 native grid.

use grid_decoder::{
    load_coordinate_grids, DecodeOptions, GridDecoder, GridError, GridShape, MetadataTemplate,
};
use test_utils::{
    increasing_samples, latitude_values, longitude_values, samples_to_le_bytes, shapes, years,
    ScratchLayout, LON_GRID_FILE,
};

fn piomas_layout() -> ScratchLayout {
    let (rows, cols) = shapes::PIOMAS;
    ScratchLayout::new(rows, cols)
}

fn decoder_for(layout: &ScratchLayout) -> GridDecoder {
    let shape = GridShape::new(layout.rows(), layout.cols());
    let grids = load_coordinate_grids(layout.lon_path(), layout.lat_path(), shape)
        .expect("Failed to load grids");
    let options = DecodeOptions {
        shape,
        ..Default::default()
    };
    GridDecoder::new(grids, MetadataTemplate::default(), options).expect("Failed to build decoder")
}

#[test]
fn test_full_year_row_major_placement() {
    let layout = piomas_layout();
    let shape = GridShape::PIOMAS;
    let samples = increasing_samples(shape.year_len());
    let path = layout.write_binary(years::FIRST, &samples);

    let decoder = decoder_for(&layout);
    let dataset = decoder.decode_year(years::FIRST, &path).unwrap();
    let data = dataset.thickness().data();

    assert_eq!(data.dim(), (12, 360, 120));
    assert!(dataset.is_complete());

    // Spot-check placement, then the full flatten round trip.
    for k in [0usize, 1, 119, 120, 43_199, 43_200, 300_001, 518_399] {
        let (m, x, y) = shape.index_of(k);
        assert_eq!(data[[m, x, y]], k as f32, "sample {k} misplaced");
    }
    assert_eq!(dataset.thickness().flatten(), samples);
}

#[test]
fn test_malformed_binary_rejected() {
    let layout = piomas_layout();
    let mut bytes = samples_to_le_bytes(&increasing_samples(GridShape::PIOMAS.year_len()));
    bytes.pop();
    let path = layout.write_binary_bytes(years::FIRST, &bytes);

    let err = decoder_for(&layout)
        .decode_year(years::FIRST, &path)
        .unwrap_err();
    assert!(matches!(err, GridError::MalformedBinary { len } if len == bytes.len()));
}

#[test]
fn test_five_month_file_leaves_trailing_months_missing() {
    let layout = piomas_layout();
    let shape = GridShape::PIOMAS;
    let path = layout.write_binary(years::FIRST, &increasing_samples(shape.cells() * 5));

    let decoder = decoder_for(&layout);
    let dataset = decoder.decode_year(years::FIRST, &path).unwrap();
    let thickness = dataset.thickness();

    assert_eq!(dataset.report().months_present, 5);
    assert!(!dataset.is_complete());
    for month in 1..=5 {
        let slice = thickness.month(month).unwrap();
        assert!(slice.iter().all(|v| !v.is_nan()), "month {month} should be populated");
    }
    for month in 6..=12 {
        assert!(thickness.is_month_missing(month), "month {month} should be missing");
    }
    assert_eq!(dataset.report().missing_months(), vec![6, 7, 8, 9, 10, 11, 12]);
}

#[test]
fn test_five_month_file_fails_when_complete_year_required() {
    let layout = piomas_layout();
    let shape = GridShape::PIOMAS;
    let path = layout.write_binary(years::FIRST, &increasing_samples(shape.cells() * 5));

    let grids = load_coordinate_grids(layout.lon_path(), layout.lat_path(), shape).unwrap();
    let options = DecodeOptions {
        require_complete: true,
        ..Default::default()
    };
    let decoder = GridDecoder::new(grids, MetadataTemplate::default(), options).unwrap();

    let err = decoder.decode_year(years::FIRST, &path).unwrap_err();
    assert!(matches!(err, GridError::TruncatedData { months_present: 5 }));
}

#[test]
fn test_short_grid_file_is_shape_mismatch() {
    let layout = piomas_layout();
    let (rows, cols) = shapes::PIOMAS;
    let mut lon = longitude_values(rows, cols);
    lon.pop();
    assert_eq!(lon.len(), 43_199);
    layout.write_grid(LON_GRID_FILE, &lon);

    let err = load_coordinate_grids(layout.lon_path(), layout.lat_path(), GridShape::PIOMAS)
        .unwrap_err();
    assert!(matches!(err, GridError::ShapeMismatch { .. }));
}

#[test]
fn test_transposed_convention_is_rejected() {
    let layout = piomas_layout();
    // Same element count, swapped dimension order.
    let transposed = GridShape::new(120, 360);
    let grids = load_coordinate_grids(layout.lon_path(), layout.lat_path(), transposed).unwrap();

    let err = GridDecoder::new(grids, MetadataTemplate::default(), DecodeOptions::default())
        .unwrap_err();
    assert!(matches!(err, GridError::ShapeMismatch { .. }));
}

#[test]
fn test_grids_keep_file_order() {
    let layout = piomas_layout();
    let (rows, cols) = shapes::PIOMAS;
    let grids =
        load_coordinate_grids(layout.lon_path(), layout.lat_path(), GridShape::PIOMAS).unwrap();

    let lon = longitude_values(rows, cols);
    let lat = latitude_values(rows, cols);
    assert_eq!(grids.lon().iter().copied().collect::<Vec<_>>(), lon);
    assert_eq!(grids.lat()[[359, 119]], lat[lat.len() - 1]);
}

#[test]
fn test_uniform_year() {
    let layout = piomas_layout();
    let path = layout.write_binary(years::UNIFORM, &vec![1.5; GridShape::PIOMAS.year_len()]);

    let decoder = decoder_for(&layout);
    let dataset = decoder
        .decode_year(years::UNIFORM, &path)
        .unwrap();
    assert!(dataset.thickness().data().iter().all(|&v| v == 1.5));
    assert_eq!(dataset.months(), (1..=12).collect::<Vec<i32>>());
}
