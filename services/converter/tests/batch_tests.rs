//! Integration tests for multi-year conversion runs.

use std::path::PathBuf;

use converter::{BatchRunner, ConverterConfig, RunSummary, YearRange, YearStatus};
use grid_decoder::{ByteOrder, GridShape};
use netcdf_archive::read_dataset;
use test_utils::fixtures::{shapes, ScratchLayout};
use test_utils::generators::{samples_to_be_bytes, thickness_samples};
use test_utils::{assert_f32_bits_eq, config_dir};

fn config_for(layout: &ScratchLayout, years: YearRange) -> ConverterConfig {
    let mut config = ConverterConfig {
        base_dir: layout.base().to_path_buf(),
        years,
        ..Default::default()
    };
    config.grid.shape = GridShape::new(layout.rows(), layout.cols());
    config
}

#[test]
fn test_run_mixed_years() {
    let (rows, cols) = shapes::SMALL;
    let layout = ScratchLayout::new(rows, cols);

    // 2001 complete, 2002 missing, 2003 holds five months
    layout.write_binary(2001, &thickness_samples(rows, cols, 12));
    layout.write_binary(2003, &thickness_samples(rows, cols, 5));

    let runner = BatchRunner::new(config_for(&layout, YearRange { start: 2001, end: 2003 }))
        .expect("runner should build");
    let summary = runner.run();

    assert_eq!(summary.outcomes.len(), 3);
    assert_eq!(summary.converted(), 1);
    assert_eq!(summary.partial(), 1);
    assert_eq!(summary.failed(), 1);
    assert!(summary.has_failures());

    assert_eq!(
        summary.outcome(2001),
        Some(&YearStatus::Converted {
            output: layout.output_path(2001)
        })
    );
    assert!(summary.outcome(2002).is_some_and(YearStatus::is_failed));
    assert_eq!(
        summary.outcome(2003),
        Some(&YearStatus::Partial {
            output: layout.output_path(2003),
            months_present: 5
        })
    );

    assert!(layout.output_path(2001).is_file());
    assert!(!layout.output_path(2002).exists());

    let stored = read_dataset(layout.output_path(2003)).unwrap();
    assert_eq!(stored.months_present(), Some(5));
    assert!(!stored.is_complete());
}

#[test]
fn test_missing_year_error_names_file() {
    let layout = ScratchLayout::new(2, 3);
    let runner = BatchRunner::new(config_for(&layout, YearRange::single(1995))).unwrap();
    let summary = runner.run();

    match summary.outcome(1995) {
        Some(YearStatus::Failed { error }) => assert!(error.contains("heff.H1995"), "{error}"),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn test_require_complete_fails_partial_year() {
    let (rows, cols) = shapes::SMALL;
    let layout = ScratchLayout::new(rows, cols);
    layout.write_binary(2010, &thickness_samples(rows, cols, 11));

    let mut config = config_for(&layout, YearRange::single(2010));
    config.require_complete = true;
    let summary = BatchRunner::new(config).unwrap().run();

    assert_eq!(summary.failed(), 1);
    assert!(!layout.output_path(2010).exists());
}

#[test]
fn test_big_endian_input() {
    let (rows, cols) = shapes::SMALL;
    let layout = ScratchLayout::new(rows, cols);
    let samples = thickness_samples(rows, cols, 12);
    layout.write_binary_bytes(1999, &samples_to_be_bytes(&samples));

    let mut config = config_for(&layout, YearRange::single(1999));
    config.grid.byte_order = ByteOrder::Big;
    let summary = BatchRunner::new(config).unwrap().run();
    assert!(!summary.has_failures());

    let stored = read_dataset(layout.output_path(1999)).unwrap();
    let flat: Vec<f32> = stored.thickness.iter().copied().collect();
    assert_f32_bits_eq!(&flat, &samples);
}

#[test]
fn test_runner_rejects_missing_grids() {
    let layout = ScratchLayout::new(2, 2);
    std::fs::remove_file(layout.lat_path()).unwrap();

    let result = BatchRunner::new(config_for(&layout, YearRange::single(2000)));
    assert!(result.is_err());
}

#[test]
fn test_runner_rejects_wrong_grid_shape() {
    let layout = ScratchLayout::new(3, 3);
    let mut config = config_for(&layout, YearRange::single(2000));
    config.grid.shape = GridShape::new(3, 4);

    assert!(BatchRunner::new(config).is_err());
}

#[test]
fn test_runner_rejects_invalid_config() {
    let layout = ScratchLayout::new(2, 2);
    let config = config_for(&layout, YearRange { start: 2005, end: 2004 });
    assert!(BatchRunner::new(config).is_err());
}

#[test]
fn test_runner_rejects_unbounded_year_range() {
    let layout = ScratchLayout::new(2, 2);
    let config = config_for(&layout, YearRange { start: 0, end: i32::MAX });
    let err = BatchRunner::new(config).err().expect("range should be rejected");
    assert!(err.to_string().contains("Invalid configuration"));
}

#[test]
fn test_custom_metadata_template() {
    let (rows, cols) = shapes::ONE_ROW;
    let layout = ScratchLayout::new(rows, cols);
    layout.write_binary(2004, &thickness_samples(rows, cols, 12));
    std::fs::write(
        layout.base().join("meta.yaml"),
        "attributes:\n  - name: title\n    value: \"PIOMAS {year}\"\n",
    )
    .unwrap();

    let mut config = config_for(&layout, YearRange::single(2004));
    config.metadata_template = Some(PathBuf::from("meta.yaml"));
    let summary = BatchRunner::new(config).unwrap().run();
    assert!(!summary.has_failures());

    let stored = read_dataset(layout.output_path(2004)).unwrap();
    assert_eq!(stored.attribute("title"), Some("PIOMAS 2004"));
    assert!(stored.attribute("citation").is_none());
}

#[test]
fn test_summary_json_roundtrip() {
    let (rows, cols) = shapes::SMALL;
    let layout = ScratchLayout::new(rows, cols);
    layout.write_binary(2001, &thickness_samples(rows, cols, 12));

    let summary = BatchRunner::new(config_for(&layout, YearRange { start: 2001, end: 2002 }))
        .unwrap()
        .run();

    let path = layout.base().join("summary.json");
    summary.write_json(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let parsed: RunSummary = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.outcomes, summary.outcomes);

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["outcomes"][0]["status"], "converted");
    assert_eq!(value["outcomes"][1]["status"], "failed");
}

#[test]
fn test_sample_config_parses() {
    let config = ConverterConfig::from_yaml(config_dir().join("converter.yaml"))
        .expect("sample config should parse");
    assert_eq!(config.grid.shape, GridShape::PIOMAS);
    assert_eq!(config.years, YearRange { start: 1979, end: 2023 });
    assert!(config.validate().is_ok());
}

#[test]
fn test_sample_metadata_template_parses() {
    let template = grid_decoder::MetadataTemplate::from_yaml_file(config_dir().join("metadata.yaml"))
        .expect("sample template should parse");
    assert_eq!(template, grid_decoder::MetadataTemplate::piomas());

    let rendered = template.render(1993);
    assert!(rendered
        .iter()
        .any(|a| a.name == "year" && a.value == "these data are for the year 1993"));
}
