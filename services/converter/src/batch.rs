//! Sequential per-year conversion.
//!
//! Coordinate grids are loaded once; each year is then decoded and written
//! on its own. A failing year is recorded and the run moves on.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use grid_decoder::{load_coordinate_grids, GridDecoder};
use netcdf_archive::write_output;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::config::ConverterConfig;
use crate::error::ConvertError;

/// What happened to one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum YearStatus {
    /// All 12 months written.
    Converted { output: PathBuf },
    /// Written, but trailing months are NaN.
    Partial {
        output: PathBuf,
        months_present: usize,
    },
    /// Nothing written for this year.
    Failed { error: String },
}

impl YearStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn output(&self) -> Option<&Path> {
        match self {
            Self::Converted { output } | Self::Partial { output, .. } => Some(output),
            Self::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearOutcome {
    pub year: i32,
    #[serde(flatten)]
    pub status: YearStatus,
}

/// Per-year results of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<YearOutcome>,
}

impl RunSummary {
    pub fn converted(&self) -> usize {
        self.count(|s| matches!(s, YearStatus::Converted { .. }))
    }

    pub fn partial(&self) -> usize {
        self.count(|s| matches!(s, YearStatus::Partial { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(YearStatus::is_failed)
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    pub fn outcome(&self, year: i32) -> Option<&YearStatus> {
        self.outcomes
            .iter()
            .find(|o| o.year == year)
            .map(|o| &o.status)
    }

    /// Write the summary as pretty-printed JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write summary: {}", path.display()))
    }

    fn count(&self, pred: impl Fn(&YearStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}

/// Converts every configured year against one decoder.
pub struct BatchRunner {
    config: ConverterConfig,
    decoder: GridDecoder,
}

impl BatchRunner {
    /// Validate the config, load the coordinate grids and the metadata
    /// template.
    pub fn new(config: ConverterConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

        let options = config.decode_options();
        let grids = load_coordinate_grids(
            config.lon_grid_path(),
            config.lat_grid_path(),
            options.shape,
        )
        .context("Failed to load coordinate grids")?;
        let template = config.load_template()?;
        let decoder = GridDecoder::new(grids, template, options)?;

        Ok(Self { config, decoder })
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Decode and write a single year.
    pub fn convert_year(&self, year: i32) -> Result<YearStatus, ConvertError> {
        let binary = self.config.binary_path(year);
        let dataset = self.decoder.decode_year(year, &binary)?;
        let output = write_output(&dataset, year, self.config.output_dir())?;

        let report = dataset.report();
        if report.is_complete() {
            Ok(YearStatus::Converted { output })
        } else {
            Ok(YearStatus::Partial {
                output,
                months_present: report.months_present,
            })
        }
    }

    /// Convert every year in the configured range.
    pub fn run(&self) -> RunSummary {
        let started_at = Utc::now();
        let years = self.config.years;
        info!(start = years.start, end = years.end, "Starting conversion run");

        let mut outcomes = Vec::new();
        for year in years.iter() {
            let status = match self.convert_year(year) {
                Ok(status) => {
                    if let YearStatus::Partial { months_present, .. } = &status {
                        warn!(year = year, months_present = months_present, "Year converted with missing months");
                    }
                    status
                }
                Err(e) => {
                    error!(year = year, error = %e, "Year conversion failed");
                    YearStatus::Failed {
                        error: e.to_string(),
                    }
                }
            };
            outcomes.push(YearOutcome { year, status });
        }

        let summary = RunSummary {
            started_at,
            finished_at: Utc::now(),
            outcomes,
        };

        info!(
            converted = summary.converted(),
            partial = summary.partial(),
            failed = summary.failed(),
            "Conversion run completed"
        );

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(statuses: Vec<YearStatus>) -> RunSummary {
        RunSummary {
            started_at: Utc::now(),
            finished_at: Utc::now(),
            outcomes: statuses
                .into_iter()
                .enumerate()
                .map(|(i, status)| YearOutcome {
                    year: 2000 + i as i32,
                    status,
                })
                .collect(),
        }
    }

    #[test]
    fn test_summary_counts() {
        let s = summary(vec![
            YearStatus::Converted {
                output: PathBuf::from("output/2000.nc"),
            },
            YearStatus::Partial {
                output: PathBuf::from("output/2001.nc"),
                months_present: 5,
            },
            YearStatus::Failed {
                error: "file not found".to_string(),
            },
        ]);
        assert_eq!(s.converted(), 1);
        assert_eq!(s.partial(), 1);
        assert_eq!(s.failed(), 1);
        assert!(s.has_failures());
        assert_eq!(
            s.outcome(2001).and_then(YearStatus::output),
            Some(Path::new("output/2001.nc"))
        );
        assert!(s.outcome(1999).is_none());
    }

    #[test]
    fn test_year_outcome_serialization() {
        let outcome = YearOutcome {
            year: 2001,
            status: YearStatus::Partial {
                output: PathBuf::from("output/2001.nc"),
                months_present: 5,
            },
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["year"], 2001);
        assert_eq!(json["status"], "partial");
        assert_eq!(json["months_present"], 5);
        assert_eq!(json["output"], "output/2001.nc");
    }
}
