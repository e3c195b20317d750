//! Descriptive attributes attached to every output file.
//!
//! The text lives in a [`MetadataTemplate`] rather than in the decoder, so
//! the same decoding path can emit different attribution blocks. Values may
//! contain `{year}`, which is replaced when the template is rendered.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{read_input, GridError, Result};

/// Placeholder substituted with the year label.
pub const YEAR_PLACEHOLDER: &str = "{year}";

/// One global attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataAttribute {
    pub name: String,
    pub value: String,
}

impl MetadataAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Ordered set of global attributes, rendered once per year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataTemplate {
    pub attributes: Vec<MetadataAttribute>,
}

impl Default for MetadataTemplate {
    fn default() -> Self {
        Self::piomas()
    }
}

impl MetadataTemplate {
    /// Attribution block for PIOMAS monthly sea ice thickness.
    pub fn piomas() -> Self {
        Self {
            attributes: vec![
                MetadataAttribute::new(
                    "data_name",
                    "Monthly mean PIOMAS sea ice thickness data",
                ),
                MetadataAttribute::new(
                    "description",
                    "Sea ice thickness in meters on the native 360x120 grid, \
                     data produced by the University of Washington Polar Science Center",
                ),
                MetadataAttribute::new("year", "these data are for the year {year}"),
                MetadataAttribute::new(
                    "citation",
                    "When using this data please use the citation: Zhang, Jinlun and D.A. Rothrock: \
                     Modeling global sea ice with a thickness and enthalpy distribution model \
                     in generalized curvilinear coordinates, Mon. Wea. Rev. 131(5), 681-697, 2003.",
                ),
                MetadataAttribute::new(
                    "read_example",
                    "import xarray as xr\n\
                     with xr.open_dataset('output/{year}.nc') as ds:\n    \
                     march = ds.where(ds.month == 3, drop=True)",
                ),
                MetadataAttribute::new(
                    "python_author",
                    "Robbie Mallett wrote this python code. If there's a problem with it, \
                     email him at robbie.mallett.17@ucl.ac.uk",
                ),
            ],
        }
    }

    /// Parse a YAML template.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let template: Self = serde_yaml::from_str(yaml)?;
        template.validate()?;
        Ok(template)
    }

    /// Load a YAML template from disk.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = read_input(path.as_ref())?;
        let text = String::from_utf8(bytes).map_err(|e| {
            GridError::metadata(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_yaml_str(&text)
    }

    /// Reject empty or duplicate attribute names.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for attr in &self.attributes {
            if attr.name.trim().is_empty() {
                return Err(GridError::metadata("attribute name must not be empty"));
            }
            if !seen.insert(attr.name.as_str()) {
                return Err(GridError::metadata(format!(
                    "duplicate attribute name: {}",
                    attr.name
                )));
            }
        }
        Ok(())
    }

    /// Attributes with `{year}` replaced.
    pub fn render(&self, year: i32) -> Vec<MetadataAttribute> {
        let year = year.to_string();
        self.attributes
            .iter()
            .map(|attr| MetadataAttribute {
                name: attr.name.clone(),
                value: attr.value.replace(YEAR_PLACEHOLDER, &year),
            })
            .collect()
    }
}
