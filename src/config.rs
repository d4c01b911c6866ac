//! Station configuration document.
//!
//! Maps each city key to the folder holding its raw CSV files and the
//! canonical station name used to filter rows:
//!
//! ```yaml
//! stations:
//!   Paris:
//!     folder: paris
//!     name: PARIS-MONTSOURIS
//! ```
//!
//! YAML, JSON and TOML documents are accepted; the format follows the file extension.

use std::collections::BTreeMap;
use std::path::Path;

use ::config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::error::{ProcessingError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CityConfig {
    /// Sub-folder of the data root holding this city's CSV files
    #[validate(length(min = 1))]
    pub folder: String,

    /// Canonical station name (`NOM_USUEL`) kept when filtering
    #[validate(length(min = 1))]
    pub name: String,
}

impl CityConfig {
    pub fn new(folder: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationsConfig {
    #[serde(default)]
    pub stations: BTreeMap<String, CityConfig>,
}

impl StationsConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ProcessingError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let settings = Config::builder().add_source(File::from(path)).build()?;
        let parsed: StationsConfig = settings.try_deserialize()?;
        parsed.validate_entries()?;

        debug!(
            "Loaded {} station entries from {}",
            parsed.stations.len(),
            path.display()
        );
        Ok(parsed)
    }

    /// Parse an in-memory document, e.g. `FileFormat::Yaml`.
    pub fn parse(content: &str, format: FileFormat) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(content, format))
            .build()?;
        let parsed: StationsConfig = settings.try_deserialize()?;
        parsed.validate_entries()?;
        Ok(parsed)
    }

    pub fn with_city(mut self, city: impl Into<String>, entry: CityConfig) -> Self {
        self.stations.insert(city.into(), entry);
        self
    }

    pub fn city(&self, city: &str) -> Result<&CityConfig> {
        self.stations
            .get(city)
            .ok_or_else(|| ProcessingError::CityNotFound {
                city: city.to_string(),
            })
    }

    /// All configured city keys, in sorted order.
    pub fn cities(&self) -> Vec<String> {
        self.stations.keys().cloned().collect()
    }

    pub fn validate_entries(&self) -> Result<()> {
        for entry in self.stations.values() {
            entry.validate()?;
        }
        Ok(())
    }

    /// Resolve a comma-separated city subset, or every configured city when absent.
    pub fn resolve_cities(&self, subset: Option<&str>) -> Result<Vec<String>> {
        let cities: Vec<String> = match subset {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
            None => self.cities(),
        };

        if cities.is_empty() {
            return Err(ProcessingError::Config(
                "No cities to process: --cities is empty and the configuration lists no stations"
                    .to_string(),
            ));
        }

        Ok(cities)
    }
}
