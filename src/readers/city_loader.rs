use crate::config::StationsConfig;
use crate::error::Result;
use crate::models::ObservationRow;
use crate::readers::ObservationReader;
use crate::utils::constants::DEFAULT_YEAR_MAX_EXCLUSIVE;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Loads one city's station observations from `<data_folder>/<city folder>/*.csv`.
pub struct CityLoader {
    data_folder: PathBuf,
    year_max_exclusive: i32,
    reader: ObservationReader,
}

impl CityLoader {
    pub fn new(data_folder: impl Into<PathBuf>) -> Self {
        Self {
            data_folder: data_folder.into(),
            year_max_exclusive: DEFAULT_YEAR_MAX_EXCLUSIVE,
            reader: ObservationReader::new(),
        }
    }

    pub fn with_year_max_exclusive(mut self, year_max_exclusive: i32) -> Self {
        self.year_max_exclusive = year_max_exclusive;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.reader = ObservationReader::with_delimiter(delimiter);
        self
    }

    pub fn data_folder(&self) -> &Path {
        &self.data_folder
    }

    pub fn year_max_exclusive(&self) -> i32 {
        self.year_max_exclusive
    }

    /// Rows of the city's canonical station with year < cutoff.
    ///
    /// Fails on an unknown city key, a missing or empty folder, unparseable
    /// files, and month codes outside 1..=12 on the station's rows.
    pub fn load(&self, city: &str, config: &StationsConfig) -> Result<Vec<ObservationRow>> {
        let entry = config.city(city)?;
        let folder = self.data_folder.join(&entry.folder);

        let raw = self.reader.read_folder(&folder)?;
        let total = raw.len();

        let mut rows = Vec::new();
        for observation in raw.into_iter().filter(|o| o.station == entry.name) {
            let row = ObservationRow::from_raw(observation)?;
            if row.year < self.year_max_exclusive {
                rows.push(row);
            }
        }

        if rows.is_empty() {
            warn!(
                "No rows for station '{}' in {} (city {})",
                entry.name,
                folder.display(),
                city
            );
        }

        debug!(
            "{}: kept {} of {} rows for station {}",
            city,
            rows.len(),
            total,
            entry.name
        );
        Ok(rows)
    }
}
