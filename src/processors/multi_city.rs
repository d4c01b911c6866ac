use crate::config::StationsConfig;
use crate::error::{ProcessingError, Result};
use crate::models::{MonthlySummary, ObservationRow, SummaryRow, YearlySummary};
use crate::processors::{Aggregator, MovingAverage};
use crate::readers::CityLoader;
use crate::utils::progress::ProgressReporter;
use std::path::PathBuf;
use tracing::info;

/// Final tables of a run, concatenated in city-list order.
#[derive(Debug, Clone, PartialEq)]
pub struct Datasets {
    pub yearly: Vec<YearlySummary>,
    pub monthly: Vec<MonthlySummary>,
    /// Header of the moving-average column, e.g. `TMM_ma5`
    pub moving_average_column: String,
}

/// Runs load, aggregate and enrich for each configured city.
pub struct MultiCityProcessor {
    loader: CityLoader,
    config: StationsConfig,
    moving_average: MovingAverage,
}

impl MultiCityProcessor {
    pub fn new(data_folder: impl Into<PathBuf>, config: StationsConfig) -> Self {
        Self {
            loader: CityLoader::new(data_folder),
            config,
            moving_average: MovingAverage::default(),
        }
    }

    pub fn with_year_max_exclusive(mut self, year_max_exclusive: i32) -> Self {
        self.loader = self.loader.with_year_max_exclusive(year_max_exclusive);
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.loader = self.loader.with_delimiter(delimiter);
        self
    }

    pub fn with_moving_average(mut self, moving_average: MovingAverage) -> Self {
        self.moving_average = moving_average;
        self
    }

    pub fn config(&self) -> &StationsConfig {
        &self.config
    }

    /// Yearly aggregates with the moving average, ordered by (station, year).
    pub fn build_yearly(&self, rows: &[ObservationRow]) -> Vec<YearlySummary> {
        let mut yearly = Aggregator::yearly(rows);
        self.moving_average.apply(&mut yearly);
        yearly
    }

    /// Monthly aggregates with the moving average, ordered by (station, year, month).
    pub fn build_monthly(&self, rows: &[ObservationRow]) -> Vec<MonthlySummary> {
        let mut monthly = Aggregator::monthly(rows);
        self.moving_average.apply(&mut monthly);
        monthly
    }

    /// Both granularities for one city, computed from a single load and tagged with the city.
    pub fn process_city(&self, city: &str) -> Result<(Vec<YearlySummary>, Vec<MonthlySummary>)> {
        let rows = self.loader.load(city, &self.config)?;

        let mut yearly = self.build_yearly(&rows);
        let mut monthly = self.build_monthly(&rows);
        tag_city(&mut yearly, city);
        tag_city(&mut monthly, city);

        Ok((yearly, monthly))
    }

    /// Process `cities` in order. The first failing city aborts the whole run.
    pub fn process_all(
        &self,
        cities: &[String],
        progress: Option<&ProgressReporter>,
    ) -> Result<Datasets> {
        if cities.is_empty() {
            return Err(ProcessingError::Config("No cities to process".to_string()));
        }

        let mut yearly = Vec::new();
        let mut monthly = Vec::new();

        for city in cities {
            info!("Building dataset for {}", city);
            if let Some(p) = progress {
                p.set_message(&format!("Building {}", city));
            }

            let (city_yearly, city_monthly) = self.process_city(city)?;
            info!(
                "{}: {} yearly rows, {} monthly rows",
                city,
                city_yearly.len(),
                city_monthly.len()
            );
            yearly.extend(city_yearly);
            monthly.extend(city_monthly);

            if let Some(p) = progress {
                p.increment(1);
            }
        }

        Ok(Datasets {
            yearly,
            monthly,
            moving_average_column: self.moving_average.column_name(),
        })
    }
}

fn tag_city<T: SummaryRow>(rows: &mut [T], city: &str) {
    for row in rows {
        row.set_city(city);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CityConfig;
    use crate::error::ErrorCategory;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const HEADER: &str = "NOM_USUEL;AAAAMM;TMM;TXAB;TXMIN;NBJTX25;RR;RRAB";

    fn write_city(root: &Path, folder: &str, station: &str, years: std::ops::Range<i32>) {
        let dir = root.join(folder);
        fs::create_dir_all(&dir).unwrap();

        let mut content = format!("{}\n", HEADER);
        for year in years {
            for month in 1..=12 {
                content.push_str(&format!(
                    "{};{};{}.0;20.0;1.0;0;10.0;3.0\n",
                    station,
                    year * 100 + month,
                    month
                ));
            }
        }
        fs::write(dir.join("obs.csv"), content).unwrap();
    }

    fn processor(root: &Path) -> MultiCityProcessor {
        let config = StationsConfig::default()
            .with_city("Paris", CityConfig::new("paris", "PARIS-MONTSOURIS"))
            .with_city("Nice", CityConfig::new("nice", "NICE"));
        MultiCityProcessor::new(root, config)
    }

    #[test]
    fn test_process_all_keeps_city_order() {
        let dir = TempDir::new().unwrap();
        write_city(dir.path(), "paris", "PARIS-MONTSOURIS", 2018..2020);
        write_city(dir.path(), "nice", "NICE", 2019..2020);

        let datasets = processor(dir.path())
            .process_all(&["Paris".to_string(), "Nice".to_string()], None)
            .unwrap();

        let cities: Vec<&str> = datasets.yearly.iter().map(|r| r.city.as_str()).collect();
        assert_eq!(cities, vec!["Paris", "Paris", "Nice"]);
        assert_eq!(datasets.monthly.len(), 36);
        assert_eq!(datasets.monthly[24].city, "Nice");
        assert_eq!(datasets.moving_average_column, "TMM_ma5");
    }

    #[test]
    fn test_failing_city_aborts_run() {
        let dir = TempDir::new().unwrap();
        write_city(dir.path(), "paris", "PARIS-MONTSOURIS", 2018..2020);

        let err = processor(dir.path())
            .process_all(&["Paris".to_string(), "Nice".to_string()], None)
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::DataAccess);
    }

    #[test]
    fn test_empty_city_list() {
        let dir = TempDir::new().unwrap();
        let err = processor(dir.path()).process_all(&[], None).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_year_cutoff_applies() {
        let dir = TempDir::new().unwrap();
        write_city(dir.path(), "paris", "PARIS-MONTSOURIS", 2018..2021);

        let (yearly, monthly) = processor(dir.path())
            .with_year_max_exclusive(2020)
            .process_city("Paris")
            .unwrap();
        assert_eq!(yearly.len(), 2);
        assert_eq!(monthly.len(), 24);
        assert!(yearly.iter().all(|r| r.city == "Paris"));
    }
}
