use crate::error::Result;
use crate::models::{MonthlySummary, YearlySummary};
use crate::processors::Datasets;
use crate::utils::constants::*;
use csv::WriterBuilder;
use serde::{Serialize, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Serialize)]
struct YearlyCsvRow<'a> {
    year: i32,
    station: &'a str,
    tmm: Option<f64>,
    txab: Option<f64>,
    txmin: Option<f64>,
    #[serde(serialize_with = "serialize_count")]
    nbjtx25: Option<f64>,
    rr: Option<f64>,
    rrab: Option<f64>,
    moving_average: Option<f64>,
    city: &'a str,
}

impl<'a> From<&'a YearlySummary> for YearlyCsvRow<'a> {
    fn from(row: &'a YearlySummary) -> Self {
        Self {
            year: row.year,
            station: &row.station,
            tmm: row.metrics.tmm,
            txab: row.metrics.txab,
            txmin: row.metrics.txmin,
            nbjtx25: row.metrics.nbjtx25,
            rr: row.metrics.rr,
            rrab: row.metrics.rrab,
            moving_average: row.moving_average,
            city: &row.city,
        }
    }
}

#[derive(Serialize)]
struct MonthlyCsvRow<'a> {
    year: i32,
    month: u32,
    month_name: &'a str,
    station: &'a str,
    tmm: Option<f64>,
    txab: Option<f64>,
    txmin: Option<f64>,
    #[serde(serialize_with = "serialize_count")]
    nbjtx25: Option<f64>,
    rr: Option<f64>,
    rrab: Option<f64>,
    moving_average: Option<f64>,
    city: &'a str,
}

impl<'a> From<&'a MonthlySummary> for MonthlyCsvRow<'a> {
    fn from(row: &'a MonthlySummary) -> Self {
        Self {
            year: row.year,
            month: row.month,
            month_name: &row.month_name,
            station: &row.station,
            tmm: row.metrics.tmm,
            txab: row.metrics.txab,
            txmin: row.metrics.txmin,
            nbjtx25: row.metrics.nbjtx25,
            rr: row.metrics.rr,
            rrab: row.metrics.rrab,
            moving_average: row.moving_average,
            city: &row.city,
        }
    }
}

/// Day counts are written without a fractional part when they are whole numbers.
fn serialize_count<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
            serializer.serialize_some(&(*v as i64))
        }
        Some(v) => serializer.serialize_some(v),
        None => serializer.serialize_none(),
    }
}

const METRIC_COLUMNS: [&str; 6] = [COL_TMM, COL_TXAB, COL_TXMIN, COL_NBJTX25, COL_RR, COL_RRAB];

pub fn yearly_header(moving_average_column: &str) -> Vec<&str> {
    let mut header = vec![COL_YEAR, COL_STATION];
    header.extend(METRIC_COLUMNS);
    header.extend([moving_average_column, COL_CITY]);
    header
}

pub fn monthly_header(moving_average_column: &str) -> Vec<&str> {
    let mut header = vec![COL_YEAR, COL_MONTH, COL_MONTH_NAME, COL_STATION];
    header.extend(METRIC_COLUMNS);
    header.extend([moving_average_column, COL_CITY]);
    header
}

#[derive(Debug, Clone, PartialEq)]
pub struct WriteSummary {
    pub yearly_path: PathBuf,
    pub yearly_rows: usize,
    pub monthly_path: PathBuf,
    pub monthly_rows: usize,
}

impl WriteSummary {
    pub fn summary(&self) -> String {
        format!(
            "Yearly:  {} ({} rows)\nMonthly: {} ({} rows)",
            self.yearly_path.display(),
            self.yearly_rows,
            self.monthly_path.display(),
            self.monthly_rows
        )
    }
}

/// Writes summary tables as UTF-8 delimited text with a header and no index column.
pub struct CsvDatasetWriter {
    delimiter: u8,
}

impl CsvDatasetWriter {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn write_yearly(
        &self,
        rows: &[YearlySummary],
        moving_average_column: &str,
        path: &Path,
    ) -> Result<usize> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .from_path(path)?;

        writer.write_record(yearly_header(moving_average_column))?;
        for row in rows {
            writer.serialize(YearlyCsvRow::from(row))?;
        }
        writer.flush()?;

        Ok(rows.len())
    }

    pub fn write_monthly(
        &self,
        rows: &[MonthlySummary],
        moving_average_column: &str,
        path: &Path,
    ) -> Result<usize> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .from_path(path)?;

        writer.write_record(monthly_header(moving_average_column))?;
        for row in rows {
            writer.serialize(MonthlyCsvRow::from(row))?;
        }
        writer.flush()?;

        Ok(rows.len())
    }

    /// Write both tables into `output_dir`, creating it if needed. Existing files are overwritten.
    pub fn write_datasets(
        &self,
        datasets: &Datasets,
        output_dir: &Path,
        yearly_filename: &str,
        monthly_filename: &str,
    ) -> Result<WriteSummary> {
        fs::create_dir_all(output_dir)?;

        let yearly_path = output_dir.join(yearly_filename);
        let monthly_path = output_dir.join(monthly_filename);

        let yearly_rows = self.write_yearly(
            &datasets.yearly,
            &datasets.moving_average_column,
            &yearly_path,
        )?;
        info!("Wrote {} yearly rows to {}", yearly_rows, yearly_path.display());

        let monthly_rows = self.write_monthly(
            &datasets.monthly,
            &datasets.moving_average_column,
            &monthly_path,
        )?;
        info!(
            "Wrote {} monthly rows to {}",
            monthly_rows,
            monthly_path.display()
        );

        Ok(WriteSummary {
            yearly_path,
            yearly_rows,
            monthly_path,
            monthly_rows,
        })
    }
}

impl Default for CsvDatasetWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MetricValues;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn metrics() -> MetricValues {
        MetricValues {
            tmm: Some(12.3),
            txab: Some(35.0),
            txmin: Some(-2.5),
            nbjtx25: Some(41.0),
            rr: Some(612.4),
            rrab: None,
        }
    }

    fn datasets() -> Datasets {
        let mut yearly = YearlySummary::new(2020, "PARIS-MONTSOURIS".to_string(), metrics());
        yearly.moving_average = Some(12.1);
        yearly.city = "Paris".to_string();

        let mut monthly = MonthlySummary::new(
            2020,
            8,
            "Août".to_string(),
            "PARIS-MONTSOURIS".to_string(),
            metrics(),
        );
        monthly.city = "Paris".to_string();

        Datasets {
            yearly: vec![yearly],
            monthly: vec![monthly],
            moving_average_column: "TMM_ma5".to_string(),
        }
    }

    #[test]
    fn test_headers() {
        assert_eq!(
            yearly_header("TMM_ma5").join(";"),
            "AAAA;NOM_USUEL;TMM;TXAB;TXMIN;NBJTX25;RR;RRAB;TMM_ma5;ville"
        );
        assert_eq!(
            monthly_header("TMM_ma5").join(";"),
            "AAAA;MM;MOIS;NOM_USUEL;TMM;TXAB;TXMIN;NBJTX25;RR;RRAB;TMM_ma5;ville"
        );
    }

    #[test]
    fn test_write_datasets() -> Result<()> {
        let dir = TempDir::new()?;
        let out = dir.path().join("nested").join("outputs");

        let summary = CsvDatasetWriter::new().write_datasets(
            &datasets(),
            &out,
            DEFAULT_YEARLY_FILENAME,
            DEFAULT_MONTHLY_FILENAME,
        )?;

        assert_eq!(summary.yearly_rows, 1);
        assert_eq!(summary.monthly_rows, 1);

        let yearly = fs::read_to_string(out.join(DEFAULT_YEARLY_FILENAME))?;
        assert_eq!(
            yearly,
            "AAAA;NOM_USUEL;TMM;TXAB;TXMIN;NBJTX25;RR;RRAB;TMM_ma5;ville\n\
             2020;PARIS-MONTSOURIS;12.3;35.0;-2.5;41;612.4;;12.1;Paris\n"
        );

        let monthly = fs::read_to_string(out.join(DEFAULT_MONTHLY_FILENAME))?;
        assert_eq!(
            monthly.lines().nth(1),
            Some("2020;8;Août;PARIS-MONTSOURIS;12.3;35.0;-2.5;41;612.4;;;Paris")
        );
        Ok(())
    }

    #[test]
    fn test_hot_day_count_cells() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("yearly.csv");

        let mut rows = datasets().yearly;
        let mut fractional = rows[0].clone();
        fractional.metrics.nbjtx25 = Some(2.5);
        let mut missing = rows[0].clone();
        missing.metrics.nbjtx25 = None;
        rows.extend([fractional, missing]);

        CsvDatasetWriter::new().write_yearly(&rows, "TMM_ma5", &path)?;

        let cells: Vec<String> = fs::read_to_string(&path)?
            .lines()
            .skip(1)
            .map(|line| line.split(';').nth(5).unwrap_or_default().to_string())
            .collect();
        assert_eq!(cells, vec!["41", "2.5", ""]);
        Ok(())
    }

    #[test]
    fn test_custom_delimiter_overwrites() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("yearly.csv");
        fs::write(&path, "stale content that is longer than the new file\n".repeat(10))?;

        let writer = CsvDatasetWriter::new().with_delimiter(b',');
        writer.write_yearly(&datasets().yearly, "TMM_ma5", &path)?;

        let content = fs::read_to_string(&path)?;
        assert!(content.starts_with("AAAA,NOM_USUEL,"));
        assert_eq!(content.lines().count(), 2);
        Ok(())
    }
}
