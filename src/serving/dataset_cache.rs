use crate::error::Result;
use crate::utils::constants::*;
use clap::ValueEnum;
use csv::ReaderBuilder;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatasetKind {
    Yearly,
    Monthly,
}

impl DatasetKind {
    /// Columns kept at the top level of each record; everything else goes under `data`.
    pub fn identity_columns(&self) -> &'static [&'static str] {
        match self {
            DatasetKind::Yearly => &[COL_CITY, COL_STATION, COL_YEAR],
            DatasetKind::Monthly => &[COL_CITY, COL_STATION, COL_YEAR, COL_MONTH, COL_MONTH_NAME],
        }
    }

    pub fn default_filename(&self) -> &'static str {
        match self {
            DatasetKind::Yearly => DEFAULT_YEARLY_FILENAME,
            DatasetKind::Monthly => DEFAULT_MONTHLY_FILENAME,
        }
    }
}

/// One output row as served to readers: identity fields plus a nested `data` mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetRecord {
    #[serde(flatten)]
    pub identity: BTreeMap<String, String>,
    pub data: BTreeMap<String, String>,
}

impl DatasetRecord {
    fn reshape(mut row: BTreeMap<String, String>, kind: DatasetKind) -> Self {
        let identity = kind
            .identity_columns()
            .iter()
            .map(|col| (col.to_string(), row.remove(*col).unwrap_or_default()))
            .collect();

        Self {
            identity,
            data: row,
        }
    }
}

/// Read an output table and reshape every row.
pub fn read_dataset(path: &Path, kind: DatasetKind, delimiter: u8) -> Result<Vec<DatasetRecord>> {
    let mut reader = ReaderBuilder::new().delimiter(delimiter).from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: BTreeMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        records.push(DatasetRecord::reshape(row, kind));
    }

    Ok(records)
}

/// Lazily loaded, process-lifetime cache of one output table.
///
/// The first successful load is kept and shared by every later reader.
/// Concurrent first readers wait on a single load. A failed load is handed
/// back to its caller and not kept, so the next `get` tries again.
pub struct DatasetCache {
    path: PathBuf,
    kind: DatasetKind,
    delimiter: u8,
    records: OnceCell<Arc<Vec<DatasetRecord>>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>, kind: DatasetKind) -> Self {
        Self {
            path: path.into(),
            kind,
            delimiter: DEFAULT_DELIMITER,
            records: OnceCell::new(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    pub fn is_loaded(&self) -> bool {
        self.records.initialized()
    }

    pub async fn get(&self) -> Result<Arc<Vec<DatasetRecord>>> {
        let records = self.records.get_or_try_init(|| self.load()).await?;
        Ok(Arc::clone(records))
    }

    /// Records as a JSON array.
    pub async fn get_json(&self) -> Result<serde_json::Value> {
        let records = self.get().await?;
        Ok(serde_json::to_value(records.as_slice())?)
    }

    async fn load(&self) -> Result<Arc<Vec<DatasetRecord>>> {
        let path = self.path.clone();
        let kind = self.kind;
        let delimiter = self.delimiter;

        debug!("Loading {:?} dataset from {}", kind, path.display());
        let records =
            tokio::task::spawn_blocking(move || read_dataset(&path, kind, delimiter)).await??;

        info!(
            "Cached {} {:?} records from {}",
            records.len(),
            self.kind,
            self.path.display()
        );
        Ok(Arc::new(records))
    }
}

/// The two read-only tables, each behind its own cache.
pub struct WeatherDataService {
    yearly: DatasetCache,
    monthly: DatasetCache,
}

impl WeatherDataService {
    pub fn new(yearly: DatasetCache, monthly: DatasetCache) -> Self {
        Self { yearly, monthly }
    }

    /// Caches over the default file names inside `output_dir`.
    pub fn from_output_dir(output_dir: &Path, delimiter: u8) -> Self {
        let cache = |kind: DatasetKind| {
            DatasetCache::new(output_dir.join(kind.default_filename()), kind).with_delimiter(delimiter)
        };
        Self::new(cache(DatasetKind::Yearly), cache(DatasetKind::Monthly))
    }

    pub async fn annual_data(&self) -> Result<Arc<Vec<DatasetRecord>>> {
        self.yearly.get().await
    }

    pub async fn monthly_data(&self) -> Result<Arc<Vec<DatasetRecord>>> {
        self.monthly.get().await
    }
}
