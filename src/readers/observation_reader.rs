use crate::error::{ProcessingError, Result};
use crate::models::RawObservation;
use crate::utils::constants::{
    COL_NBJTX25, COL_RR, COL_RRAB, COL_STATION, COL_TMM, COL_TXAB, COL_TXMIN, COL_YEAR_MONTH,
    CSV_EXTENSION, DEFAULT_DELIMITER,
};
use csv::{ReaderBuilder, Trim};
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const REQUIRED_COLUMNS: [&str; 8] = [
    COL_STATION,
    COL_YEAR_MONTH,
    COL_TMM,
    COL_TXAB,
    COL_TXMIN,
    COL_NBJTX25,
    COL_RR,
    COL_RRAB,
];

/// Reads delimited station observation files.
pub struct ObservationReader {
    delimiter: u8,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// List the `.csv` files directly inside `folder`, sorted by path.
    pub fn discover_csv_files(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        if !folder.is_dir() {
            return Err(ProcessingError::DataAccess(format!(
                "Data folder not found: {}",
                folder.display()
            )));
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(folder)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == CSV_EXTENSION) {
                files.push(path);
            }
        }

        if files.is_empty() {
            return Err(ProcessingError::DataAccess(format!(
                "No CSV files found in {}",
                folder.display()
            )));
        }

        files.sort();
        Ok(files)
    }

    /// Read every observation of one file.
    pub fn read_file(&self, path: &Path) -> Result<Vec<RawObservation>> {
        let bytes = fs::read(path)?;
        let content = decode(&bytes, path);
        self.parse(&content, &path.display().to_string())
    }

    /// Read and concatenate every CSV file of a folder.
    pub fn read_folder(&self, folder: &Path) -> Result<Vec<RawObservation>> {
        let mut observations = Vec::new();

        for path in self.discover_csv_files(folder)? {
            let records = self.read_file(&path)?;
            debug!("Read {} rows from {}", records.len(), path.display());
            observations.extend(records);
        }

        Ok(observations)
    }

    /// Parse delimited text with a header row.
    pub fn parse_str(&self, content: &str) -> Result<Vec<RawObservation>> {
        self.parse(content, "<input>")
    }

    /// `source` names the input in error messages.
    fn parse(&self, content: &str, source: &str) -> Result<Vec<RawObservation>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .from_reader(content.as_bytes());

        // deserialize() only looks at the header once a data row exists
        let headers = reader.headers()?;
        if headers.iter().all(str::is_empty) {
            return Err(ProcessingError::DataAccess(format!(
                "No header row in {}",
                source
            )));
        }

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|col| !headers.iter().any(|h| h == *col))
            .collect();
        if !missing.is_empty() {
            return Err(ProcessingError::InvalidFormat(format!(
                "{} is missing column(s): {}",
                source,
                missing.join(", ")
            )));
        }

        let mut records = Vec::new();
        for result in reader.deserialize() {
            let record: RawObservation = result?;
            records.push(record);
        }

        Ok(records)
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

/// UTF-8 (BOM stripped), falling back to Windows-1252 for legacy exports.
fn decode<'a>(bytes: &'a [u8], path: &Path) -> Cow<'a, str> {
    let (content, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return content;
    }

    warn!(
        "{} is not valid UTF-8, decoding as Windows-1252",
        path.display()
    );
    let (content, _, _) = WINDOWS_1252.decode(bytes);
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use std::io::Write;
    use tempfile::TempDir;

    const HEADER: &str = "NUM_POSTE;NOM_USUEL;LAT;LON;ALTI;AAAAMM;RR;RRAB;TMM;TXAB;TXMIN;NBJTX25";

    #[test]
    fn test_parse_semicolon_file() {
        let content = format!(
            "{}\n75114001;PARIS-MONTSOURIS;48.82;2.34;75;202001;27.4;7.9;7.7;15.3;4.1;0\n",
            HEADER
        );

        let records = ObservationReader::new().parse_str(&content).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].station, "PARIS-MONTSOURIS");
        assert_eq!(records[0].year_month, 202001);
        assert_eq!(records[0].tmm, Some(7.7));
        assert_eq!(records[0].nbjtx25, Some(0.0));
    }

    #[test]
    fn test_empty_metric_is_missing() {
        let content = format!("{}\n1;ORLY;0;0;0;202001;;7.9; 7.7 ;15.3;4.1;\n", HEADER);

        let records = ObservationReader::new().parse_str(&content).unwrap();

        assert_eq!(records[0].rr, None);
        assert_eq!(records[0].tmm, Some(7.7));
        assert_eq!(records[0].nbjtx25, None);
    }

    #[test]
    fn test_non_numeric_metric_is_malformed() {
        let content = format!("{}\n1;ORLY;0;0;0;202001;abc;7.9;7.7;15.3;4.1;0\n", HEADER);

        let err = ObservationReader::new().parse_str(&content).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::MalformedInput);
    }

    #[test]
    fn test_custom_delimiter() {
        let content = "NOM_USUEL,AAAAMM,TMM,TXAB,TXMIN,NBJTX25,RR,RRAB\nORLY,201512,6.1,14.0,2.0,0,12.5,4.0\n";

        let records = ObservationReader::with_delimiter(b',')
            .parse_str(content)
            .unwrap();
        assert_eq!(records[0].year_month, 201512);
        assert_eq!(records[0].rrab, Some(4.0));
    }

    #[test]
    fn test_discover_only_top_level_csv() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("b.csv"), format!("{}\n", HEADER))?;
        fs::write(dir.path().join("a.csv"), format!("{}\n", HEADER))?;
        fs::write(dir.path().join("notes.txt"), "ignored")?;
        fs::create_dir(dir.path().join("nested"))?;
        fs::write(dir.path().join("nested").join("c.csv"), format!("{}\n", HEADER))?;

        let files = ObservationReader::new().discover_csv_files(dir.path())?;
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.csv", "b.csv"]);
        Ok(())
    }

    #[test]
    fn test_missing_folder_and_empty_folder() {
        let reader = ObservationReader::new();

        let err = reader
            .discover_csv_files(Path::new("no/such/folder"))
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::DataAccess);

        let dir = TempDir::new().unwrap();
        let err = reader.read_folder(dir.path()).unwrap_err();
        assert!(matches!(err, ProcessingError::DataAccess(_)));
    }

    #[test]
    fn test_zero_byte_file_is_data_access_error() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("empty.csv");
        fs::write(&path, "")?;

        let err = ObservationReader::new().read_file(&path).unwrap_err();
        assert!(matches!(err, ProcessingError::DataAccess(ref msg) if msg.contains("empty.csv")));
        assert_eq!(err.category(), ErrorCategory::DataAccess);

        let err = ObservationReader::new().read_folder(dir.path()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::DataAccess);
        Ok(())
    }

    #[test]
    fn test_unrelated_header_is_rejected() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("other.csv");
        fs::write(&path, "FOO;BAR\n")?;

        let err = ObservationReader::new().read_file(&path).unwrap_err();
        match err {
            ProcessingError::InvalidFormat(ref msg) => {
                assert!(msg.contains("other.csv"));
                assert!(msg.contains("NOM_USUEL"));
                assert!(msg.contains("AAAAMM"));
            }
            ref other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.category(), ErrorCategory::MalformedInput);
        Ok(())
    }

    #[test]
    fn test_header_missing_one_metric() {
        let content = "NOM_USUEL;AAAAMM;TMM;TXAB;TXMIN;NBJTX25;RR\nORLY;202001;1;1;1;0;1\n";

        let err = ObservationReader::new().parse_str(content).unwrap_err();
        assert!(matches!(err, ProcessingError::InvalidFormat(ref msg) if msg.ends_with("RRAB")));
    }

    #[test]
    fn test_read_file_with_bom_and_latin1() -> Result<()> {
        let dir = TempDir::new()?;

        let bom_path = dir.path().join("bom.csv");
        let mut bom = fs::File::create(&bom_path)?;
        bom.write_all(b"\xEF\xBB\xBF")?;
        write!(bom, "{}\n1;ORLY;0;0;0;202001;1;1;1;1;1;0\n", HEADER)?;

        let records = ObservationReader::new().read_file(&bom_path)?;
        assert_eq!(records[0].station, "ORLY");

        // "CHÂTEAUROUX" with Â as a single Windows-1252 byte
        let latin_path = dir.path().join("latin1.csv");
        let mut latin = fs::File::create(&latin_path)?;
        write!(latin, "{}\n1;CH", HEADER)?;
        latin.write_all(b"\xC2")?;
        writeln!(latin, "TEAUROUX;0;0;0;202001;1;1;1;1;1;0")?;

        let records = ObservationReader::new().read_file(&latin_path)?;
        assert_eq!(records[0].station, "CHÂTEAUROUX");
        Ok(())
    }
}
