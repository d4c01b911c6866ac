pub mod csv_writer;

pub use csv_writer::{monthly_header, yearly_header, CsvDatasetWriter, WriteSummary};
