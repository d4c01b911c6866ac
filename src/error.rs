use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

/// Broad failure classes. Every class is fatal to a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    DataAccess,
    MalformedInput,
}

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] ::config::ConfigError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("City '{city}' not found in configuration")]
    CityNotFound { city: String },

    #[error("Data access error: {0}")]
    DataAccess(String),

    #[error("Invalid month {month} in year-month code {code} (station {station})")]
    InvalidMonth {
        code: i32,
        month: i32,
        station: String,
    },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ProcessingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProcessingError::ConfigFile(_)
            | ProcessingError::Config(_)
            | ProcessingError::Validation(_)
            | ProcessingError::CityNotFound { .. } => ErrorCategory::Configuration,
            ProcessingError::Csv(e) => match e.kind() {
                csv::ErrorKind::Io(_) => ErrorCategory::DataAccess,
                _ => ErrorCategory::MalformedInput,
            },
            ProcessingError::Json(_)
            | ProcessingError::InvalidMonth { .. }
            | ProcessingError::InvalidFormat(_) => ErrorCategory::MalformedInput,
            ProcessingError::Io(_) | ProcessingError::DataAccess(_) | ProcessingError::TaskJoin(_) => {
                ErrorCategory::DataAccess
            }
        }
    }
}
