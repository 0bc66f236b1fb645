use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while computing accrued leave for a single employee.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccrualError {
    #[error("invalid {field}: {value:?} is not a YYYY-MM-DD calendar date")]
    InvalidDate { field: &'static str, value: String },
    #[error("cutoff date {cutoff_date} is before join date {join_date}")]
    InvertedRange {
        join_date: NaiveDate,
        cutoff_date: NaiveDate,
    },
    #[error("stored record cannot be read: {reason}")]
    UnreadableRecord { reason: String },
}

impl AccrualError {
    pub fn code(&self) -> &'static str {
        match self {
            AccrualError::InvalidDate { .. } => "INVALID_DATE",
            AccrualError::InvertedRange { .. } => "INVERTED_RANGE",
            AccrualError::UnreadableRecord { .. } => "UNREADABLE_RECORD",
        }
    }
}

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("failed to load holiday calendar from {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: ::config::ConfigError,
    },
    #[error("{date} is listed as both a normal and a major holiday")]
    OverlappingHoliday { date: NaiveDate },
    #[error("major holidays are configured but no rest days are set")]
    NoRestDays,
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("employee store I/O failed at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("employee store at {} is not valid JSON: {source}", .path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
