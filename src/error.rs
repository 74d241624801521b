use chrono::NaiveDate;
use thiserror::Error;

/// Error types for survey operations
#[derive(Error, Debug)]
pub enum PubMedError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// XML parsing failed
    #[error("XML parsing failed: {0}")]
    XmlError(String),

    /// Non-success HTTP status, or an error reported inside the ESearch body
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Date range whose start lies after its end
    #[error("Invalid date range: {from} is after {until}")]
    InvalidDateRange { from: NaiveDate, until: NaiveDate },

    /// Keyword name outside the supported omics set
    #[error("Unknown omics keyword: {0}")]
    UnknownKeyword(String),

    /// Inconsistent configuration values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Writing progress output failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PubMedError>;
