//! Error handling for DLY processing operations.
//!
//! Provides error types with context for record decoding, table assembly,
//! file discovery, and Parquet writing failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DlyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Record too short: {length} bytes, need at least {minimum}")]
    LineTooShort { length: usize, minimum: usize },

    #[error("Invalid {field} field: {raw:?}")]
    InvalidField { field: &'static str, raw: String },

    #[error("Month out of range: {month}")]
    MonthOutOfRange { month: u32 },

    #[error("No data survived decoding and filtering")]
    EmptyResult,

    #[error("DLY directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Invalid file pattern: {pattern} - {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Processing failed for file: {path} - {reason}")]
    ProcessingFailed { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

pub type Result<T> = std::result::Result<T, DlyError>;
