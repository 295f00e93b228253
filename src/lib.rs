//! DLY Processor Library
//!
//! A Rust library for converting NOAA GHCN daily (.dly) fixed-width station
//! files into dense per-day, per-element Parquet tables.
//!
//! This library provides tools for:
//! - Decoding fixed-width DLY records into typed values with QC flag triples
//! - Converting one month of one climate element into a daily-indexed series
//!   with unit scaling and missing-value handling
//! - Outer-joining all elements found in a file into one date-indexed table
//! - Writing gzip-compressed Parquet output, one file per station
//! - Per-file skip accounting so silent data loss is visible

pub mod assembler;
pub mod config;
pub mod decoder;
pub mod element;
pub mod error;
pub mod models;
pub mod processor;
pub mod series;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::ProcessorConfig;
pub use element::Element;
pub use error::{DlyError, Result};
pub use models::{DailySeries, DayFlags, FileStats, ProcessingStats, RawRecord};
pub use processor::DlyProcessor;
