//! Processing configuration.
//!
//! Year-window filtering, overwrite policy, concurrency, and Parquet
//! compression settings shared by the processor and the CLI.

use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_MIN_YEAR: i32 = 1900;
pub const DEFAULT_MAX_YEAR: i32 = 2100;

/// Supported compression algorithms for parquet output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compression {
    /// Gzip, the historical default for .parquet.gz outputs
    Gzip,
    /// Snappy, faster with a lower compression ratio
    Snappy,
    /// ZSTD, better compression ratio, slower
    Zstd,
    /// No compression
    Uncompressed,
}

impl Compression {
    /// Convert to the polars ParquetCompression type
    pub fn to_polars_compression(&self) -> ParquetCompression {
        match self {
            Compression::Gzip => ParquetCompression::Gzip(None),
            Compression::Snappy => ParquetCompression::Snappy,
            Compression::Zstd => ParquetCompression::Zstd(None),
            Compression::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

/// Global configuration for DLY processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Earliest record year to include (inclusive)
    pub min_year: i32,

    /// Latest record year to include (inclusive)
    pub max_year: i32,

    /// Overwrite existing parquet outputs
    pub force_overwrite: bool,

    /// Maximum number of files processed concurrently
    pub max_concurrent_files: usize,

    /// Parquet compression algorithm
    pub compression: Compression,

    /// Directory for parquet outputs; `None` writes beside each input
    pub output_dir: Option<PathBuf>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
            force_overwrite: false,
            max_concurrent_files: num_cpus::get().max(1),
            compression: Compression::Gzip,
            output_dir: None,
        }
    }
}

impl ProcessorConfig {
    /// Set the inclusive year window applied before series building
    pub fn with_year_window(mut self, min_year: i32, max_year: i32) -> Self {
        self.min_year = min_year;
        self.max_year = max_year;
        self
    }

    /// Enable overwriting of existing outputs
    pub fn with_force_overwrite(mut self) -> Self {
        self.force_overwrite = true;
        self
    }

    /// Set the maximum number of concurrently processed files
    pub fn with_max_concurrent_files(mut self, max_files: usize) -> Self {
        self.max_concurrent_files = max_files.max(1);
        self
    }

    /// Set the parquet compression algorithm
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Redirect parquet outputs to a directory instead of beside the inputs
    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = Some(output_dir);
        self
    }

    /// Whether a record year falls inside the configured window
    pub fn year_in_window(&self, year: i32) -> bool {
        self.min_year <= year && year <= self.max_year
    }
}
