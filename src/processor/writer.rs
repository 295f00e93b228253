//! Parquet persistence for assembled tables.
//!
//! Output lands next to the input file with a .parquet.gz extension,
//! gzip-compressed by default. Existing outputs are left alone unless
//! overwriting is forced.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::ParquetWriter as PolarsParquetWriter;
use polars::prelude::DataFrame;
use tracing::debug;

use crate::config::ProcessorConfig;
use crate::error::{DlyError, Result};

/// Map a .dly input path to its parquet output path.
///
/// Output lands beside the input, or under `output_dir` when one is set.
pub fn output_path_for(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let output = input.with_extension("parquet.gz");
    match (output_dir, output.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => output,
    }
}

/// Parquet writer for one output file
#[derive(Debug)]
pub struct ParquetWriter {
    output_path: PathBuf,
    config: ProcessorConfig,
}

impl ParquetWriter {
    pub fn new(output_path: PathBuf, config: ProcessorConfig) -> Self {
        Self {
            output_path,
            config,
        }
    }

    pub fn exists(&self) -> bool {
        self.output_path.exists()
    }

    /// Write the assembled table, returning the number of rows written
    pub fn write(&self, table: &mut DataFrame) -> Result<usize> {
        let rows = table.height();
        let file = File::create(&self.output_path)?;

        PolarsParquetWriter::new(file)
            .with_compression(self.config.compression.to_polars_compression())
            .finish(table)
            .map_err(|e| DlyError::ProcessingFailed {
                path: self.output_path.clone(),
                reason: format!("failed to write parquet: {e}"),
            })?;

        debug!("wrote {} rows to {}", rows, self.output_path.display());
        Ok(rows)
    }
}
