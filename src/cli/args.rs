//! Command-line argument definitions for the DLY processor.
//!
//! Mirrors the classic dly-to-parquet interface: a station name or regex
//! pattern, a source directory, an inclusive year window, and an overwrite
//! flag, defined with the clap derive API.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR};
use crate::error::{DlyError, Result};

/// CLI arguments for the DLY processor
///
/// Converts NOAA GHCN daily (.dly) fixed-width station files into dense
/// per-day Parquet tables, one output file per station.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dly-processor",
    version,
    about = "Convert NOAA GHCN daily (.dly) station files into per-day Parquet tables"
)]
pub struct Args {
    /// Station file name, or a regex over .dly file names with --regex
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Directory containing .dly files
    #[arg(
        short = 'd',
        long = "dly-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Directory containing .dly files"
    )]
    pub dly_dir: PathBuf,

    /// Treat PATTERN as a regular expression over .dly file names
    #[arg(short = 'r', long = "regex")]
    pub regex: bool,

    /// Earliest record year to include (inclusive)
    #[arg(long = "min-year", value_name = "YEAR", default_value_t = DEFAULT_MIN_YEAR)]
    pub min_year: i32,

    /// Latest record year to include (inclusive)
    #[arg(long = "max-year", value_name = "YEAR", default_value_t = DEFAULT_MAX_YEAR)]
    pub max_year: i32,

    /// Directory for parquet outputs (default: beside each input)
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Overwrite existing parquet outputs
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Number of files to process concurrently (0 = number of CPUs)
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        default_value_t = 0,
        help = "Concurrent files (0 = number of CPUs)"
    )]
    pub workers: usize,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Validate argument consistency
    pub fn validate(&self) -> Result<()> {
        if self.min_year > self.max_year {
            return Err(DlyError::Configuration {
                message: format!(
                    "min-year ({}) must not exceed max-year ({})",
                    self.min_year, self.max_year
                ),
            });
        }

        if !self.dly_dir.is_dir() {
            return Err(DlyError::DirectoryNotFound {
                path: self.dly_dir.clone(),
            });
        }

        // The output directory is created later; only a non-directory in
        // its place is a configuration error
        if let Some(output) = &self.output {
            if output.exists() && !output.is_dir() {
                return Err(DlyError::Configuration {
                    message: format!("output path {} is not a directory", output.display()),
                });
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Worker count with the CPU-count default applied
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get().max(1)
        } else {
            self.workers
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn base_args(dly_dir: PathBuf) -> Args {
        Args {
            pattern: "USC00000001".to_string(),
            dly_dir,
            regex: false,
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
            output: None,
            force: false,
            workers: 0,
            verbose: 0,
            quiet: false,
        }
    }

    #[test]
    fn test_validate_accepts_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let args = base_args(temp_dir.path().to_path_buf());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_year_window() {
        let temp_dir = TempDir::new().unwrap();
        let mut args = base_args(temp_dir.path().to_path_buf());
        args.min_year = 2000;
        args.max_year = 1990;
        assert!(matches!(
            args.validate(),
            Err(DlyError::Configuration { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_file_as_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("occupied");
        std::fs::write(&file_path, "").unwrap();

        let mut args = base_args(temp_dir.path().to_path_buf());
        args.output = Some(file_path);
        assert!(matches!(
            args.validate(),
            Err(DlyError::Configuration { .. })
        ));

        // A not-yet-existing directory is fine, it gets created at run time
        let mut args = base_args(temp_dir.path().to_path_buf());
        args.output = Some(temp_dir.path().join("results"));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_directory() {
        let args = base_args(PathBuf::from("/nonexistent/dly"));
        assert!(matches!(
            args.validate(),
            Err(DlyError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_log_level() {
        let temp_dir = TempDir::new().unwrap();
        let mut args = base_args(temp_dir.path().to_path_buf());

        assert_eq!(args.get_log_level(), "warn");

        args.verbose = 1;
        assert_eq!(args.get_log_level(), "info");

        args.verbose = 2;
        assert_eq!(args.get_log_level(), "debug");

        args.verbose = 3;
        assert_eq!(args.get_log_level(), "trace");

        args.verbose = 0;
        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
    }

    #[test]
    fn test_effective_workers_defaults_to_cpu_count() {
        let temp_dir = TempDir::new().unwrap();
        let mut args = base_args(temp_dir.path().to_path_buf());

        assert!(args.effective_workers() >= 1);

        args.workers = 3;
        assert_eq!(args.effective_workers(), 3);
    }
}
