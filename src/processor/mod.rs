//! Per-file DLY pipeline and batch orchestration.
//!
//! One file flows decoder → series builder → assembler entirely in memory,
//! with every skip cause counted. Files are independent units of work, so
//! the batch driver runs them concurrently with bounded parallelism; one
//! file's failure never stops the rest.

pub mod discovery;
pub mod writer;

use std::path::{Path, PathBuf};
use std::time::Instant;

use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::DataFrame;
use tokio::task;
use tracing::{debug, error, warn};

use self::writer::{ParquetWriter, output_path_for};
use crate::assembler::{ElementGroups, assemble};
use crate::config::ProcessorConfig;
use crate::decoder::decode_line;
use crate::error::{DlyError, Result};
use crate::models::{FileStats, ProcessingStats};
use crate::series::{SkipReason, build_monthly_series};

/// Scan a file's lines, in order, into per-element series groups.
///
/// The year window is applied per line, before the series builder runs.
/// Malformed lines and unknown elements are counted and skipped, never
/// fatal for the file.
pub fn scan_lines<'a, I>(lines: I, config: &ProcessorConfig) -> (ElementGroups, FileStats)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut groups = ElementGroups::new();
    let mut stats = FileStats::default();

    for (index, line) in lines.into_iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        stats.lines_scanned += 1;

        let record = match decode_line(line) {
            Ok(record) => record,
            Err(e) => {
                stats.malformed_lines += 1;
                // Physical line number, blank lines included
                warn!("skipping malformed line {}: {}", index + 1, e);
                continue;
            }
        };

        if !config.year_in_window(record.year) {
            stats.outside_window += 1;
            continue;
        }

        match build_monthly_series(
            record.year,
            record.month,
            &record.element,
            &record.cleaned_values(),
        ) {
            Ok(series) => {
                stats.series_built += 1;
                groups.push(series);
            }
            Err(SkipReason::UnknownElement(code)) => {
                stats.unknown_elements += 1;
                debug!("skipping unknown element {} for {}", code, record.station_id);
            }
            Err(reason) => {
                stats.malformed_lines += 1;
                warn!("skipping record for {}: {}", record.station_id, reason);
            }
        }
    }

    (groups, stats)
}

/// Assemble one file's lines into the wide daily table.
pub fn assemble_lines<'a, I>(lines: I, config: &ProcessorConfig) -> Result<(DataFrame, FileStats)>
where
    I: IntoIterator<Item = &'a str>,
{
    let (groups, stats) = scan_lines(lines, config);
    let table = assemble(groups)?;
    Ok((table, stats))
}

/// What became of one input file
#[derive(Debug)]
pub enum FileOutcome {
    /// Output written with this many rows
    Written { rows: usize, stats: FileStats },
    /// Output already exists and overwrite was not forced
    SkippedExisting,
    /// Nothing survived decoding and filtering; no output written
    Empty { stats: FileStats },
}

/// Main processor for DLY file conversion
#[derive(Debug)]
pub struct DlyProcessor {
    config: ProcessorConfig,
}

impl DlyProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Process one .dly file from disk and write its parquet output
    pub async fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        let output_path = output_path_for(path, self.config.output_dir.as_deref());
        let writer = ParquetWriter::new(output_path, self.config.clone());
        if writer.exists() && !self.config.force_overwrite {
            debug!("output exists, skipping {}", path.display());
            return Ok(FileOutcome::SkippedExisting);
        }

        let owned_path = path.to_path_buf();
        let config = self.config.clone();
        let (table, stats) =
            task::spawn_blocking(move || -> Result<(Option<DataFrame>, FileStats)> {
                let text = std::fs::read_to_string(&owned_path)?;
                let (groups, stats) = scan_lines(text.lines(), &config);
                if groups.is_empty() {
                    return Ok((None, stats));
                }
                let table = assemble(groups)?;
                Ok((Some(table), stats))
            })
            .await
            .map_err(|e| DlyError::ProcessingFailed {
                path: path.to_path_buf(),
                reason: format!("worker task failed: {e}"),
            })??;

        match table {
            Some(mut table) => {
                let rows = writer.write(&mut table)?;
                Ok(FileOutcome::Written { rows, stats })
            }
            // Skip counts survive the empty path so total data loss is
            // never reported as a clean zero
            None => Ok(FileOutcome::Empty { stats }),
        }
    }

    /// Process a batch of files with bounded concurrency.
    ///
    /// Files have no cross-file dependency; a failing file is counted and
    /// logged, and the remaining files keep processing.
    pub async fn process_batch(&self, files: &[PathBuf]) -> Result<ProcessingStats> {
        let start_time = Instant::now();

        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message("Processing DLY files");

        let concurrent_limit = self.config.max_concurrent_files.min(files.len()).max(1);
        let pb_clone = pb.clone();

        let (processed, skipped, failed, total_rows) = stream::iter(files)
            .map(|path| {
                let pb = pb_clone.clone();
                async move {
                    if let Some(file_name) = path.file_name() {
                        pb.set_message(format!("Processing: {}", file_name.to_string_lossy()));
                    }
                    let result = self.process_file(path).await;
                    pb.inc(1);
                    (path.clone(), result)
                }
            })
            .buffer_unordered(concurrent_limit)
            .fold(
                (0usize, 0usize, 0usize, 0usize),
                |(processed, skipped, failed, total_rows), (path, result)| async move {
                    match result {
                        Ok(FileOutcome::Written { rows, stats }) => {
                            if stats.lines_skipped() > 0 {
                                warn!(
                                    "{}: skipped {} of {} lines ({} malformed, {} unknown elements); {} outside year window",
                                    path.display(),
                                    stats.lines_skipped(),
                                    stats.lines_scanned,
                                    stats.malformed_lines,
                                    stats.unknown_elements,
                                    stats.outside_window,
                                );
                            }
                            debug!("wrote {} rows for {}", rows, path.display());
                            (processed + 1, skipped, failed, total_rows + rows)
                        }
                        Ok(FileOutcome::SkippedExisting) => (processed, skipped + 1, failed, total_rows),
                        Ok(FileOutcome::Empty { stats }) => {
                            warn!(
                                "{}: no data survived decoding and filtering ({} malformed, {} unknown elements, {} outside year window), no output written",
                                path.display(),
                                stats.malformed_lines,
                                stats.unknown_elements,
                                stats.outside_window,
                            );
                            (processed, skipped + 1, failed, total_rows)
                        }
                        Err(e) => {
                            error!("failed to process {}: {:#}", path.display(), e);
                            (processed, skipped, failed + 1, total_rows)
                        }
                    }
                },
            )
            .await;

        pb.finish_with_message("All DLY files processed");

        Ok(ProcessingStats {
            files_processed: processed,
            files_skipped: skipped,
            files_failed: failed,
            total_rows,
            processing_time_ms: start_time.elapsed().as_millis(),
        })
    }

    /// Print a colored batch summary
    pub fn print_summary(&self, stats: &ProcessingStats) {
        println!("\n{}", "Processing Summary".bright_green().bold());
        println!(
            "  {} {}ms",
            "Time elapsed:".bright_cyan(),
            stats.processing_time_ms.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Files processed:".bright_cyan(),
            stats.files_processed.to_string().bright_white()
        );
        if stats.files_skipped > 0 {
            println!(
                "  {} {}",
                "Files skipped:".bright_cyan(),
                stats.files_skipped.to_string().bright_white()
            );
        }
        if stats.files_failed > 0 {
            println!(
                "  {} {}",
                "Files failed:".bright_red(),
                stats.files_failed.to_string().bright_red().bold()
            );
        }
        println!(
            "  {} {}",
            "Total rows:".bright_cyan(),
            stats.total_rows.to_string().bright_white().bold()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_line(station: &str, year: i32, month: u32, element: &str, values: &[i32; 31]) -> String {
        let mut line = format!("{:<11}{:4}{:02}{:<4}", station, year, month, element);
        for value in values {
            line.push_str(&format!("{:5}   ", value));
        }
        line
    }

    #[test]
    fn test_scan_counts_every_skip_cause() {
        let good = make_line("USC00000001", 2001, 1, "TMAX", &[100; 31]);
        let unknown = make_line("USC00000001", 2001, 1, "WESD", &[100; 31]);
        let old = make_line("USC00000001", 1899, 1, "TMAX", &[100; 31]);
        let short = "USC00000001200101TMAX".to_string();
        let lines = [good.as_str(), unknown.as_str(), old.as_str(), short.as_str()];

        let config = ProcessorConfig::default();
        let (groups, stats) = scan_lines(lines, &config);

        assert_eq!(stats.lines_scanned, 4);
        assert_eq!(stats.series_built, 1);
        assert_eq!(stats.unknown_elements, 1);
        assert_eq!(stats.outside_window, 1);
        assert_eq!(stats.malformed_lines, 1);
        assert_eq!(stats.lines_skipped(), 2);
        assert_eq!(groups.elements().len(), 1);
    }

    #[test]
    fn test_year_filter_runs_before_series_builder() {
        // Out-of-window record with an unknown element: counted as filtered,
        // not as an unknown element
        let line = make_line("USC00000001", 1850, 1, "WESD", &[100; 31]);
        let config = ProcessorConfig::default();
        let (groups, stats) = scan_lines([line.as_str()], &config);

        assert!(groups.is_empty());
        assert_eq!(stats.outside_window, 1);
        assert_eq!(stats.unknown_elements, 0);
    }

    #[test]
    fn test_assemble_lines_empty_file_is_explicit() {
        let config = ProcessorConfig::default();
        let result = assemble_lines([], &config);
        assert!(matches!(result, Err(DlyError::EmptyResult)));
    }

    #[test]
    fn test_one_bad_line_does_not_lose_the_file() {
        let good = make_line("USC00000001", 2001, 1, "PRCP", &[10; 31]);
        let lines = ["garbage", good.as_str()];

        let config = ProcessorConfig::default();
        let (table, stats) = assemble_lines(lines, &config).unwrap();

        assert_eq!(stats.malformed_lines, 1);
        assert_eq!(table.height(), 31);
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let good = make_line("USC00000001", 2001, 1, "PRCP", &[10; 31]);
        let lines = ["", good.as_str(), "   "];

        let config = ProcessorConfig::default();
        let (_, stats) = scan_lines(lines, &config);

        assert_eq!(stats.lines_scanned, 1);
        assert_eq!(stats.malformed_lines, 0);
    }

    #[test]
    fn test_malformed_line_after_blanks_is_counted() {
        // Blank lines shift the scanned count away from the physical line
        // number; the malformed count must not be affected
        let lines = ["", "   ", "garbage"];

        let config = ProcessorConfig::default();
        let (groups, stats) = scan_lines(lines, &config);

        assert!(groups.is_empty());
        assert_eq!(stats.lines_scanned, 1);
        assert_eq!(stats.malformed_lines, 1);
    }
}
