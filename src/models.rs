//! Core data structures for DLY processing.
//!
//! Defines the decoded fixed-width record, the per-month daily series,
//! and the statistics surfaced by file and batch processing.

use chrono::NaiveDate;
use serde::Serialize;

use crate::element::Element;

/// Raw value marking "no observation" in a DLY record
pub const MISSING_SENTINEL: i32 = -9999;

/// Every record carries 31 day slots regardless of the month's true length;
/// trailing slots are padding and must be dropped downstream.
pub const DAYS_PER_RECORD: usize = 31;

/// The three one-character flags attached to each day value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayFlags {
    pub measurement: char,
    pub quality: char,
    pub source: char,
}

impl DayFlags {
    pub const BLANK: DayFlags = DayFlags {
        measurement: ' ',
        quality: ' ',
        source: ' ',
    };

    pub fn is_blank(&self) -> bool {
        *self == Self::BLANK
    }
}

/// One decoded DLY line: a station/element/year/month with 31 day slots.
///
/// `values[i]` corresponds strictly to `flags[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub station_id: String,
    pub year: i32,
    pub month: u32,
    pub element: String,
    pub values: [i32; DAYS_PER_RECORD],
    pub flags: [DayFlags; DAYS_PER_RECORD],
}

impl RawRecord {
    /// Day values with the -9999 sentinel replaced by an explicit missing
    /// marker, ready for the monthly series builder.
    pub fn cleaned_values(&self) -> [Option<i32>; DAYS_PER_RECORD] {
        let mut cleaned = [None; DAYS_PER_RECORD];
        for (slot, &value) in cleaned.iter_mut().zip(self.values.iter()) {
            *slot = (value != MISSING_SENTINEL).then_some(value);
        }
        cleaned
    }
}

/// One month of one element as a daily-indexed series.
///
/// Dates and values are parallel, truncated to the month's true day count.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    pub element: Element,
    pub dates: Vec<NaiveDate>,
    pub values: Vec<Option<f64>>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Per-file scan statistics.
///
/// Skip causes are counted separately so silent data loss is visible.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FileStats {
    pub lines_scanned: usize,
    pub malformed_lines: usize,
    pub unknown_elements: usize,
    pub outside_window: usize,
    pub series_built: usize,
}

impl FileStats {
    /// Lines lost to decode or conversion failures (deliberate year
    /// filtering is not data loss and is reported separately).
    pub fn lines_skipped(&self) -> usize {
        self.malformed_lines + self.unknown_elements
    }
}

/// Batch-level processing statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    pub total_rows: usize,
    pub processing_time_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleaned_values_replaces_sentinel() {
        let mut values = [100; DAYS_PER_RECORD];
        values[5] = MISSING_SENTINEL;

        let record = RawRecord {
            station_id: "USC00000001".to_string(),
            year: 2001,
            month: 1,
            element: "TMAX".to_string(),
            values,
            flags: [DayFlags::BLANK; DAYS_PER_RECORD],
        };

        let cleaned = record.cleaned_values();
        assert_eq!(cleaned[0], Some(100));
        assert_eq!(cleaned[5], None);
        assert_eq!(cleaned[30], Some(100));
    }

    #[test]
    fn test_file_stats_lines_skipped() {
        let stats = FileStats {
            lines_scanned: 10,
            malformed_lines: 2,
            unknown_elements: 3,
            outside_window: 4,
            series_built: 1,
        };
        assert_eq!(stats.lines_skipped(), 5);
    }
}
