//! Monthly-to-daily series conversion.
//!
//! Turns one sentinel-cleaned record into a daily-indexed series for its
//! (year, month, element): truncated to the month's true day count and
//! scaled by the element's unit factor. Failure causes are explicit and
//! countable rather than collapsing into a silent `None`.

use chrono::NaiveDate;
use thiserror::Error;

use crate::element::{Element, days_in_month};
use crate::models::{DAYS_PER_RECORD, DailySeries};

/// Why a (year, month, element) record produced no series.
///
/// Every variant is a per-record skip, never fatal for the file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("unknown element code: {0}")]
    UnknownElement(String),

    #[error("month out of range: {0}")]
    InvalidMonth(u32),

    #[error("no valid calendar dates for year {year}, month {month}")]
    InvalidDate { year: i32, month: u32 },
}

/// Build the daily series for one month of one element.
///
/// Values must already have the -9999 sentinel replaced by `None`; missing
/// stays missing, non-missing values are scaled. Trailing slots beyond the
/// month's day count are padding and are dropped. February always keeps 28
/// days, with no leap-year exception.
pub fn build_monthly_series(
    year: i32,
    month: u32,
    element_code: &str,
    values: &[Option<i32>; DAYS_PER_RECORD],
) -> Result<DailySeries, SkipReason> {
    let element = Element::from_code(element_code)
        .ok_or_else(|| SkipReason::UnknownElement(element_code.trim().to_string()))?;

    // The decoder validates the month, but a bad lookup here must skip the
    // record rather than panic.
    let day_count = days_in_month(month).ok_or(SkipReason::InvalidMonth(month))?;

    let mut dates = Vec::with_capacity(day_count as usize);
    for day in 1..=day_count {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(SkipReason::InvalidDate { year, month })?;
        dates.push(date);
    }

    let scale = element.scale();
    let values: Vec<Option<f64>> = values[..day_count as usize]
        .iter()
        .map(|value| value.map(|raw| raw as f64 * scale))
        .collect();

    Ok(DailySeries {
        element,
        dates,
        values,
    })
}
