//! Fixed-width DLY record decoding.
//!
//! Each DLY line holds one station/element/year/month: an 11-byte station
//! id, 4-byte year, 2-byte month, 4-byte element code, then 31 day groups
//! of a 5-byte value and three 1-byte flags. Decoding is a pure function of
//! the line text; field positions live in a declarative offset table so a
//! layout change is a table edit, not new parsing code.

use std::str::FromStr;

use crate::error::{DlyError, Result};
use crate::models::{DAYS_PER_RECORD, DayFlags, RawRecord};

/// Header field byte offsets (0-based, half-open)
const STATION_ID: (usize, usize) = (0, 11);
const YEAR: (usize, usize) = (11, 15);
const MONTH: (usize, usize) = (15, 17);
const ELEMENT: (usize, usize) = (17, 21);

/// Day groups start after the header; each day is a 5-byte value followed
/// by the measurement, quality, and source flag bytes.
const DAY_BASE: usize = 21;
const VALUE_WIDTH: usize = 5;
const DAY_WIDTH: usize = 8;

/// Shortest decodable line: all 31 value fields must be present. The flag
/// bytes after the last value may be absent (trailing blanks are often
/// stripped by text tooling) and decode as blank flags.
pub const MIN_LINE_LEN: usize = DAY_BASE + (DAYS_PER_RECORD - 1) * DAY_WIDTH + VALUE_WIDTH;

/// Decode one fixed-width DLY line into a [`RawRecord`].
///
/// Fails on lines shorter than [`MIN_LINE_LEN`], on any value field that is
/// not an integer, and on a month outside 1-12 (an invalid month must not
/// reach downstream day-count lookups).
pub fn decode_line(line: &str) -> Result<RawRecord> {
    let line = line.trim_end_matches(['\n', '\r']);
    let bytes = line.as_bytes();

    if bytes.len() < MIN_LINE_LEN {
        return Err(DlyError::LineTooShort {
            length: bytes.len(),
            minimum: MIN_LINE_LEN,
        });
    }

    let station_id = field_str(bytes, STATION_ID, "station_id")?.to_string();
    let year: i32 = field_int(bytes, YEAR, "year")?;
    let month: u32 = field_int(bytes, MONTH, "month")?;
    if !(1..=12).contains(&month) {
        return Err(DlyError::MonthOutOfRange { month });
    }
    let element = field_str(bytes, ELEMENT, "element")?.to_string();

    let mut values = [0i32; DAYS_PER_RECORD];
    let mut flags = [DayFlags::BLANK; DAYS_PER_RECORD];
    for day in 0..DAYS_PER_RECORD {
        let base = DAY_BASE + day * DAY_WIDTH;
        values[day] = field_int(bytes, (base, base + VALUE_WIDTH), "value")?;
        flags[day] = DayFlags {
            measurement: flag_at(bytes, base + VALUE_WIDTH),
            quality: flag_at(bytes, base + VALUE_WIDTH + 1),
            source: flag_at(bytes, base + VALUE_WIDTH + 2),
        };
    }

    Ok(RawRecord {
        station_id,
        year,
        month,
        element,
        values,
        flags,
    })
}

/// Extract a fixed-width text field
fn field_str<'a>(bytes: &'a [u8], (start, end): (usize, usize), field: &'static str) -> Result<&'a str> {
    std::str::from_utf8(&bytes[start..end]).map_err(|_| DlyError::InvalidField {
        field,
        raw: String::from_utf8_lossy(&bytes[start..end]).into_owned(),
    })
}

/// Extract and parse a fixed-width, space-padded integer field
fn field_int<T: FromStr>(bytes: &[u8], range: (usize, usize), field: &'static str) -> Result<T> {
    let raw = field_str(bytes, range, field)?.trim();
    raw.parse().map_err(|_| DlyError::InvalidField {
        field,
        raw: raw.to_string(),
    })
}

/// Flag byte at `index`, blank when the line ends before it
fn flag_at(bytes: &[u8], index: usize) -> char {
    bytes.get(index).map_or(' ', |&b| b as char)
}
