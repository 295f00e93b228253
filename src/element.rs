//! Climate element codes and their conversion rules.
//!
//! Defines the closed set of elements the processor understands, their
//! unit scale factors, and the fixed (leap-year-agnostic) day-count table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Day counts per month, 1-indexed by month. February is always 28 days;
/// a 29th raw value in a February record is padding and gets dropped.
pub const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Day count for a calendar month, or `None` when the month is out of range.
pub fn days_in_month(month: u32) -> Option<u32> {
    if (1..=12).contains(&month) {
        Some(DAYS_IN_MONTH[(month - 1) as usize])
    } else {
        None
    }
}

/// Climate elements supported by the processor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Tavg,
    Tmax,
    Tmin,
    Prcp,
    Snow,
    Snwd,
}

impl Element {
    pub const ALL: [Element; 6] = [
        Element::Tavg,
        Element::Tmax,
        Element::Tmin,
        Element::Prcp,
        Element::Snow,
        Element::Snwd,
    ];

    /// Look up an element from its 4-character DLY code
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "TAVG" => Some(Element::Tavg),
            "TMAX" => Some(Element::Tmax),
            "TMIN" => Some(Element::Tmin),
            "PRCP" => Some(Element::Prcp),
            "SNOW" => Some(Element::Snow),
            "SNWD" => Some(Element::Snwd),
            _ => None,
        }
    }

    /// The element's DLY code as it appears on a record
    pub fn code(&self) -> &'static str {
        match self {
            Element::Tavg => "TAVG",
            Element::Tmax => "TMAX",
            Element::Tmin => "TMIN",
            Element::Prcp => "PRCP",
            Element::Snow => "SNOW",
            Element::Snwd => "SNWD",
        }
    }

    /// Column name in the assembled table (lower-cased code)
    pub fn column_name(&self) -> &'static str {
        match self {
            Element::Tavg => "tavg",
            Element::Tmax => "tmax",
            Element::Tmin => "tmin",
            Element::Prcp => "prcp",
            Element::Snow => "snow",
            Element::Snwd => "snwd",
        }
    }

    /// Unit scale factor applied to non-missing raw values.
    ///
    /// Temperatures and precipitation are stored in tenths of their unit;
    /// snow measurements are stored whole.
    pub fn scale(&self) -> f64 {
        match self {
            Element::Tavg | Element::Tmax | Element::Tmin | Element::Prcp => 0.1,
            Element::Snow | Element::Snwd => 1.0,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Element::from_code("TMAX"), Some(Element::Tmax));
        assert_eq!(Element::from_code("PRCP"), Some(Element::Prcp));
        assert_eq!(Element::from_code("SNWD"), Some(Element::Snwd));
        assert_eq!(Element::from_code("WESD"), None);
        assert_eq!(Element::from_code(""), None);
    }

    #[test]
    fn test_from_code_trims_padding() {
        assert_eq!(Element::from_code("SNOW "), Some(Element::Snow));
    }

    #[test]
    fn test_code_round_trip() {
        for element in Element::ALL {
            assert_eq!(Element::from_code(element.code()), Some(element));
        }
    }

    #[test]
    fn test_column_names_are_lowercased_codes() {
        for element in Element::ALL {
            assert_eq!(element.column_name(), element.code().to_lowercase());
        }
    }

    #[test]
    fn test_scale_factors() {
        assert_eq!(Element::Tmax.scale(), 0.1);
        assert_eq!(Element::Prcp.scale(), 0.1);
        assert_eq!(Element::Snow.scale(), 1.0);
        assert_eq!(Element::Snwd.scale(), 1.0);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(1), Some(31));
        assert_eq!(days_in_month(2), Some(28));
        assert_eq!(days_in_month(4), Some(30));
        assert_eq!(days_in_month(12), Some(31));
        assert_eq!(days_in_month(0), None);
        assert_eq!(days_in_month(13), None);
    }
}
