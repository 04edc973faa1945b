//! Field constraints for peak, climber and climb records.
//!
//! Lengths are counted in characters, not bytes. The query layer runs these
//! checks before every insert and update.

use chrono::{Datelike, NaiveDate};

use crate::{Error, Result};

pub const PEAK_NAME_MAX: usize = 50;
pub const PEAK_COLOR_MAX: usize = 20;
pub const CLIMBER_NAME_MAX: usize = 100;
pub const CLIMBER_BREED_MAX: usize = 100;
pub const CLIMBER_DESCRIPTION_MAX: usize = 250;

/// Form label of the climb `date` field.
pub const CLIMB_DATE_LABEL: &str = "Climb Date";

/// Climb dates are stored as `YYYY-MM-DD` text; only four-digit years sort
/// chronologically.
pub const CLIMB_YEAR_MIN: i32 = 1;
pub const CLIMB_YEAR_MAX: i32 = 9999;

/// Reject blank values.
pub fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Reject values longer than `max` characters.
pub fn max_chars(field: &str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max {
        return Err(Error::Validation(format!(
            "{field} must be at most {max} characters (got {len})"
        )));
    }
    Ok(())
}

pub fn validate_peak(name: &str, color: &str) -> Result<()> {
    require("name", name)?;
    max_chars("name", name, PEAK_NAME_MAX)?;
    require("color", color)?;
    max_chars("color", color, PEAK_COLOR_MAX)
}

pub fn validate_climber(name: &str, breed: &str, description: &str) -> Result<()> {
    require("name", name)?;
    max_chars("name", name, CLIMBER_NAME_MAX)?;
    require("breed", breed)?;
    max_chars("breed", breed, CLIMBER_BREED_MAX)?;
    require("description", description)?;
    max_chars("description", description, CLIMBER_DESCRIPTION_MAX)
}

/// Reject dates outside 0001-01-01 ..= 9999-12-31.
pub fn validate_climb_date(date: NaiveDate) -> Result<()> {
    if !(CLIMB_YEAR_MIN..=CLIMB_YEAR_MAX).contains(&date.year()) {
        return Err(Error::Validation(format!(
            "{CLIMB_DATE_LABEL} must be between 0001-01-01 and 9999-12-31 (got {date})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_ok() {
        validate_peak("Mont Blanc", "white").unwrap();
    }

    #[test]
    fn peak_blank_name() {
        let err = validate_peak("   ", "white").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: name is required");
    }

    #[test]
    fn peak_color_too_long() {
        let color = "c".repeat(PEAK_COLOR_MAX + 1);
        let err = validate_peak("K2", &color).unwrap_err();
        assert!(err.to_string().contains("color must be at most 20"));
    }

    #[test]
    fn limits_count_chars_not_bytes() {
        // 50 two-byte characters is still within the limit.
        let name = "é".repeat(PEAK_NAME_MAX);
        validate_peak(&name, "red").unwrap();
    }

    #[test]
    fn climber_description_limit() {
        let ok = "d".repeat(CLIMBER_DESCRIPTION_MAX);
        validate_climber("Reinhold", "alpinist", &ok).unwrap();

        let long = "d".repeat(CLIMBER_DESCRIPTION_MAX + 1);
        assert!(validate_climber("Reinhold", "alpinist", &long).is_err());
    }

    #[test]
    fn climber_requires_breed() {
        let err = validate_climber("Reinhold", "", "bio").unwrap_err();
        assert!(err.to_string().contains("breed is required"));
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn climb_date_bounds() {
        validate_climb_date(day(1, 1, 1)).unwrap();
        validate_climb_date(day(9999, 12, 31)).unwrap();
        validate_climb_date(day(2024, 6, 1)).unwrap();

        for bad in [day(0, 12, 31), day(-500, 1, 1), day(10000, 1, 1)] {
            let err = validate_climb_date(bad).unwrap_err();
            assert!(matches!(err, Error::Validation(_)));
            assert!(err.to_string().contains("Climb Date must be between"));
        }
    }
}
