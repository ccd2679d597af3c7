//! Validation rules and custom validators

use chrono::{NaiveDate, NaiveTime};
use validator::ValidationError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn validate_date(date: &str) -> Result<(), ValidationError> {
    if date.trim().is_empty() {
        return Err(ValidationError::new("Date cannot be empty"));
    }

    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| ValidationError::new("Date must use the YYYY-MM-DD format"))
}

pub fn validate_time(time: &str) -> Result<(), ValidationError> {
    if time.trim().is_empty() {
        return Err(ValidationError::new("Time cannot be empty"));
    }

    NaiveTime::parse_from_str(time.trim(), TIME_FORMAT)
        .map(|_| ())
        .map_err(|_| ValidationError::new("Time must use the HH:MM format"))
}

/// Rejects values containing line breaks, for short fields such as names.
pub fn validate_single_line(value: &str) -> Result<(), ValidationError> {
    if value.contains(['\n', '\r']) {
        return Err(ValidationError::new("Value must fit on a single line"));
    }

    Ok(())
}
