use chrono::NaiveTime;
use thiserror::Error;

pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("Invalid time format. Please use HH:MM format.")]
    InvalidTimeFormat { value: String },
}

/// Parses a strict 24-hour `HH:MM` string.
///
/// chrono alone accepts single-digit hours and surrounding whitespace in some
/// positions, so the shape is checked before handing the string over.
pub fn parse_time(value: &str) -> Result<NaiveTime, TaskError> {
    let invalid = || TaskError::InvalidTimeFormat {
        value: value.to_string(),
    };

    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&idx| bytes[idx].is_ascii_digit());
    if !well_formed {
        return Err(invalid());
    }

    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| invalid())
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}
