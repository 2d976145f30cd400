// File: ./src/model/clock.rs
// Time-of-day normalization ("9:00" -> "09:00").
use crate::error::{ConvertError, Result};
use chrono::NaiveTime;

/// Parses `H:MM` or `HH:MM` on a 24-hour clock. Minutes must be two digits.
pub fn parse_clock_time(raw: &str) -> Result<NaiveTime> {
    let text = raw.trim();
    let invalid = || ConvertError::format(format!("Invalid time of day '{}'", text));

    let (hour, minute) = text.split_once(':').ok_or_else(invalid)?;
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(hour) || hour.len() > 2 || !digits(minute) || minute.len() != 2 {
        return Err(invalid());
    }

    let hour: u32 = hour.parse().map_err(|_| invalid())?;
    let minute: u32 = minute.parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

pub fn normalize_time(raw: &str) -> Result<String> {
    Ok(parse_clock_time(raw)?.format("%H:%M").to_string())
}
