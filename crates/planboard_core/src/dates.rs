//! Parsing helpers for the date strings carried on records.
//!
//! Records keep their dates as text, the way the persistence layer hands them
//! over. Everything here turns that text into `time` values or reports a
//! validation error naming the offending record.

use crate::error::AppError;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// Wall-clock now in the local offset. Engines never call this themselves.
pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(local_offset())
}

/// Parses `YYYY-MM-DD`, or an RFC3339 timestamp whose date part is kept as written.
pub fn parse_calendar_date(value: &str, context: &str) -> Result<Date, AppError> {
    let trimmed = value.trim();
    if let Ok(date) = Date::parse(trimmed, format_description!("[year]-[month]-[day]")) {
        return Ok(date);
    }

    OffsetDateTime::parse(trimmed, &Rfc3339)
        .map(|parsed| parsed.date())
        .map_err(|_| {
            AppError::validation(format!(
                "{context} must be YYYY-MM-DD or RFC3339, got '{trimmed}'"
            ))
        })
}

/// Parses an RFC3339 timestamp into `offset`; a bare date means midnight there.
pub fn parse_timestamp(
    value: &str,
    offset: UtcOffset,
    context: &str,
) -> Result<OffsetDateTime, AppError> {
    let trimmed = value.trim();
    if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Ok(parsed.to_offset(offset));
    }

    Date::parse(trimmed, format_description!("[year]-[month]-[day]"))
        .map(|date| date.midnight().assume_offset(offset))
        .map_err(|_| AppError::validation(format!("{context} must be RFC3339, got '{trimmed}'")))
}

pub fn format_timestamp(value: OffsetDateTime) -> Result<String, AppError> {
    value
        .format(&Rfc3339)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}

pub fn end_of_month(date: Date) -> Date {
    let last_day = time::util::days_in_year_month(date.year(), date.month());
    date.replace_day(last_day).unwrap_or(date)
}

/// Zero-based month index, January = 0.
pub fn month_index(date: Date) -> u8 {
    u8::from(date.month()) - 1
}
