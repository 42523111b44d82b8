//! Date-range parsing and defaulting for aggregation queries.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::error::AppError;

/// Default aggregation window when no dates are supplied.
const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Parses an ISO-8601 date string into a UTC instant.
///
/// Accepts full RFC 3339 timestamps (`2026-08-01T12:00:00Z`) and plain
/// dates (`2026-08-01`, interpreted as UTC midnight).
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] for anything else.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(ts.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| AppError::bad_request(format!("Invalid date: {input}")))?;
        return Ok(midnight.and_utc());
    }

    Err(AppError::bad_request(format!(
        "Invalid date format: {input} (expected ISO-8601)"
    )))
}

/// Resolves an optional start/end pair into a concrete window.
///
/// Missing end defaults to now; missing start defaults to seven days before
/// the end.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] if either date fails to parse or the
/// start is after the end.
pub fn resolve_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
    let end = match end {
        Some(raw) => parse_date(raw)?,
        None => Utc::now(),
    };

    let start = match start {
        Some(raw) => parse_date(raw)?,
        None => end - Duration::days(DEFAULT_WINDOW_DAYS),
    };

    if start > end {
        return Err(AppError::bad_request("startDate must not be after endDate"));
    }

    Ok((start, end))
}
