//! Trip request validation
//!
//! Pure checks on destination length, date ordering, and trip span.
//! Runs before any network call and touches no clock: the dates are
//! caller-supplied, never wall-clock-relative.

use crate::{Result, WanderplanError};
use chrono::NaiveDate;

/// Longest trip that can be planned, in inclusive days
pub const MAX_TRIP_DAYS: i64 = 14;

const MIN_DESTINATION_LEN: usize = 2;
const MAX_DESTINATION_LEN: usize = 60;

/// A validated trip span with parsed dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Whole-day difference + 1
    pub days: i64,
}

/// Validate destination and date strings for an itinerary request.
///
/// Returns the parsed span on success, or a single human-readable
/// validation error.
pub fn validate_trip(destination: &str, start_date: &str, end_date: &str) -> Result<TripSpan> {
    let destination = destination.trim();
    if destination.chars().count() < MIN_DESTINATION_LEN
        || destination.chars().count() > MAX_DESTINATION_LEN
    {
        return Err(WanderplanError::validation(format!(
            "Destination must be between {MIN_DESTINATION_LEN} and {MAX_DESTINATION_LEN} characters"
        )));
    }

    let start = parse_date(start_date, "start")?;
    let end = parse_date(end_date, "end")?;

    if end < start {
        return Err(WanderplanError::validation(
            "End date cannot be earlier than start date",
        ));
    }

    let days = (end - start).num_days() + 1;
    if days > MAX_TRIP_DAYS {
        return Err(WanderplanError::validation(format!(
            "Trip cannot be longer than {MAX_TRIP_DAYS} days"
        )));
    }

    Ok(TripSpan { start, end, days })
}

fn parse_date(value: &str, which: &str) -> Result<NaiveDate> {
    if value.trim().is_empty() {
        return Err(WanderplanError::validation(format!(
            "Missing {which} date"
        )));
    }
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        WanderplanError::validation(format!(
            "Invalid {which} date '{value}'. Expected YYYY-MM-DD"
        ))
    })
}
