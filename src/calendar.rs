//! Working-day calendar arithmetic.
//!
//! Maps a schedule day number onto a concrete calendar date. The working-day
//! rule is explicit: with `working_days_per_week = N`, the first N weekdays
//! counted from Monday are working days (N=5 gives Mon-Fri, N=3 gives
//! Mon-Wed, N=7 gives every day). Non-working dates are stepped over without
//! consuming a day number.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{Error, Result};

/// Returns true if `date` counts toward the schedule under the configured
/// working-days rule.
pub fn is_working_day(date: NaiveDate, working_days_per_week: u32) -> bool {
    date.weekday().num_days_from_monday() < working_days_per_week
}

/// Compute the calendar date for a 1-based schedule day number.
///
/// Day 1 is `start_date` itself, even if it falls outside the working-day
/// rule (the schedule starts where the caller says it starts). Later days
/// step forward one calendar day at a time, counting only working days.
pub fn date_for_day(
    start_date: NaiveDate,
    day_number: u32,
    working_days_per_week: u32,
) -> Result<NaiveDate> {
    validate_working_days(working_days_per_week)?;
    if day_number == 0 {
        return Err(Error::InvalidArgument(
            "day number must be at least 1".to_string(),
        ));
    }

    let mut current = start_date;
    let mut days_counted = 1u32;
    while days_counted < day_number {
        current = current
            .checked_add_days(Days::new(1))
            .ok_or_else(|| Error::InvalidArgument("date out of range".to_string()))?;
        if is_working_day(current, working_days_per_week) {
            days_counted += 1;
        }
    }

    Ok(current)
}

/// Validate the working-days-per-week parameter (1..=7).
pub fn validate_working_days(working_days_per_week: u32) -> Result<()> {
    if !(1..=7).contains(&working_days_per_week) {
        return Err(Error::InvalidArgument(format!(
            "working days per week must be between 1 and 7, got {working_days_per_week}"
        )));
    }
    Ok(())
}
