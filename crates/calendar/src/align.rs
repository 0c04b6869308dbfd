//! Year-aligned placement of 360-day dates on the Gregorian calendar.

use chrono::{Datelike, NaiveDate};

use crate::calendar::is_leap_year;
use crate::date::Day360Date;
use crate::doy::DAYS_PER_MONTH_360;
use crate::error::CalendarError;
use crate::gaps::{aligned_doy, gap_doys, source_doy};

/// Gregorian month lengths in a common year (index 0 unused).
const STANDARD_DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days in a Gregorian month.
pub fn standard_days_in_month(year: i32, month: u8) -> u8 {
    if month == 2 && is_leap_year(year) {
        29
    } else {
        STANDARD_DAYS_PER_MONTH[usize::from(month)]
    }
}

/// Gregorian date for day-of-year `doy` of `year`.
pub fn standard_date(year: i32, doy: u16) -> Result<NaiveDate, CalendarError> {
    NaiveDate::from_yo_opt(year, u32::from(doy)).ok_or(CalendarError::OutOfRange { year })
}

/// Gregorian date a 360-day date lands on under year alignment.
///
/// The result is always in the same year as `date`.
pub fn align_to_standard(date: Day360Date) -> Result<NaiveDate, CalendarError> {
    let doy = aligned_doy(date.doy(), is_leap_year(date.year()));
    standard_date(date.year(), doy)
}

/// Gregorian date with the same year, month and day, with days past the
/// end of the Gregorian month clamped to its last day.
///
/// Used for the start of a converted range, so 360-day Feb 30 becomes
/// Feb 28 or Feb 29.
pub fn clamp_to_standard(date: Day360Date) -> Result<NaiveDate, CalendarError> {
    let day = date.day().min(standard_days_in_month(date.year(), date.month()));
    NaiveDate::from_ymd_opt(date.year(), u32::from(date.month()), u32::from(day))
        .ok_or(CalendarError::OutOfRange { year: date.year() })
}

/// Last Gregorian day of a range ending on `date`.
///
/// Like [`clamp_to_standard`], except that the last day of a 360-day month
/// stays the last day of the month, so a range ending on 360-day Dec 30
/// ends on Dec 31.
pub fn span_end_to_standard(date: Day360Date) -> Result<NaiveDate, CalendarError> {
    if date.day() == DAYS_PER_MONTH_360 {
        let day = standard_days_in_month(date.year(), date.month());
        return NaiveDate::from_ymd_opt(date.year(), u32::from(date.month()), u32::from(day))
            .ok_or(CalendarError::OutOfRange { year: date.year() });
    }
    clamp_to_standard(date)
}

/// 360-day date whose value a Gregorian date carries, or `None` when the
/// date is a gap position.
pub fn source_of_standard(date: NaiveDate) -> Option<Day360Date> {
    let year = date.year();
    source_doy(date.ordinal() as u16, is_leap_year(year)).map(|doy| Day360Date::from_year_doy(year, doy))
}

/// Whether a Gregorian date is a gap position.
pub fn is_standard_gap(date: NaiveDate) -> bool {
    source_of_standard(date).is_none()
}

/// Gregorian dates synthesised when converting `year`: 5 in a common
/// year, 6 in a leap year.
pub fn standard_gap_dates(year: i32) -> Result<Vec<NaiveDate>, CalendarError> {
    gap_doys(is_leap_year(year))
        .iter()
        .map(|&doy| standard_date(year, doy))
        .collect()
}
