//! Date sequence generation for the 360-day and Gregorian calendars.

use chrono::NaiveDate;

use crate::date::Day360Date;

/// Generates `n_days` consecutive 360-day dates starting at `start`.
///
/// # Example
///
/// ```ignore
/// let start = Day360Date::new(1980, 12, 29).unwrap();
/// let dates = day360_sequence(start, 3);
/// // Dec 29, Dec 30, Jan 1 (1981)
/// ```
pub fn day360_sequence(start: Day360Date, n_days: usize) -> Vec<Day360Date> {
    std::iter::successors(Some(start), |d| Some(d.next()))
        .take(n_days)
        .collect()
}

/// Every Gregorian date from `start` to `end`, both inclusive.
///
/// Empty when `end` precedes `start`.
pub fn standard_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}
