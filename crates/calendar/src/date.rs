//! 360-day date with year context.

use crate::doy::{DAYS_PER_YEAR_360, Doy360};
use crate::error::CalendarError;

/// A date in the 360-day calendar.
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day360Date {
    year: i32,
    doy: Doy360,
}

impl Day360Date {
    /// Creates a new `Day360Date` from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] if the month is not 1..=12 or the day is
    /// not 1..=30.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        Ok(Self {
            year,
            doy: Doy360::from_month_day(month, day)?,
        })
    }

    /// Creates a date from a year and an already-validated [`Doy360`].
    pub fn from_year_doy(year: i32, doy: Doy360) -> Self {
        Self { year, doy }
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.doy.month_day().0
    }

    /// Returns the day within the month (1..=30).
    pub fn day(self) -> u8 {
        self.doy.month_day().1
    }

    /// Returns the day-of-year.
    pub fn doy(self) -> Doy360 {
        self.doy
    }

    /// Days elapsed since 360-day 0000-01-01.
    pub fn ordinal(self) -> i64 {
        i64::from(self.year) * i64::from(DAYS_PER_YEAR_360) + self.doy.index() as i64
    }

    /// Inverse of [`Day360Date::ordinal`].
    pub fn from_ordinal(ordinal: i64) -> Result<Self, CalendarError> {
        let per_year = i64::from(DAYS_PER_YEAR_360);
        let year = ordinal.div_euclid(per_year);
        let year = i32::try_from(year).map_err(|_| CalendarError::OutOfRange {
            year: if year < 0 { i32::MIN } else { i32::MAX },
        })?;
        // rem_euclid is in 0..360, so the doy is in 1..=360.
        let doy = Doy360(ordinal.rem_euclid(per_year) as u16 + 1);
        Ok(Self { year, doy })
    }

    /// Returns the date `days` days later (earlier when negative).
    pub fn add_days(self, days: i64) -> Result<Self, CalendarError> {
        let ordinal = self.ordinal().checked_add(days).ok_or(CalendarError::OutOfRange {
            year: if days < 0 { i32::MIN } else { i32::MAX },
        })?;
        Self::from_ordinal(ordinal)
    }

    /// Returns the next day. Day 360 wraps to day 1 of the following year.
    pub fn next(self) -> Self {
        if self.doy.get() == DAYS_PER_YEAR_360 {
            Self {
                year: self.year + 1,
                doy: Doy360(1),
            }
        } else {
            Self {
                year: self.year,
                doy: Doy360(self.doy.get() + 1),
            }
        }
    }
}

impl std::fmt::Display for Day360Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month(), self.day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_iso_like() {
        assert_eq!(Day360Date::new(1981, 2, 30).unwrap().to_string(), "1981-02-30");
    }

    #[test]
    fn new_valid() {
        let date = Day360Date::new(1980, 12, 1).unwrap();
        assert_eq!(date.year(), 1980);
        assert_eq!(date.month(), 12);
        assert_eq!(date.day(), 1);
        assert_eq!(date.doy().get(), 331);
    }

    #[test]
    fn new_feb_30() {
        let date = Day360Date::new(1981, 2, 30).unwrap();
        assert_eq!(date.doy().get(), 60);
    }

    #[test]
    fn new_invalid_day() {
        assert!(Day360Date::new(1981, 3, 31).is_err());
    }

    #[test]
    fn next_month_boundary() {
        let next = Day360Date::new(1981, 2, 30).unwrap().next();
        assert_eq!((next.month(), next.day()), (3, 1));
    }

    #[test]
    fn next_year_wrap() {
        let next = Day360Date::new(1980, 12, 30).unwrap().next();
        assert_eq!(next, Day360Date::new(1981, 1, 1).unwrap());
    }

    #[test]
    fn ordinal_roundtrip_negative_year() {
        let date = Day360Date::new(-3, 7, 14).unwrap();
        assert_eq!(Day360Date::from_ordinal(date.ordinal()).unwrap(), date);
    }

    #[test]
    fn add_days_across_years() {
        let base = Day360Date::new(1970, 1, 1).unwrap();
        assert_eq!(
            base.add_days(360 * 10 + 334).unwrap(),
            Day360Date::new(1980, 12, 5).unwrap()
        );
        assert_eq!(
            base.add_days(-1).unwrap(),
            Day360Date::new(1969, 12, 30).unwrap()
        );
    }

    #[test]
    fn add_days_overflow_is_error() {
        let base = Day360Date::new(1970, 1, 1).unwrap();
        assert_eq!(
            base.add_days(i64::MAX).unwrap_err(),
            CalendarError::OutOfRange { year: i32::MAX }
        );
        assert!(base.add_days(i64::MIN).is_err());
    }

    #[test]
    fn ord_chronological() {
        let dec = Day360Date::new(1980, 12, 30).unwrap();
        let jan = Day360Date::new(1981, 1, 1).unwrap();
        assert!(dec < jan);
    }
}
