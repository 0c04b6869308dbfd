//! Day-of-year newtype for the 360-day calendar.

use crate::error::CalendarError;

/// Days in every month of the 360-day calendar.
pub const DAYS_PER_MONTH_360: u8 = 30;

/// Days in a 360-day year.
pub const DAYS_PER_YEAR_360: u16 = 360;

/// Day-of-year in the 360-day calendar (1..=360).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Doy360(pub(crate) u16);

impl Doy360 {
    /// Creates a new `Doy360`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if `doy` is not in 1..=360.
    pub fn new(doy: u16) -> Result<Self, CalendarError> {
        if !(1..=DAYS_PER_YEAR_360).contains(&doy) {
            return Err(CalendarError::InvalidDoy { doy });
        }
        Ok(Self(doy))
    }

    /// Creates a `Doy360` from a (month, day) pair.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] or [`CalendarError::InvalidDay`]
    /// when the pair is not a 360-day date. Day 31 never exists; Feb 30 does.
    pub fn from_month_day(month: u8, day: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        if !(1..=DAYS_PER_MONTH_360).contains(&day) {
            return Err(CalendarError::InvalidDay {
                day,
                month,
                max_day: DAYS_PER_MONTH_360,
            });
        }
        Ok(Self(u16::from(month - 1) * 30 + u16::from(day)))
    }

    /// Returns the inner value (1..=360).
    pub fn get(self) -> u16 {
        self.0
    }

    /// Returns the 0-based index (0..=359).
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Returns the `(month, day)` pair.
    pub fn month_day(self) -> (u8, u8) {
        let i = self.0 - 1;
        ((i / 30) as u8 + 1, (i % 30) as u8 + 1)
    }
}
