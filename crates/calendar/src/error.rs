//! Error types for the recal-calendar crate.

/// Error type for all fallible operations in the recal-calendar crate.
///
/// Covers validation of 360-day dates, calendar names as they appear in
/// CF `calendar` attributes, and CF time-unit strings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a 360-day day-of-year is outside 1..=360.
    #[error("invalid 360-day day of year: {doy} (must be 1..=360)")]
    InvalidDoy {
        /// The rejected day-of-year.
        doy: u16,
    },

    /// Returned when a month number is outside 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The rejected month.
        month: u8,
    },

    /// Returned when a day number exceeds the length of its month.
    #[error("invalid day: {day} for month {month} (max {max_day})")]
    InvalidDay {
        /// The rejected day.
        day: u8,
        /// The month the day was checked against.
        month: u8,
        /// Largest valid day for that month.
        max_day: u8,
    },

    /// Returned when a calendar name is not a recognised CF calendar.
    #[error("unknown calendar: '{name}'")]
    UnknownCalendar {
        /// The unrecognised name.
        name: String,
    },

    /// Returned when a time axis that must be 360-day uses another calendar.
    #[error("expected a 360_day calendar, found '{calendar}'")]
    NotDay360 {
        /// CF name of the calendar that was found.
        calendar: String,
    },

    /// Returned when a CF time-units string cannot be parsed.
    #[error("invalid time units '{units}': {reason}")]
    InvalidUnits {
        /// The units string as read.
        units: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Returned when a time offset is not a finite number.
    #[error("non-finite time offset at index {index}")]
    NonFiniteOffset {
        /// Position of the offending offset.
        index: usize,
    },

    /// Returned when a date falls outside the range chrono can represent.
    #[error("date out of range: year {year}")]
    OutOfRange {
        /// Year of the unrepresentable date.
        year: i32,
    },
}
