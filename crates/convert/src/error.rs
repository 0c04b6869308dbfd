//! Error types for the recal-convert crate.

use recal_calendar::CalendarError;

/// Error type for all fallible operations in the recal-convert crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    /// Returned when the input series has no timestamps.
    #[error("input series is empty")]
    EmptySeries,

    /// Returned when values and timestamps differ in length.
    #[error("length mismatch: {values} values for {dates} timestamps")]
    LengthMismatch {
        /// Number of values along the time axis.
        values: usize,
        /// Number of timestamps.
        dates: usize,
    },

    /// Returned when timestamps do not strictly increase by whole days.
    #[error("timestamps not strictly increasing at index {index}: {previous} then {current}")]
    NonMonotonic {
        /// Position of the offending timestamp.
        index: usize,
        /// Date of the timestamp before it.
        previous: String,
        /// Date of the offending timestamp.
        current: String,
    },

    /// Returned when the requested target is not a Gregorian calendar.
    #[error("unsupported target calendar '{calendar}' (expected standard or proleptic_gregorian)")]
    UnsupportedTarget {
        /// CF name of the rejected calendar.
        calendar: String,
    },

    /// Returned when an interpolation policy name is not recognised.
    #[error("unknown interpolation method: '{name}' (expected 'nearest' or 'linear')")]
    UnknownInterpolation {
        /// The unrecognised name.
        name: String,
    },

    /// Returned when an edge-fill name is not recognised.
    #[error("unknown edge fill: '{name}' (expected 'nearest' or 'extrapolate')")]
    UnknownEdgeFill {
        /// The unrecognised name.
        name: String,
    },

    /// Returned when the time axis index exceeds the array rank.
    #[error("time axis {axis} out of range for a {ndim}-dimensional array")]
    TimeAxisOutOfRange {
        /// Requested axis.
        axis: usize,
        /// Rank of the array.
        ndim: usize,
    },

    /// Calendar-level failure while decoding or placing dates.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}
