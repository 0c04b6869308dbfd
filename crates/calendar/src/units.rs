//! CF time units (`"<unit> since <date>"`) and time axis decoding.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::calendar::Calendar;
use crate::date::Day360Date;
use crate::error::CalendarError;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Day offsets beyond the 360-day years an `i32` can number.
const MAX_WHOLE_DAYS: f64 = i32::MAX as f64 * 360.0;
const MIN_WHOLE_DAYS: f64 = i32::MIN as f64 * 360.0;

/// Unit of a CF time offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    /// Length of one unit in seconds.
    pub fn seconds(self) -> f64 {
        match self {
            Self::Days => SECONDS_PER_DAY,
            Self::Hours => 3_600.0,
            Self::Minutes => 60.0,
            Self::Seconds => 1.0,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
        }
    }
}

/// Parsed CF time units, e.g. `hours since 1970-01-01 00:00:00`.
///
/// The reference date is kept as raw fields because it is interpreted in
/// the calendar of the axis it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeUnits {
    unit: TimeUnit,
    year: i32,
    month: u8,
    day: u8,
    /// Seconds after midnight of the reference instant.
    seconds: f64,
}

impl TimeUnits {
    /// Creates units of `unit` since midnight of the given date.
    pub fn new(unit: TimeUnit, year: i32, month: u8, day: u8) -> Self {
        Self {
            unit,
            year,
            month,
            day,
            seconds: 0.0,
        }
    }

    /// Returns the offset unit.
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Returns the reference `(year, month, day)`.
    pub fn reference(&self) -> (i32, u8, u8) {
        (self.year, self.month, self.day)
    }

    fn offset_in_days(&self, offset: f64) -> f64 {
        (offset * self.unit.seconds() + self.seconds) / SECONDS_PER_DAY
    }

    fn days_to_offset(&self, days: f64) -> f64 {
        (days * SECONDS_PER_DAY - self.seconds) / self.unit.seconds()
    }

    /// Decodes one offset on a 360-day axis into its date and the fraction
    /// of the day elapsed (0.0..1.0).
    pub fn decode_day360(&self, offset: f64) -> Result<(Day360Date, f64), CalendarError> {
        let reference = Day360Date::new(self.year, self.month, self.day)?;
        let days = self.offset_in_days(offset);
        let whole = days.floor();
        if !(MIN_WHOLE_DAYS..=MAX_WHOLE_DAYS).contains(&whole) {
            return Err(CalendarError::OutOfRange {
                year: if whole < 0.0 { i32::MIN } else { i32::MAX },
            });
        }
        let date = reference.add_days(whole as i64)?;
        Ok((date, days - whole))
    }

    /// Encodes a Gregorian date plus day fraction as an offset in these units.
    ///
    /// Reference days past the end of a Gregorian month are clamped, so a
    /// 360-day reference like `1970-02-30` stays usable.
    pub fn encode_standard(&self, date: NaiveDate, day_fraction: f64) -> Result<f64, CalendarError> {
        let reference = self.standard_reference()?;
        let days = (date - reference).num_days() as f64 + day_fraction;
        Ok(self.days_to_offset(days))
    }

    fn standard_reference(&self) -> Result<NaiveDate, CalendarError> {
        let reference = Day360Date::new(self.year, self.month, self.day)
            .and_then(crate::align::clamp_to_standard);
        match reference {
            Ok(date) => Ok(date),
            // Day 31 references are valid Gregorian dates but not 360-day ones.
            Err(_) => NaiveDate::from_ymd_opt(self.year, u32::from(self.month), u32::from(self.day))
                .ok_or_else(|| CalendarError::InvalidUnits {
                    units: self.to_string(),
                    reason: "reference date is not a valid date".to_string(),
                }),
        }
    }
}

impl fmt::Display for TimeUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.seconds.max(0.0);
        let secs = seconds.trunc() as u32;
        write!(
            f,
            "{} since {:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.unit.name(),
            self.year,
            self.month,
            self.day,
            secs / 3600,
            (secs / 60) % 60,
            secs % 60
        )?;
        let fraction = seconds.fract();
        if fraction > 0.0 {
            // "0.5" -> ".5"
            f.write_str(fraction.to_string().trim_start_matches('0'))?;
        }
        Ok(())
    }
}

impl FromStr for TimeUnits {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| CalendarError::InvalidUnits {
            units: s.to_string(),
            reason,
        };

        let mut parts = s.split_whitespace();
        let unit = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            Some("days" | "day" | "d") => TimeUnit::Days,
            Some("hours" | "hour" | "hr" | "h") => TimeUnit::Hours,
            Some("minutes" | "minute" | "min") => TimeUnit::Minutes,
            Some("seconds" | "second" | "sec" | "s") => TimeUnit::Seconds,
            Some(other) => return Err(invalid(format!("unknown unit '{other}'"))),
            None => return Err(invalid("empty units".to_string())),
        };
        if !parts.next().is_some_and(|w| w.eq_ignore_ascii_case("since")) {
            return Err(invalid("expected '<unit> since <date>'".to_string()));
        }
        let date_part = parts
            .next()
            .ok_or_else(|| invalid("missing reference date".to_string()))?;

        // "1970-01-01T00:00:00" carries the time in the same token.
        let (date_str, inline_time) = match date_part.split_once('T') {
            Some((d, t)) => (d, Some(t)),
            None => (date_part, None),
        };
        let fields: Vec<&str> = date_str.split('-').collect();
        let (year, month, day) = match fields.as_slice() {
            // Leading '-' for negative years leaves an empty first field.
            ["", y, m, d] => (format!("-{y}"), *m, *d),
            [y, m, d] => (y.to_string(), *m, *d),
            _ => return Err(invalid(format!("malformed date '{date_str}'"))),
        };
        let year: i32 = year
            .parse()
            .map_err(|_| invalid(format!("malformed year '{year}'")))?;
        let month: u8 = month
            .parse()
            .map_err(|_| invalid(format!("malformed month '{month}'")))?;
        let day: u8 = day
            .parse()
            .map_err(|_| invalid(format!("malformed day '{day}'")))?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(invalid(format!("date out of range '{date_str}'")));
        }

        let seconds = match inline_time.or_else(|| parts.next()) {
            Some(time) => parse_clock(time).ok_or_else(|| invalid(format!("malformed time '{time}'")))?,
            None => 0.0,
        };

        Ok(Self {
            unit,
            year,
            month,
            day,
            seconds,
        })
    }
}

/// Parses `HH[:MM[:SS[.fff]]]`, ignoring a trailing `Z`.
fn parse_clock(time: &str) -> Option<f64> {
    let time = time.trim_end_matches('Z');
    let mut fields = time.split(':');
    let hours: f64 = fields.next()?.parse().ok()?;
    let minutes: f64 = fields.next().map_or(Ok(0.0), str::parse).ok()?;
    let seconds: f64 = fields.next().map_or(Ok(0.0), str::parse).ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(hours * 3_600.0 + minutes * 60.0 + seconds)
}

/// A decoded time coordinate: calendar, units and raw offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    pub calendar: Calendar,
    pub units: TimeUnits,
    pub offsets: Vec<f64>,
}

impl TimeAxis {
    pub fn new(calendar: Calendar, units: TimeUnits, offsets: Vec<f64>) -> Self {
        Self {
            calendar,
            units,
            offsets,
        }
    }

    /// Number of timestamps.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the axis has no timestamps.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Decodes every offset as a 360-day date.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::NotDay360`] when the axis uses any other
    /// calendar, and [`CalendarError::NonFiniteOffset`] for NaN or infinite
    /// offsets.
    pub fn decode_day360(&self) -> Result<Vec<Day360Date>, CalendarError> {
        if self.calendar != Calendar::Day360 {
            return Err(CalendarError::NotDay360 {
                calendar: self.calendar.to_string(),
            });
        }
        self.offsets
            .iter()
            .enumerate()
            .map(|(index, &offset)| {
                if !offset.is_finite() {
                    return Err(CalendarError::NonFiniteOffset { index });
                }
                self.units.decode_day360(offset).map(|(date, _)| date)
            })
            .collect()
    }

    /// Fraction of the day elapsed at the first timestamp, e.g. 0.5 for
    /// midday values. Zero for an empty axis.
    pub fn first_day_fraction(&self) -> Result<f64, CalendarError> {
        match self.offsets.first() {
            Some(&offset) => self.units.decode_day360(offset).map(|(_, frac)| frac),
            None => Ok(0.0),
        }
    }
}
