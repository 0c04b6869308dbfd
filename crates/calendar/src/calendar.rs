//! CF calendar kinds and year classification.

use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

/// A calendar as named by the CF `calendar` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Calendar {
    /// Twelve months of thirty days.
    Day360,
    /// Mixed Julian/Gregorian (`standard`, `gregorian`).
    Standard,
    /// Gregorian rules extended backwards indefinitely.
    ProlepticGregorian,
    /// 365 days every year (`noleap`, `365_day`).
    NoLeap,
    /// 366 days every year (`all_leap`, `366_day`).
    AllLeap,
    /// Julian leap rule (every fourth year).
    Julian,
}

impl Calendar {
    /// Canonical CF name written back into `calendar` attributes.
    pub fn cf_name(self) -> &'static str {
        match self {
            Self::Day360 => "360_day",
            Self::Standard => "standard",
            Self::ProlepticGregorian => "proleptic_gregorian",
            Self::NoLeap => "noleap",
            Self::AllLeap => "all_leap",
            Self::Julian => "julian",
        }
    }

    /// Whether dates in this calendar follow the Gregorian leap rule.
    ///
    /// `Standard` switches to Julian before 1582-10-15; this crate only
    /// works with dates after that and treats it as Gregorian.
    pub fn is_gregorian(self) -> bool {
        matches!(self, Self::Standard | Self::ProlepticGregorian)
    }

    /// Number of days in `year` under this calendar.
    pub fn days_in_year(self, year: i32) -> u16 {
        match self {
            Self::Day360 => 360,
            Self::NoLeap => 365,
            Self::AllLeap => 366,
            Self::Julian => {
                if year.rem_euclid(4) == 0 {
                    366
                } else {
                    365
                }
            }
            Self::Standard | Self::ProlepticGregorian => YearKind::of_standard(year).days(),
        }
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cf_name())
    }
}

impl FromStr for Calendar {
    type Err = CalendarError;

    /// Parses a CF calendar name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "360_day" => Ok(Self::Day360),
            "standard" | "gregorian" => Ok(Self::Standard),
            "proleptic_gregorian" => Ok(Self::ProlepticGregorian),
            "noleap" | "365_day" => Ok(Self::NoLeap),
            "all_leap" | "366_day" => Ok(Self::AllLeap),
            "julian" => Ok(Self::Julian),
            _ => Err(CalendarError::UnknownCalendar {
                name: s.to_string(),
            }),
        }
    }
}

/// Length class of a single year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YearKind {
    /// A 360-day model year.
    Day360,
    /// A Gregorian common year.
    Standard,
    /// A Gregorian leap year.
    StandardLeap,
}

impl YearKind {
    /// Classifies a Gregorian year.
    pub fn of_standard(year: i32) -> Self {
        if is_leap_year(year) {
            Self::StandardLeap
        } else {
            Self::Standard
        }
    }

    /// Days in a year of this kind.
    pub fn days(self) -> u16 {
        match self {
            Self::Day360 => 360,
            Self::Standard => 365,
            Self::StandardLeap => 366,
        }
    }

    /// Number of days a 360-day year must gain to become this kind.
    pub fn gap_count(self) -> usize {
        usize::from(self.days() - 360)
    }
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cf_names() {
        assert_eq!("360_day".parse::<Calendar>().unwrap(), Calendar::Day360);
        assert_eq!("gregorian".parse::<Calendar>().unwrap(), Calendar::Standard);
        assert_eq!("Standard".parse::<Calendar>().unwrap(), Calendar::Standard);
        assert_eq!(
            "proleptic_gregorian".parse::<Calendar>().unwrap(),
            Calendar::ProlepticGregorian
        );
        assert_eq!("365_day".parse::<Calendar>().unwrap(), Calendar::NoLeap);
        assert_eq!("366_day".parse::<Calendar>().unwrap(), Calendar::AllLeap);
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            "lunar".parse::<Calendar>().unwrap_err(),
            CalendarError::UnknownCalendar {
                name: "lunar".to_string()
            }
        );
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for cal in [
            Calendar::Day360,
            Calendar::Standard,
            Calendar::ProlepticGregorian,
            Calendar::NoLeap,
            Calendar::AllLeap,
            Calendar::Julian,
        ] {
            assert_eq!(cal.to_string().parse::<Calendar>().unwrap(), cal);
        }
    }

    #[test]
    fn days_in_year() {
        assert_eq!(Calendar::Day360.days_in_year(2000), 360);
        assert_eq!(Calendar::Standard.days_in_year(2000), 366);
        assert_eq!(Calendar::Standard.days_in_year(1900), 365);
        assert_eq!(Calendar::Julian.days_in_year(1900), 366);
        assert_eq!(Calendar::NoLeap.days_in_year(2004), 365);
        assert_eq!(Calendar::AllLeap.days_in_year(2003), 366);
    }

    #[test]
    fn gregorian_family() {
        assert!(Calendar::Standard.is_gregorian());
        assert!(Calendar::ProlepticGregorian.is_gregorian());
        assert!(!Calendar::Day360.is_gregorian());
        assert!(!Calendar::Julian.is_gregorian());
    }

    #[test]
    fn year_kind() {
        assert_eq!(YearKind::of_standard(1981), YearKind::Standard);
        assert_eq!(YearKind::of_standard(1980), YearKind::StandardLeap);
        assert_eq!(YearKind::of_standard(2100), YearKind::Standard);
        assert_eq!(YearKind::of_standard(2000), YearKind::StandardLeap);
        assert_eq!(YearKind::Day360.gap_count(), 0);
        assert_eq!(YearKind::Standard.gap_count(), 5);
        assert_eq!(YearKind::StandardLeap.gap_count(), 6);
    }
}
