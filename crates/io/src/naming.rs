//! UKCP convection permitting model file names.
//!
//! Daily CPM files are named like
//! `tasmax_rcp85_land-cpm_uk_2.2km_01_day_19801201-19811130.nc`: variable,
//! scenario, domain, resolution, ensemble member, frequency, then the
//! 360-day date range covered.

use std::path::{Path, PathBuf};

use recal_calendar::Day360Date;

use crate::error::IoError;

/// Frequency marker rewritten in converted file names.
const DAILY_MARKER: &str = "_day";
const CONVERTED_MARKER: &str = "_day_std_year";

/// Name of the Gregorian calendar version of `path`, in the same directory.
///
/// `_day` becomes `_day_std_year`. Names without `_day` get `_std_year`
/// appended to the stem.
pub fn standard_calendar_file_name(path: &Path) -> PathBuf {
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    let converted = if name.contains(DAILY_MARKER) {
        name.replace(DAILY_MARKER, CONVERTED_MARKER)
    } else {
        let stem = path.file_stem().unwrap_or_default().to_string_lossy();
        match path.extension() {
            Some(ext) => format!("{stem}_std_year.{}", ext.to_string_lossy()),
            None => format!("{stem}_std_year"),
        }
    };
    path.with_file_name(converted)
}

/// First and last 360-day dates in a file name's trailing
/// `_YYYYMMDD-YYYYMMDD` range.
///
/// # Errors
///
/// Returns [`IoError::InvalidFileName`] if the range is missing or either
/// date is not a valid 360-day date.
pub fn file_name_date_range(path: &Path) -> Result<(Day360Date, Day360Date), IoError> {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let invalid = |reason: String| IoError::InvalidFileName {
        name: path.file_name().unwrap_or_default().to_string_lossy().into_owned(),
        reason,
    };

    let range = stem
        .rsplit('_')
        .next()
        .ok_or_else(|| invalid("no date range".into()))?;
    let (start, end) = range
        .split_once('-')
        .ok_or_else(|| invalid(format!("'{range}' is not a YYYYMMDD-YYYYMMDD range")))?;

    let start = parse_compact_date(start).map_err(&invalid)?;
    let end = parse_compact_date(end).map_err(&invalid)?;
    if end < start {
        return Err(invalid(format!("range ends on {end}, before it starts on {start}")));
    }
    Ok((start, end))
}

/// Parse `YYYYMMDD` as a 360-day date.
fn parse_compact_date(s: &str) -> Result<Day360Date, String> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("'{s}' is not a YYYYMMDD date"));
    }
    let field = |range: std::ops::Range<usize>| s[range].parse::<u16>().map_err(|e| e.to_string());
    let year = field(0..4)?;
    let month = field(4..6)?;
    let day = field(6..8)?;
    Day360Date::new(i32::from(year), month as u8, day as u8).map_err(|e| format!("'{s}': {e}"))
}
