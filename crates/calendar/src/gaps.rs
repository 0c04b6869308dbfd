//! Gap positions of the year-aligned 360-day to Gregorian mapping.
//!
//! A 360-day day-of-year `d` lands on Gregorian day-of-year
//! `round_half_even(N * d / 360)` of the same year, `N` being 365 or 366.
//! That mapping is injective, so a Gregorian year has 5 or 6 days nothing
//! maps onto. Those days are fixed and listed below.

use crate::doy::{DAYS_PER_YEAR_360, Doy360};

/// Gregorian day-of-year positions with no 360-day counterpart in a
/// common year: Feb 6, Apr 19, Jul 2, Sep 12, Nov 25.
#[rustfmt::skip]
pub const NON_LEAP_GAP_DOYS: [u16; 5] = [37, 109, 183, 255, 329];

/// Gregorian day-of-year positions with no 360-day counterpart in a
/// leap year: Jan 31, Mar 31, Jun 1, Jul 31, Oct 1, Nov 30.
#[rustfmt::skip]
pub const LEAP_GAP_DOYS: [u16; 6] = [31, 91, 153, 213, 275, 335];

/// Gap positions for a common (`leap = false`) or leap year, ascending.
pub fn gap_doys(leap: bool) -> &'static [u16] {
    if leap {
        &LEAP_GAP_DOYS
    } else {
        &NON_LEAP_GAP_DOYS
    }
}

/// Whether Gregorian day-of-year `doy` is a gap position.
pub fn is_gap(doy: u16, leap: bool) -> bool {
    gap_doys(leap).contains(&doy)
}

fn year_len(leap: bool) -> u16 {
    if leap { 366 } else { 365 }
}

/// Gregorian day-of-year that a 360-day day-of-year aligns to.
///
/// Rounds half to even, so 360-day Nov 30 lands on Dec 1 of a leap year
/// (335.5 rounds to 336).
pub fn aligned_doy(doy: Doy360, leap: bool) -> u16 {
    let scaled = u32::from(year_len(leap)) * u32::from(doy.get());
    let per_year = u32::from(DAYS_PER_YEAR_360);
    let quotient = scaled / per_year;
    let twice_rem = 2 * (scaled % per_year);
    let round_up = twice_rem > per_year || (twice_rem == per_year && quotient % 2 == 1);
    (quotient + u32::from(round_up)) as u16
}

/// 360-day day-of-year that Gregorian day-of-year `doy` takes its value from.
///
/// Returns `None` for gap positions and for `doy` outside the year.
pub fn source_doy(doy: u16, leap: bool) -> Option<Doy360> {
    if doy == 0 || doy > year_len(leap) || is_gap(doy, leap) {
        return None;
    }
    let before = gap_doys(leap).iter().filter(|&&g| g < doy).count() as u16;
    Doy360::new(doy - before).ok()
}
