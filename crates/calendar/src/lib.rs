//! # recal-calendar
//!
//! Pure date arithmetic for placing 360-day model output on the Gregorian
//! calendar.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["TimeAxis (CF offsets)"] -->|".decode_day360()"| B["Day360Date"]
//!     B -->|"align_to_standard()"| C["NaiveDate"]
//!     C -->|"source_of_standard()"| B
//!     D["gap_doys(leap)"] -->|"standard_gap_dates()"| E["synthesised days"]
//!     C -->|"TimeUnits::encode_standard()"| F["CF offsets"]
//! ```
//!
//! A 360-day date keeps its year and is stretched over the Gregorian year:
//! day-of-year `d` lands on `round_half_even(N * d / 360)`. The Gregorian
//! days nothing lands on are the gap positions, 5 per common year and 6
//! per leap year.
//!
//! ## Quick Start
//!
//! ```ignore
//! use recal_calendar::{Day360Date, align_to_standard, standard_gap_dates};
//!
//! let date = Day360Date::new(1980, 11, 30).unwrap();
//! let standard = align_to_standard(date).unwrap(); // 1980-12-01
//!
//! let gaps = standard_gap_dates(1981).unwrap(); // Feb 6, Apr 19, Jul 2, Sep 12, Nov 25
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `calendar` | CF calendar names and year kinds |
//! | `doy` | 360-day day-of-year newtype |
//! | `date` | 360-day date with year context |
//! | `gaps` | Gap position tables and the day-of-year mapping |
//! | `align` | Gregorian placement of 360-day dates |
//! | `units` | CF time units and time axis decoding |
//! | `sequence` | Date sequence generation |
//! | `error` | Error types |

mod align;
mod calendar;
mod date;
mod doy;
mod error;
mod gaps;
mod sequence;
mod units;

pub use align::{
    align_to_standard, clamp_to_standard, is_standard_gap, source_of_standard, span_end_to_standard,
    standard_date, standard_days_in_month, standard_gap_dates,
};
pub use calendar::{Calendar, YearKind, is_leap_year};
pub use date::Day360Date;
pub use doy::{DAYS_PER_MONTH_360, DAYS_PER_YEAR_360, Doy360};
pub use error::CalendarError;
pub use gaps::{LEAP_GAP_DOYS, NON_LEAP_GAP_DOYS, aligned_doy, gap_doys, is_gap, source_doy};
pub use sequence::{day360_sequence, standard_range};
pub use units::{TimeAxis, TimeUnit, TimeUnits};
