//! Conversion of 360-day climate model series to the Gregorian calendar.
//!
//! Each 360-day year is stretched over its Gregorian year. The 5 (common
//! year) or 6 (leap year) Gregorian days that no model day lands on are
//! synthesised from their neighbours.
//!
//! # Pipeline
//!
//! 1. **Plan**: decode the 360-day timestamps and place each on its
//!    Gregorian day ([`CalendarPlan`])
//! 2. **Copy**: real days take the value of their model day
//! 3. **Fill**: gap days (and displaced first/last days) are filled by
//!    [`Interpolation::Nearest`] or [`Interpolation::Linear`]
//!
//! Missing input stays missing; a gap next to a missing day stays missing
//! too. The conversion is one-way.
//!
//! # Glossary
//!
//! - **Gap position**: Gregorian day with no 360-day counterpart
//! - **Shifted day**: first or last Gregorian day whose 360-day counterpart
//!   lies just outside the input
//! - **Dropped day**: input day that lands outside the output range
//!
//! # Quick Start
//!
//! ```no_run
//! use recal_calendar::{Day360Date, day360_sequence};
//! use recal_convert::{ConvertConfig, Interpolation, convert_series};
//!
//! let dates = day360_sequence(Day360Date::new(1981, 1, 1).unwrap(), 360);
//! let values = vec![10.0; 360];
//! let config = ConvertConfig::new().with_interpolation(Interpolation::Nearest);
//!
//! let converted = convert_series(&dates, &values, &config).unwrap();
//! assert_eq!(converted.values().len(), 365);
//! ```

mod config;
mod error;
mod fill;
mod plan;
mod series;

pub use config::{ConvertConfig, EdgeFill, Interpolation};
pub use error::ConvertError;
pub use plan::{CalendarPlan, ConversionReport, Slot};
pub use series::{ConvertedArray, ConvertedSeries, convert_array, convert_series};
