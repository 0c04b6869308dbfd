//! # recal-io
//!
//! Read UKCP convection permitting model NetCDF files, rebuild them on the
//! Gregorian calendar, and write them back out. Bridges the file format
//! into the slice and array APIs of `recal-convert`.
//!
//! A file is loaded whole into a [`Dataset`]: every dimension, global
//! attribute and variable. Numeric variables are held as `f64` with NaN for
//! fill values; character and string variables as [`TextVariable`]s.
//! [`convert_dataset`] builds one [`recal_convert::CalendarPlan`] from the
//! time coordinate and applies it to every time-dependent variable.

mod calendar_convert;
mod dataset;
mod error;
mod naming;
mod netcdf_read;
mod reader;
mod validate;
mod writer;

pub use calendar_convert::convert_dataset;
pub use dataset::{Attribute, Dataset, Dimension, Storage, TextVariable, Variable};
pub use error::IoError;
pub use naming::{file_name_date_range, standard_calendar_file_name};
pub use reader::{ReaderConfig, read_dataset};
pub use writer::{WriterConfig, write_dataset};
