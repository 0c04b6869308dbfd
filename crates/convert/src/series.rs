//! Conversion of single series and N-dimensional arrays.

use chrono::NaiveDate;
use ndarray::{ArrayD, ArrayViewD};
use recal_calendar::Day360Date;

use crate::config::ConvertConfig;
use crate::error::ConvertError;
use crate::plan::{CalendarPlan, ConversionReport};

/// A converted single series.
#[derive(Debug, Clone)]
pub struct ConvertedSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
    synthesised: Vec<usize>,
    report: ConversionReport,
}

impl ConvertedSeries {
    /// Gregorian dates of the output.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Output values; NaN marks missing.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consumes `self` and returns the owned values.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Indices of synthesised output days.
    pub fn synthesised(&self) -> &[usize] {
        &self.synthesised
    }

    /// Conversion counts.
    pub fn report(&self) -> ConversionReport {
        self.report
    }
}

/// A converted N-dimensional array.
#[derive(Debug, Clone)]
pub struct ConvertedArray {
    dates: Vec<NaiveDate>,
    data: ArrayD<f64>,
    report: ConversionReport,
}

impl ConvertedArray {
    /// Gregorian dates along the time axis.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Converted data.
    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// Consumes `self` and returns the owned data.
    pub fn into_data(self) -> ArrayD<f64> {
        self.data
    }

    /// Conversion counts.
    pub fn report(&self) -> ConversionReport {
        self.report
    }
}

/// Converts one daily 360-day series to the Gregorian calendar.
///
/// # Arguments
///
/// * `dates` - Strictly increasing daily 360-day dates.
/// * `values` - One value per date; NaN marks missing.
/// * `config` - Target calendar, interpolation policy and edge fill.
///
/// # Errors
///
/// Returns [`ConvertError`] for an invalid configuration, empty or
/// non-increasing dates, or a length mismatch. Nothing is produced on
/// failure.
pub fn convert_series(
    dates: &[Day360Date],
    values: &[f64],
    config: &ConvertConfig,
) -> Result<ConvertedSeries, ConvertError> {
    config.validate()?;
    if values.len() != dates.len() {
        return Err(ConvertError::LengthMismatch {
            values: values.len(),
            dates: dates.len(),
        });
    }
    let plan = CalendarPlan::new(dates)?;
    let values = plan.apply(values, config)?;
    Ok(ConvertedSeries {
        synthesised: plan.synthesised_indices(),
        report: plan.report(),
        dates: plan.dates().to_vec(),
        values,
    })
}

/// Converts every series along `time_axis` of an array, keeping the
/// ensemble and spatial axes as they are.
///
/// # Errors
///
/// As [`convert_series`], plus [`ConvertError::TimeAxisOutOfRange`].
pub fn convert_array(
    dates: &[Day360Date],
    data: ArrayViewD<'_, f64>,
    time_axis: usize,
    config: &ConvertConfig,
) -> Result<ConvertedArray, ConvertError> {
    config.validate()?;
    let plan = CalendarPlan::new(dates)?;
    let data = plan.apply_array(data, time_axis, config)?;
    Ok(ConvertedArray {
        dates: plan.dates().to_vec(),
        data,
        report: plan.report(),
    })
}
