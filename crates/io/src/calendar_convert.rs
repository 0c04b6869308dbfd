//! Rebuilding a whole dataset on the Gregorian calendar.

use chrono::{Datelike, NaiveDate};
use ndarray::{Array1, Array2, ArrayD, Axis};
use recal_convert::{CalendarPlan, ConversionReport, ConvertConfig};
use tracing::{debug, warn};

use crate::dataset::{Dataset, TextVariable, Variable};
use crate::error::IoError;

/// Date stamp text variable, `YYYYMMDD` per timestamp.
const DATE_STAMP: &str = "yyyymmdd";

/// Time-dependent variables that describe the calendar itself and are
/// recomputed from the new dates instead of interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DerivedField {
    Year,
    MonthNumber,
    DayOfYear,
}

impl DerivedField {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "year" => Some(Self::Year),
            "month_number" => Some(Self::MonthNumber),
            "day_of_year" => Some(Self::DayOfYear),
            _ => None,
        }
    }

    fn value(self, date: NaiveDate) -> f64 {
        match self {
            Self::Year => f64::from(date.year()),
            Self::MonthNumber => f64::from(date.month()),
            Self::DayOfYear => f64::from(date.ordinal()),
        }
    }
}

/// Converts every time-dependent variable of a 360-day dataset to the
/// Gregorian calendar.
///
/// - `time_var` is re-encoded in its own units, keeping the time of day of
///   the first timestamp, and its `calendar` attribute becomes the target.
/// - The variable named by its `bounds` attribute is regenerated with the
///   same offsets from each timestamp as the first input row.
/// - `year`, `month_number`, `day_of_year` and the `yyyymmdd` date stamps
///   are recomputed.
/// - Every other time-dependent numeric variable is converted with
///   `config`. Other time-dependent text variables are dropped.
///
/// Variables without the time dimension, and all attributes, are copied.
/// Every variable keeps its storage type.
///
/// # Errors
///
/// Returns [`IoError`] if the time coordinate is missing, not 1-D, not
/// `360_day`, or not strictly increasing by days, or if `config` is invalid.
pub fn convert_dataset(
    dataset: &Dataset,
    time_var: &str,
    config: &ConvertConfig,
) -> Result<(Dataset, ConversionReport), IoError> {
    config.validate()?;

    let axis = dataset.time_axis(time_var)?;
    let time = dataset.require_variable(time_var)?;
    let time_dim = time.dims()[0].clone();
    let plan = CalendarPlan::from_axis(&axis)?;

    let day_fraction = axis.first_day_fraction()?;
    let offsets = plan
        .dates()
        .iter()
        .map(|&date| axis.units.encode_standard(date, day_fraction))
        .collect::<Result<Vec<f64>, _>>()?;
    let bounds_var = time.attribute_str("bounds").map(str::to_owned);

    let mut out = Dataset::new().with_source(dataset.source());
    for attr in dataset.attributes() {
        out = out.with_attribute(&attr.name, attr.value.clone());
    }
    for dim in dataset.dimensions() {
        let len = if dim.name == time_dim { plan.len() } else { dim.len };
        out = out.with_dimension(&dim.name, len);
    }

    for var in dataset.variables() {
        let Some(t_axis) = var.axis_of(&time_dim) else {
            out = out.with_variable(var.clone());
            continue;
        };

        let data = if var.name() == time_var {
            Array1::from(offsets.clone()).into_dyn()
        } else if bounds_var.as_deref() == Some(var.name()) && t_axis == 0 && var.dims().len() == 2 {
            regenerate_bounds(var, &axis.offsets, &offsets)
        } else if let Some(field) = DerivedField::from_name(var.name())
            && var.dims().len() == 1
        {
            Array1::from_iter(plan.dates().iter().map(|&d| field.value(d))).into_dyn()
        } else {
            plan.apply_array(var.data().view(), t_axis, config)?
        };
        debug!(variable = var.name(), shape = ?data.shape(), "converted variable");

        let mut converted = Variable::new(var.name(), var.dims().to_vec(), data)
            .with_attributes(var.attributes().to_vec())
            .with_storage(var.storage());
        if var.name() == time_var {
            converted.set_attribute("calendar", config.target().cf_name());
        }
        out = out.with_variable(converted);
    }

    for text in dataset.text_variables() {
        if text.dim() != time_dim {
            out = out.with_text_variable(text.clone());
        } else if text.name() == DATE_STAMP {
            let stamps = plan.dates().iter().map(|d| d.format("%Y%m%d").to_string()).collect();
            let regenerated =
                TextVariable::new(text.name(), text.dim(), stamps).with_attributes(text.attributes().to_vec());
            out = out.with_text_variable(regenerated);
        } else {
            warn!(variable = text.name(), "dropping time-dependent text variable");
        }
    }

    out.validate()?;
    Ok((out, plan.report()))
}

/// New bounds keep each column's offset from its timestamp as found in the
/// first input row.
fn regenerate_bounds(bounds: &Variable, old_times: &[f64], new_times: &[f64]) -> ArrayD<f64> {
    let n_cols = bounds.data().len_of(Axis(1));
    let first_row = bounds.data().index_axis(Axis(0), 0);
    let deltas: Vec<f64> = match old_times.first() {
        Some(&t0) => first_row.iter().map(|&b| b - t0).collect(),
        None => vec![0.0; n_cols],
    };
    Array2::from_shape_fn((new_times.len(), n_cols), |(k, j)| new_times[k] + deltas[j]).into_dyn()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Storage;
    use ndarray::{Array3, IxDyn};
    use recal_convert::Interpolation;

    /// 360 days from 360-day 1981-01-01 at midday, one 2x1 grid.
    fn small_dataset() -> Dataset {
        let times: Vec<f64> = (0..360).map(|i| f64::from(i) + 0.5).collect();
        let bounds = Array2::from_shape_fn((360, 2), |(i, j)| i as f64 + j as f64).into_dyn();
        let tas = Array3::from_shape_fn((360, 2, 1), |(t, y, _)| t as f64 + 100.0 * y as f64).into_dyn();
        Dataset::new()
            .with_dimension("time", 360)
            .with_dimension("bnds", 2)
            .with_dimension("y", 2)
            .with_dimension("x", 1)
            .with_attribute("title", "test")
            .with_variable(
                Variable::new("time", vec!["time".into()], Array1::from(times).into_dyn())
                    .with_attribute("units", "days since 1981-01-01 00:00:00")
                    .with_attribute("calendar", "360_day")
                    .with_attribute("bounds", "time_bnds"),
            )
            .with_variable(Variable::new(
                "time_bnds",
                vec!["time".into(), "bnds".into()],
                bounds,
            ))
            .with_variable(Variable::new(
                "month_number",
                vec!["time".into()],
                Array1::from_iter((0..360).map(|i| f64::from(i / 30 + 1))).into_dyn(),
            ))
            .with_variable(Variable::new(
                "y",
                vec!["y".into()],
                Array1::from(vec![51.0, 52.0]).into_dyn(),
            ))
            .with_variable(
                Variable::new("tas", vec!["time".into(), "y".into(), "x".into()], tas)
                    .with_attribute("units", "K")
                    .with_storage(Storage::F32),
            )
            .with_text_variable(TextVariable::new(
                "yyyymmdd",
                "time",
                (0..360)
                    .map(|i| format!("1981{:02}{:02}", i / 30 + 1, i % 30 + 1))
                    .collect(),
            ))
            .with_text_variable(TextVariable::new(
                "label",
                "time",
                vec!["x".to_string(); 360],
            ))
    }

    #[test]
    fn time_axis_regenerated() {
        let (out, report) = convert_dataset(&small_dataset(), "time", &ConvertConfig::new()).unwrap();
        assert_eq!(report.output_days, 365);
        assert_eq!(out.dimension_len("time"), Some(365));

        let time = out.variable("time").unwrap();
        assert_eq!(time.attribute_str("calendar"), Some("standard"));
        assert_eq!(time.attribute_str("bounds"), Some("time_bnds"));
        let t: Vec<f64> = time.data().iter().copied().collect();
        assert_eq!(t.len(), 365);
        assert_eq!(t[0], 0.5);
        assert_eq!(t[364], 364.5);
    }

    #[test]
    fn bounds_follow_timestamps() {
        let (out, _) = convert_dataset(&small_dataset(), "time", &ConvertConfig::new()).unwrap();
        let bnds = out.variable("time_bnds").unwrap().data();
        assert_eq!(bnds.shape(), &[365, 2]);
        assert_eq!(bnds[IxDyn(&[0, 0])], 0.0);
        assert_eq!(bnds[IxDyn(&[0, 1])], 1.0);
        assert_eq!(bnds[IxDyn(&[364, 0])], 364.0);
        assert_eq!(bnds[IxDyn(&[364, 1])], 365.0);
    }

    #[test]
    fn derived_fields_recomputed() {
        let (out, _) = convert_dataset(&small_dataset(), "time", &ConvertConfig::new()).unwrap();
        let months = out.variable("month_number").unwrap().data();
        // Gregorian Jan 31 and Feb 1.
        assert_eq!(months[IxDyn(&[30])], 1.0);
        assert_eq!(months[IxDyn(&[31])], 2.0);
        assert_eq!(months[IxDyn(&[364])], 12.0);
    }

    #[test]
    fn date_stamps_regenerated() {
        let (out, _) = convert_dataset(&small_dataset(), "time", &ConvertConfig::new()).unwrap();
        let stamps = out.text_variable("yyyymmdd").unwrap().values();
        assert_eq!(stamps.len(), 365);
        assert_eq!(stamps[0], "19810101");
        assert_eq!(stamps[58], "19810228");
        assert_eq!(stamps[59], "19810301");
        assert_eq!(stamps[364], "19811231");
        assert!(out.text_variable("label").is_none());
        assert_eq!(out.variable("tas").unwrap().storage(), Storage::F32);
    }

    #[test]
    fn data_converted_and_static_copied() {
        let config = ConvertConfig::new().with_interpolation(Interpolation::Nearest);
        let (out, _) = convert_dataset(&small_dataset(), "time", &config).unwrap();
        let tas = out.variable("tas").unwrap();
        assert_eq!(tas.data().shape(), &[365, 2, 1]);
        assert_eq!(tas.attribute_str("units"), Some("K"));
        // Feb 6 gap copies Feb 5, which carries 360-day day index 35.
        assert_eq!(tas.data()[IxDyn(&[36, 1, 0])], 135.0);
        assert_eq!(
            out.variable("y").unwrap().data().iter().copied().collect::<Vec<_>>(),
            vec![51.0, 52.0]
        );
        assert_eq!(out.attributes().len(), 1);
    }

    #[test]
    fn gregorian_input_rejected() {
        let mut ds = small_dataset();
        let time = ds.variable("time").unwrap().clone().with_attribute("calendar", "standard");
        ds = ds.with_variable(time);
        assert!(matches!(
            convert_dataset(&ds, "time", &ConvertConfig::new()),
            Err(IoError::Convert { .. })
        ));
    }
}
