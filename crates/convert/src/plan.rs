//! Conversion plan: where every Gregorian output day takes its value from.

use chrono::NaiveDate;
use ndarray::{ArrayD, ArrayView1, ArrayViewD, ArrayViewMut1, Axis, IxDyn};
use recal_calendar::{
    Day360Date, TimeAxis, align_to_standard, clamp_to_standard, source_of_standard, span_end_to_standard,
    standard_range,
};
use tracing::debug;

use crate::config::ConvertConfig;
use crate::error::ConvertError;
use crate::fill::fill_synthesised;

/// Origin of one output day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Copied from the input day at this index.
    Source(usize),
    /// A gap position: no 360-day day maps here.
    Gap,
    /// A first or last day whose 360-day counterpart lies outside the input.
    Shifted,
    /// An interior day whose 360-day counterpart is absent from the input.
    Missing,
}

impl Slot {
    /// Whether the value for this slot is synthesised from neighbours.
    pub fn is_synthesised(self) -> bool {
        matches!(self, Self::Gap | Self::Shifted)
    }
}

/// Counts describing a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionReport {
    /// Input timestamps.
    pub input_days: usize,
    /// Output timestamps.
    pub output_days: usize,
    /// Output days at gap positions.
    pub gaps: usize,
    /// Output days at the edges fed by days outside the input.
    pub shifted: usize,
    /// Output days left missing because their input day is absent.
    pub missing: usize,
    /// Input days that land outside the output range.
    pub dropped: usize,
}

impl ConversionReport {
    /// Output days whose value is synthesised.
    pub fn synthesised(&self) -> usize {
        self.gaps + self.shifted
    }
}

/// Mapping from a 360-day time axis to the Gregorian days it spans.
///
/// Built once per time axis and applied to any number of series sharing
/// that axis.
#[derive(Debug, Clone)]
pub struct CalendarPlan {
    dates: Vec<NaiveDate>,
    slots: Vec<Slot>,
    report: ConversionReport,
}

impl CalendarPlan {
    /// Builds the plan for daily 360-day timestamps.
    ///
    /// The output covers every Gregorian day from the first to the last
    /// input date, each clamped to its Gregorian month. A last date on the
    /// 30th ends the output on the Gregorian month end.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::EmptySeries`] for no timestamps and
    /// [`ConvertError::NonMonotonic`] when a timestamp does not fall on a
    /// later day than its predecessor.
    pub fn new(dates: &[Day360Date]) -> Result<Self, ConvertError> {
        let (Some(&first), Some(&last)) = (dates.first(), dates.last()) else {
            return Err(ConvertError::EmptySeries);
        };
        if let Some(i) = dates.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ConvertError::NonMonotonic {
                index: i + 1,
                previous: dates[i].to_string(),
                current: dates[i + 1].to_string(),
            });
        }

        let start = clamp_to_standard(first)?;
        let end = span_end_to_standard(last)?;
        let out_dates = standard_range(start, end);
        let mut slots = vec![Slot::Missing; out_dates.len()];

        let mut dropped = 0;
        for (i, &date) in dates.iter().enumerate() {
            let target = align_to_standard(date)?;
            if target < start || target > end {
                dropped += 1;
                continue;
            }
            let pos = (target - start).num_days() as usize;
            slots[pos] = Slot::Source(i);
        }

        for (slot, &date) in slots.iter_mut().zip(&out_dates) {
            if *slot != Slot::Missing {
                continue;
            }
            *slot = match source_of_standard(date) {
                None => Slot::Gap,
                Some(src) if src < first || src > last => Slot::Shifted,
                Some(_) => Slot::Missing,
            };
        }

        let count = |kind: Slot| slots.iter().filter(|&&s| s == kind).count();
        let report = ConversionReport {
            input_days: dates.len(),
            output_days: out_dates.len(),
            gaps: count(Slot::Gap),
            shifted: count(Slot::Shifted),
            missing: count(Slot::Missing),
            dropped,
        };
        debug!(
            %start,
            %end,
            input = report.input_days,
            output = report.output_days,
            gaps = report.gaps,
            shifted = report.shifted,
            missing = report.missing,
            dropped = report.dropped,
            "built calendar plan"
        );

        Ok(Self {
            dates: out_dates,
            slots,
            report,
        })
    }

    /// Builds the plan for a CF time axis, which must use `360_day`.
    pub fn from_axis(axis: &TimeAxis) -> Result<Self, ConvertError> {
        Self::new(&axis.decode_day360()?)
    }

    /// Gregorian output dates.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Origin of each output date.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Number of output days.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always false: a plan covers at least one day.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of input timestamps the plan expects.
    pub fn input_len(&self) -> usize {
        self.report.input_days
    }

    /// Conversion counts.
    pub fn report(&self) -> ConversionReport {
        self.report
    }

    /// Output indices whose values are synthesised.
    pub fn synthesised_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_synthesised())
            .map(|(i, _)| i)
            .collect()
    }

    /// Converts one series of values on the input axis.
    pub fn apply(&self, values: &[f64], config: &ConvertConfig) -> Result<Vec<f64>, ConvertError> {
        self.check_len(values.len())?;
        let mut out = vec![f64::NAN; self.len()];
        self.fill_lane(
            ArrayView1::from(values),
            ArrayViewMut1::from(out.as_mut_slice()),
            config,
        );
        Ok(out)
    }

    /// Converts every series along `time_axis` of an N-dimensional array.
    ///
    /// All other axes keep their length and order.
    pub fn apply_array(
        &self,
        data: ArrayViewD<'_, f64>,
        time_axis: usize,
        config: &ConvertConfig,
    ) -> Result<ArrayD<f64>, ConvertError> {
        if time_axis >= data.ndim() {
            return Err(ConvertError::TimeAxisOutOfRange {
                axis: time_axis,
                ndim: data.ndim(),
            });
        }
        self.check_len(data.len_of(Axis(time_axis)))?;

        let mut shape = data.shape().to_vec();
        shape[time_axis] = self.len();
        let mut out = ArrayD::from_elem(IxDyn(&shape), f64::NAN);
        for (src, dst) in data
            .lanes(Axis(time_axis))
            .into_iter()
            .zip(out.lanes_mut(Axis(time_axis)))
        {
            self.fill_lane(src, dst, config);
        }
        Ok(out)
    }

    fn check_len(&self, values: usize) -> Result<(), ConvertError> {
        if values != self.input_len() {
            return Err(ConvertError::LengthMismatch {
                values,
                dates: self.input_len(),
            });
        }
        Ok(())
    }

    fn fill_lane(&self, src: ArrayView1<'_, f64>, mut dst: ArrayViewMut1<'_, f64>, config: &ConvertConfig) {
        for (out, slot) in dst.iter_mut().zip(&self.slots) {
            *out = match *slot {
                Slot::Source(i) => src[i],
                _ => f64::NAN,
            };
        }
        fill_synthesised(&self.slots, &mut dst, config);
    }
}
