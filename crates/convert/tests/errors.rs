use recal_calendar::{
    Calendar, CalendarError, Day360Date, TimeAxis, TimeUnit, TimeUnits, day360_sequence,
};
use recal_convert::{CalendarPlan, ConvertConfig, ConvertError, Interpolation, convert_series};

fn axis(calendar: Calendar, offsets: Vec<f64>) -> TimeAxis {
    TimeAxis::new(calendar, TimeUnits::new(TimeUnit::Days, 1970, 1, 1), offsets)
}

#[test]
fn gregorian_input_rejected() {
    let err = CalendarPlan::from_axis(&axis(Calendar::Standard, vec![0.5, 1.5])).unwrap_err();
    assert_eq!(
        err,
        ConvertError::Calendar(CalendarError::NotDay360 {
            calendar: "standard".to_string()
        })
    );
}

#[test]
fn noleap_input_rejected() {
    assert!(CalendarPlan::from_axis(&axis(Calendar::NoLeap, vec![0.0])).is_err());
}

#[test]
fn sub_daily_axis_rejected() {
    // Two timestamps on the same day.
    let err = CalendarPlan::from_axis(&axis(Calendar::Day360, vec![0.25, 0.75])).unwrap_err();
    assert!(matches!(err, ConvertError::NonMonotonic { index: 1, .. }));
}

#[test]
fn decreasing_dates_rejected() {
    let mut dates = day360_sequence(Day360Date::new(1981, 1, 1).unwrap(), 10);
    dates.swap(4, 5);
    let err = convert_series(&dates, &[0.0; 10], &ConvertConfig::new()).unwrap_err();
    assert_eq!(
        err,
        ConvertError::NonMonotonic {
            index: 5,
            previous: "1981-01-06".to_string(),
            current: "1981-01-05".to_string(),
        }
    );
}

#[test]
fn empty_series_rejected() {
    assert_eq!(
        convert_series(&[], &[], &ConvertConfig::new()).unwrap_err(),
        ConvertError::EmptySeries
    );
}

#[test]
fn unknown_policy_rejected() {
    let err = "spline".parse::<Interpolation>().unwrap_err();
    assert_eq!(
        err,
        ConvertError::UnknownInterpolation {
            name: "spline".to_string()
        }
    );
}

#[test]
fn unknown_target_name_rejected() {
    assert!(matches!(
        "martian".parse::<Calendar>(),
        Err(CalendarError::UnknownCalendar { .. })
    ));
}

#[test]
fn non_gregorian_target_rejected() {
    let dates = day360_sequence(Day360Date::new(1981, 1, 1).unwrap(), 3);
    let cfg = ConvertConfig::new().with_target(Calendar::Day360);
    assert_eq!(
        convert_series(&dates, &[1.0; 3], &cfg).unwrap_err(),
        ConvertError::UnsupportedTarget {
            calendar: "360_day".to_string()
        }
    );
}
