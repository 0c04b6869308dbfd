//! Filling synthesised days from their real neighbours.

use ndarray::ArrayViewMut1;

use crate::config::{ConvertConfig, EdgeFill, Interpolation};
use crate::plan::Slot;

/// Fills every run of synthesised slots in `out`.
///
/// Real slots must already hold their values (NaN when missing). A run
/// bracketed on both sides uses the interpolation policy and stays NaN if
/// either bracket is NaN. A run touching the start or end of the series
/// uses the edge-fill rule.
pub(crate) fn fill_synthesised(slots: &[Slot], out: &mut ArrayViewMut1<'_, f64>, config: &ConvertConfig) {
    let n = slots.len();
    let mut k = 0;
    while k < n {
        if !slots[k].is_synthesised() {
            k += 1;
            continue;
        }
        let run_start = k;
        while k < n && slots[k].is_synthesised() {
            k += 1;
        }
        fill_run(slots, out, run_start, k, config);
    }
}

fn fill_run(slots: &[Slot], out: &mut ArrayViewMut1<'_, f64>, start: usize, end: usize, config: &ConvertConfig) {
    let left = start.checked_sub(1);
    let right = (end < slots.len()).then_some(end);

    for k in start..end {
        out[k] = match (left, right) {
            (Some(l), Some(r)) => interpolate(out[l], out[r], k - l, r - k, config.interpolation()),
            (Some(l), None) => edge_value(slots, out, l, l.checked_sub(1), k, config),
            (None, Some(r)) => edge_value(slots, out, r, r.checked_add(1).filter(|&i| i < slots.len()), k, config),
            (None, None) => f64::NAN,
        };
    }
}

/// Value at a point `dist_left` days after `left` and `dist_right` days
/// before `right`. NaN propagates for both policies.
fn interpolate(left: f64, right: f64, dist_left: usize, dist_right: usize, method: Interpolation) -> f64 {
    if left.is_nan() || right.is_nan() {
        return f64::NAN;
    }
    match method {
        Interpolation::Nearest => {
            if dist_left <= dist_right {
                left
            } else {
                right
            }
        }
        Interpolation::Linear => {
            let w = dist_left as f64 / (dist_left + dist_right) as f64;
            left + (right - left) * w
        }
    }
}

/// Value for output index `k` from the real day `anchor` on its only side,
/// with `beyond` the next index further out on that side.
fn edge_value(
    slots: &[Slot],
    out: &ArrayViewMut1<'_, f64>,
    anchor: usize,
    beyond: Option<usize>,
    k: usize,
    config: &ConvertConfig,
) -> f64 {
    let a = out[anchor];
    if a.is_nan()
        || config.edge_fill() == EdgeFill::Nearest
        || config.interpolation() == Interpolation::Nearest
    {
        return a;
    }
    match beyond {
        Some(b) if matches!(slots[b], Slot::Source(_)) && !out[b].is_nan() => {
            let slope = (a - out[b]) / (anchor as f64 - b as f64);
            a + slope * (k as f64 - anchor as f64)
        }
        _ => a,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array1;

    fn run(slots: &[Slot], values: &[f64], config: &ConvertConfig) -> Vec<f64> {
        let mut out = Array1::from(values.to_vec());
        fill_synthesised(slots, &mut out.view_mut(), config);
        out.to_vec()
    }

    const NAN: f64 = f64::NAN;

    #[test]
    fn interior_gap_nearest_takes_preceding() {
        let slots = [Slot::Source(0), Slot::Gap, Slot::Source(1)];
        let cfg = ConvertConfig::new().with_interpolation(Interpolation::Nearest);
        assert_eq!(run(&slots, &[1.0, NAN, 3.0], &cfg), vec![1.0, 1.0, 3.0]);
    }

    #[test]
    fn interior_gap_linear_midpoint() {
        let slots = [Slot::Source(0), Slot::Gap, Slot::Source(1)];
        let out = run(&slots, &[1.0, NAN, 3.0], &ConvertConfig::new());
        assert_relative_eq!(out[1], 2.0);
    }

    #[test]
    fn gap_next_to_missing_stays_missing() {
        let slots = [Slot::Source(0), Slot::Gap, Slot::Missing];
        for method in [Interpolation::Nearest, Interpolation::Linear] {
            let cfg = ConvertConfig::new().with_interpolation(method);
            assert!(run(&slots, &[1.0, NAN, NAN], &cfg)[1].is_nan(), "{method}");
        }
    }

    #[test]
    fn leading_edge_nearest_copies() {
        let slots = [Slot::Shifted, Slot::Source(0), Slot::Source(1)];
        let cfg = ConvertConfig::new().with_edge_fill(EdgeFill::Nearest);
        let out = run(&slots, &[NAN, 4.0, 6.0], &cfg);
        assert_eq!(out[0], 4.0);
    }

    #[test]
    fn leading_edge_extrapolates_by_default() {
        let slots = [Slot::Shifted, Slot::Shifted, Slot::Source(0), Slot::Source(1)];
        let out = run(&slots, &[NAN, NAN, 4.0, 6.0], &ConvertConfig::new());
        assert_relative_eq!(out[1], 2.0);
        assert_relative_eq!(out[0], 0.0);
    }

    #[test]
    fn trailing_edge_extrapolates() {
        let slots = [Slot::Source(0), Slot::Source(1), Slot::Shifted];
        let cfg = ConvertConfig::new().with_edge_fill(EdgeFill::Extrapolate);
        let out = run(&slots, &[1.0, 2.0, NAN], &cfg);
        assert_relative_eq!(out[2], 3.0);
    }

    #[test]
    fn extrapolate_falls_back_to_copy() {
        // Second point beyond the anchor is itself synthesised.
        let slots = [Slot::Gap, Slot::Source(0), Slot::Shifted];
        let cfg = ConvertConfig::new().with_edge_fill(EdgeFill::Extrapolate);
        let out = run(&slots, &[NAN, 5.0, NAN], &cfg);
        assert_eq!(out[2], 5.0);
    }

    #[test]
    fn nearest_policy_ignores_extrapolate() {
        let slots = [Slot::Source(0), Slot::Source(1), Slot::Shifted];
        let cfg = ConvertConfig::new()
            .with_interpolation(Interpolation::Nearest)
            .with_edge_fill(EdgeFill::Extrapolate);
        assert_eq!(run(&slots, &[1.0, 2.0, NAN], &cfg)[2], 2.0);
    }

    #[test]
    fn run_bracketed_by_distance() {
        let slots = [Slot::Source(0), Slot::Gap, Slot::Shifted, Slot::Source(1)];
        let nearest = ConvertConfig::new().with_interpolation(Interpolation::Nearest);
        assert_eq!(run(&slots, &[0.0, NAN, NAN, 3.0], &nearest), vec![0.0, 0.0, 3.0, 3.0]);
        let linear = run(&slots, &[0.0, NAN, NAN, 3.0], &ConvertConfig::new());
        assert_relative_eq!(linear[1], 1.0);
        assert_relative_eq!(linear[2], 2.0);
    }

    #[test]
    fn all_synthesised_is_nan() {
        let out = run(&[Slot::Gap], &[NAN], &ConvertConfig::new());
        assert!(out[0].is_nan());
    }
}
