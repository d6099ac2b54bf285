//! Nearest-point lookup for click inspection
//!
//! Given a cursor position in plot coordinates (x in sample-index units,
//! y in display-value units), find the closest sample on the raw curve
//! and, when present, the rescaled compensation curve.
//!
//! The distance metric is the Manhattan distance in index/value space:
//! `|i - cursor_x| + |v_i - cursor_y|`. Index and value are summed directly
//! even though they are on different natural scales; this coupling is part
//! of the picking behavior users expect, so it is kept as-is.

use crate::analysis::scale::{InverseParams, ScaleMapping};
use crate::error::{Result, SensorScopeError};
use crate::types::{CurveKind, PickResult, SeriesStore};

/// A located sample, before timestamp resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    /// Index of the winning sample
    pub index: usize,
    /// Curve the winning sample lies on
    pub curve: CurveKind,
    /// Value at display scale
    pub display_value: f64,
    /// True value, present only for a compensation pick with inverse params
    pub true_value: Option<f64>,
}

/// Find the sample nearest to the cursor
///
/// Searches the raw curve and, when given, the rescaled compensation
/// curve. On equal distance the raw curve wins. A compensation win is
/// back-converted through `inverse` when available; with a degenerate
/// mapping (`inverse` absent) the display value is reported without a true
/// value.
///
/// Pure: the result depends only on the arguments. Fails with `NoData`
/// when the raw curve is empty.
pub fn locate_nearest(
    cursor_x: f64,
    cursor_y: f64,
    raw: &[f64],
    compensation: Option<&[f64]>,
    inverse: Option<&InverseParams>,
) -> Result<Pick> {
    if raw.is_empty() {
        return Err(SensorScopeError::NoData);
    }

    let (raw_idx, raw_dist) = nearest_on_curve(cursor_x, cursor_y, raw);

    if let Some(comp) = compensation.filter(|c| !c.is_empty()) {
        let (comp_idx, comp_dist) = nearest_on_curve(cursor_x, cursor_y, comp);
        // Raw wins ties.
        if comp_dist < raw_dist {
            let display_value = comp[comp_idx];
            return Ok(Pick {
                index: comp_idx,
                curve: CurveKind::Compensation,
                display_value,
                true_value: inverse.map(|p| p.unscale(display_value)),
            });
        }
    }

    Ok(Pick {
        index: raw_idx,
        curve: CurveKind::Raw,
        display_value: raw[raw_idx],
        true_value: None,
    })
}

/// Locate the nearest sample in a channel's store and resolve its timestamp
///
/// Convenience wrapper over [`locate_nearest`] for callers holding a
/// [`SeriesStore`] and the display mapping of its compensation series.
pub fn pick_sample(
    store: &SeriesStore,
    cursor_x: f64,
    cursor_y: f64,
    mapping: Option<&ScaleMapping>,
) -> Result<PickResult> {
    let pick = locate_nearest(
        cursor_x,
        cursor_y,
        store.raw(),
        mapping.map(|m| m.scaled.as_slice()),
        mapping.and_then(|m| m.inverse.as_ref()),
    )?;

    let timestamp = store
        .timestamp_at(pick.index)
        .ok_or(SensorScopeError::NoData)?
        .to_string();

    Ok(PickResult {
        index: pick.index,
        curve: pick.curve,
        display_value: pick.display_value,
        true_value: pick.true_value,
        timestamp,
    })
}

/// Argmin of the Manhattan index/value distance over one curve
///
/// Returns the winning index and its distance. Ties between samples keep
/// the earliest index.
fn nearest_on_curve(cursor_x: f64, cursor_y: f64, values: &[f64]) -> (usize, f64) {
    let mut best_idx = 0;
    let mut best_dist = f64::INFINITY;

    for (i, &v) in values.iter().enumerate() {
        let dist = (i as f64 - cursor_x).abs() + (v - cursor_y).abs();
        if dist < best_dist {
            best_dist = dist;
            best_idx = i;
        }
    }

    (best_idx, best_dist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::scale::scale_to_range;

    #[test]
    fn test_raw_only_lookup() {
        let raw = [0.0, 10.0, 20.0];

        let pick = locate_nearest(1.2, 9.0, &raw, None, None).unwrap();

        assert_eq!(pick.index, 1);
        assert_eq!(pick.curve, CurveKind::Raw);
        assert_eq!(pick.display_value, 10.0);
        assert_eq!(pick.true_value, None);
    }

    #[test]
    fn test_raw_wins_ties() {
        // Cursor midway between the curves: both best points are at index 0,
        // distance 5 each.
        let raw = [0.0, 10.0];
        let comp = [10.0, 20.0];

        let pick = locate_nearest(0.0, 5.0, &raw, Some(&comp), None).unwrap();

        assert_eq!(pick.curve, CurveKind::Raw);
        assert_eq!(pick.index, 0);
        assert_eq!(pick.display_value, 0.0);
    }

    #[test]
    fn test_coincident_points_prefer_raw() {
        // Both curves pass through the exact cursor position.
        let raw = [5.0];
        let comp = [5.0];

        let pick = locate_nearest(0.0, 5.0, &raw, Some(&comp), None).unwrap();

        assert_eq!(pick.curve, CurveKind::Raw);
    }

    #[test]
    fn test_compensation_win_back_converts() {
        let raw = [0.0, 100.0, 0.0];
        let comp_true = [4.0, 5.0, 6.0];

        let mapping = scale_to_range(&comp_true, &raw).unwrap();
        let inverse = mapping.inverse.unwrap();

        // Cursor right on the middle of the scaled compensation curve.
        let pick = locate_nearest(
            1.0,
            mapping.scaled[1],
            &raw,
            Some(&mapping.scaled),
            Some(&inverse),
        )
        .unwrap();

        assert_eq!(pick.curve, CurveKind::Compensation);
        assert_eq!(pick.index, 1);
        let true_value = pick.true_value.unwrap();
        assert!((true_value - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_mapping_reports_no_true_value() {
        let raw = [0.0, 100.0];
        let comp = [50.0, 50.0];

        // Cursor on the constant compensation line, far from raw samples.
        let pick = locate_nearest(0.5, 50.0, &raw, Some(&comp), None).unwrap();

        assert_eq!(pick.curve, CurveKind::Compensation);
        assert_eq!(pick.display_value, 50.0);
        assert_eq!(pick.true_value, None);
    }

    #[test]
    fn test_empty_raw_is_no_data() {
        let err = locate_nearest(0.0, 0.0, &[], None, None).unwrap_err();
        assert!(matches!(err, SensorScopeError::NoData));
    }

    #[test]
    fn test_index_distance_contributes() {
        // Values identical everywhere, so the index term decides alone.
        let raw = [5.0, 5.0, 5.0, 5.0];

        let pick = locate_nearest(2.8, 5.0, &raw, None, None).unwrap();
        assert_eq!(pick.index, 3);
    }

    #[test]
    fn test_pick_sample_resolves_timestamp() {
        let mut store = SeriesStore::new();
        store.push(1.0, 10.0, "2024-12-15T00:00:00");
        store.push(2.0, 20.0, "2024-12-15T00:00:01");

        let mapping = scale_to_range(store.compensation(), store.raw()).unwrap();
        let result = pick_sample(&store, 1.0, 2.0, Some(&mapping)).unwrap();

        assert_eq!(result.index, 1);
        assert_eq!(result.timestamp, "2024-12-15T00:00:01");
    }

    #[test]
    fn test_pick_sample_without_mapping_never_reads_compensation() {
        let mut store = SeriesStore::new();
        store.push(1.0, f64::NAN, "t0");

        let result = pick_sample(&store, 0.0, 1.0, None).unwrap();

        assert_eq!(result.curve, CurveKind::Raw);
        assert_eq!(result.display_value, 1.0);
        assert_eq!(result.true_value, None);
    }
}
