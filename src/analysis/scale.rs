//! Range rescaling for dual-series overlay
//!
//! The compensation series lives on a different numeric scale than the raw
//! series, so drawing both on one axis requires mapping the compensation
//! values onto the raw series' range. [`scale_to_range`] performs that
//! mapping and returns the parameters needed to invert it, so axis labels
//! and click inspection can recover true values from display-scale ones.
//!
//! Both directions are pure functions of their inputs. The mapping is cheap
//! (one pass over each sequence) and is recomputed on demand rather than
//! cached.

use crate::error::{Result, SensorScopeError};
use serde::{Deserialize, Serialize};

/// Parameters for recovering true values from display-scale values
///
/// A plain serializable value rather than a closure, so the renderer and
/// the point locator can share one mapping without recomputing it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InverseParams {
    /// Forward scale factor: `(ref_max - ref_min) / (data_max - data_min)`
    pub scale_factor: f64,
    /// Minimum of the source data
    pub data_min: f64,
    /// Minimum of the reference data
    pub ref_min: f64,
}

impl InverseParams {
    /// Map a display-scale value back to its true value
    pub fn unscale(&self, display_value: f64) -> f64 {
        (display_value - self.ref_min) / self.scale_factor + self.data_min
    }
}

/// Result of rescaling one series onto a reference series' range
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleMapping {
    /// The rescaled series, same length as the input data
    pub scaled: Vec<f64>,
    /// Inverse-mapping parameters. `None` when the source range was
    /// degenerate (constant input): the scaled series is then a constant at
    /// the reference midpoint and no inverse exists. Callers must branch on
    /// this before back-converting display values.
    pub inverse: Option<InverseParams>,
}

impl ScaleMapping {
    /// True when the source data had zero range and no inverse exists
    pub fn is_degenerate(&self) -> bool {
        self.inverse.is_none()
    }
}

/// Rescale `data` onto the numeric range of `reference`
///
/// For a non-degenerate source range, every element maps as
/// `scale_factor * (x - data_min) + ref_min`, so the output spans exactly
/// `[ref_min, ref_max]`. A constant input maps to a constant sequence at
/// the midpoint of the reference range, with no inverse parameters.
///
/// Fails with `InvalidInput` if either sequence is empty.
pub fn scale_to_range(data: &[f64], reference: &[f64]) -> Result<ScaleMapping> {
    if data.is_empty() {
        return Err(SensorScopeError::InvalidInput(
            "cannot rescale an empty series".to_string(),
        ));
    }
    if reference.is_empty() {
        return Err(SensorScopeError::InvalidInput(
            "cannot rescale against an empty reference".to_string(),
        ));
    }

    let (ref_min, ref_max) = min_max(reference);
    let (data_min, data_max) = min_max(data);

    if data_min == data_max {
        let midpoint = ref_min + (ref_max - ref_min) / 2.0;
        return Ok(ScaleMapping {
            scaled: vec![midpoint; data.len()],
            inverse: None,
        });
    }

    let scale_factor = (ref_max - ref_min) / (data_max - data_min);
    let scaled = data
        .iter()
        .map(|&x| scale_factor * (x - data_min) + ref_min)
        .collect();

    Ok(ScaleMapping {
        scaled,
        inverse: Some(InverseParams {
            scale_factor,
            data_min,
            ref_min,
        }),
    })
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
        (min.min(v), max.max(v))
    })
}
