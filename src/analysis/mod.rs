//! Analysis module for series alignment and inspection
//!
//! This module provides the pure computation behind the plots:
//! - Range rescaling for overlaying the compensation series on the raw series
//! - Nearest-point lookup for click inspection

pub mod locate;
pub mod scale;

pub use locate::{locate_nearest, pick_sample, Pick};
pub use scale::{scale_to_range, InverseParams, ScaleMapping};
