//! Core data types for SensorScope
//!
//! This module contains the fundamental data structures used throughout
//! the application for representing channels, per-channel time series,
//! and click-inspection results.
//!
//! # Main Types
//!
//! - [`Channel`] - One of the four fixed sensor channels in the archive
//! - [`SeriesStore`] - Parallel raw/compensation/timestamp series for a channel
//! - [`ChannelSeries`] - Per-channel series map produced by one query
//! - [`PickResult`] - Result of a click-inspection lookup
//!
//! # Invariants
//!
//! A [`SeriesStore`] keeps its three sequences at identical length at all
//! times: index `i` across raw, compensation, and timestamps refers to the
//! same physical sample. The store is append-only while a query is being
//! aggregated and replaced wholesale by the next query.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of sensor channels in the archive schema
pub const CHANNEL_COUNT: usize = 4;

/// Number of numeric reading columns per row (raw + compensation per channel)
pub const READINGS_PER_ROW: usize = CHANNEL_COUNT * 2;

/// One of the four sensor channels
///
/// Channels are a fixed set defined by the archive schema; each carries a
/// raw measurement series and a compensation series at the same cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// First sensor channel (archive columns ch11/ch12)
    Ch1,
    /// Second sensor channel (archive columns ch21/ch22)
    Ch2,
    /// Third sensor channel (archive columns ch31/ch32)
    Ch3,
    /// Fourth sensor channel (archive columns ch41/ch42)
    Ch4,
}

impl Channel {
    /// All channels, in archive column order
    pub const ALL: [Channel; CHANNEL_COUNT] = [Channel::Ch1, Channel::Ch2, Channel::Ch3, Channel::Ch4];

    /// Zero-based position of this channel in the archive column layout
    pub fn index(&self) -> usize {
        match self {
            Channel::Ch1 => 0,
            Channel::Ch2 => 1,
            Channel::Ch3 => 2,
            Channel::Ch4 => 3,
        }
    }

    /// Stable string key used for this channel in query results
    pub fn key(&self) -> &'static str {
        match self {
            Channel::Ch1 => "plot1",
            Channel::Ch2 => "plot2",
            Channel::Ch3 => "plot3",
            Channel::Ch4 => "plot4",
        }
    }

    /// Human-readable name for plot titles
    pub fn display_name(&self) -> &'static str {
        match self {
            Channel::Ch1 => "Channel 1",
            Channel::Ch2 => "Channel 2",
            Channel::Ch3 => "Channel 3",
            Channel::Ch4 => "Channel 4",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Time series storage for one channel
///
/// Three parallel sequences of equal length: the raw measurement, the
/// compensation measurement, and the acquisition timestamp. Timestamps are
/// carried as opaque strings straight from the archive; nothing in the
/// application parses them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesStore {
    raw: Vec<f64>,
    compensation: Vec<f64>,
    timestamps: Vec<String>,
}

impl SeriesStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with preallocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw: Vec::with_capacity(capacity),
            compensation: Vec::with_capacity(capacity),
            timestamps: Vec::with_capacity(capacity),
        }
    }

    /// Append one sample. The only mutator, so all three sequences grow in
    /// lockstep.
    pub fn push(&mut self, raw: f64, compensation: f64, timestamp: impl Into<String>) {
        self.raw.push(raw);
        self.compensation.push(compensation);
        self.timestamps.push(timestamp.into());
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// True when the store holds no samples
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Raw measurement series
    pub fn raw(&self) -> &[f64] {
        &self.raw
    }

    /// Compensation measurement series
    pub fn compensation(&self) -> &[f64] {
        &self.compensation
    }

    /// Acquisition timestamps
    pub fn timestamps(&self) -> &[String] {
        &self.timestamps
    }

    /// Timestamp of the sample at `index`, if in range
    pub fn timestamp_at(&self, index: usize) -> Option<&str> {
        self.timestamps.get(index).map(String::as_str)
    }

    /// Raw series as plot points (x = sample index)
    pub fn raw_plot_points(&self) -> Vec<[f64; 2]> {
        self.raw
            .iter()
            .enumerate()
            .map(|(i, &v)| [i as f64, v])
            .collect()
    }
}

/// Per-channel series map produced by one query
///
/// Uses a BTreeMap so iteration follows channel order, which the UI relies
/// on for stable plot stacking.
pub type ChannelSeries = BTreeMap<Channel, SeriesStore>;

/// Create a [`ChannelSeries`] with an empty store for every channel
pub fn empty_channel_series() -> ChannelSeries {
    Channel::ALL
        .iter()
        .map(|&ch| (ch, SeriesStore::new()))
        .collect()
}

/// Which curve a picked sample belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// The raw measurement curve
    Raw,
    /// The rescaled compensation curve
    Compensation,
}

/// Result of a click-inspection lookup
///
/// Produced per click and discarded on the next one; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PickResult {
    /// Index of the winning sample
    pub index: usize,
    /// Curve the winning sample lies on
    pub curve: CurveKind,
    /// Value at display scale (what the plot shows)
    pub display_value: f64,
    /// True (unscaled) value, present only for a compensation-curve pick
    /// with a usable inverse mapping
    pub true_value: Option<f64>,
    /// Acquisition timestamp of the winning sample
    pub timestamp: String,
}

impl PickResult {
    /// The value to show the user: the back-converted true value when
    /// available, the display value otherwise
    pub fn label_value(&self) -> f64 {
        self.true_value.unwrap_or(self.display_value)
    }
}
