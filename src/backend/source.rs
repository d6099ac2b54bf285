//! RowSource trait for unified archive access
//!
//! This module provides a common trait for all archive implementations,
//! enabling both the on-disk SQLite archive and in-memory sources for
//! testing and demo mode.

use crate::error::Result;
use crate::types::{Channel, READINGS_PER_ROW};
use chrono::NaiveDate;

/// One archive row: eight numeric readings plus the acquisition timestamp
///
/// The readings are laid out in archive column order — raw and compensation
/// interleaved per channel (`ch11, ch12, ch21, ch22, ...`), so channel `k`
/// owns columns `2k` and `2k + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorRow {
    /// Numeric reading columns in archive order
    pub readings: [f64; READINGS_PER_ROW],
    /// Acquisition timestamp, carried as an opaque string
    pub sensing_time: String,
}

impl SensorRow {
    /// Create a row from its readings and timestamp
    pub fn new(readings: [f64; READINGS_PER_ROW], sensing_time: impl Into<String>) -> Self {
        Self {
            readings,
            sensing_time: sensing_time.into(),
        }
    }

    /// The (raw, compensation) reading pair for one channel
    pub fn reading_pair(&self, channel: Channel) -> (f64, f64) {
        let k = channel.index();
        (self.readings[2 * k], self.readings[2 * k + 1])
    }
}

/// Unified interface for daily-partitioned row sources
///
/// One partition holds one calendar day's rows. A missing partition is
/// reported as `SensorScopeError::NotFound`, which callers treat as "no
/// data for this date" rather than a failure. Implementations must be
/// `Send` so a source can be moved into the query worker thread.
#[cfg_attr(test, mockall::automock)]
pub trait RowSource: Send {
    /// Number of rows in the partition for `date`
    ///
    /// Returns `NotFound` when no partition exists for the date.
    fn row_count(&mut self, date: NaiveDate) -> Result<u64>;

    /// All rows in the partition for `date`, in stored order
    ///
    /// Returns `NotFound` when no partition exists for the date.
    fn fetch_rows(&mut self, date: NaiveDate) -> Result<Vec<SensorRow>>;
}
