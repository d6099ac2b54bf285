//! Bulk ingestion of daily partitions into per-channel series
//!
//! The aggregator walks an inclusive date range, fetches every available
//! partition, and distributes each row's readings into the four channels'
//! series. Missing partitions are skipped silently; any other per-date
//! source failure drops that date's contribution and aggregation continues
//! with the rest of the range.
//!
//! # Progress reporting
//!
//! Progress needs a denominator before the first row arrives, so the
//! aggregator runs two passes: pass 1 sums the per-partition row counts,
//! pass 2 fetches the rows. Partition sizes are not assumed uniform.
//! Interior reports fire each time the processed count advances by at
//! least 5% of the total, which bounds the callback rate at roughly 20
//! calls per run regardless of dataset size; a final `update(100)` fires
//! exactly once on completion.
//!
//! # Cancellation
//!
//! [`aggregate_with_abort`] checks a shared flag once per date and bails
//! out with `Cancelled`. The query worker uses this to let a new query
//! supersede an in-flight one without ever publishing a half-built result.

use crate::backend::source::RowSource;
use crate::error::{Result, SensorScopeError};
use crate::types::{empty_channel_series, ChannelSeries};
use chrono::NaiveDate;
use std::sync::atomic::{AtomicBool, Ordering};

/// Wire format for query dates
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Fraction of the total row count that must be processed between
/// consecutive progress reports
const PROGRESS_STEP: f64 = 0.05;

/// An inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, failing with `InvalidDateRange` when inverted
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(SensorScopeError::InvalidDateRange(format!(
                "start {} is after end {}",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse a range from two `YYYYMMDD` strings
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_day(start)?, parse_day(end)?)
    }

    /// First date of the range
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last date of the range (inclusive)
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Iterate every date in the range, in calendar order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Number of dates in the range
    pub fn day_count(&self) -> u64 {
        (self.end - self.start).num_days() as u64 + 1
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// Parse one `YYYYMMDD` date string
pub fn parse_day(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|e| {
        SensorScopeError::InvalidDateRange(format!("unparsable date '{}': {}", text.trim(), e))
    })
}

/// Receiver for coarse-grained aggregation progress
///
/// `update` is called with a percentage in `[0, 100]`, at most ~20 times
/// per run plus the final `update(100)`. Implemented for any `FnMut(u8)`
/// closure.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressSink {
    /// Report aggregation progress as a percentage
    fn update(&mut self, percent: u8);
}

impl<F: FnMut(u8)> ProgressSink for F {
    fn update(&mut self, percent: u8) {
        self(percent)
    }
}

/// Aggregate every partition in `range` into per-channel series
///
/// See the module docs for the skip/continue policy and progress cadence.
/// Only range validation errors propagate; per-date failures never abort
/// the run.
pub fn aggregate(
    range: DateRange,
    source: &mut dyn RowSource,
    progress: &mut dyn ProgressSink,
) -> Result<ChannelSeries> {
    let abort = AtomicBool::new(false);
    aggregate_with_abort(range, source, progress, &abort)
}

/// [`aggregate`] with a cooperative cancellation flag
///
/// The flag is checked once per date in each pass. On cancellation the
/// partially built series is discarded and `Cancelled` is returned.
pub fn aggregate_with_abort(
    range: DateRange,
    source: &mut dyn RowSource,
    progress: &mut dyn ProgressSink,
    abort: &AtomicBool,
) -> Result<ChannelSeries> {
    // Pass 1: establish the progress denominator.
    let mut total: u64 = 0;
    for date in range.days() {
        if abort.load(Ordering::Relaxed) {
            return Err(SensorScopeError::Cancelled);
        }
        match source.row_count(date) {
            Ok(count) => total += count,
            Err(e) if e.is_not_found() => {
                tracing::debug!(date = %date, "no partition, skipping");
            }
            Err(e) => {
                tracing::warn!(date = %date, error = %e, "row count failed, date dropped from total");
            }
        }
    }

    // Pass 2: fetch and distribute rows.
    let mut channels = empty_channel_series();
    let update_threshold = total as f64 * PROGRESS_STEP;
    let mut processed: u64 = 0;
    let mut last_reported: u64 = 0;

    for date in range.days() {
        if abort.load(Ordering::Relaxed) {
            return Err(SensorScopeError::Cancelled);
        }
        let rows = match source.fetch_rows(date) {
            Ok(rows) => rows,
            Err(e) if e.is_not_found() => {
                tracing::debug!(date = %date, "no partition, skipping");
                continue;
            }
            Err(e) => {
                tracing::warn!(date = %date, error = %e, "fetch failed, date dropped");
                continue;
            }
        };

        for row in rows {
            for (channel, store) in channels.iter_mut() {
                let (raw, compensation) = row.reading_pair(*channel);
                store.push(raw, compensation, row.sensing_time.clone());
            }

            processed += 1;
            if total > 0 && (processed - last_reported) as f64 >= update_threshold {
                // Interior reports cap at 99 so 100 is reported exactly once,
                // even if a partition grew between the two passes.
                let percent = (processed * 100 / total).min(99) as u8;
                progress.update(percent);
                last_reported = processed;
            }
        }
    }

    progress.update(100);
    Ok(channels)
}
