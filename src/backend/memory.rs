//! In-memory row source for tests and demo mode
//!
//! Serves rows from a per-day map instead of an archive file. Days can be
//! marked as failing to exercise the aggregator's partial-failure policy,
//! and [`MemoryRowSource::synthetic`] generates deterministic waveforms so
//! the application can run without an archive.

use crate::backend::aggregator::DateRange;
use crate::backend::source::{RowSource, SensorRow};
use crate::error::{Result, SensorScopeError};
use crate::types::READINGS_PER_ROW;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use std::f64::consts::PI;

/// Row source backed by an in-memory per-day map
#[derive(Debug, Clone, Default)]
pub struct MemoryRowSource {
    days: BTreeMap<NaiveDate, Vec<SensorRow>>,
    failing: BTreeSet<NaiveDate>,
}

impl MemoryRowSource {
    /// Create an empty source (every date reads as a missing partition)
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the rows for one day's partition
    pub fn insert_day(&mut self, date: NaiveDate, rows: Vec<SensorRow>) {
        self.days.insert(date, rows);
    }

    /// Make every access to `date` fail with a source error
    pub fn fail_day(&mut self, date: NaiveDate) {
        self.failing.insert(date);
    }

    /// Generate a source covering `range` with `rows_per_day` synthetic
    /// samples per day
    ///
    /// Each channel carries a phase-shifted sine as the raw series and a
    /// slower drift as the compensation series. Deterministic, so demo
    /// sessions and tests see identical data.
    pub fn synthetic(range: DateRange, rows_per_day: usize) -> Self {
        let mut source = Self::new();

        for (day_idx, date) in range.days().enumerate() {
            let mut rows = Vec::with_capacity(rows_per_day);
            for i in 0..rows_per_day {
                let t = (day_idx * rows_per_day + i) as f64;
                let mut readings = [0.0; READINGS_PER_ROW];
                for ch in 0..READINGS_PER_ROW / 2 {
                    let phase = ch as f64 * PI / 4.0;
                    readings[2 * ch] = 1550.0 + ch as f64 + 0.5 * (t / 40.0 + phase).sin();
                    readings[2 * ch + 1] = 25.0 + 0.05 * ch as f64 + 2.0 * (t / 400.0).sin();
                }
                let secs = i % 60;
                let mins = (i / 60) % 60;
                let hours = i / 3600;
                rows.push(SensorRow::new(
                    readings,
                    format!("{}T{:02}:{:02}:{:02}", date.format("%Y-%m-%d"), hours, mins, secs),
                ));
            }
            source.insert_day(date, rows);
        }

        source
    }

    fn check_available(&self, date: NaiveDate) -> Result<&Vec<SensorRow>> {
        if self.failing.contains(&date) {
            return Err(SensorScopeError::Source(format!(
                "injected failure for {date}"
            )));
        }
        self.days.get(&date).ok_or_else(|| SensorScopeError::NotFound {
            date: date.format(crate::backend::aggregator::DATE_FORMAT).to_string(),
        })
    }
}

impl RowSource for MemoryRowSource {
    fn row_count(&mut self, date: NaiveDate) -> Result<u64> {
        self.check_available(date).map(|rows| rows.len() as u64)
    }

    fn fetch_rows(&mut self, date: NaiveDate) -> Result<Vec<SensorRow>> {
        self.check_available(date).map(|rows| rows.clone())
    }
}
