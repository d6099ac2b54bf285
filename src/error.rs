//! Error handling for the SensorScope application
//!
//! This module defines custom error types and a Result alias for use
//! throughout the application.

use thiserror::Error;

/// Main error type for SensorScope operations
#[derive(Error, Debug)]
pub enum SensorScopeError {
    /// A series operation received unusable input (e.g. an empty sequence)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The requested date range is malformed or inverted
    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    /// No partition exists for the given date. Non-fatal: the aggregator
    /// skips the date and continues.
    #[error("No partition for date {date}")]
    NotFound { date: String },

    /// Errors raised by the archive database
    #[error("Archive error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Other fetch/query failures. Logged by the aggregator, which drops the
    /// affected date and continues.
    #[error("Source error: {0}")]
    Source(String),

    /// A point lookup was attempted with no candidate samples
    #[error("No data points available")]
    NoData,

    /// An in-flight aggregation was superseded or cancelled
    #[error("Query cancelled")]
    Cancelled,

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to channel communication
    #[error("Channel error: {0}")]
    Channel(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<SensorScopeError>,
    },
}

impl SensorScopeError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        SensorScopeError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// True for the missing-partition case, which the aggregator treats as
    /// a skip rather than a failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, SensorScopeError::NotFound { .. })
    }

    /// True when an aggregation run was cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SensorScopeError::Cancelled)
    }
}

/// Result type alias for SensorScope operations
pub type Result<T> = std::result::Result<T, SensorScopeError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
