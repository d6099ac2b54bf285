//! Backend module for archive queries
//!
//! This module runs all archive access in a separate thread to keep the UI
//! responsive. It uses crossbeam channels for thread-safe communication
//! with the frontend.
//!
//! # Architecture
//!
//! - [`BackendCommand`] - Messages sent from UI to backend (query, cancel, shutdown)
//! - [`BackendMessage`] - Messages sent from backend to UI (progress, results, errors)
//! - [`FrontendReceiver`] - UI-side handle for sending commands and receiving messages
//! - [`QueryBackend`] - Main backend entry point that owns the worker loop
//!
//! # Components
//!
//! - [`RowSource`] - Unified interface over daily-partitioned archives
//! - [`SqliteRowSource`] - On-disk archive access
//! - [`MemoryRowSource`] - In-memory source for tests and demo mode
//! - [`BackendWorker`] - Worker loop that runs queries and streams progress
//!
//! # Query lifecycle
//!
//! One worker thread serves one query at a time, so two aggregation runs
//! never execute concurrently. Issuing a new query raises a shared abort
//! flag that makes any in-flight aggregation bail out; its partial result
//! is discarded, never published. Progress percentages arrive in
//! non-decreasing order.
//!
//! # Example
//!
//! ```ignore
//! use sensorscope::backend::{BackendMessage, MemoryRowSource, QueryBackend};
//! use sensorscope::backend::aggregator::DateRange;
//!
//! let range = DateRange::parse("20241215", "20241216")?;
//! let source = MemoryRowSource::synthetic(range, 100);
//! let (backend, frontend) = QueryBackend::new(Box::new(source));
//!
//! std::thread::spawn(move || backend.run());
//! frontend.query("20241215", "20241216");
//!
//! for msg in frontend.drain() {
//!     match msg {
//!         BackendMessage::QueryFinished(channels) => { /* plot */ }
//!         BackendMessage::Progress(percent) => { /* progress bar */ }
//!         _ => {}
//!     }
//! }
//! ```

pub mod aggregator;
pub mod memory;
pub mod source;
pub mod sqlite;
pub mod worker;

pub use aggregator::{
    aggregate, aggregate_with_abort, parse_day, DateRange, ProgressSink, DATE_FORMAT,
};
pub use memory::MemoryRowSource;
pub use source::{RowSource, SensorRow};
pub use sqlite::{SqliteRowSource, DEFAULT_TABLE_PREFIX};
pub use worker::BackendWorker;

use crate::types::ChannelSeries;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Message sent from the UI to the backend
#[derive(Debug, Clone)]
pub enum BackendCommand {
    /// Run a query over an inclusive date range (`YYYYMMDD` strings)
    Query {
        /// First date of the range
        start: String,
        /// Last date of the range
        end: String,
    },
    /// Cancel the in-flight query, if any
    CancelQuery,
    /// Shutdown the backend
    Shutdown,
}

/// Message sent from the backend to the UI
#[derive(Debug, Clone)]
pub enum BackendMessage {
    /// A query passed validation and started aggregating
    QueryStarted,
    /// Aggregation progress in percent, non-decreasing per query
    Progress(u8),
    /// Query completed; the full per-channel result
    QueryFinished(ChannelSeries),
    /// Query failed with the given message
    QueryFailed(String),
    /// An in-flight query was cancelled or superseded
    QueryCancelled,
    /// Backend is shutting down
    Shutdown,
}

/// Frontend handle for backend communication
pub struct FrontendReceiver {
    /// Receiver for backend messages
    pub receiver: Receiver<BackendMessage>,
    /// Sender for commands to the backend
    pub command_sender: Sender<BackendCommand>,
    /// Shared abort flag for superseding an in-flight query
    abort: Arc<AtomicBool>,
}

impl FrontendReceiver {
    /// Try to receive a message without blocking
    pub fn try_recv(&self) -> Option<BackendMessage> {
        self.receiver.try_recv().ok()
    }

    /// Receive all pending messages
    pub fn drain(&self) -> Vec<BackendMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.receiver.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Send a command to the backend
    pub fn send_command(&self, cmd: BackendCommand) -> bool {
        self.command_sender.send(cmd).is_ok()
    }

    /// Request a query over an inclusive `YYYYMMDD` date range
    ///
    /// Any in-flight query is superseded: its aggregation is aborted and
    /// its result discarded.
    pub fn query(&self, start: impl Into<String>, end: impl Into<String>) {
        self.abort.store(true, Ordering::SeqCst);
        let _ = self.command_sender.send(BackendCommand::Query {
            start: start.into(),
            end: end.into(),
        });
    }

    /// Cancel the in-flight query, if any
    pub fn cancel_query(&self) {
        self.abort.store(true, Ordering::SeqCst);
        let _ = self.command_sender.send(BackendCommand::CancelQuery);
    }

    /// Request shutdown
    pub fn shutdown(&self) {
        self.abort.store(true, Ordering::SeqCst);
        let _ = self.command_sender.send(BackendCommand::Shutdown);
    }
}

/// The query backend that runs in a separate thread
pub struct QueryBackend {
    command_receiver: Receiver<BackendCommand>,
    message_sender: Sender<BackendMessage>,
    abort: Arc<AtomicBool>,
    source: Box<dyn RowSource>,
}

impl QueryBackend {
    /// Create a new backend over `source`, with communication channels
    pub fn new(source: Box<dyn RowSource>) -> (Self, FrontendReceiver) {
        let (cmd_tx, cmd_rx) = bounded(64);
        // Progress messages are bounded per query, so a modest buffer keeps
        // the worker from blocking on a briefly busy UI.
        let (msg_tx, msg_rx) = bounded(1024);
        let abort = Arc::new(AtomicBool::new(false));

        let backend = Self {
            command_receiver: cmd_rx,
            message_sender: msg_tx,
            abort: abort.clone(),
            source,
        };

        let frontend = FrontendReceiver {
            receiver: msg_rx,
            command_sender: cmd_tx,
            abort,
        };

        (backend, frontend)
    }

    /// Run the backend loop until shutdown
    pub fn run(self) {
        let mut worker = BackendWorker::new(
            self.source,
            self.command_receiver,
            self.message_sender,
            self.abort,
        );
        worker.run();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_creation() {
        let (backend, frontend) = QueryBackend::new(Box::new(MemoryRowSource::new()));

        assert!(!backend.abort.load(Ordering::SeqCst));
        assert!(frontend.send_command(BackendCommand::Shutdown));
    }

    #[test]
    fn test_new_query_raises_abort_flag() {
        let (backend, frontend) = QueryBackend::new(Box::new(MemoryRowSource::new()));

        frontend.query("20241215", "20241215");
        assert!(backend.abort.load(Ordering::SeqCst));
    }
}
