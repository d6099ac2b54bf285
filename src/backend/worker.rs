//! Backend worker thread implementation
//!
//! This module contains the main worker loop that runs in a separate
//! thread and serves archive queries. It communicates with the UI thread
//! through crossbeam channels.
//!
//! # Responsibilities
//!
//! - **Command processing**: responds to UI commands (query, cancel, shutdown)
//! - **Aggregation**: runs the two-pass partition aggregation per query
//! - **Progress streaming**: forwards aggregation progress as messages
//! - **Supersession**: a queued query replaces older queued ones, and the
//!   shared abort flag bails out any aggregation already in flight
//!
//! Results cross the thread boundary only as complete [`ChannelSeries`]
//! values; a cancelled run publishes nothing.

use crate::backend::aggregator::{aggregate_with_abort, DateRange, ProgressSink};
use crate::backend::{BackendCommand, BackendMessage, RowSource};
use crossbeam_channel::{Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The backend worker that serves queries one at a time
pub struct BackendWorker {
    /// Archive source queries run against
    source: Box<dyn RowSource>,
    /// Command receiver from the UI
    command_rx: Receiver<BackendCommand>,
    /// Message sender to the UI
    message_tx: Sender<BackendMessage>,
    /// Abort flag shared with the frontend handle
    abort: Arc<AtomicBool>,
}

/// Progress sink that forwards percentages as backend messages
struct MessageProgress<'a> {
    tx: &'a Sender<BackendMessage>,
}

impl ProgressSink for MessageProgress<'_> {
    fn update(&mut self, percent: u8) {
        let _ = self.tx.send(BackendMessage::Progress(percent));
    }
}

impl BackendWorker {
    /// Create a new backend worker
    pub fn new(
        source: Box<dyn RowSource>,
        command_rx: Receiver<BackendCommand>,
        message_tx: Sender<BackendMessage>,
        abort: Arc<AtomicBool>,
    ) -> Self {
        Self {
            source,
            command_rx,
            message_tx,
            abort,
        }
    }

    /// Run the worker loop until shutdown or channel disconnect
    pub fn run(&mut self) {
        tracing::info!("Query worker started");

        while let Ok(cmd) = self.command_rx.recv() {
            match self.coalesce(cmd) {
                BackendCommand::Query { start, end } => self.run_query(&start, &end),
                BackendCommand::CancelQuery => {
                    // Nothing in flight on this thread; the abort flag has
                    // already dealt with anything that was.
                }
                BackendCommand::Shutdown => break,
            }
        }

        let _ = self.message_tx.send(BackendMessage::Shutdown);
        tracing::info!("Query worker stopped");
    }

    /// Drain queued commands so only the newest query survives
    ///
    /// Superseded queries were already aborted by the frontend handle via
    /// the shared flag; skipping their queued commands avoids running them
    /// back to back.
    fn coalesce(&self, first: BackendCommand) -> BackendCommand {
        let mut current = first;
        while let Ok(next) = self.command_rx.try_recv() {
            match next {
                BackendCommand::Shutdown => return BackendCommand::Shutdown,
                other => current = other,
            }
        }
        current
    }

    fn run_query(&mut self, start: &str, end: &str) {
        self.abort.store(false, Ordering::SeqCst);

        let range = match DateRange::parse(start, end) {
            Ok(range) => range,
            Err(e) => {
                tracing::warn!(error = %e, "rejecting query");
                let _ = self
                    .message_tx
                    .send(BackendMessage::QueryFailed(e.to_string()));
                return;
            }
        };

        tracing::info!(%range, "query started");
        let _ = self.message_tx.send(BackendMessage::QueryStarted);

        let mut progress = MessageProgress {
            tx: &self.message_tx,
        };

        match aggregate_with_abort(range, self.source.as_mut(), &mut progress, &self.abort) {
            Ok(channels) => {
                let samples = channels.values().map(|s| s.len()).next().unwrap_or(0);
                tracing::info!(%range, samples, "query finished");
                let _ = self.message_tx.send(BackendMessage::QueryFinished(channels));
            }
            Err(e) if e.is_cancelled() => {
                tracing::info!(%range, "query superseded");
                let _ = self.message_tx.send(BackendMessage::QueryCancelled);
            }
            Err(e) => {
                tracing::warn!(%range, error = %e, "query failed");
                let _ = self
                    .message_tx
                    .send(BackendMessage::QueryFailed(e.to_string()));
            }
        }
    }
}
