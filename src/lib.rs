//! # SensorScope: daily-partitioned sensor archive visualizer
//!
//! A desktop tool for inspecting multi-channel sensor history: it queries
//! an archive of daily partition tables over a date range, overlays each
//! channel's compensation series on its raw series via range rescaling,
//! and lets the user click near a curve to inspect the nearest sample.
//!
//! ## Architecture
//!
//! - **Backend**: Runs archive queries on a worker thread and streams
//!   progress over crossbeam channels
//! - **Analysis**: Pure range-rescaling and nearest-point lookup shared by
//!   the renderer and click inspection
//! - **Frontend**: Renders the UI using eframe/egui with egui_plot for the
//!   channel graphs
//!
//! ## Example
//!
//! ```ignore
//! use sensorscope::{
//!     backend::{QueryBackend, SqliteRowSource},
//!     config::{AppConfig, AppState},
//!     frontend::SensorScopeApp,
//! };
//!
//! fn main() -> eframe::Result<()> {
//!     let config = AppConfig::load_or_default();
//!     let app_state = AppState::load_or_default();
//!
//!     let source = SqliteRowSource::open(&config.database.path)?;
//!     let (backend, frontend) = QueryBackend::new(Box::new(source));
//!     std::thread::spawn(move || backend.run());
//!
//!     eframe::run_native(
//!         "SensorScope",
//!         eframe::NativeOptions::default(),
//!         Box::new(|cc| Ok(Box::new(SensorScopeApp::new(cc, frontend, config, app_state)))),
//!     )
//! }
//! ```

pub mod analysis;
pub mod backend;
pub mod config;
pub mod error;
pub mod frontend;
pub mod types;

// Re-export commonly used types
pub use analysis::{locate_nearest, pick_sample, scale_to_range, InverseParams, ScaleMapping};
pub use backend::{
    aggregate, BackendCommand, BackendMessage, DateRange, MemoryRowSource, ProgressSink,
    QueryBackend, RowSource, SensorRow, SqliteRowSource,
};
pub use config::{AppConfig, AppState};
pub use error::{Result, SensorScopeError};
pub use frontend::SensorScopeApp;
pub use types::{Channel, ChannelSeries, CurveKind, PickResult, SeriesStore};
