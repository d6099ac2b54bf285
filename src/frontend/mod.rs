//! Frontend module for the SensorScope UI
//!
//! Renders the query bar and the per-channel plots with eframe/egui, and
//! talks to the backend worker through the [`FrontendReceiver`] handle.
//!
//! [`FrontendReceiver`]: crate::backend::FrontendReceiver

pub mod app;
pub mod plot;

pub use app::SensorScopeApp;
pub use plot::ChannelPlot;
