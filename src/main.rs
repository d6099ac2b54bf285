//! SensorScope - Main Entry Point
//!
//! Desktop visualizer for daily-partitioned multi-channel sensor archives.

use sensorscope::{
    backend::{DateRange, MemoryRowSource, QueryBackend, RowSource, SqliteRowSource},
    config::{AppConfig, AppState, DEFAULT_QUERY_DATE},
    frontend::SensorScopeApp,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sensorscope=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting SensorScope");

    let config = AppConfig::load_or_default();
    let app_state = AppState::load_or_default();

    let source: Box<dyn RowSource> = match SqliteRowSource::open_with_prefix(
        &config.database.path,
        config.database.table_prefix.clone(),
    ) {
        Ok(source) => {
            tracing::info!(path = %config.database.path.display(), "archive opened");
            Box::new(source)
        }
        Err(e) => {
            tracing::warn!(
                path = %config.database.path.display(),
                error = %e,
                "archive unavailable, serving synthetic demo data"
            );
            let demo_range = DateRange::parse(DEFAULT_QUERY_DATE, DEFAULT_QUERY_DATE)
                .expect("default query date is valid");
            Box::new(MemoryRowSource::synthetic(demo_range, 600))
        }
    };

    let (backend, frontend) = QueryBackend::new(source);
    let backend_handle = std::thread::spawn(move || backend.run());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("SensorScope"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "SensorScope",
        native_options,
        Box::new(|cc| Ok(Box::new(SensorScopeApp::new(cc, frontend, config, app_state)))),
    );

    tracing::info!("Shutting down...");
    drop(backend_handle);

    result
}
