//! Configuration module for SensorScope
//!
//! This module handles application configuration:
//! - `config.json` - archive location and UI preferences
//! - `app_state.json` - session state restored on launch (last query dates,
//!   dark mode)
//!
//! Both live in the platform-appropriate data directory:
//! - **Linux**: `~/.local/share/sensorscope/`
//! - **macOS**: `~/Library/Application Support/sensorscope/`
//! - **Windows**: `%APPDATA%\sensorscope\`
//!
//! Missing or unreadable files fall back to defaults; saving is best-effort
//! and never blocks startup or shutdown.

use crate::error::{Result, SensorScopeError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for data directories
pub const APP_ID: &str = "sensorscope";

/// App state filename
pub const APP_STATE_FILE: &str = "app_state.json";

/// Config filename
pub const CONFIG_FILE: &str = "config.json";

/// Default archive filename, resolved relative to the working directory
pub const DEFAULT_ARCHIVE_FILE: &str = "sensorscope.db";

/// Date prefilled into the query inputs on first launch
pub const DEFAULT_QUERY_DATE: &str = "20241215";

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        SensorScopeError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            SensorScopeError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Archive database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite archive file
    pub path: PathBuf,
    /// Prefix of the per-day partition tables
    pub table_prefix: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_ARCHIVE_FILE),
            table_prefix: "data".to_string(),
        }
    }
}

/// UI preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Line width for plot curves
    pub line_width: f32,
    /// Whether plots show a legend
    pub show_legend: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            line_width: 1.5,
            show_legend: true,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Archive database settings
    pub database: DatabaseConfig,
    /// UI preferences
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load the config file, falling back to defaults on any failure
    pub fn load_or_default() -> Self {
        let Some(path) = app_data_dir().map(|d| d.join(CONFIG_FILE)) else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                if path.exists() {
                    tracing::warn!(error = %e, "failed to load config, using defaults");
                }
                Self::default()
            }
        }
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| SensorScopeError::Serialization(e.to_string()))
    }

    /// Save the config to the app data directory
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SensorScopeError::Serialization(e.to_string()))?;
        std::fs::write(dir.join(CONFIG_FILE), contents)?;
        Ok(())
    }
}

/// Session state restored on launch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    /// Start date of the last query (`YYYYMMDD`)
    pub last_start_date: String,
    /// End date of the last query (`YYYYMMDD`)
    pub last_end_date: String,
    /// Whether the UI uses the dark theme
    pub dark_mode: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            last_start_date: DEFAULT_QUERY_DATE.to_string(),
            last_end_date: DEFAULT_QUERY_DATE.to_string(),
            dark_mode: true,
        }
    }
}

impl AppState {
    /// Load the app state, falling back to defaults on any failure
    pub fn load_or_default() -> Self {
        let Some(path) = app_data_dir().map(|d| d.join(APP_STATE_FILE)) else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "failed to parse app state, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save the app state to the app data directory
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SensorScopeError::Serialization(e.to_string()))?;
        std::fs::write(dir.join(APP_STATE_FILE), contents)?;
        Ok(())
    }
}
