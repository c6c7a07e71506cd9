//! Optional TOML settings for the widget.
//!
//! The settings live in `widget.toml` in the working directory.  Every field
//! has a default, so the file may be absent, empty, or list only the keys the
//! user wants to change:
//!
//! ```toml
//! bars_file = "C:/dashboards/bars.json"
//! log_level = "debug"
//!
//! [window]
//! visible_rows = 8
//! edge_offset = 40
//! ```
//!
//! The widget only reads this file; nothing ever writes it back.

use std::path::{Path, PathBuf};

use bars_core::domain::layout::{
    initial_window_height, DEFAULT_EDGE_OFFSET, DEFAULT_VISIBLE_ROWS, DEFAULT_WINDOW_WIDTH,
};
use serde::Deserialize;
use thiserror::Error;

/// Default settings file name, resolved against the working directory.
pub const SETTINGS_FILE: &str = "widget.toml";

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Settings schema ───────────────────────────────────────────────────────────

/// Top-level widget settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WidgetSettings {
    /// Path of the bars document.
    #[serde(default = "default_bars_file")]
    pub bars_file: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub window: WindowSettings,
}

/// Size and placement of the widget window.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WindowSettings {
    /// Window caption.
    #[serde(default = "default_title")]
    pub title: String,
    /// Outer window width in pixels.
    #[serde(default = "default_width")]
    pub width: i32,
    /// Bar rows visible without scrolling; sets the initial height.
    #[serde(default = "default_visible_rows")]
    pub visible_rows: i32,
    /// Gap between the window and the bottom-right corner of the work area.
    #[serde(default = "default_edge_offset")]
    pub edge_offset: i32,
}

impl WindowSettings {
    /// Initial outer window size `(width, height)`.
    pub fn initial_size(&self) -> (i32, i32) {
        (self.width.max(1), initial_window_height(self.visible_rows.max(1)))
    }
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_bars_file() -> PathBuf {
    PathBuf::from("bars.json")
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_title() -> String {
    "Progress Bars Dashboard".to_string()
}
fn default_width() -> i32 {
    DEFAULT_WINDOW_WIDTH
}
fn default_visible_rows() -> i32 {
    DEFAULT_VISIBLE_ROWS
}
fn default_edge_offset() -> i32 {
    DEFAULT_EDGE_OFFSET
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            bars_file: default_bars_file(),
            log_level: default_log_level(),
            window: WindowSettings::default(),
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            visible_rows: default_visible_rows(),
            edge_offset: default_edge_offset(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Loads settings from `path`, returning `WidgetSettings::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for file-system errors other than "not
/// found", and [`SettingsError::Parse`] if the TOML is malformed.
pub fn load_settings(path: &Path) -> Result<WidgetSettings, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(WidgetSettings::default()),
        Err(e) => Err(SettingsError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
