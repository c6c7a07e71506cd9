//! Progress Bars Dashboard entry point.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_settings("widget.toml")      -- optional, defaults otherwise
//!  └─ load_bars(FileBarsSource, NativePrompt)
//!       ├─ Declined  -> exit 0, no window
//!       └─ Loaded    -> WidgetState
//!  └─ window::run(WidgetState)          -- blocks until the window closes
//! ```

#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use std::path::Path;

use anyhow::Context;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use bars_widget::application::load_bars::{load_bars, LoadOutcome};
use bars_widget::application::prompt::UserPrompt;
use bars_widget::application::widget::WidgetState;
use bars_widget::infrastructure::prompt::NativePrompt;
use bars_widget::infrastructure::storage::bars_file::FileBarsSource;
use bars_widget::infrastructure::storage::settings::{load_settings, WidgetSettings, SETTINGS_FILE};
use bars_widget::infrastructure::window;

fn main() -> anyhow::Result<()> {
    let loaded = load_settings(Path::new(SETTINGS_FILE));
    let level = loaded
        .as_ref()
        .map(|s| s.log_level.clone())
        .unwrap_or_else(|_| WidgetSettings::default().log_level);

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"))
        }))
        .init();

    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            warn!("ignoring {SETTINGS_FILE}: {e}");
            WidgetSettings::default()
        }
    };

    info!(bars_file = %settings.bars_file.display(), "Progress Bars Dashboard starting");

    let prompt = NativePrompt::new();
    let source = FileBarsSource::new(&settings.bars_file);

    let registry = match load_bars(&source, &prompt) {
        LoadOutcome::Loaded { registry, .. } => registry,
        LoadOutcome::Declined => {
            info!("no bars file and none created; exiting");
            return Ok(());
        }
    };

    let state = WidgetState::new(registry);
    if let Err(e) = window::run(state, &settings.window) {
        error!("{e}");
        prompt.error(&e.to_string());
        return Err(e).context("widget window failed");
    }

    info!("Progress Bars Dashboard stopped");
    Ok(())
}
