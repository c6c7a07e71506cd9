//! Presentation: puts a [`WidgetState`] on screen.
//!
//! On Windows the state is drawn into a native top-level window with GDI
//! and driven by the Win32 message loop until the user closes it.  Other
//! platforms get a one-shot text rendering of every bar on stdout.
//!
//! Both renderers consume the same [`BarGeometry`](bars_core::BarGeometry)
//! frames, so layout and scrolling are identical and live entirely in
//! `bars_core`.

use thiserror::Error;

use crate::application::widget::WidgetState;
use crate::infrastructure::storage::settings::WindowSettings;

pub mod text;
#[cfg(target_os = "windows")]
pub mod windows;

/// Error type for the presentation layer.
#[derive(Debug, Error)]
pub enum WindowError {
    /// `RegisterClassW` failed.
    #[error("Failed to register window class: {0}")]
    RegisterClass(String),

    /// `CreateWindowExW` failed.
    #[error("Failed to create window: {0}")]
    Create(String),

    /// `GetMessageW` reported an error.
    #[error("Message loop failed: {0}")]
    MessageLoop(String),

    /// The text renderer could not write its output.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Shows the widget and blocks until it is closed.
///
/// # Errors
///
/// Returns [`WindowError`] if the window cannot be created or the output
/// cannot be written.
pub fn run(state: WidgetState, settings: &WindowSettings) -> Result<(), WindowError> {
    #[cfg(target_os = "windows")]
    {
        self::windows::run(state, settings)
    }

    #[cfg(not(target_os = "windows"))]
    {
        let stdout = std::io::stdout();
        text::run(state, settings, &mut stdout.lock())
    }
}
