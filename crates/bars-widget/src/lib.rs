//! bars-widget library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the widget do?
//!
//! 1. Reads `widget.toml` (optional) for the bars file path, window size and
//!    log level.
//! 2. Loads the bars file.  If it is missing, the user is asked whether a
//!    file with five sample bars should be created; declining exits.
//! 3. Opens one resizable, vertically scrollable window near the bottom-right
//!    corner of the screen and draws every visible bar: a coloured fill over a
//!    light track, the title above it and a percentage label inside it.
//!
//! All work happens on one thread.  The bar data is loaded once before the
//! window opens and never changes afterwards.

/// Application layer: the loader use case and the window's state.
pub mod application;

/// Infrastructure layer: dialogs, files, and the native window.
pub mod infrastructure;
