//! Storage infrastructure: the bars file and the settings file.
//!
//! - `bars_file` – [`BarsSource`](crate::application::load_bars::BarsSource)
//!   over a path on disk.
//! - `memory` – an in-memory `BarsSource` for tests.
//! - `settings` – the optional `widget.toml` (bars file path, window size,
//!   log level).  The widget only ever reads it.

pub mod bars_file;
pub mod memory;
pub mod settings;
