//! # bars-core
//!
//! Shared library for the progress bars widget containing the bar data model,
//! colour conversion, on-screen layout geometry and the bars file format.
//!
//! This crate has zero dependencies on OS APIs, windowing toolkits, or the
//! filesystem.  Everything here can be unit-tested on any platform.
//!
//! # Architecture overview
//!
//! The widget shows a vertical, scrollable list of labelled progress bars
//! read from a small JSON file (`bars.json` by default).  This crate defines:
//!
//! - **`domain`** – The bar record, the fixed-capacity registry that owns all
//!   records for the process lifetime, `#RRGGBB` colour conversion, and the
//!   pixel geometry used by the window to place tracks, fills and labels.
//!
//! - **`document`** – How the bars file is read and written.  The text is
//!   parsed as JSON (structural errors are rejected with a line/column) and
//!   each object is then converted leniently into a [`BarRecord`], collecting
//!   [`Diagnostic`]s for fields that had to be defaulted.

pub mod document;
pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `bars_core::BarRecord` instead of `bars_core::domain::bar::BarRecord`.
pub use document::{
    parse_document, render_default_document, Diagnostic, DocumentError, ParsedDocument,
};
pub use domain::bar::{BarRecord, BarRegistry, MAX_BARS, MAX_TITLE_CHARS};
pub use domain::color::{ColorError, Rgb};
pub use domain::layout::{
    BarGeometry, Rect, ScrollCommand, ScrollState, Viewport, WindowPlacement,
};
