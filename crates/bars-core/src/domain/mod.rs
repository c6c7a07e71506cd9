//! Domain entities for the progress bars widget.
//!
//! This module contains pure business logic with no infrastructure
//! dependencies.  Code in outer layers (the loader use case, the window
//! painter) depends on the domain, but the domain never depends on them.

/// Bar records and the registry that owns them.
pub mod bar;

/// 24-bit RGB colours and `#RRGGBB` conversion.
pub mod color;

/// Pixel geometry: rows, fills, labels, scrolling and window placement.
///
/// See [`layout::ScrollState`] and [`layout::layout_frame`] for the main entry points.
pub mod layout;
