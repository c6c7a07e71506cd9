//! The bars file format.
//!
//! The file is a JSON array of objects, one per bar:
//!
//! ```text
//! [
//!     {"title": "Bar 1", "current": 50, "total": 100, "color": "#FF5733"},
//!     {"title": "Bar 2", "current": 75, "total": 100, "color": "#33FF57"}
//! ]
//! ```
//!
//! Parsing happens in two passes:
//!
//! 1. **Structure** – the text is parsed as JSON.  Unterminated objects,
//!    missing commas and trailing garbage are rejected with a
//!    [`DocumentError::Syntax`] carrying the line and column.
//! 2. **Fields** – each object is converted into a [`BarRecord`].  Fields may
//!    appear in any order and unknown keys are ignored.  When a key repeats
//!    inside one object the last value wins.  A missing field takes its
//!    default (empty title, zero counts, black); a field of the wrong shape
//!    takes the same default and adds a [`Diagnostic`].
//!
//! [`BarRecord`]: crate::domain::bar::BarRecord

mod defaults;
mod parse;

pub use defaults::{default_bars, render_default_document, render_document};
pub use parse::{parse_document, MAX_DOCUMENT_BYTES};

use thiserror::Error;

use crate::domain::bar::BarRegistry;

/// Errors that reject a bars document as a whole.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// The text is not well-formed JSON.
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// The top-level value is well-formed but not an array.
    #[error("expected a top-level array of bars, found {found}")]
    NotAnArray { found: &'static str },

    /// The document is larger than [`MAX_DOCUMENT_BYTES`].
    #[error("bars file is {size} bytes, larger than the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },

    /// Records could not be rendered back to text.
    #[error("failed to render bars document: {0}")]
    Render(String),
}

/// A non-fatal problem found while converting objects into records.
///
/// `index` is the zero-based position of the element in the top-level array.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("bar #{}: array element is {found}, not an object; skipped", .index + 1)]
    NotAnObject { index: usize, found: &'static str },

    #[error("bar #{}: \"{field}\" has an unusable value {value}; using {default}", .index + 1)]
    InvalidField {
        index: usize,
        field: &'static str,
        value: String,
        default: &'static str,
    },

    #[error("bar #{}: invalid colour {value}; expected \"#RRGGBB\", using black", .index + 1)]
    InvalidColor { index: usize, value: String },

    #[error("bar #{} ({title:?}) has a total of 0 and will be drawn empty", .index + 1)]
    ZeroTotal { index: usize, title: String },

    #[error("only the first {kept} bars are shown; {dropped} more were ignored")]
    CapacityExceeded { kept: usize, dropped: usize },
}

impl Diagnostic {
    /// Whether the problem is reported to the user rather than only logged.
    ///
    /// Bad colours and zero totals are visible on screen as a black or empty
    /// bar, so the user is told why.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            Diagnostic::InvalidColor { .. } | Diagnostic::ZeroTotal { .. }
        )
    }
}

/// Result of a successful parse: the records plus everything that was defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    pub registry: BarRegistry,
    pub diagnostics: Vec<Diagnostic>,
}
