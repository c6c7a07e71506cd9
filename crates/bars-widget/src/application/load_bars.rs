//! LoadBarsUseCase: turns the bars file into the registry the window draws.
//!
//! # Flow
//!
//! ```text
//! read file ──ok──────────────────────────────> parse ──> report diagnostics
//!     │                                                    └─ none loaded? report once
//!     └─ not found ──> ask "create defaults?"
//!                         ├─ no  ──> Declined (caller exits with status 0)
//!                         └─ yes ──> write defaults ──ok──> read once more ──> parse
//!                                         └─ failed ──> report, empty registry
//! ```
//!
//! Every failure other than "declined" is reported through the
//! [`UserPrompt`] and leaves the registry empty; the window still opens.

use bars_core::{
    parse_document, render_default_document, BarRegistry, Diagnostic, DocumentError,
};
use thiserror::Error;
use tracing::{info, warn};

use super::prompt::UserPrompt;

/// Error type for a [`BarsSource`].
#[derive(Debug, Error)]
pub enum SourceError {
    /// Nothing exists at the source location.
    #[error("file not found")]
    NotFound,

    /// Any other I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Where the bars document lives.
pub trait BarsSource {
    /// Human-readable location used in messages (e.g. `bars.json`).
    fn location(&self) -> String;

    /// Reads the whole document.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotFound`] when the document does not exist.
    fn read(&self) -> Result<String, SourceError>;

    /// Creates (or overwrites) the document with `contents`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] if the document cannot be written.
    fn write(&self, contents: &str) -> Result<(), SourceError>;
}

/// Reasons a load ended without any bars.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not read '{location}': {source}")]
    Read {
        location: String,
        #[source]
        source: SourceError,
    },

    #[error("Could not create default file '{location}': {reason}")]
    CreateDefault { location: String, reason: String },

    #[error("'{location}' is not a valid bars file: {source}")]
    Document {
        location: String,
        #[source]
        source: DocumentError,
    },
}

/// What the loader produced.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Bars are ready (possibly none).  `error` is set when the load failed
    /// and has already been reported to the user.
    Loaded {
        registry: BarRegistry,
        error: Option<LoadError>,
    },
    /// The file was missing and the user declined to create it.
    Declined,
}

impl LoadOutcome {
    /// The registry, or `None` when the user declined.
    pub fn into_registry(self) -> Option<BarRegistry> {
        match self {
            LoadOutcome::Loaded { registry, .. } => Some(registry),
            LoadOutcome::Declined => None,
        }
    }
}

/// Loads the bars document, interacting with the user where needed.
///
/// The document is re-read at most once, right after the default file has
/// been written.
pub fn load_bars(source: &dyn BarsSource, prompt: &dyn UserPrompt) -> LoadOutcome {
    let location = source.location();

    let text = match source.read() {
        Ok(text) => text,
        Err(SourceError::NotFound) => {
            info!(%location, "bars file not found");
            match create_default(source, prompt, &location) {
                Ok(true) => {}
                Ok(false) => return LoadOutcome::Declined,
                Err(err) => return failed(prompt, err),
            }
            match source.read() {
                Ok(text) => text,
                Err(err) => return failed(prompt, LoadError::Read { location, source: err }),
            }
        }
        Err(err) => return failed(prompt, LoadError::Read { location, source: err }),
    };

    let doc = match parse_document(&text) {
        Ok(doc) => doc,
        Err(err) => return failed(prompt, LoadError::Document { location, source: err }),
    };

    report_diagnostics(prompt, &doc.diagnostics);

    if doc.registry.is_empty() {
        warn!(%location, "bars file contains no bars");
        prompt.error(&format!("No bars loaded from '{location}'."));
    } else {
        info!(%location, bars = doc.registry.len(), "bars loaded");
    }

    LoadOutcome::Loaded {
        registry: doc.registry,
        error: None,
    }
}

/// Asks to create the default file and writes it.
///
/// Returns `Ok(false)` when the user declines (or cannot be asked).
fn create_default(
    source: &dyn BarsSource,
    prompt: &dyn UserPrompt,
    location: &str,
) -> Result<bool, LoadError> {
    let question = format!(
        "The file '{location}' does not exist.\nDo you want to create it using some initial values?"
    );
    let accepted = match prompt.confirm(&format!("Could not open {location}"), &question) {
        Ok(answer) => answer,
        Err(e) => {
            warn!("could not ask about creating a default bars file: {e}");
            false
        }
    };
    if !accepted {
        info!(%location, "user declined to create a default bars file");
        return Ok(false);
    }

    let contents = render_default_document().map_err(|e| LoadError::CreateDefault {
        location: location.to_string(),
        reason: e.to_string(),
    })?;
    source
        .write(&contents)
        .map_err(|e| LoadError::CreateDefault {
            location: location.to_string(),
            reason: e.to_string(),
        })?;

    info!(%location, "default bars file created");
    prompt.info(
        "Success",
        &format!("Default file '{location}' created successfully."),
    );
    Ok(true)
}

fn failed(prompt: &dyn UserPrompt, err: LoadError) -> LoadOutcome {
    warn!("bars load failed: {err}");
    prompt.error(&err.to_string());
    LoadOutcome::Loaded {
        registry: BarRegistry::new(),
        error: Some(err),
    }
}

/// Bars named in the zero-total dialog before the rest are only counted.
const MAX_LISTED_ZERO_TOTALS: usize = 10;

/// Logs every diagnostic.  Bad colours get one dialog each; all zero totals
/// share a single dialog.
fn report_diagnostics(prompt: &dyn UserPrompt, diagnostics: &[Diagnostic]) {
    let mut zero_totals = Vec::new();
    for diagnostic in diagnostics {
        warn!("{diagnostic}");
        match diagnostic {
            Diagnostic::ZeroTotal { index, title } => {
                zero_totals.push(format!("#{} {title:?}", index + 1));
            }
            other if other.is_user_visible() => prompt.error(&other.to_string()),
            _ => {}
        }
    }

    if !zero_totals.is_empty() {
        prompt.error(&zero_total_message(&zero_totals));
    }
}

fn zero_total_message(bars: &[String]) -> String {
    let count = bars.len();
    let noun = if count == 1 { "bar has" } else { "bars have" };
    let listed = bars
        .iter()
        .take(MAX_LISTED_ZERO_TOTALS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let mut message =
        format!("{count} {noun} a total of 0 and will be drawn empty: {listed}");
    if count > MAX_LISTED_ZERO_TOTALS {
        message.push_str(&format!(" and {} more", count - MAX_LISTED_ZERO_TOTALS));
    }
    message
}
