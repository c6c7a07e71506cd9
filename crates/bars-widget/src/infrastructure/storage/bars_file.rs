//! Filesystem-backed bars document.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::application::load_bars::{BarsSource, SourceError};

/// Reads and writes the bars document at a fixed path.
#[derive(Debug, Clone)]
pub struct FileBarsSource {
    path: PathBuf,
}

impl FileBarsSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BarsSource for FileBarsSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<String, SourceError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => {
                debug!(path = %self.path.display(), bytes = bytes.len(), "bars file read");
                Ok(decode(bytes, &self.path))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(SourceError::NotFound),
            Err(e) => Err(SourceError::Io(e)),
        }
    }

    fn write(&self, contents: &str) -> Result<(), SourceError> {
        std::fs::write(&self.path, contents)?;
        debug!(path = %self.path.display(), bytes = contents.len(), "bars file written");
        Ok(())
    }
}

/// Decodes the file as UTF-8.  Files saved in a legacy code page still load;
/// their invalid bytes become U+FFFD.
fn decode(bytes: Vec<u8>, path: &Path) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            let valid_up_to = e.utf8_error().valid_up_to();
            warn!(
                path = %path.display(),
                valid_up_to,
                "bars file is not valid UTF-8; invalid bytes replaced with U+FFFD"
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}
