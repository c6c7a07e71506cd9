//! In-memory bars document for tests.
//!
//! Behaves like a single file: it may be absent, present, read-only, or
//! unreadable.  Reads are counted so tests can check that the loader
//! re-reads the document exactly once after creating it.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::load_bars::{BarsSource, SourceError};

pub struct InMemoryBarsSource {
    contents: Mutex<Option<String>>,
    writable: bool,
    fail_reads: bool,
    reads: AtomicUsize,
}

impl InMemoryBarsSource {
    fn build(contents: Option<String>, writable: bool, fail_reads: bool) -> Self {
        Self {
            contents: Mutex::new(contents),
            writable,
            fail_reads,
            reads: AtomicUsize::new(0),
        }
    }

    /// A document that exists with `text`.
    pub fn with_contents(text: &str) -> Self {
        Self::build(Some(text.to_string()), true, false)
    }

    /// A document that does not exist yet but can be created.
    pub fn missing() -> Self {
        Self::build(None, true, false)
    }

    /// A document that does not exist and cannot be created.
    pub fn missing_and_read_only() -> Self {
        Self::build(None, false, false)
    }

    /// A document whose reads fail with a permission error.
    pub fn failing_reads() -> Self {
        Self::build(Some(String::new()), true, true)
    }

    /// Current contents, `None` if the document does not exist.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of `read` calls so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}

impl BarsSource for InMemoryBarsSource {
    fn location(&self) -> String {
        "memory://bars.json".to_string()
    }

    fn read(&self) -> Result<String, SourceError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        if self.fail_reads {
            return Err(SourceError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "access denied",
            )));
        }
        self.contents().ok_or(SourceError::NotFound)
    }

    fn write(&self, contents: &str) -> Result<(), SourceError> {
        if !self.writable {
            return Err(SourceError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "read-only location",
            )));
        }
        *self.contents.lock().unwrap_or_else(|e| e.into_inner()) = Some(contents.to_string());
        Ok(())
    }
}
