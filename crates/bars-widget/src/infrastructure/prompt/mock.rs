//! Recording prompt for unit and integration tests.
//!
//! Every call is pushed into a `Mutex<Vec<PromptCall>>` so assertions can
//! check exactly which dialogs were shown and in what order.  `confirm`
//! returns the answer given at construction time.

use std::sync::Mutex;

use crate::application::prompt::{PromptError, UserPrompt};

/// One dialog shown through the [`RecordingPrompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCall {
    Confirm { title: String, message: String },
    Info { title: String, message: String },
    Error { message: String },
}

/// A prompt that records calls instead of showing dialogs.
pub struct RecordingPrompt {
    /// `Some(answer)` for `confirm`, `None` to fail every `confirm`.
    answer: Option<bool>,
    calls: Mutex<Vec<PromptCall>>,
}

impl RecordingPrompt {
    /// A prompt whose `confirm` always returns `answer`.
    pub fn answering(answer: bool) -> Self {
        Self {
            answer: Some(answer),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A prompt whose `confirm` always fails.
    pub fn failing() -> Self {
        Self {
            answer: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of every call so far.
    pub fn calls(&self) -> Vec<PromptCall> {
        self.lock().clone()
    }

    /// Messages passed to `error`, in order.
    pub fn errors(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|c| match c {
                PromptCall::Error { message } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<PromptCall>> {
        // A poisoned lock only means another test thread panicked.
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl UserPrompt for RecordingPrompt {
    fn confirm(&self, title: &str, message: &str) -> Result<bool, PromptError> {
        self.lock().push(PromptCall::Confirm {
            title: title.to_string(),
            message: message.to_string(),
        });
        self.answer
            .ok_or_else(|| PromptError::Input("recording prompt set to fail".to_string()))
    }

    fn info(&self, title: &str, message: &str) {
        self.lock().push(PromptCall::Info {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn error(&self, message: &str) {
        self.lock().push(PromptCall::Error {
            message: message.to_string(),
        });
    }
}
