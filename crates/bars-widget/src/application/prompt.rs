//! The user-facing dialog port.

use thiserror::Error;

/// Error type for prompt operations.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The answer could not be read (e.g. stdin closed).
    #[error("could not read the answer: {0}")]
    Input(String),
}

/// Blocking, modal communication with the user.
///
/// Every call returns only after the user has dismissed the dialog.
pub trait UserPrompt {
    /// Asks a yes/no question.  Returns `Ok(true)` for "yes".
    ///
    /// # Errors
    ///
    /// Returns [`PromptError`] if no answer could be obtained.
    fn confirm(&self, title: &str, message: &str) -> Result<bool, PromptError>;

    /// Shows an informational message.
    fn info(&self, title: &str, message: &str);

    /// Shows an error message.
    fn error(&self, message: &str);
}
