//! Console prompt used where no native message box is available.
//!
//! Questions and messages go to the writer (stderr in production), answers
//! are read line by line from the reader (stdin).  Anything starting with
//! `y` or `Y` counts as "yes"; everything else, including an empty line,
//! counts as "no".

use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use tracing::warn;

use crate::application::prompt::{PromptError, UserPrompt};

/// Console prompt over arbitrary reader/writer pairs.
pub struct ConsolePrompt<R, W> {
    input: Mutex<R>,
    output: Mutex<W>,
}

/// The production console prompt on stdin/stderr.
pub type StdioPrompt = ConsolePrompt<io::StdinLock<'static>, io::Stderr>;

impl StdioPrompt {
    pub fn new() -> Self {
        ConsolePrompt::with_io(io::stdin().lock(), io::stderr())
    }
}

impl Default for StdioPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn with_io(input: R, output: W) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
        }
    }

    /// Consumes the prompt and returns the writer (used by tests).
    pub fn into_output(self) -> W {
        self.output.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self, text: &str) {
        let mut out = self.output.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            warn!("console prompt write failed: {e}");
        }
    }
}

impl<R: BufRead, W: Write> UserPrompt for ConsolePrompt<R, W> {
    fn confirm(&self, title: &str, message: &str) -> Result<bool, PromptError> {
        self.write(&format!("{title}\n{message} [y/N] "));

        let mut line = String::new();
        let read = self
            .input
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .read_line(&mut line)
            .map_err(|e| PromptError::Input(e.to_string()))?;
        if read == 0 {
            return Err(PromptError::Input("end of input".to_string()));
        }

        Ok(line.trim_start().starts_with(['y', 'Y']))
    }

    fn info(&self, title: &str, message: &str) {
        self.write(&format!("{title}: {message}\n"));
    }

    fn error(&self, message: &str) {
        self.write(&format!("Error: {message}\n"));
    }
}
