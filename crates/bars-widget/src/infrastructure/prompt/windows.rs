//! Modal Win32 message boxes.
//!
//! The boxes have no owner window: they are shown before the widget window
//! exists (while the bars file is loaded).

#![cfg(target_os = "windows")]

use windows::core::HSTRING;
use windows::Win32::UI::WindowsAndMessaging::{
    MessageBoxW, IDYES, MB_ICONERROR, MB_ICONINFORMATION, MB_ICONQUESTION, MB_OK, MB_YESNO,
};

use crate::application::prompt::{PromptError, UserPrompt};

/// [`UserPrompt`] backed by `MessageBoxW`.
pub struct MessageBoxPrompt;

impl MessageBoxPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MessageBoxPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl UserPrompt for MessageBoxPrompt {
    fn confirm(&self, title: &str, message: &str) -> Result<bool, PromptError> {
        // SAFETY: both strings are valid null-terminated HSTRINGs that live
        // until MessageBoxW returns; a null owner window is allowed.
        let answer = unsafe {
            MessageBoxW(
                None,
                &HSTRING::from(message),
                &HSTRING::from(title),
                MB_YESNO | MB_ICONQUESTION,
            )
        };
        if answer.0 == 0 {
            return Err(PromptError::Input(
                windows::core::Error::from_win32().message(),
            ));
        }
        Ok(answer == IDYES)
    }

    fn info(&self, title: &str, message: &str) {
        // SAFETY: see `confirm`.
        unsafe {
            MessageBoxW(
                None,
                &HSTRING::from(message),
                &HSTRING::from(title),
                MB_OK | MB_ICONINFORMATION,
            );
        }
    }

    fn error(&self, message: &str) {
        // SAFETY: see `confirm`.
        unsafe {
            MessageBoxW(
                None,
                &HSTRING::from(message),
                &HSTRING::from("Error"),
                MB_OK | MB_ICONERROR,
            );
        }
    }
}
