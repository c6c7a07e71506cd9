//! Platform-specific implementations of [`UserPrompt`].
//!
//! | Module    | OS        | Mechanism                              |
//! |-----------|-----------|----------------------------------------|
//! | `windows` | Windows   | `MessageBoxW` (modal, owner-less)      |
//! | `console` | elsewhere | question on stderr, answer from stdin  |
//!
//! The correct one is selected at compile time and re-exported as
//! `NativePrompt`.
//!
//! [`UserPrompt`]: crate::application::prompt::UserPrompt

pub mod console;
pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "windows")]
pub use self::windows::MessageBoxPrompt as NativePrompt;

#[cfg(not(target_os = "windows"))]
pub use console::StdioPrompt as NativePrompt;
