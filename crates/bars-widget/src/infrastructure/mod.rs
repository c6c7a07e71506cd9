//! Infrastructure layer for the widget.
//!
//! Contains OS-facing adapters: dialogs, file access and the native window.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `bars_core`, but MUST NOT be imported by the `application` layer outside
//! of its tests.
//!
//! # Sub-modules
//!
//! - **`prompt`** – Implementations of `UserPrompt`.  On Windows these are
//!   modal message boxes; elsewhere a console prompt on stdin/stderr.  A
//!   recording mock is always compiled for tests.
//!
//! - **`storage`** – The file-backed `BarsSource` and the optional
//!   `widget.toml` settings file.
//!
//! - **`window`** – The Win32 window and GDI painter on Windows, and a plain
//!   text renderer on other platforms.

pub mod prompt;
pub mod storage;
pub mod window;
