//! Application layer use cases for the widget.
//!
//! - **`load_bars`** – Reads the bars file through a [`load_bars::BarsSource`],
//!   offers to create a default file when it is missing, and reports problems
//!   through a [`prompt::UserPrompt`].
//!
//! - **`prompt`** – The port through which the application talks to the user
//!   (yes/no question, information, error).  Implemented by message boxes on
//!   Windows and by a console prompt elsewhere.
//!
//! - **`widget`** – The state owned by the window: the loaded registry, the
//!   scroll position and the current viewport.  Window events are translated
//!   into calls on [`widget::WidgetState`].

pub mod load_bars;
pub mod prompt;
pub mod widget;
