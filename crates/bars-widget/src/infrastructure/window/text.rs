//! Plain-text renderer.
//!
//! Each bar becomes two lines, its title followed by the track drawn with
//! `#` (filled) and `.` (unfilled) and the progress label:
//!
//! ```text
//! Bar 1
//! [##############..........................] 35% (35/100)
//! ```

use std::io::Write;

use bars_core::domain::layout::content_height;
use bars_core::{BarGeometry, Viewport};
use tracing::debug;

use super::WindowError;
use crate::application::widget::WidgetState;
use crate::infrastructure::storage::settings::WindowSettings;

/// Characters used for a full track.
pub const TEXT_TRACK_CHARS: usize = 40;

/// Renders every bar of `state` to `out`.
///
/// The viewport is the configured window width and tall enough to hold all
/// rows, so nothing is scrolled out of view.
pub fn run<W: Write>(
    mut state: WidgetState,
    settings: &WindowSettings,
    out: &mut W,
) -> Result<(), WindowError> {
    let count = state.registry().len();
    state.resize(Viewport::new(settings.width, content_height(count)));

    writeln!(out, "{}", settings.title)?;
    out.write_all(render_frame(&state.frame()).as_bytes())?;
    out.flush()?;

    debug!(bars = count, "frame rendered as text");
    Ok(())
}

/// Formats a frame, two lines per bar.
pub fn render_frame(frame: &[BarGeometry]) -> String {
    if frame.is_empty() {
        return "(no bars)\n".to_string();
    }

    let mut text = String::new();
    for geometry in frame {
        let filled = filled_chars(geometry);
        text.push_str(&geometry.title);
        text.push('\n');
        text.push('[');
        text.push_str(&"#".repeat(filled));
        text.push_str(&".".repeat(TEXT_TRACK_CHARS - filled));
        text.push_str("] ");
        text.push_str(&geometry.label);
        text.push('\n');
    }
    text
}

fn filled_chars(geometry: &BarGeometry) -> usize {
    let track = i64::from(geometry.track.width());
    if track <= 0 {
        return 0;
    }
    let fill = i64::from(geometry.fill.width()).clamp(0, track);
    // fill <= track, so the result is at most TEXT_TRACK_CHARS.
    usize::try_from(fill * TEXT_TRACK_CHARS as i64 / track).unwrap_or(0)
}
