//! WidgetState: everything the window needs between two events.
//!
//! The native window owns exactly one `WidgetState` and passes it by
//! reference into its event handlers.  The state never touches the OS; it
//! answers "what should be drawn?" and "where is the scrollbar?" from the
//! registry, the scroll offset and the last known viewport size.

use bars_core::domain::layout::{content_height, layout_frame};
use bars_core::{BarGeometry, BarRegistry, ScrollCommand, ScrollState, Viewport};
use tracing::trace;

/// Position and size of the vertical scrollbar thumb.
///
/// Mirrors Win32 `SCROLLINFO`: the range is `0..=range_max`, the thumb
/// covers `page` units and starts at `position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollbarModel {
    pub range_max: i32,
    pub page: u32,
    pub position: i32,
}

/// State owned by the widget window.
#[derive(Debug, Clone)]
pub struct WidgetState {
    registry: BarRegistry,
    scroll: ScrollState,
    viewport: Viewport,
}

impl WidgetState {
    /// Creates the state for a freshly loaded registry.  The viewport starts
    /// empty until the first resize.
    pub fn new(registry: BarRegistry) -> Self {
        let mut scroll = ScrollState::new();
        scroll.set_extent(registry.len(), 0);
        Self {
            registry,
            scroll,
            viewport: Viewport::default(),
        }
    }

    pub fn registry(&self) -> &BarRegistry {
        &self.registry
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_offset(&self) -> i32 {
        self.scroll.offset()
    }

    /// Records a new client-area size and re-clamps the scroll offset.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.scroll.set_extent(self.registry.len(), viewport.height);
        trace!(
            width = viewport.width,
            height = viewport.height,
            offset = self.scroll.offset(),
            "viewport resized"
        );
    }

    /// Applies a scroll command.  Returns `true` if a redraw is needed.
    pub fn scroll(&mut self, command: ScrollCommand) -> bool {
        let changed = self.scroll.apply(command);
        trace!(?command, offset = self.scroll.offset(), changed, "scroll");
        changed
    }

    /// Geometry of every bar visible at the current offset.
    pub fn frame(&self) -> Vec<BarGeometry> {
        layout_frame(self.registry.as_slice(), self.scroll.offset(), self.viewport)
    }

    /// Scrollbar state matching the current offset and viewport.
    pub fn scrollbar(&self) -> ScrollbarModel {
        ScrollbarModel {
            range_max: content_height(self.registry.len()) - 1,
            page: u32::try_from(self.viewport.height).unwrap_or(0),
            position: self.scroll.offset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bars_core::domain::layout::ROW_PITCH;
    use bars_core::{BarRecord, Rgb};

    fn state_with(n: usize) -> WidgetState {
        let mut registry = BarRegistry::new();
        for i in 0..n {
            registry
                .try_push(BarRecord::new(format!("bar {i}"), 1, 2, Rgb::BLACK))
                .expect("capacity available");
        }
        WidgetState::new(registry)
    }

    #[test]
    fn test_new_state_starts_at_offset_zero() {
        let state = state_with(3);
        assert_eq!(state.scroll_offset(), 0);
        assert_eq!(state.registry().len(), 3);
    }

    #[test]
    fn test_frame_shows_rows_inside_viewport_only() {
        // Arrange
        let mut state = state_with(20);

        // Act
        state.resize(Viewport::new(480, 400));

        // Assert: tops at 40, 120, 200, 280, 360
        assert_eq!(state.frame().len(), 5);
    }

    #[test]
    fn test_scroll_moves_frame_down_the_list() {
        // Arrange
        let mut state = state_with(20);
        state.resize(Viewport::new(480, 400));

        // Act
        let changed = state.scroll(ScrollCommand::LineDown);

        // Assert
        assert!(changed);
        assert_eq!(state.frame()[0].index, 1);
    }

    #[test]
    fn test_scroll_before_first_resize_is_bounded_by_content() {
        // Arrange: no viewport yet, so the whole content height is scrollable
        let mut state = state_with(2);

        // Act
        state.scroll(ScrollCommand::ThumbTo(10_000));

        // Assert
        assert_eq!(state.scroll_offset(), 3 * ROW_PITCH);
    }

    #[test]
    fn test_shrinking_content_after_resize_reclamps() {
        let mut state = state_with(10);
        state.resize(Viewport::new(480, 300));
        state.scroll(ScrollCommand::ThumbTo(500));
        assert_eq!(state.scroll_offset(), 500);

        state.resize(Viewport::new(480, 600));

        assert_eq!(state.scroll_offset(), 11 * ROW_PITCH - 600);
    }

    #[test]
    fn test_scrollbar_mirrors_offset_and_viewport() {
        // Arrange
        let mut state = state_with(10);
        state.resize(Viewport::new(480, 400));
        state.scroll(ScrollCommand::LineDown);

        // Act
        let bar = state.scrollbar();

        // Assert
        assert_eq!(bar.range_max, 11 * ROW_PITCH - 1);
        assert_eq!(bar.page, 400);
        assert_eq!(bar.position, ROW_PITCH);
        // Win32 caps the position at range_max - page + 1, which must equal
        // the largest offset the state allows.
        assert_eq!(bar.range_max - bar.page as i32 + 1, 11 * ROW_PITCH - 400);
    }

    #[test]
    fn test_empty_registry_draws_nothing() {
        let mut state = state_with(0);
        state.resize(Viewport::new(480, 400));

        assert!(state.frame().is_empty());
        assert!(!state.scroll(ScrollCommand::LineDown));
    }
}
