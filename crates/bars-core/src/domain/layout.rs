//! Pixel geometry for the bars window.
//!
//! Every bar occupies one row of [`ROW_PITCH`] pixels: a [`BAR_HEIGHT`]-tall
//! track preceded by [`BAR_SPACING`] pixels that hold the title.  Rows are
//! laid out top to bottom and shifted up by the scroll offset.
//!
//! The painter never does arithmetic of its own: it asks [`layout_frame`]
//! for the rectangles and labels of the visible rows and draws them.

use super::bar::BarRecord;
use super::color::Rgb;

/// Horizontal margin on both sides of every track.
pub const MARGIN: i32 = 20;
/// Height of a track.
pub const BAR_HEIGHT: i32 = 40;
/// Vertical gap above each track (the title lives in it).
pub const BAR_SPACING: i32 = 40;
/// Distance between the tops of two consecutive tracks.
pub const ROW_PITCH: i32 = BAR_HEIGHT + BAR_SPACING;
/// Distance from the title baseline box to the top of its track.
pub const TITLE_OFFSET: i32 = 20;
/// One wheel notch, as reported by the OS.
pub const WHEEL_DELTA: i32 = 120;

/// Initial window width.
pub const DEFAULT_WINDOW_WIDTH: i32 = 480;
/// Number of rows the initial window height is sized for.
pub const DEFAULT_VISIBLE_ROWS: i32 = 5;
/// Gap between the window and the bottom-right corner of the work area.
pub const DEFAULT_EDGE_OFFSET: i32 = 20;

/// An axis-aligned rectangle; `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Top-left corner at which a `text_width` x `text_height` box is centred
    /// inside this rectangle.
    pub fn centered_origin(&self, text_width: i32, text_height: i32) -> (i32, i32) {
        (
            self.left + (self.width() - text_width) / 2,
            self.top + (self.height() - text_height) / 2,
        )
    }
}

/// Client-area size supplied by the host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Width available to a track once both margins are removed.
    pub fn track_width(&self) -> i32 {
        (self.width - 2 * MARGIN).max(0)
    }
}

/// Everything needed to draw one visible bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarGeometry {
    /// Position of the record in the registry.
    pub index: usize,
    /// Full-width background rectangle (100%).
    pub track: Rect,
    /// Filled part of the track, anchored at its left edge.
    pub fill: Rect,
    /// Top-left corner of the title text.
    pub title_origin: (i32, i32),
    pub title: String,
    /// Text centred inside the track, e.g. `"75% (3/4)"`.
    pub label: String,
    pub color: Rgb,
}

/// Width of the filled part of a `track_width`-wide track.
///
/// Computed as `current * track_width / total` in 64-bit arithmetic and
/// clamped to `[0, track_width]`.  A zero total draws an empty bar.
pub fn fill_width(record: &BarRecord, track_width: i32) -> i32 {
    if record.total == 0 || track_width <= 0 {
        return 0;
    }
    let raw = i64::from(record.current) * i64::from(track_width) / i64::from(record.total);
    // Clamped into [0, track_width], so the narrowing cannot truncate.
    raw.clamp(0, i64::from(track_width)) as i32
}

/// Y coordinate of the top of row `index`'s track.
pub fn row_top(index: usize, scroll_offset: i32) -> i32 {
    let index = i32::try_from(index).unwrap_or(i32::MAX);
    BAR_SPACING
        .saturating_add(index.saturating_mul(ROW_PITCH))
        .saturating_sub(scroll_offset)
}

/// Total scrollable height for `bar_count` rows, including one spare row.
pub fn content_height(bar_count: usize) -> i32 {
    let rows = i32::try_from(bar_count).unwrap_or(i32::MAX).saturating_add(1);
    rows.saturating_mul(ROW_PITCH)
}

/// Largest valid scroll offset; never negative.
pub fn max_scroll_offset(bar_count: usize, viewport_height: i32) -> i32 {
    content_height(bar_count)
        .saturating_sub(viewport_height)
        .max(0)
}

/// Computes the geometry of every bar whose track top lies inside the viewport.
///
/// Rows with a top above `0` or below the viewport's height are skipped and
/// not computed.
pub fn layout_frame(bars: &[BarRecord], scroll_offset: i32, viewport: Viewport) -> Vec<BarGeometry> {
    let track_width = viewport.track_width();

    bars.iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let top = row_top(index, scroll_offset);
            if top < 0 || top > viewport.height {
                return None;
            }
            let track = Rect::new(MARGIN, top, MARGIN + track_width, top + BAR_HEIGHT);
            let fill = Rect::new(
                MARGIN,
                top,
                MARGIN + fill_width(record, track_width),
                top + BAR_HEIGHT,
            );
            Some(BarGeometry {
                index,
                track,
                fill,
                title_origin: (MARGIN, top - TITLE_OFFSET),
                title: record.title.clone(),
                label: record.progress_label(),
                color: record.color,
            })
        })
        .collect()
}

/// A scroll request from the host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollCommand {
    /// Scroll up by one row.
    LineUp,
    /// Scroll down by one row.
    LineDown,
    /// Wheel rotation; positive deltas move the content down (scroll up).
    Wheel(i32),
    /// Scrollbar thumb dragged or released at an absolute offset.
    ThumbTo(i32),
}

/// The vertical scroll offset, kept inside `[0, max]` at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    offset: i32,
    max: i32,
}

impl ScrollState {
    /// Creates a state at offset zero with no scrollable range.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Largest offset currently allowed.
    pub fn max_offset(&self) -> i32 {
        self.max
    }

    /// Recomputes the allowed range for `bar_count` rows in a viewport of
    /// `viewport_height` pixels and re-clamps the offset.
    pub fn set_extent(&mut self, bar_count: usize, viewport_height: i32) {
        self.max = max_scroll_offset(bar_count, viewport_height);
        self.offset = self.offset.clamp(0, self.max);
    }

    /// Applies a scroll command.  Returns `true` if the offset changed.
    pub fn apply(&mut self, command: ScrollCommand) -> bool {
        let requested = match command {
            ScrollCommand::LineUp => self.offset.saturating_sub(ROW_PITCH),
            ScrollCommand::LineDown => self.offset.saturating_add(ROW_PITCH),
            ScrollCommand::Wheel(delta) => self
                .offset
                .saturating_sub((delta / WHEEL_DELTA).saturating_mul(ROW_PITCH)),
            ScrollCommand::ThumbTo(position) => position,
        };
        let clamped = requested.clamp(0, self.max);
        let changed = clamped != self.offset;
        self.offset = clamped;
        changed
    }
}

/// Screen rectangle of the top-level window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPlacement {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowPlacement {
    /// Places a `width` x `height` window `edge_offset` pixels from the
    /// bottom-right corner of `work_area` (the desktop minus the taskbar).
    pub fn bottom_right(work_area: Rect, width: i32, height: i32, edge_offset: i32) -> Self {
        Self {
            x: work_area.right - width - edge_offset,
            y: work_area.bottom - height - edge_offset,
            width,
            height,
        }
    }
}

/// Window height that fits `visible_rows` rows plus top and bottom padding.
pub fn initial_window_height(visible_rows: i32) -> i32 {
    visible_rows * ROW_PITCH + 2 * BAR_SPACING
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(current: i32, total: i32) -> BarRecord {
        BarRecord::new("bar", current, total, Rgb::new(1, 2, 3))
    }

    // ── fill_width ────────────────────────────────────────────────────────────

    #[test]
    fn test_fill_width_is_proportional_to_fraction() {
        assert_eq!(fill_width(&bar(3, 4), 400), 300);
        assert_eq!(fill_width(&bar(0, 10), 400), 0);
        assert_eq!(fill_width(&bar(10, 10), 400), 400);
    }

    #[test]
    fn test_fill_width_clamps_overfull_and_negative_values() {
        assert_eq!(fill_width(&bar(150, 100), 400), 400);
        assert_eq!(fill_width(&bar(-5, 100), 400), 0);
    }

    #[test]
    fn test_fill_width_zero_total_is_empty() {
        assert_eq!(fill_width(&bar(5, 0), 400), 0);
    }

    #[test]
    fn test_fill_width_does_not_overflow_for_large_counts() {
        assert_eq!(fill_width(&bar(i32::MAX, i32::MAX), 440), 440);
    }

    // ── rows and frames ───────────────────────────────────────────────────────

    #[test]
    fn test_row_top_advances_by_row_pitch_and_subtracts_scroll() {
        assert_eq!(row_top(0, 0), BAR_SPACING);
        assert_eq!(row_top(2, 0), BAR_SPACING + 2 * ROW_PITCH);
        assert_eq!(row_top(2, 100), BAR_SPACING + 2 * ROW_PITCH - 100);
    }

    #[test]
    fn test_layout_frame_builds_track_fill_and_labels() {
        // Arrange
        let bars = [BarRecord::new("A", 3, 4, Rgb::new(17, 34, 51))];
        let viewport = Viewport::new(480, 400);

        // Act
        let frame = layout_frame(&bars, 0, viewport);

        // Assert
        assert_eq!(frame.len(), 1);
        let g = &frame[0];
        assert_eq!(g.track, Rect::new(20, 40, 460, 80));
        assert_eq!(g.fill, Rect::new(20, 40, 20 + 330, 80));
        assert_eq!(g.title_origin, (20, 20));
        assert_eq!(g.title, "A");
        assert_eq!(g.label, "75% (3/4)");
        assert_eq!(g.color, Rgb::new(17, 34, 51));
    }

    #[test]
    fn test_layout_frame_skips_rows_outside_viewport() {
        // Arrange: rows start at 40, 120, 200, 280, ...
        let bars: Vec<_> = (0..10).map(|i| bar(i, 10)).collect();

        // Act: scrolled by one row, viewport 250 px tall
        let frame = layout_frame(&bars, ROW_PITCH, Viewport::new(480, 250));

        // Assert: row 0 is at -40 (hidden); rows 1..=3 at 40, 120, 200
        let indices: Vec<_> = frame.iter().map(|g| g.index).collect();
        assert_eq!(indices, [1, 2, 3]);
    }

    #[test]
    fn test_layout_frame_for_empty_registry_is_empty() {
        assert!(layout_frame(&[], 0, Viewport::new(480, 400)).is_empty());
    }

    #[test]
    fn test_viewport_narrower_than_margins_has_zero_track() {
        assert_eq!(Viewport::new(30, 100).track_width(), 0);
    }

    #[test]
    fn test_centered_origin_centres_text_box() {
        let rect = Rect::new(20, 40, 460, 80);
        assert_eq!(rect.centered_origin(40, 16), (220, 52));
    }

    // ── scrolling ─────────────────────────────────────────────────────────────

    #[test]
    fn test_max_scroll_offset_uses_one_spare_row() {
        assert_eq!(max_scroll_offset(10, 400), 11 * ROW_PITCH - 400);
        assert_eq!(max_scroll_offset(2, 400), 0);
        assert_eq!(max_scroll_offset(0, 0), ROW_PITCH);
    }

    #[test]
    fn test_scroll_line_down_then_up_returns_to_start() {
        // Arrange
        let mut scroll = ScrollState::new();
        scroll.set_extent(20, 400);

        // Act / Assert
        assert!(scroll.apply(ScrollCommand::LineDown));
        assert_eq!(scroll.offset(), ROW_PITCH);
        assert!(scroll.apply(ScrollCommand::LineUp));
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_scroll_never_goes_negative() {
        let mut scroll = ScrollState::new();
        scroll.set_extent(20, 400);

        assert!(!scroll.apply(ScrollCommand::LineUp));
        assert!(!scroll.apply(ScrollCommand::ThumbTo(-50)));
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_scroll_is_clamped_to_max() {
        let mut scroll = ScrollState::new();
        scroll.set_extent(10, 400);

        scroll.apply(ScrollCommand::ThumbTo(10_000));

        assert_eq!(scroll.offset(), 11 * ROW_PITCH - 400);
    }

    #[test]
    fn test_wheel_scrolls_one_row_per_notch() {
        let mut scroll = ScrollState::new();
        scroll.set_extent(20, 400);

        scroll.apply(ScrollCommand::Wheel(-2 * WHEEL_DELTA));
        assert_eq!(scroll.offset(), 2 * ROW_PITCH);

        scroll.apply(ScrollCommand::Wheel(WHEEL_DELTA));
        assert_eq!(scroll.offset(), ROW_PITCH);
    }

    #[test]
    fn test_wheel_ignores_partial_notches() {
        let mut scroll = ScrollState::new();
        scroll.set_extent(20, 400);

        assert!(!scroll.apply(ScrollCommand::Wheel(-60)));
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_growing_viewport_reclamps_offset() {
        // Arrange
        let mut scroll = ScrollState::new();
        scroll.set_extent(10, 400);
        scroll.apply(ScrollCommand::ThumbTo(400));

        // Act: the window now shows everything
        scroll.set_extent(10, 2000);

        // Assert
        assert_eq!(scroll.offset(), 0);
        assert_eq!(scroll.max_offset(), 0);
    }

    // ── placement ─────────────────────────────────────────────────────────────

    #[test]
    fn test_bottom_right_placement_respects_edge_offset() {
        let work_area = Rect::new(0, 0, 1920, 1040);

        let placement = WindowPlacement::bottom_right(work_area, 480, 480, 20);

        assert_eq!(placement.x, 1920 - 480 - 20);
        assert_eq!(placement.y, 1040 - 480 - 20);
    }

    #[test]
    fn test_initial_window_height_fits_visible_rows() {
        assert_eq!(initial_window_height(DEFAULT_VISIBLE_ROWS), 5 * 80 + 80);
    }
}
