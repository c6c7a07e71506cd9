//! Bar records and the fixed-capacity registry.
//!
//! A [`BarRegistry`] is filled once while the bars file is loaded and is
//! then only ever read: the widget has no operations that edit, add or
//! remove bars at runtime.

use serde::Serialize;

use super::color::Rgb;

/// Maximum number of bars the registry holds.  Extra records are dropped.
pub const MAX_BARS: usize = 100;

/// Maximum number of characters kept from a title.
pub const MAX_TITLE_CHARS: usize = 49;

/// One progress bar: a title, a `current / total` count and a fill colour.
///
/// `current` is deliberately not clamped to `[0, total]`; the layout code
/// clamps the drawn width instead, so the label still shows the real values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BarRecord {
    pub title: String,
    pub current: i32,
    pub total: i32,
    pub color: Rgb,
}

impl BarRecord {
    /// Creates a record, truncating `title` to [`MAX_TITLE_CHARS`] characters.
    pub fn new(title: impl Into<String>, current: i32, total: i32, color: Rgb) -> Self {
        Self {
            title: truncate_title(title.into()),
            current,
            total,
            color,
        }
    }

    /// Returns `current / total`, or `None` when `total` is zero.
    ///
    /// The ratio is not clamped: `current > total` gives a value above `1.0`
    /// and a negative `current` gives a negative value.
    pub fn fraction(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(f64::from(self.current) / f64::from(self.total))
        }
    }

    /// The label drawn in the middle of the track, e.g. `"75% (3/4)"`.
    ///
    /// A zero total renders as `"--% (3/0)"`.
    pub fn progress_label(&self) -> String {
        match self.fraction() {
            Some(f) => format!("{:.0}% ({}/{})", f * 100.0, self.current, self.total),
            None => format!("--% ({}/{})", self.current, self.total),
        }
    }
}

/// Cuts a title down to [`MAX_TITLE_CHARS`] characters.
pub(crate) fn truncate_title(mut title: String) -> String {
    if let Some((byte_idx, _)) = title.char_indices().nth(MAX_TITLE_CHARS) {
        title.truncate(byte_idx);
    }
    title
}

/// Ordered, append-only collection of at most [`MAX_BARS`] records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarRegistry {
    bars: Vec<BarRecord>,
}

impl BarRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            bars: Vec::with_capacity(MAX_BARS),
        }
    }

    /// Appends a record if capacity remains.
    ///
    /// # Errors
    ///
    /// Hands the record back when the registry already holds [`MAX_BARS`].
    pub fn try_push(&mut self, record: BarRecord) -> Result<(), BarRecord> {
        if self.is_full() {
            return Err(record);
        }
        self.bars.push(record);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.bars.len() >= MAX_BARS
    }

    pub fn get(&self, index: usize) -> Option<&BarRecord> {
        self.bars.get(index)
    }

    /// Iterates the records in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, BarRecord> {
        self.bars.iter()
    }

    pub fn as_slice(&self) -> &[BarRecord] {
        &self.bars
    }
}

impl<'a> IntoIterator for &'a BarRegistry {
    type Item = &'a BarRecord;
    type IntoIter = std::slice::Iter<'a, BarRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}
