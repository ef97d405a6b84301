use crate::config::MIN_VISIBLE_MENU_ENTRIES;

/// The slice of displayed entries that fits on screen.
///
/// Bounds are inclusive. The window is sized by the total entry count so it
/// keeps its height while a search narrows the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    lower: usize,
    upper: usize,
    capacity: usize,
    entry_count: usize,
}

impl Viewport {
    pub fn new(entry_count: usize, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lower: 0,
            upper: capacity.min(entry_count).saturating_sub(1),
            capacity,
            entry_count,
        }
    }

    pub fn lower(&self) -> usize {
        self.lower
    }

    pub fn upper(&self) -> usize {
        self.upper
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of rows the menu occupies.
    pub fn size(&self) -> usize {
        self.upper - self.lower + 1
    }

    pub fn contains(&self, displayed_index: usize) -> bool {
        (self.lower..=self.upper).contains(&displayed_index)
    }

    /// Scroll by the smallest amount that brings `cursor` into view.
    /// No cursor is treated as a cursor on the first row.
    pub fn keep_visible(&mut self, cursor: Option<usize>) {
        let cursor = cursor.unwrap_or(0);
        if cursor < self.lower {
            let delta = self.lower - cursor;
            self.lower -= delta;
            self.upper -= delta;
        } else if cursor > self.upper {
            let delta = cursor - self.upper;
            self.lower += delta;
            self.upper += delta;
        }
    }

    /// Apply a new capacity after a resize. The scroll offset is dropped and
    /// the cursor brought back into view.
    pub fn set_capacity(&mut self, capacity: usize, cursor: Option<usize>) {
        let capacity = capacity.max(1);
        if capacity != self.capacity {
            self.upper = capacity.min(self.entry_count).saturating_sub(1);
            self.lower = self.upper.saturating_sub(capacity);
            self.capacity = capacity;
            tracing::trace!(capacity, "viewport capacity changed");
        }
        self.keep_visible(cursor);
    }
}

/// Line budget below the terminal height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineBudget {
    pub title: usize,
    pub search: usize,
    pub status: usize,
    pub preview: usize,
}

impl LineBudget {
    /// Menu rows left over, never less than one.
    pub fn menu_capacity(&self, rows: usize) -> usize {
        rows.saturating_sub(self.title + self.search + self.status + self.preview)
            .max(1)
    }
}

/// Rows reserved for the preview box: a fraction of the height, dropped when
/// fewer than three lines (border, content, border) would remain.
pub fn preview_lines(preview_size: f64, rows: usize, title_lines: usize) -> usize {
    let requested = (preview_size * rows as f64) as usize;
    let limit = rows.saturating_sub(title_lines + MIN_VISIBLE_MENU_ENTRIES);
    let lines = requested.min(limit);
    if lines < 3 {
        0
    } else {
        lines
    }
}
