use super::entry::MenuEntry;
use super::search::SearchEngine;
use super::viewport::Viewport;
use std::collections::BTreeSet;
use std::ops::Range;

/// One visible menu row.
#[derive(Debug, Clone, Copy)]
pub struct VisibleRow<'a> {
    pub displayed_index: usize,
    pub entry_index: usize,
    pub entry: &'a MenuEntry,
    /// Search match to highlight, as a byte range of the display text.
    pub highlight: Option<&'a Range<usize>>,
}

/// The filtered entry list, the cursor within it, and the multi-selection.
///
/// The cursor is a displayed index; the selection holds entry indices so it
/// survives changes of the search text.
#[derive(Debug, Clone)]
pub struct SelectionView {
    entries: Vec<MenuEntry>,
    search: SearchEngine,
    viewport: Viewport,
    displayed: Vec<usize>,
    cursor: Option<usize>,
    selected: BTreeSet<usize>,
    cycle_cursor: bool,
}

impl SelectionView {
    pub fn new(entries: Vec<MenuEntry>, search_case_sensitive: bool, cycle_cursor: bool) -> Self {
        let entry_count = entries.len();
        let mut view = Self {
            entries,
            search: SearchEngine::new(search_case_sensitive),
            viewport: Viewport::new(entry_count, entry_count.max(1)),
            displayed: Vec::new(),
            cursor: None,
            selected: BTreeSet::new(),
            cycle_cursor,
        };
        view.update_view();
        view
    }

    /// Recompute the displayed list; the cursor goes back to the first row.
    fn update_view(&mut self) {
        self.displayed = if self.search.is_filtering() {
            self.search
                .matches()
                .iter()
                .map(|found| found.entry_index)
                .collect()
        } else {
            (0..self.entries.len()).collect()
        };
        self.cursor = if self.displayed.is_empty() {
            None
        } else {
            Some(0)
        };
        self.viewport.keep_visible(self.cursor);
    }

    /// Change the search text and refresh the view before the next paint.
    pub fn set_search_text(&mut self, text: Option<String>) {
        self.search.set_text(text, &self.entries);
        self.update_view();
    }

    pub fn search(&self) -> &SearchEngine {
        &self.search
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.viewport.set_capacity(capacity, self.cursor);
    }

    pub fn displayed_count(&self) -> usize {
        self.displayed.len()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Entry index under the cursor.
    pub fn cursor_entry(&self) -> Option<usize> {
        self.cursor.map(|cursor| self.displayed[cursor])
    }

    pub fn move_down(&mut self) {
        if let Some(cursor) = self.cursor {
            if cursor + 1 < self.displayed.len() {
                self.cursor = Some(cursor + 1);
            } else if self.cycle_cursor {
                self.cursor = Some(0);
            }
            self.viewport.keep_visible(self.cursor);
        }
    }

    pub fn move_up(&mut self) {
        if let Some(cursor) = self.cursor {
            if cursor > 0 {
                self.cursor = Some(cursor - 1);
            } else if self.cycle_cursor {
                self.cursor = Some(self.displayed.len() - 1);
            }
            self.viewport.keep_visible(self.cursor);
        }
    }

    /// Move by a page, stopping at the ends of the list.
    pub fn move_by_page(&mut self, forward: bool) {
        if let Some(cursor) = self.cursor {
            let page = self.viewport.size();
            let last = self.displayed.len() - 1;
            self.cursor = Some(if forward {
                (cursor + page).min(last)
            } else {
                cursor.saturating_sub(page)
            });
            self.viewport.keep_visible(self.cursor);
        }
    }

    pub fn move_to_first(&mut self) {
        if self.cursor.is_some() {
            self.cursor = Some(0);
            self.viewport.keep_visible(self.cursor);
        }
    }

    pub fn move_to_last(&mut self) {
        if self.cursor.is_some() {
            self.cursor = Some(self.displayed.len() - 1);
            self.viewport.keep_visible(self.cursor);
        }
    }

    /// Put the cursor on an entry if it is currently displayed.
    pub fn jump_to_entry(&mut self, entry_index: usize) -> bool {
        match self.displayed.iter().position(|index| *index == entry_index) {
            Some(displayed_index) => {
                self.cursor = Some(displayed_index);
                self.viewport.keep_visible(self.cursor);
                true
            }
            None => false,
        }
    }

    /// Entry index carrying `shortcut`, if any.
    pub fn shortcut_entry(&self, shortcut: &str) -> Option<usize> {
        let mut chars = shortcut.chars();
        let key = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        self.entries
            .iter()
            .position(|entry| entry.shortcut_key == Some(key))
    }

    pub fn has_shortcuts(&self) -> bool {
        self.entries.iter().any(|entry| entry.shortcut_key.is_some())
    }

    pub fn toggle_cursor_entry(&mut self) {
        if let Some(entry_index) = self.cursor_entry() {
            if !self.selected.remove(&entry_index) {
                self.selected.insert(entry_index);
            }
        }
    }

    pub fn select_cursor_entry(&mut self) {
        if let Some(entry_index) = self.cursor_entry() {
            self.selected.insert(entry_index);
        }
    }

    pub fn selected(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    pub fn is_selected(&self, entry_index: usize) -> bool {
        self.selected.contains(&entry_index)
    }

    pub fn set_selected(&mut self, selected: BTreeSet<usize>) {
        self.selected = selected;
    }

    /// Rows inside the viewport, top to bottom.
    pub fn visible_rows(&self) -> impl Iterator<Item = VisibleRow<'_>> + '_ {
        let filtering = self.search.is_filtering();
        let matches = self.search.matches();
        self.displayed
            .iter()
            .enumerate()
            .skip(self.viewport.lower())
            .take(self.viewport.size())
            .map(move |(displayed_index, &entry_index)| VisibleRow {
                displayed_index,
                entry_index,
                entry: &self.entries[entry_index],
                highlight: if filtering {
                    matches.get(displayed_index).map(|found| &found.span)
                } else {
                    None
                },
            })
    }
}
