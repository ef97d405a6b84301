use super::{MenuOptions, Preselect};
use crate::error::{MenuError, Result};
use crate::menu::MenuEntry;
use crate::terminal::capabilities::is_style_name;
use crate::terminal::keys::is_valid_key_name;
use std::collections::BTreeSet;

impl MenuOptions {
    /// Check option values that do not depend on the entries.
    pub fn validate(&self) -> Result<()> {
        let invalid_styles: Vec<String> = [
            &self.menu_cursor_style,
            &self.menu_highlight_style,
            &self.search_highlight_style,
            &self.shortcut_key_highlight_style,
            &self.shortcut_brackets_highlight_style,
            &self.status_bar_style,
            &self.multi_select_cursor_style,
            &self.multi_select_cursor_brackets_style,
        ]
        .into_iter()
        .flatten()
        .filter(|style| !is_style_name(style))
        .cloned()
        .collect();
        if !invalid_styles.is_empty() {
            return Err(MenuError::InvalidStyle(invalid_styles));
        }

        if self.multi_select_empty_ok && self.multi_select_select_on_accept {
            return Err(MenuError::InvalidParameterCombination(
                "multi_select_empty_ok cannot be combined with multi_select_select_on_accept"
                    .to_string(),
            ));
        }
        if !self.preselected_entries.is_empty() && !self.multi_select {
            return Err(MenuError::InvalidParameterCombination(
                "preselected entries can only be used in multi-select mode".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.preview_size) {
            return Err(MenuError::InvalidOption(format!(
                "preview size must be between 0 and 1, got {}",
                self.preview_size
            )));
        }
        if self.accept_keys.is_empty() {
            return Err(MenuError::InvalidOption(
                "at least one accept key is required".to_string(),
            ));
        }
        for cursor in [&self.menu_cursor, &self.multi_select_cursor] {
            if cursor.chars().any(char::is_control) {
                return Err(MenuError::InvalidOption(format!(
                    "menu cursor {cursor:?} contains control characters"
                )));
            }
        }

        let keys = self
            .accept_keys
            .iter()
            .chain(&self.quit_keys)
            .chain(&self.multi_select_keys)
            .chain(self.search_key.iter());
        for key in keys {
            if !is_valid_key_name(key) {
                return Err(MenuError::InvalidKey(key.clone()));
            }
        }
        Ok(())
    }

    /// Entry indices selected before the menu opens.
    pub(crate) fn resolve_preselected(&self, entries: &[MenuEntry]) -> Result<BTreeSet<usize>> {
        let mut selected = BTreeSet::new();
        for preselect in &self.preselected_entries {
            let index = match preselect {
                Preselect::Index(index) if *index < entries.len() => *index,
                Preselect::Index(index) => {
                    return Err(MenuError::UnknownMenuEntry(format!("#{index}")));
                }
                Preselect::Text(text) => entries
                    .iter()
                    .position(|entry| entry.display_text == *text)
                    .ok_or_else(|| MenuError::UnknownMenuEntry(text.clone()))?,
            };
            selected.insert(index);
        }
        Ok(selected)
    }

    /// A configured start position must point at an entry; `Some(0)` is honoured.
    pub(crate) fn check_cursor_index(&self, entry_count: usize) -> Result<()> {
        match self.cursor_index {
            Some(index) if index >= entry_count => Err(MenuError::CursorIndexOutOfRange {
                index,
                count: entry_count,
            }),
            _ => Ok(()),
        }
    }
}
