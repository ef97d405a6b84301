//! Key handling: browsing, searching, multi-selection and shortcuts.

use super::view::SelectionView;
use crate::config::{MenuOptions, DEFAULT_SEARCH_KEY};
use crate::error::Result;
use crate::logging::log_debug_content;
use crate::terminal::{DecodedKey, KeyDecoder};

const UP_KEYS: [&str; 3] = ["up", "ctrl-k", "k"];
const DOWN_KEYS: [&str; 3] = ["down", "ctrl-j", "j"];

/// What the input loop does after a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// Finish with the current selection; carries the accept key if one was pressed.
    Accept(Option<String>),
    Quit,
}

/// Configured keys resolved to the names the decoder produces.
#[derive(Debug, Clone)]
pub struct KeyMap {
    up: Vec<String>,
    down: Vec<String>,
    accept: Vec<String>,
    quit: Vec<String>,
    toggle: Vec<String>,
    search_key: Option<String>,
}

fn canonical_names(decoder: &KeyDecoder, keys: &[impl AsRef<str>]) -> Result<Vec<String>> {
    keys.iter()
        .map(|key| decoder.canonical_name(key.as_ref()))
        .collect()
}

impl KeyMap {
    pub fn new(options: &MenuOptions, decoder: &KeyDecoder) -> Result<Self> {
        Ok(Self {
            up: canonical_names(decoder, &UP_KEYS)?,
            down: canonical_names(decoder, &DOWN_KEYS)?,
            accept: canonical_names(decoder, &options.accept_keys)?,
            quit: canonical_names(decoder, &options.quit_keys)?,
            toggle: if options.multi_select {
                canonical_names(decoder, &options.multi_select_keys)?
            } else {
                Vec::new()
            },
            search_key: options
                .search_key
                .as_deref()
                .map(|key| decoder.canonical_name(key))
                .transpose()?,
        })
    }
}

/// Applies decoded keys to a [`SelectionView`].
#[derive(Debug, Clone)]
pub struct Dispatcher {
    keys: KeyMap,
    exit_on_shortcut: bool,
    multi_select: bool,
    select_on_accept: bool,
    empty_ok: bool,
}

impl Dispatcher {
    pub fn new(options: &MenuOptions, keys: KeyMap) -> Self {
        Self {
            keys,
            exit_on_shortcut: options.exit_on_shortcut,
            multi_select: options.multi_select,
            select_on_accept: options.multi_select_select_on_accept,
            empty_ok: options.multi_select_empty_ok,
        }
    }

    pub fn handle(&self, view: &mut SelectionView, key: &DecodedKey) -> Step {
        let searching = view.search().is_active();
        // Letters are search input while searching, and start a search when no
        // search key is configured.
        let letters_are_text = searching || self.keys.search_key.is_none();
        let name = if letters_are_text {
            key.name.clone()
        } else {
            key.name.to_lowercase()
        };
        let bound = |set: &[String]| set.contains(&name) && !(letters_are_text && key.is_letter());

        if !searching && self.keys.search_key.is_some() {
            if let Some(entry_index) = view.shortcut_entry(&key.name) {
                if view.jump_to_entry(entry_index) && self.exit_on_shortcut {
                    return self.accept(view, None);
                }
                return Step::Continue;
            }
        }

        if bound(&self.keys.up) {
            view.move_up();
        } else if bound(&self.keys.down) {
            view.move_down();
        } else if !letters_are_text && name == "home" {
            view.move_to_first();
        } else if !letters_are_text && name == "end" {
            view.move_to_last();
        } else if name == "page_up" || name == "page_down" {
            view.move_by_page(name == "page_down");
        } else if bound(&self.keys.toggle) && !(searching && key.text().is_some()) {
            view.toggle_cursor_entry();
        } else if bound(&self.keys.accept) {
            if view.cursor().is_some() {
                return self.accept(view, Some(name));
            }
        } else if searching && name == "escape" {
            view.set_search_text(None);
        } else if bound(&self.keys.quit) {
            if !searching {
                return Step::Quit;
            }
            view.set_search_text(None);
        } else if !searching {
            self.browse_key(view, key, &name);
        } else {
            self.search_key(view, key, &name);
        }
        Step::Continue
    }

    fn accept(&self, view: &mut SelectionView, accept_key: Option<String>) -> Step {
        if self.multi_select
            && (self.select_on_accept || (view.selected().is_empty() && !self.empty_ok))
        {
            view.select_cursor_entry();
        }
        Step::Accept(accept_key)
    }

    fn browse_key(&self, view: &mut SelectionView, key: &DecodedKey, name: &str) {
        let opens_search = match &self.keys.search_key {
            Some(search_key) => name == search_key,
            None => name == DEFAULT_SEARCH_KEY,
        };
        if opens_search {
            view.set_search_text(Some(String::new()));
        } else if self.keys.search_key.is_none() {
            if let Some(text) = key.text() {
                log_debug_content(&format!("search started with {text:?}"));
                view.set_search_text(Some(text.to_string()));
            }
        }
    }

    fn search_key(&self, view: &mut SelectionView, key: &DecodedKey, name: &str) {
        let current = view.search().text().unwrap_or_default().to_string();
        if name == "backspace" {
            if current.is_empty() {
                view.set_search_text(None);
            } else {
                let mut shortened = current;
                shortened.pop();
                view.set_search_text(Some(shortened));
            }
            return;
        }
        let Some(text) = key.text() else {
            return;
        };
        let is_search_key = self.keys.search_key.as_deref() == Some(name);
        if current.is_empty() && is_search_key {
            return;
        }
        view.set_search_text(Some(current + text));
    }
}
