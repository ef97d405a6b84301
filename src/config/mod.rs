//! Menu options, their defaults and validation.

mod defaults;
mod validation;

use clap::Args;
use std::fmt;
use std::sync::Arc;

pub use defaults::*;

/// Produces preview text for an entry's preview argument.
pub type PreviewFn = Arc<dyn Fn(&str) -> anyhow::Result<String> + Send + Sync>;

/// Produces status bar text for the highlighted entry's display text.
pub type StatusBarFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Where the preview pane gets its content.
#[derive(Clone)]
pub enum PreviewSource {
    /// Shell-style command line; every `{}` is replaced by the preview argument.
    Command(String),
    Function(PreviewFn),
}

impl fmt::Debug for PreviewSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewSource::Command(command) => f.debug_tuple("Command").field(command).finish(),
            PreviewSource::Function(_) => f.write_str("Function(..)"),
        }
    }
}

#[derive(Clone)]
pub enum StatusBarSource {
    Text(String),
    Function(StatusBarFn),
}

impl fmt::Debug for StatusBarSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusBarSource::Text(text) => f.debug_tuple("Text").field(text).finish(),
            StatusBarSource::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// An entry to select before the menu opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preselect {
    Index(usize),
    /// Matched against the entries' display text.
    Text(String),
}

/// Everything that shapes a menu besides its entries.
///
/// Style lists hold capability names such as `fg_red` or `bold`. Key lists hold
/// key names such as `enter`, `ctrl-j`, `alt-x` or a single character.
#[derive(Debug, Clone)]
pub struct MenuOptions {
    pub title: Option<String>,
    pub menu_cursor: String,
    pub menu_cursor_style: Vec<String>,
    pub menu_highlight_style: Vec<String>,
    pub cycle_cursor: bool,
    pub clear_screen: bool,
    pub preview: Option<PreviewSource>,
    /// Fraction of the terminal height reserved for the preview box.
    pub preview_size: f64,
    pub preview_title: String,
    pub preview_border: bool,
    /// `None` means any letter starts a search.
    pub search_key: Option<String>,
    pub search_case_sensitive: bool,
    pub search_highlight_style: Vec<String>,
    pub show_search_hint: bool,
    /// Replaces the default hint; `{key}` expands to the search key.
    pub search_hint_text: Option<String>,
    pub shortcut_key_highlight_style: Vec<String>,
    pub shortcut_brackets_highlight_style: Vec<String>,
    pub exit_on_shortcut: bool,
    pub show_shortcut_hints: bool,
    pub shortcut_hints_in_status_bar: bool,
    pub accept_keys: Vec<String>,
    pub quit_keys: Vec<String>,
    pub status_bar: Option<StatusBarSource>,
    pub status_bar_below_preview: bool,
    pub status_bar_style: Vec<String>,
    pub multi_select: bool,
    pub multi_select_cursor: String,
    pub multi_select_cursor_style: Vec<String>,
    pub multi_select_cursor_brackets_style: Vec<String>,
    pub multi_select_keys: Vec<String>,
    pub multi_select_select_on_accept: bool,
    pub multi_select_empty_ok: bool,
    pub show_multi_select_hint: bool,
    /// Supports `{multi_select_keys}`, `{accept_keys}` and `{accept_action}`.
    pub multi_select_hint_text: Option<String>,
    pub preselected_entries: Vec<Preselect>,
    pub cursor_index: Option<usize>,
    pub clear_menu_on_exit: bool,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            title: None,
            menu_cursor: DEFAULT_MENU_CURSOR.to_string(),
            menu_cursor_style: defaults::owned(&DEFAULT_MENU_CURSOR_STYLE),
            menu_highlight_style: defaults::owned(&DEFAULT_MENU_HIGHLIGHT_STYLE),
            cycle_cursor: true,
            clear_screen: false,
            preview: None,
            preview_size: DEFAULT_PREVIEW_SIZE,
            preview_title: DEFAULT_PREVIEW_TITLE.to_string(),
            preview_border: true,
            search_key: Some(DEFAULT_SEARCH_KEY.to_string()),
            search_case_sensitive: false,
            search_highlight_style: defaults::owned(&DEFAULT_SEARCH_HIGHLIGHT_STYLE),
            show_search_hint: false,
            search_hint_text: None,
            shortcut_key_highlight_style: defaults::owned(&DEFAULT_SHORTCUT_KEY_HIGHLIGHT_STYLE),
            shortcut_brackets_highlight_style: defaults::owned(
                &DEFAULT_SHORTCUT_BRACKETS_HIGHLIGHT_STYLE,
            ),
            exit_on_shortcut: true,
            show_shortcut_hints: false,
            shortcut_hints_in_status_bar: true,
            accept_keys: defaults::owned(&DEFAULT_ACCEPT_KEYS),
            quit_keys: defaults::owned(&DEFAULT_QUIT_KEYS),
            status_bar: None,
            status_bar_below_preview: false,
            status_bar_style: defaults::owned(&DEFAULT_STATUS_BAR_STYLE),
            multi_select: false,
            multi_select_cursor: DEFAULT_MULTI_SELECT_CURSOR.to_string(),
            multi_select_cursor_style: defaults::owned(&DEFAULT_MULTI_SELECT_CURSOR_STYLE),
            multi_select_cursor_brackets_style: defaults::owned(
                &DEFAULT_MULTI_SELECT_CURSOR_BRACKETS_STYLE,
            ),
            multi_select_keys: defaults::owned(&DEFAULT_MULTI_SELECT_KEYS),
            multi_select_select_on_accept: true,
            multi_select_empty_ok: false,
            show_multi_select_hint: false,
            multi_select_hint_text: None,
            preselected_entries: Vec::new(),
            cursor_index: None,
            clear_menu_on_exit: true,
        }
    }
}

impl MenuOptions {
    /// Search hint line with `{key}` expanded.
    pub(crate) fn search_hint(&self) -> String {
        match (&self.search_hint_text, &self.search_key) {
            (Some(text), key) => text.replace("{key}", key.as_deref().unwrap_or(DEFAULT_SEARCH_KEY)),
            (None, Some(key)) => DEFAULT_SEARCH_HINT.replace("{key}", key),
            (None, None) => DEFAULT_LETTER_SEARCH_HINT.to_string(),
        }
    }

    pub(crate) fn multi_select_hint(&self) -> String {
        let template = self
            .multi_select_hint_text
            .as_deref()
            .unwrap_or(DEFAULT_MULTI_SELECT_HINT);
        let accept_action = if self.multi_select_select_on_accept {
            "select and accept"
        } else {
            "accept"
        };
        template
            .replace("{multi_select_keys}", &describe_keys(&self.multi_select_keys))
            .replace("{accept_keys}", &describe_keys(&self.accept_keys))
            .replace("{accept_action}", accept_action)
    }
}

fn describe_keys(keys: &[String]) -> String {
    keys.iter()
        .map(|key| match key.as_str() {
            " " => "space".to_string(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Debug logging switches shared by the library and the binary.
#[derive(Debug, Clone, Default, Args)]
pub struct LogOptions {
    /// Enable file logging (debug)
    #[arg(long = "logs", env = "TERMENU_LOGS", default_value_t = false)]
    pub logs: bool,

    /// Disable all file logging (overrides --logs and log env vars)
    #[arg(long = "no-logs", env = "TERMENU_NO_LOGS", default_value_t = false)]
    pub no_logs: bool,

    /// Allow logging menu entries and search text (debug log only)
    #[arg(long = "log-content", env = "TERMENU_LOG_CONTENT", default_value_t = false)]
    pub log_content: bool,
}

impl LogOptions {
    pub fn enabled(&self) -> bool {
        self.logs && !self.no_logs
    }
}
