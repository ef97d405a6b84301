use clap::Parser;
use termenu::config::{
    DEFAULT_MENU_CURSOR, DEFAULT_MULTI_SELECT_CURSOR, DEFAULT_PREVIEW_SIZE, DEFAULT_PREVIEW_TITLE,
    DEFAULT_SEARCH_KEY,
};
use termenu::{LogOptions, MenuOptions, Preselect, PreviewSource, StatusBarSource};

#[derive(Debug, Parser, Clone)]
#[command(
    name = "termenu",
    about = "Show an interactive selection menu on the terminal",
    long_about = "Show an interactive selection menu on the terminal.\n\n\
        The exit status is 0 when nothing was selected (or on error) and\n\
        i + 1 when entry i was selected.",
    version
)]
pub(crate) struct CliConfig {
    #[command(flatten)]
    pub(crate) logging: LogOptions,

    /// Menu entries: "[k] Text|preview argument"
    #[arg(value_name = "ENTRY")]
    pub(crate) entries: Vec<String>,

    /// Menu title (newlines start new title lines)
    #[arg(short = 't', long = "title")]
    pub(crate) title: Option<String>,

    /// Cursor string shown in front of the highlighted entry
    #[arg(long = "cursor", default_value = DEFAULT_MENU_CURSOR)]
    pub(crate) cursor: String,

    /// Cursor style as a comma-separated list
    #[arg(long = "cursor-style", default_value = "fg_red,bold")]
    pub(crate) cursor_style: String,

    /// Highlight style for the selected entry
    #[arg(long = "highlight-style", default_value = "standout")]
    pub(crate) highlight_style: String,

    /// Do not wrap around at the first and last entry
    #[arg(short = 'C', long = "no-cycle", default_value_t = false)]
    pub(crate) no_cycle: bool,

    /// Clear the screen before the menu is shown
    #[arg(short = 'l', long = "clear-screen", default_value_t = false)]
    pub(crate) clear_screen: bool,

    /// Leave the menu on screen after it exits
    #[arg(short = 'X', long = "no-clear-menu-on-exit", default_value_t = false)]
    pub(crate) no_clear_menu_on_exit: bool,

    /// Initially highlighted entry (0-based)
    #[arg(short = 'i', long = "cursor-index")]
    pub(crate) cursor_index: Option<usize>,

    /// Preview command; "{}" is replaced by the preview argument
    #[arg(short = 'p', long = "preview")]
    pub(crate) preview: Option<String>,

    /// Share of the terminal height used by the preview box (0.0 to 1.0)
    #[arg(long = "preview-size", default_value_t = DEFAULT_PREVIEW_SIZE)]
    pub(crate) preview_size: f64,

    /// Draw the preview without a border
    #[arg(long = "no-preview-border", default_value_t = false)]
    pub(crate) no_preview_border: bool,

    /// Title written into the preview border
    #[arg(long = "preview-title", default_value = DEFAULT_PREVIEW_TITLE)]
    pub(crate) preview_title: String,

    /// Key that starts a search; "none" lets any letter start one
    #[arg(long = "search-key", default_value = DEFAULT_SEARCH_KEY)]
    pub(crate) search_key: String,

    /// Make searches case sensitive
    #[arg(short = 's', long = "case-sensitive", default_value_t = false)]
    pub(crate) case_sensitive: bool,

    /// Style of search matches
    #[arg(long = "search-highlight-style", default_value = "fg_black,bg_yellow,bold")]
    pub(crate) search_highlight_style: String,

    /// Show a search hint line below the menu
    #[arg(long = "show-search-hint", default_value_t = false)]
    pub(crate) show_search_hint: bool,

    /// Custom search hint; "{key}" expands to the search key
    #[arg(long = "show-search-hint-text")]
    pub(crate) search_hint_text: Option<String>,

    /// Style of shortcut keys
    #[arg(long = "shortcut-key-highlight-style", default_value = "fg_blue")]
    pub(crate) shortcut_key_highlight_style: String,

    /// Style of the brackets around shortcut keys
    #[arg(long = "shortcut-brackets-highlight-style", default_value = "fg_gray")]
    pub(crate) shortcut_brackets_highlight_style: String,

    /// Only move the cursor when a shortcut key is pressed
    #[arg(short = 'E', long = "no-exit-on-shortcut", default_value_t = false)]
    pub(crate) no_exit_on_shortcut: bool,

    /// List the shortcut keys in the status bar
    #[arg(long = "show-shortcut-hints", default_value_t = false)]
    pub(crate) show_shortcut_hints: bool,

    /// List the shortcut keys below the title instead
    #[arg(long = "show-shortcut-hints-in-title", default_value_t = false)]
    pub(crate) show_shortcut_hints_in_title: bool,

    /// Keys that accept the selection (comma-separated)
    #[arg(long = "accept-keys", default_value = "enter")]
    pub(crate) accept_keys: String,

    /// Keys that close the menu without a selection (comma-separated)
    #[arg(long = "quit-keys", default_value = "escape,q")]
    pub(crate) quit_keys: String,

    /// Status bar text
    #[arg(short = 'b', long = "status-bar")]
    pub(crate) status_bar: Option<String>,

    /// Draw the status bar below the preview box
    #[arg(short = 'd', long = "status-bar-below-preview", default_value_t = false)]
    pub(crate) status_bar_below_preview: bool,

    /// Status bar style
    #[arg(long = "status-bar-style", default_value = "fg_yellow,bg_black")]
    pub(crate) status_bar_style: String,

    /// Allow several entries to be selected (implies --stdout)
    #[arg(short = 'm', long = "multi-select", default_value_t = false)]
    pub(crate) multi_select: bool,

    /// Marker shown in front of selected entries
    #[arg(long = "multi-select-cursor", default_value = DEFAULT_MULTI_SELECT_CURSOR)]
    pub(crate) multi_select_cursor: String,

    /// Style of the multi-select marker
    #[arg(long = "multi-select-cursor-style", default_value = "fg_yellow,bold")]
    pub(crate) multi_select_cursor_style: String,

    /// Style of the brackets of the multi-select marker
    #[arg(long = "multi-select-cursor-brackets-style", default_value = "fg_gray")]
    pub(crate) multi_select_cursor_brackets_style: String,

    /// Keys that toggle an entry (comma-separated)
    #[arg(long = "multi-select-keys", default_value = " ,tab")]
    pub(crate) multi_select_keys: String,

    /// Do not add the highlighted entry to the selection on accept
    #[arg(long = "multi-select-no-select-on-accept", default_value_t = false)]
    pub(crate) multi_select_no_select_on_accept: bool,

    /// Allow accepting an empty selection
    #[arg(long = "multi-select-empty-ok", default_value_t = false)]
    pub(crate) multi_select_empty_ok: bool,

    /// Show how multi-selection works in the status bar
    #[arg(long = "show-multi-select-hint", default_value_t = false)]
    pub(crate) show_multi_select_hint: bool,

    /// Custom multi-select hint
    #[arg(long = "show-multi-select-hint-text")]
    pub(crate) multi_select_hint_text: Option<String>,

    /// Preselect entries by display text (comma-separated)
    #[arg(short = 'r', long = "preselected-entries", conflicts_with = "preselected_indices")]
    pub(crate) preselected_entries: Option<String>,

    /// Preselect entries by 0-based index (comma-separated)
    #[arg(short = 'R', long = "preselected-indices", value_delimiter = ',')]
    pub(crate) preselected_indices: Option<Vec<usize>>,

    /// Print the selected 1-based indices to stdout
    #[arg(long = "stdout", default_value_t = false)]
    pub(crate) stdout: bool,
}

/// Split a comma-separated option; an empty string means an empty list.
fn comma_list(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(',').map(str::to_string).collect()
}

impl CliConfig {
    pub(crate) fn print_to_stdout(&self) -> bool {
        self.stdout || self.multi_select
    }

    pub(crate) fn menu_options(&self) -> MenuOptions {
        let search_key = if self.search_key.eq_ignore_ascii_case("none") {
            None
        } else {
            Some(self.search_key.clone())
        };
        let preselected_entries = match (&self.preselected_entries, &self.preselected_indices) {
            (Some(names), _) => comma_list(names).into_iter().map(Preselect::Text).collect(),
            (None, Some(indices)) => indices.iter().copied().map(Preselect::Index).collect(),
            (None, None) => Vec::new(),
        };
        MenuOptions {
            title: self.title.clone(),
            menu_cursor: self.cursor.clone(),
            menu_cursor_style: comma_list(&self.cursor_style),
            menu_highlight_style: comma_list(&self.highlight_style),
            cycle_cursor: !self.no_cycle,
            clear_screen: self.clear_screen,
            preview: self.preview.clone().map(PreviewSource::Command),
            preview_size: self.preview_size,
            preview_title: self.preview_title.clone(),
            preview_border: !self.no_preview_border,
            search_key,
            search_case_sensitive: self.case_sensitive,
            search_highlight_style: comma_list(&self.search_highlight_style),
            show_search_hint: self.show_search_hint,
            search_hint_text: self.search_hint_text.clone(),
            shortcut_key_highlight_style: comma_list(&self.shortcut_key_highlight_style),
            shortcut_brackets_highlight_style: comma_list(&self.shortcut_brackets_highlight_style),
            exit_on_shortcut: !self.no_exit_on_shortcut,
            show_shortcut_hints: self.show_shortcut_hints || self.show_shortcut_hints_in_title,
            shortcut_hints_in_status_bar: !self.show_shortcut_hints_in_title,
            accept_keys: comma_list(&self.accept_keys),
            quit_keys: comma_list(&self.quit_keys),
            status_bar: self.status_bar.clone().map(StatusBarSource::Text),
            status_bar_below_preview: self.status_bar_below_preview,
            status_bar_style: comma_list(&self.status_bar_style),
            multi_select: self.multi_select,
            multi_select_cursor: self.multi_select_cursor.clone(),
            multi_select_cursor_style: comma_list(&self.multi_select_cursor_style),
            multi_select_cursor_brackets_style: comma_list(&self.multi_select_cursor_brackets_style),
            multi_select_keys: comma_list(&self.multi_select_keys),
            multi_select_select_on_accept: !self.multi_select_no_select_on_accept,
            multi_select_empty_ok: self.multi_select_empty_ok,
            show_multi_select_hint: self.show_multi_select_hint,
            multi_select_hint_text: self.multi_select_hint_text.clone(),
            preselected_entries,
            cursor_index: self.cursor_index,
            clear_menu_on_exit: !self.no_clear_menu_on_exit,
        }
    }
}
