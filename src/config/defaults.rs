pub const DEFAULT_MENU_CURSOR: &str = "> ";
pub const DEFAULT_MENU_CURSOR_STYLE: [&str; 2] = ["fg_red", "bold"];
pub const DEFAULT_MENU_HIGHLIGHT_STYLE: [&str; 1] = ["standout"];
pub const DEFAULT_PREVIEW_SIZE: f64 = 0.25;
pub const DEFAULT_PREVIEW_TITLE: &str = "preview";
pub const DEFAULT_SEARCH_KEY: &str = "/";
pub const DEFAULT_SEARCH_HIGHLIGHT_STYLE: [&str; 3] = ["fg_black", "bg_yellow", "bold"];
pub const DEFAULT_SHORTCUT_KEY_HIGHLIGHT_STYLE: [&str; 1] = ["fg_blue"];
pub const DEFAULT_SHORTCUT_BRACKETS_HIGHLIGHT_STYLE: [&str; 1] = ["fg_gray"];
pub const DEFAULT_ACCEPT_KEYS: [&str; 1] = ["enter"];
pub const DEFAULT_QUIT_KEYS: [&str; 2] = ["escape", "q"];
pub const DEFAULT_MULTI_SELECT_CURSOR: &str = "[*] ";
pub const DEFAULT_MULTI_SELECT_CURSOR_STYLE: [&str; 2] = ["fg_yellow", "bold"];
pub const DEFAULT_MULTI_SELECT_CURSOR_BRACKETS_STYLE: [&str; 1] = ["fg_gray"];
pub const DEFAULT_MULTI_SELECT_KEYS: [&str; 2] = [" ", "tab"];
pub const DEFAULT_STATUS_BAR_STYLE: [&str; 2] = ["fg_yellow", "bg_black"];
pub const DEFAULT_SEARCH_HINT: &str = "(Press \"{key}\" to search)";
pub const DEFAULT_LETTER_SEARCH_HINT: &str = "(Press any letter key to search)";
pub const DEFAULT_MULTI_SELECT_HINT: &str =
    "Press {multi_select_keys} for multi-selection and {accept_keys} to {accept_action}";

/// Rows always left for menu entries when sizing the preview box.
pub const MIN_VISIBLE_MENU_ENTRIES: usize = 3;

pub(crate) fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}
