use super::view::SelectionView;
use crate::config::{MenuOptions, StatusBarSource};
use crate::sanitize::strip_all;

/// `([a]: Alpha, [b]: Beta)`, or `None` when no entry has a shortcut.
pub fn shortcut_hints_line(view: &SelectionView) -> Option<String> {
    let hints: Vec<String> = view
        .entries()
        .iter()
        .filter_map(|entry| {
            entry
                .shortcut_key
                .map(|key| format!("[{key}]: {}", entry.display_text))
        })
        .collect();
    if hints.is_empty() {
        None
    } else {
        Some(format!("({})", hints.join(", ")))
    }
}

/// Title lines including the shortcut hints when they go above the menu.
pub fn title_lines(options: &MenuOptions, view: &SelectionView) -> Vec<String> {
    let mut lines: Vec<String> = options
        .title
        .as_deref()
        .map(|title| title.split('\n').map(strip_all).collect())
        .unwrap_or_default();
    if options.show_shortcut_hints && !options.shortcut_hints_in_status_bar {
        lines.extend(shortcut_hints_line(view));
    }
    lines
}

/// Status bar lines for the current cursor position.
pub fn status_lines(options: &MenuOptions, view: &SelectionView) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(source) = &options.status_bar {
        let text = match source {
            StatusBarSource::Text(text) => text.clone(),
            StatusBarSource::Function(status) => view
                .cursor_entry()
                .map(|index| status(&view.entries()[index].display_text))
                .unwrap_or_default(),
        };
        if !text.is_empty() {
            lines.extend(text.split('\n').map(strip_all));
        }
    }
    if options.multi_select && options.show_multi_select_hint {
        lines.push(options.multi_select_hint());
    }
    if options.show_shortcut_hints && options.shortcut_hints_in_status_bar {
        lines.extend(shortcut_hints_line(view));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuEntry;
    use std::sync::Arc;

    fn view(entries: &[&str]) -> SelectionView {
        SelectionView::new(
            entries.iter().map(|entry| MenuEntry::parse(entry)).collect(),
            false,
            true,
        )
    }

    #[test]
    fn shortcut_hints_list_only_entries_with_keys() {
        let view = view(&["[a] Alpha", "Plain", "[b] Beta"]);
        assert_eq!(
            shortcut_hints_line(&view).as_deref(),
            Some("([a]: Alpha, [b]: Beta)")
        );
        assert_eq!(shortcut_hints_line(&self::view(&["Plain"])), None);
    }

    #[test]
    fn hints_move_between_title_and_status_bar() {
        let view = view(&["[a] Alpha"]);
        let mut options = MenuOptions {
            title: Some("Pick\none".into()),
            show_shortcut_hints: true,
            ..MenuOptions::default()
        };
        assert_eq!(title_lines(&options, &view), vec!["Pick", "one"]);
        assert_eq!(status_lines(&options, &view), vec!["([a]: Alpha)"]);

        options.shortcut_hints_in_status_bar = false;
        assert_eq!(
            title_lines(&options, &view),
            vec!["Pick", "one", "([a]: Alpha)"]
        );
        assert!(status_lines(&options, &view).is_empty());
    }

    #[test]
    fn status_function_sees_highlighted_entry() {
        let mut view = view(&["apple", "banana"]);
        view.move_down();
        let options = MenuOptions {
            status_bar: Some(StatusBarSource::Function(Arc::new(|text: &str| {
                format!("\x1b[1m{text}\x1b[0m\nsecond line")
            }))),
            ..MenuOptions::default()
        };
        assert_eq!(status_lines(&options, &view), vec!["banana", "second line"]);
    }
}
