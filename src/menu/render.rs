//! Incremental painter for the menu region.
//!
//! Every paint starts and ends with the terminal cursor on the first menu row,
//! column 0. Only relative movement (`cursor_up`, `cursor_down`) is used, and
//! every line is padded to the full width so longer old content is overwritten.

use super::view::{SelectionView, VisibleRow};
use crate::config::MenuOptions;
use crate::terminal::{BoxChars, CapabilityTable};
use crate::text::{display_width, limit_with_escapes, pad_to_width, text_width, truncate_to_width};
use std::io::{self, Write};
use std::sync::Arc;

/// Escape sequences for every styled element, resolved once per `show`.
#[derive(Debug, Clone, Default)]
pub struct Styles {
    pub reset: String,
    pub cursor: String,
    pub highlight: String,
    pub search_highlight: String,
    pub shortcut_key: String,
    pub shortcut_brackets: String,
    pub status_bar: String,
    pub multi_select_cursor: String,
    pub multi_select_brackets: String,
}

impl Styles {
    pub fn resolve(table: &CapabilityTable, options: &MenuOptions) -> Self {
        Self {
            reset: table.get("reset_attributes").to_string(),
            cursor: table.style(&options.menu_cursor_style),
            highlight: table.style(&options.menu_highlight_style),
            search_highlight: table.style(&options.search_highlight_style),
            shortcut_key: table.style(&options.shortcut_key_highlight_style),
            shortcut_brackets: table.style(&options.shortcut_brackets_highlight_style),
            status_bar: table.style(&options.status_bar_style),
            multi_select_cursor: table.style(&options.multi_select_cursor_style),
            multi_select_brackets: table.style(&options.multi_select_cursor_brackets_style),
        }
    }
}

/// Everything drawn around the menu rows for one paint.
#[derive(Debug, Clone, Default)]
pub struct Chrome<'a> {
    pub title: &'a [String],
    pub search_line: Option<String>,
    pub status: &'a [String],
    pub status_below_preview: bool,
    /// Sanitized preview text; `None` hides the box.
    pub preview: Option<String>,
    /// Rows reserved for the preview box, borders included.
    pub preview_lines: usize,
}

pub struct Renderer {
    table: Arc<CapabilityTable>,
    styles: Styles,
    menu_cursor: String,
    multi_select_cursor: Option<String>,
    preview_title: String,
    preview_border: bool,
    box_chars: BoxChars,
    previous_height: Option<usize>,
}

impl Renderer {
    pub fn new(table: Arc<CapabilityTable>, options: &MenuOptions, box_chars: BoxChars) -> Self {
        let styles = Styles::resolve(&table, options);
        Self {
            table,
            styles,
            menu_cursor: options.menu_cursor.clone(),
            multi_select_cursor: options
                .multi_select
                .then(|| options.multi_select_cursor.clone()),
            preview_title: options.preview_title.clone(),
            preview_border: options.preview_border,
            box_chars,
            previous_height: None,
        }
    }

    /// Lines below the first menu row written by the last paint.
    pub fn previous_height(&self) -> Option<usize> {
        self.previous_height
    }

    pub fn paint(
        &mut self,
        out: &mut dyn Write,
        view: &SelectionView,
        chrome: &Chrome<'_>,
        cols: usize,
    ) -> io::Result<()> {
        let mut buf = String::with_capacity(cols * (view.viewport().size() + 8));
        let size = view.viewport().size();

        if !chrome.title.is_empty() {
            buf.push_str(&self.table.repeat("cursor_up", chrome.title.len()));
            buf.push('\r');
            let title: Vec<String> = chrome
                .title
                .iter()
                .map(|line| pad_to_width(line, cols))
                .collect();
            buf.push_str(&title.join("\n"));
            buf.push('\n');
        }

        let rows: Vec<VisibleRow<'_>> = view.visible_rows().collect();
        for slot in 0..size {
            match rows.get(slot) {
                Some(row) => self.push_menu_row(&mut buf, view, row, cols),
                None => buf.push_str(&" ".repeat(cols)),
            }
            if slot + 1 < size {
                buf.push('\n');
            }
        }
        buf.push('\r');
        buf.push_str(&self.table.repeat("cursor_up", size - 1));

        let lower = self.lower_lines(chrome, cols);
        if !lower.is_empty() {
            buf.push_str(&self.table.repeat("cursor_down", size));
            buf.push('\r');
            buf.push_str(&lower.join("\n"));
            buf.push('\r');
            buf.push_str(&self.table.repeat("cursor_up", size + lower.len() - 1));
        }

        let height = size - 1 + lower.len();
        if let Some(previous) = self.previous_height.filter(|previous| *previous > height) {
            buf.push_str(&self.table.repeat("cursor_down", height + 1));
            buf.push_str(&self.table.repeat("delete_line", previous - height));
            buf.push_str(&self.table.repeat("cursor_up", height + 1));
        }
        self.previous_height = Some(height);

        tracing::trace!(size, height, bytes = buf.len(), "paint");
        out.write_all(buf.as_bytes())?;
        out.flush()
    }

    fn push_menu_row(&self, buf: &mut String, view: &SelectionView, row: &VisibleRow<'_>, cols: usize) {
        let styles = &self.styles;
        let is_cursor = view.cursor() == Some(row.displayed_index);
        let mut used = 0;

        let cursor_width = text_width(&self.menu_cursor);
        if is_cursor {
            push_styled(buf, &styles.reset, &styles.cursor, &self.menu_cursor);
        } else {
            buf.push_str(&" ".repeat(cursor_width));
        }
        used += cursor_width;

        if let Some(marker) = &self.multi_select_cursor {
            let selected = view.is_selected(row.entry_index);
            for ch in marker.chars() {
                let mut tmp = [0u8; 4];
                let text = ch.encode_utf8(&mut tmp);
                if ch == '[' || ch == ']' {
                    push_styled(buf, &styles.reset, &styles.multi_select_brackets, text);
                } else if selected {
                    push_styled(buf, &styles.reset, &styles.multi_select_cursor, text);
                } else {
                    buf.push_str(&" ".repeat(text_width(text)));
                }
            }
            used += text_width(marker);
        }

        if view.has_shortcuts() {
            match row.entry.shortcut_key {
                Some(key) => {
                    push_styled(buf, &styles.reset, &styles.shortcut_brackets, "[");
                    push_styled(buf, &styles.reset, &styles.shortcut_key, &key.to_string());
                    push_styled(buf, &styles.reset, &styles.shortcut_brackets, "]");
                    buf.push(' ');
                }
                None => buf.push_str("    "),
            }
            used += 4;
        }

        let budget = cols.saturating_sub(used);
        let text = truncate_to_width(&row.entry.display_text, budget);
        let highlight = if is_cursor { styles.highlight.as_str() } else { "" };
        if is_cursor {
            buf.push_str(&styles.reset);
            buf.push_str(highlight);
        }
        match row.highlight {
            Some(span) => {
                let start = span.start.min(text.len());
                let end = span.end.min(text.len());
                buf.push_str(&text[..start]);
                push_styled(buf, &styles.reset, &styles.search_highlight, &text[start..end]);
                buf.push_str(highlight);
                buf.push_str(&text[end..]);
            }
            None => buf.push_str(text),
        }
        if is_cursor {
            buf.push_str(&styles.reset);
        }
        buf.push_str(&" ".repeat(budget.saturating_sub(text_width(text))));
    }

    fn lower_lines(&self, chrome: &Chrome<'_>, cols: usize) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(search_line) = &chrome.search_line {
            lines.push(pad_to_width(search_line, cols));
        }
        let status = chrome.status.iter().map(|line| {
            format!(
                "{}{}{}{}",
                self.styles.reset,
                self.styles.status_bar,
                pad_to_width(line, cols),
                self.styles.reset
            )
        });
        if chrome.status_below_preview {
            lines.extend(self.preview_box(chrome, cols));
            lines.extend(status);
        } else {
            lines.extend(status);
            lines.extend(self.preview_box(chrome, cols));
        }
        lines
    }

    fn preview_box(&self, chrome: &Chrome<'_>, cols: usize) -> Vec<String> {
        let Some(text) = chrome.preview.as_deref() else {
            return Vec::new();
        };
        if chrome.preview_lines < 3 {
            return Vec::new();
        }
        let reset = &self.styles.reset;
        let b = self.box_chars;
        if !self.preview_border {
            return text
                .split('\n')
                .take(chrome.preview_lines)
                .map(|line| {
                    let limited = limit_with_escapes(line, cols);
                    let pad = cols.saturating_sub(display_width(&limited));
                    format!("{limited}{reset}{}", " ".repeat(pad))
                })
                .collect();
        }

        let inner = cols.saturating_sub(2);
        let heading = if self.preview_title.is_empty() {
            String::new()
        } else {
            format!("{h}{h} {} ", self.preview_title, h = b.horizontal)
        };
        let heading = truncate_to_width(&heading, inner);
        let fill = b.horizontal.to_string().repeat(inner - text_width(heading));
        let mut lines = vec![format!("{}{heading}{fill}{}", b.top_left, b.top_right)];

        let content_width = cols.saturating_sub(3);
        for line in text.split('\n').take(chrome.preview_lines - 2) {
            let limited = limit_with_escapes(line, content_width);
            let pad = content_width.saturating_sub(display_width(&limited));
            lines.push(format!(
                "{v} {limited}{reset}{}{v}",
                " ".repeat(pad),
                v = b.vertical
            ));
        }
        lines.push(format!(
            "{}{}{}",
            b.bottom_left,
            b.horizontal.to_string().repeat(inner),
            b.bottom_right
        ));
        lines
    }

    /// Leave the menu region: erase it (title included) or move below it.
    pub fn finish(&mut self, out: &mut dyn Write, title_lines: usize, clear: bool) -> io::Result<()> {
        let Some(previous) = self.previous_height.take() else {
            return Ok(());
        };
        let mut buf = String::new();
        if clear {
            buf.push_str(&self.table.repeat("cursor_up", title_lines));
            buf.push_str(&self.table.repeat("delete_line", title_lines));
            buf.push_str(&self.table.repeat("delete_line", previous + 1));
        } else {
            buf.push_str(&self.table.repeat("cursor_down", previous + 1));
        }
        out.write_all(buf.as_bytes())?;
        out.flush()
    }
}

fn push_styled(buf: &mut String, reset: &str, style: &str, text: &str) {
    buf.push_str(reset);
    buf.push_str(style);
    buf.push_str(text);
    buf.push_str(reset);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuEntry;
    use crate::terminal::borders::{BOX_ASCII, BOX_UNICODE};
    use crate::testing::xterm_table;

    const UP: &str = "\x1b[A";
    const DELETE_LINE: &str = "\x1b[M";

    fn view(entries: &[&str]) -> SelectionView {
        SelectionView::new(
            entries.iter().map(|entry| MenuEntry::parse(entry)).collect(),
            false,
            true,
        )
    }

    fn plain_options() -> MenuOptions {
        MenuOptions {
            menu_cursor_style: Vec::new(),
            menu_highlight_style: Vec::new(),
            search_highlight_style: Vec::new(),
            shortcut_key_highlight_style: Vec::new(),
            shortcut_brackets_highlight_style: Vec::new(),
            status_bar_style: Vec::new(),
            multi_select_cursor_style: Vec::new(),
            multi_select_cursor_brackets_style: Vec::new(),
            ..MenuOptions::default()
        }
    }

    fn paint(renderer: &mut Renderer, view: &SelectionView, chrome: &Chrome<'_>, cols: usize) -> String {
        let mut out = Vec::new();
        renderer.paint(&mut out, view, chrome, cols).expect("paint");
        String::from_utf8(out).expect("utf8")
    }

    /// Visible text: escape sequences and carriage returns removed.
    fn visible(output: &str) -> String {
        crate::sanitize::strip_all(output).replace('\r', "")
    }

    #[test]
    fn rows_are_padded_and_cursor_returns_to_top() {
        let mut renderer = Renderer::new(xterm_table(), &plain_options(), BOX_UNICODE);
        let view = view(&["apple", "banana", "cherry"]);
        let output = paint(&mut renderer, &view, &Chrome::default(), 12);
        assert_eq!(
            visible(&output),
            "> apple     \n  banana    \n  cherry    "
        );
        assert!(output.ends_with(&format!("\r{UP}{UP}")));
        assert_eq!(renderer.previous_height(), Some(2));
    }

    #[test]
    fn long_entries_are_cut_at_display_width() {
        let mut renderer = Renderer::new(xterm_table(), &plain_options(), BOX_UNICODE);
        let view = view(&["日本語テキスト"]);
        let text = visible(&paint(&mut renderer, &view, &Chrome::default(), 7));
        assert_eq!(text, "> 日本 ");
    }

    #[test]
    fn title_is_written_above_the_anchor() {
        let mut renderer = Renderer::new(xterm_table(), &plain_options(), BOX_UNICODE);
        let view = view(&["a"]);
        let title = vec!["Pick one".to_string()];
        let chrome = Chrome {
            title: &title,
            ..Chrome::default()
        };
        let output = paint(&mut renderer, &view, &chrome, 10);
        assert!(output.starts_with(&format!("{UP}\rPick one  \n")));
    }

    #[test]
    fn shrinking_frame_deletes_leftover_lines() {
        let mut renderer = Renderer::new(xterm_table(), &plain_options(), BOX_UNICODE);
        let view = view(&["a", "b"]);
        let status = vec!["one".to_string(), "two".to_string()];
        let chrome = Chrome {
            status: &status,
            ..Chrome::default()
        };
        paint(&mut renderer, &view, &chrome, 8);
        assert_eq!(renderer.previous_height(), Some(3));
        let output = paint(&mut renderer, &view, &Chrome::default(), 8);
        assert!(output.contains(&format!("{DELETE_LINE}{DELETE_LINE}")));
        assert!(!output.contains(&DELETE_LINE.repeat(3)));
        assert_eq!(renderer.previous_height(), Some(1));
    }

    #[test]
    fn search_match_is_styled_separately() {
        let options = MenuOptions {
            search_highlight_style: vec!["underline".into()],
            ..plain_options()
        };
        let mut renderer = Renderer::new(xterm_table(), &options, BOX_UNICODE);
        let mut view = view(&["apple", "banana"]);
        view.set_search_text(Some("an".into()));
        let chrome = Chrome {
            search_line: Some("/an".into()),
            ..Chrome::default()
        };
        let output = paint(&mut renderer, &view, &chrome, 10);
        assert!(output.contains("b\x1b(B\x1b[m\x1b[4man\x1b(B\x1b[mana"));
        assert!(visible(&output).contains("/an       "));
    }

    #[test]
    fn shortcut_and_multi_select_columns() {
        let options = MenuOptions {
            multi_select: true,
            ..plain_options()
        };
        let mut renderer = Renderer::new(xterm_table(), &options, BOX_ASCII);
        let mut view = view(&["[a] Alpha", "Beta"]);
        view.toggle_cursor_entry();
        let text = visible(&paint(&mut renderer, &view, &Chrome::default(), 20));
        assert_eq!(text, "> [*] [a] Alpha     \n  [ ]     Beta      ");
    }

    #[test]
    fn preview_box_has_border_title_and_limits() {
        let mut renderer = Renderer::new(xterm_table(), &plain_options(), BOX_UNICODE);
        let view = view(&["a"]);
        let chrome = Chrome {
            preview: Some("first line is long\nsecond\nthird".into()),
            preview_lines: 4,
            ..Chrome::default()
        };
        let text = visible(&paint(&mut renderer, &view, &chrome, 16));
        assert!(text.contains("┌── preview ───┐\n"));
        assert!(text.contains("│ first line is│\n"));
        assert!(text.contains("│ second       │\n"));
        assert!(!text.contains("third"));
        assert!(text.ends_with(&format!("└{}┘", "─".repeat(14))));
        assert_eq!(renderer.previous_height(), Some(4));
    }

    #[test]
    fn preview_styles_do_not_count_towards_width() {
        let mut renderer = Renderer::new(xterm_table(), &plain_options(), BOX_ASCII);
        let view = view(&["a"]);
        let chrome = Chrome {
            preview: Some("\x1b[32mgreen\x1b[0m".into()),
            preview_lines: 3,
            ..Chrome::default()
        };
        let output = paint(&mut renderer, &view, &chrome, 10);
        assert!(output.contains("| \x1b[32mgreen\x1b[0m\x1b(B\x1b[m  |"));
    }

    #[test]
    fn finish_clears_or_skips_region() {
        let mut renderer = Renderer::new(xterm_table(), &plain_options(), BOX_UNICODE);
        let view = view(&["a", "b", "c"]);
        paint(&mut renderer, &view, &Chrome::default(), 8);
        let mut out = Vec::new();
        renderer.finish(&mut out, 1, true).expect("finish");
        let output = String::from_utf8(out).expect("utf8");
        assert_eq!(output, format!("{UP}{DELETE_LINE}{}", DELETE_LINE.repeat(3)));

        paint(&mut renderer, &view, &Chrome::default(), 8);
        let mut out = Vec::new();
        renderer.finish(&mut out, 0, false).expect("finish");
        assert_eq!(String::from_utf8(out).expect("utf8"), "\n\n\n");
    }
}
