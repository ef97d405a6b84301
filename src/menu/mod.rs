//! The interactive menu: entries, search, viewport, key handling and painting.

pub mod dispatch;
pub mod entry;
pub mod preview;
pub mod render;
pub mod search;
pub mod status;
pub mod view;
pub mod viewport;

#[cfg(test)]
mod tests;

use crate::config::{MenuOptions, DEFAULT_SEARCH_KEY};
use crate::error::{MenuError, Result};
use crate::logging::{log_debug, log_debug_content};
use crate::terminal::capabilities;
use crate::terminal::{BoxChars, CapabilityTable, InputEvent, KeyDecoder, MenuTerminal, TtyTerminal};
use dispatch::{Dispatcher, KeyMap, Step};
use preview::PreviewCache;
use render::{Chrome, Renderer};
use std::collections::BTreeSet;
use std::io::Write;
use std::sync::Arc;
use viewport::LineBudget;

pub use entry::MenuEntry;
pub use preview::PreviewOutcome;
pub use search::{SearchEngine, SearchMatch};
pub use view::SelectionView;
pub use viewport::Viewport;

/// What the user picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Single(usize),
    /// Sorted entry indices; empty only when empty selections are allowed.
    Multiple(Vec<usize>),
}

impl Selection {
    pub fn indices(&self) -> Vec<usize> {
        match self {
            Selection::Single(index) => vec![*index],
            Selection::Multiple(indices) => indices.clone(),
        }
    }
}

/// An interactive selection menu drawn inline on the terminal.
///
/// ```no_run
/// use termenu::{MenuOptions, Selection, TerminalMenu};
///
/// let mut menu = TerminalMenu::new(["[a] apple", "[b] banana"], MenuOptions::default())?;
/// if let Some(Selection::Single(index)) = menu.show()? {
///     println!("picked entry {index}");
/// }
/// # Ok::<(), termenu::MenuError>(())
/// ```
pub struct TerminalMenu {
    options: MenuOptions,
    view: SelectionView,
    preselected: BTreeSet<usize>,
    capabilities: Option<Arc<CapabilityTable>>,
    box_chars: BoxChars,
    preview_cache: PreviewCache,
    chosen_accept_key: Option<String>,
}

impl TerminalMenu {
    /// Parse entries and validate options. Nothing touches the terminal yet.
    pub fn new<I, S>(entries: I, options: MenuOptions) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries: Vec<MenuEntry> = entries
            .into_iter()
            .map(|entry| MenuEntry::parse(entry.as_ref()))
            .collect();
        if entries.is_empty() {
            return Err(MenuError::NoEntries);
        }
        options.validate()?;
        let preselected = options.resolve_preselected(&entries)?;
        options.check_cursor_index(entries.len())?;

        let entry_count = entries.len();
        let mut view = SelectionView::new(entries, options.search_case_sensitive, options.cycle_cursor);
        if let Some(index) = options.cursor_index {
            view.jump_to_entry(index);
        }
        log_debug(&format!(
            "menu created: {entry_count} entries, multi_select={}",
            options.multi_select
        ));
        Ok(Self {
            options,
            view,
            preselected,
            capabilities: None,
            box_chars: BoxChars::for_locale(),
            preview_cache: PreviewCache::default(),
            chosen_accept_key: None,
        })
    }

    /// Use this capability table instead of the process-wide one.
    pub fn with_capabilities(mut self, table: Arc<CapabilityTable>) -> Self {
        self.capabilities = Some(table);
        self
    }

    pub fn with_box_chars(mut self, box_chars: BoxChars) -> Self {
        self.box_chars = box_chars;
        self
    }

    pub fn entries(&self) -> &[MenuEntry] {
        self.view.entries()
    }

    pub fn options(&self) -> &MenuOptions {
        &self.options
    }

    /// The accept key that closed the menu last time, if any.
    pub fn chosen_accept_key(&self) -> Option<&str> {
        self.chosen_accept_key.as_deref()
    }

    /// Show the menu on the controlling terminal and wait for a choice.
    ///
    /// Returns `None` when the user quits or the process is interrupted.
    pub fn show(&mut self) -> Result<Option<Selection>> {
        let table = self.capability_table()?;
        let mut terminal = TtyTerminal::open()?;
        self.run_with_table(&mut terminal, table)
    }

    /// Run the menu on any [`MenuTerminal`].
    pub fn run<T: MenuTerminal>(&mut self, terminal: &mut T) -> Result<Option<Selection>> {
        let table = self.capability_table()?;
        self.run_with_table(terminal, table)
    }

    fn capability_table(&self) -> Result<Arc<CapabilityTable>> {
        match &self.capabilities {
            Some(table) => Ok(Arc::clone(table)),
            None => capabilities::global(),
        }
    }

    fn run_with_table<T: MenuTerminal>(
        &mut self,
        terminal: &mut T,
        table: Arc<CapabilityTable>,
    ) -> Result<Option<Selection>> {
        let decoder = KeyDecoder::new(Arc::clone(&table));
        let dispatcher = Dispatcher::new(&self.options, KeyMap::new(&self.options, &decoder)?);
        let mut renderer = Renderer::new(Arc::clone(&table), &self.options, self.box_chars);

        if self.view.search().is_active() {
            self.view.set_search_text(None);
        }
        self.view.set_selected(self.preselected.clone());
        self.preview_cache.clear();
        self.chosen_accept_key = None;
        let title = status::title_lines(&self.options, &self.view);
        tracing::debug!(
            entries = self.view.entries().len(),
            multi_select = self.options.multi_select,
            "menu shown"
        );

        let mut start = String::new();
        start.push_str(table.get("enter_application_mode"));
        start.push_str(table.get("cursor_invisible"));
        if self.options.clear_screen {
            start.push_str(table.get("clear"));
        }
        // Painting expects the cursor on the first menu row, below the title.
        start.push_str(&table.repeat("cursor_down", title.len()));
        terminal.output().write_all(start.as_bytes())?;

        let outcome = self.event_loop(terminal, &decoder, &dispatcher, &mut renderer, &title);
        let restored = self.restore_screen(terminal, &table, &mut renderer, title.len());
        let step = outcome?;
        restored?;

        Ok(match step {
            Step::Accept(accept_key) => {
                log_debug(&format!("menu accepted with {accept_key:?}"));
                self.chosen_accept_key = accept_key;
                self.selection()
            }
            Step::Quit | Step::Continue => {
                log_debug("menu closed without selection");
                None
            }
        })
    }

    fn event_loop<T: MenuTerminal>(
        &mut self,
        terminal: &mut T,
        decoder: &KeyDecoder,
        dispatcher: &Dispatcher,
        renderer: &mut Renderer,
        title: &[String],
    ) -> Result<Step> {
        loop {
            let (cols, rows) = terminal.size();
            let status = status::status_lines(&self.options, &self.view);
            let chrome = self.layout(rows, title, &status);
            renderer.paint(terminal.output(), &self.view, &chrome, cols)?;

            match terminal.read_input()? {
                InputEvent::Resize => {
                    tracing::debug!("terminal resized; repainting");
                }
                InputEvent::Interrupt => {
                    log_debug("menu interrupted");
                    return Ok(Step::Quit);
                }
                InputEvent::Bytes(bytes) => {
                    let key = decoder.decode(&bytes, false);
                    log_debug_content(&format!("key {:?}", key.name));
                    match dispatcher.handle(&mut self.view, &key) {
                        Step::Continue => {}
                        step => return Ok(step),
                    }
                }
            }
        }
    }

    /// Size the viewport for the terminal and collect what goes around it.
    fn layout<'a>(&mut self, rows: usize, title: &'a [String], status: &'a [String]) -> Chrome<'a> {
        let search_line = if let Some(text) = self.view.search().text() {
            Some(format!("{}{text}", self.search_prompt()))
        } else if self.options.show_search_hint {
            Some(self.options.search_hint())
        } else {
            None
        };
        let preview_lines = if self.options.preview.is_some() {
            viewport::preview_lines(self.options.preview_size, rows, title.len())
        } else {
            0
        };
        let budget = LineBudget {
            title: title.len(),
            search: usize::from(search_line.is_some()),
            status: status.len(),
            preview: preview_lines,
        };
        self.view.set_capacity(budget.menu_capacity(rows));

        let mut preview = None;
        if let (Some(source), Some(entry_index)) = (&self.options.preview, self.view.cursor_entry()) {
            let argument = self.view.entries()[entry_index].preview_argument();
            if preview_lines >= 3 && !argument.is_empty() {
                preview = Some(self.preview_cache.get(source, argument).display_text());
            }
        }

        Chrome {
            title,
            search_line,
            status,
            status_below_preview: self.options.status_bar_below_preview,
            preview,
            preview_lines,
        }
    }

    fn search_prompt(&self) -> &str {
        match self.options.search_key.as_deref() {
            Some(key) if key.chars().count() == 1 => key,
            _ => DEFAULT_SEARCH_KEY,
        }
    }

    fn restore_screen<T: MenuTerminal>(
        &self,
        terminal: &mut T,
        table: &CapabilityTable,
        renderer: &mut Renderer,
        title_lines: usize,
    ) -> Result<()> {
        renderer.finish(terminal.output(), title_lines, self.options.clear_menu_on_exit)?;
        let mut end = String::new();
        end.push_str(table.get("cursor_visible"));
        end.push_str(table.get("exit_application_mode"));
        if self.options.clear_screen {
            end.push_str(table.get("clear"));
        }
        let out = terminal.output();
        out.write_all(end.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn selection(&self) -> Option<Selection> {
        if self.options.multi_select {
            Some(Selection::Multiple(self.view.selected().iter().copied().collect()))
        } else {
            self.view.cursor_entry().map(Selection::Single)
        }
    }
}
