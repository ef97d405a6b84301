//! Interactive selection menus for the terminal.
//!
//! A [`TerminalMenu`] is drawn inline below the cursor, navigated with the
//! keyboard, and returns the chosen entry (or entries in multi-select mode).

pub mod config;
pub mod error;
mod lock;
pub mod logging;
pub mod menu;
pub mod sanitize;
mod telemetry;
pub mod terminal;
pub mod text;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{LogOptions, MenuOptions, Preselect, PreviewSource, StatusBarSource};
pub use error::{MenuError, Result};
pub use logging::{init_logging, log_debug, log_file_path};
pub use menu::{MenuEntry, Selection, TerminalMenu};
pub use telemetry::init_tracing;
pub use terminal::raw_mode::install_terminal_panic_hook;
