//! Error types shared by the menu, its configuration and the terminal layer.

use std::io;
use thiserror::Error;

/// Errors surfaced to callers of [`crate::TerminalMenu`].
///
/// Configuration and capability errors are raised before the terminal is
/// touched. Preview failures are not errors; they are rendered in the preview box.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("No menu entries given!")]
    NoEntries,

    #[error("{}", invalid_style_message(.0))]
    InvalidStyle(Vec<String>),

    #[error("Invalid parameter combination: {0}")]
    InvalidParameterCombination(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Unknown menu entry \"{0}\"")]
    UnknownMenuEntry(String),

    #[error("Cannot interpret the given key \"{0}\".")]
    InvalidKey(String),

    #[error("Cursor index {index} is out of range for {count} menu entries")]
    CursorIndexOutOfRange { index: usize, count: usize },

    /// The terminal database lookup itself failed (not merely "unsupported").
    #[error("Terminal database query for \"{capname}\" failed: {reason}")]
    CapabilityQuery { capname: String, reason: String },

    #[error("Terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

impl MenuError {
    /// True for errors detected while validating options or entries.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            MenuError::NoEntries
                | MenuError::InvalidStyle(_)
                | MenuError::InvalidParameterCombination(_)
                | MenuError::InvalidOption(_)
                | MenuError::UnknownMenuEntry(_)
                | MenuError::InvalidKey(_)
                | MenuError::CursorIndexOutOfRange { .. }
        )
    }
}

fn invalid_style_message(styles: &[String]) -> String {
    match styles {
        [single] => format!("The style \"{single}\" does not exist."),
        many => format!("The styles (\"{}\") do not exist.", many.join("\", \"")),
    }
}

/// Result type for menu operations.
pub type Result<T> = std::result::Result<T, MenuError>;
