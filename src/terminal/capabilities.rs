//! Terminal capability table: symbolic names to escape sequences and back.
//!
//! The table is built once per process from the terminfo database (through the
//! external `tput` program) and shared read-only afterwards.

use crate::error::{MenuError, Result};
use crate::logging::log_debug;
use std::collections::HashMap;
use std::process::{Command, Stdio};
use std::sync::{Arc, OnceLock};

/// Symbolic capability names and the `tput` arguments that resolve them.
pub const CAPABILITY_NAMES: [(&str, &str); 36] = [
    ("bg_black", "setab 0"),
    ("bg_blue", "setab 4"),
    ("bg_cyan", "setab 6"),
    ("bg_gray", "setab 7"),
    ("bg_green", "setab 2"),
    ("bg_purple", "setab 5"),
    ("bg_red", "setab 1"),
    ("bg_yellow", "setab 3"),
    ("bold", "bold"),
    ("clear", "clear"),
    ("colors", "colors"),
    ("cursor_down", "cud1"),
    ("cursor_invisible", "civis"),
    ("cursor_up", "cuu1"),
    ("cursor_visible", "cnorm"),
    ("delete_line", "dl1"),
    ("down", "kcud1"),
    ("enter_application_mode", "smkx"),
    ("exit_application_mode", "rmkx"),
    ("fg_black", "setaf 0"),
    ("fg_blue", "setaf 4"),
    ("fg_cyan", "setaf 6"),
    ("fg_gray", "setaf 7"),
    ("fg_green", "setaf 2"),
    ("fg_purple", "setaf 5"),
    ("fg_red", "setaf 1"),
    ("fg_yellow", "setaf 3"),
    ("italics", "sitm"),
    ("reset_attributes", "sgr0"),
    ("standout", "smso"),
    ("underline", "smul"),
    ("up", "kcuu1"),
    ("home", "khome"),
    ("end", "kend"),
    ("page_up", "kpp"),
    ("page_down", "knp"),
];

/// Capabilities that describe keys the user can press.
pub const KEY_CAPABILITIES: [&str; 6] = ["up", "down", "home", "end", "page_up", "page_down"];

/// Keys that are fixed control characters on every terminal.
const CONTROL_CHARACTERS: [(&str, &str); 5] = [
    ("ctrl-j", "\n"),
    ("ctrl-k", "\x0b"),
    ("enter", "\r"),
    ("escape", "\x1b"),
    ("tab", "\t"),
];

/// Normal-mode cursor keys, used when a terminal ignores keypad transmit mode.
const CURSOR_KEY_FALLBACKS: [(&str, &str); 2] = [("up", "\x1b[A"), ("down", "\x1b[B")];

/// Erase character used when the line discipline cannot be queried.
pub const DEFAULT_ERASE_CHAR: u8 = 0x7f;

/// Returns true when `name` can be used in a style list.
pub fn is_style_name(name: &str) -> bool {
    CAPABILITY_NAMES.iter().any(|(codename, _)| *codename == name)
}

/// Returns true when `name` is a key the capability table resolves itself.
pub fn is_table_key(name: &str) -> bool {
    KEY_CAPABILITIES.contains(&name)
        || name == "backspace"
        || CONTROL_CHARACTERS.iter().any(|(key, _)| *key == name)
}

fn is_color(codename: &str) -> bool {
    codename.starts_with("fg_") || codename.starts_with("bg_")
}

/// Where capability strings come from.
pub trait TerminfoSource {
    /// Look up a capability. Unsupported capabilities resolve to an empty string.
    fn query(&self, capname: &str) -> Result<String>;

    /// The line discipline's erase character, if it can be read.
    fn erase_char(&self) -> Option<u8> {
        None
    }
}

/// Queries the terminfo database by running `tput`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TputSource;

impl TerminfoSource for TputSource {
    fn query(&self, capname: &str) -> Result<String> {
        let output = Command::new("tput")
            .args(capname.split_whitespace())
            .stdin(Stdio::inherit())
            .stderr(Stdio::null())
            .output()
            .map_err(|err| MenuError::CapabilityQuery {
                capname: capname.to_string(),
                reason: err.to_string(),
            })?;
        match output.status.code() {
            Some(0) => Ok(String::from_utf8_lossy(&output.stdout).into_owned()),
            // tput reports an absent capability with status 1.
            Some(1) => Ok(String::new()),
            code => Err(MenuError::CapabilityQuery {
                capname: capname.to_string(),
                reason: match code {
                    Some(code) => format!("tput exited with status {code}"),
                    None => "tput was terminated by a signal".to_string(),
                },
            }),
        }
    }

    fn erase_char(&self) -> Option<u8> {
        super::raw_mode::tty_erase_char()
    }
}

/// Resolved escape sequences plus the reverse lookup for key input.
#[derive(Debug, Clone)]
pub struct CapabilityTable {
    sequences: HashMap<&'static str, String>,
    reverse: HashMap<Vec<u8>, &'static str>,
    colors: i32,
}

impl CapabilityTable {
    /// Query every capability from `source`.
    ///
    /// Colour capabilities resolve to empty strings when the terminal reports
    /// fewer than 8 colours.
    pub fn build(source: &dyn TerminfoSource) -> Result<Self> {
        let colors = source
            .query("colors")?
            .trim()
            .parse::<i32>()
            .unwrap_or(-1);
        let mut sequences = HashMap::with_capacity(CAPABILITY_NAMES.len() + 8);
        for (codename, capname) in CAPABILITY_NAMES {
            let sequence = if codename == "colors" || (is_color(codename) && colors < 8) {
                String::new()
            } else {
                source.query(capname)?
            };
            sequences.insert(codename, sequence);
        }
        for (key, sequence) in CONTROL_CHARACTERS {
            sequences.insert(key, sequence.to_string());
        }
        let erase = source
            .erase_char()
            .filter(|byte| *byte != 0)
            .unwrap_or(DEFAULT_ERASE_CHAR);
        sequences.insert("backspace", char::from(erase).to_string());

        let mut reverse = HashMap::new();
        for (key, sequence) in CURSOR_KEY_FALLBACKS {
            reverse.insert(sequence.as_bytes().to_vec(), key);
        }
        for key in KEY_CAPABILITIES {
            insert_reverse(&mut reverse, &sequences, key);
        }
        for (key, _) in CONTROL_CHARACTERS {
            insert_reverse(&mut reverse, &sequences, key);
        }
        insert_reverse(&mut reverse, &sequences, "backspace");

        tracing::debug!(colors, keys = reverse.len(), "capability table built");
        log_debug(&format!(
            "capability table built: colors={colors}, {} key sequences",
            reverse.len()
        ));
        Ok(Self {
            sequences,
            reverse,
            colors,
        })
    }

    /// Escape sequence for `codename`, or `""` when unsupported or unknown.
    pub fn get(&self, codename: &str) -> &str {
        self.sequences.get(codename).map(String::as_str).unwrap_or("")
    }

    /// `codename` repeated `count` times.
    pub fn repeat(&self, codename: &str, count: usize) -> String {
        self.get(codename).repeat(count)
    }

    /// Concatenated sequences for a list of style names.
    pub fn style<S: AsRef<str>>(&self, styles: &[S]) -> String {
        styles.iter().map(|style| self.get(style.as_ref())).collect()
    }

    /// Symbolic key name for an exact input byte sequence.
    pub fn key_name(&self, bytes: &[u8]) -> Option<&'static str> {
        self.reverse.get(bytes).copied()
    }

    /// Colour count reported by the terminal (`-1` if unknown).
    pub fn colors(&self) -> i32 {
        self.colors
    }
}

fn insert_reverse(
    reverse: &mut HashMap<Vec<u8>, &'static str>,
    sequences: &HashMap<&'static str, String>,
    key: &'static str,
) {
    if let Some(sequence) = sequences.get(key).filter(|seq| !seq.is_empty()) {
        reverse.insert(sequence.as_bytes().to_vec(), key);
    }
}

static GLOBAL_TABLE: OnceLock<Arc<CapabilityTable>> = OnceLock::new();

/// The process-wide table, built from `tput` on first use.
///
/// A failed build is not cached, so a later call may retry.
pub fn global() -> Result<Arc<CapabilityTable>> {
    if let Some(table) = GLOBAL_TABLE.get() {
        return Ok(Arc::clone(table));
    }
    let table = Arc::new(CapabilityTable::build(&TputSource)?);
    Ok(Arc::clone(GLOBAL_TABLE.get_or_init(|| table)))
}
