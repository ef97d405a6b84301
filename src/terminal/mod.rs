//! Terminal plumbing: capability lookup, key decoding, raw mode and signals.

pub mod borders;
pub mod capabilities;
pub mod keys;
pub mod raw_mode;
pub mod signals;
pub mod tty;

pub use borders::BoxChars;
pub use capabilities::{CapabilityTable, TerminfoSource, TputSource};
pub use keys::{keycode_for_key, DecodedKey, KeyDecoder};
pub use tty::{InputEvent, MenuTerminal, TtyTerminal};
