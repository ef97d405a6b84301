//! Key names, their byte sequences, and decoding of raw terminal input.

use super::capabilities::{is_table_key, CapabilityTable};
use crate::error::{MenuError, Result};
use std::sync::Arc;

/// Named keys that are always the same byte sequence.
const NAMED_KEYS: [(&str, &str); 4] = [
    ("space", " "),
    ("tab", "\t"),
    ("enter", "\r"),
    ("escape", "\x1b"),
];

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

fn modifier_target(key: &str, modifier: &str) -> Option<char> {
    let (prefix, rest) = key.split_once('-')?;
    let capitalized = format!("{}{}", modifier[..1].to_ascii_uppercase(), &modifier[1..]);
    if prefix != modifier && prefix != capitalized {
        return None;
    }
    single_char(rest).filter(|ch| !ch.is_whitespace())
}

/// Byte sequence a key name stands for, without consulting the terminal.
///
/// * a single character is itself
/// * `alt-c` is escape followed by `c`
/// * `ctrl-c` is the ASCII code of `c` (uppercased) minus 64, as a 7-bit value
/// * `space`, `tab`, `enter` and `escape` are fixed control characters
pub fn keycode_for_key(key: &str) -> Result<Vec<u8>> {
    if let Some(ch) = single_char(key) {
        return Ok(ch.to_string().into_bytes());
    }
    if let Some(ch) = modifier_target(key, "alt") {
        let mut code = vec![0x1b];
        code.extend_from_slice(ch.to_string().as_bytes());
        return Ok(code);
    }
    if let Some(ch) = modifier_target(key, "ctrl") {
        if !ch.is_ascii() {
            return Err(MenuError::InvalidKey(key.to_string()));
        }
        let upper = ch.to_ascii_uppercase() as i16;
        return Ok(vec![((upper - 64) & 0x7f) as u8]);
    }
    NAMED_KEYS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, code)| code.as_bytes().to_vec())
        .ok_or_else(|| MenuError::InvalidKey(key.to_string()))
}

/// True when `key` names something the menu can bind.
pub fn is_valid_key_name(key: &str) -> bool {
    is_table_key(key) || keycode_for_key(key).is_ok()
}

/// One decoded read from the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedKey {
    /// Symbolic name (`up`, `ctrl-a`, `alt-x`) or the literal text.
    pub name: String,
    pub raw: Vec<u8>,
}

impl DecodedKey {
    /// The typed text, if the input is printable.
    pub fn text(&self) -> Option<&str> {
        let text = std::str::from_utf8(&self.raw).ok()?;
        if text.is_empty() || text.chars().any(char::is_control) {
            return None;
        }
        Some(text)
    }

    /// True for a single ASCII letter, which navigation keys may claim.
    pub fn is_letter(&self) -> bool {
        single_char(&self.name).is_some_and(|ch| ch.is_ascii_alphabetic())
    }
}

/// Maps raw input bytes to key names.
#[derive(Debug, Clone)]
pub struct KeyDecoder {
    table: Arc<CapabilityTable>,
}

impl KeyDecoder {
    pub fn new(table: Arc<CapabilityTable>) -> Self {
        Self { table }
    }

    /// Decode one chunk of input.
    ///
    /// Exact capability matches win. Unmatched control bytes and escape-prefixed
    /// characters get `ctrl-`/`alt-` names; anything else is literal text,
    /// lowercased when `case_insensitive` is set.
    pub fn decode(&self, bytes: &[u8], case_insensitive: bool) -> DecodedKey {
        let name = if let Some(name) = self.table.key_name(bytes) {
            name.to_string()
        } else {
            match bytes {
                [byte @ 0x01..=0x1a] => format!("ctrl-{}", char::from(b'a' + *byte - 1)),
                [0x1b, byte @ 0x21..=0x7e] => format!("alt-{}", char::from(*byte)),
                _ => {
                    let text = String::from_utf8_lossy(bytes);
                    if case_insensitive {
                        text.to_lowercase()
                    } else {
                        text.into_owned()
                    }
                }
            }
        };
        DecodedKey {
            name,
            raw: bytes.to_vec(),
        }
    }

    /// Byte sequence for a configured key name on this terminal.
    ///
    /// Returns an empty sequence for table keys the terminal does not support.
    pub fn sequence_for(&self, key: &str) -> Result<Vec<u8>> {
        if is_table_key(key) {
            return Ok(self.table.get(key).as_bytes().to_vec());
        }
        keycode_for_key(key)
    }

    /// The name `decode` produces for `key`, so `ctrl-i` and `tab` compare equal.
    pub fn canonical_name(&self, key: &str) -> Result<String> {
        let sequence = self.sequence_for(key)?;
        if sequence.is_empty() {
            return Ok(key.to_string());
        }
        Ok(self.decode(&sequence, false).name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::xterm_table;
    use proptest::prelude::*;

    #[test]
    fn keycodes_follow_derivation_rules() {
        assert_eq!(keycode_for_key("x").unwrap(), b"x");
        assert_eq!(keycode_for_key("alt-x").unwrap(), b"\x1bx");
        assert_eq!(keycode_for_key("Alt-X").unwrap(), b"\x1bX");
        assert_eq!(keycode_for_key("ctrl-a").unwrap(), b"\x01");
        assert_eq!(keycode_for_key("Ctrl-z").unwrap(), b"\x1a");
        assert_eq!(keycode_for_key("ctrl-?").unwrap(), b"\x7f");
        assert_eq!(keycode_for_key("enter").unwrap(), b"\r");
        assert_eq!(keycode_for_key("space").unwrap(), b" ");
    }

    #[test]
    fn unknown_key_names_are_rejected() {
        let err = keycode_for_key("hyper-x").unwrap_err();
        assert_eq!(err.to_string(), "Cannot interpret the given key \"hyper-x\".");
        assert!(keycode_for_key("alt-xy").is_err());
        assert!(keycode_for_key("ctrl-é").is_err());
        assert!(is_valid_key_name("up"));
        assert!(is_valid_key_name("backspace"));
        assert!(!is_valid_key_name("shift-up"));
    }

    #[test]
    fn decoder_prefers_capability_names() {
        let decoder = KeyDecoder::new(xterm_table());
        assert_eq!(decoder.decode(b"\x1bOA", false).name, "up");
        assert_eq!(decoder.decode(b"\r", false).name, "enter");
        assert_eq!(decoder.decode(b"\x0b", false).name, "ctrl-k");
        assert_eq!(decoder.decode(b"\x7f", false).name, "backspace");
    }

    #[test]
    fn literal_keys_respect_case_flag() {
        let decoder = KeyDecoder::new(xterm_table());
        assert_eq!(decoder.decode(b"Q", false).name, "Q");
        assert_eq!(decoder.decode(b"Q", true).name, "q");
        let key = decoder.decode("é".as_bytes(), false);
        assert_eq!(key.text(), Some("é"));
        assert_eq!(decoder.decode(b"\x1bOP", false).text(), None);
    }

    #[test]
    fn canonical_names_merge_aliases() {
        let decoder = KeyDecoder::new(xterm_table());
        assert_eq!(decoder.canonical_name("ctrl-i").unwrap(), "tab");
        assert_eq!(decoder.canonical_name("ctrl-m").unwrap(), "enter");
        assert_eq!(decoder.canonical_name(" ").unwrap(), " ");
        assert_eq!(decoder.canonical_name("space").unwrap(), " ");
        assert_eq!(decoder.canonical_name("up").unwrap(), "up");
    }

    proptest! {
        #[test]
        fn ctrl_and_alt_letters_round_trip(letter in proptest::char::range('a', 'z')) {
            let decoder = KeyDecoder::new(xterm_table());
            for key in [format!("ctrl-{letter}"), format!("alt-{letter}")] {
                let code = keycode_for_key(&key).unwrap();
                let decoded = decoder.decode(&code, false);
                prop_assert_eq!(&decoded.name, &decoder.canonical_name(&key).unwrap());
                if !matches!(letter, 'i' | 'm') {
                    prop_assert_eq!(&decoded.name, &key);
                }
            }
        }
    }
}
