//! Display-width helpers. Widths are terminal columns: wide characters count
//! as two, escape sequences count as zero.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// True for the byte that terminates a CSI sequence.
#[inline]
fn is_csi_final(ch: char) -> bool {
    ('\x40'..='\x7e').contains(&ch)
}

/// Display width of plain text.
#[inline]
pub fn text_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Display width of text that may embed CSI escape sequences.
pub fn display_width(s: &str) -> usize {
    let mut width: usize = 0;
    let mut escape = EscapeState::Text;

    for ch in s.chars() {
        escape = escape.advance(ch);
        if escape == EscapeState::Text {
            width += UnicodeWidthChar::width(ch).unwrap_or(0);
        }
    }

    width
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EscapeState {
    Text,
    Escape,
    Csi,
    /// The character just consumed closed a sequence.
    Closed,
}

impl EscapeState {
    /// Feed one char. Returns `Text` only when `ch` is visible text.
    fn advance(self, ch: char) -> Self {
        match self {
            EscapeState::Text | EscapeState::Closed => {
                if ch == '\x1b' {
                    EscapeState::Escape
                } else {
                    EscapeState::Text
                }
            }
            EscapeState::Escape => {
                if ch == '[' {
                    EscapeState::Csi
                } else {
                    EscapeState::Closed
                }
            }
            EscapeState::Csi => {
                if is_csi_final(ch) {
                    EscapeState::Closed
                } else {
                    EscapeState::Csi
                }
            }
        }
    }
}

/// Truncate plain text to at most `max_width` columns without splitting a
/// wide character.
pub fn truncate_to_width(s: &str, max_width: usize) -> &str {
    let mut width: usize = 0;
    for (idx, ch) in s.char_indices() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width.saturating_add(ch_width) > max_width {
            return &s[..idx];
        }
        width += ch_width;
    }
    s
}

/// Truncate text with embedded escape sequences to `max_width` visible columns.
///
/// Escape sequences are kept wherever they appear before the cut, so styles
/// opened in the kept part still apply. Callers reset attributes afterwards.
pub fn limit_with_escapes(s: &str, max_width: usize) -> String {
    let mut result = String::with_capacity(s.len().min(max_width * 4 + 16));
    let mut width: usize = 0;
    let mut escape = EscapeState::Text;

    for ch in s.chars() {
        escape = escape.advance(ch);
        if escape != EscapeState::Text {
            result.push(ch);
            continue;
        }
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width.saturating_add(ch_width) > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result
}

/// Right-pad plain text with spaces up to `width` columns, truncating if longer.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let truncated = truncate_to_width(s, width);
    let current = text_width(truncated);
    let mut result = String::with_capacity(truncated.len() + width.saturating_sub(current));
    result.push_str(truncated);
    result.push_str(&" ".repeat(width.saturating_sub(current)));
    result
}
