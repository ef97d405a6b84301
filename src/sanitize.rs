//! Filtering of untrusted text (preview output, status bar text) before it is
//! written into the menu region.

use vte::{Params, Parser as VteParser, Perform};

/// Drop every control and escape sequence except SGR (`ESC [ ... m`) and newlines.
///
/// Tabs become a single space so width accounting stays exact. SGR sequences
/// are re-emitted in canonical form, so a preview command can colour its output
/// but cannot move the cursor or clear the screen.
pub fn keep_sgr_only(bytes: &[u8]) -> String {
    struct SgrFilter {
        output: String,
    }

    impl Perform for SgrFilter {
        fn print(&mut self, c: char) {
            self.output.push(c);
        }

        fn execute(&mut self, byte: u8) {
            match byte {
                b'\n' => self.output.push('\n'),
                b'\t' => self.output.push(' '),
                _ => {}
            }
        }

        fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], ignore: bool, action: char) {
            if action != 'm' || ignore || !intermediates.is_empty() {
                return;
            }
            self.output.push_str("\x1b[");
            for (idx, param) in params.iter().enumerate() {
                if idx > 0 {
                    self.output.push(';');
                }
                for (sub_idx, value) in param.iter().enumerate() {
                    if sub_idx > 0 {
                        self.output.push(':');
                    }
                    self.output.push_str(&value.to_string());
                }
            }
            self.output.push('m');
        }
    }

    let mut parser = VteParser::new();
    let mut filter = SgrFilter {
        output: String::with_capacity(bytes.len()),
    };
    parser.advance(&mut filter, bytes);
    filter.output
}

/// Remove all escape sequences, including styling.
pub fn strip_all(text: &str) -> String {
    strip_ansi_escapes::strip_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sgr_sequences_survive() {
        let out = keep_sgr_only(b"\x1b[1;31mred\x1b[0m plain");
        assert_eq!(out, "\x1b[1;31mred\x1b[0m plain");
    }

    #[test]
    fn cursor_movement_and_osc_are_dropped() {
        let out = keep_sgr_only(b"a\x1b[2Jb\x1b[10;4Hc\x1b]0;title\x07d\re");
        assert_eq!(out, "abcde");
    }

    #[test]
    fn newlines_kept_and_tabs_flattened() {
        assert_eq!(keep_sgr_only(b"one\ttwo\nthree"), "one two\nthree");
    }

    #[test]
    fn strip_all_removes_styles() {
        assert_eq!(strip_all("\x1b[33mwarn\x1b[0m"), "warn");
    }
}
