/// One parsed menu entry.
///
/// The raw form is `[k] Display text|preview argument`: the bracketed shortcut
/// and the `|`-separated preview argument are optional, and `\|` is a literal pipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub display_text: String,
    pub shortcut_key: Option<char>,
    pub preview_argument: Option<String>,
}

impl MenuEntry {
    pub fn parse(raw: &str) -> Self {
        let mut fields = split_unescaped_pipes(raw).into_iter();
        let text = fields.next().unwrap_or_default();
        let preview_argument = fields.next();
        let (shortcut_key, display_text) = split_shortcut(&text);
        Self {
            display_text: display_text.to_string(),
            shortcut_key,
            preview_argument,
        }
    }

    /// What the preview provider receives: the explicit argument or the display text.
    pub fn preview_argument(&self) -> &str {
        self.preview_argument
            .as_deref()
            .unwrap_or(&self.display_text)
    }
}

fn split_unescaped_pipes(raw: &str) -> Vec<String> {
    let mut fields = vec![String::new()];
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'|') => {
                chars.next();
                push_char(&mut fields, '|');
            }
            '|' => fields.push(String::new()),
            other => push_char(&mut fields, other),
        }
    }
    fields
}

fn push_char(fields: &mut [String], ch: char) {
    if let Some(field) = fields.last_mut() {
        field.push(ch);
    }
}

fn split_shortcut(text: &str) -> (Option<char>, &str) {
    let mut chars = text.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('['), Some(key), Some(']')) if !key.is_whitespace() => {
            (Some(key), chars.as_str().trim_start())
        }
        _ => (None, text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_entry_has_no_extras() {
        let entry = MenuEntry::parse("apple");
        assert_eq!(entry.display_text, "apple");
        assert_eq!(entry.shortcut_key, None);
        assert_eq!(entry.preview_argument, None);
        assert_eq!(entry.preview_argument(), "apple");
    }

    #[test]
    fn shortcut_and_preview_argument_are_split_off() {
        let entry = MenuEntry::parse("[a]  Alpha|alpha.txt");
        assert_eq!(entry.display_text, "Alpha");
        assert_eq!(entry.shortcut_key, Some('a'));
        assert_eq!(entry.preview_argument(), "alpha.txt");
    }

    #[test]
    fn escaped_pipes_are_literal() {
        let entry = MenuEntry::parse(r"a \| b|arg|ignored");
        assert_eq!(entry.display_text, "a | b");
        assert_eq!(entry.preview_argument.as_deref(), Some("arg"));
    }

    #[test]
    fn whitespace_is_not_a_shortcut() {
        let entry = MenuEntry::parse("[ ] unchecked");
        assert_eq!(entry.shortcut_key, None);
        assert_eq!(entry.display_text, "[ ] unchecked");
    }

    #[test]
    fn empty_preview_argument_is_kept() {
        let entry = MenuEntry::parse("quiet|");
        assert_eq!(entry.preview_argument.as_deref(), Some(""));
        assert_eq!(entry.preview_argument(), "");
    }
}
