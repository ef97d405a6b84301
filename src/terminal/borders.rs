use std::env;

/// Characters used to draw the preview box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

pub const BOX_UNICODE: BoxChars = BoxChars {
    top_left: '┌',
    top_right: '┐',
    bottom_left: '└',
    bottom_right: '┘',
    horizontal: '─',
    vertical: '│',
};

pub const BOX_ASCII: BoxChars = BoxChars {
    top_left: '+',
    top_right: '+',
    bottom_left: '+',
    bottom_right: '+',
    horizontal: '-',
    vertical: '|',
};

impl BoxChars {
    /// Unicode line drawing when the locale is UTF-8, ASCII otherwise.
    pub fn for_locale() -> Self {
        let locale = ["LC_ALL", "LC_CTYPE", "LANG"]
            .iter()
            .filter_map(|name| env::var(name).ok())
            .find(|value| !value.is_empty());
        Self::for_locale_name(locale.as_deref())
    }

    fn for_locale_name(locale: Option<&str>) -> Self {
        let utf8 = locale.is_some_and(|value| {
            let lower = value.to_ascii_lowercase();
            lower.contains("utf-8") || lower.contains("utf8")
        });
        if utf8 {
            BOX_UNICODE
        } else {
            BOX_ASCII
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_locales_get_line_drawing() {
        assert_eq!(BoxChars::for_locale_name(Some("en_US.UTF-8")), BOX_UNICODE);
        assert_eq!(BoxChars::for_locale_name(Some("C.utf8")), BOX_UNICODE);
        assert_eq!(BoxChars::for_locale_name(Some("C")), BOX_ASCII);
        assert_eq!(BoxChars::for_locale_name(None), BOX_ASCII);
    }
}
