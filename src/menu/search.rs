use super::entry::MenuEntry;
use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// An entry that matched the search, with the byte range of its first match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    pub entry_index: usize,
    pub span: Range<usize>,
}

/// Search-as-you-type state.
///
/// `None` text means the search line is closed. An open search with empty text
/// filters nothing. Text that is not a valid pattern is matched by its longest
/// valid prefix.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    case_sensitive: bool,
    text: Option<String>,
    pattern: Option<Regex>,
    matches: Vec<SearchMatch>,
}

impl SearchEngine {
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            case_sensitive,
            text: None,
            pattern: None,
            matches: Vec::new(),
        }
    }

    pub fn set_text(&mut self, text: Option<String>, entries: &[MenuEntry]) {
        self.pattern = text
            .as_deref()
            .and_then(|text| compile_longest_prefix(text, self.case_sensitive));
        self.text = text;
        self.matches = match &self.pattern {
            Some(pattern) => entries
                .iter()
                .enumerate()
                .filter_map(|(entry_index, entry)| {
                    pattern.find(&entry.display_text).map(|found| SearchMatch {
                        entry_index,
                        span: found.range(),
                    })
                })
                .collect(),
            None => Vec::new(),
        };
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.text.is_some()
    }

    /// Active and non-empty, so only matches are shown.
    pub fn is_filtering(&self) -> bool {
        self.text.as_deref().is_some_and(|text| !text.is_empty())
    }

    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }
}

fn compile_longest_prefix(text: &str, case_sensitive: bool) -> Option<Regex> {
    let mut candidate = text;
    while !candidate.is_empty() {
        if let Ok(pattern) = RegexBuilder::new(candidate)
            .case_insensitive(!case_sensitive)
            .build()
        {
            return Some(pattern);
        }
        let mut chars = candidate.chars();
        chars.next_back();
        candidate = chars.as_str();
    }
    None
}
