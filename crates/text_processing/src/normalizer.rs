//! Text normalization and the static spelling rule table
//!
//! `normalize` is idempotent: its output only contains ASCII letters and
//! digits, whitespace and apostrophes, all of which it maps to themselves.

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::{Result, TextProcessingError};

/// Normalize user text
///
/// In order: fold to a diacritic-free form, lowercase, then replace every
/// character outside `[A-Za-z0-9\s']` with a space. Character positions are
/// not preserved; callers work on the normalized string from then on.
pub fn normalize(text: &str) -> String {
    transliterate(text)
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() || c == '\'' {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Strip diacritics and fold Latin letters that have no decomposition
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfkd() {
        if is_combining_mark(c) {
            continue;
        }
        match fold_latin(c) {
            Some(folded) => out.push_str(folded),
            None => out.push(c),
        }
    }
    out
}

fn fold_latin(c: char) -> Option<&'static str> {
    let folded = match c {
        'ß' => "ss",
        'ẞ' => "SS",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        'ø' => "o",
        'Ø' => "O",
        'đ' | 'ð' => "d",
        'Đ' | 'Ð' => "D",
        'ł' => "l",
        'Ł' => "L",
        'þ' => "th",
        'Þ' => "TH",
        'ı' => "i",
        '’' | '‘' | 'ʼ' => "'",
        _ => return None,
    };
    Some(folded)
}

/// Ordered regex rewrite table
///
/// Rules run in definition order and each one rewrites the output of the
/// previous one.
#[derive(Debug, Clone, Default)]
pub struct SpellingRules {
    rules: Vec<(Regex, String)>,
}

impl SpellingRules {
    /// Compile `(pattern, replacement)` pairs
    pub fn new<I, P, R>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, R)>,
        P: AsRef<str>,
        R: Into<String>,
    {
        let mut compiled = Vec::new();
        for (pattern, replacement) in rules {
            let pattern = pattern.as_ref();
            let regex = Regex::new(pattern).map_err(|e| TextProcessingError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
            compiled.push((regex, replacement.into()));
        }
        Ok(Self { rules: compiled })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in order
    pub fn apply(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (regex, replacement) in &self.rules {
            let replaced = regex.replace_all(&result, replacement.as_str());
            if let std::borrow::Cow::Owned(updated) = replaced {
                tracing::trace!(pattern = %regex.as_str(), "Spelling rule applied");
                result = updated;
            }
        }
        result
    }
}
