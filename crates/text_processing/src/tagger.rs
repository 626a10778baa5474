//! Rule-based token tagger
//!
//! Word segmentation follows Unicode word boundaries (UAX #29); elisions
//! such as `l'adsl` are split at the apostrophe. Stopwords and verbs come
//! from small built-in English/French lists, optionally extended from the
//! domain configuration.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use unicode_segmentation::UnicodeSegmentation;

use chat_context_core::{PartOfSpeech, TokenInfo, TokenTagger};

const DEFAULT_STOPWORDS: &[&str] = &[
    // English
    "a", "about", "all", "an", "and", "any", "are", "as", "at", "be", "by", "can", "do", "does",
    "for", "from", "how", "i", "if", "in", "is", "it", "its", "me", "much", "my", "near", "no",
    "not", "of", "on", "or", "our", "please", "so", "than", "that", "the", "their", "them",
    "then", "there", "these", "this", "to", "us", "was", "we", "what", "when", "where", "which",
    "who", "why", "will", "with", "you", "your",
    // French
    "a", "au", "aux", "avec", "ce", "ces", "cette", "comment", "dans", "de", "des", "du", "elle",
    "en", "est", "et", "il", "je", "l", "la", "le", "les", "leur", "ma", "mes", "moi", "mon",
    "ne", "nous", "ou", "par", "pas", "pour", "qu", "que", "quel", "quelle", "qui", "sa", "se",
    "ses", "son", "sur", "ta", "te", "tes", "ton", "tu", "un", "une", "vos", "votre", "vous",
];

const DEFAULT_VERBS: &[&str] = &[
    // English
    "am", "buy", "change", "cost", "costs", "get", "give", "have", "has", "know", "like", "need",
    "order", "pay", "see", "show", "subscribe", "tell", "upgrade", "want", "would",
    // French
    "acheter", "ai", "avoir", "changer", "connaitre", "coute", "coutent", "donner", "montrer",
    "payer", "peux", "savoir", "souhaite", "suis", "veut", "veux", "voudrais",
];

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "hundred", "thousand", "million", "deux", "trois", "quatre", "cinq", "sept", "huit",
    "neuf", "dix", "cent", "mille",
];

static NUMBER_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| NUMBER_WORDS.iter().copied().collect());

/// Tags tokens with stopword, numeric and verb flags from word lists
#[derive(Debug, Clone, Default)]
pub struct RuleBasedTagger {
    stopwords: HashSet<String>,
    verbs: HashSet<String>,
}

impl RuleBasedTagger {
    /// Tagger with exactly the given word lists
    pub fn new<I, J>(stopwords: I, verbs: J) -> Self
    where
        I: IntoIterator<Item = String>,
        J: IntoIterator<Item = String>,
    {
        Self {
            stopwords: stopwords.into_iter().map(|w| w.to_lowercase()).collect(),
            verbs: verbs.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Tagger with the built-in lists
    pub fn with_defaults() -> Self {
        Self::new(
            DEFAULT_STOPWORDS.iter().map(|w| w.to_string()),
            DEFAULT_VERBS.iter().map(|w| w.to_string()),
        )
    }

    /// Built-in lists plus extra words
    pub fn with_extra_words(stopwords: &[String], verbs: &[String]) -> Self {
        let mut tagger = Self::with_defaults();
        tagger
            .stopwords
            .extend(stopwords.iter().map(|w| w.to_lowercase()));
        tagger.verbs.extend(verbs.iter().map(|w| w.to_lowercase()));
        tagger
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    fn make_token(&self, text: &str, start: usize) -> TokenInfo {
        let lower = text.to_lowercase();
        let is_numeric = like_num(&lower);
        let pos = if is_numeric {
            PartOfSpeech::Num
        } else if !text.chars().any(char::is_alphanumeric) {
            PartOfSpeech::Punct
        } else if self.verbs.contains(&lower) {
            PartOfSpeech::Verb
        } else {
            PartOfSpeech::Other
        };

        TokenInfo {
            text: text.to_string(),
            start,
            end: start + text.len(),
            is_stopword: self.stopwords.contains(&lower),
            is_numeric,
            pos,
        }
    }
}

impl TokenTagger for RuleBasedTagger {
    fn tag(&self, text: &str) -> Vec<TokenInfo> {
        let mut tokens = Vec::new();
        for (start, segment) in text.split_word_bound_indices() {
            if segment.chars().all(char::is_whitespace) {
                continue;
            }
            if segment.len() > 1 && segment.contains('\'') {
                for (offset, part) in split_elision(segment) {
                    tokens.push(self.make_token(part, start + offset));
                }
            } else {
                tokens.push(self.make_token(segment, start));
            }
        }
        tokens
    }
}

/// Split `l'adsl` into `l`, `'`, `adsl` with byte offsets
fn split_elision(segment: &str) -> Vec<(usize, &str)> {
    let mut parts = Vec::new();
    let mut part_start = 0;
    for (idx, c) in segment.char_indices() {
        if c == '\'' {
            if idx > part_start {
                parts.push((part_start, &segment[part_start..idx]));
            }
            parts.push((idx, &segment[idx..idx + 1]));
            part_start = idx + 1;
        }
    }
    if part_start < segment.len() {
        parts.push((part_start, &segment[part_start..]));
    }
    parts
}

/// Digits (with optional separators) or a number word
fn like_num(word: &str) -> bool {
    let has_digit = word.chars().any(|c| c.is_ascii_digit());
    let only_numeric = word
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == ',');
    (has_digit && only_numeric) || NUMBER_WORD_SET.contains(word)
}
