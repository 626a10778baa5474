//! Word-boundary aware text substitution
//!
//! Replacements never touch text inside a longer word: correcting `adsl`
//! leaves `adsline` alone.

/// A byte range of the source text and what to put there instead
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whether `text[start..end]` is delimited by non-word characters
pub fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !is_word_char(c));
    let after_ok = text[end..].chars().next().map_or(true, |c| !is_word_char(c));
    before_ok && after_ok
}

/// Byte ranges of every whole-word occurrence of `needle`
pub fn find_whole_words(text: &str, needle: &str) -> Vec<(usize, usize)> {
    if needle.is_empty() {
        return Vec::new();
    }
    text.match_indices(needle)
        .map(|(start, m)| (start, start + m.len()))
        .filter(|&(start, end)| is_whole_word(text, start, end))
        .collect()
}

/// Replace every whole-word occurrence of `needle`
pub fn replace_whole_words(text: &str, needle: &str, replacement: &str) -> String {
    let spans: Vec<Replacement> = find_whole_words(text, needle)
        .into_iter()
        .map(|(start, end)| Replacement {
            start,
            end,
            text: replacement.to_string(),
        })
        .collect();
    apply_replacements(text, &spans)
}

/// Rewrite the given byte ranges
///
/// Ranges must be sorted, non-overlapping and on char boundaries; ranges
/// that violate this are skipped.
pub fn apply_replacements(text: &str, replacements: &[Replacement]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for r in replacements {
        let valid = r.start >= cursor
            && r.start <= r.end
            && text.is_char_boundary(r.start)
            && text.is_char_boundary(r.end)
            && r.end <= text.len();
        if !valid {
            tracing::warn!(start = r.start, end = r.end, "Skipping invalid replacement span");
            continue;
        }
        out.push_str(&text[cursor..r.start]);
        out.push_str(&r.text);
        cursor = r.end;
    }
    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_word_only() {
        assert_eq!(
            replace_whole_words("adsl adsline xadsl adsl", "adsl", "ADSL"),
            "ADSL adsline xadsl ADSL"
        );
    }

    #[test]
    fn test_punctuation_is_a_boundary() {
        assert_eq!(
            replace_whole_words("l'adsl, adsl.", "adsl", "x"),
            "l'x, x."
        );
    }

    #[test]
    fn test_multi_word_needle() {
        assert_eq!(
            replace_whole_words("idoom fibre pro", "idoom fibre", "fibre"),
            "fibre pro"
        );
    }

    #[test]
    fn test_empty_needle() {
        assert_eq!(replace_whole_words("abc", "", "x"), "abc");
        assert!(find_whole_words("abc", "").is_empty());
    }

    #[test]
    fn test_apply_replacements_skips_overlaps() {
        let spans = vec![
            Replacement { start: 0, end: 3, text: "one".into() },
            Replacement { start: 2, end: 5, text: "bad".into() },
            Replacement { start: 7, end: 10, text: "two".into() },
        ];
        assert_eq!(apply_replacements("abc de ghi", &spans), "one de two");
    }
}
