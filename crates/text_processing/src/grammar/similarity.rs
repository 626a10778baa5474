//! Token-set string similarity
//!
//! `ratio` is the normalized Levenshtein similarity scaled to 0-100.
//! `token_set_ratio` compares the shared and the differing token sets of
//! both strings, so it ignores word order and repeated words.

use std::collections::BTreeSet;

/// Lowercase, turn non-alphanumerics into spaces, collapse whitespace
pub fn full_process(s: &str) -> String {
    let mut mapped = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_alphanumeric() {
            mapped.extend(c.to_lowercase());
        } else {
            mapped.push(' ');
        }
    }
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Edit-distance similarity, 0 when either side is empty
pub fn ratio(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    to_score(strsim::normalized_levenshtein(a, b))
}

fn to_score(similarity: f64) -> u8 {
    (similarity * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Order-independent token overlap similarity
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let p1 = full_process(a);
    let p2 = full_process(b);
    if p1.is_empty() || p2.is_empty() {
        return 0;
    }

    let t1: BTreeSet<&str> = p1.split(' ').collect();
    let t2: BTreeSet<&str> = p2.split(' ').collect();

    let sect = join(t1.intersection(&t2));
    let diff1 = join(t1.difference(&t2));
    let diff2 = join(t2.difference(&t1));

    let combined_1to2 = combine(&sect, &diff1);
    let combined_2to1 = combine(&sect, &diff2);

    ratio(&sect, &combined_1to2)
        .max(ratio(&sect, &combined_2to1))
        .max(ratio(&combined_1to2, &combined_2to1))
}

fn join<S: AsRef<str>>(tokens: impl Iterator<Item = S>) -> String {
    tokens
        .map(|t| t.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

fn combine(sect: &str, diff: &str) -> String {
    match (sect.is_empty(), diff.is_empty()) {
        (true, _) => diff.to_string(),
        (false, true) => sect.to_string(),
        (false, false) => format!("{} {}", sect, diff),
    }
}

/// Highest scoring choice; ties keep the earliest choice
pub fn best_match<'a, S: AsRef<str>>(query: &str, choices: &'a [S]) -> Option<(&'a str, u8)> {
    let mut best: Option<(&'a str, u8)> = None;
    for choice in choices {
        let choice = choice.as_ref();
        let score = token_set_ratio(query, choice);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((choice, score)),
        }
    }
    best
}
