//! Text normalization for altar option text.
//! Turns host UI text into the canonical, line-oriented form used for matching.

use deunicode::deunicode;
use regex::Regex;
use std::sync::LazyLock;

/// Innermost `<...>` span. Applied repeatedly so nested markup unwinds.
static RE_MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<>]*>").expect("Invalid regex"));

/// Literal tokens removed before markup stripping. None of them overlap.
const NOISE_TOKENS: &[&str] = &[
    "<valuedefault>",
    "<enchanted>",
    "{",
    "}",
    " ",
    "gains:",
    "gain:",
    "#",
];

/// Clean raw UI text.
///
/// Pipeline (repeated until nothing changes):
/// 1. Remove literal noise tokens (`<valuedefault>`, braces, spaces, `gain:` ...)
/// 2. Remove every `<...>` span, innermost first
/// 3. Drop stray `<` / `>` left by malformed markup
///
/// Newlines, digits and punctuation survive. The result never contains `<` or
/// `>`, and cleaning it again returns it unchanged.
pub fn clean_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut current = raw.to_string();
    loop {
        let next = clean_pass(&current);
        // Every pass only removes characters, so this terminates.
        if next == current {
            return next;
        }
        current = next;
    }
}

fn clean_pass(text: &str) -> String {
    let mut out = text.to_string();
    for token in NOISE_TOKENS {
        if out.contains(token) {
            out = out.replace(token, "");
        }
    }

    while RE_MARKUP.is_match(&out) {
        out = RE_MARKUP.replace_all(&out, "").into_owned();
    }

    if out.contains(['<', '>']) {
        out.retain(|c| c != '<' && c != '>');
    }
    out
}

/// Reduce text to lowercase ASCII letters only.
///
/// Non-Latin characters are transliterated first so accented text reduces to
/// the same key as its plain spelling.
pub fn letters_only(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    deunicode(text)
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Split cleaned text into its target descriptor (first line) and the
/// non-empty effect lines that follow it.
pub fn split_descriptor(cleaned: &str) -> (&str, Vec<&str>) {
    let mut lines = cleaned.lines().map(|line| line.trim_end_matches('\r'));
    let descriptor = lines.next().unwrap_or("");
    let candidates = lines.filter(|line| !line.trim().is_empty()).collect();
    (descriptor, candidates)
}

#[cfg(test)]
#[path = "tests/normalizer_tests.rs"]
mod tests;
