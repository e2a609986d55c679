//! Line clean-up applied before any structural parsing.
//!
//! `normalize_line` is pure and idempotent.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Leading list markers: `1. `, `2) `, `- `, `• `. Dash glyphs are listed
/// because the marker is stripped before dashes are unified.
static LIST_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[0-9]+[.)]\s+|[-*•–—]\s+)+").expect("list prefix pattern is valid")
});

static DIGIT_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9])(\p{L}+)").expect("digit/letter pattern is valid"));

static FRACTION_LETTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([¼½¾\x{2150}-\x{215E}])(\p{L})").expect("fraction/letter pattern is valid")
});

/// Ordinal suffixes stay attached (`1/4th`), the quantity parser understands them.
const ORDINAL_SUFFIXES: &[&str] = &["st", "nd", "rd", "th"];

pub fn normalize_line(raw: &str) -> String {
    let line = LIST_PREFIX.replace(raw, "");
    let line = line.replace(['–', '—'], "-");
    let line = DIGIT_LETTERS.replace_all(&line, |caps: &Captures| {
        let letters = &caps[2];
        if ORDINAL_SUFFIXES.contains(&letters.to_lowercase().as_str()) {
            format!("{}{}", &caps[1], letters)
        } else {
            format!("{} {}", &caps[1], letters)
        }
    });
    let line = FRACTION_LETTER.replace_all(&line, "$1 $2");

    collapse_whitespace(&line)
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
