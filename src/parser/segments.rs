//! Splits a line into the text used for structural parsing and its notes.

use std::sync::LazyLock;

use regex::Regex;

use super::fractions::FractionTable;
use super::normalize::collapse_whitespace;

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^()]*)\)").expect("parenthetical pattern is valid"));

/// Characters that end the primary segment and separate trailing notes.
const SEPARATORS: [char; 2] = [',', ';'];

/// A line split into its parseable part and its notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segments {
    /// ASCII-readable text that quantity, unit and name are read from
    pub primary: String,
    /// Parenthetical notes first, then trailing comma or semicolon segments
    pub notes: Vec<String>,
}

impl Segments {
    pub fn note(&self) -> String {
        self.notes.join(", ")
    }
}

pub fn extract_segments(line: &str, fractions: &FractionTable) -> Segments {
    let mut notes = Vec::new();
    let mut remainder = line.to_string();

    // innermost groups first, so nested parentheses unwrap completely
    loop {
        let Some((whole, inner)) = PARENTHETICAL.captures(&remainder).and_then(|caps| {
            let whole = caps.get(0)?.range();
            Some((whole, collapse_whitespace(&caps[1])))
        }) else {
            break;
        };
        if !inner.is_empty() {
            notes.push(inner);
        }
        remainder.replace_range(whole, " ");
    }

    // an unclosed group runs to the end of the line
    if let Some(open) = remainder.find('(') {
        let inner = collapse_whitespace(&remainder[open + 1..].replace('(', " "));
        if !inner.is_empty() {
            notes.push(inner);
        }
        remainder.truncate(open);
    }
    let remainder = remainder.replace(')', " ");

    let mut parts = remainder.split(SEPARATORS);
    let first = parts.next().unwrap_or_default();
    let primary = ascii_only(first, fractions);

    if primary.is_empty() {
        // the leading segment was entirely non-Latin: read the whole line instead
        let primary = ascii_only(&remainder.replace(SEPARATORS, " "), fractions);
        return Segments { primary, notes };
    }

    notes.extend(
        parts
            .map(|part| ascii_only(part, fractions))
            .filter(|part| !part.is_empty()),
    );

    Segments { primary, notes }
}

/// Deletes every non-ASCII character except fraction glyphs, then collapses
/// whitespace. Nothing is transliterated.
pub fn ascii_only(text: &str, fractions: &FractionTable) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii() || fractions.is_glyph(*c))
        .collect();
    collapse_whitespace(&kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(line: &str) -> Segments {
        extract_segments(line, &FractionTable::default())
    }

    #[test]
    fn test_parenthetical_notes() {
        let segments = extract("Chicken thigh 500 gm (boneless)");
        assert_eq!(segments.primary, "Chicken thigh 500 gm");
        assert_eq!(segments.note(), "boneless");
    }

    #[test]
    fn test_comma_notes_follow_parenthetical_notes() {
        let segments = extract("2 onions (large), finely sliced, soaked");
        assert_eq!(segments.primary, "2 onions");
        assert_eq!(segments.notes, vec!["large", "finely sliced", "soaked"]);
    }

    #[test]
    fn test_semicolon_separates_notes() {
        let segments = extract("2 eggs; beaten");
        assert_eq!(segments.primary, "2 eggs");
        assert_eq!(segments.notes, vec!["beaten"]);

        let segments = extract("1 cup curd; whisked, chilled");
        assert_eq!(segments.notes, vec!["whisked", "chilled"]);
    }

    #[test]
    fn test_unclosed_parenthesis_becomes_note() {
        let segments = extract("1 cup rice (basmati");
        assert_eq!(segments.primary, "1 cup rice");
        assert_eq!(segments.notes, vec!["basmati"]);

        let segments = extract("1 cup dal (toor (split)");
        assert_eq!(segments.primary, "1 cup dal");
        assert_eq!(segments.notes, vec!["split", "toor"]);

        let segments = extract("2 onions sliced)");
        assert_eq!(segments.primary, "2 onions sliced");
        assert!(segments.notes.is_empty());
    }

    #[test]
    fn test_nested_parentheses() {
        let segments = extract("1 cup dal (toor (split))");
        assert_eq!(segments.primary, "1 cup dal");
        assert_eq!(segments.notes, vec!["split", "toor"]);
    }

    #[test]
    fn test_non_ascii_is_deleted_but_fractions_survive() {
        let segments = extract("½ tsp हल्दी Turmeric powder");
        assert_eq!(segments.primary, "½ tsp Turmeric powder");
    }

    #[test]
    fn test_non_ascii_comma_note_is_dropped() {
        let segments = extract("2 tbsp ghee, घी");
        assert_eq!(segments.primary, "2 tbsp ghee");
        assert!(segments.notes.is_empty());
    }

    #[test]
    fn test_falls_back_to_whole_line_when_first_segment_is_non_latin() {
        let segments = extract("हल्दी पाउडर, turmeric powder ½ tsp");
        assert_eq!(segments.primary, "turmeric powder ½ tsp");
        assert!(segments.notes.is_empty());
    }
}
