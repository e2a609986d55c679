//! Section header recognition ("Ingredients:", "For Marination:").

use regex::{Regex, RegexBuilder};

use super::normalize::collapse_whitespace;
use crate::ImportError;

const DEFAULT_PATTERNS: &[&str] = &[
    r"^(?:main\s+|other\s+|optional\s+)?ingredients?(?:\s+list)?\s*:?$",
    r"^(?:ingredients?\s+)?for\s+(?:the\s+)?[\p{L}\s&/'-]+:$",
    r"^(?:method|instructions|directions|preparation|steps)\s*:?$",
    r"^\p{L}[\p{L}\s&/'-]*:$",
];

/// Ordered header matchers, all case-insensitive.
#[derive(Debug, Clone)]
pub struct HeaderPatterns {
    patterns: Vec<Regex>,
}

impl Default for HeaderPatterns {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS
                .iter()
                .map(|p| compile(p).expect("built-in header pattern is valid"))
                .collect(),
        }
    }
}

impl HeaderPatterns {
    pub fn add_pattern(&mut self, pattern: &str) -> Result<(), ImportError> {
        let regex = compile(pattern).map_err(|source| ImportError::InvalidHeaderPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.patterns.push(regex);
        Ok(())
    }

    pub fn is_header(&self, line: &str) -> bool {
        let collapsed = collapse_whitespace(line);
        if collapsed.is_empty() {
            return false;
        }
        self.patterns.iter().any(|p| p.is_match(&collapsed))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognises_section_headers() {
        let headers = HeaderPatterns::default();
        assert!(headers.is_header("Ingredients:"));
        assert!(headers.is_header("  INGREDIENTS  "));
        assert!(headers.is_header("For Marination:"));
        assert!(headers.is_header("for   the   garnish :"));
        assert!(headers.is_header("Ingredients for the gravy:"));
        assert!(headers.is_header("Method"));
        assert!(headers.is_header("Tempering:"));
    }

    #[test]
    fn test_ingredient_lines_are_not_headers() {
        let headers = HeaderPatterns::default();
        assert!(!headers.is_header("Salt to taste"));
        assert!(!headers.is_header("2 cups rice"));
        assert!(!headers.is_header("Coriander leaves for garnish"));
        assert!(!headers.is_header("For 4 people:"));
        assert!(!headers.is_header(""));
    }

    #[test]
    fn test_add_pattern() {
        let mut headers = HeaderPatterns::default();
        let before = headers.len();
        headers.add_pattern(r"^zutaten$").unwrap();
        assert_eq!(headers.len(), before + 1);
        assert!(headers.is_header("Zutaten"));

        let err = headers.add_pattern("(unclosed").unwrap_err();
        assert!(matches!(err, ImportError::InvalidHeaderPattern { .. }));
    }
}
