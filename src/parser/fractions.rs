//! Unicode vulgar fractions.

use std::collections::HashMap;

const GLYPHS: &[(char, f64)] = &[
    ('¼', 0.25),
    ('½', 0.5),
    ('¾', 0.75),
    ('⅐', 1.0 / 7.0),
    ('⅑', 1.0 / 9.0),
    ('⅒', 0.1),
    ('⅓', 1.0 / 3.0),
    ('⅔', 2.0 / 3.0),
    ('⅕', 0.2),
    ('⅖', 0.4),
    ('⅗', 0.6),
    ('⅘', 0.8),
    ('⅙', 1.0 / 6.0),
    ('⅚', 5.0 / 6.0),
    ('⅛', 0.125),
    ('⅜', 0.375),
    ('⅝', 0.625),
    ('⅞', 0.875),
];

/// Result of looking for a fraction glyph in a piece of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FractionMatch {
    None,
    /// The whole (trimmed) text is a single glyph
    Bare(f64),
    /// A glyph somewhere inside the text; `offset` is a byte offset
    Positioned { glyph: char, value: f64, offset: usize },
}

/// Read-only glyph → value table.
#[derive(Debug, Clone)]
pub struct FractionTable {
    glyphs: HashMap<char, f64>,
}

impl Default for FractionTable {
    fn default() -> Self {
        Self {
            glyphs: GLYPHS.iter().copied().collect(),
        }
    }
}

impl FractionTable {
    pub fn value_of(&self, glyph: char) -> Option<f64> {
        self.glyphs.get(&glyph).copied()
    }

    pub fn is_glyph(&self, c: char) -> bool {
        self.glyphs.contains_key(&c)
    }

    pub fn contains_fraction(&self, text: &str) -> bool {
        text.chars().any(|c| self.is_glyph(c))
    }

    /// Exact single-glyph match first, then the first glyph found by scanning.
    pub fn extract_fraction(&self, text: &str) -> FractionMatch {
        let trimmed = text.trim();
        let mut chars = trimmed.chars();
        if let (Some(only), None) = (chars.next(), chars.next()) {
            if let Some(value) = self.value_of(only) {
                return FractionMatch::Bare(value);
            }
        }

        text.char_indices()
            .find_map(|(offset, glyph)| {
                self.value_of(glyph).map(|value| FractionMatch::Positioned {
                    glyph,
                    value,
                    offset,
                })
            })
            .unwrap_or(FractionMatch::None)
    }
}
