//! Quantity recognition.
//!
//! Several written forms are textually ambiguous (`1-2` is a range, not a
//! negative number; `2½` is one mixed number), so the forms are tried in the
//! fixed order of [`QUANTITY_FORMS`] and the first one that accepts a token
//! wins.

use std::sync::LazyLock;

use regex::Regex;

use super::fractions::{FractionMatch, FractionTable};
use super::units::UnitTable;

static RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]*\.?[0-9]+)\s*-\s*([0-9]*\.?[0-9]+)$").expect("range pattern is valid")
});

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*\.?[0-9]+$").expect("decimal pattern is valid"));

static MIXED_FRACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([0-9]+)\s+([0-9]+)/([0-9]+)[a-z]*$").expect("mixed fraction pattern is valid")
});

static SIMPLE_FRACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([0-9]+)/([0-9]+)[a-z]*$").expect("fraction pattern is valid")
});

static STUCK_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]*\.?[0-9]+)(\p{L}+\.?)$").expect("stuck token pattern is valid")
});

const FRACTION_WORDS: &[(&str, f64)] = &[
    ("half", 0.5),
    ("one-half", 0.5),
    ("quarter", 0.25),
    ("one-quarter", 0.25),
    ("fourth", 0.25),
    ("one-fourth", 0.25),
    ("three-quarters", 0.75),
    ("three-fourths", 0.75),
    ("third", 1.0 / 3.0),
    ("one-third", 1.0 / 3.0),
    ("two-thirds", 2.0 / 3.0),
    ("eighth", 0.125),
    ("one-eighth", 0.125),
];

/// The written forms a single token can take, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityForm {
    /// `½`, or an integer glued to a glyph: `2½`
    UnicodeFraction,
    /// `10-12`, resolves to the larger bound
    Range,
    /// `3`, `0.5`, `.75`
    Decimal,
    /// `1 1/2`, `2 3/4th`
    MixedFraction,
    /// `1/4`, `1/4th`
    SimpleFraction,
    /// `half`, `quarter`, `third`
    FractionWord,
}

pub const QUANTITY_FORMS: [QuantityForm; 6] = [
    QuantityForm::UnicodeFraction,
    QuantityForm::Range,
    QuantityForm::Decimal,
    QuantityForm::MixedFraction,
    QuantityForm::SimpleFraction,
    QuantityForm::FractionWord,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityMatch {
    pub value: f64,
    pub form: QuantityForm,
}

impl QuantityForm {
    fn parse(self, token: &str, fractions: &FractionTable) -> Option<f64> {
        match self {
            QuantityForm::UnicodeFraction => unicode_fraction(token, fractions),
            QuantityForm::Range => range(token),
            QuantityForm::Decimal => {
                if DECIMAL.is_match(token) {
                    token.parse().ok()
                } else {
                    None
                }
            }
            QuantityForm::MixedFraction => {
                let caps = MIXED_FRACTION.captures(token)?;
                let whole: f64 = caps[1].parse().ok()?;
                Some(whole + ratio(&caps[2], &caps[3])?)
            }
            QuantityForm::SimpleFraction => {
                let caps = SIMPLE_FRACTION.captures(token)?;
                ratio(&caps[1], &caps[2])
            }
            QuantityForm::FractionWord => {
                let lowered = token.to_lowercase();
                FRACTION_WORDS
                    .iter()
                    .find(|(word, _)| *word == lowered)
                    .map(|(_, value)| *value)
            }
        }
    }
}

/// A quantity read from one or more adjacent tokens, possibly with its unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityHit {
    pub value: f64,
    pub unit: Option<&'static str>,
    /// Number of tokens consumed, starting at the scanned position
    pub len: usize,
}

/// Quantity recognition bound to the lookup tables it reads.
#[derive(Debug, Clone, Copy)]
pub struct QuantityParser<'a> {
    fractions: &'a FractionTable,
    units: &'a UnitTable,
}

impl<'a> QuantityParser<'a> {
    pub fn new(fractions: &'a FractionTable, units: &'a UnitTable) -> Self {
        Self { fractions, units }
    }

    /// First form in [`QUANTITY_FORMS`] that accepts the token.
    pub fn classify(&self, token: &str) -> Option<QuantityMatch> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        QUANTITY_FORMS.iter().find_map(|form| {
            form.parse(token, self.fractions)
                .filter(|value| value.is_finite())
                .map(|value| QuantityMatch { value, form: *form })
        })
    }

    pub fn parse_quantity(&self, token: &str) -> Option<f64> {
        self.classify(token).map(|m| m.value)
    }

    pub fn parse_range(&self, token: &str) -> Option<f64> {
        range(token.trim())
    }

    /// Reads a range at `tokens[i]`, either glued (`2-3`) or spelled over
    /// three tokens (`2 - 3`).
    pub fn parse_range_tokens(&self, tokens: &[&str], i: usize) -> Option<QuantityHit> {
        let low = tokens.get(i)?;
        if let (Some(&"-"), Some(high)) = (tokens.get(i + 1), tokens.get(i + 2)) {
            if let Some(value) = range(&format!("{} - {}", low, high)) {
                return Some(QuantityHit {
                    value,
                    unit: None,
                    len: 3,
                });
            }
        }
        self.parse_range(low).map(|value| QuantityHit {
            value,
            unit: None,
            len: 1,
        })
    }

    /// Reads a quantity at `tokens[i]`, folding a following fractional token
    /// into it: `2` `1/3` and `1` `⅓` are single mixed numbers.
    pub fn parse_consecutive_quantities(&self, tokens: &[&str], i: usize) -> Option<QuantityHit> {
        let first = self.parse_quantity(tokens.get(i)?)?;

        if let Some(next) = tokens.get(i + 1) {
            let bare_glyph = matches!(self.fractions.extract_fraction(next), FractionMatch::Bare(_));
            if let Some(second) = self.parse_quantity(next) {
                if second < 1.0 || bare_glyph {
                    return Some(QuantityHit {
                        value: first + second,
                        unit: None,
                        len: 2,
                    });
                }
            }
        }

        Some(QuantityHit {
            value: first,
            unit: None,
            len: 1,
        })
    }

    /// `500gm`, `12no.`: digits immediately followed by a known unit.
    pub fn parse_stuck_token(&self, token: &str) -> Option<(f64, &'static str)> {
        let caps = STUCK_TOKEN.captures(token.trim())?;
        let unit = self.units.resolve(&caps[2])?;
        let value = caps[1].parse::<f64>().ok().filter(|v| v.is_finite())?;
        Some((value, unit))
    }
}

fn unicode_fraction(token: &str, fractions: &FractionTable) -> Option<f64> {
    match fractions.extract_fraction(token) {
        FractionMatch::Bare(value) => Some(value),
        FractionMatch::Positioned { glyph, value, offset } => {
            let (whole, rest) = token.split_at(offset);
            let glyph_only = rest.len() == glyph.len_utf8();
            if glyph_only && !whole.is_empty() && whole.bytes().all(|b| b.is_ascii_digit()) {
                Some(whole.parse::<f64>().ok()? + value)
            } else {
                None
            }
        }
        FractionMatch::None => None,
    }
}

fn range(token: &str) -> Option<f64> {
    let caps = RANGE.captures(token)?;
    let low: f64 = caps[1].parse().ok()?;
    let high: f64 = caps[2].parse().ok()?;
    Some(low.max(high)).filter(|v| v.is_finite())
}

fn ratio(numerator: &str, denominator: &str) -> Option<f64> {
    let numerator: f64 = numerator.parse().ok()?;
    let denominator: f64 = denominator.parse().ok()?;
    (denominator != 0.0).then(|| numerator / denominator)
}
