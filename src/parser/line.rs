//! One pasted line → one structured ingredient.

use log::debug;

use super::normalize::normalize_line;
use super::quantity::{QuantityHit, QuantityParser};
use super::segments::{ascii_only, extract_segments};
use super::ParseTables;
use crate::model::{format_quantity, ParsedIngredientLine};

/// Leading words that describe preparation rather than the ingredient.
const DESCRIPTIVE_ADJECTIVES: &[&str] = &[
    "dry", "dried", "fresh", "freshly", "finely", "roughly", "chopped", "minced", "sliced",
    "diced", "grated", "crushed", "roasted", "boiled", "frozen", "melted", "softened",
];

const ARTICLES: &[&str] = &["a", "an"];

/// Natural-language phrasings, tried in this order before any quantity scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Idiom {
    /// "A pinch of salt"
    ArticleUnit,
    /// "Salt a pinch"
    TrailingArticleUnit,
    /// "Salt to taste"
    ToTaste,
    /// "Coriander leaves for garnish"
    ForPurpose,
    /// "Ghee + oil"
    Alternatives,
}

pub const IDIOMS: [Idiom; 5] = [
    Idiom::ArticleUnit,
    Idiom::TrailingArticleUnit,
    Idiom::ToTaste,
    Idiom::ForPurpose,
    Idiom::Alternatives,
];

/// How a matched idiom settles the line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum IdiomMatch<'t> {
    /// Nothing left to scan; the line has no quantity
    Complete {
        name: Vec<&'t str>,
        unit: Option<&'static str>,
        note: Option<String>,
    },
    /// A trailing phrase became a note but the head still carries a quantity
    Trailing { head: usize, note: String },
}

/// Quantity scan steps, tried in this order at every token position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStep {
    StuckToken,
    Range,
    Consecutive,
}

pub const SCAN_STEPS: [ScanStep; 3] = [
    ScanStep::StuckToken,
    ScanStep::Range,
    ScanStep::Consecutive,
];

struct LineContext<'t, 'a> {
    tokens: &'t [&'t str],
    primary: &'t str,
    tables: &'a ParseTables,
}

impl Idiom {
    fn detect<'t>(self, ctx: &LineContext<'t, '_>) -> Option<IdiomMatch<'t>> {
        let tokens = ctx.tokens;
        let units = &ctx.tables.units;
        match self {
            Idiom::ArticleUnit => {
                if tokens.len() < 3 || !is_article(tokens[0]) {
                    return None;
                }
                let unit = units.resolve(tokens[1])?;
                let mut rest = &tokens[2..];
                if rest.first().is_some_and(|t| t.eq_ignore_ascii_case("of")) {
                    rest = &rest[1..];
                }
                (!rest.is_empty()).then(|| IdiomMatch::Complete {
                    name: rest.to_vec(),
                    unit: Some(unit),
                    note: None,
                })
            }
            Idiom::TrailingArticleUnit => {
                let n = tokens.len();
                if n < 3 || !is_article(tokens[n - 2]) {
                    return None;
                }
                let unit = units.resolve(tokens[n - 1])?;
                Some(IdiomMatch::Complete {
                    name: tokens[..n - 2].to_vec(),
                    unit: Some(unit),
                    note: None,
                })
            }
            Idiom::ToTaste => {
                let n = tokens.len();
                let ends_to_taste = n >= 3
                    && tokens[n - 2].eq_ignore_ascii_case("to")
                    && tokens[n - 1].eq_ignore_ascii_case("taste");
                ends_to_taste.then(|| ctx.head_with_note(n - 2, "to taste".to_string()))
            }
            Idiom::ForPurpose => {
                let at = tokens
                    .iter()
                    .position(|t| t.eq_ignore_ascii_case("for"))
                    .filter(|at| *at >= 1 && at + 1 < tokens.len())?;
                Some(ctx.head_with_note(at, tokens[at..].join(" ")))
            }
            Idiom::Alternatives => {
                if !ctx.primary.contains('+') || ctx.has_quantity_marks(tokens) {
                    return None;
                }
                let last = ctx.primary.rsplit('+').next()?;
                let word = last.split_whitespace().last()?;
                Some(IdiomMatch::Complete {
                    name: vec![word],
                    unit: None,
                    note: None,
                })
            }
        }
    }
}

impl<'t> LineContext<'t, '_> {
    fn has_quantity_marks(&self, tokens: &[&str]) -> bool {
        tokens.iter().any(|t| {
            t.bytes().any(|b| b.is_ascii_digit()) || self.tables.fractions.contains_fraction(t)
        })
    }

    /// Splits off `tokens[at..]` as a note. Without a quantity in the head the
    /// line is complete; otherwise the head goes on to the quantity scan.
    fn head_with_note(&self, at: usize, note: String) -> IdiomMatch<'t> {
        let head = &self.tokens[..at];
        if self.has_quantity_marks(head) {
            IdiomMatch::Trailing { head: at, note }
        } else {
            IdiomMatch::Complete {
                name: head.to_vec(),
                unit: None,
                note: Some(note),
            }
        }
    }
}

impl ScanStep {
    fn apply(self, parser: &QuantityParser<'_>, tokens: &[&str], i: usize) -> Option<QuantityHit> {
        match self {
            ScanStep::StuckToken => parser
                .parse_stuck_token(tokens[i])
                .map(|(value, unit)| QuantityHit {
                    value,
                    unit: Some(unit),
                    len: 1,
                }),
            ScanStep::Range => parser.parse_range_tokens(tokens, i),
            ScanStep::Consecutive => parser.parse_consecutive_quantities(tokens, i),
        }
    }
}

/// Parses single ingredient lines against a set of lookup tables.
#[derive(Debug, Clone, Copy)]
pub struct IngredientLineParser<'a> {
    tables: &'a ParseTables,
}

impl<'a> IngredientLineParser<'a> {
    pub fn new(tables: &'a ParseTables) -> Self {
        Self { tables }
    }

    /// `None` for blank lines, headers and lines with no usable name.
    pub fn parse(&self, raw: &str) -> Option<ParsedIngredientLine> {
        let normalized = normalize_line(raw);
        if self.is_header(&normalized) {
            debug!("Skipping header line: {}", normalized);
            return None;
        }

        let line = normalized.trim_end_matches(['.', ';']).trim_end();
        if line.is_empty() {
            return None;
        }

        let segments = extract_segments(line, &self.tables.fractions);
        let tokens: Vec<&str> = segments.primary.split_whitespace().collect();
        if tokens.is_empty() {
            return None;
        }

        let mut notes = segments.notes.clone();
        let ctx = LineContext {
            tokens: &tokens,
            primary: &segments.primary,
            tables: self.tables,
        };

        let matched = IDIOMS
            .iter()
            .find_map(|idiom| idiom.detect(&ctx).map(|m| (*idiom, m)));
        if let Some((idiom, _)) = &matched {
            debug!("Line {:?} matched idiom {:?}", line, idiom);
        }

        let scan_tokens = match matched.map(|(_, m)| m) {
            Some(IdiomMatch::Complete { name, unit, note }) => {
                notes.extend(note);
                return self.finish(name, None, unit, notes);
            }
            Some(IdiomMatch::Trailing { head, note }) => {
                notes.push(note);
                &tokens[..head]
            }
            None => &tokens[..],
        };

        let (quantity, unit, consumed) = self.scan_quantity(scan_tokens);
        let name = scan_tokens
            .iter()
            .zip(&consumed)
            .filter(|(_, used)| !**used)
            .map(|(t, _)| *t)
            .collect();

        self.finish(name, quantity, unit, notes)
    }

    fn is_header(&self, normalized: &str) -> bool {
        let headers = &self.tables.headers;
        if headers.is_header(normalized) {
            return true;
        }
        let reduced = ascii_only(normalized, &self.tables.fractions);
        reduced != normalized && headers.is_header(&reduced)
    }

    /// Left-to-right scan for the first quantity, then its unit. A unit is
    /// looked for right after the quantity first, then anywhere in the line
    /// ("Onion ½ cup" and "½ Onion cup" both work).
    fn scan_quantity(&self, tokens: &[&str]) -> (Option<f64>, Option<&'static str>, Vec<bool>) {
        let parser = QuantityParser::new(&self.tables.fractions, &self.tables.units);
        let mut consumed = vec![false; tokens.len()];

        let found = (0..tokens.len()).find_map(|i| {
            SCAN_STEPS
                .iter()
                .find_map(|step| step.apply(&parser, tokens, i))
                .map(|hit| (i, hit))
        });

        let Some((start, hit)) = found else {
            return (None, None, consumed);
        };
        consumed[start..start + hit.len].iter_mut().for_each(|c| *c = true);

        let mut unit = hit.unit;
        if unit.is_none() {
            let next = start + hit.len;
            let units = &self.tables.units;
            let position = tokens
                .get(next)
                .and_then(|t| units.resolve(t))
                .map(|_| next)
                .or_else(|| {
                    (0..tokens.len()).find(|j| !consumed[*j] && units.is_unit(tokens[*j]))
                });
            if let Some(j) = position {
                consumed[j] = true;
                unit = units.resolve(tokens[j]);
            }
        }

        (Some(hit.value), unit, consumed)
    }

    fn finish(
        &self,
        name: Vec<&str>,
        quantity: Option<f64>,
        unit: Option<&'static str>,
        mut notes: Vec<String>,
    ) -> Option<ParsedIngredientLine> {
        let mut words: Vec<String> = name
            .iter()
            .map(|t| t.chars().filter(char::is_ascii).collect::<String>())
            .filter(|t| t.chars().any(|c| c.is_ascii_alphanumeric()))
            .collect();

        if words.len() > 1 && is_count_artifact(&words[0]) {
            words.remove(0);
        }
        while words.len() > 1 && is_descriptive(&words[0]) {
            notes.push(words.remove(0).to_lowercase());
        }

        let ingredient_name = words
            .iter()
            .map(|w| capitalize(w))
            .collect::<Vec<_>>()
            .join(" ");
        if ingredient_name.is_empty() {
            return None;
        }

        Some(ParsedIngredientLine {
            ingredient_name,
            quantity: quantity.map(format_quantity).unwrap_or_default(),
            unit: unit.unwrap_or_default().to_string(),
            note: notes.join(", "),
        })
    }
}

fn is_article(token: &str) -> bool {
    ARTICLES.iter().any(|a| token.eq_ignore_ascii_case(a))
}

fn is_count_artifact(word: &str) -> bool {
    matches!(word.to_lowercase().trim_end_matches('.'), "no" | "nos")
}

fn is_descriptive(word: &str) -> bool {
    let lowered = word.to_lowercase();
    DESCRIPTIVE_ADJECTIVES.contains(&lowered.as_str())
}

fn capitalize(word: &str) -> String {
    let lowered = word.to_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
