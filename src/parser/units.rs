//! Canonical unit vocabulary and synonym resolution.

use std::collections::HashMap;

use crate::ImportError;

/// Canonical unit codes. Every synonym resolves to one of these.
pub const CANONICAL_UNITS: &[&str] = &[
    "g", "kg", "mg", "ml", "l", "cup", "tbsp", "tsp", "oz", "lb", "pcs", "pinch", "slice", "can",
    "clove", "bunch", "dash", "sprig", "packet", "inch", "stick", "handful", "drop",
];

const SYNONYMS: &[(&str, &str)] = &[
    ("gram", "g"),
    ("grams", "g"),
    ("gramme", "g"),
    ("grammes", "g"),
    ("gm", "g"),
    ("gms", "g"),
    ("gr", "g"),
    ("grm", "g"),
    ("grms", "g"),
    ("kgs", "kg"),
    ("kilo", "kg"),
    ("kilos", "kg"),
    ("kilogram", "kg"),
    ("kilograms", "kg"),
    ("mgs", "mg"),
    ("milligram", "mg"),
    ("milligrams", "mg"),
    ("mls", "ml"),
    ("milliliter", "ml"),
    ("milliliters", "ml"),
    ("millilitre", "ml"),
    ("millilitres", "ml"),
    ("lt", "l"),
    ("ltr", "l"),
    ("ltrs", "l"),
    ("liter", "l"),
    ("liters", "l"),
    ("litre", "l"),
    ("litres", "l"),
    ("cups", "cup"),
    ("cp", "cup"),
    ("tbs", "tbsp"),
    ("tbl", "tbsp"),
    ("tbsps", "tbsp"),
    ("tblsp", "tbsp"),
    ("tbspn", "tbsp"),
    ("tablespoon", "tbsp"),
    ("tablespoons", "tbsp"),
    ("tsps", "tsp"),
    ("tspn", "tsp"),
    ("teaspoon", "tsp"),
    ("teaspoons", "tsp"),
    ("ounce", "oz"),
    ("ounces", "oz"),
    ("lbs", "lb"),
    ("pound", "lb"),
    ("pounds", "lb"),
    ("pc", "pcs"),
    ("piece", "pcs"),
    ("pieces", "pcs"),
    ("no", "pcs"),
    ("nos", "pcs"),
    ("number", "pcs"),
    ("numbers", "pcs"),
    ("pinches", "pinch"),
    ("slices", "slice"),
    ("cans", "can"),
    ("tin", "can"),
    ("tins", "can"),
    ("cloves", "clove"),
    ("bunches", "bunch"),
    ("dashes", "dash"),
    ("sprigs", "sprig"),
    ("packets", "packet"),
    ("pack", "packet"),
    ("packs", "packet"),
    ("pkt", "packet"),
    ("sachet", "packet"),
    ("inches", "inch"),
    ("sticks", "stick"),
    ("handfuls", "handful"),
    ("drops", "drop"),
];

/// Unit vocabulary: canonical codes plus surface spellings.
#[derive(Debug, Clone)]
pub struct UnitTable {
    synonyms: HashMap<String, &'static str>,
}

impl Default for UnitTable {
    fn default() -> Self {
        Self {
            synonyms: SYNONYMS
                .iter()
                .map(|(s, c)| (s.to_string(), *c))
                .collect(),
        }
    }
}

impl UnitTable {
    /// Register an extra spelling for a canonical unit.
    ///
    /// The target has to be a canonical code and the synonym must not shadow
    /// a different canonical code, otherwise resolution would stop being
    /// idempotent.
    pub fn add_synonym(&mut self, synonym: &str, target: &str) -> Result<(), ImportError> {
        let key = synonym.trim().to_lowercase();
        let canonical = canonical_code(&target.trim().to_lowercase()).ok_or_else(|| {
            ImportError::InvalidUnitSynonym {
                synonym: synonym.to_string(),
                target: target.to_string(),
            }
        })?;

        if key.is_empty() || canonical_code(&key).is_some_and(|c| c != canonical) {
            return Err(ImportError::InvalidUnitSynonym {
                synonym: synonym.to_string(),
                target: target.to_string(),
            });
        }

        self.synonyms.insert(key, canonical);
        Ok(())
    }

    /// Resolve a surface spelling to its canonical code.
    ///
    /// `None` means "no unit here", never a failure. A single trailing dot is
    /// forgiven so that `tbsp.` and `no.` resolve.
    pub fn resolve(&self, raw: &str) -> Option<&'static str> {
        let lowered = raw.trim().to_lowercase();
        self.lookup(&lowered).or_else(|| {
            lowered
                .strip_suffix('.')
                .and_then(|stripped| self.lookup(stripped))
        })
    }

    pub fn is_unit(&self, raw: &str) -> bool {
        self.resolve(raw).is_some()
    }

    fn lookup(&self, lowered: &str) -> Option<&'static str> {
        canonical_code(lowered).or_else(|| self.synonyms.get(lowered).copied())
    }
}

fn canonical_code(lowered: &str) -> Option<&'static str> {
    CANONICAL_UNITS.iter().copied().find(|c| *c == lowered)
}
