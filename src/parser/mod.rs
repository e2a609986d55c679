pub mod fractions;
pub mod headers;
pub mod line;
pub mod normalize;
pub mod quantity;
pub mod segments;
pub mod units;

use std::sync::LazyLock;

use log::debug;

pub use self::fractions::{FractionMatch, FractionTable};
pub use self::headers::HeaderPatterns;
pub use self::line::IngredientLineParser;
pub use self::normalize::normalize_line;
pub use self::quantity::{QuantityForm, QuantityParser};
pub use self::segments::{extract_segments, Segments};
pub use self::units::UnitTable;

use crate::config::ImportConfig;
use crate::ImportError;

static STANDARD: LazyLock<ParseTables> = LazyLock::new(ParseTables::default);

/// The lookup tables every parsing call reads.
///
/// Built once and never mutated afterwards, so a shared reference can be
/// used from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct ParseTables {
    pub units: UnitTable,
    pub fractions: FractionTable,
    pub headers: HeaderPatterns,
}

impl ParseTables {
    /// Built-in tables, shared process-wide.
    pub fn standard() -> &'static ParseTables {
        &STANDARD
    }

    /// Built-in tables extended with the configured synonyms and header patterns.
    pub fn from_config(config: &ImportConfig) -> Result<Self, ImportError> {
        let mut tables = ParseTables::default();

        // sorted so that a failing entry is reported deterministically
        let mut synonyms: Vec<_> = config.units.synonyms.iter().collect();
        synonyms.sort();
        for (synonym, target) in synonyms {
            debug!("Adding unit synonym {} -> {}", synonym, target);
            tables.units.add_synonym(synonym, target)?;
        }

        for pattern in &config.headers.patterns {
            debug!("Adding header pattern {}", pattern);
            tables.headers.add_pattern(pattern)?;
        }

        Ok(tables)
    }

    /// Canonical unit code for `raw`, or an empty string when it is not a unit.
    pub fn normalize_unit(&self, raw: &str) -> String {
        self.units.resolve(raw).unwrap_or_default().to_string()
    }
}

/// [`ParseTables::normalize_unit`] against the built-in tables.
pub fn normalize_unit(raw: &str) -> String {
    ParseTables::standard().normalize_unit(raw)
}

/// Whether `line` is a section header under the built-in patterns.
pub fn is_header(line: &str) -> bool {
    ParseTables::standard().headers.is_header(line)
}

/// [`QuantityParser::parse_quantity`] against the built-in tables.
pub fn parse_quantity(token: &str) -> Option<f64> {
    let tables = ParseTables::standard();
    QuantityParser::new(&tables.fractions, &tables.units).parse_quantity(token)
}
