//! Whole-paste import: name line, servings line, ingredient lines.

use std::borrow::Cow;
use std::sync::LazyLock;

use log::{debug, info};
use regex::Regex;

use crate::builder::RecipeImporterBuilder;
use crate::config::ImportConfig;
use crate::model::{ParsedIngredientLine, ParsedRecipe};
use crate::parser::normalize::collapse_whitespace;
use crate::parser::{IngredientLineParser, ParseTables};
use crate::ImportError;

/// name + servings + at least one ingredient
const MIN_LINES: usize = 3;

static SERVINGS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)^([0-9]+)\s*servings?$",
        r"(?i)^servings?\s*:?\s*([0-9]+)$",
        r"(?i)^([0-9]+)\s*serves$",
        r"(?i)^serves\s*:?\s*([0-9]+)$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("servings pattern is valid"))
    .collect()
});

/// Turns pasted recipe text into a [`ParsedRecipe`].
#[derive(Debug, Clone)]
pub struct RecipeImporter {
    tables: Cow<'static, ParseTables>,
    min_servings: u32,
    max_servings: u32,
}

impl Default for RecipeImporter {
    fn default() -> Self {
        let servings = crate::config::ServingsConfig::default();
        Self {
            tables: Cow::Borrowed(ParseTables::standard()),
            min_servings: servings.min,
            max_servings: servings.max,
        }
    }
}

impl RecipeImporter {
    /// Create a new builder for configuring an importer
    ///
    /// # Example
    /// ```
    /// use mealplan_import::RecipeImporter;
    ///
    /// let importer = RecipeImporter::builder()
    ///     .servings_range(1, 12)
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn builder() -> RecipeImporterBuilder {
        RecipeImporterBuilder::default()
    }

    pub fn from_config(config: &ImportConfig) -> Result<Self, ImportError> {
        Self::builder().config(config.clone()).build()
    }

    pub(crate) fn with_parts(
        tables: Cow<'static, ParseTables>,
        min_servings: u32,
        max_servings: u32,
    ) -> Self {
        Self {
            tables,
            min_servings,
            max_servings,
        }
    }

    pub fn tables(&self) -> &ParseTables {
        &self.tables
    }

    pub fn servings_range(&self) -> (u32, u32) {
        (self.min_servings, self.max_servings)
    }

    /// Import a whole paste. Either every part is accepted or an error
    /// describes the first problem; lines that are not ingredients are
    /// dropped silently.
    pub fn import(&self, raw: &str) -> Result<ParsedRecipe, ImportError> {
        if raw.trim().is_empty() {
            return Err(ImportError::EmptyInput);
        }

        let lines: Vec<&str> = raw.lines().collect();
        let found = lines.iter().filter(|l| !l.trim().is_empty()).count();
        if found < MIN_LINES {
            return Err(ImportError::InsufficientLines { found });
        }

        let name = lines[0].trim();
        if name.is_empty() {
            return Err(ImportError::MissingName);
        }

        let servings = self.parse_servings(lines[1])?;

        let ingredients: Vec<ParsedIngredientLine> = lines[2..]
            .iter()
            .filter_map(|line| {
                let parsed = self.parse_line(line);
                if parsed.is_none() && !line.trim().is_empty() {
                    debug!("Dropped line: {}", line.trim());
                }
                parsed
            })
            .collect();

        if ingredients.is_empty() {
            return Err(ImportError::NoValidIngredients);
        }

        info!(
            "Imported \"{}\" ({} servings) with {} ingredients",
            name,
            servings,
            ingredients.len()
        );

        Ok(ParsedRecipe {
            name: name.to_string(),
            servings,
            ingredients,
        })
    }

    pub fn parse_line(&self, line: &str) -> Option<ParsedIngredientLine> {
        IngredientLineParser::new(&self.tables).parse(line)
    }

    /// "4 Servings", "Servings: 4", "4 Serves" or "Serves 4", within the configured range.
    pub fn parse_servings(&self, line: &str) -> Result<u32, ImportError> {
        let collapsed = collapse_whitespace(line);
        SERVINGS_PATTERNS
            .iter()
            .find_map(|p| p.captures(&collapsed))
            .and_then(|caps| caps[1].parse::<u32>().ok())
            .filter(|n| (self.min_servings..=self.max_servings).contains(n))
            .ok_or_else(|| ImportError::InvalidServings {
                line: collapsed.clone(),
                min: self.min_servings,
                max: self.max_servings,
            })
    }
}
