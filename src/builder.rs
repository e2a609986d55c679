use std::borrow::Cow;

use crate::config::ImportConfig;
use crate::importer::RecipeImporter;
use crate::parser::ParseTables;
use crate::ImportError;

/// Builder for configuring a [`RecipeImporter`]
///
/// Without any settings the built importer uses the shared built-in tables
/// and accepts 1 to 100 servings.
#[derive(Debug, Default)]
pub struct RecipeImporterBuilder {
    config: Option<ImportConfig>,
    servings_range: Option<(u32, u32)>,
    unit_synonyms: Vec<(String, String)>,
    header_patterns: Vec<String>,
}

impl RecipeImporterBuilder {
    /// Start from a loaded configuration
    ///
    /// # Example
    /// ```
    /// use mealplan_import::{ImportConfig, RecipeImporter};
    ///
    /// let importer = RecipeImporter::builder()
    ///     .config(ImportConfig::default())
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn config(mut self, config: ImportConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the accepted servings range (inclusive)
    ///
    /// Overrides the range from [`config`](Self::config).
    ///
    /// # Example
    /// ```
    /// use mealplan_import::RecipeImporter;
    ///
    /// let importer = RecipeImporter::builder()
    ///     .servings_range(1, 12)
    ///     .build()
    ///     .unwrap();
    /// assert!(importer.parse_servings("13 Servings").is_err());
    /// ```
    pub fn servings_range(mut self, min: u32, max: u32) -> Self {
        self.servings_range = Some((min, max));
        self
    }

    /// Register an extra unit spelling
    ///
    /// # Example
    /// ```
    /// use mealplan_import::RecipeImporter;
    ///
    /// let importer = RecipeImporter::builder()
    ///     .unit_synonym("katori", "cup")
    ///     .build()
    ///     .unwrap();
    /// let line = importer.parse_line("1 katori rice").unwrap();
    /// assert_eq!(line.unit, "cup");
    /// ```
    pub fn unit_synonym(mut self, synonym: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.unit_synonyms.push((synonym.into(), canonical.into()));
        self
    }

    /// Register an extra section header pattern (a case-insensitive regex)
    ///
    /// # Example
    /// ```
    /// use mealplan_import::RecipeImporter;
    ///
    /// let importer = RecipeImporter::builder()
    ///     .header_pattern(r"^zutaten$")
    ///     .build()
    ///     .unwrap();
    /// assert!(importer.parse_line("Zutaten").is_none());
    /// ```
    pub fn header_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.header_patterns.push(pattern.into());
        self
    }

    /// Build the importer
    ///
    /// # Errors
    /// Returns an error if the servings range is empty or starts at zero, or if
    /// a unit synonym or header pattern is invalid.
    pub fn build(self) -> Result<RecipeImporter, ImportError> {
        let config = self.config.unwrap_or_default();
        let (min, max) = self
            .servings_range
            .unwrap_or((config.servings.min, config.servings.max));

        if min == 0 || min > max {
            return Err(ImportError::BuilderError(format!(
                "Servings range {}..={} is invalid: it must start at 1 or more and not be empty",
                min, max
            )));
        }

        let customised = !config.units.synonyms.is_empty()
            || !config.headers.patterns.is_empty()
            || !self.unit_synonyms.is_empty()
            || !self.header_patterns.is_empty();

        let tables = if customised {
            let mut tables = ParseTables::from_config(&config)?;
            for (synonym, canonical) in &self.unit_synonyms {
                tables.units.add_synonym(synonym, canonical)?;
            }
            for pattern in &self.header_patterns {
                tables.headers.add_pattern(pattern)?;
            }
            Cow::Owned(tables)
        } else {
            Cow::Borrowed(ParseTables::standard())
        };

        Ok(RecipeImporter::with_parts(tables, min, max))
    }
}
