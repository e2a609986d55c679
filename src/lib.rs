//! Free-text recipe import for the meal planner.
//!
//! Pasted text of the form
//!
//! ```text
//! Chicken Biryani
//! 4 Servings
//! ½ tsp Turmeric powder
//! Chicken thigh 500 gm (boneless)
//! Salt to taste
//! ```
//!
//! becomes a [`ParsedRecipe`] with one structured line per ingredient. Stored
//! ingredient rows can be rescaled when the serving count changes and summed
//! into a grocery list across a meal plan.
//!
//! ```
//! let recipe = mealplan_import::import_recipe(
//!     "Chicken Biryani\n4 Servings\n½ tsp Turmeric powder\nSalt to taste",
//! )
//! .unwrap();
//! assert_eq!(recipe.servings, 4);
//! assert_eq!(recipe.ingredients[0].unit, "tsp");
//! ```

pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod grocery;
pub mod importer;
pub mod model;
pub mod parser;
pub mod scale;
pub mod uniffi_bindings;

pub use builder::RecipeImporterBuilder;
pub use catalog::{link_ingredients, InMemoryCatalog, IngredientCatalog, LinkReport};
pub use config::ImportConfig;
pub use error::ImportError;
pub use grocery::{aggregate, GroceryEntry};
pub use importer::RecipeImporter;
pub use model::{format_quantity, Ingredient, ParsedIngredientLine, ParsedRecipe, RecipeIngredient};
pub use parser::{is_header, normalize_line, normalize_unit, parse_quantity, ParseTables};
pub use scale::{rescale, ServingScaler};

// Re-export UniFFI bindings
pub use uniffi_bindings::*;

/// Import pasted recipe text with the built-in tables and a 1–100 servings range.
pub fn import_recipe(raw: &str) -> Result<ParsedRecipe, ImportError> {
    RecipeImporter::default().import(raw)
}

/// Parse one ingredient line with the built-in tables; `None` when the line
/// is blank, a header, or carries no usable name.
pub fn parse_ingredient_line(line: &str) -> Option<ParsedIngredientLine> {
    parser::IngredientLineParser::new(ParseTables::standard()).parse(line)
}
