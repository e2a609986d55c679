//! UniFFI bindings for mealplan-import
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! Parsing and scaling are synchronous, so no runtime is needed on the FFI side.

use std::fmt;

use crate::{
    GroceryEntry, Ingredient, ImportError, ParsedIngredientLine, ParsedRecipe, RecipeIngredient,
};

// Re-export UniFFI macro
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible parsed recipe
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiParsedRecipe {
    pub name: String,
    pub servings: u32,
    pub ingredients: Vec<FfiIngredientLine>,
}

/// FFI-compatible ingredient line; empty strings stand for "not stated"
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiIngredientLine {
    pub ingredient_name: String,
    pub quantity: String,
    pub unit: String,
    pub note: String,
}

/// FFI-compatible stored ingredient row
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipeIngredient {
    pub ingredient_id: i64,
    pub ingredient_name: String,
    pub quantity: Option<f64>,
    pub unit: String,
    pub note: String,
}

/// FFI-compatible grocery list line
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiGroceryEntry {
    pub ingredient_id: i64,
    pub ingredient_name: String,
    pub unit: String,
    pub quantity: Option<f64>,
}

impl From<GroceryEntry> for FfiGroceryEntry {
    fn from(entry: GroceryEntry) -> Self {
        FfiGroceryEntry {
            ingredient_id: entry.ingredient_id,
            ingredient_name: entry.ingredient_name,
            unit: entry.unit,
            quantity: entry.quantity,
        }
    }
}

impl From<ParsedIngredientLine> for FfiIngredientLine {
    fn from(line: ParsedIngredientLine) -> Self {
        FfiIngredientLine {
            ingredient_name: line.ingredient_name,
            quantity: line.quantity,
            unit: line.unit,
            note: line.note,
        }
    }
}

impl From<ParsedRecipe> for FfiParsedRecipe {
    fn from(recipe: ParsedRecipe) -> Self {
        FfiParsedRecipe {
            name: recipe.name,
            servings: recipe.servings,
            ingredients: recipe.ingredients.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<RecipeIngredient> for FfiRecipeIngredient {
    fn from(row: RecipeIngredient) -> Self {
        FfiRecipeIngredient {
            ingredient_id: row.ingredient.id,
            ingredient_name: row.ingredient.name,
            quantity: row.quantity,
            unit: row.unit,
            note: row.note,
        }
    }
}

impl From<FfiRecipeIngredient> for RecipeIngredient {
    fn from(ffi: FfiRecipeIngredient) -> Self {
        RecipeIngredient {
            ingredient: Ingredient {
                id: ffi.ingredient_id,
                name: ffi.ingredient_name,
            },
            quantity: ffi.quantity,
            unit: ffi.unit,
            note: ffi.note,
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiImportError {
    /// The pasted text could not be imported; `message` is user-facing
    InvalidInput { message: String },
    /// Importer configuration error
    ConfigError { message: String },
    /// Any other failure
    Other { message: String },
}

impl fmt::Display for FfiImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiImportError::InvalidInput { message } => write!(f, "{}", message),
            FfiImportError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiImportError::Other { message } => write!(f, "Error: {}", message),
        }
    }
}

impl std::error::Error for FfiImportError {}

impl From<ImportError> for FfiImportError {
    fn from(err: ImportError) -> Self {
        let message = err.to_string();
        match err {
            ImportError::EmptyInput
            | ImportError::InsufficientLines { .. }
            | ImportError::MissingName
            | ImportError::InvalidServings { .. }
            | ImportError::ServingsOutOfRange { .. }
            | ImportError::NoValidIngredients => FfiImportError::InvalidInput { message },
            ImportError::InvalidHeaderPattern { .. }
            | ImportError::InvalidUnitSynonym { .. }
            | ImportError::BuilderError(_)
            | ImportError::ConfigError(_) => FfiImportError::ConfigError { message },
            ImportError::Catalog(_) | ImportError::Io(_) | ImportError::Json(_) => {
                FfiImportError::Other { message }
            }
        }
    }
}

/// Import pasted recipe text
///
/// # Arguments
/// * `text` - The pasted recipe: name line, servings line, ingredient lines
///
/// # Returns
/// An `FfiParsedRecipe`, or an `InvalidInput` error carrying the message to show
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn import_recipe_text(text: String) -> Result<FfiParsedRecipe, FfiImportError> {
    Ok(crate::import_recipe(&text)?.into())
}

/// Parse a single ingredient line; `None` when the line is skipped
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn parse_ingredient_text(line: String) -> Option<FfiIngredientLine> {
    crate::parse_ingredient_line(&line).map(Into::into)
}

/// Rescale stored ingredient rows from `original_servings` to `new_servings`
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn rescale_ingredients(
    ingredients: Vec<FfiRecipeIngredient>,
    original_servings: i32,
    new_servings: i32,
) -> Vec<FfiRecipeIngredient> {
    let rows: Vec<RecipeIngredient> = ingredients.into_iter().map(Into::into).collect();
    crate::rescale(&rows, original_servings, new_servings)
        .into_iter()
        .map(Into::into)
        .collect()
}

/// Grocery list for a meal plan, one inner list per planned recipe
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn aggregate_grocery_list(recipes: Vec<Vec<FfiRecipeIngredient>>) -> Vec<FfiGroceryEntry> {
    let recipes: Vec<Vec<RecipeIngredient>> = recipes
        .into_iter()
        .map(|rows| rows.into_iter().map(Into::into).collect())
        .collect();
    crate::aggregate(recipes.iter().map(Vec::as_slice))
        .into_iter()
        .map(Into::into)
        .collect()
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
