use serde::{Deserialize, Serialize};

/// A recipe produced by one successful import.
///
/// Never mutated after construction; a retry produces a fresh one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecipe {
    pub name: String,
    pub servings: u32,
    pub ingredients: Vec<ParsedIngredientLine>,
}

/// One ingredient line as understood by the import parser.
///
/// `quantity` and `unit` are empty strings when the line states none
/// (e.g. "Salt to taste").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedIngredientLine {
    pub ingredient_name: String,
    pub quantity: String,
    pub unit: String,
    pub note: String,
}

impl ParsedIngredientLine {
    /// Numeric value of the quantity, if there is one.
    pub fn quantity_value(&self) -> Option<f64> {
        self.quantity.parse::<f64>().ok()
    }
}

/// Shared ingredient entity referenced by recipes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
}

/// An ingredient row owned by a persisted recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    pub ingredient: Ingredient,
    pub quantity: Option<f64>,
    pub unit: String,
    pub note: String,
}

impl RecipeIngredient {
    /// Quantity rendered with two decimals, or empty when there is none.
    pub fn quantity_label(&self) -> String {
        self.quantity
            .map(|q| format!("{:.2}", q))
            .unwrap_or_default()
    }
}

/// Render a quantity the way imported lines carry it: at most two decimals,
/// no trailing zeros (`0.5`, `500`, `2.33`).
pub fn format_quantity(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // avoids "-0"
        return "0".to_string();
    }
    format!("{}", rounded)
}
