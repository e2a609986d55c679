//! Grocery list for a meal plan: the ingredient rows of every planned
//! recipe summed per ingredient and unit.

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::RecipeIngredient;
use crate::scale::round2;

/// One line of the grocery list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryEntry {
    pub ingredient_id: i64,
    pub ingredient_name: String,
    pub unit: String,
    /// Sum of the stated quantities; `None` when no row stated one ("to taste")
    pub quantity: Option<f64>,
}

/// Sum ingredient rows across recipes.
///
/// Rows are grouped by ingredient id and unit, so `200 g` and `1 cup` of the
/// same ingredient stay separate lines. Entries keep the order in which their
/// group first appears. Sums are rounded to two decimals. An empty recipe
/// (a meal-plan slot with nothing planned) contributes nothing.
pub fn aggregate<'a, I>(recipes: I) -> Vec<GroceryEntry>
where
    I: IntoIterator<Item = &'a [RecipeIngredient]>,
{
    let mut entries: Vec<GroceryEntry> = Vec::new();
    let mut index: HashMap<(i64, String), usize> = HashMap::new();

    for row in recipes.into_iter().flatten() {
        let key = (row.ingredient.id, row.unit.clone());
        match index.get(&key) {
            Some(&at) => {
                let entry = &mut entries[at];
                entry.quantity = match (entry.quantity, row.quantity) {
                    (Some(a), Some(b)) => Some(round2(a + b)),
                    (a, b) => a.or(b),
                };
            }
            None => {
                index.insert(key, entries.len());
                entries.push(GroceryEntry {
                    ingredient_id: row.ingredient.id,
                    ingredient_name: row.ingredient.name.clone(),
                    unit: row.unit.clone(),
                    quantity: row.quantity,
                });
            }
        }
    }

    debug!("Aggregated grocery list into {} entries", entries.len());
    entries
}
