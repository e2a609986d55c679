//! Support for rescaling a recipe's ingredient quantities by servings

use log::debug;

use crate::config::ServingsConfig;
use crate::model::RecipeIngredient;
use crate::ImportError;

/// Rescale every numeric quantity by `new_servings / original_servings`,
/// rounded to two decimals. Rows without a quantity pass through unchanged.
///
/// A non-positive `original_servings` makes the factor 1. `new_servings` is
/// taken as given; use [`ServingScaler::scale_to`] to have it range-checked.
/// Applying this to already-rescaled rows compounds rounding; rescale from the
/// originally stored quantities instead (see [`ServingScaler`]).
pub fn rescale(
    ingredients: &[RecipeIngredient],
    original_servings: i32,
    new_servings: i32,
) -> Vec<RecipeIngredient> {
    let factor = scale_factor(original_servings, new_servings);
    debug!(
        "Rescaling {} ingredients from {} to {} servings (factor {})",
        ingredients.len(),
        original_servings,
        new_servings,
        factor
    );

    ingredients
        .iter()
        .map(|row| RecipeIngredient {
            quantity: row.quantity.map(|q| round2(q * factor)),
            ..row.clone()
        })
        .collect()
}

fn scale_factor(original_servings: i32, new_servings: i32) -> f64 {
    if original_servings <= 0 {
        1.0
    } else {
        f64::from(new_servings) / f64::from(original_servings)
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Holds the quantities captured when a recipe was loaded and rescales from
/// them every time, so repeated serving changes never accumulate rounding.
#[derive(Debug, Clone)]
pub struct ServingScaler {
    baseline: Vec<RecipeIngredient>,
    servings: i32,
    min_servings: u32,
    max_servings: u32,
}

impl ServingScaler {
    /// Scaler accepting the default 1–100 servings range.
    pub fn new(ingredients: Vec<RecipeIngredient>, servings: i32) -> Self {
        let range = ServingsConfig::default();
        Self {
            baseline: ingredients,
            servings,
            min_servings: range.min,
            max_servings: range.max,
        }
    }

    /// Accept `min..=max` servings instead of the default range.
    pub fn with_range(mut self, min: u32, max: u32) -> Self {
        self.min_servings = min;
        self.max_servings = max;
        self
    }

    pub fn baseline(&self) -> &[RecipeIngredient] {
        &self.baseline
    }

    pub fn servings(&self) -> i32 {
        self.servings
    }

    pub fn servings_range(&self) -> (u32, u32) {
        (self.min_servings, self.max_servings)
    }

    /// Baseline quantities rescaled to `new_servings`, which must lie in the
    /// accepted range.
    pub fn scale_to(&self, new_servings: i32) -> Result<Vec<RecipeIngredient>, ImportError> {
        let in_range = u32::try_from(new_servings)
            .is_ok_and(|n| (self.min_servings..=self.max_servings).contains(&n));
        if !in_range {
            return Err(ImportError::ServingsOutOfRange {
                servings: new_servings,
                min: self.min_servings,
                max: self.max_servings,
            });
        }
        Ok(rescale(&self.baseline, self.servings, new_servings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ingredient;

    fn row(name: &str, quantity: Option<f64>, unit: &str) -> RecipeIngredient {
        RecipeIngredient {
            ingredient: Ingredient {
                id: 1,
                name: name.to_string(),
            },
            quantity,
            unit: unit.to_string(),
            note: String::new(),
        }
    }

    #[test]
    fn test_doubling() {
        let rows = vec![row("Rice", Some(1.25), "cup"), row("Salt", None, "")];
        let scaled = rescale(&rows, 2, 4);
        assert_eq!(scaled[0].quantity, Some(2.5));
        assert_eq!(scaled[1].quantity, None);
        assert_eq!(scaled[1], rows[1]);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        let rows = vec![row("Oil", Some(1.0), "tbsp")];
        assert_eq!(rescale(&rows, 3, 1)[0].quantity, Some(0.33));
        assert_eq!(rescale(&rows, 3, 2)[0].quantity, Some(0.67));
    }

    #[test]
    fn test_identity() {
        let rows = vec![row("Rice", Some(2.0), "cup"), row("Ghee", Some(0.5), "tbsp")];
        assert_eq!(rescale(&rows, 4, 4), rows);
    }

    #[test]
    fn test_non_positive_original_is_a_no_op() {
        let rows = vec![row("Rice", Some(2.0), "cup")];
        assert_eq!(rescale(&rows, 0, 4), rows);
        assert_eq!(rescale(&rows, -2, 4), rows);
    }

    #[test]
    fn test_new_servings_follow_the_formula() {
        let rows = vec![row("Rice", Some(2.0), "cup")];
        assert_eq!(rescale(&rows, 4, 0)[0].quantity, Some(0.0));
        assert_eq!(rescale(&rows, 4, 1000)[0].quantity, Some(500.0));
    }

    #[test]
    fn test_scaler_rescales_from_baseline() {
        let scaler = ServingScaler::new(vec![row("Oil", Some(1.0), "tbsp")], 3);

        // 3 -> 1 -> 3 through the baseline gets back exactly 1.0
        assert_eq!(scaler.scale_to(1).unwrap()[0].quantity, Some(0.33));
        assert_eq!(scaler.scale_to(3).unwrap()[0].quantity, Some(1.0));

        // compounding through the displayed value drifts
        let compounded = rescale(&scaler.scale_to(1).unwrap(), 1, 3);
        assert_eq!(compounded[0].quantity, Some(0.99));
        assert_eq!(scaler.servings(), 3);
        assert_eq!(scaler.baseline().len(), 1);
    }

    #[test]
    fn test_scaler_rejects_servings_out_of_range() {
        let scaler = ServingScaler::new(vec![row("Rice", Some(2.0), "cup")], 4);
        assert_eq!(scaler.servings_range(), (1, 100));

        for n in [0, -4, 101, 1000] {
            match scaler.scale_to(n) {
                Err(ImportError::ServingsOutOfRange { servings, min, max }) => {
                    assert_eq!((servings, min, max), (n, 1, 100));
                }
                other => panic!("{} servings gave {:?}", n, other),
            }
        }

        let err = scaler.scale_to(0).unwrap_err();
        assert_eq!(err.to_string(), "Servings must be between 1 and 100, got 0");
    }

    #[test]
    fn test_scaler_with_custom_range() {
        let scaler = ServingScaler::new(vec![row("Rice", Some(2.0), "cup")], 4).with_range(2, 8);
        assert!(scaler.scale_to(1).is_err());
        assert_eq!(scaler.scale_to(8).unwrap()[0].quantity, Some(4.0));
        assert!(scaler.scale_to(9).is_err());
    }
}
