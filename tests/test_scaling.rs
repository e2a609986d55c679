use mealplan_import::{rescale, ImportError, Ingredient, RecipeIngredient, ServingScaler};

fn rows() -> Vec<RecipeIngredient> {
    [
        ("Basmati Rice", Some(2.0), "cup", ""),
        ("Chicken Thigh", Some(500.0), "g", "boneless"),
        ("Hung Curd", Some(1.25), "cup", ""),
        ("Turmeric Powder", Some(0.5), "tsp", ""),
        ("Salt", None, "", "to taste"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, quantity, unit, note), id)| RecipeIngredient {
        ingredient: Ingredient {
            id,
            name: name.to_string(),
        },
        quantity,
        unit: unit.to_string(),
        note: note.to_string(),
    })
    .collect()
}

#[test]
fn test_same_servings_is_identity() {
    let rows = rows();
    for n in [1, 4, 7, 100] {
        assert_eq!(rescale(&rows, n, n), rows);
    }
}

#[test]
fn test_doubling_servings_doubles_quantities() {
    let rows = rows();
    let doubled = rescale(&rows, 4, 8);

    for (before, after) in rows.iter().zip(&doubled) {
        match before.quantity {
            Some(q) => assert_eq!(after.quantity, Some(((q * 2.0) * 100.0).round() / 100.0)),
            None => assert_eq!(after, before),
        }
        assert_eq!(after.ingredient, before.ingredient);
        assert_eq!(after.unit, before.unit);
        assert_eq!(after.note, before.note);
    }
}

#[test]
fn test_halving_renders_two_decimals() {
    let scaled = rescale(&rows(), 4, 3);
    assert_eq!(scaled[2].quantity, Some(0.94));
    assert_eq!(scaled[2].quantity_label(), "0.94");
    assert_eq!(scaled[3].quantity_label(), "0.38");
    assert_eq!(scaled[4].quantity_label(), "");
}

#[test]
fn test_zero_original_servings_is_a_no_op() {
    let rows = rows();
    assert_eq!(rescale(&rows, 0, 6), rows);
}

#[test]
fn test_scaler_always_starts_from_the_baseline() {
    let scaler = ServingScaler::new(rows(), 4);
    let results: Vec<_> = [3, 5, 7, 4]
        .iter()
        .map(|n| scaler.scale_to(*n).unwrap())
        .collect();
    assert_eq!(results[0][1].quantity, Some(375.0));
    assert_eq!(results.last().unwrap(), &rows());
}

#[test]
fn test_zero_new_servings_zeroes_quantities() {
    let scaled = rescale(&rows(), 4, 0);
    assert_eq!(scaled[0].quantity, Some(0.0));
    assert_eq!(scaled[4].quantity, None);
}

#[test]
fn test_scaler_refuses_servings_outside_range() {
    let scaler = ServingScaler::new(rows(), 4);
    for n in [0, -4, 101] {
        let err = scaler.scale_to(n).unwrap_err();
        assert!(matches!(err, ImportError::ServingsOutOfRange { .. }), "{}", n);
    }
    assert_eq!(scaler.scale_to(100).unwrap()[1].quantity, Some(12500.0));
}
