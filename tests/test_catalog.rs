use async_trait::async_trait;
use mealplan_import::catalog::new_ingredient_names;
use mealplan_import::{
    import_recipe, link_ingredients, ImportError, InMemoryCatalog, Ingredient, IngredientCatalog,
};

const PASTE: &str = "Jeera Rice
Serves 3
1 cup basmati rice
1 tsp cumin seeds
2 tbsp ghee
Salt to taste
1/2 tsp CUMIN SEEDS
";

/// Catalog whose create call always fails, like an offline backend
struct ReadOnlyCatalog {
    known: Vec<Ingredient>,
}

#[async_trait]
impl IngredientCatalog for ReadOnlyCatalog {
    async fn list(&self) -> Result<Vec<Ingredient>, ImportError> {
        Ok(self.known.clone())
    }

    async fn create(&self, _name: &str) -> Result<Ingredient, ImportError> {
        Err(ImportError::Catalog("service unavailable".to_string()))
    }
}

/// Catalog that cannot even be listed
struct OfflineCatalog;

#[async_trait]
impl IngredientCatalog for OfflineCatalog {
    async fn list(&self) -> Result<Vec<Ingredient>, ImportError> {
        Err(ImportError::Catalog("connection refused".to_string()))
    }

    async fn create(&self, _name: &str) -> Result<Ingredient, ImportError> {
        Err(ImportError::Catalog("connection refused".to_string()))
    }
}

#[test]
fn test_new_names_are_deduplicated() {
    let recipe = import_recipe(PASTE).unwrap();
    let known = vec![Ingredient {
        id: 1,
        name: "salt".to_string(),
    }];
    assert_eq!(
        new_ingredient_names(&recipe, &known),
        vec!["Basmati Rice", "Cumin Seeds", "Ghee"]
    );
}

#[tokio::test]
async fn test_link_creates_missing_ingredients_once() {
    let recipe = import_recipe(PASTE).unwrap();
    let catalog = InMemoryCatalog::with_names(["Salt", "Ghee"]);

    let report = link_ingredients(&recipe, &catalog).await.unwrap();

    assert!(report.is_complete());
    assert!(report.messages.is_empty());
    let created: Vec<_> = report.created.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(created, vec!["Basmati Rice", "Cumin Seeds"]);

    assert_eq!(report.ingredients.len(), recipe.ingredients.len());
    assert_eq!(report.ingredients[0].quantity, Some(1.0));
    assert_eq!(report.ingredients[2].ingredient.id, 2);
    assert_eq!(report.ingredients[3].quantity, None);
    assert_eq!(report.ingredients[3].note, "to taste");
    // both cumin lines share one entity
    assert_eq!(
        report.ingredients[1].ingredient.id,
        report.ingredients[4].ingredient.id
    );
    assert_eq!(catalog.list().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_failed_create_does_not_invalidate_the_recipe() {
    let recipe = import_recipe(PASTE).unwrap();
    let catalog = ReadOnlyCatalog {
        known: vec![Ingredient {
            id: 9,
            name: "Salt".to_string(),
        }],
    };

    let report = link_ingredients(&recipe, &catalog).await.unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.ingredients.len(), 1);
    assert_eq!(report.ingredients[0].ingredient.id, 9);
    assert_eq!(report.unresolved.len(), 4);
    assert_eq!(report.messages.len(), 3);
    assert!(report.messages[0].starts_with("Failed to add new ingredient 'Basmati Rice'"));
    assert!(report.messages[0].contains("service unavailable"));

    // the parsed recipe is untouched and still complete
    assert_eq!(recipe.ingredients.len(), 5);
}

#[tokio::test]
async fn test_unlistable_catalog_is_an_error() {
    let recipe = import_recipe(PASTE).unwrap();
    let result = link_ingredients(&recipe, &OfflineCatalog).await;
    assert!(matches!(result, Err(ImportError::Catalog(_))));
}
