//! Known-ingredient catalog: matching parsed names against existing
//! ingredients and creating the missing ones.
//!
//! The catalog is only consulted after parsing has succeeded. A failure to
//! create an ingredient is reported back as a message; it never invalidates
//! the parsed recipe.

use async_trait::async_trait;
use log::{info, warn};
use tokio::sync::Mutex;

use crate::model::{Ingredient, ParsedIngredientLine, ParsedRecipe, RecipeIngredient};
use crate::ImportError;

/// Collaborator that owns the shared ingredient entities
#[async_trait]
pub trait IngredientCatalog: Send + Sync {
    /// Every known ingredient
    async fn list(&self) -> Result<Vec<Ingredient>, ImportError>;

    /// Create a new ingredient with the given name
    async fn create(&self, name: &str) -> Result<Ingredient, ImportError>;
}

/// Case-insensitive exact match on the trimmed name.
pub fn find_exact<'a>(catalog: &'a [Ingredient], name: &str) -> Option<&'a Ingredient> {
    let wanted = name.trim().to_lowercase();
    catalog
        .iter()
        .find(|i| i.name.trim().to_lowercase() == wanted)
}

/// Autocomplete suggestions: case-insensitive substring matches in catalog order.
pub fn suggestions<'a>(catalog: &'a [Ingredient], input: &str) -> Vec<&'a Ingredient> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    catalog
        .iter()
        .filter(|i| i.name.to_lowercase().contains(&needle))
        .collect()
}

/// Parsed names with no exact catalog match, de-duplicated, first appearance first.
pub fn new_ingredient_names(recipe: &ParsedRecipe, catalog: &[Ingredient]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for line in &recipe.ingredients {
        let name = &line.ingredient_name;
        let seen = names.iter().any(|n| n.eq_ignore_ascii_case(name));
        if !seen && find_exact(catalog, name).is_none() {
            names.push(name.clone());
        }
    }
    names
}

/// Outcome of [`link_ingredients`]
#[derive(Debug, Clone, Default)]
pub struct LinkReport {
    /// Rows ready to be stored with the recipe, in line order
    pub ingredients: Vec<RecipeIngredient>,
    /// Ingredients created along the way
    pub created: Vec<Ingredient>,
    /// Lines whose ingredient could not be created
    pub unresolved: Vec<ParsedIngredientLine>,
    /// User-facing messages for every failed create
    pub messages: Vec<String>,
}

impl LinkReport {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Resolve every parsed line to a catalog ingredient, creating the missing
/// ones. Only a failure to list the catalog is returned as an error.
pub async fn link_ingredients(
    recipe: &ParsedRecipe,
    catalog: &dyn IngredientCatalog,
) -> Result<LinkReport, ImportError> {
    let mut known = catalog.list().await?;
    let mut report = LinkReport::default();

    for name in new_ingredient_names(recipe, &known) {
        match catalog.create(&name).await {
            Ok(ingredient) => {
                info!("Created ingredient '{}' (id {})", ingredient.name, ingredient.id);
                report.created.push(ingredient.clone());
                known.push(ingredient);
            }
            Err(e) => {
                warn!("Failed to add new ingredient '{}': {}", name, e);
                report
                    .messages
                    .push(format!("Failed to add new ingredient '{}': {}", name, e));
            }
        }
    }

    for line in &recipe.ingredients {
        match find_exact(&known, &line.ingredient_name) {
            Some(ingredient) => report.ingredients.push(RecipeIngredient {
                ingredient: ingredient.clone(),
                quantity: line.quantity_value(),
                unit: line.unit.clone(),
                note: line.note.clone(),
            }),
            None => report.unresolved.push(line.clone()),
        }
    }

    Ok(report)
}

/// In-process catalog, ids assigned sequentially from 1
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    ingredients: Mutex<Vec<Ingredient>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ingredients = names
            .into_iter()
            .zip(1..)
            .map(|(name, id)| Ingredient {
                id,
                name: name.into(),
            })
            .collect();
        Self {
            ingredients: Mutex::new(ingredients),
        }
    }
}

#[async_trait]
impl IngredientCatalog for InMemoryCatalog {
    async fn list(&self) -> Result<Vec<Ingredient>, ImportError> {
        Ok(self.ingredients.lock().await.clone())
    }

    async fn create(&self, name: &str) -> Result<Ingredient, ImportError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ImportError::Catalog(
                "Ingredient name must not be empty".to_string(),
            ));
        }

        let mut ingredients = self.ingredients.lock().await;
        if find_exact(&ingredients, name).is_some() {
            return Err(ImportError::Catalog(format!(
                "Ingredient '{}' already exists",
                name
            )));
        }

        let id = ingredients.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        let ingredient = Ingredient {
            id,
            name: name.to_string(),
        };
        ingredients.push(ingredient.clone());
        Ok(ingredient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Ingredient> {
        vec![
            Ingredient {
                id: 1,
                name: "Salt".to_string(),
            },
            Ingredient {
                id: 2,
                name: "Turmeric Powder".to_string(),
            },
            Ingredient {
                id: 3,
                name: "Chilli Powder".to_string(),
            },
        ]
    }

    #[test]
    fn test_find_exact_ignores_case_and_whitespace() {
        let catalog = catalog();
        assert_eq!(find_exact(&catalog, " salt ").unwrap().id, 1);
        assert_eq!(find_exact(&catalog, "TURMERIC POWDER").unwrap().id, 2);
        assert!(find_exact(&catalog, "Turmeric").is_none());
    }

    #[test]
    fn test_suggestions_are_substring_matches() {
        let catalog = catalog();
        let names: Vec<_> = suggestions(&catalog, "powder")
            .into_iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["Turmeric Powder", "Chilli Powder"]);
        assert!(suggestions(&catalog, "  ").is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_catalog_assigns_ids() {
        let catalog = InMemoryCatalog::with_names(["Salt", "Sugar"]);
        let created = catalog.create("Ghee").await.unwrap();
        assert_eq!(created.id, 3);
        assert!(catalog.create("sugar").await.is_err());
        assert!(catalog.create(" ").await.is_err());
        assert_eq!(catalog.list().await.unwrap().len(), 3);
    }
}
