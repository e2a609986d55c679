use log::{debug, error};
use std::env;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use mealplan_import::{
    Ingredient, ImportConfig, ImportError, RecipeImporter, RecipeIngredient, ServingScaler,
};

const USAGE: &str = "Usage: mealplan-import <file|-> [servings]";

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<String, ImportError> {
    // Get the input path (or "-" for stdin) and optional target servings
    let args: Vec<String> = env::args().collect();
    let path = args
        .get(1)
        .ok_or_else(|| ImportError::BuilderError(USAGE.to_string()))?;
    let target = args
        .get(2)
        .map(|s| {
            s.parse::<i32>()
                .map_err(|_| ImportError::BuilderError(format!("Invalid servings '{}'. {}", s, USAGE)))
        })
        .transpose()?;

    let text = if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)?
    };

    let config = ImportConfig::load()?;
    let importer = RecipeImporter::from_config(&config)?;
    let recipe = importer.import(&text)?;
    debug!("{:#?}", recipe);

    let Some(servings) = target else {
        return Ok(serde_json::to_string_pretty(&recipe)?);
    };

    // No catalog here: rows get placeholder ids in line order
    let rows: Vec<RecipeIngredient> = recipe
        .ingredients
        .iter()
        .zip(1..)
        .map(|(line, id)| RecipeIngredient {
            ingredient: Ingredient {
                id,
                name: line.ingredient_name.clone(),
            },
            quantity: line.quantity_value(),
            unit: line.unit.clone(),
            note: line.note.clone(),
        })
        .collect();

    let original = i32::try_from(recipe.servings).unwrap_or(i32::MAX);
    let (min, max) = importer.servings_range();
    let scaled = ServingScaler::new(rows, original)
        .with_range(min, max)
        .scale_to(servings)?;
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "name": recipe.name,
        "servings": servings,
        "ingredients": scaled,
    }))?)
}
