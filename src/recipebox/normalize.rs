//! # Recipe Normalizer
//!
//! Pure mapping from TheMealDB's wire records to the domain types in
//! [`crate::model`].
//!
//! The external schema stores ingredients as twenty parallel pairs of flat
//! fields (`strIngredient1..20` / `strMeasure1..20`), most of them null or
//! blank. That quirk stays inside this module: [`MealRecord`] keeps the flat
//! fields private and only [`extract_ingredients`] knows how to scan them.
//!
//! Nothing here fails. Missing or blank fields degrade to empty values; deciding
//! that a recipe does not exist is the source client's job.

use crate::model::{Ingredient, Recipe, RecipeSummary};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

pub const MAX_INGREDIENTS: usize = 20;

/// One recipe as returned by the recipe API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealRecord {
    #[serde(rename = "idMeal", default)]
    id: Option<String>,
    #[serde(rename = "strMeal", default)]
    name: Option<String>,
    #[serde(rename = "strCategory", default)]
    category: Option<String>,
    #[serde(rename = "strArea", default)]
    area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strTags", default)]
    tags: Option<String>,
    #[serde(rename = "strYoutube", default)]
    youtube: Option<String>,
    #[serde(rename = "strSource", default)]
    source: Option<String>,
    #[serde(flatten)]
    flat: HashMap<String, Value>,
}

/// Envelope shared by every recipe endpoint. `meals` is null when nothing matched.
#[derive(Debug, Default, Deserialize)]
pub struct MealsResponse {
    #[serde(default)]
    pub meals: Option<Vec<MealRecord>>,
}

impl MealsResponse {
    pub fn into_records(self) -> Vec<MealRecord> {
        self.meals.unwrap_or_default()
    }
}

impl MealRecord {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    fn flat_str(&self, key: &str) -> Option<&str> {
        self.flat.get(key).and_then(Value::as_str)
    }

    fn ingredient(&self, index: usize) -> Option<&str> {
        self.flat_str(&format!("strIngredient{}", index))
    }

    fn measure(&self, index: usize) -> Option<&str> {
        self.flat_str(&format!("strMeasure{}", index))
    }
}

fn text(field: &Option<String>) -> String {
    field.clone().unwrap_or_default()
}

fn optional_text(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Scans the twenty ingredient slots in order, keeping every slot whose name
/// is non-blank. The matching measure is kept even when blank.
pub fn extract_ingredients(record: &MealRecord) -> Vec<Ingredient> {
    (1..=MAX_INGREDIENTS)
        .filter_map(|i| {
            let name = record.ingredient(i)?.trim();
            if name.is_empty() {
                return None;
            }
            let measure = record.measure(i).map(str::trim).unwrap_or("");
            Some(Ingredient {
                name: name.to_string(),
                measure: measure.to_string(),
            })
        })
        .collect()
}

/// Splits the comma-separated tag string. Empty pieces are dropped.
pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|tags| {
        tags.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

pub fn transform_to_recipe(record: &MealRecord) -> Recipe {
    Recipe {
        id: text(&record.id),
        name: text(&record.name),
        category: text(&record.category),
        area: text(&record.area),
        instructions: text(&record.instructions),
        thumbnail: text(&record.thumbnail),
        tags: parse_tags(record.tags.as_deref()),
        youtube: optional_text(&record.youtube),
        ingredients: extract_ingredients(record),
        source: optional_text(&record.source),
    }
}

pub fn transform_to_recipe_summary(record: &MealRecord) -> RecipeSummary {
    RecipeSummary {
        id: text(&record.id),
        name: text(&record.name),
        thumbnail: text(&record.thumbnail),
        category: optional_text(&record.category),
        area: optional_text(&record.area),
    }
}
