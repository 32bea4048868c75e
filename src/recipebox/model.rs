use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Search-result projection of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    pub category: Option<String>,
    pub area: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub measure: String,
}

impl Ingredient {
    /// "1 cup Flour", or just the name when there is no measure.
    pub fn combined(&self) -> String {
        if self.measure.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.measure, self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub category: String,
    pub area: String,
    pub instructions: String,
    pub thumbnail: String,
    pub tags: Vec<String>,
    pub youtube: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub source: Option<String>,
}

impl Recipe {
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            thumbnail: self.thumbnail.clone(),
            category: non_empty(&self.category),
            area: non_empty(&self.area),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// A recipe the user has favorited.
///
/// Field names on disk follow the external API so that blobs written by
/// earlier clients load unchanged. `date_added` is kept as the stored text;
/// use [`FavoriteRecipe::added_at`] to read it as a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecipe {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "strMealThumb", default, deserialize_with = "null_as_empty")]
    pub thumbnail: String,
    #[serde(rename = "strCategory", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "strArea", default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(rename = "dateAdded", default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,
}

impl FavoriteRecipe {
    pub fn stamped(mut self, now: DateTime<Utc>) -> Self {
        if self.date_added.is_none() {
            self.date_added = Some(now.to_rfc3339_opts(SecondsFormat::Millis, true));
        }
        self
    }

    /// Parses `date_added`. Timestamps without an offset are taken as UTC.
    pub fn added_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.date_added.as_deref()?.trim();
        if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
            return Some(t.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|t| t.and_utc())
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<RecipeSummary> for FavoriteRecipe {
    fn from(summary: RecipeSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            thumbnail: summary.thumbnail,
            category: summary.category,
            area: summary.area,
            date_added: None,
        }
    }
}

impl From<&Recipe> for FavoriteRecipe {
    fn from(recipe: &Recipe) -> Self {
        recipe.summary().into()
    }
}

/// Signed-in user profile as persisted next to the session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}
