//! # Recipe Source Client
//!
//! Thin async wrapper over TheMealDB's JSON endpoints. Each public call makes
//! at most one request, normalizes the response, and classifies failures:
//!
//! - bad input is rejected locally with a validation error, before any I/O;
//! - an empty search is a success with zero results;
//! - an empty or 404 lookup is [`RecipeBoxError::NotFound`];
//! - everything else is a transport error (timeout, network, server, generic).
//!
//! There are no retries. Callers decide whether to offer the user another try
//! (see [`RecipeBoxError::is_retryable`]).

use crate::error::{RecipeBoxError, Result, TransportKind};
use crate::model::{Recipe, RecipeSummary};
use crate::normalize::{transform_to_recipe, transform_to_recipe_summary, MealsResponse};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const MAX_QUERY_CHARS: usize = 100;

pub const EMPTY_QUERY: &str = "Please enter a search keyword.";
pub const INVALID_QUERY: &str = "Search query must be between 1 and 100 characters.";
pub const EMPTY_ID: &str = "Valid recipe ID is required.";
pub const INVALID_ID: &str = "Invalid recipe ID format.";
pub const INVALID_LETTER: &str = "Letter must be a single alphabetic character.";
pub const RECIPE_NOT_FOUND: &str = "Recipe not found.";
pub const TIMEOUT_ERROR: &str = "Request timed out. Please try again.";
pub const NETWORK_ERROR: &str = "Network error. Please check your connection.";
pub const SERVER_ERROR: &str = "Server error. Please try again later.";
pub const SEARCH_FAILED: &str = "Failed to search recipes. Please try again.";
pub const LOOKUP_FAILED: &str = "Failed to retrieve recipe. Please try again.";

/// Trims the keyword and checks it is 1..=100 characters.
pub fn validate_search_query(keyword: &str) -> Result<&str> {
    let trimmed = keyword.trim();
    if trimmed.is_empty() {
        return Err(RecipeBoxError::validation("INVALID_QUERY", EMPTY_QUERY));
    }
    if trimmed.chars().count() > MAX_QUERY_CHARS {
        return Err(RecipeBoxError::validation("INVALID_QUERY", INVALID_QUERY));
    }
    Ok(trimmed)
}

/// Trims the id; with `strict`, also requires it to be all digits.
pub fn validate_recipe_id(id: &str, strict: bool) -> Result<&str> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(RecipeBoxError::validation("INVALID_ID", EMPTY_ID));
    }
    if strict && !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(RecipeBoxError::validation("INVALID_ID", INVALID_ID));
    }
    Ok(trimmed)
}

pub fn validate_letter(letter: &str) -> Result<char> {
    let mut chars = letter.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_lowercase()),
        _ => Err(RecipeBoxError::validation("INVALID_LETTER", INVALID_LETTER)),
    }
}

/// What a failed call was trying to do; picks the generic failure message.
#[derive(Debug, Clone, Copy)]
enum Operation {
    Search,
    Lookup,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Operation::Search => SEARCH_FAILED,
            Operation::Lookup => LOOKUP_FAILED,
        }
    }
}

fn classify_error(err: &reqwest::Error, op: Operation) -> RecipeBoxError {
    if err.is_timeout() {
        RecipeBoxError::transport(TransportKind::Timeout, TIMEOUT_ERROR)
    } else if err.is_connect() || (err.is_request() && err.status().is_none()) {
        RecipeBoxError::transport(TransportKind::Network, NETWORK_ERROR)
    } else {
        RecipeBoxError::transport(TransportKind::Generic, op.failure_message())
    }
}

fn classify_status(status: StatusCode, op: Operation) -> RecipeBoxError {
    if status.is_server_error() {
        RecipeBoxError::transport(TransportKind::Server, SERVER_ERROR)
    } else if status == StatusCode::NOT_FOUND && matches!(op, Operation::Lookup) {
        RecipeBoxError::NotFound(RECIPE_NOT_FOUND.to_string())
    } else {
        RecipeBoxError::transport(TransportKind::Generic, op.failure_message())
    }
}

#[derive(Debug, Clone)]
pub struct RecipeClient {
    http: Client,
    base_url: String,
    strict_ids: bool,
}

impl RecipeClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RecipeBoxError::Config(format!("could not build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            strict_ids: true,
        })
    }

    /// Whether ids must be numeric before a lookup is attempted.
    pub fn with_strict_ids(mut self, strict: bool) -> Self {
        self.strict_ids = strict;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn search_recipes(&self, keyword: &str) -> Result<Vec<RecipeSummary>> {
        let keyword = validate_search_query(keyword)?;
        let response = self
            .fetch("search.php", &[("s", keyword)], Operation::Search)
            .await?;
        let recipes: Vec<_> = response
            .into_records()
            .iter()
            .map(transform_to_recipe_summary)
            .collect();
        debug!(keyword, count = recipes.len(), "search finished");
        Ok(recipes)
    }

    pub async fn search_by_first_letter(&self, letter: &str) -> Result<Vec<RecipeSummary>> {
        let letter = validate_letter(letter)?.to_string();
        let response = self
            .fetch("search.php", &[("f", letter.as_str())], Operation::Search)
            .await?;
        Ok(response
            .into_records()
            .iter()
            .map(transform_to_recipe_summary)
            .collect())
    }

    pub async fn get_recipe_by_id(&self, id: &str) -> Result<Recipe> {
        let id = validate_recipe_id(id, self.strict_ids)?;
        let response = self
            .fetch("lookup.php", &[("i", id)], Operation::Lookup)
            .await?;
        first_recipe(response).inspect_err(|_| debug!(id, "recipe not found"))
    }

    pub async fn random_recipe(&self) -> Result<Recipe> {
        let response = self.fetch("random.php", &[], Operation::Lookup).await?;
        first_recipe(response)
    }

    async fn fetch(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        op: Operation,
    ) -> Result<MealsResponse> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, ?query, "recipe API request");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                warn!(%url, error = %e, "recipe API request failed");
                classify_error(&e, op)
            })?;

        let status = response.status();
        debug!(%url, %status, "recipe API response");
        if !status.is_success() {
            let err = classify_status(status, op);
            if err.is_retryable() {
                warn!(%url, %status, "recipe API returned an error status");
            }
            return Err(err);
        }

        response.json::<MealsResponse>().await.map_err(|e| {
            warn!(%url, error = %e, "could not decode recipe API response");
            classify_error(&e, op)
        })
    }
}

fn first_recipe(response: MealsResponse) -> Result<Recipe> {
    response
        .into_records()
        .first()
        .map(transform_to_recipe)
        .ok_or_else(|| RecipeBoxError::NotFound(RECIPE_NOT_FOUND.to_string()))
}
