use crate::config::RecipeBoxConfig;
use crate::model::{FavoriteRecipe, Recipe, RecipeSummary, User};

pub mod auth;
pub mod config;
pub mod favorites;
pub mod search;
pub mod show;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A recipe opened for reading, with its instructions already split into steps.
#[derive(Debug, Clone)]
pub struct RecipeView {
    pub recipe: Recipe,
    pub steps: Vec<String>,
    pub is_favorite: bool,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub recipes: Vec<RecipeSummary>,
    pub recipe: Option<RecipeView>,
    pub favorites: Vec<FavoriteRecipe>,
    pub count: Option<usize>,
    pub user: Option<User>,
    pub config: Option<RecipeBoxConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_recipes(mut self, recipes: Vec<RecipeSummary>) -> Self {
        self.recipes = recipes;
        self
    }

    pub fn with_recipe(mut self, view: RecipeView) -> Self {
        self.recipe = Some(view);
        self
    }

    pub fn with_favorites(mut self, favorites: Vec<FavoriteRecipe>) -> Self {
        self.favorites = favorites;
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_config(mut self, config: RecipeBoxConfig) -> Self {
        self.config = Some(config);
        self
    }
}
