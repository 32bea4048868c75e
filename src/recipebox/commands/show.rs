use crate::commands::{CmdResult, RecipeView};
use crate::error::Result;
use crate::favorites::FavoritesStore;
use crate::instructions::format_instructions;
use crate::model::Recipe;
use crate::source::RecipeClient;
use crate::store::StorageBackend;

pub async fn run<B: StorageBackend>(
    client: &RecipeClient,
    favorites: &FavoritesStore<B>,
    id: &str,
) -> Result<CmdResult> {
    let recipe = client.get_recipe_by_id(id).await?;
    Ok(CmdResult::default().with_recipe(view(recipe, favorites)))
}

pub async fn random<B: StorageBackend>(
    client: &RecipeClient,
    favorites: &FavoritesStore<B>,
) -> Result<CmdResult> {
    let recipe = client.random_recipe().await?;
    Ok(CmdResult::default().with_recipe(view(recipe, favorites)))
}

fn view<B: StorageBackend>(recipe: Recipe, favorites: &FavoritesStore<B>) -> RecipeView {
    RecipeView {
        steps: format_instructions(&recipe.instructions),
        is_favorite: favorites.is_favorite(&recipe.id),
        recipe,
    }
}
