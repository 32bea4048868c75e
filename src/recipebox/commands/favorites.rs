use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::favorites::FavoritesStore;
use crate::source::{validate_recipe_id, RecipeClient};
use crate::store::StorageBackend;

/// Looks the recipe up and stores it. Known ids skip the network entirely.
pub async fn add<B: StorageBackend>(
    client: &RecipeClient,
    store: &mut FavoritesStore<B>,
    id: &str,
) -> Result<CmdResult> {
    let id = validate_recipe_id(id, false)?;
    let mut result = CmdResult::default();

    if let Some(existing) = store.get_favorite(id) {
        result.add_message(CmdMessage::info(format!(
            "{} is already in your favorites.",
            existing.name
        )));
        return Ok(result);
    }

    let recipe = client.get_recipe_by_id(id).await?;
    store.add_favorite(&recipe)?;
    result.add_message(CmdMessage::success(format!(
        "Added {} to favorites.",
        recipe.name
    )));
    Ok(result.with_favorites(store.favorites().to_vec()))
}

pub fn remove<B: StorageBackend>(store: &mut FavoritesStore<B>, id: &str) -> Result<CmdResult> {
    let id = validate_recipe_id(id, false)?;
    let name = store.get_favorite(id).map(|f| f.name.clone());
    let mut result = CmdResult::default();

    store.remove_favorite(id)?;
    match name {
        Some(name) => {
            result.add_message(CmdMessage::success(format!("Removed {} from favorites.", name)))
        }
        None => result.add_message(CmdMessage::info(format!(
            "Recipe {} is not in your favorites.",
            id
        ))),
    }
    Ok(result.with_favorites(store.favorites().to_vec()))
}

pub fn list<B: StorageBackend>(store: &FavoritesStore<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if let Some(error) = &store.state().error {
        result.add_message(CmdMessage::warning(error.clone()));
    }
    if store.favorite_count() == 0 {
        result.add_message(CmdMessage::info("No favorites yet."));
    }
    Ok(result
        .with_favorites(store.favorites().to_vec())
        .with_count(store.favorite_count()))
}

pub fn clear<B: StorageBackend>(store: &mut FavoritesStore<B>) -> Result<CmdResult> {
    let removed = store.favorite_count();
    store.clear_all_favorites()?;
    let mut result = CmdResult::default().with_count(0);
    result.add_message(CmdMessage::success(format!(
        "Cleared {} favorite{}.",
        removed,
        if removed == 1 { "" } else { "s" }
    )));
    Ok(result)
}

pub fn count<B: StorageBackend>(store: &FavoritesStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_count(store.favorite_count()))
}
