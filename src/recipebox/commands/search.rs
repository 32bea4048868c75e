use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::source::RecipeClient;

pub async fn run(client: &RecipeClient, keyword: &str) -> Result<CmdResult> {
    let recipes = client.search_recipes(keyword).await?;
    let mut result = CmdResult::default();
    if recipes.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No recipes found for \"{}\".",
            keyword.trim()
        )));
    }
    Ok(result.with_recipes(recipes))
}

pub async fn by_letter(client: &RecipeClient, letter: &str) -> Result<CmdResult> {
    let recipes = client.search_by_first_letter(letter).await?;
    let mut result = CmdResult::default();
    if recipes.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No recipes start with \"{}\".",
            letter.trim().to_uppercase()
        )));
    }
    Ok(result.with_recipes(recipes))
}
