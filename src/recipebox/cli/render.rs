//! # Rendering
//!
//! Every function here returns a `String`; the handlers decide when to print.
//! Width math stays Unicode-aware (`unicode-width`) so recipe names with
//! accents or CJK characters line up.

use super::styles::THEME;
use chrono::{DateTime, Utc};
use recipebox::api::{CmdMessage, MessageLevel, RecipeView};
use recipebox::config::{RecipeBoxConfig, CONFIG_KEYS};
use recipebox::model::{FavoriteRecipe, RecipeSummary, User};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const ID_WIDTH: usize = 7;
pub const TIME_WIDTH: usize = 16;
pub const FAVORITE_MARKER: &str = "♥";

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let style = match message.level {
            MessageLevel::Info => &THEME.info,
            MessageLevel::Success => &THEME.success,
            MessageLevel::Warning => &THEME.warning,
            MessageLevel::Error => &THEME.error,
        };
        out.push_str(&format!("{}\n", style.apply_to(&message.content)));
    }
    out
}

/// One line per recipe: id, name, then category and area flush right.
pub fn render_recipe_list<F: Fn(&str) -> bool>(recipes: &[RecipeSummary], is_favorite: F) -> String {
    let mut out = String::new();
    for recipe in recipes {
        let meta = [recipe.category.as_deref(), recipe.area.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" · ");
        let marker = if is_favorite(&recipe.id) {
            FAVORITE_MARKER
        } else {
            " "
        };

        let fixed = ID_WIDTH + 4 + meta.width();
        let name = truncate_to_width(&recipe.name, LINE_WIDTH.saturating_sub(fixed + 2));
        let padding = LINE_WIDTH.saturating_sub(fixed + name.width());

        out.push_str(&format!(
            "{:>w$} {} {}{}{}\n",
            THEME.id.apply_to(&recipe.id),
            THEME.favorite.apply_to(marker),
            THEME.title.apply_to(&name),
            " ".repeat(padding),
            THEME.meta.apply_to(&meta),
            w = ID_WIDTH
        ));
    }
    out
}

pub fn render_favorites(favorites: &[FavoriteRecipe], now: DateTime<Utc>) -> String {
    let mut out = String::new();
    for favorite in favorites {
        let added = favorite
            .added_at()
            .map(|t| format_time_ago(t, now))
            .unwrap_or_default();
        let name = truncate_to_width(
            &favorite.name,
            LINE_WIDTH.saturating_sub(ID_WIDTH + TIME_WIDTH + 3),
        );
        let padding = LINE_WIDTH.saturating_sub(ID_WIDTH + TIME_WIDTH + 2 + name.width());

        out.push_str(&format!(
            "{:>w$}  {}{}{}\n",
            THEME.id.apply_to(&favorite.id),
            THEME.title.apply_to(&name),
            " ".repeat(padding),
            THEME.time.apply_to(format!("{:>t$}", added, t = TIME_WIDTH)),
            w = ID_WIDTH
        ));
    }
    out
}

pub fn render_recipe(view: &RecipeView) -> String {
    let recipe = &view.recipe;
    let mut out = String::new();

    let marker = if view.is_favorite {
        format!(" {}", THEME.favorite.apply_to(FAVORITE_MARKER))
    } else {
        String::new()
    };
    out.push_str(&format!(
        "{} {}{}\n",
        THEME.id.apply_to(&recipe.id),
        THEME.title.apply_to(&recipe.name),
        marker
    ));

    let meta = [recipe.category.as_str(), recipe.area.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" · ");
    if !meta.is_empty() {
        out.push_str(&format!("{}\n", THEME.meta.apply_to(meta)));
    }
    if !recipe.tags.is_empty() {
        out.push_str(&format!(
            "{}\n",
            THEME.meta.apply_to(format!("#{}", recipe.tags.join(" #")))
        ));
    }

    if !recipe.ingredients.is_empty() {
        out.push_str(&format!("\n{}\n", THEME.heading.apply_to("Ingredients")));
        for ingredient in &recipe.ingredients {
            out.push_str(&format!("  • {}\n", ingredient.combined()));
        }
    }

    if !view.steps.is_empty() {
        out.push_str(&format!("\n{}\n", THEME.heading.apply_to("Steps")));
        let width = view.steps.len().to_string().len();
        for (i, step) in view.steps.iter().enumerate() {
            out.push_str(&format!("  {:>w$}. {}\n", i + 1, step, w = width));
        }
    }

    let links: Vec<String> = [("Video", &recipe.youtube), ("Source", &recipe.source)]
        .into_iter()
        .filter_map(|(label, url)| url.as_ref().map(|u| format!("{}: {}", label, u)))
        .collect();
    if !links.is_empty() {
        out.push('\n');
        for link in links {
            out.push_str(&format!("{}\n", THEME.meta.apply_to(link)));
        }
    }

    out
}

pub fn render_user(user: &User) -> String {
    match &user.username {
        Some(name) => format!("{} <{}>\n", THEME.title.apply_to(name), user.email),
        None => format!("{}\n", user.email),
    }
}

pub fn render_config(config: &RecipeBoxConfig) -> String {
    let width = CONFIG_KEYS.iter().map(|k| k.width()).max().unwrap_or(0);
    CONFIG_KEYS
        .iter()
        .filter_map(|key| config.get(key).map(|value| (key, value)))
        .map(|(key, value)| format!("{:<w$}  {}\n", key, value, w = width))
        .collect()
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

pub fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    Formatter::new().convert(elapsed.to_std().unwrap_or_default())
}
