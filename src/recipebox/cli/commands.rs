//! # CLI dispatch
//!
//! - `run()`: parses arguments, installs logging, builds the context, dispatches
//! - `init_context()`: resolves the data directory and config, builds the API
//! - `handle_*()`: call the API and print rendered output
//!
//! The tokio runtime lives here. It is current-thread: there is one logical
//! flow at a time and the only concurrency is waiting on the network.

use super::render::{
    render_config, render_favorites, render_messages, render_recipe, render_recipe_list,
    render_user,
};
use super::setup::{Cli, Commands, FavCommands};
use chrono::Utc;
use clap::Parser;
use directories::ProjectDirs;
use recipebox::api::{CmdResult, ConfigAction, RecipeBoxApi};
use recipebox::config::{RecipeBoxConfig, ENV_HOME};
use recipebox::error::{RecipeBoxError, Result};
use recipebox::logging;
use recipebox::search::debounce_queries;
use recipebox::store::fs_backend::FsBackend;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{debug, warn};

const ENV_PASSWORD: &str = "RECIPEBOX_PASSWORD";

struct AppContext {
    api: RecipeBoxApi<FsBackend>,
    runtime: Runtime,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Search { terms }) => handle_search(&ctx, &terms.join(" ")),
        Some(Commands::Letter { letter }) => handle_letter(&ctx, &letter),
        Some(Commands::Show { id }) => handle_show(&ctx, &id),
        Some(Commands::Random) => handle_random(&ctx),
        Some(Commands::Browse) => handle_browse(&ctx),
        Some(Commands::Fav(cmd)) => match cmd {
            FavCommands::Add { id } => handle_fav_add(&mut ctx, &id),
            FavCommands::Remove { id } => handle_fav_remove(&mut ctx, &id),
            FavCommands::List => handle_fav_list(&ctx),
            FavCommands::Clear => handle_fav_clear(&mut ctx),
            FavCommands::Count => handle_fav_count(&ctx),
        },
        Some(Commands::Login { email, password }) => handle_login(&mut ctx, &email, password),
        Some(Commands::Signup {
            email,
            username,
            password,
        }) => handle_signup(&mut ctx, &email, &username, password),
        Some(Commands::Logout) => handle_logout(&mut ctx),
        Some(Commands::Whoami) => handle_whoami(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_fav_list(&ctx),
    }
}

fn init_context() -> Result<AppContext> {
    let data_dir = data_dir()?;
    debug!(data_dir = %data_dir.display(), "using data directory");

    let config = RecipeBoxConfig::load(&data_dir)
        .unwrap_or_else(|e| {
            warn!(error = %e, "could not read config; using defaults");
            RecipeBoxConfig::default()
        })
        .with_env_overrides();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let backend = FsBackend::new(data_dir.clone());
    let api = RecipeBoxApi::new(backend, config, data_dir)?;
    Ok(AppContext { api, runtime })
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(ENV_HOME) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "recipebox", "recipebox")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            RecipeBoxError::Config(format!(
                "Could not determine a data directory; set {}",
                ENV_HOME
            ))
        })
}

fn print_recipes(ctx: &AppContext, result: &CmdResult) {
    let favorites = ctx.api.favorites();
    print!(
        "{}",
        render_recipe_list(&result.recipes, |id| favorites.is_favorite(id))
    );
    print!("{}", render_messages(&result.messages));
}

fn handle_search(ctx: &AppContext, query: &str) -> Result<()> {
    let result = ctx.runtime.block_on(ctx.api.search(query))?;
    print_recipes(ctx, &result);
    Ok(())
}

fn handle_letter(ctx: &AppContext, letter: &str) -> Result<()> {
    let result = ctx.runtime.block_on(ctx.api.search_by_letter(letter))?;
    print_recipes(ctx, &result);
    Ok(())
}

fn handle_show(ctx: &AppContext, id: &str) -> Result<()> {
    let result = ctx.runtime.block_on(ctx.api.show_recipe(id))?;
    print_recipe_result(&result);
    Ok(())
}

fn handle_random(ctx: &AppContext) -> Result<()> {
    let result = ctx.runtime.block_on(ctx.api.random_recipe())?;
    print_recipe_result(&result);
    Ok(())
}

fn print_recipe_result(result: &CmdResult) {
    if let Some(view) = &result.recipe {
        print!("{}", render_recipe(view));
    }
    print!("{}", render_messages(&result.messages));
}

/// Debounced search over stdin lines. A failed query is reported and the
/// session carries on; only closing stdin ends it.
fn handle_browse(ctx: &AppContext) -> Result<()> {
    let (keys_tx, keys_rx) = mpsc::channel::<String>(64);
    let (query_tx, mut query_rx) = mpsc::channel::<String>(8);

    if std::io::stdin().is_terminal() {
        eprintln!("Type a recipe name; Ctrl-D to quit.");
    }
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if keys_tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    let quiet_period = ctx.api.debounce();
    ctx.runtime.block_on(async {
        tokio::spawn(debounce_queries(keys_rx, query_tx, quiet_period));
        while let Some(query) = query_rx.recv().await {
            match ctx.api.search(&query).await {
                Ok(result) => print_recipes(ctx, &result),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
    });
    Ok(())
}

fn handle_fav_add(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.runtime.block_on(ctx.api.add_favorite(id))?;
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn handle_fav_remove(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.remove_favorite(id)?;
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn handle_fav_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_favorites()?;
    print!("{}", render_favorites(&result.favorites, Utc::now()));
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn handle_fav_clear(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.clear_favorites()?;
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn handle_fav_count(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.favorite_count()?;
    println!("{}", result.count.unwrap_or(0));
    Ok(())
}

fn handle_login(ctx: &mut AppContext, email: &str, password: Option<String>) -> Result<()> {
    let password = resolve_password(password)?;
    let result = ctx.runtime.block_on(ctx.api.login(email, &password))?;
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn handle_signup(
    ctx: &mut AppContext,
    email: &str,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let password = resolve_password(password)?;
    let result = ctx
        .runtime
        .block_on(ctx.api.signup(email, &password, username))?;
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn handle_logout(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.logout()?;
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn handle_whoami(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.whoami()?;
    if let Some(user) = &result.user {
        print!("{}", render_user(user));
    }
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        if result.messages.is_empty() {
            print!("{}", render_config(config));
        }
    }
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn resolve_password(flag: Option<String>) -> Result<String> {
    if let Some(password) = flag.or_else(|| std::env::var(ENV_PASSWORD).ok()) {
        return Ok(password);
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
        std::io::stderr().flush()?;
    }
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
