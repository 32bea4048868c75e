//! # API Facade
//!
//! The single entry point for recipebox operations, whatever the UI. It owns
//! the service objects (favorites store, auth gate, recipe client) for the
//! lifetime of a session and dispatches to `commands/*.rs`.
//!
//! The facade does no printing and no formatting; it returns
//! `Result<CmdResult>`. It does enforce the optional sign-in requirement,
//! since that rule applies to every UI equally.
//!
//! `RecipeBoxApi<B>` is generic over the storage backend:
//! - Production: `RecipeBoxApi<FsBackend>`
//! - Testing: `RecipeBoxApi<MemBackend>`

use crate::auth::{AuthGate, IdentityClient};
use crate::commands;
use crate::config::RecipeBoxConfig;
use crate::error::{RecipeBoxError, Result};
use crate::favorites::FavoritesStore;
use crate::source::RecipeClient;
use crate::store::StorageBackend;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

pub const LOGIN_REQUIRED: &str = "Please log in to continue.";

pub struct RecipeBoxApi<B: StorageBackend> {
    favorites: FavoritesStore<B>,
    auth: AuthGate<B>,
    client: RecipeClient,
    config: RecipeBoxConfig,
    data_dir: PathBuf,
}

impl<B: StorageBackend + Clone> RecipeBoxApi<B> {
    /// Builds the service objects and rehydrates favorites and the session.
    ///
    /// Unreadable favorites do not fail construction; the store starts empty
    /// and carries the error in its state.
    pub fn new(backend: B, config: RecipeBoxConfig, data_dir: impl Into<PathBuf>) -> Result<Self> {
        let client = RecipeClient::new(&config.api_base_url, config.request_timeout())?
            .with_strict_ids(config.strict_ids);
        let identity = IdentityClient::new(
            &config.identity_base_url,
            config.identity_api_key.clone(),
            config.request_timeout(),
        )?;

        let mut favorites = FavoritesStore::new(backend.clone());
        if let Err(e) = favorites.initialize() {
            warn!(error = %e, "favorites unavailable");
        }
        let mut auth = AuthGate::new(backend, identity);
        if let Some(user) = auth.restore() {
            info!(user = %user.email, "session restored");
        }

        Ok(Self {
            favorites,
            auth,
            client,
            config,
            data_dir: data_dir.into(),
        })
    }
}

impl<B: StorageBackend> RecipeBoxApi<B> {
    pub async fn search(&self, keyword: &str) -> Result<commands::CmdResult> {
        self.require_session()?;
        commands::search::run(&self.client, keyword).await
    }

    pub async fn search_by_letter(&self, letter: &str) -> Result<commands::CmdResult> {
        self.require_session()?;
        commands::search::by_letter(&self.client, letter).await
    }

    pub async fn show_recipe(&self, id: &str) -> Result<commands::CmdResult> {
        self.require_session()?;
        commands::show::run(&self.client, &self.favorites, id).await
    }

    pub async fn random_recipe(&self) -> Result<commands::CmdResult> {
        self.require_session()?;
        commands::show::random(&self.client, &self.favorites).await
    }

    pub async fn add_favorite(&mut self, id: &str) -> Result<commands::CmdResult> {
        self.require_session()?;
        commands::favorites::add(&self.client, &mut self.favorites, id).await
    }

    pub fn remove_favorite(&mut self, id: &str) -> Result<commands::CmdResult> {
        self.require_session()?;
        commands::favorites::remove(&mut self.favorites, id)
    }

    pub fn list_favorites(&self) -> Result<commands::CmdResult> {
        self.require_session()?;
        commands::favorites::list(&self.favorites)
    }

    pub fn clear_favorites(&mut self) -> Result<commands::CmdResult> {
        self.require_session()?;
        commands::favorites::clear(&mut self.favorites)
    }

    pub fn favorite_count(&self) -> Result<commands::CmdResult> {
        self.require_session()?;
        commands::favorites::count(&self.favorites)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<commands::CmdResult> {
        commands::auth::login(&mut self.auth, email, password).await
    }

    pub async fn signup(
        &mut self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<commands::CmdResult> {
        commands::auth::signup(&mut self.auth, email, password, username).await
    }

    pub fn logout(&mut self) -> Result<commands::CmdResult> {
        commands::auth::logout(&mut self.auth)
    }

    pub fn whoami(&self) -> Result<commands::CmdResult> {
        commands::auth::whoami(&self.auth)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.data_dir, action)
    }

    pub fn favorites(&self) -> &FavoritesStore<B> {
        &self.favorites
    }

    pub fn debounce(&self) -> Duration {
        self.config.debounce()
    }

    pub fn data_dir(&self) -> &std::path::Path {
        &self.data_dir
    }

    fn require_session(&self) -> Result<()> {
        if self.config.require_login && !self.auth.is_authenticated() {
            return Err(RecipeBoxError::Auth {
                code: "LOGIN_REQUIRED".to_string(),
                message: LOGIN_REQUIRED.to_string(),
            });
        }
        Ok(())
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, RecipeView};
