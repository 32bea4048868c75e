//! # Auth Gate
//!
//! Optional sign-in against a Firebase-style identity provider
//! (`accounts:signInWithPassword` / `accounts:signUp`).
//!
//! Credentials are validated locally first, so obviously bad input never
//! reaches the network. A successful sign-in keeps the session in memory and
//! persists the token and user profile under [`TOKEN_KEY`] / [`USER_KEY`];
//! [`AuthGate::restore`] picks them up again on the next start.

use crate::error::{RecipeBoxError, Result, TransportKind};
use crate::model::User;
use crate::source::{NETWORK_ERROR, TIMEOUT_ERROR};
use crate::store::{StorageBackend, TOKEN_KEY, USER_KEY};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

const MIN_PASSWORD_CHARS: usize = 8;
const MIN_USERNAME_CHARS: usize = 4;
const SPECIAL_CHARS: &str = "!@#$%^&*,.?\":";

static EMAIL: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

pub fn validate_email(email: &str) -> bool {
    EMAIL.as_ref().is_some_and(|re| re.is_match(email))
}

pub fn validate_password(password: &str) -> Result<()> {
    let message = if password.chars().count() < MIN_PASSWORD_CHARS {
        "Password must be at least 8 characters long."
    } else if !password.chars().any(|c| c.is_ascii_uppercase()) {
        "Password must contain at least one uppercase letter."
    } else if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        "Password must contain at least one special character."
    } else {
        return Ok(());
    };
    Err(RecipeBoxError::validation("WEAK_PASSWORD", message))
}

pub fn validate_username(username: &str) -> Result<()> {
    if username.trim().chars().count() < MIN_USERNAME_CHARS {
        return Err(RecipeBoxError::validation(
            "INVALID_USERNAME",
            "Username must be at least 4 characters long.",
        ));
    }
    Ok(())
}

fn validate_credentials(email: &str, password: &str) -> Result<()> {
    validate_password(password)?;
    if !validate_email(email) {
        return Err(RecipeBoxError::validation("INVALID_EMAIL", "Invalid email."));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    SignIn,
    SignUp,
}

impl Flow {
    fn endpoint(self) -> &'static str {
        match self {
            Flow::SignIn => "accounts:signInWithPassword",
            Flow::SignUp => "accounts:signUp",
        }
    }

    fn fallback_message(self) -> &'static str {
        match self {
            Flow::SignIn => "Login failed. Please try again.",
            Flow::SignUp => "Sign-up failed. Please try again.",
        }
    }
}

/// Maps a provider error code to the message shown to the user.
fn provider_message(code: &str, flow: Flow) -> &'static str {
    match code {
        "EMAIL_NOT_FOUND" => "No account found with this email",
        "INVALID_PASSWORD" => "Incorrect password",
        "USER_DISABLED" => "This account has been disabled",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts. Try again later",
        "EMAIL_EXISTS" => "Email already in use",
        _ => flow.fallback_message(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    id_token: String,
    local_id: String,
    #[serde(default)]
    email: String,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    error: ProviderError,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderError {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// HTTP client for the identity provider.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl IdentityClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RecipeBoxError::Config(format!("could not build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let body = json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        let account = self.post(Flow::SignIn, body).await?;
        Ok(Session {
            user: User {
                id: account.local_id,
                email: account.email,
                username: None,
            },
            token: account.id_token,
        })
    }

    pub async fn sign_up(&self, email: &str, password: &str, username: &str) -> Result<Session> {
        let body = json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
            "displayName": username,
        });
        let account = self.post(Flow::SignUp, body).await?;
        Ok(Session {
            user: User {
                id: account.local_id,
                email: account.email,
                username: Some(username.to_string()),
            },
            token: account.id_token,
        })
    }

    async fn post(&self, flow: Flow, body: serde_json::Value) -> Result<AccountResponse> {
        let key = self.api_key.as_deref().ok_or_else(|| {
            RecipeBoxError::Config("Identity provider API key is not configured".to_string())
        })?;
        let url = format!("{}/v1/{}", self.base_url, flow.endpoint());
        debug!(%url, "identity provider request");

        let response = self
            .http
            .post(&url)
            .query(&[("key", key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "identity provider request failed");
                transport_error(&e, flow)
            })?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<AccountResponse>()
                .await
                .map_err(|e| transport_error(&e, flow));
        }

        let body: ProviderErrorBody = response.json().await.unwrap_or_default();
        // Firebase sometimes appends detail: "TOO_MANY_ATTEMPTS_TRY_LATER : ..."
        let code = body
            .error
            .message
            .split(" : ")
            .next()
            .unwrap_or("")
            .trim()
            .to_string();
        debug!(%status, %code, "identity provider rejected request");

        let message = provider_message(&code, flow).to_string();
        let code = if code.is_empty() {
            "AUTH_FAILED".to_string()
        } else {
            code
        };
        Err(RecipeBoxError::Auth { code, message })
    }
}

fn transport_error(err: &reqwest::Error, flow: Flow) -> RecipeBoxError {
    if err.is_timeout() {
        RecipeBoxError::transport(TransportKind::Timeout, TIMEOUT_ERROR)
    } else if err.is_connect() {
        RecipeBoxError::transport(TransportKind::Network, NETWORK_ERROR)
    } else {
        RecipeBoxError::transport(TransportKind::Generic, flow.fallback_message())
    }
}

/// Holds the current session and keeps it in sync with storage.
pub struct AuthGate<B: StorageBackend> {
    backend: B,
    identity: IdentityClient,
    session: Option<Session>,
    loading: bool,
}

impl<B: StorageBackend> AuthGate<B> {
    pub fn new(backend: B, identity: IdentityClient) -> Self {
        Self {
            backend,
            identity,
            session: None,
            loading: true,
        }
    }

    /// Loads a persisted session. Both the token and the user must be present.
    /// Read or parse failures leave the gate signed out.
    pub fn restore(&mut self) -> Option<&User> {
        if self.loading {
            self.loading = false;
            match self.read_session() {
                Ok(session) => self.session = session,
                Err(e) => warn!(error = %e, "could not restore session"),
            }
        }
        self.user()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<User> {
        validate_credentials(email, password)?;
        let session = self.identity.sign_in(email.trim(), password).await?;
        self.start_session(session)
    }

    pub async fn signup(&mut self, email: &str, password: &str, username: &str) -> Result<User> {
        validate_credentials(email, password)?;
        validate_username(username)?;
        let session = self
            .identity
            .sign_up(email.trim(), password, username.trim())
            .await?;
        self.start_session(session)
    }

    /// Signs out in memory first, then forgets the persisted session.
    pub fn logout(&mut self) -> Result<()> {
        self.session = None;
        self.backend.remove_item(TOKEN_KEY)?;
        self.backend.remove_item(USER_KEY)?;
        info!("signed out");
        Ok(())
    }

    fn start_session(&mut self, session: Session) -> Result<User> {
        let user = session.user.clone();
        let token = session.token.clone();
        self.session = Some(session);
        self.loading = false;
        info!(user = %user.email, "signed in");

        // The session stays active in memory even if it cannot be persisted.
        self.backend.set_item(TOKEN_KEY, &token)?;
        self.backend.set_item(USER_KEY, &serde_json::to_string(&user)?)?;
        Ok(user)
    }

    fn read_session(&self) -> Result<Option<Session>> {
        let token = self.backend.get_item(TOKEN_KEY)?;
        let user = self.backend.get_item(USER_KEY)?;
        match (token, user) {
            (Some(token), Some(user)) => Ok(Some(Session {
                user: serde_json::from_str(&user)?,
                token,
            })),
            _ => Ok(None),
        }
    }
}
