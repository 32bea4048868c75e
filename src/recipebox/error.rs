use thiserror::Error;

/// Broad classification used by UIs to decide how to present a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Transport,
    NotFound,
    Storage,
    Auth,
    Config,
}

/// What went wrong on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Timeout,
    Network,
    Server,
    Generic,
}

impl TransportKind {
    pub fn code(&self) -> &'static str {
        match self {
            TransportKind::Timeout => "TIMEOUT",
            TransportKind::Network => "NETWORK_ERROR",
            TransportKind::Server => "SERVER_ERROR",
            TransportKind::Generic => "REQUEST_FAILED",
        }
    }
}

#[derive(Error, Debug)]
pub enum RecipeBoxError {
    #[error("{message}")]
    Validation { code: &'static str, message: String },

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Transport {
        kind: TransportKind,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("{message}")]
    Auth { code: String, message: String },

    #[error("Config error: {0}")]
    Config(String),
}

impl RecipeBoxError {
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        RecipeBoxError::Validation {
            code,
            message: message.into(),
        }
    }

    pub fn transport(kind: TransportKind, message: impl Into<String>) -> Self {
        RecipeBoxError::Transport {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RecipeBoxError::Validation { .. } => ErrorKind::Validation,
            RecipeBoxError::NotFound(_) => ErrorKind::NotFound,
            RecipeBoxError::Transport { .. } => ErrorKind::Transport,
            RecipeBoxError::Io(_) | RecipeBoxError::Serialization(_) | RecipeBoxError::Store(_) => {
                ErrorKind::Storage
            }
            RecipeBoxError::Auth { .. } => ErrorKind::Auth,
            RecipeBoxError::Config(_) => ErrorKind::Config,
        }
    }

    /// Stable machine-readable code, independent of the message wording.
    pub fn code(&self) -> &str {
        match self {
            RecipeBoxError::Validation { code, .. } => *code,
            RecipeBoxError::NotFound(_) => "NOT_FOUND",
            RecipeBoxError::Transport { kind, .. } => kind.code(),
            RecipeBoxError::Io(_) | RecipeBoxError::Serialization(_) | RecipeBoxError::Store(_) => {
                "STORAGE_ERROR"
            }
            RecipeBoxError::Auth { code, .. } => code.as_str(),
            RecipeBoxError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Transport failures can be retried by the user; nothing retries automatically.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RecipeBoxError::Transport { .. })
    }
}

pub type Result<T> = std::result::Result<T, RecipeBoxError>;
