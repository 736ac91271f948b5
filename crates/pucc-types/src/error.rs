//! Error types for PUCC.

use std::io;

/// Errors produced by the PUCC shell.
#[derive(Debug, thiserror::Error)]
pub enum PuccError {
    #[error(
        "invalid command prefix \"{0}\": prefix must start with a letter, underscore, or \
         dollar sign, and can only contain letters, digits, underscores, and dollar signs"
    )]
    InvalidPrefix(String),

    #[error("invalid command name \"{0}\": must be a non-empty word")]
    InvalidName(String),

    #[error("command name \"{name}\" should not include the {prefix} prefix")]
    ReservedPrefix { name: String, prefix: String },

    #[error("command \"{0}\" has no handler")]
    InvalidHandler(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("Command \"{name}\" not found. Use help or {prefix}help to see available commands.")]
    CommandNotFound { name: String, prefix: String },

    #[error("Error executing command \"{name}\": {message}")]
    Handler { name: String, message: String },

    #[error("{0}")]
    Command(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PuccError {
    /// True for errors that abort setup (bad prefix, name, handler or config).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidPrefix(_)
                | Self::InvalidName(_)
                | Self::ReservedPrefix { .. }
                | Self::InvalidHandler(_)
                | Self::Config(_)
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, PuccError>;
