//! Shell configuration.
//!
//! Loaded from a TOML file or from a JSON options document (the format the
//! embeddable console accepts as its `pucc-options` attribute). Every field has
//! a default, so an empty document is a valid configuration.
//!
//! ```toml
//! command_prefix = "$"
//! prompt = "pucc> "
//! enable_global_registrations = false
//! initial_content = "Welcome!\nType help to begin."
//! log_filter = "debug"
//! log_file = "/tmp/pucc.log"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PuccError, Result};

/// Default command prefix.
pub const DEFAULT_PREFIX: &str = "$";

/// Default prompt text.
pub const DEFAULT_PROMPT: &str = "$ ";

/// Top-level shell configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Marker that may precede a command name (`$help`).
    #[serde(alias = "commandPrefix")]
    pub command_prefix: String,
    /// Prompt written before every input line.
    pub prompt: String,
    /// Notify the host's global registrar about each command.
    #[serde(alias = "enableGlobalRegistrations")]
    pub enable_global_registrations: bool,
    /// Replaces the default banner when the session starts.
    #[serde(alias = "initialContent")]
    pub initial_content: Option<String>,
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Send log output here instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            command_prefix: DEFAULT_PREFIX.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            enable_global_registrations: true,
            initial_content: None,
            log_filter: "off".to_string(),
            log_file: None,
        }
    }
}

impl ShellConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Parse a JSON options document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load from a file, choosing the format by extension (`.json` or TOML).
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text)?,
            _ => Self::from_toml_str(&text)?,
        };
        config.validate()?;
        log::debug!("Loaded shell config from {}", path.display());
        Ok(config)
    }

    /// Parse a JSON options document, falling back to defaults on error.
    pub fn from_json_or_default(text: &str) -> Self {
        match Self::from_json_str(text) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to parse shell options: {e}");
                Self::default()
            },
        }
    }

    /// Reject values that can never work.
    pub fn validate(&self) -> Result<()> {
        if self.command_prefix.is_empty() {
            return Err(PuccError::Config(
                "command_prefix must be a non-empty string".to_string(),
            ));
        }
        Ok(())
    }

    /// The prompt, with an empty prompt replaced by the default.
    pub fn effective_prompt(&self) -> &str {
        if self.prompt.is_empty() {
            DEFAULT_PROMPT
        } else {
            &self.prompt
        }
    }
}
