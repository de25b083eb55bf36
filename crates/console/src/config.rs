//! Configuration loading and validation for the console.
//!
//! Values are read from `CASCADE_`-prefixed environment variables at startup,
//! e.g. `CASCADE_LOG_LEVEL=debug`.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated console configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// File to append every JSON log line to, audit records included. Logs
    /// go to stderr when unset.
    #[serde(default)]
    pub log_path: Option<String>,

    /// Whether audit records include decrypted plaintext.
    #[serde(default)]
    pub audit_plaintext: bool,

    /// URL-safe base64 AES-256 key. Must be set together with `stream_key`.
    #[serde(default)]
    pub block_key: Option<String>,

    /// URL-safe base64 ChaCha20 key. Must be set together with `block_key`.
    #[serde(default)]
    pub stream_key: Option<String>,

    /// Prompt printed before reading a menu choice.
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_log_level() -> String {
    "info".into()
}
fn default_prompt() -> String {
    "Enter the number corresponding to your choice: ".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_path: None,
            audit_plaintext: false,
            block_key: None,
            stream_key: None,
            prompt: default_prompt(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material is never printed.
        f.debug_struct("Config")
            .field("log_level", &self.log_level)
            .field("log_path", &self.log_path)
            .field("audit_plaintext", &self.audit_plaintext)
            .field("keys_supplied", &self.block_key.is_some())
            .field("prompt", &self.prompt)
            .finish()
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or validation fails.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("CASCADE"))
            .build()
            .context("failed to build console configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise console configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("CASCADE_LOG_LEVEL must not be empty");
        }
        if let Some(path) = &self.log_path {
            if path.trim().is_empty() {
                anyhow::bail!("CASCADE_LOG_PATH must not be empty when set");
            }
        }
        match (&self.block_key, &self.stream_key) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("CASCADE_BLOCK_KEY and CASCADE_STREAM_KEY must be set together")
            }
            _ => Ok(()),
        }
    }
}
