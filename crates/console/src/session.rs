//! [`Session`]: keys and codec built once at startup and lent to every handler.

use std::sync::Arc;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use cascade::{AuditSink, CascadeError, CombinedBlob, Decoder, Encoder, KeyPair, OsEntropy};
use tracing::info;

use crate::config::Config;
use crate::telemetry::TracingAudit;

/// Interactive session state.
///
/// Holds a single key pair for the lifetime of the process. Every menu
/// action borrows the session; nothing is global.
#[derive(Debug, Clone)]
pub struct Session {
    encoder: Encoder,
    decoder: Decoder,
}

impl Session {
    /// Create a session over `keys`, optionally reporting to `audit`.
    pub fn new(keys: KeyPair, audit: Option<Arc<dyn AuditSink>>) -> Self {
        let keys = Arc::new(keys);
        let mut encoder = Encoder::new(keys.clone());
        let mut decoder = Decoder::new(keys);
        if let Some(audit) = audit {
            encoder = encoder.with_audit(audit.clone());
            decoder = decoder.with_audit(audit);
        }
        Self { encoder, decoder }
    }

    /// Build a session from configuration.
    ///
    /// Uses the configured keys when present, otherwise generates a fresh
    /// pair that lives only as long as this process.
    ///
    /// # Errors
    ///
    /// Returns an error if configured keys are not valid base64 or have the
    /// wrong length, or if key generation fails.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let keys = load_keys(cfg)?;
        let audit: Arc<dyn AuditSink> = Arc::new(TracingAudit::new(cfg.audit_plaintext));
        Ok(Self::new(keys, Some(audit)))
    }

    /// Encrypt UTF-8 text, returning the transport string.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::Entropy`] if the random source fails.
    pub fn encrypt_text(&self, text: &str) -> Result<String, CascadeError> {
        Ok(self.encoder.encrypt(text.as_bytes())?.to_transport())
    }

    /// Decrypt a transport string, replacing invalid UTF-8 sequences.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::Encoding`], [`CascadeError::TruncatedInput`]
    /// or [`CascadeError::Padding`].
    pub fn decrypt_text(&self, transport: &str) -> Result<String, CascadeError> {
        let blob = CombinedBlob::from_transport(transport)?;
        let plaintext = self.decoder.decrypt(&blob)?;
        Ok(String::from_utf8_lossy(&plaintext).into_owned())
    }
}

fn load_keys(cfg: &Config) -> Result<KeyPair> {
    match (&cfg.block_key, &cfg.stream_key) {
        (Some(block), Some(stream)) => {
            let block = URL_SAFE
                .decode(block.trim())
                .context("CASCADE_BLOCK_KEY is not valid URL-safe base64")?;
            let stream = URL_SAFE
                .decode(stream.trim())
                .context("CASCADE_STREAM_KEY is not valid URL-safe base64")?;
            let keys = KeyPair::from_slices(&block, &stream).context("configured key rejected")?;
            info!("using configured key pair");
            Ok(keys)
        }
        (None, None) => {
            let keys = KeyPair::generate(&OsEntropy).context("failed to generate key pair")?;
            info!("generated ephemeral key pair");
            Ok(keys)
        }
        _ => anyhow::bail!("CASCADE_BLOCK_KEY and CASCADE_STREAM_KEY must be set together"),
    }
}
