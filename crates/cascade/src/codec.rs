//! Cascade encoder and decoder.
//!
//! [`double_encrypt`] and [`double_decrypt`] are the raw pipeline over
//! `(iv, nonce, ciphertext)` triples. [`Encoder`] and [`Decoder`] wrap them
//! around a shared [`KeyPair`], framing the output as a [`CombinedBlob`] and
//! feeding an optional [`AuditSink`].
//!
//! # Limitations
//!
//! There is no authentication tag. A wrong key or a corrupted blob is caught
//! only when the recovered padding happens to be invalid, which is likely but
//! not guaranteed. A successful decrypt is therefore no proof of integrity.

use std::sync::Arc;

use common::protocol::{IV_LEN, NONCE_LEN};
use common::{CascadeError, CombinedBlob};
use tracing::debug;

use crate::audit::{AuditEvent, AuditSink};
use crate::crypto::{block, padding, stream};
use crate::entropy::{random_array, EntropySource, OsEntropy};
use crate::keys::KeyPair;

/// Output of [`double_encrypt`]: IV, nonce and stream ciphertext.
pub type Sealed = ([u8; IV_LEN], [u8; NONCE_LEN], Vec<u8>);

/// Encrypt `plaintext` with fresh IV and nonce drawn from the OS CSPRNG.
///
/// # Errors
///
/// Returns [`CascadeError::Entropy`] if the random source fails.
pub fn double_encrypt(keys: &KeyPair, plaintext: &[u8]) -> Result<Sealed, CascadeError> {
    double_encrypt_with(keys, plaintext, &OsEntropy)
}

/// Encrypt `plaintext`, drawing the IV and then the nonce from `entropy`.
///
/// # Errors
///
/// Returns [`CascadeError::Entropy`] if `entropy` fails.
pub fn double_encrypt_with(
    keys: &KeyPair,
    plaintext: &[u8],
    entropy: &dyn EntropySource,
) -> Result<Sealed, CascadeError> {
    let iv: [u8; IV_LEN] = random_array(entropy)?;
    let block_ciphertext = block::encrypt(keys.block_key(), &iv, &padding::pad(plaintext))?;

    let nonce: [u8; NONCE_LEN] = random_array(entropy)?;
    let stream_ciphertext = stream::apply(keys.stream_key(), &nonce, &block_ciphertext)?;

    Ok((iv, nonce, stream_ciphertext))
}

/// Invert [`double_encrypt`].
///
/// # Errors
///
/// Returns [`CascadeError::Padding`] if the recovered plaintext is not
/// validly padded (wrong keys, wrong IV/nonce, or corrupted ciphertext).
pub fn double_decrypt(
    keys: &KeyPair,
    iv: &[u8; IV_LEN],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CascadeError> {
    let block_ciphertext = stream::apply(keys.stream_key(), nonce, ciphertext)?;
    let mut plaintext = block::decrypt(keys.block_key(), iv, &block_ciphertext)?;
    let len = padding::unpad(&plaintext)?.len();
    plaintext.truncate(len);
    Ok(plaintext)
}

/// Produces [`CombinedBlob`]s under a fixed key pair.
#[derive(Clone)]
pub struct Encoder {
    keys: Arc<KeyPair>,
    entropy: Arc<dyn EntropySource>,
    audit: Option<Arc<dyn AuditSink>>,
}

impl Encoder {
    /// Create an encoder that draws randomness from the OS CSPRNG.
    pub fn new(keys: Arc<KeyPair>) -> Self {
        Self {
            keys,
            entropy: Arc::new(OsEntropy),
            audit: None,
        }
    }

    /// Replace the random source.
    pub fn with_entropy(mut self, entropy: Arc<dyn EntropySource>) -> Self {
        self.entropy = entropy;
        self
    }

    /// Attach an audit sink.
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Encrypt `plaintext` into a new [`CombinedBlob`].
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::Entropy`] if the random source fails.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<CombinedBlob, CascadeError> {
        let (iv, nonce, ciphertext) =
            double_encrypt_with(&self.keys, plaintext, self.entropy.as_ref())?;
        let blob = CombinedBlob {
            iv,
            nonce,
            ciphertext,
        };

        let event = AuditEvent {
            plaintext_len: plaintext.len(),
            blob_len: blob.encoded_len(),
        };
        debug!(plaintext_len = event.plaintext_len, blob_len = event.blob_len, "encrypted");
        if let Some(audit) = &self.audit {
            audit.encrypted(&event);
        }
        Ok(blob)
    }
}

impl std::fmt::Debug for Encoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encoder")
            .field("keys", &self.keys)
            .field("audit", &self.audit.is_some())
            .finish_non_exhaustive()
    }
}

/// Recovers plaintext from [`CombinedBlob`]s under a fixed key pair.
#[derive(Clone)]
pub struct Decoder {
    keys: Arc<KeyPair>,
    audit: Option<Arc<dyn AuditSink>>,
}

impl Decoder {
    /// Create a decoder for `keys`.
    pub fn new(keys: Arc<KeyPair>) -> Self {
        Self { keys, audit: None }
    }

    /// Attach an audit sink.
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Decrypt a parsed blob.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::Padding`] on decryption failure.
    pub fn decrypt(&self, blob: &CombinedBlob) -> Result<Vec<u8>, CascadeError> {
        let plaintext = double_decrypt(&self.keys, &blob.iv, &blob.nonce, &blob.ciphertext)
            .map_err(|e| {
                debug!(code = e.code(), blob_len = blob.encoded_len(), "decryption failed");
                e
            })?;

        let event = AuditEvent {
            plaintext_len: plaintext.len(),
            blob_len: blob.encoded_len(),
        };
        debug!(plaintext_len = event.plaintext_len, blob_len = event.blob_len, "decrypted");
        if let Some(audit) = &self.audit {
            audit.decrypted(&event, &plaintext);
        }
        Ok(plaintext)
    }

    /// Parse raw combined bytes and decrypt them.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::TruncatedInput`] for inputs shorter than the
    /// 28-byte header, otherwise as [`Decoder::decrypt`].
    pub fn decrypt_bytes(&self, bytes: &[u8]) -> Result<Vec<u8>, CascadeError> {
        self.decrypt(&CombinedBlob::from_bytes(bytes)?)
    }
}

impl std::fmt::Debug for Decoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decoder")
            .field("keys", &self.keys)
            .field("audit", &self.audit.is_some())
            .finish_non_exhaustive()
    }
}
