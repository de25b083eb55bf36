//! [`KeyPair`]: the two independent keys of the cascade.
//!
//! Keys are opaque to this crate. They are never logged, and their memory is
//! zeroed when the pair is dropped.

use common::CascadeError;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::KEY_LEN;
use crate::entropy::{random_array, EntropySource};

/// The AES-256 block key and the ChaCha20 stream key.
///
/// Immutable once built and safe to share across threads by reference.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyPair {
    block: [u8; KEY_LEN],
    stream: [u8; KEY_LEN],
}

impl KeyPair {
    /// Build a key pair from two fixed-size keys.
    pub fn new(block: [u8; KEY_LEN], stream: [u8; KEY_LEN]) -> Self {
        Self { block, stream }
    }

    /// Build a key pair from caller-supplied slices.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::KeyLength`] naming the first key that is not
    /// exactly [`KEY_LEN`] bytes.
    pub fn from_slices(block: &[u8], stream: &[u8]) -> Result<Self, CascadeError> {
        Ok(Self {
            block: to_key("block", block)?,
            stream: to_key("stream", stream)?,
        })
    }

    /// Generate both keys from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::Entropy`] if the source fails.
    pub fn generate(source: &dyn EntropySource) -> Result<Self, CascadeError> {
        Ok(Self {
            block: random_array(source)?,
            stream: random_array(source)?,
        })
    }

    /// The AES-256 key.
    pub fn block_key(&self) -> &[u8; KEY_LEN] {
        &self.block
    }

    /// The ChaCha20 key.
    pub fn stream_key(&self) -> &[u8; KEY_LEN] {
        &self.stream
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyPair([REDACTED])")
    }
}

fn to_key(key: &'static str, bytes: &[u8]) -> Result<[u8; KEY_LEN], CascadeError> {
    bytes.try_into().map_err(|_| CascadeError::KeyLength {
        key,
        expected: KEY_LEN,
        actual: bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::{MockEntropySource, OsEntropy};

    #[test]
    fn from_slices_accepts_exact_lengths() {
        let pair = KeyPair::from_slices(&[1u8; KEY_LEN], &[2u8; KEY_LEN]).unwrap();
        assert_eq!(pair.block_key(), &[1u8; KEY_LEN]);
        assert_eq!(pair.stream_key(), &[2u8; KEY_LEN]);
    }

    #[test]
    fn from_slices_rejects_short_block_key() {
        let err = KeyPair::from_slices(&[0u8; 16], &[0u8; KEY_LEN]).unwrap_err();
        assert_eq!(
            err,
            CascadeError::KeyLength {
                key: "block",
                expected: KEY_LEN,
                actual: 16
            }
        );
    }

    #[test]
    fn from_slices_rejects_long_stream_key() {
        let err = KeyPair::from_slices(&[0u8; KEY_LEN], &[0u8; 33]).unwrap_err();
        assert!(matches!(err, CascadeError::KeyLength { key: "stream", actual: 33, .. }));
    }

    #[test]
    fn generate_draws_independent_keys() {
        let pair = KeyPair::generate(&OsEntropy).unwrap();
        assert_ne!(pair.block_key(), pair.stream_key());
    }

    #[test]
    fn generate_fails_on_entropy_failure() {
        let mut source = MockEntropySource::new();
        source
            .expect_fill()
            .times(1)
            .returning(|_| Err(CascadeError::Entropy("unavailable".into())));
        assert!(KeyPair::generate(&source).is_err());
    }

    #[test]
    fn key_pair_redacted_in_debug() {
        let pair = KeyPair::new([0xFF; KEY_LEN], [0xEE; KEY_LEN]);
        let shown = format!("{pair:?}");
        assert!(shown.contains("REDACTED"));
        assert!(!shown.contains("255"));
    }
}
