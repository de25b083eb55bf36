//! Cascade encryption: AES-256-CBC followed by ChaCha20.
//!
//! Plaintext is PKCS#7-padded, encrypted under AES-256 in CBC mode with a
//! random 16-byte IV, then XORed with a ChaCha20 keystream under a second key
//! and a random 12-byte nonce. The result travels as a single
//! [`CombinedBlob`]: `[iv][nonce][ciphertext]`.
//!
//! ```no_run
//! use std::sync::Arc;
//! use cascade::{Decoder, Encoder, KeyPair, OsEntropy};
//!
//! let keys = Arc::new(KeyPair::generate(&OsEntropy)?);
//! let blob = Encoder::new(keys.clone()).encrypt(b"attack at dawn")?;
//! let text = Decoder::new(keys).decrypt_bytes(&blob.to_bytes())?;
//! assert_eq!(text, b"attack at dawn");
//! # Ok::<(), cascade::CascadeError>(())
//! ```
//!
//! This is confidentiality only. No integrity tag is computed, so tampering
//! is not reliably detected (see [`codec`]).

pub mod audit;
pub mod codec;
pub mod crypto;
pub mod entropy;
pub mod keys;

pub use audit::{AuditEvent, AuditSink};
pub use codec::{double_decrypt, double_encrypt, double_encrypt_with, Decoder, Encoder, Sealed};
pub use common::{CascadeError, CombinedBlob};
pub use crypto::KEY_LEN;
pub use entropy::{EntropySource, OsEntropy};
pub use keys::KeyPair;
