//! Cipher building blocks for the cascade pipeline.
//!
//! This module is free of I/O and randomness. It provides padding plus thin
//! wrappers over the RustCrypto primitives, used by [`crate::codec`].
//!
//! # Pipeline
//!
//! ```text
//! encrypt: plaintext -> padding::pad -> block::encrypt -> stream::apply
//! decrypt: ciphertext -> stream::apply -> block::decrypt -> padding::unpad
//! ```

pub mod block;
pub mod padding;
pub mod stream;

/// Byte length of both the AES-256 key and the ChaCha20 key.
pub const KEY_LEN: usize = 32;
