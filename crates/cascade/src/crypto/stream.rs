//! ChaCha20 (RFC 8439, 96-bit nonce) keystream application.
//!
//! The same call encrypts and decrypts.

use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::ChaCha20;
use common::protocol::NONCE_LEN;
use common::CascadeError;

use super::KEY_LEN;

/// XOR `data` with the ChaCha20 keystream for `key` and `nonce`.
///
/// The output has the same length as `data`.
///
/// # Errors
///
/// Returns [`CascadeError::KeyLength`] if `key` is not [`KEY_LEN`] bytes.
pub fn apply(key: &[u8], nonce: &[u8; NONCE_LEN], data: &[u8]) -> Result<Vec<u8>, CascadeError> {
    let key_error = || CascadeError::KeyLength {
        key: "stream",
        expected: KEY_LEN,
        actual: key.len(),
    };
    let mut cipher = ChaCha20::new_from_slices(key, nonce).map_err(|_| key_error())?;

    let mut buf = data.to_vec();
    cipher.apply_keystream(&mut buf);
    Ok(buf)
}
