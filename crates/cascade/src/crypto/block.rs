//! AES-256 in CBC mode over pre-padded input.
//!
//! Padding is the caller's job (see [`super::padding`]); both directions
//! operate on whole blocks only.

use aes::Aes256;
use cbc::cipher::{generic_array::GenericArray, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use common::protocol::{BLOCK_LEN, IV_LEN};
use common::CascadeError;

use super::KEY_LEN;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Encrypt block-aligned `padded` bytes under `key` and `iv`.
///
/// # Errors
///
/// Returns [`CascadeError::KeyLength`] if `key` is not [`KEY_LEN`] bytes and
/// [`CascadeError::Padding`] if `padded` is not block-aligned.
pub fn encrypt(key: &[u8], iv: &[u8; IV_LEN], padded: &[u8]) -> Result<Vec<u8>, CascadeError> {
    if padded.len() % BLOCK_LEN != 0 {
        return Err(CascadeError::Padding);
    }
    let mut cipher =
        Aes256CbcEnc::new_from_slices(key, iv).map_err(|_| key_length_error(key.len()))?;

    let mut buf = padded.to_vec();
    for chunk in buf.chunks_exact_mut(BLOCK_LEN) {
        cipher.encrypt_block_mut(GenericArray::from_mut_slice(chunk));
    }
    Ok(buf)
}

/// Decrypt `ciphertext` under `key` and `iv`, returning the still-padded plaintext.
///
/// # Errors
///
/// Returns [`CascadeError::KeyLength`] if `key` is not [`KEY_LEN`] bytes and
/// [`CascadeError::Padding`] if `ciphertext` is empty or not block-aligned.
pub fn decrypt(key: &[u8], iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Result<Vec<u8>, CascadeError> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(CascadeError::Padding);
    }
    let mut cipher =
        Aes256CbcDec::new_from_slices(key, iv).map_err(|_| key_length_error(key.len()))?;

    let mut buf = ciphertext.to_vec();
    for chunk in buf.chunks_exact_mut(BLOCK_LEN) {
        cipher.decrypt_block_mut(GenericArray::from_mut_slice(chunk));
    }
    Ok(buf)
}

fn key_length_error(actual: usize) -> CascadeError {
    CascadeError::KeyLength {
        key: "block",
        expected: KEY_LEN,
        actual,
    }
}
