//! Wire format of the combined blob exchanged between encoder and decoder.
//!
//! # Layout
//!
//! ```text
//! offset 0   len 16   block-cipher IV
//! offset 16  len 12   stream-cipher nonce
//! offset 28  len n    stream ciphertext (n = padded plaintext length)
//! ```
//!
//! The transport form is the whole blob as URL-safe base64 with `=` padding.

use base64::{engine::general_purpose::URL_SAFE, Engine as _};

use crate::error::CascadeError;

/// Cipher block size in bytes (AES, 128 bits).
pub const BLOCK_LEN: usize = 16;

/// Byte length of the block-cipher IV.
pub const IV_LEN: usize = 16;

/// Byte length of the stream-cipher nonce (96 bits).
pub const NONCE_LEN: usize = 12;

/// Fixed prefix before the ciphertext: IV followed by nonce.
pub const HEADER_LEN: usize = IV_LEN + NONCE_LEN;

/// A parsed combined blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedBlob {
    /// Block-cipher initialisation vector.
    pub iv: [u8; IV_LEN],
    /// Stream-cipher nonce.
    pub nonce: [u8; NONCE_LEN],
    /// Output of the stream cipher.
    pub ciphertext: Vec<u8>,
}

impl CombinedBlob {
    /// Total encoded length in bytes.
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.ciphertext.len()
    }

    /// Concatenate `[iv][nonce][ciphertext]`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Split raw bytes at the fixed offsets.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::TruncatedInput`] if `bytes` is shorter than
    /// [`HEADER_LEN`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CascadeError> {
        if bytes.len() < HEADER_LEN {
            return Err(CascadeError::TruncatedInput { len: bytes.len() });
        }
        let (iv_bytes, rest) = bytes.split_at(IV_LEN);
        let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);

        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(iv_bytes);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(nonce_bytes);

        Ok(Self {
            iv,
            nonce,
            ciphertext: ciphertext.to_vec(),
        })
    }

    /// Encode this blob to its transport string.
    pub fn to_transport(&self) -> String {
        URL_SAFE.encode(self.to_bytes())
    }

    /// Parse a transport string back into a [`CombinedBlob`].
    ///
    /// Leading and trailing whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::Encoding`] if `s` is not valid URL-safe base64
    /// and [`CascadeError::TruncatedInput`] if the decoded bytes are too short.
    pub fn from_transport(s: &str) -> Result<Self, CascadeError> {
        let bytes = URL_SAFE
            .decode(s.trim())
            .map_err(|e| CascadeError::Encoding(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CombinedBlob {
        CombinedBlob {
            iv: [0xA1; IV_LEN],
            nonce: [0xB2; NONCE_LEN],
            ciphertext: vec![0xC3; 32],
        }
    }

    #[test]
    fn header_is_28_bytes() {
        assert_eq!(HEADER_LEN, 28);
    }

    #[test]
    fn to_bytes_places_fields_at_fixed_offsets() {
        let bytes = sample().to_bytes();
        assert_eq!(bytes.len(), 60);
        assert!(bytes[..16].iter().all(|&b| b == 0xA1));
        assert!(bytes[16..28].iter().all(|&b| b == 0xB2));
        assert!(bytes[28..].iter().all(|&b| b == 0xC3));
    }

    #[test]
    fn bytes_round_trip() {
        let blob = sample();
        assert_eq!(CombinedBlob::from_bytes(&blob.to_bytes()).unwrap(), blob);
    }

    #[test]
    fn from_bytes_rejects_27_bytes() {
        let err = CombinedBlob::from_bytes(&[0u8; 27]).unwrap_err();
        assert_eq!(err, CascadeError::TruncatedInput { len: 27 });
    }

    #[test]
    fn from_bytes_accepts_bare_header() {
        let blob = CombinedBlob::from_bytes(&[7u8; HEADER_LEN]).unwrap();
        assert!(blob.ciphertext.is_empty());
        assert_eq!(blob.encoded_len(), HEADER_LEN);
    }

    #[test]
    fn transport_round_trip() {
        let blob = sample();
        let s = blob.to_transport();
        assert!(!s.contains('+') && !s.contains('/'));
        assert_eq!(CombinedBlob::from_transport(&s).unwrap(), blob);
    }

    #[test]
    fn from_transport_trims_whitespace() {
        let blob = sample();
        let s = format!("  {}\n", blob.to_transport());
        assert_eq!(CombinedBlob::from_transport(&s).unwrap(), blob);
    }

    #[test]
    fn from_transport_rejects_bad_base64() {
        let err = CombinedBlob::from_transport("!!!not base64!!!").unwrap_err();
        assert_eq!(err.code(), "encoding");
    }

    #[test]
    fn from_transport_rejects_short_payload() {
        let s = URL_SAFE.encode([0u8; 10]);
        let err = CombinedBlob::from_transport(&s).unwrap_err();
        assert_eq!(err, CascadeError::TruncatedInput { len: 10 });
    }
}
