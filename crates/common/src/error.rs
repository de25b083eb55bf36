//! Common error types shared across crates.

use thiserror::Error;

/// Error type for every fallible cascade operation.
///
/// Each variant maps to a short, stable code (see [`CascadeError::code`])
/// that is safe to put in log fields:
/// - [`CascadeError::KeyLength`] → `key_length`
/// - [`CascadeError::Padding`] → `padding`
/// - [`CascadeError::TruncatedInput`] → `truncated_input`
/// - [`CascadeError::Entropy`] → `entropy`
/// - [`CascadeError::Encoding`] → `encoding`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CascadeError {
    /// A supplied key does not match the length its primitive requires.
    #[error("invalid {key} key length: expected {expected} bytes, got {actual}")]
    KeyLength {
        /// Which key was wrong (`"block"` or `"stream"`).
        key: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Unpadding failed after decryption.
    ///
    /// Raised for a wrong key, wrong IV/nonce, or a corrupted or truncated
    /// ciphertext. Nothing is authenticated, so these cases are
    /// indistinguishable from one another and from crafted input.
    #[error("invalid padding: wrong key or corrupted ciphertext")]
    Padding,

    /// The combined blob is too short to hold the IV and nonce.
    #[error("truncated input: {len} bytes is shorter than the 28-byte header")]
    TruncatedInput { len: usize },

    /// The secure random source could not produce bytes.
    #[error("entropy source failure: {0}")]
    Entropy(String),

    /// Transport text is not valid URL-safe base64.
    #[error("invalid transport encoding: {0}")]
    Encoding(String),
}

impl CascadeError {
    /// Returns the machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            CascadeError::KeyLength { .. } => "key_length",
            CascadeError::Padding => "padding",
            CascadeError::TruncatedInput { .. } => "truncated_input",
            CascadeError::Entropy(_) => "entropy",
            CascadeError::Encoding(_) => "encoding",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes() {
        let key = CascadeError::KeyLength {
            key: "block",
            expected: 32,
            actual: 16,
        };
        assert_eq!(key.code(), "key_length");
        assert_eq!(CascadeError::Padding.code(), "padding");
        assert_eq!(
            CascadeError::TruncatedInput { len: 27 }.code(),
            "truncated_input"
        );
        assert_eq!(CascadeError::Entropy("x".into()).code(), "entropy");
        assert_eq!(CascadeError::Encoding("x".into()).code(), "encoding");
    }

    #[test]
    fn display_names_the_offending_key() {
        let e = CascadeError::KeyLength {
            key: "stream",
            expected: 32,
            actual: 31,
        };
        let msg = e.to_string();
        assert!(msg.contains("stream"));
        assert!(msg.contains("31"));
    }

    #[test]
    fn truncated_display_includes_length() {
        let e = CascadeError::TruncatedInput { len: 27 };
        assert!(e.to_string().contains("27 bytes"));
    }
}
