//! Secure random source for keys, IVs and nonces.

use common::CascadeError;
use rand::{rngs::OsRng, RngCore};

/// A cryptographically secure source of random bytes.
///
/// Failure is terminal for the calling operation; implementations must not
/// fall back to a weaker generator.
#[cfg_attr(test, mockall::automock)]
pub trait EntropySource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    fn fill(&self, dest: &mut [u8]) -> Result<(), CascadeError>;
}

/// The operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CascadeError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CascadeError::Entropy(e.to_string()))
    }
}

/// Draw a fixed-size array from `source`.
pub(crate) fn random_array<const N: usize>(
    source: &dyn EntropySource,
) -> Result<[u8; N], CascadeError> {
    let mut out = [0u8; N];
    source.fill(&mut out)?;
    Ok(out)
}
