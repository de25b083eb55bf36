//! PKCS#7 padding for the 16-byte AES block.

use common::protocol::BLOCK_LEN;
use common::CascadeError;

/// Append PKCS#7 padding so the output length is a multiple of [`BLOCK_LEN`].
///
/// Always adds between 1 and 16 bytes; block-aligned input gains a full
/// block of `0x10`.
pub fn pad(data: &[u8]) -> Vec<u8> {
    let n = BLOCK_LEN - data.len() % BLOCK_LEN;
    let mut out = Vec::with_capacity(data.len() + n);
    out.extend_from_slice(data);
    out.resize(data.len() + n, n as u8);
    out
}

/// Strip PKCS#7 padding, returning the unpadded prefix of `padded`.
///
/// # Errors
///
/// Returns [`CascadeError::Padding`] if `padded` is empty, is not a whole
/// number of blocks, or does not end in a valid padding run.
pub fn unpad(padded: &[u8]) -> Result<&[u8], CascadeError> {
    if padded.is_empty() || padded.len() % BLOCK_LEN != 0 {
        return Err(CascadeError::Padding);
    }
    let n = padded[padded.len() - 1] as usize;
    if n == 0 || n > BLOCK_LEN {
        return Err(CascadeError::Padding);
    }
    let (data, tail) = padded.split_at(padded.len() - n);
    if tail.iter().any(|&b| b as usize != n) {
        return Err(CascadeError::Padding);
    }
    Ok(data)
}
