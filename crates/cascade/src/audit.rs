//! Optional audit hook invoked after successful operations.
//!
//! The codec never requires a sink. When one is attached it is called only
//! after an operation has fully succeeded; failures are reported to the
//! caller, not to the sink.

/// Sizes describing one completed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditEvent {
    /// Length of the plaintext in bytes.
    pub plaintext_len: usize,
    /// Length of the combined blob in bytes.
    pub blob_len: usize,
}

/// Receives audit events from an [`crate::Encoder`] or [`crate::Decoder`].
#[cfg_attr(test, mockall::automock)]
pub trait AuditSink: Send + Sync {
    /// Called after a plaintext was encrypted.
    fn encrypted(&self, event: &AuditEvent);

    /// Called after a blob was decrypted, with the recovered plaintext.
    fn decrypted(&self, event: &AuditEvent, plaintext: &[u8]);
}
