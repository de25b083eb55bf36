//! [`TracingAudit`]: audit sink that writes records under the `audit` target.

use cascade::{AuditEvent, AuditSink};
use tracing::info;

/// Emits one `info` record per completed operation.
///
/// Plaintext is included only when `include_plaintext` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAudit {
    include_plaintext: bool,
}

impl TracingAudit {
    pub fn new(include_plaintext: bool) -> Self {
        Self { include_plaintext }
    }
}

impl AuditSink for TracingAudit {
    fn encrypted(&self, event: &AuditEvent) {
        info!(
            target: "audit",
            plaintext_len = event.plaintext_len,
            blob_len = event.blob_len,
            "double encrypted"
        );
    }

    fn decrypted(&self, event: &AuditEvent, plaintext: &[u8]) {
        if self.include_plaintext {
            info!(
                target: "audit",
                plaintext_len = event.plaintext_len,
                blob_len = event.blob_len,
                plaintext = %String::from_utf8_lossy(plaintext),
                "decrypted"
            );
        } else {
            info!(
                target: "audit",
                plaintext_len = event.plaintext_len,
                blob_len = event.blob_len,
                "decrypted"
            );
        }
    }
}
