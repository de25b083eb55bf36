//! Error taxonomy and wire format shared across `cascade-enc` crates.

pub mod error;
pub mod protocol;

pub use error::CascadeError;
pub use protocol::CombinedBlob;
