//! Error types for the wire-format codecs
//!
//! Every decode path in [`crate::wire`] returns a typed failure instead
//! of panicking; `Truncated` in particular is the guarantee that no
//! length field is ever trusted past the buffer it was read from.

use thiserror::Error;

/// Wire-format encode/decode errors
#[derive(Debug, Error)]
pub enum WireError {
    /// Fewer bytes remain than a length field or fixed structure requires
    #[error("Truncated data: needed {needed} bytes, {available} available")]
    Truncated {
        /// Bytes the decoder needed
        needed: usize,
        /// Bytes actually remaining
        available: usize,
    },

    /// Record payload exceeds the configured maximum
    #[error("Record payload too large: {len} bytes (max {max})")]
    PayloadTooLarge {
        /// Offered payload length
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// ClientHello fails its structural preconditions
    #[error("Invalid ClientHello: {0}")]
    InvalidHello(String),

    /// Handshake message tag not in the supported subset
    ///
    /// Recoverable: the caller may skip the message and continue.
    #[error("Unknown handshake message type: {0}")]
    UnknownHandshakeType(u8),
}

impl WireError {
    /// Create a truncation error
    pub fn truncated(needed: usize, available: usize) -> Self {
        Self::Truncated { needed, available }
    }

    /// Create an invalid ClientHello error
    pub fn invalid_hello(msg: impl Into<String>) -> Self {
        Self::InvalidHello(msg.into())
    }

    /// Whether the error can be resolved by waiting for more data
    ///
    /// Only truncation qualifies, and only while the stream is still
    /// live; at stream end it is fatal.
    #[must_use]
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }
}

/// Type alias for Result with `WireError`
pub type WireResult<T> = std::result::Result<T, WireError>;
