//! Probe error types
//!
//! One terminal error per handshake attempt. Decoding problems arrive
//! wrapped from [`crate::wire`]; everything the state machine or the
//! transport adds lives here.

use std::io;

use thiserror::Error;

use crate::wire::alert::Alert;
use crate::wire::cipher_suites::CipherSuiteId;
use crate::wire::error::WireError;

/// Errors terminating a handshake probe
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Wire-format encode/decode failure
    #[error("Wire error: {0}")]
    Wire(#[from] WireError),

    /// Server message arrived out of the expected hello-flight sequence
    #[error("Protocol order violation: {0}")]
    ProtocolOrder(String),

    /// ServerHello selected a suite the ClientHello never offered
    #[error("Server selected unoffered cipher suite {0}")]
    UnofferedCipher(CipherSuiteId),

    /// Server answered with an alert instead of the hello flight
    #[error("Server sent {0}")]
    AlertReceived(Alert),

    /// I/O failure on the transport; never retried internally
    #[error("Transport error: {0}")]
    Transport(#[from] io::Error),

    /// No (or not enough) data arrived within the read timeout
    #[error("Timed out waiting for server handshake data")]
    Timeout,

    /// The caller cancelled the probe mid-read
    #[error("Probe cancelled")]
    Cancelled,
}

impl ProbeError {
    /// Create a protocol-order error
    pub fn order(msg: impl Into<String>) -> Self {
        Self::ProtocolOrder(msg.into())
    }

    /// Whether a fresh attempt might succeed
    ///
    /// Retry is caller policy; this only classifies. Transient I/O
    /// conditions and timeouts qualify, protocol violations do not.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Timeout => true,
            Self::Transport(e) => matches!(
                e.kind(),
                io::ErrorKind::TimedOut
                    | io::ErrorKind::Interrupted
                    | io::ErrorKind::WouldBlock
                    | io::ErrorKind::ConnectionReset
            ),
            _ => false,
        }
    }

    /// Short reason tag for reporting (never a byte dump)
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::AlertReceived(alert) => alert.description.name().to_string(),
            Self::Wire(e) => e.to_string(),
            Self::ProtocolOrder(msg) => format!("out-of-order: {msg}"),
            Self::UnofferedCipher(suite) => format!("unoffered cipher suite {suite}"),
            Self::Transport(e) => format!("transport: {e}"),
            Self::Timeout => "timeout".to_string(),
            Self::Cancelled => "cancelled".to_string(),
        }
    }
}

/// Type alias for Result with `ProbeError`
pub type ProbeResult<T> = std::result::Result<T, ProbeError>;
