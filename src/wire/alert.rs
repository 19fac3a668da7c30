//! TLS Alert decoding
//!
//! Alerts are a fixed 2-byte structure: level then description. An
//! alert arriving instead of the hello flight is how a server refuses a
//! handshake, so the description name table matters for reporting.

use std::fmt;

use crate::wire::common::{ALERT_LEVEL_FATAL, ALERT_LEVEL_WARNING};
use crate::wire::cursor::ByteCursor;
use crate::wire::error::WireResult;

/// Alert severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    /// Warning (1)
    Warning,
    /// Fatal (2)
    Fatal,
    /// Anything else, preserved raw
    Unknown(u8),
}

impl From<u8> for AlertLevel {
    fn from(v: u8) -> Self {
        match v {
            ALERT_LEVEL_WARNING => Self::Warning,
            ALERT_LEVEL_FATAL => Self::Fatal,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Fatal => write!(f, "fatal"),
            Self::Unknown(v) => write!(f, "unknown ({v})"),
        }
    }
}

/// Alert reason code (RFC 5246 Section 7.2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertDescription(pub u8);

impl AlertDescription {
    /// Registry name for known reason codes
    #[must_use]
    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "close_notify",
            10 => "unexpected_message",
            20 => "bad_record_mac",
            21 => "decryption_failed",
            22 => "record_overflow",
            30 => "decompression_failure",
            40 => "handshake_failure",
            42 => "bad_certificate",
            43 => "unsupported_certificate",
            44 => "certificate_revoked",
            45 => "certificate_expired",
            46 => "certificate_unknown",
            47 => "illegal_parameter",
            48 => "unknown_ca",
            49 => "access_denied",
            50 => "decode_error",
            51 => "decrypt_error",
            70 => "protocol_version",
            71 => "insufficient_security",
            80 => "internal_error",
            86 => "inappropriate_fallback",
            90 => "user_canceled",
            100 => "no_renegotiation",
            110 => "unsupported_extension",
            112 => "unrecognized_name",
            _ => "unknown_alert",
        }
    }
}

impl fmt::Display for AlertDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}

/// A decoded TLS alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alert {
    /// Severity level
    pub level: AlertLevel,
    /// Reason code
    pub description: AlertDescription,
}

impl Alert {
    /// Decode an alert from record payload bytes
    ///
    /// Fails with `Truncated` if fewer than 2 bytes are supplied. Extra
    /// trailing bytes are ignored; some stacks coalesce alerts.
    pub fn decode(payload: &[u8]) -> WireResult<Self> {
        let mut cursor = ByteCursor::from_slice(payload);
        let level = AlertLevel::from(cursor.read_u8()?);
        let description = AlertDescription(cursor.read_u8()?);
        Ok(Self { level, description })
    }

    /// Whether the alert terminates the connection
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.level == AlertLevel::Fatal
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} alert: {}", self.level, self.description)
    }
}
