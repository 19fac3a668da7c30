//! TLS protocol version newtype
//!
//! Versions are 2-byte wire values. Unknown values are preserved raw
//! rather than rejected so a server speaking something newer (or
//! stranger) than we know still decodes cleanly.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A TLS protocol version as it appears on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtocolVersion(pub u16);

impl ProtocolVersion {
    /// SSL 3.0 (0x0300)
    pub const SSL_3_0: Self = Self(0x0300);

    /// TLS 1.0 (0x0301)
    pub const TLS_1_0: Self = Self(0x0301);

    /// TLS 1.1 (0x0302)
    pub const TLS_1_1: Self = Self(0x0302);

    /// TLS 1.2 (0x0303)
    pub const TLS_1_2: Self = Self(0x0303);

    /// TLS 1.3 (0x0304) — only ever seen in extensions, but a server
    /// echoing it in a record header must still decode
    pub const TLS_1_3: Self = Self(0x0304);

    /// Major version byte
    #[must_use]
    pub fn major(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Minor version byte
    #[must_use]
    pub fn minor(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Whether this is one of the known SSL/TLS enumerants
    #[must_use]
    pub fn is_known(self) -> bool {
        (0x0300..=0x0304).contains(&self.0)
    }
}

impl From<u16> for ProtocolVersion {
    fn from(v: u16) -> Self {
        Self(v)
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0x0300 => write!(f, "SSLv3"),
            0x0301 => write!(f, "TLSv1.0"),
            0x0302 => write!(f, "TLSv1.1"),
            0x0303 => write!(f, "TLSv1.2"),
            0x0304 => write!(f, "TLSv1.3"),
            v => write!(f, "unknown (0x{v:04x})"),
        }
    }
}
