//! TLS 1.2 cipher-suite registry
//!
//! Cipher suites travel on the wire as bare 2-byte IDs, so the registry
//! is a newtype over `u16` with named constants rather than a closed
//! enum: an ID the probe does not recognize is still carried and
//! reported verbatim. Only display names need the registry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A TLS cipher-suite identifier (IANA registry value)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CipherSuiteId(pub u16);

/// Default suites offered by the probe, in preference order
///
/// CBC-SHA first: it is the most widely answered suite for a probe that
/// only wants to see the server's hello flight.
pub const DEFAULT_CIPHER_SUITES: &[CipherSuiteId] = &[
    CipherSuiteId::RSA_WITH_AES_128_CBC_SHA,
    CipherSuiteId::RSA_WITH_AES_256_CBC_SHA,
    CipherSuiteId::ECDHE_RSA_WITH_AES_128_GCM_SHA256,
    CipherSuiteId::ECDHE_RSA_WITH_AES_256_GCM_SHA384,
];

impl CipherSuiteId {
    /// TLS_RSA_WITH_AES_128_CBC_SHA (0x002F)
    pub const RSA_WITH_AES_128_CBC_SHA: Self = Self(0x002F);

    /// TLS_RSA_WITH_AES_256_CBC_SHA (0x0035)
    pub const RSA_WITH_AES_256_CBC_SHA: Self = Self(0x0035);

    /// TLS_RSA_WITH_AES_128_GCM_SHA256 (0x009C)
    pub const RSA_WITH_AES_128_GCM_SHA256: Self = Self(0x009C);

    /// TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA (0xC013)
    pub const ECDHE_RSA_WITH_AES_128_CBC_SHA: Self = Self(0xC013);

    /// TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256 (0xC02F)
    pub const ECDHE_RSA_WITH_AES_128_GCM_SHA256: Self = Self(0xC02F);

    /// TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384 (0xC030)
    pub const ECDHE_RSA_WITH_AES_256_GCM_SHA384: Self = Self(0xC030);

    /// TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256 (0xC02B)
    pub const ECDHE_ECDSA_WITH_AES_128_GCM_SHA256: Self = Self(0xC02B);

    /// Raw wire value
    #[must_use]
    pub fn id(self) -> u16 {
        self.0
    }

    /// Registry name for known suites, `None` otherwise
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        match self.0 {
            0x002F => Some("TLS_RSA_WITH_AES_128_CBC_SHA"),
            0x0035 => Some("TLS_RSA_WITH_AES_256_CBC_SHA"),
            0x009C => Some("TLS_RSA_WITH_AES_128_GCM_SHA256"),
            0xC013 => Some("TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA"),
            0xC02F => Some("TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256"),
            0xC030 => Some("TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384"),
            0xC02B => Some("TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256"),
            _ => None,
        }
    }

    /// Whether the ID is in the registry of suites this probe knows
    #[must_use]
    pub fn is_known(self) -> bool {
        self.name().is_some()
    }
}

impl From<u16> for CipherSuiteId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl fmt::Display for CipherSuiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} (0x{:04x})", self.0),
            None => write!(f, "unknown (0x{:04x})", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_suite_names() {
        assert_eq!(
            CipherSuiteId::RSA_WITH_AES_128_CBC_SHA.name(),
            Some("TLS_RSA_WITH_AES_128_CBC_SHA")
        );
        assert_eq!(CipherSuiteId::RSA_WITH_AES_128_CBC_SHA.id(), 0x002F);
        assert!(CipherSuiteId::ECDHE_RSA_WITH_AES_128_GCM_SHA256.is_known());
    }

    #[test]
    fn test_unknown_suite_preserved() {
        let suite = CipherSuiteId::from(0x1337);
        assert_eq!(suite.id(), 0x1337);
        assert_eq!(suite.name(), None);
        assert!(!suite.is_known());
        assert_eq!(suite.to_string(), "unknown (0x1337)");
    }

    #[test]
    fn test_defaults_are_known_and_ordered() {
        assert!(!DEFAULT_CIPHER_SUITES.is_empty());
        assert_eq!(
            DEFAULT_CIPHER_SUITES[0],
            CipherSuiteId::RSA_WITH_AES_128_CBC_SHA
        );
        for suite in DEFAULT_CIPHER_SUITES {
            assert!(suite.is_known(), "default suite {suite} must be in registry");
        }
    }

    #[test]
    fn test_display_known() {
        let s = CipherSuiteId::RSA_WITH_AES_256_CBC_SHA.to_string();
        assert!(s.contains("TLS_RSA_WITH_AES_256_CBC_SHA"));
        assert!(s.contains("0x0035"));
    }
}
