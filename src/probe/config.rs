//! Probe configuration
//!
//! Defaults reproduce a conservative TLS 1.2 probe: CBC-SHA offered
//! first, null compression only, the ec_point_formats and
//! supported_groups extensions, and a short per-read timeout.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::wire::cipher_suites::{CipherSuiteId, DEFAULT_CIPHER_SUITES};
use crate::wire::common::COMPRESSION_NULL;
use crate::wire::error::{WireError, WireResult};
use crate::wire::handshake::Extension;
use crate::wire::version::ProtocolVersion;

/// Default per-read timeout in milliseconds
const DEFAULT_READ_TIMEOUT_MS: u64 = 500;

/// Named groups offered by default: x25519, secp256r1, secp384r1
const DEFAULT_GROUPS: &[u16] = &[0x001d, 0x0017, 0x0018];

/// EC point formats offered by default: uncompressed
const DEFAULT_POINT_FORMATS: &[u8] = &[0x00];

/// Configuration for a handshake probe
///
/// # Example
///
/// ```
/// use tls_probe::probe::ProbeConfig;
/// use tls_probe::wire::CipherSuiteId;
///
/// let config = ProbeConfig {
///     server_name: Some("example.com".to_string()),
///     cipher_suites: vec![CipherSuiteId::RSA_WITH_AES_128_CBC_SHA],
///     ..ProbeConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Protocol version to offer
    #[serde(default = "default_version")]
    pub version: ProtocolVersion,

    /// Cipher suites to offer, in preference order (non-empty)
    #[serde(default = "default_suites")]
    pub cipher_suites: Vec<CipherSuiteId>,

    /// Compression methods to offer (must contain null, 0x00)
    #[serde(default = "default_compression")]
    pub compression_methods: Vec<u8>,

    /// SNI hostname; omitted when `None`
    #[serde(default)]
    pub server_name: Option<String>,

    /// Offer the supported_groups extension
    #[serde(default = "default_true")]
    pub offer_supported_groups: bool,

    /// Offer the ec_point_formats extension
    #[serde(default = "default_true")]
    pub offer_ec_point_formats: bool,

    /// Per-read timeout in milliseconds
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,

    /// Abort on handshake messages the probe does not recognize
    ///
    /// Default is lenient: unknown message types (e.g.
    /// ServerKeyExchange for ECDHE suites) are skipped with a warning,
    /// since the probe only cares about the hello and certificate.
    #[serde(default)]
    pub strict_unknown_handshake: bool,
}

fn default_version() -> ProtocolVersion {
    ProtocolVersion::TLS_1_2
}

fn default_suites() -> Vec<CipherSuiteId> {
    DEFAULT_CIPHER_SUITES.to_vec()
}

fn default_compression() -> Vec<u8> {
    vec![COMPRESSION_NULL]
}

fn default_read_timeout_ms() -> u64 {
    DEFAULT_READ_TIMEOUT_MS
}

fn default_true() -> bool {
    true
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            cipher_suites: default_suites(),
            compression_methods: default_compression(),
            server_name: None,
            offer_supported_groups: true,
            offer_ec_point_formats: true,
            read_timeout_ms: default_read_timeout_ms(),
            strict_unknown_handshake: false,
        }
    }
}

impl ProbeConfig {
    /// Validate the configuration before any I/O happens
    ///
    /// Mirrors the ClientHello structural preconditions so misuse
    /// fails fast with `InvalidHello` instead of mid-handshake.
    pub fn validate(&self) -> WireResult<()> {
        if self.cipher_suites.is_empty() {
            return Err(WireError::invalid_hello("no cipher suites configured"));
        }
        if !self.compression_methods.contains(&COMPRESSION_NULL) {
            return Err(WireError::invalid_hello(
                "compression methods must include null (0x00)",
            ));
        }
        if self.read_timeout_ms == 0 {
            return Err(WireError::invalid_hello("read timeout must be non-zero"));
        }
        Ok(())
    }

    /// Per-read timeout as a `Duration`
    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Extensions the configuration asks the ClientHello to carry
    #[must_use]
    pub fn extensions(&self) -> Vec<Extension> {
        let mut extensions = Vec::new();
        if let Some(host) = &self.server_name {
            extensions.push(Extension::server_name(host));
        }
        if self.offer_supported_groups {
            extensions.push(Extension::supported_groups(DEFAULT_GROUPS));
        }
        if self.offer_ec_point_formats {
            extensions.push(Extension::ec_point_formats(DEFAULT_POINT_FORMATS));
        }
        extensions
    }
}
