//! Structured probe outcomes
//!
//! A probe ends exactly once, in exactly one of two shapes: a complete
//! server hello flight, or a named failure. Raw bytes are available
//! only through the failure's `partial` field, explicitly requested —
//! never as the primary output.

use std::fmt;

use crate::probe::error::ProbeError;
use crate::wire::handshake::{CertificateChain, ServerHello};

/// The server's complete hello flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerResponse {
    /// The decoded ServerHello
    pub server_hello: ServerHello,
    /// The certificate chain, leaf first (empty if none was sent)
    pub certificates: CertificateChain,
}

impl fmt::Display for ServerResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} with {}, {} certificate(s)",
            self.server_hello.version,
            self.server_hello.cipher_suite,
            self.certificates.len()
        )
    }
}

/// Whatever had been decoded (and received) when a probe failed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialResponse {
    /// ServerHello, if it arrived before the failure
    pub server_hello: Option<ServerHello>,
    /// Certificate chain, if it arrived before the failure
    pub certificates: Option<CertificateChain>,
    /// Every raw byte received off the transport
    pub raw: Vec<u8>,
}

impl PartialResponse {
    /// Whether anything at all was received
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.server_hello.is_none() && self.certificates.is_none() && self.raw.is_empty()
    }
}

/// Terminal outcome of one handshake probe
#[derive(Debug)]
pub enum ProbeOutcome {
    /// The full hello flight arrived and decoded
    Success(ServerResponse),
    /// The probe failed; partial data is attached when any arrived
    Failure {
        /// Why the probe failed
        reason: ProbeError,
        /// Partial data, if any was received before the failure
        partial: Option<PartialResponse>,
    },
}

impl ProbeOutcome {
    /// Whether the probe completed the hello exchange
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The response, if the probe succeeded
    #[must_use]
    pub fn response(&self) -> Option<&ServerResponse> {
        match self {
            Self::Success(resp) => Some(resp),
            Self::Failure { .. } => None,
        }
    }

    /// Convert into a `Result`, dropping partial data
    pub fn into_result(self) -> Result<ServerResponse, ProbeError> {
        match self {
            Self::Success(resp) => Ok(resp),
            Self::Failure { reason, .. } => Err(reason),
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(resp) => write!(f, "success: {resp}"),
            Self::Failure { reason, partial } => {
                write!(f, "failure: {}", reason.reason())?;
                if let Some(p) = partial {
                    if !p.is_empty() {
                        write!(f, " ({} raw bytes received)", p.raw.len())?;
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::cipher_suites::CipherSuiteId;
    use crate::wire::version::ProtocolVersion;

    fn sample_response() -> ServerResponse {
        ServerResponse {
            server_hello: ServerHello {
                version: ProtocolVersion::TLS_1_2,
                random: [0; 32],
                session_id: Vec::new(),
                cipher_suite: CipherSuiteId::RSA_WITH_AES_128_CBC_SHA,
                compression_method: 0,
                extensions: Vec::new(),
            },
            certificates: CertificateChain {
                certificates: vec![vec![0x30, 0x82]],
            },
        }
    }

    #[test]
    fn test_success_accessors() {
        let outcome = ProbeOutcome::Success(sample_response());
        assert!(outcome.is_success());
        assert!(outcome.response().is_some());
        assert!(outcome.into_result().is_ok());
    }

    #[test]
    fn test_failure_accessors() {
        let outcome = ProbeOutcome::Failure {
            reason: ProbeError::Timeout,
            partial: Some(PartialResponse {
                raw: vec![0x16, 0x03, 0x03],
                ..PartialResponse::default()
            }),
        };
        assert!(!outcome.is_success());
        assert!(outcome.response().is_none());
        assert!(outcome.to_string().contains("timeout"));
        assert!(outcome.to_string().contains("3 raw bytes"));
        assert!(matches!(outcome.into_result(), Err(ProbeError::Timeout)));
    }

    #[test]
    fn test_display_success() {
        let outcome = ProbeOutcome::Success(sample_response());
        let s = outcome.to_string();
        assert!(s.contains("TLSv1.2"));
        assert!(s.contains("TLS_RSA_WITH_AES_128_CBC_SHA"));
        assert!(s.contains("1 certificate"));
    }

    #[test]
    fn test_partial_is_empty() {
        assert!(PartialResponse::default().is_empty());
        let partial = PartialResponse {
            raw: vec![1],
            ..PartialResponse::default()
        };
        assert!(!partial.is_empty());
    }
}
