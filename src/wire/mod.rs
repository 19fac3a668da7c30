//! TLS 1.2 wire format: records, handshake messages, alerts
//!
//! This module owns every byte-level concern of the probe:
//!
//! - [`cursor`]: bounds-checked [`ByteCursor`] every codec builds on
//! - [`record`]: record framing and stream reassembly
//! - [`handshake`]: ClientHello encoding, server flight decoding,
//!   message reassembly across record boundaries
//! - [`alert`]: alert decoding with the RFC 5246 reason-code names
//! - [`cipher_suites`]: the cipher-suite registry
//! - [`version`]: protocol version newtype
//! - [`common`]: shared wire constants
//!
//! The codecs are byte-exact with RFC 5246 §6.2 (record layer) and §7
//! (handshake protocol) for the subset the probe speaks. The one rule
//! enforced everywhere: a length field is never trusted beyond the
//! buffer it was read from.

pub mod alert;
pub mod cipher_suites;
pub mod common;
pub mod cursor;
pub mod error;
pub mod handshake;
pub mod record;
pub mod version;

pub use alert::{Alert, AlertDescription, AlertLevel};
pub use cipher_suites::{CipherSuiteId, DEFAULT_CIPHER_SUITES};
pub use cursor::ByteCursor;
pub use error::{WireError, WireResult};
pub use handshake::{
    decode_handshake_message, CertificateChain, ClientHello, Extension, HandshakeMessage,
    MessageAssembler, RawHandshakeMessage, ServerHello,
};
pub use record::{frame, frame_message, RecordAssembler, TlsRecord};
pub use version::ProtocolVersion;
