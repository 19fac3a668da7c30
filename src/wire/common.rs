//! TLS 1.2 constants shared across the wire modules
//!
//! Values are the RFC 5246 registry numbers for the subset of the
//! protocol this probe speaks: plaintext records, the ClientHello /
//! ServerHello / Certificate / ServerHelloDone flight, and alerts.

// =============================================================================
// TLS ContentType values (RFC 5246 Section 6.2.1)
// =============================================================================

/// TLS ContentType: ChangeCipherSpec
pub const CONTENT_TYPE_CHANGE_CIPHER_SPEC: u8 = 0x14;

/// TLS ContentType: Alert
pub const CONTENT_TYPE_ALERT: u8 = 0x15;

/// TLS ContentType: Handshake
pub const CONTENT_TYPE_HANDSHAKE: u8 = 0x16;

/// TLS ContentType: Application Data
pub const CONTENT_TYPE_APPLICATION_DATA: u8 = 0x17;

// =============================================================================
// TLS Handshake message types (RFC 5246 Section 7.4)
// =============================================================================

/// Handshake type: ClientHello (1)
pub const HANDSHAKE_TYPE_CLIENT_HELLO: u8 = 1;

/// Handshake type: ServerHello (2)
pub const HANDSHAKE_TYPE_SERVER_HELLO: u8 = 2;

/// Handshake type: Certificate (11)
pub const HANDSHAKE_TYPE_CERTIFICATE: u8 = 11;

/// Handshake type: ServerKeyExchange (12)
pub const HANDSHAKE_TYPE_SERVER_KEY_EXCHANGE: u8 = 12;

/// Handshake type: ServerHelloDone (14)
pub const HANDSHAKE_TYPE_SERVER_HELLO_DONE: u8 = 14;

// =============================================================================
// TLS Alert constants (RFC 5246 Section 7.2)
// =============================================================================

/// TLS alert level: Warning
pub const ALERT_LEVEL_WARNING: u8 = 0x01;

/// TLS alert level: Fatal
pub const ALERT_LEVEL_FATAL: u8 = 0x02;

/// TLS alert description: close_notify (0)
pub const ALERT_DESC_CLOSE_NOTIFY: u8 = 0;

/// TLS alert description: unexpected_message (10)
pub const ALERT_DESC_UNEXPECTED_MESSAGE: u8 = 10;

/// TLS alert description: handshake_failure (40)
pub const ALERT_DESC_HANDSHAKE_FAILURE: u8 = 40;

/// TLS alert description: illegal_parameter (47)
pub const ALERT_DESC_ILLEGAL_PARAMETER: u8 = 47;

/// TLS alert description: decode_error (50)
pub const ALERT_DESC_DECODE_ERROR: u8 = 50;

/// TLS alert description: protocol_version (70)
pub const ALERT_DESC_PROTOCOL_VERSION: u8 = 70;

// =============================================================================
// TLS Extension types (IANA TLS ExtensionType registry)
// =============================================================================

/// Extension type: server_name (0)
pub const EXTENSION_TYPE_SERVER_NAME: u16 = 0x0000;

/// Extension type: supported_groups, formerly elliptic_curves (10)
pub const EXTENSION_TYPE_SUPPORTED_GROUPS: u16 = 0x000a;

/// Extension type: ec_point_formats (11)
pub const EXTENSION_TYPE_EC_POINT_FORMATS: u16 = 0x000b;

/// Extension type: signature_algorithms (13)
pub const EXTENSION_TYPE_SIGNATURE_ALGORITHMS: u16 = 0x000d;

// =============================================================================
// Record size limits (RFC 5246 Section 6.2.1)
// =============================================================================

/// Maximum TLS plaintext payload size per record (2^14 = 16,384 bytes)
pub const MAX_TLS_PLAINTEXT_LEN: usize = 16_384;

/// TLS record header size: type (1) + version (2) + length (2)
pub const TLS_RECORD_HEADER_SIZE: usize = 5;

/// Handshake message header size: type (1) + length (3)
pub const HANDSHAKE_HEADER_SIZE: usize = 4;

/// Length of the ClientHello/ServerHello random field
pub const HELLO_RANDOM_LEN: usize = 32;

/// Maximum session ID length (RFC 5246 Section 7.4.1.2)
pub const MAX_SESSION_ID_LEN: usize = 32;

/// Compression method: null (no compression)
pub const COMPRESSION_NULL: u8 = 0x00;
