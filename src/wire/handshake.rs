//! TLS 1.2 handshake message codec
//!
//! Encodes `ClientHello`; decodes `ServerHello`, `Certificate`,
//! `ServerHelloDone` — and `ClientHello` again, which keeps the codec
//! honest (encode/decode must round-trip).
//!
//! The correctness property everything here exists for: no length
//! field is ever trusted beyond the buffer it was read from. Every
//! nested structure walks through [`ByteCursor`] and surfaces
//! `Truncated` instead of reading out of bounds.
//!
//! Handshake messages carry their own 4-byte header (1-byte type,
//! 3-byte length) independent of record boundaries, so
//! [`MessageAssembler`] stitches message bodies back together from
//! whatever record fragments delivered them.

use tracing::trace;

use crate::wire::cipher_suites::CipherSuiteId;
use crate::wire::common::{
    COMPRESSION_NULL, EXTENSION_TYPE_EC_POINT_FORMATS, EXTENSION_TYPE_SERVER_NAME,
    EXTENSION_TYPE_SIGNATURE_ALGORITHMS, EXTENSION_TYPE_SUPPORTED_GROUPS, HANDSHAKE_HEADER_SIZE,
    HANDSHAKE_TYPE_CERTIFICATE, HANDSHAKE_TYPE_CLIENT_HELLO, HANDSHAKE_TYPE_SERVER_HELLO,
    HANDSHAKE_TYPE_SERVER_HELLO_DONE, HELLO_RANDOM_LEN, MAX_SESSION_ID_LEN,
};
use crate::wire::cursor::ByteCursor;
use crate::wire::error::{WireError, WireResult};
use crate::wire::version::ProtocolVersion;

// =============================================================================
// Extensions
// =============================================================================

/// A TLS extension: type plus opaque payload
///
/// Unknown extension types decode as opaque bytes and are preserved in
/// arrival order; nothing here requires understanding the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    /// Extension type (IANA registry value)
    pub ext_type: u16,
    /// Opaque extension payload
    pub data: Vec<u8>,
}

impl Extension {
    /// Build a server_name (SNI) extension for a single hostname
    #[must_use]
    pub fn server_name(host: &str) -> Self {
        let name = host.as_bytes();
        let mut data = ByteCursor::new();
        data.write_u16((name.len() + 3) as u16); // server name list length
        data.write_u8(0x00); // name type: host_name
        data.write_u16(name.len() as u16);
        data.write_bytes(name);
        Self {
            ext_type: EXTENSION_TYPE_SERVER_NAME,
            data: data.into_bytes(),
        }
    }

    /// Build a supported_groups extension (named curves)
    #[must_use]
    pub fn supported_groups(groups: &[u16]) -> Self {
        let mut data = ByteCursor::new();
        data.write_u16((groups.len() * 2) as u16);
        for &group in groups {
            data.write_u16(group);
        }
        Self {
            ext_type: EXTENSION_TYPE_SUPPORTED_GROUPS,
            data: data.into_bytes(),
        }
    }

    /// Build an ec_point_formats extension
    #[must_use]
    pub fn ec_point_formats(formats: &[u8]) -> Self {
        let mut data = ByteCursor::new();
        data.write_u8(formats.len() as u8);
        data.write_bytes(formats);
        Self {
            ext_type: EXTENSION_TYPE_EC_POINT_FORMATS,
            data: data.into_bytes(),
        }
    }

    /// Build a signature_algorithms extension
    ///
    /// Each entry is a `SignatureAndHashAlgorithm` pair packed as u16,
    /// e.g. 0x0401 = rsa_pkcs1_sha256.
    #[must_use]
    pub fn signature_algorithms(algorithms: &[u16]) -> Self {
        let mut data = ByteCursor::new();
        data.write_u16((algorithms.len() * 2) as u16);
        for &alg in algorithms {
            data.write_u16(alg);
        }
        Self {
            ext_type: EXTENSION_TYPE_SIGNATURE_ALGORITHMS,
            data: data.into_bytes(),
        }
    }

    fn encode(&self, out: &mut ByteCursor) {
        out.write_u16(self.ext_type);
        out.write_u16(self.data.len() as u16);
        out.write_bytes(&self.data);
    }
}

/// Decode an extension block (2-byte total length + entries)
///
/// Ordering is preserved. Fails with `Truncated` if any declared
/// length runs past the supplied bytes.
fn decode_extensions(cursor: &mut ByteCursor) -> WireResult<Vec<Extension>> {
    let total = cursor.read_u16()? as usize;
    let mut block = ByteCursor::from_slice(cursor.read_bytes(total)?);

    let mut extensions = Vec::new();
    while !block.is_empty() {
        let ext_type = block.read_u16()?;
        let len = block.read_u16()? as usize;
        let data = block.read_bytes(len)?.to_vec();
        extensions.push(Extension { ext_type, data });
    }
    Ok(extensions)
}

fn encode_extensions(extensions: &[Extension], out: &mut ByteCursor) {
    let mut block = ByteCursor::new();
    for ext in extensions {
        ext.encode(&mut block);
    }
    out.write_u16(block.len() as u16);
    out.write_bytes(block.as_bytes());
}

// =============================================================================
// ClientHello
// =============================================================================

/// A ClientHello message
///
/// Built once per handshake attempt and immutable afterwards. The
/// random must be fresh per attempt; the session codec never reuses
/// one across probes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientHello {
    /// Offered protocol version
    pub version: ProtocolVersion,
    /// 32 bytes of client randomness
    pub random: [u8; HELLO_RANDOM_LEN],
    /// Session ID, 0–32 bytes (empty for a fresh probe)
    pub session_id: Vec<u8>,
    /// Offered cipher suites in preference order (non-empty)
    pub cipher_suites: Vec<CipherSuiteId>,
    /// Offered compression methods (must contain null, 0x00)
    pub compression_methods: Vec<u8>,
    /// Extensions in offer order
    pub extensions: Vec<Extension>,
}

impl ClientHello {
    /// Structural preconditions, checked before any bytes are built
    fn validate(&self) -> WireResult<()> {
        if self.cipher_suites.is_empty() {
            return Err(WireError::invalid_hello("cipher suite list is empty"));
        }
        if self.compression_methods.is_empty() {
            return Err(WireError::invalid_hello("compression method list is empty"));
        }
        if !self.compression_methods.contains(&COMPRESSION_NULL) {
            return Err(WireError::invalid_hello(
                "compression method list lacks null (0x00)",
            ));
        }
        if self.session_id.len() > MAX_SESSION_ID_LEN {
            return Err(WireError::invalid_hello(format!(
                "session ID too long: {} bytes (max {MAX_SESSION_ID_LEN})",
                self.session_id.len()
            )));
        }
        Ok(())
    }

    /// Encode as a complete handshake message (header + body)
    pub fn encode(&self) -> WireResult<Vec<u8>> {
        self.validate()?;

        let mut body = ByteCursor::new();
        body.write_u16(self.version.0);
        body.write_bytes(&self.random);
        body.write_u8(self.session_id.len() as u8);
        body.write_bytes(&self.session_id);
        body.write_u16((self.cipher_suites.len() * 2) as u16);
        for suite in &self.cipher_suites {
            body.write_u16(suite.0);
        }
        body.write_u8(self.compression_methods.len() as u8);
        body.write_bytes(&self.compression_methods);
        if !self.extensions.is_empty() {
            encode_extensions(&self.extensions, &mut body);
        }

        let mut msg = ByteCursor::new();
        msg.write_u8(HANDSHAKE_TYPE_CLIENT_HELLO);
        msg.write_u24(body.len() as u32);
        msg.write_bytes(body.as_bytes());
        Ok(msg.into_bytes())
    }

    /// Decode a ClientHello body (handshake header already consumed)
    pub fn decode(body: &[u8]) -> WireResult<Self> {
        let mut cursor = ByteCursor::from_slice(body);
        let version = ProtocolVersion(cursor.read_u16()?);

        let mut random = [0u8; HELLO_RANDOM_LEN];
        random.copy_from_slice(cursor.read_bytes(HELLO_RANDOM_LEN)?);

        let session_id_len = cursor.read_u8()? as usize;
        let session_id = cursor.read_bytes(session_id_len)?.to_vec();

        let suites_len = cursor.read_u16()? as usize;
        let mut suites = ByteCursor::from_slice(cursor.read_bytes(suites_len)?);
        let mut cipher_suites = Vec::with_capacity(suites_len / 2);
        while !suites.is_empty() {
            cipher_suites.push(CipherSuiteId(suites.read_u16()?));
        }

        let compression_len = cursor.read_u8()? as usize;
        let compression_methods = cursor.read_bytes(compression_len)?.to_vec();

        let extensions = if cursor.is_empty() {
            Vec::new()
        } else {
            decode_extensions(&mut cursor)?
        };

        Ok(Self {
            version,
            random,
            session_id,
            cipher_suites,
            compression_methods,
            extensions,
        })
    }
}

// =============================================================================
// ServerHello
// =============================================================================

/// A decoded ServerHello
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerHello {
    /// Negotiated protocol version
    pub version: ProtocolVersion,
    /// 32 bytes of server randomness
    pub random: [u8; HELLO_RANDOM_LEN],
    /// Session ID assigned (or echoed) by the server
    pub session_id: Vec<u8>,
    /// The single suite the server selected
    pub cipher_suite: CipherSuiteId,
    /// Selected compression method
    pub compression_method: u8,
    /// Extensions, empty when the server sent none
    pub extensions: Vec<Extension>,
}

impl ServerHello {
    /// Decode a ServerHello body (handshake header already consumed)
    pub fn decode(body: &[u8]) -> WireResult<Self> {
        let mut cursor = ByteCursor::from_slice(body);
        let version = ProtocolVersion(cursor.read_u16()?);

        let mut random = [0u8; HELLO_RANDOM_LEN];
        random.copy_from_slice(cursor.read_bytes(HELLO_RANDOM_LEN)?);

        let session_id_len = cursor.read_u8()? as usize;
        let session_id = cursor.read_bytes(session_id_len)?.to_vec();

        let cipher_suite = CipherSuiteId(cursor.read_u16()?);
        let compression_method = cursor.read_u8()?;

        // The extension block is optional in TLS 1.2 ServerHello
        let extensions = if cursor.is_empty() {
            Vec::new()
        } else {
            decode_extensions(&mut cursor)?
        };

        if !cursor.is_empty() {
            trace!(trailing = cursor.remaining(), "trailing bytes after ServerHello");
        }

        Ok(Self {
            version,
            random,
            session_id,
            cipher_suite,
            compression_method,
            extensions,
        })
    }
}

// =============================================================================
// Certificate
// =============================================================================

/// The server's certificate chain, leaf first
///
/// Entries are opaque DER blobs; validation is a collaborator's
/// problem, not this codec's.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CertificateChain {
    /// DER-encoded certificates in chain order
    pub certificates: Vec<Vec<u8>>,
}

impl CertificateChain {
    /// Decode a TLS 1.2 Certificate body (handshake header already consumed)
    ///
    /// Layout: 3-byte list length, then per entry a 3-byte length and
    /// the DER bytes.
    pub fn decode(body: &[u8]) -> WireResult<Self> {
        let mut cursor = ByteCursor::from_slice(body);
        let list_len = cursor.read_u24()? as usize;
        let mut list = ByteCursor::from_slice(cursor.read_bytes(list_len)?);

        let mut certificates = Vec::new();
        while !list.is_empty() {
            let cert_len = list.read_u24()? as usize;
            certificates.push(list.read_bytes(cert_len)?.to_vec());
        }
        Ok(Self { certificates })
    }

    /// Number of certificates in the chain
    #[must_use]
    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    /// Whether the server sent an empty chain
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    /// The leaf (end-entity) certificate, if any
    #[must_use]
    pub fn leaf(&self) -> Option<&[u8]> {
        self.certificates.first().map(Vec::as_slice)
    }
}

// =============================================================================
// Message dispatch and reassembly
// =============================================================================

/// A decoded handshake message from the probe's supported subset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandshakeMessage {
    /// ClientHello (1)
    ClientHello(ClientHello),
    /// ServerHello (2)
    ServerHello(ServerHello),
    /// Certificate (11)
    Certificate(CertificateChain),
    /// ServerHelloDone (14) — empty body
    ServerHelloDone,
}

/// Decode one handshake message body by its type tag
///
/// `UnknownHandshakeType` is recoverable: the caller decides whether to
/// skip the message or abort the handshake.
pub fn decode_handshake_message(msg_type: u8, body: &[u8]) -> WireResult<HandshakeMessage> {
    match msg_type {
        HANDSHAKE_TYPE_CLIENT_HELLO => Ok(HandshakeMessage::ClientHello(ClientHello::decode(body)?)),
        HANDSHAKE_TYPE_SERVER_HELLO => Ok(HandshakeMessage::ServerHello(ServerHello::decode(body)?)),
        HANDSHAKE_TYPE_CERTIFICATE => {
            Ok(HandshakeMessage::Certificate(CertificateChain::decode(body)?))
        }
        HANDSHAKE_TYPE_SERVER_HELLO_DONE => Ok(HandshakeMessage::ServerHelloDone),
        other => Err(WireError::UnknownHandshakeType(other)),
    }
}

/// A raw handshake message: type tag plus complete body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHandshakeMessage {
    /// Handshake type tag
    pub msg_type: u8,
    /// Complete message body
    pub body: Vec<u8>,
}

/// Reassembles handshake messages from record payloads
///
/// Messages are length-prefixed independently of record boundaries;
/// this buffer joins fragments spanning records and splits messages
/// coalesced into one record.
#[derive(Debug, Default)]
pub struct MessageAssembler {
    buf: Vec<u8>,
}

impl MessageAssembler {
    /// Create an empty assembler
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the payload of a handshake-type record
    pub fn feed(&mut self, record_payload: &[u8]) {
        self.buf.extend_from_slice(record_payload);
    }

    /// Whether a partial message is still sitting in the buffer
    ///
    /// At stream end this means truncation: a message header arrived
    /// but its body never did.
    #[must_use]
    pub fn has_partial(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Bytes still needed to complete the buffered message, if one is pending
    #[must_use]
    pub fn pending_bytes(&self) -> Option<usize> {
        if self.buf.is_empty() {
            return None;
        }
        if self.buf.len() < HANDSHAKE_HEADER_SIZE {
            return Some(HANDSHAKE_HEADER_SIZE - self.buf.len());
        }
        let body_len = (usize::from(self.buf[1]) << 16)
            | (usize::from(self.buf[2]) << 8)
            | usize::from(self.buf[3]);
        let total = HANDSHAKE_HEADER_SIZE + body_len;
        (self.buf.len() < total).then(|| total - self.buf.len())
    }

    /// Try to pull one complete message out of the buffer
    ///
    /// Returns `Ok(None)` while the header or body is incomplete.
    pub fn next_message(&mut self) -> Option<RawHandshakeMessage> {
        if self.buf.len() < HANDSHAKE_HEADER_SIZE {
            return None;
        }

        let body_len = (usize::from(self.buf[1]) << 16)
            | (usize::from(self.buf[2]) << 8)
            | usize::from(self.buf[3]);
        let total = HANDSHAKE_HEADER_SIZE + body_len;
        if self.buf.len() < total {
            trace!(
                buffered = self.buf.len(),
                needed = total,
                "handshake message incomplete"
            );
            return None;
        }

        let msg_type = self.buf[0];
        let body = self.buf[HANDSHAKE_HEADER_SIZE..total].to_vec();
        self.buf.drain(..total);

        trace!(msg_type, body_len, "handshake message reassembled");
        Some(RawHandshakeMessage { msg_type, body })
    }
}
