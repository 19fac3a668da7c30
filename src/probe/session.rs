//! Sans-I/O handshake session
//!
//! [`HandshakeSession`] is the probe's state machine, free of any I/O:
//! it hands out the encoded ClientHello record, consumes raw bytes fed
//! from the transport, and walks
//!
//! ```text
//! Idle → AwaitingServerHello → AwaitingCertificate
//!      → AwaitingServerHelloDone → Complete
//! ```
//!
//! with every state able to drop to `Failed` on an alert, a malformed
//! or out-of-order message, or an unoffered cipher suite. Message
//! processing order is exactly network arrival order as reconstructed
//! by the record and message assemblers; nothing is reordered or
//! processed speculatively.
//!
//! Each session owns its buffers and is used for exactly one attempt;
//! the ClientHello random is freshly drawn per session and never
//! reused.

use rand::Rng;
use tracing::{debug, warn};

use crate::probe::config::ProbeConfig;
use crate::probe::error::{ProbeError, ProbeResult};
use crate::probe::result::{PartialResponse, ServerResponse};
use crate::wire::alert::Alert;
use crate::wire::common::{
    CONTENT_TYPE_ALERT, CONTENT_TYPE_HANDSHAKE, HELLO_RANDOM_LEN,
};
use crate::wire::error::WireError;
use crate::wire::handshake::{
    decode_handshake_message, CertificateChain, ClientHello, HandshakeMessage, MessageAssembler,
    RawHandshakeMessage, ServerHello,
};
use crate::wire::record::{frame_message, RecordAssembler};

/// Handshake session states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// ClientHello not yet built
    Idle,
    /// ClientHello sent, ServerHello expected next
    AwaitingServerHello,
    /// ServerHello received, Certificate expected next
    AwaitingCertificate,
    /// Certificate received, ServerHelloDone expected next
    AwaitingServerHelloDone,
    /// Full flight received and decoded
    Complete,
    /// Terminal failure
    Failed,
}

/// One handshake attempt's state machine
pub struct HandshakeSession {
    config: ProbeConfig,
    state: SessionState,
    records: RecordAssembler,
    messages: MessageAssembler,
    server_hello: Option<ServerHello>,
    certificates: Option<CertificateChain>,
    raw_received: Vec<u8>,
}

impl HandshakeSession {
    /// Create a session for one attempt
    #[must_use]
    pub fn new(config: ProbeConfig) -> Self {
        Self {
            config,
            state: SessionState::Idle,
            records: RecordAssembler::new(),
            messages: MessageAssembler::new(),
            server_hello: None,
            certificates: None,
            raw_received: Vec::new(),
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the session reached a terminal state
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.state, SessionState::Complete | SessionState::Failed)
    }

    /// Build the ClientHello and return it framed, ready to write
    ///
    /// Transitions `Idle → AwaitingServerHello`. Fails fast with
    /// `InvalidHello` on configuration misuse, before any I/O, and
    /// with a protocol-order error if called twice.
    pub fn client_hello_record(&mut self) -> ProbeResult<Vec<u8>> {
        if self.state != SessionState::Idle {
            return Err(ProbeError::order("ClientHello already sent"));
        }
        self.config.validate().map_err(|e| {
            self.state = SessionState::Failed;
            ProbeError::Wire(e)
        })?;

        let mut random = [0u8; HELLO_RANDOM_LEN];
        rand::thread_rng().fill(&mut random[..]);

        let hello = ClientHello {
            version: self.config.version,
            random,
            session_id: Vec::new(),
            cipher_suites: self.config.cipher_suites.clone(),
            compression_methods: self.config.compression_methods.clone(),
            extensions: self.config.extensions(),
        };

        let message = hello.encode()?;
        let record = frame_message(CONTENT_TYPE_HANDSHAKE, self.config.version, &message)?;
        debug!(
            suites = self.config.cipher_suites.len(),
            extensions = hello.extensions.len(),
            bytes = record.len(),
            "ClientHello built"
        );

        self.state = SessionState::AwaitingServerHello;
        Ok(record)
    }

    /// Feed bytes read off the transport
    ///
    /// Returns `Ok(Some(response))` once ServerHelloDone completes the
    /// flight, `Ok(None)` while more data is needed. Any error is
    /// terminal: the session transitions to `Failed` and must not be
    /// fed again.
    pub fn feed(&mut self, chunk: &[u8]) -> ProbeResult<Option<ServerResponse>> {
        if self.is_terminal() || self.state == SessionState::Idle {
            return Err(ProbeError::order(format!(
                "feed in state {:?}",
                self.state
            )));
        }

        self.raw_received.extend_from_slice(chunk);
        self.records.feed(chunk);

        loop {
            let record = match self.records.next_record() {
                Ok(Some(record)) => record,
                Ok(None) => return Ok(None),
                Err(e) => return Err(self.fail(e.into())),
            };

            match record.content_type {
                CONTENT_TYPE_ALERT => {
                    let alert = match Alert::decode(&record.payload) {
                        Ok(alert) => alert,
                        Err(e) => return Err(self.fail(e.into())),
                    };
                    debug!(%alert, "alert received");
                    return Err(self.fail(ProbeError::AlertReceived(alert)));
                }
                CONTENT_TYPE_HANDSHAKE => {
                    self.messages.feed(&record.payload);
                    while let Some(raw) = self.messages.next_message() {
                        match self.handle_message(&raw) {
                            Ok(()) => {}
                            Err(e) => return Err(self.fail(e)),
                        }
                        if self.state == SessionState::Complete {
                            let response = ServerResponse {
                                server_hello: self
                                    .server_hello
                                    .take()
                                    .ok_or_else(|| ProbeError::order("complete without hello"))?,
                                certificates: self.certificates.take().unwrap_or_default(),
                            };
                            return Ok(Some(response));
                        }
                    }
                }
                other => {
                    return Err(self.fail(ProbeError::order(format!(
                        "unexpected record content type 0x{other:02x} during hello exchange"
                    ))));
                }
            }
        }
    }

    /// Process one reassembled handshake message in arrival order
    fn handle_message(&mut self, raw: &RawHandshakeMessage) -> ProbeResult<()> {
        let message = match decode_handshake_message(raw.msg_type, &raw.body) {
            Ok(message) => message,
            Err(WireError::UnknownHandshakeType(t)) if !self.config.strict_unknown_handshake => {
                warn!(
                    msg_type = t,
                    len = raw.body.len(),
                    "skipping unrecognized handshake message"
                );
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        match (self.state, message) {
            (SessionState::AwaitingServerHello, HandshakeMessage::ServerHello(hello)) => {
                if !self.config.cipher_suites.contains(&hello.cipher_suite) {
                    return Err(ProbeError::UnofferedCipher(hello.cipher_suite));
                }
                debug!(
                    version = %hello.version,
                    suite = %hello.cipher_suite,
                    "ServerHello received"
                );
                self.server_hello = Some(hello);
                self.state = SessionState::AwaitingCertificate;
                Ok(())
            }
            (SessionState::AwaitingCertificate, HandshakeMessage::Certificate(chain)) => {
                debug!(certificates = chain.len(), "Certificate received");
                self.certificates = Some(chain);
                self.state = SessionState::AwaitingServerHelloDone;
                Ok(())
            }
            (
                SessionState::AwaitingCertificate | SessionState::AwaitingServerHelloDone,
                HandshakeMessage::ServerHelloDone,
            ) => {
                // Certificate is omitted for anonymous key exchange;
                // the flight is still complete without it.
                debug!("ServerHelloDone received");
                self.state = SessionState::Complete;
                Ok(())
            }
            (state, message) => Err(ProbeError::order(format!(
                "{} in state {state:?}",
                message_name(&message)
            ))),
        }
    }

    /// Error to report when the stream ended or timed out mid-flight
    ///
    /// Partial data buffered at stream end turns the otherwise
    /// recoverable "need more bytes" into a fatal truncation.
    #[must_use]
    pub fn stream_end_error(&self, base: ProbeError) -> ProbeError {
        if let Some(pending) = self.messages.pending_bytes() {
            return WireError::truncated(pending, 0).into();
        }
        if self.records.buffered() > 0 {
            return WireError::truncated(self.records.buffered(), 0).into();
        }
        base
    }

    /// Mark the session failed and pass the error through
    pub fn fail(&mut self, error: ProbeError) -> ProbeError {
        self.state = SessionState::Failed;
        error
    }

    /// Snapshot of everything received so far, for failure reporting
    #[must_use]
    pub fn partial(&self) -> Option<PartialResponse> {
        let partial = PartialResponse {
            server_hello: self.server_hello.clone(),
            certificates: self.certificates.clone(),
            raw: self.raw_received.clone(),
        };
        (!partial.is_empty()).then_some(partial)
    }
}

fn message_name(message: &HandshakeMessage) -> &'static str {
    match message {
        HandshakeMessage::ClientHello(_) => "ClientHello",
        HandshakeMessage::ServerHello(_) => "ServerHello",
        HandshakeMessage::Certificate(_) => "Certificate",
        HandshakeMessage::ServerHelloDone => "ServerHelloDone",
    }
}
