//! End-to-end probe scenarios over a scripted in-memory transport
//!
//! Each test scripts the server side of the exchange as a sequence of
//! transport events (data, EOF, silence) and asserts the single
//! structured outcome the client reports.
//!
//! Run with: `cargo test --test handshake_scenarios`

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;

use tls_probe::probe::{
    HandshakeClient, ProbeConfig, ProbeError, ProbeOutcome, Recv, Transport,
};
use tls_probe::wire::common::{
    CONTENT_TYPE_ALERT, CONTENT_TYPE_HANDSHAKE, HANDSHAKE_TYPE_CERTIFICATE,
    HANDSHAKE_TYPE_SERVER_HELLO, HANDSHAKE_TYPE_SERVER_HELLO_DONE,
};
use tls_probe::wire::{
    frame, ByteCursor, CipherSuiteId, ClientHello, ProtocolVersion, WireError,
};

// ============================================================================
// Scripted transport
// ============================================================================

enum Step {
    Reply(Vec<u8>),
    Eof,
}

struct ScriptedTransport {
    steps: VecDeque<Step>,
    sent: Vec<u8>,
    shutdown_called: bool,
}

impl ScriptedTransport {
    fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
            sent: Vec::new(),
            shutdown_called: false,
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&mut self, data: &[u8]) -> io::Result<()> {
        self.sent.extend_from_slice(data);
        Ok(())
    }

    async fn recv(&mut self, timeout: Duration) -> io::Result<Recv> {
        match self.steps.pop_front() {
            Some(Step::Reply(bytes)) => Ok(Recv::Data(bytes)),
            Some(Step::Eof) => Ok(Recv::Eof),
            // Script exhausted: the server goes silent
            None => {
                tokio::time::sleep(timeout).await;
                Ok(Recv::Timeout)
            }
        }
    }

    async fn shutdown(&mut self) {
        self.shutdown_called = true;
    }
}

// ============================================================================
// Server-side message builders
// ============================================================================

fn server_hello_message(suite: u16) -> Vec<u8> {
    let mut body = ByteCursor::new();
    body.write_u16(0x0303);
    body.write_bytes(&[0x77; 32]);
    body.write_u8(0);
    body.write_u16(suite);
    body.write_u8(0);

    let mut msg = ByteCursor::new();
    msg.write_u8(HANDSHAKE_TYPE_SERVER_HELLO);
    msg.write_u24(body.len() as u32);
    msg.write_bytes(body.as_bytes());
    msg.into_bytes()
}

fn certificate_message(certs: &[&[u8]]) -> Vec<u8> {
    let mut entries = ByteCursor::new();
    for cert in certs {
        entries.write_u24(cert.len() as u32);
        entries.write_bytes(cert);
    }
    let mut body = ByteCursor::new();
    body.write_u24(entries.len() as u32);
    body.write_bytes(entries.as_bytes());

    let mut msg = ByteCursor::new();
    msg.write_u8(HANDSHAKE_TYPE_CERTIFICATE);
    msg.write_u24(body.len() as u32);
    msg.write_bytes(body.as_bytes());
    msg.into_bytes()
}

fn done_message() -> Vec<u8> {
    vec![HANDSHAKE_TYPE_SERVER_HELLO_DONE, 0, 0, 0]
}

fn handshake_record(payload: &[u8]) -> Vec<u8> {
    frame(CONTENT_TYPE_HANDSHAKE, ProtocolVersion::TLS_1_2, payload).unwrap()
}

fn full_flight(suite: u16, cert: &[u8]) -> Vec<u8> {
    let mut payload = server_hello_message(suite);
    payload.extend_from_slice(&certificate_message(&[cert]));
    payload.extend_from_slice(&done_message());
    handshake_record(&payload)
}

fn quick_config() -> ProbeConfig {
    ProbeConfig {
        read_timeout_ms: 50,
        ..ProbeConfig::default()
    }
}

// ============================================================================
// Scenarios
// ============================================================================

/// Scenario A: the server answers the offered suite with a full flight.
#[tokio::test]
async fn full_flight_succeeds() {
    let cert = [0x30, 0x82, 0x01, 0x0A, 0xDE, 0xAD];
    let config = ProbeConfig {
        cipher_suites: vec![CipherSuiteId::RSA_WITH_AES_128_CBC_SHA],
        ..quick_config()
    };
    let mut transport =
        ScriptedTransport::new(vec![Step::Reply(full_flight(0x002F, &cert))]);

    let outcome = HandshakeClient::new(config).probe(&mut transport).await;

    let response = outcome.into_result().expect("probe should succeed");
    assert_eq!(
        response.server_hello.cipher_suite,
        CipherSuiteId::RSA_WITH_AES_128_CBC_SHA
    );
    assert_eq!(response.server_hello.version, ProtocolVersion::TLS_1_2);
    assert_eq!(response.certificates.len(), 1);
    assert_eq!(response.certificates.leaf(), Some(&cert[..]));
}

/// The bytes the client writes are a well-formed ClientHello offering
/// exactly the configured suites.
#[tokio::test]
async fn sent_client_hello_is_well_formed() {
    let config = ProbeConfig {
        server_name: Some("probe.example".to_string()),
        ..quick_config()
    };
    let mut transport = ScriptedTransport::new(vec![Step::Eof]);
    let _ = HandshakeClient::new(config.clone()).probe(&mut transport).await;

    // Record header, then handshake header, then ClientHello body
    assert_eq!(transport.sent[0], CONTENT_TYPE_HANDSHAKE);
    let hello = ClientHello::decode(&transport.sent[9..]).expect("sent hello must decode");
    assert_eq!(hello.version, ProtocolVersion::TLS_1_2);
    assert_eq!(hello.cipher_suites, config.cipher_suites);
    assert_eq!(hello.compression_methods, vec![0x00]);
    assert_eq!(hello.extensions[0].ext_type, 0x0000); // server_name first
}

/// Scenario B: an immediate fatal handshake_failure alert.
#[tokio::test]
async fn fatal_alert_fails_with_named_reason() {
    let alert = frame(CONTENT_TYPE_ALERT, ProtocolVersion::TLS_1_2, &[2, 40]).unwrap();
    let mut transport = ScriptedTransport::new(vec![Step::Reply(alert)]);

    let outcome = HandshakeClient::new(quick_config()).probe(&mut transport).await;

    match outcome {
        ProbeOutcome::Failure { reason, .. } => {
            assert_eq!(reason.reason(), "handshake_failure");
            assert!(matches!(reason, ProbeError::AlertReceived(_)));
        }
        ProbeOutcome::Success(_) => panic!("alert must not produce success"),
    }
}

/// Scenario C: ServerHello, then the server closes the connection.
#[tokio::test]
async fn early_close_is_transport_failure_not_success() {
    let record = handshake_record(&server_hello_message(0x002F));
    let mut transport = ScriptedTransport::new(vec![Step::Reply(record), Step::Eof]);

    let outcome = HandshakeClient::new(quick_config()).probe(&mut transport).await;

    match outcome {
        ProbeOutcome::Failure { reason, partial } => {
            assert!(matches!(reason, ProbeError::Transport(_)));
            let partial = partial.expect("ServerHello arrived, partial expected");
            assert!(partial.server_hello.is_some());
            assert!(partial.certificates.is_none());
            assert!(!partial.raw.is_empty());
        }
        ProbeOutcome::Success(_) => panic!("incomplete flight must not succeed"),
    }
}

/// Scenario D: a handshake header claims 500 body bytes, only 10 follow.
#[tokio::test]
async fn truncated_declared_length_fails_as_truncation() {
    let mut payload = vec![HANDSHAKE_TYPE_SERVER_HELLO, 0x00, 0x01, 0xF4];
    payload.extend_from_slice(&[0u8; 10]);
    let mut transport =
        ScriptedTransport::new(vec![Step::Reply(handshake_record(&payload)), Step::Eof]);

    let outcome = HandshakeClient::new(quick_config()).probe(&mut transport).await;

    match outcome {
        ProbeOutcome::Failure { reason, .. } => {
            assert!(matches!(
                reason,
                ProbeError::Wire(WireError::Truncated { .. })
            ));
        }
        ProbeOutcome::Success(_) => panic!("truncated flight must not succeed"),
    }
}

/// Silence from the server is a timeout, with no partial data attached.
#[tokio::test]
async fn silent_server_times_out() {
    let mut transport = ScriptedTransport::new(Vec::new());
    let outcome = HandshakeClient::new(quick_config()).probe(&mut transport).await;

    match outcome {
        ProbeOutcome::Failure { reason, partial } => {
            assert!(matches!(reason, ProbeError::Timeout));
            assert!(reason.is_recoverable());
            assert!(partial.is_none());
        }
        ProbeOutcome::Success(_) => panic!("silence must not succeed"),
    }
}

/// Partial data followed by silence is still a timeout, never success.
#[tokio::test]
async fn partial_data_then_silence_times_out() {
    let record = handshake_record(&server_hello_message(0x002F));
    let mut transport = ScriptedTransport::new(vec![Step::Reply(record)]);

    let outcome = HandshakeClient::new(quick_config()).probe(&mut transport).await;

    match outcome {
        ProbeOutcome::Failure { reason, partial } => {
            assert!(matches!(reason, ProbeError::Timeout));
            assert!(partial.unwrap().server_hello.is_some());
        }
        ProbeOutcome::Success(_) => panic!("missing ServerHelloDone must not succeed"),
    }
}

/// Fragmentation equivalence: the same flight dribbled in 3-byte chunks
/// produces the same success as one chunk.
#[tokio::test]
async fn fragmented_flight_equals_single_chunk() {
    let cert = [0x30, 0x03, 0x01, 0x02, 0x03];
    let flight = full_flight(0x002F, &cert);

    let steps: Vec<Step> = flight.chunks(3).map(|c| Step::Reply(c.to_vec())).collect();
    let mut dribbled = ScriptedTransport::new(steps);
    let mut whole = ScriptedTransport::new(vec![Step::Reply(flight)]);

    let client = HandshakeClient::new(quick_config());
    let a = client.probe(&mut dribbled).await.into_result().unwrap();
    let b = client.probe(&mut whole).await.into_result().unwrap();

    assert_eq!(a.server_hello, b.server_hello);
    assert_eq!(a.certificates, b.certificates);
}

/// One handshake message split across two TLS records still decodes.
#[tokio::test]
async fn message_spanning_records_succeeds() {
    let mut payload = server_hello_message(0x002F);
    payload.extend_from_slice(&certificate_message(&[&[0x30, 0x01]]));
    payload.extend_from_slice(&done_message());

    // Split the handshake byte stream mid-message into two records
    let split = 20;
    let mut stream = handshake_record(&payload[..split]);
    stream.extend_from_slice(&handshake_record(&payload[split..]));

    let mut transport = ScriptedTransport::new(vec![Step::Reply(stream)]);
    let outcome = HandshakeClient::new(quick_config()).probe(&mut transport).await;
    assert!(outcome.is_success());
}

/// Cipher-suite containment: a suite we never offered is rejected.
#[tokio::test]
async fn unoffered_suite_is_rejected() {
    let config = ProbeConfig {
        cipher_suites: vec![CipherSuiteId::RSA_WITH_AES_128_CBC_SHA],
        ..quick_config()
    };
    let flight = full_flight(0x0035, &[0x30]);
    let mut transport = ScriptedTransport::new(vec![Step::Reply(flight)]);

    let outcome = HandshakeClient::new(config).probe(&mut transport).await;
    match outcome {
        ProbeOutcome::Failure { reason, .. } => {
            assert!(matches!(
                reason,
                ProbeError::UnofferedCipher(CipherSuiteId(0x0035))
            ));
        }
        ProbeOutcome::Success(_) => panic!("unoffered suite must not succeed"),
    }
}

/// Cancellation mid-read closes the transport and reports Cancelled.
#[tokio::test]
async fn cancellation_closes_transport() {
    let config = ProbeConfig {
        read_timeout_ms: 5_000,
        ..ProbeConfig::default()
    };
    let mut transport = ScriptedTransport::new(Vec::new());
    let (cancel_tx, cancel_rx) = watch::channel(false);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        let _ = cancel_tx.send(true);
    });

    let outcome = HandshakeClient::new(config)
        .probe_with_cancel(&mut transport, cancel_rx)
        .await;

    match outcome {
        ProbeOutcome::Failure { reason, .. } => {
            assert!(matches!(reason, ProbeError::Cancelled));
        }
        ProbeOutcome::Success(_) => panic!("cancelled probe must not succeed"),
    }
    assert!(transport.shutdown_called);
}
