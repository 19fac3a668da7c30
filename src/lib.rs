//! tls-probe: a minimal TLS 1.2 handshake probe client
//!
//! This crate speaks just enough TLS 1.2 to learn what a server would
//! negotiate: it builds a `ClientHello`, sends it over a plain byte
//! stream, and parses the server's unauthenticated reply flight
//! (`ServerHello`, `Certificate`, `ServerHelloDone`, or an `Alert`) into
//! structured data. No key exchange, no record encryption, no
//! certificate validation — only the hello exchange.
//!
//! # Architecture
//!
//! ```text
//! caller → HandshakeClient → Transport (TCP)
//!              ↓ feed()
//!        HandshakeSession (state machine)
//!              ↓
//!        RecordAssembler → MessageAssembler → handshake codec
//! ```
//!
//! The byte-level work lives in [`wire`]: record framing/reassembly,
//! handshake message encoding/decoding, and alert parsing, all built on
//! a bounds-checked [`wire::ByteCursor`]. The probe logic lives in
//! [`probe`]: a sans-I/O session state machine plus an async client
//! that drives it over a [`probe::Transport`].
//!
//! # Quick Start
//!
//! ```no_run
//! use tls_probe::probe::{HandshakeClient, ProbeConfig, TcpTransport};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let stream = tokio::net::TcpStream::connect("example.com:443").await?;
//! let mut transport = TcpTransport::new(stream);
//!
//! let client = HandshakeClient::new(ProbeConfig::default());
//! let outcome = client.probe(&mut transport).await;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`wire`]: record layer, handshake codec, alerts, cipher-suite registry
//! - [`probe`]: handshake client, session state machine, transport seam

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod probe;
pub mod wire;

// Re-export commonly used types at the crate root
pub use probe::{
    HandshakeClient, PartialResponse, ProbeConfig, ProbeError, ProbeOutcome, ProbeResult,
    ServerResponse, TcpTransport, Transport,
};
pub use wire::{
    Alert, CertificateChain, CipherSuiteId, ClientHello, Extension, ProtocolVersion, ServerHello,
    WireError, WireResult,
};
