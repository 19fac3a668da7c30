//! Handshake probe client
//!
//! One probe is one attempt: build a ClientHello, send it, read the
//! server's reply flight until `ServerHelloDone`, an alert, stream
//! end, or the read timeout, and report exactly one structured
//! outcome.
//!
//! - [`config`]: what to offer and how long to wait
//! - [`session`]: the sans-I/O state machine
//! - [`client`]: the async driver
//! - [`transport`]: the byte-stream seam (TCP implementation included)
//! - [`result`]: success/failure surface
//! - [`error`]: the probe error taxonomy

pub mod client;
pub mod config;
pub mod error;
pub mod result;
pub mod session;
pub mod transport;

pub use client::HandshakeClient;
pub use config::ProbeConfig;
pub use error::{ProbeError, ProbeResult};
pub use result::{PartialResponse, ProbeOutcome, ServerResponse};
pub use session::{HandshakeSession, SessionState};
pub use transport::{Recv, TcpTransport, Transport};
