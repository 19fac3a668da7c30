//! Async handshake client
//!
//! Drives a [`HandshakeSession`] over a [`Transport`]: one write (the
//! ClientHello), then a read loop with a bounded per-read timeout,
//! ending in exactly one [`ProbeOutcome`]. Nothing is retried
//! internally; retry is caller policy.
//!
//! The client holds no shared state — run as many concurrent probes as
//! you like, one client/session/transport per host. Cancellation uses
//! a `tokio::sync::watch` channel: flip it to `true` and an in-flight
//! probe closes its transport and reports `Cancelled` at the next read
//! suspension point.

use std::io;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::probe::config::ProbeConfig;
use crate::probe::error::ProbeError;
use crate::probe::result::ProbeOutcome;
use crate::probe::session::HandshakeSession;
use crate::probe::transport::{Recv, Transport};

/// TLS 1.2 handshake probe client
///
/// # Example
///
/// ```no_run
/// use tls_probe::probe::{HandshakeClient, ProbeConfig, TcpTransport};
///
/// # async fn example() -> std::io::Result<()> {
/// let stream = tokio::net::TcpStream::connect("example.com:443").await?;
/// let mut transport = TcpTransport::new(stream);
/// let client = HandshakeClient::new(ProbeConfig::default());
/// match client.probe(&mut transport).await.response() {
///     Some(resp) => println!("negotiated {}", resp.server_hello.cipher_suite),
///     None => println!("probe failed"),
/// }
/// # Ok(())
/// # }
/// ```
pub struct HandshakeClient {
    config: ProbeConfig,
}

impl HandshakeClient {
    /// Create a client with the given configuration
    #[must_use]
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    /// The configuration this client probes with
    #[must_use]
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Run one handshake probe to completion
    pub async fn probe<T: Transport>(&self, transport: &mut T) -> ProbeOutcome {
        // The sender is held but never fired, so the cancel arm stays idle.
        let (_tx, cancel) = watch::channel(false);
        self.probe_with_cancel(transport, cancel).await
    }

    /// Run one probe, cancellable at any read suspension point
    ///
    /// Send `true` on the watch channel to cancel: the transport is
    /// closed and the outcome is `Failure(Cancelled)`, never an
    /// ambiguous live state.
    pub async fn probe_with_cancel<T: Transport>(
        &self,
        transport: &mut T,
        mut cancel: watch::Receiver<bool>,
    ) -> ProbeOutcome {
        let mut session = HandshakeSession::new(self.config.clone());

        let record = match session.client_hello_record() {
            Ok(record) => record,
            Err(e) => return failure(&session, e),
        };
        if let Err(e) = transport.send(&record).await {
            let reason = session.fail(ProbeError::Transport(e));
            return failure(&session, reason);
        }
        debug!(bytes = record.len(), "ClientHello sent");

        let timeout = self.config.read_timeout();
        let mut cancel_armed = true;
        loop {
            let received = tokio::select! {
                biased;
                changed = cancel.changed(), if cancel_armed => {
                    match changed {
                        Ok(()) if *cancel.borrow() => {
                            transport.shutdown().await;
                            let reason = session.fail(ProbeError::Cancelled);
                            return failure(&session, reason);
                        }
                        // Flipped back (or never to true): keep reading
                        Ok(()) => continue,
                        // Sender gone: cancellation can no longer happen
                        Err(_) => {
                            cancel_armed = false;
                            continue;
                        }
                    }
                }
                received = transport.recv(timeout) => received,
            };

            match received {
                Ok(Recv::Data(chunk)) => match session.feed(&chunk) {
                    Ok(Some(response)) => {
                        info!(%response, "handshake flight complete");
                        return ProbeOutcome::Success(response);
                    }
                    Ok(None) => {}
                    Err(e) => return failure(&session, e),
                },
                Ok(Recv::Eof) => {
                    let base = ProbeError::Transport(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "server closed the connection mid-handshake",
                    ));
                    let reason = session.fail(session.stream_end_error(base));
                    return failure(&session, reason);
                }
                Ok(Recv::Timeout) => {
                    // Partial data plus silence is still a timeout, not
                    // a guess at completeness.
                    let reason = session.fail(ProbeError::Timeout);
                    return failure(&session, reason);
                }
                Err(e) => {
                    let reason = session.fail(ProbeError::Transport(e));
                    return failure(&session, reason);
                }
            }
        }
    }
}

fn failure(session: &HandshakeSession, reason: ProbeError) -> ProbeOutcome {
    debug!(reason = %reason, "probe failed");
    ProbeOutcome::Failure {
        reason,
        partial: session.partial(),
    }
}
