//! Transport seam
//!
//! The probe core never opens sockets or resolves names; it drives any
//! bidirectional byte stream behind the [`Transport`] trait. The one
//! real implementation wraps a connected `tokio::net::TcpStream`.

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::trace;

/// Read buffer size per transport read
const READ_BUF_SIZE: usize = 8 * 1024;

/// Result of one timed read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recv {
    /// Bytes arrived
    Data(Vec<u8>),
    /// The peer closed the stream
    Eof,
    /// Nothing arrived within the timeout
    Timeout,
}

/// A bidirectional byte stream the probe can drive
#[async_trait]
pub trait Transport: Send {
    /// Write all of `data` to the peer
    async fn send(&mut self, data: &[u8]) -> io::Result<()>;

    /// Read whatever is available, waiting at most `timeout`
    async fn recv(&mut self, timeout: Duration) -> io::Result<Recv>;

    /// Close the stream; errors are ignored, close is best effort
    async fn shutdown(&mut self);
}

/// [`Transport`] over a connected TCP stream
pub struct TcpTransport {
    stream: TcpStream,
    buf: Vec<u8>,
}

impl TcpTransport {
    /// Wrap a connected stream
    #[must_use]
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            buf: vec![0u8; READ_BUF_SIZE],
        }
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, data: &[u8]) -> io::Result<()> {
        self.stream.write_all(data).await?;
        self.stream.flush().await?;
        trace!(bytes = data.len(), "sent");
        Ok(())
    }

    async fn recv(&mut self, timeout: Duration) -> io::Result<Recv> {
        match tokio::time::timeout(timeout, self.stream.read(&mut self.buf)).await {
            Ok(Ok(0)) => Ok(Recv::Eof),
            Ok(Ok(n)) => {
                trace!(bytes = n, "received");
                Ok(Recv::Data(self.buf[..n].to_vec()))
            }
            Ok(Err(e)) => Err(e),
            Err(_elapsed) => Ok(Recv::Timeout),
        }
    }

    async fn shutdown(&mut self) {
        let _ = self.stream.shutdown().await;
    }
}
