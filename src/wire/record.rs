//! TLS record layer: framing and reassembly
//!
//! Writing side: wrap payload bytes in 5-byte record headers, splitting
//! anything larger than the maximum plaintext size across records.
//!
//! Reading side: [`RecordAssembler`] takes the raw byte stream exactly
//! as it arrives off the socket — arbitrarily chunked — and yields
//! whole records in order. An incomplete header or payload is not an
//! error, just "need more data"; the buffered bytes stay put until a
//! later `feed` completes them.
//!
//! Record boundaries say nothing about handshake message boundaries:
//! one record may carry several coalesced messages and one message may
//! span several records. Message reassembly is the codec's job
//! ([`crate::wire::handshake::MessageAssembler`]).

use tracing::trace;

use crate::wire::common::{MAX_TLS_PLAINTEXT_LEN, TLS_RECORD_HEADER_SIZE};
use crate::wire::cursor::ByteCursor;
use crate::wire::error::{WireError, WireResult};
use crate::wire::version::ProtocolVersion;

/// A complete record read off the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsRecord {
    /// ContentType byte (handshake, alert, ...)
    pub content_type: u8,
    /// Version from the record header, preserved raw
    pub version: ProtocolVersion,
    /// Record payload (fragment)
    pub payload: Vec<u8>,
}

/// Frame a payload into a single TLS record
///
/// Fails with `PayloadTooLarge` if the payload exceeds the RFC 5246
/// plaintext limit; use [`frame_message`] to fragment instead.
pub fn frame(content_type: u8, version: ProtocolVersion, payload: &[u8]) -> WireResult<Vec<u8>> {
    if payload.len() > MAX_TLS_PLAINTEXT_LEN {
        return Err(WireError::PayloadTooLarge {
            len: payload.len(),
            max: MAX_TLS_PLAINTEXT_LEN,
        });
    }

    let mut out = ByteCursor::new();
    out.write_u8(content_type);
    out.write_u16(version.0);
    out.write_u16(payload.len() as u16);
    out.write_bytes(payload);
    Ok(out.into_bytes())
}

/// Frame a logical message into as many records as its size requires
///
/// Every record carries at most `MAX_TLS_PLAINTEXT_LEN` payload bytes.
/// The hello flight is always far below the limit, so this normally
/// produces exactly one record.
pub fn frame_message(
    content_type: u8,
    version: ProtocolVersion,
    payload: &[u8],
) -> WireResult<Vec<u8>> {
    let mut out = Vec::with_capacity(payload.len() + TLS_RECORD_HEADER_SIZE);
    if payload.is_empty() {
        return frame(content_type, version, payload);
    }
    for chunk in payload.chunks(MAX_TLS_PLAINTEXT_LEN) {
        out.extend_from_slice(&frame(content_type, version, chunk)?);
    }
    Ok(out)
}

/// Incremental record reassembler
///
/// Feed raw stream chunks in, pull whole records out. Owns its buffer;
/// one assembler per connection, never shared.
#[derive(Debug, Default)]
pub struct RecordAssembler {
    buf: Vec<u8>,
}

impl RecordAssembler {
    /// Create an empty assembler
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw bytes read from the stream
    pub fn feed(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Bytes currently buffered but not yet consumed as records
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Try to pull one complete record out of the buffer
    ///
    /// Returns `Ok(None)` when the header or payload is still
    /// incomplete — the buffer is left untouched for a future `feed`.
    /// A declared length above the RFC limit is a hard error, never a
    /// wait: no amount of further data makes it valid.
    pub fn next_record(&mut self) -> WireResult<Option<TlsRecord>> {
        if self.buf.len() < TLS_RECORD_HEADER_SIZE {
            return Ok(None);
        }

        let length = usize::from(u16::from_be_bytes([self.buf[3], self.buf[4]]));
        if length > MAX_TLS_PLAINTEXT_LEN {
            return Err(WireError::PayloadTooLarge {
                len: length,
                max: MAX_TLS_PLAINTEXT_LEN,
            });
        }

        let total = TLS_RECORD_HEADER_SIZE + length;
        if self.buf.len() < total {
            trace!(
                buffered = self.buf.len(),
                needed = total,
                "record incomplete, waiting for more data"
            );
            return Ok(None);
        }

        let content_type = self.buf[0];
        let version = ProtocolVersion(u16::from_be_bytes([self.buf[1], self.buf[2]]));
        let payload = self.buf[TLS_RECORD_HEADER_SIZE..total].to_vec();
        self.buf.drain(..total);

        trace!(
            content_type,
            %version,
            length,
            "record reassembled"
        );

        Ok(Some(TlsRecord {
            content_type,
            version,
            payload,
        }))
    }
}
