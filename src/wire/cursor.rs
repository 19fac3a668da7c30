//! Bounds-checked byte cursor
//!
//! Every encoder and decoder in this crate goes through [`ByteCursor`]
//! so the "never read past the buffer" invariant lives in exactly one
//! place. Reads fail with [`WireError::Truncated`] when fewer bytes
//! remain than requested; writes append and grow the buffer.
//!
//! TLS uses both 2-byte and 3-byte length fields (3-byte for handshake
//! message bodies), so the cursor carries u24 alongside the usual
//! fixed-width integers. All integers are big-endian per RFC 5246.

use crate::wire::error::{WireError, WireResult};

/// Read/write cursor over a byte buffer
#[derive(Debug, Default, Clone)]
pub struct ByteCursor {
    buf: Vec<u8>,
    pos: usize,
}

impl ByteCursor {
    /// Create an empty cursor, typically for writing
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cursor over existing bytes, positioned at the start
    #[must_use]
    pub fn from_slice(data: &[u8]) -> Self {
        Self {
            buf: data.to_vec(),
            pos: 0,
        }
    }

    /// Bytes remaining between the cursor position and the buffer end
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Whether the cursor has consumed the whole buffer
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Total buffer length (independent of cursor position)
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    fn check(&self, needed: usize) -> WireResult<()> {
        if self.remaining() < needed {
            return Err(WireError::truncated(needed, self.remaining()));
        }
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Read one byte
    pub fn read_u8(&mut self) -> WireResult<u8> {
        self.check(1)?;
        let v = self.buf[self.pos];
        self.pos += 1;
        Ok(v)
    }

    /// Read a big-endian u16
    pub fn read_u16(&mut self) -> WireResult<u16> {
        self.check(2)?;
        let v = u16::from_be_bytes([self.buf[self.pos], self.buf[self.pos + 1]]);
        self.pos += 2;
        Ok(v)
    }

    /// Read a big-endian 3-byte integer into a u32
    pub fn read_u24(&mut self) -> WireResult<u32> {
        self.check(3)?;
        let v = u32::from_be_bytes([
            0,
            self.buf[self.pos],
            self.buf[self.pos + 1],
            self.buf[self.pos + 2],
        ]);
        self.pos += 3;
        Ok(v)
    }

    /// Read a big-endian u32
    pub fn read_u32(&mut self) -> WireResult<u32> {
        self.check(4)?;
        let v = u32::from_be_bytes([
            self.buf[self.pos],
            self.buf[self.pos + 1],
            self.buf[self.pos + 2],
            self.buf[self.pos + 3],
        ]);
        self.pos += 4;
        Ok(v)
    }

    /// Read exactly `n` bytes
    pub fn read_bytes(&mut self, n: usize) -> WireResult<&[u8]> {
        self.check(n)?;
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    // =========================================================================
    // Writes (always append at the buffer end)
    // =========================================================================

    /// Append one byte
    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    /// Append a big-endian u16
    pub fn write_u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Append a big-endian 3-byte integer (high byte of `v` is dropped)
    pub fn write_u24(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_be_bytes()[1..]);
    }

    /// Append a big-endian u32
    pub fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Append a byte slice
    pub fn write_bytes(&mut self, b: &[u8]) {
        self.buf.extend_from_slice(b);
    }

    /// Consume the cursor and return the underlying buffer
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Borrow the underlying buffer
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}
