//! BitReader: walks a [`BitBuffer`] front to back for decoding.
//!
//! Reads are checked against the buffer length: running out of bits is reported
//! as `None`, so a truncated stream becomes a decode error instead of a panic.
//!

use super::bitbuffer::BitBuffer;

/// Reads a packed bitstream one field at a time.
#[derive(Debug)]
pub struct BitReader<'a> {
    source: &'a BitBuffer,
    cursor: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new BitReader positioned at the first bit.
    pub fn new(source: &'a BitBuffer) -> Self {
        Self { source, cursor: 0 }
    }

    /// Return the next bit, or None if there is no more data to read
    pub fn bit(&mut self) -> Option<bool> {
        if self.cursor >= self.source.len() {
            return None;
        }
        let bit = self.source.get(self.cursor);
        self.cursor += 1;
        Some(bit)
    }

    /// Return the next n bits as a value (first bit read is bit 0), or None if
    /// fewer than n bits remain. n must not exceed 64.
    pub fn bint(&mut self, n: usize) -> Option<u64> {
        self.take(n).map(|bits| bits.to_integer())
    }

    /// Return the next n bits as a new buffer, or None if fewer than n bits remain.
    pub fn take(&mut self, n: usize) -> Option<BitBuffer> {
        if n > self.remaining() {
            return None;
        }
        let bits = self.source.slice(self.cursor, self.cursor + n);
        self.cursor += n;
        Some(bits)
    }

    /// Number of bits not yet read.
    pub fn remaining(&self) -> usize {
        self.source.len() - self.cursor
    }

    /// Debugging function. Report current position as [byte.bit].
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor / 8, self.cursor % 8)
    }
}
