use std::cmp::Ordering;

/// An append-only sequence of bits with random read access.
///
/// Bits are packed least significant bit first: bit `i` lives in byte `i >> 3`
/// at position `i & 7`. The backing storage grows one byte at a time as bits
/// are appended and never shrinks.
///
/// Equality and ordering compare the *value* of the buffer (see
/// [`BitBuffer::to_integer`]), not its storage or its length.
#[derive(Clone, Debug, Default)]
pub struct BitBuffer {
    data: Vec<u8>,
    bits: usize,
}

impl BitBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            bits: 0,
        }
    }

    /// Create an empty buffer with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            data: Vec::with_capacity((bits + 7) >> 3),
            bits: 0,
        }
    }

    /// Create a buffer holding the first `bits` bits of `data`.
    pub fn from_bytes(data: &[u8], bits: usize) -> Self {
        let mut buffer = Self::with_capacity(bits);
        buffer.push_bytes(data, bits, 0);
        buffer
    }

    /// Append a single bit.
    pub fn push(&mut self, bit: bool) {
        if self.data.len() * 8 < self.bits + 1 {
            self.data.push(0);
        }
        self.data[self.bits >> 3] |= (bit as u8) << (self.bits & 0x7);
        self.bits += 1;
    }

    /// Append the low `count` bits of `value`, bit 0 first.
    pub fn push_bits(&mut self, mut value: u64, count: usize) {
        for _ in 0..count {
            self.push(value & 0x1 == 1);
            value >>= 1;
        }
    }

    /// Append `count` bits of `data`, starting `offset` (0-7) bits into the first byte.
    pub fn push_bytes(&mut self, data: &[u8], count: usize, offset: usize) {
        assert!(offset < 8, "bit offset must be less than 8, got {}", offset);
        for i in offset..offset + count {
            self.push((data[i >> 3] >> (i & 0x7)) & 0x1 == 1);
        }
    }

    /// Append every bit of `other`.
    pub fn push_buffer(&mut self, other: &BitBuffer) {
        // Whole bytes can be copied through when we are byte aligned.
        if self.bits & 0x7 == 0 {
            self.data.truncate(self.bits >> 3);
            self.data.extend_from_slice(&other.data);
            self.bits += other.bits;
        } else {
            self.push_bytes(&other.data, other.bits, 0);
        }
    }

    /// Number of bits in the buffer.
    pub fn len(&self) -> usize {
        self.bits
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Number of backing bytes.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// The backing bytes. Unused bits of the final byte are zero.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Read the bit at `pos`. Panics if `pos` is past the end of the buffer.
    pub fn get(&self, pos: usize) -> bool {
        assert!(
            pos < self.bits,
            "bit {} read past the end of a {} bit buffer",
            pos,
            self.bits
        );
        (self.data[pos >> 3] >> (pos & 0x7)) & 0x1 == 1
    }

    /// Overwrite the bit at `pos`. Panics if `pos` is past the end of the buffer.
    pub fn set(&mut self, pos: usize, bit: bool) {
        assert!(
            pos < self.bits,
            "bit {} written past the end of a {} bit buffer",
            pos,
            self.bits
        );
        let mask = 0x1 << (pos & 0x7);
        if bit {
            self.data[pos >> 3] |= mask;
        } else {
            self.data[pos >> 3] &= !mask;
        }
    }

    /// Copy the bits in `[start, end)` into a new buffer.
    pub fn slice(&self, start: usize, end: usize) -> BitBuffer {
        let mut result = BitBuffer::with_capacity(end.saturating_sub(start));
        for pos in start..end {
            result.push(self.get(pos));
        }
        result
    }

    /// Fold the buffer into an unsigned value. Bit 0 of the buffer is bit 0 of the
    /// value, so `push_bits(v, n)` followed by `to_integer()` gives back `v`.
    /// Only the low 64 bits survive for longer buffers.
    pub fn to_integer(&self) -> u64 {
        let mut value = 0_u64;
        for pos in (0..self.bits).rev() {
            value = value << 1 | self.get(pos) as u64;
        }
        value
    }
}

impl PartialEq for BitBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.to_integer() == other.to_integer()
    }
}

impl Eq for BitBuffer {}

impl PartialOrd for BitBuffer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BitBuffer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_integer().cmp(&other.to_integer())
    }
}
