use std::fmt;
use std::ops::{Deref, DerefMut};

use super::bitbuffer::BitBuffer;
use crate::error::{Error, Result};

/// One instruction, or one field of an instruction, as a fixed run of bits.
///
/// A `Command` is a [`BitBuffer`] with splitting on top. Splitting never
/// touches the source: both halves are fresh copies.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Command(BitBuffer);

impl Command {
    pub fn new() -> Self {
        Self(BitBuffer::new())
    }

    /// Build a command from the low `bits` bits of `value`.
    pub fn from_value(value: u64, bits: usize) -> Self {
        let mut bb = BitBuffer::with_capacity(bits);
        bb.push_bits(value, bits);
        Self(bb)
    }

    /// Build a command from whole bytes, as they sit in the code section.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(BitBuffer::from_bytes(data, data.len() << 3))
    }

    /// Split into a prefix of `fbits` bits and a suffix holding the rest.
    pub fn split(&self, fbits: usize) -> Result<(Command, Command)> {
        let len = self.len();
        if fbits > len {
            return Err(Error::InvalidSplit { fbits, len });
        }
        let data = self.as_bytes();
        let prefix = BitBuffer::from_bytes(data, fbits);

        // The suffix rarely starts on a byte boundary, so start reading mid-byte.
        let rem = len - fbits;
        let mut suffix = BitBuffer::with_capacity(rem);
        suffix.push_bytes(&data[fbits >> 3..], rem, fbits & 0x7);

        Ok((Command(prefix), Command(suffix)))
    }

    /// Split into two commands of half the length each.
    pub fn split_half(&self) -> Result<(Command, Command)> {
        self.split(self.len() / 2)
    }

    /// Append `other` after the last bit of this command.
    pub fn join(&mut self, other: &Command) {
        self.0.push_buffer(&other.0);
    }

    pub fn into_inner(self) -> BitBuffer {
        self.0
    }
}

impl From<BitBuffer> for Command {
    fn from(bb: BitBuffer) -> Self {
        Self(bb)
    }
}

impl Deref for Command {
    type Target = BitBuffer;

    fn deref(&self) -> &BitBuffer {
        &self.0
    }
}

impl DerefMut for Command {
    fn deref_mut(&mut self) -> &mut BitBuffer {
        &mut self.0
    }
}

/// Bytes in storage order, e.g. `0x13000000` for the RISC-V `nop` (`addi x0, x0, 0`).
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in self.as_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::Command;
    use crate::error::Error;

    #[test]
    fn equality_test() {
        let c1 = Command::from_value(0xfffd, 16);
        let c2 = Command::from_value(0xfffd, 16);
        assert_eq!(c1, c2);
        let c3 = Command::from_value(0xfffc, 16);
        assert_ne!(c1, c3);
        assert!(c3 < c1);
    }

    #[test]
    fn split_test() {
        let cmd1 = Command::from_value(0xaffa, 16);
        let (c11, c12) = cmd1.split(12).unwrap();
        assert_eq!(c11, Command::from_value(0xffa, 12));
        assert_eq!(c11.len(), 12);
        assert_eq!(c12, Command::from_value(0xa, 4));
        assert_eq!(c12.len(), 4);

        let cmd2 = Command::from_value(0xfa, 8);
        let (c21, c22) = cmd2.split(2).unwrap();
        assert_eq!(c21, Command::from_value(0x2, 2));
        assert_eq!(c22, Command::from_value(0x3e, 6));
    }

    #[test]
    fn split_at_ends_test() {
        let cmd = Command::from_value(0xaffa, 16);
        let (all, none) = cmd.split(16).unwrap();
        assert_eq!(all, cmd);
        assert_eq!(none.len(), 0);
        assert_eq!(none.byte_len(), 0);

        let (none, all) = cmd.split(0).unwrap();
        assert_eq!(none.len(), 0);
        assert_eq!(none.byte_len(), 0);
        assert_eq!(all, cmd);
        assert_eq!(all.len(), 16);
    }

    #[test]
    fn split_too_far_test() {
        let cmd = Command::from_value(0xfa, 8);
        assert_eq!(cmd.split(9), Err(Error::InvalidSplit { fbits: 9, len: 8 }));
    }

    #[test]
    fn split_half_test() {
        let (c11, c12) = Command::from_value(0xaffa, 16).split_half().unwrap();
        assert_eq!(c11, Command::from_value(0xfa, 8));
        assert_eq!(c12, Command::from_value(0xaf, 8));

        let (c21, c22) = Command::from_value(0xfa, 8).split_half().unwrap();
        assert_eq!(c21, Command::from_value(0xa, 4));
        assert_eq!(c22, Command::from_value(0xf, 4));
    }

    #[test]
    fn split_leaves_source_test() {
        let cmd = Command::from_bytes(&[0x13, 0x05, 0x45, 0x00]);
        let (low, high) = cmd.split(8).unwrap();
        assert_eq!(cmd.to_integer(), 0x0045_0513);
        assert_eq!(low.to_integer(), 0x13);
        assert_eq!(high.to_integer(), 0x45_05);
    }

    #[test]
    fn join_test() {
        let cmd = Command::from_bytes(&[0x93, 0x87, 0x07, 0x00]);
        let (mut low, high) = cmd.split(13).unwrap();
        low.join(&high);
        assert_eq!(low, cmd);
        assert_eq!(low.as_bytes(), cmd.as_bytes());
    }

    #[test]
    fn display_test() {
        let cmd = Command::from_bytes(&[0x13, 0x00, 0x00, 0x00]);
        assert_eq!(cmd.to_string(), "0x13000000");
    }
}
