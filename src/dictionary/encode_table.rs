use std::fmt;

use crate::bitstream::command::Command;
use crate::error::{Error, Result};

/// A sorted, fixed-capacity dictionary of equal-length commands.
///
/// Entries are `cmd_bytes` bytes each and there are at most `2^index_bits` of
/// them, so any entry can be named by an `index_bits` wide index. The table is
/// built once and never changes afterwards.
#[derive(Clone, Debug)]
pub struct EncodeTable {
    entries: Vec<Command>,
    cmd_bytes: usize,
    index_bits: usize,
}

impl EncodeTable {
    /// Validate and sort `entries`. This does not truncate: the caller picks
    /// which entries go in (see [`super::builder::build_table`]).
    pub fn new(mut entries: Vec<Command>, cmd_bytes: usize, index_bits: usize) -> Result<Self> {
        let capacity = 1_usize << index_bits;
        if entries.len() > capacity {
            return Err(Error::CapacityExceeded {
                entries: entries.len(),
                capacity,
            });
        }

        let expected = cmd_bytes << 3;
        if let Some(bad) = entries.iter().find(|cmd| cmd.len() != expected) {
            return Err(Error::BadCommandLength {
                expected,
                actual: bad.len(),
            });
        }

        entries.sort();
        Ok(Self {
            entries,
            cmd_bytes,
            index_bits,
        })
    }

    /// Rebuild a table from a dictionary blob written by [`EncodeTable::to_bytes`].
    pub fn from_bytes(blob: &[u8], cmd_bytes: usize, index_bits: usize) -> Result<Self> {
        if blob.len() % cmd_bytes != 0 {
            let tail = blob.len() % cmd_bytes;
            return Err(Error::BadCommandLength {
                expected: cmd_bytes << 3,
                actual: tail << 3,
            });
        }
        let entries = blob.chunks_exact(cmd_bytes).map(Command::from_bytes).collect();
        Self::new(entries, cmd_bytes, index_bits)
    }

    /// The dictionary blob: every entry's bytes, in ascending value order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut blob = Vec::with_capacity(self.entries.len() * self.cmd_bytes);
        self.entries
            .iter()
            .for_each(|cmd| blob.extend_from_slice(&cmd.as_bytes()[..self.cmd_bytes]));
        blob
    }

    /// Exact-match lookup by value. Returns the entry's index.
    pub fn find(&self, cmd: &Command) -> Option<usize> {
        self.entries.binary_search(cmd).ok()
    }

    pub fn get(&self, index: usize) -> Option<&Command> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[Command] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cmd_bytes(&self) -> usize {
        self.cmd_bytes
    }

    pub fn index_bits(&self) -> usize {
        self.index_bits
    }

    /// Size of the dictionary blob in bytes.
    pub fn byte_size(&self) -> usize {
        self.entries.len() * self.cmd_bytes
    }
}

/// One numbered line per entry, e.g. `1) 0x13000000`.
impl fmt::Display for EncodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, cmd) in self.entries.iter().enumerate() {
            writeln!(f, "{}) {}", idx + 1, cmd)?;
        }
        Ok(())
    }
}
