//! Encodes and decodes one coded unit against its dictionary.
//!
//! Masked layout (three tiers):
//! - dictionary hit: `1 1` + index
//! - mask hit:       `1 0` + field position + replacement bits + index
//! - literal:        `0`   + every bit of the unit
//!
//! Dictionary-only layout: `1` + index, or `0` + every bit of the unit.
//!
//! Multi-bit fields are written bit 0 first.

use log::trace;

use super::scheme::{Tiers, UnitLayout};
use crate::bitstream::bitbuffer::BitBuffer;
use crate::bitstream::bitreader::BitReader;
use crate::bitstream::command::Command;
use crate::dictionary::encode_table::EncodeTable;
use crate::dictionary::mask::{find_mask, MaskLayout};
use crate::error::{Error, Result};

/// Which tier a unit was coded with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Dict,
    Mask,
    Literal,
}

/// Tier counts for one coded unit over a whole section.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Coverage {
    pub name: &'static str,
    pub dict: usize,
    pub mask: usize,
    pub literal: usize,
}

impl Coverage {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    pub fn count(&mut self, tier: Tier) {
        match tier {
            Tier::Dict => self.dict += 1,
            Tier::Mask => self.mask += 1,
            Tier::Literal => self.literal += 1,
        }
    }
}

/// Append the coded form of `cmd` to `out` using the unit's layout.
pub fn encode_unit(unit: &UnitLayout, table: &EncodeTable, cmd: &Command, out: &mut BitBuffer) -> Tier {
    match unit.tiers {
        Tiers::Dict => encode_dict(table, cmd, out),
        Tiers::Masked(layout) => encode_masked(table, cmd, layout, out),
    }
}

/// Read one coded unit from `br`.
pub fn decode_unit(unit: &UnitLayout, table: &EncodeTable, br: &mut BitReader<'_>) -> Result<Command> {
    match unit.tiers {
        Tiers::Dict => decode_dict(table, unit.bits(), br),
        Tiers::Masked(layout) => decode_masked(table, unit.bits(), layout, br),
    }
}

pub fn encode_dict(table: &EncodeTable, cmd: &Command, out: &mut BitBuffer) -> Tier {
    if let Some(index) = table.find(cmd) {
        out.push(true);
        out.push_bits(index as u64, table.index_bits());
        Tier::Dict
    } else {
        out.push(false);
        out.push_buffer(cmd);
        Tier::Literal
    }
}

pub fn encode_masked(table: &EncodeTable, cmd: &Command, layout: MaskLayout, out: &mut BitBuffer) -> Tier {
    if let Some(index) = table.find(cmd) {
        out.push(true);
        out.push(true);
        out.push_bits(index as u64, table.index_bits());
        Tier::Dict
    } else if let Some(found) = find_mask(table, cmd, layout) {
        trace!("{} masked at field {} from entry {}", cmd, found.pos, found.index);
        out.push(true);
        out.push(false);
        out.push_bits(found.pos as u64, layout.pos_bits);
        out.push_buffer(&found.mask);
        out.push_bits(found.index as u64, table.index_bits());
        Tier::Mask
    } else {
        out.push(false);
        out.push_buffer(cmd);
        Tier::Literal
    }
}

/// Fetch a dictionary entry named by the next index in the stream.
fn read_entry(table: &EncodeTable, br: &mut BitReader<'_>) -> Result<Command> {
    let index = br.bint(table.index_bits()).ok_or(Error::UnexpectedEnd)? as usize;
    table.get(index).cloned().ok_or(Error::IndexOutOfRange {
        index,
        len: table.len(),
    })
}

fn read_literal(bits: usize, br: &mut BitReader<'_>) -> Result<Command> {
    br.take(bits).map(Command::from).ok_or(Error::UnexpectedEnd)
}

pub fn decode_dict(table: &EncodeTable, bits: usize, br: &mut BitReader<'_>) -> Result<Command> {
    if br.bit().ok_or(Error::UnexpectedEnd)? {
        read_entry(table, br)
    } else {
        read_literal(bits, br)
    }
}

pub fn decode_masked(
    table: &EncodeTable,
    bits: usize,
    layout: MaskLayout,
    br: &mut BitReader<'_>,
) -> Result<Command> {
    if !br.bit().ok_or(Error::UnexpectedEnd)? {
        return read_literal(bits, br);
    }
    if br.bit().ok_or(Error::UnexpectedEnd)? {
        return read_entry(table, br);
    }

    let pos = br.bint(layout.pos_bits).ok_or(Error::UnexpectedEnd)? as usize;
    let mask = br.take(layout.mask_bits).ok_or(Error::UnexpectedEnd)?;
    let mut cmd = read_entry(table, br)?;
    let start = pos * layout.mask_bits;
    for j in 0..layout.mask_bits {
        cmd.set(start + j, mask.get(j));
    }
    Ok(cmd)
}

#[cfg(test)]
mod test {
    use super::*;

    const LAYOUT: MaskLayout = MaskLayout::new(2, 4);

    /// Dictionary {0xfffb, 0xfffd} with one index bit.
    fn table() -> EncodeTable {
        let entries = vec![Command::from_value(0xfffd, 16), Command::from_value(0xfffb, 16)];
        EncodeTable::new(entries, 2, 1).unwrap()
    }

    fn encoded(tier_fn: impl Fn(&mut BitBuffer) -> Tier) -> (Tier, BitBuffer) {
        let mut out = BitBuffer::new();
        let tier = tier_fn(&mut out);
        (tier, out)
    }

    #[test]
    fn masked_literal_test() {
        let cmd = Command::from_value(0xaaaa, 16);
        let (tier, out) = encoded(|out| encode_masked(&table(), &cmd, LAYOUT, out));
        assert_eq!(tier, Tier::Literal);
        assert_eq!(out.len(), 17);
        assert_eq!(out.to_integer(), 0x15554);
    }

    #[test]
    fn masked_dict_test() {
        let cmd = Command::from_value(0xfffd, 16);
        let (tier, out) = encoded(|out| encode_masked(&table(), &cmd, LAYOUT, out));
        assert_eq!(tier, Tier::Dict);
        assert_eq!(out.len(), 3);
        assert_eq!(out.to_integer(), 0b111);
    }

    #[test]
    fn masked_mask_test() {
        let cmd = Command::from_value(0xffff, 16);
        let (tier, out) = encoded(|out| encode_masked(&table(), &cmd, LAYOUT, out));
        assert_eq!(tier, Tier::Mask);
        // 1, 0, position 00, mask 1111, index 0
        assert_eq!(out.len(), 9);
        assert_eq!(out.to_integer(), 0b0_1111_00_01);
    }

    #[test]
    fn dict_literal_test() {
        let cmd = Command::from_value(0xffff, 16);
        let (tier, out) = encoded(|out| encode_dict(&table(), &cmd, out));
        assert_eq!(tier, Tier::Literal);
        assert_eq!(out.len(), 17);
        assert_eq!(out.to_integer(), 0x1fffe);
    }

    #[test]
    fn dict_hit_test() {
        let cmd = Command::from_value(0xfffd, 16);
        let (tier, out) = encoded(|out| encode_dict(&table(), &cmd, out));
        assert_eq!(tier, Tier::Dict);
        assert_eq!(out.len(), 2);
        assert_eq!(out.to_integer(), 0b11);
    }

    #[test]
    fn decode_all_tiers_test() {
        let table = table();
        let cmds = [0xaaaa, 0xfffd, 0xffff, 0xfffb, 0x1ffb]
            .map(|v| Command::from_value(v, 16));

        let mut out = BitBuffer::new();
        let tiers: Vec<Tier> = cmds
            .iter()
            .map(|cmd| encode_masked(&table, cmd, LAYOUT, &mut out))
            .collect();
        assert_eq!(
            tiers,
            vec![Tier::Literal, Tier::Dict, Tier::Mask, Tier::Dict, Tier::Mask]
        );

        let mut br = BitReader::new(&out);
        for cmd in cmds.iter() {
            let decoded = decode_masked(&table, 16, LAYOUT, &mut br).unwrap();
            assert_eq!(&decoded, cmd);
            assert_eq!(decoded.len(), 16);
        }
        assert_eq!(br.remaining(), 0);
    }

    #[test]
    fn decode_dict_test() {
        let table = table();
        let cmds = [0x1234, 0xfffb].map(|v| Command::from_value(v, 16));
        let mut out = BitBuffer::new();
        cmds.iter().for_each(|cmd| {
            encode_dict(&table, cmd, &mut out);
        });

        let mut br = BitReader::new(&out);
        for cmd in cmds.iter() {
            assert_eq!(&decode_dict(&table, 16, &mut br).unwrap(), cmd);
        }
    }

    #[test]
    fn truncated_test() {
        let mut out = BitBuffer::new();
        encode_masked(&table(), &Command::from_value(0xaaaa, 16), LAYOUT, &mut out);
        let short = out.slice(0, 10);
        let mut br = BitReader::new(&short);
        assert_eq!(decode_masked(&table(), 16, LAYOUT, &mut br), Err(Error::UnexpectedEnd));
    }

    #[test]
    fn bad_index_test() {
        let small = EncodeTable::new(vec![Command::from_value(1, 8)], 1, 2).unwrap();
        let mut stream = BitBuffer::new();
        stream.push(true);
        stream.push_bits(3, 2);
        let mut br = BitReader::new(&stream);
        assert_eq!(
            decode_dict(&small, 8, &mut br),
            Err(Error::IndexOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn coverage_test() {
        let mut coverage = Coverage::new(".dict");
        [Tier::Dict, Tier::Mask, Tier::Dict, Tier::Literal]
            .into_iter()
            .for_each(|tier| coverage.count(tier));
        assert_eq!(coverage.dict, 2);
        assert_eq!(coverage.mask, 1);
        assert_eq!(coverage.literal, 1);
    }
}
