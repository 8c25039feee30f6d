use crate::bitstream::bitbuffer::BitBuffer;
use crate::bitstream::command::Command;

use super::encode_table::EncodeTable;

/// Field partition used for mask matching: `2^pos_bits` fields of `mask_bits`
/// bits each, together covering the whole command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaskLayout {
    pub pos_bits: usize,
    pub mask_bits: usize,
}

impl MaskLayout {
    pub const fn new(pos_bits: usize, mask_bits: usize) -> Self {
        Self {
            pos_bits,
            mask_bits,
        }
    }

    pub const fn field_count(&self) -> usize {
        1 << self.pos_bits
    }

    /// Number of command bits the partition covers.
    pub const fn span(&self) -> usize {
        self.field_count() * self.mask_bits
    }
}

/// A dictionary entry that differs from the target in exactly one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskMatch {
    /// Field number within the partition.
    pub pos: usize,
    /// The target's bits for that field.
    pub mask: BitBuffer,
    /// Index of the entry in the dictionary.
    pub index: usize,
}

/// Returns the single field in which `entry` and `cmd` differ, or None when
/// they differ in no field or in more than one.
fn single_mismatch(layout: MaskLayout, entry: &Command, cmd: &Command) -> Option<usize> {
    let mut mismatch = None;
    for field in 0..layout.field_count() {
        let start = field * layout.mask_bits;
        let differs = (start..start + layout.mask_bits).any(|bit| entry.get(bit) != cmd.get(bit));
        if differs {
            if mismatch.is_some() {
                return None;
            }
            mismatch = Some(field);
        }
    }
    mismatch
}

/// Scan the dictionary in index order and return the first entry that differs
/// from `cmd` in exactly one field. First match wins, not the best one.
pub fn find_mask(table: &EncodeTable, cmd: &Command, layout: MaskLayout) -> Option<MaskMatch> {
    debug_assert_eq!(layout.span(), cmd.len(), "mask layout does not cover the command");
    table
        .entries()
        .iter()
        .enumerate()
        .find_map(|(index, entry)| {
            single_mismatch(layout, entry, cmd).map(|pos| {
                let start = pos * layout.mask_bits;
                MaskMatch {
                    pos,
                    mask: cmd.slice(start, start + layout.mask_bits),
                    index,
                }
            })
        })
}

#[cfg(test)]
mod test {
    use super::{find_mask, MaskLayout};
    use crate::bitstream::command::Command;
    use crate::dictionary::encode_table::EncodeTable;

    const LAYOUT: MaskLayout = MaskLayout::new(2, 4);

    fn table(values: &[u64]) -> EncodeTable {
        let entries = values.iter().map(|&v| Command::from_value(v, 16)).collect();
        EncodeTable::new(entries, 2, 1).unwrap()
    }

    #[test]
    fn low_nibble_test() {
        let found = find_mask(&table(&[0xffff]), &Command::from_value(0xafff, 16), LAYOUT).unwrap();
        assert_eq!(found.mask.to_integer(), 0xa);
        assert_eq!(found.mask.len(), 4);
        assert_eq!(found.pos, 3);
        assert_eq!(found.index, 0);
    }

    #[test]
    fn high_nibble_test() {
        let found = find_mask(&table(&[0xffff]), &Command::from_value(0xffaf, 16), LAYOUT).unwrap();
        assert_eq!(found.mask.to_integer(), 0xa);
        assert_eq!(found.pos, 1);
        assert_eq!(found.index, 0);
    }

    #[test]
    fn two_fields_test() {
        assert!(find_mask(&table(&[0xffff]), &Command::from_value(0xafaf, 16), LAYOUT).is_none());
    }

    #[test]
    fn exact_match_is_not_a_mask_test() {
        assert!(find_mask(&table(&[0xffff]), &Command::from_value(0xffff, 16), LAYOUT).is_none());
    }

    #[test]
    fn first_match_wins_test() {
        // Both entries are one field away from 0xffff; the lower one is found first.
        let found = find_mask(&table(&[0xfffd, 0xfffb]), &Command::from_value(0xffff, 16), LAYOUT).unwrap();
        assert_eq!(found.index, 0);
        assert_eq!(found.pos, 0);
        assert_eq!(found.mask.to_integer(), 0xf);
    }

    #[test]
    fn skips_disqualified_entries_test() {
        // 0x0000 differs from the target in every field; 0x1234 only in the top one.
        let found = find_mask(&table(&[0x0000, 0x1234]), &Command::from_value(0xa234, 16), LAYOUT).unwrap();
        assert_eq!(found.index, 1);
        assert_eq!(found.pos, 3);
        assert_eq!(found.mask.to_integer(), 0xa);
    }
}
