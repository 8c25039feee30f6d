use log::{debug, trace};
use rustc_hash::FxHashMap;

use super::encode_table::EncodeTable;
use crate::bitstream::command::Command;
use crate::error::Result;

/// Returns every distinct command with its occurrence count, most frequent first.
/// Equal counts are ordered by ascending command value; persisted dictionaries
/// depend on this order, so it must not change.
pub fn rank_commands(commands: &[Command]) -> Vec<(&Command, u32)> {
    let mut freqs: FxHashMap<u64, (&Command, u32)> = FxHashMap::default();
    commands.iter().for_each(|cmd| {
        freqs.entry(cmd.to_integer()).or_insert((cmd, 0)).1 += 1;
    });

    let mut ranked: Vec<(u64, &Command, u32)> = freqs
        .into_iter()
        .map(|(value, (cmd, count))| (value, cmd, count))
        .collect();
    ranked.sort_unstable_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
    ranked.into_iter().map(|(_, cmd, count)| (cmd, count)).collect()
}

/// Build a dictionary holding the `2^index_bits` most frequent of `commands`
/// (fewer if there are not that many distinct values).
pub fn build_table(commands: &[Command], cmd_bytes: usize, index_bits: usize) -> Result<EncodeTable> {
    let capacity = 1_usize << index_bits;
    let ranked = rank_commands(commands);
    debug!(
        "Found {} distinct {} bit commands, keeping at most {}",
        ranked.len(),
        cmd_bytes << 3,
        capacity
    );

    let entries: Vec<Command> = ranked
        .into_iter()
        .take(capacity)
        .map(|(cmd, count)| {
            trace!("{} seen {} times", cmd, count);
            cmd.clone()
        })
        .collect();

    EncodeTable::new(entries, cmd_bytes, index_bits)
}

#[cfg(test)]
mod test {
    use super::{build_table, rank_commands};
    use crate::bitstream::command::Command;

    #[test]
    fn most_frequent_test() {
        let a = Command::from_value(0xfffa, 16);
        let b = Command::from_value(0xfffb, 16);
        let c = Command::from_value(0xfffc, 16);
        let d = Command::from_value(0xfffd, 16);
        let commands = vec![
            d.clone(),
            d.clone(),
            d.clone(),
            c.clone(),
            b.clone(),
            b.clone(),
            a.clone(),
        ];

        let table = build_table(&commands, 2, 1).unwrap();
        assert_eq!(table.entries(), &[b, d]);
    }

    #[test]
    fn tie_break_test() {
        let commands: Vec<Command> = [0x30, 0x10, 0x20, 0x10, 0x30, 0x20, 0x05]
            .iter()
            .map(|&v| Command::from_value(v, 8))
            .collect();
        let ranked: Vec<(u64, u32)> = rank_commands(&commands)
            .into_iter()
            .map(|(cmd, count)| (cmd.to_integer(), count))
            .collect();
        assert_eq!(ranked, vec![(0x10, 2), (0x20, 2), (0x30, 2), (0x05, 1)]);

        // Two slots: the tie among the most frequent goes to the smaller values
        let table = build_table(&commands, 1, 1).unwrap();
        let values: Vec<u64> = table.entries().iter().map(|c| c.to_integer()).collect();
        assert_eq!(values, vec![0x10, 0x20]);
    }

    #[test]
    fn fewer_than_capacity_test() {
        let commands = vec![Command::from_value(7, 8); 5];
        let table = build_table(&commands, 1, 3).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.find(&Command::from_value(7, 8)), Some(0));
    }

    #[test]
    fn empty_input_test() {
        let table = build_table(&[], 4, 14).unwrap();
        assert!(table.is_empty());
    }
}
