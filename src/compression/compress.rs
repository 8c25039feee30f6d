use log::{debug, info};

use super::scheme::{descriptor, EncodeType, SchemeDescriptor};
use super::section::CompressedSection;
use super::unit::{encode_unit, Coverage};
use crate::bitstream::bitbuffer::BitBuffer;
use crate::bitstream::command::Command;
use crate::dictionary::builder::build_table;
use crate::dictionary::encode_table::EncodeTable;
use crate::error::{Error, Result};
use crate::tools::arch::Architecture;
use crate::tools::size_stat::SizeStat;

/// A named dictionary blob that must be stored next to the compressed section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dictionary {
    pub name: String,
    pub data: Vec<u8>,
}

/// Everything a compression run produces.
#[derive(Debug)]
pub struct Compressed {
    pub section: CompressedSection,
    pub dictionaries: Vec<Dictionary>,
    pub tables: Vec<EncodeTable>,
    pub stats: SizeStat,
    pub coverage: Vec<Coverage>,
}

/// Slice the code section into whole instructions.
pub fn get_commands(code: &[u8], width: usize) -> Result<Vec<Command>> {
    if code.len() % width != 0 {
        return Err(Error::BadLength {
            len: code.len(),
            width,
        });
    }
    Ok(code.chunks_exact(width).map(Command::from_bytes).collect())
}

/// Build one dictionary per coded unit from that unit's slice of every command.
fn build_tables(scheme: &SchemeDescriptor, parts: &[Vec<Command>]) -> Result<Vec<EncodeTable>> {
    scheme
        .units
        .iter()
        .enumerate()
        .map(|(idx, unit)| {
            let stream: Vec<Command> = parts.iter().map(|p| p[idx].clone()).collect();
            let table = build_table(&stream, unit.cmd_bytes, unit.index_bits)?;
            debug!("{}: {} entries of {} bytes", unit.name, table.len(), unit.cmd_bytes);
            Ok(table)
        })
        .collect()
}

/// Compress a code section with the chosen scheme.
///
/// Returns the compressed section together with the dictionaries needed to
/// decompress it and size statistics. Nothing is returned on failure.
pub fn compress(code: &[u8], arch: Architecture, encode_type: EncodeType) -> Result<Compressed> {
    let scheme = descriptor(arch, encode_type)?;
    let commands = get_commands(code, arch.width())?;
    info!(
        "Compressing {} {} instructions with {}",
        commands.len(),
        arch,
        encode_type
    );

    let parts = commands
        .iter()
        .map(|cmd| scheme.partition(cmd))
        .collect::<Result<Vec<_>>>()?;
    let tables = build_tables(scheme, &parts)?;

    let mut bits = BitBuffer::with_capacity(code.len() * 8);
    let mut coverage: Vec<Coverage> = scheme.units.iter().map(|u| Coverage::new(u.name)).collect();
    for cmd_parts in parts.iter() {
        for (idx, unit) in scheme.units.iter().enumerate() {
            let tier = encode_unit(unit, &tables[idx], &cmd_parts[idx], &mut bits);
            coverage[idx].count(tier);
        }
    }
    coverage.iter().for_each(|c| {
        debug!(
            "{}: {} dictionary, {} mask, {} literal",
            c.name, c.dict, c.mask, c.literal
        )
    });

    let section = CompressedSection::new(encode_type, bits);
    let dictionaries: Vec<Dictionary> = scheme
        .units
        .iter()
        .zip(tables.iter())
        .map(|(unit, table)| Dictionary {
            name: unit.name.to_string(),
            data: table.to_bytes(),
        })
        .collect();

    let stats = SizeStat {
        initial_code_size: code.len(),
        final_code_size: section.byte_len(),
        dict_size: dictionaries.iter().map(|d| d.data.len()).sum(),
    };
    info!("{}", stats);

    Ok(Compressed {
        section,
        dictionaries,
        tables,
        stats,
        coverage,
    })
}
