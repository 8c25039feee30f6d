use log::{debug, info, trace};

use super::compress::Dictionary;
use super::scheme::descriptor;
use super::section::CompressedSection;
use super::unit::decode_unit;
use crate::bitstream::bitreader::BitReader;
use crate::dictionary::encode_table::EncodeTable;
use crate::error::{Error, Result};
use crate::tools::arch::Architecture;

/// Restore the code section from its compressed form.
///
/// The scheme comes from the section header. Every dictionary the scheme
/// names must be supplied; tables are read back from those blobs, never
/// rebuilt from the stream.
pub fn decompress(section: &CompressedSection, arch: Architecture, dictionaries: &[Dictionary]) -> Result<Vec<u8>> {
    let scheme = descriptor(arch, section.encode_type)?;
    info!(
        "Decompressing {} bits of {} code with {}",
        section.bits().len(),
        arch,
        section.encode_type
    );

    let tables = scheme
        .units
        .iter()
        .map(|unit| {
            let blob = dictionaries
                .iter()
                .find(|d| d.name == unit.name)
                .ok_or_else(|| Error::MissingDictionary(unit.name.to_string()))?;
            let table = EncodeTable::from_bytes(&blob.data, unit.cmd_bytes, unit.index_bits)?;
            debug!("{}: {} entries", unit.name, table.len());
            Ok(table)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut out = Vec::with_capacity(section.byte_len() * 2);
    let mut br = BitReader::new(section.bits());
    while br.remaining() > 0 {
        trace!("Command at {}", br.loc());
        let parts = scheme
            .units
            .iter()
            .zip(tables.iter())
            .map(|(unit, table)| decode_unit(unit, table, &mut br))
            .collect::<Result<Vec<_>>>()?;
        out.extend_from_slice(scheme.join(&parts).as_bytes());
    }

    info!("Restored {} bytes of code", out.len());
    Ok(out)
}
