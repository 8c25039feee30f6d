use std::collections::BTreeMap;
use std::fs;
use std::io;

use log::{debug, info, warn};

use super::arch::{Architecture, Machine};
use crate::compression::compress::{compress, Compressed, Dictionary};
use crate::compression::decompress::decompress;
use crate::compression::scheme::{descriptor, EncodeType};
use crate::compression::section::CompressedSection;
use crate::error::{Error, Result};

/// Name of the code section that gets compressed.
pub const TEXT: &str = ".text";
/// Extension of a compressed file. Dictionaries sit next to it as `<file>.rvz<dict name>`.
pub const EXTENSION: &str = ".rvz";

/// What a binary container must offer so its code section can be compressed in place.
pub trait SectionContainer {
    /// Bytes of the named section, if there is one.
    fn section(&self, name: &str) -> Option<&[u8]>;
    /// Overwrite an existing section. Fails with `MissingSection` if it is absent.
    fn replace_section(&mut self, name: &str, data: Vec<u8>) -> Result<()>;
    /// Add a new named section, replacing any section of the same name.
    fn add_section(&mut self, name: &str, data: Vec<u8>);
    /// Target machine of the code.
    fn machine(&self) -> Machine;
}

/// In-memory container: named byte sections plus a machine id.
#[derive(Clone, Debug)]
pub struct SectionSet {
    machine: Machine,
    sections: BTreeMap<String, Vec<u8>>,
}

impl SectionSet {
    pub fn new(machine: Machine) -> Self {
        Self {
            machine,
            sections: BTreeMap::new(),
        }
    }

    /// A container holding only a code section.
    pub fn with_text(machine: Machine, code: Vec<u8>) -> Self {
        let mut set = Self::new(machine);
        set.add_section(TEXT, code);
        set
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(|name| name.as_str())
    }
}

impl SectionContainer for SectionSet {
    fn section(&self, name: &str) -> Option<&[u8]> {
        self.sections.get(name).map(|data| data.as_slice())
    }

    fn replace_section(&mut self, name: &str, data: Vec<u8>) -> Result<()> {
        let slot = self
            .sections
            .get_mut(name)
            .ok_or_else(|| Error::MissingSection(name.to_string()))?;
        *slot = data;
        Ok(())
    }

    fn add_section(&mut self, name: &str, data: Vec<u8>) {
        self.sections.insert(name.to_string(), data);
    }

    fn machine(&self) -> Machine {
        self.machine
    }
}

/// Compress the `.text` section of a container and attach the dictionaries.
///
/// The container is only touched once compression has fully succeeded.
pub fn compress_sections<C: SectionContainer>(container: &mut C, encode_type: EncodeType) -> Result<Compressed> {
    let arch = Architecture::from_machine(container.machine())?;
    let code = container
        .section(TEXT)
        .ok_or_else(|| Error::MissingSection(TEXT.to_string()))?;
    let compressed = compress(code, arch, encode_type)?;

    container.replace_section(TEXT, compressed.section.to_bytes())?;
    compressed
        .dictionaries
        .iter()
        .for_each(|dict| container.add_section(&dict.name, dict.data.clone()));
    Ok(compressed)
}

/// Restore the `.text` section of a container compressed by [`compress_sections`].
pub fn decompress_sections<C: SectionContainer>(container: &mut C) -> Result<()> {
    let arch = Architecture::from_machine(container.machine())?;
    let text = container
        .section(TEXT)
        .ok_or_else(|| Error::MissingSection(TEXT.to_string()))?;
    let section = CompressedSection::from_bytes(text)?;

    let dictionaries = descriptor(arch, section.encode_type)?
        .dictionary_names()
        .into_iter()
        .filter_map(|name| {
            container.section(name).map(|data| Dictionary {
                name: name.to_string(),
                data: data.to_vec(),
            })
        })
        .collect::<Vec<_>>();

    let code = decompress(&section, arch, &dictionaries)?;
    container.replace_section(TEXT, code)
}

/// Write a compressed container as `<base>` (the code section) plus one
/// `<base><dict name>` file per dictionary.
pub fn save_compressed(set: &SectionSet, base: &str, force: bool) -> io::Result<()> {
    for name in set.names() {
        let path = if name == TEXT {
            base.to_string()
        } else {
            format!("{}{}", base, name)
        };
        if !force && std::path::Path::new(&path).exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists, use -f to overwrite", path),
            ));
        }
        let data = set.section(name).unwrap_or_default();
        fs::write(&path, data)?;
        debug!("Wrote {} bytes to {}", data.len(), path);
    }
    info!("Saved compressed code to {}", base);
    Ok(())
}

/// Read a compressed file and whichever of its dictionary files exist.
pub fn load_compressed(base: &str, arch: Architecture) -> io::Result<SectionSet> {
    let text = fs::read(base)?;
    let section = CompressedSection::from_bytes(&text)?;
    let names = descriptor(arch, section.encode_type)?.dictionary_names();

    let mut set = SectionSet::with_text(arch.machine(), text);
    for name in names {
        let path = format!("{}{}", base, name);
        match fs::read(&path) {
            Ok(data) => set.add_section(name, data),
            Err(e) => warn!("Could not read dictionary {}: {}", path, e),
        }
    }
    Ok(set)
}

/// Output name for a decompressed file: strip `.rvz`, or add `.out` if it is not there.
pub fn unzipped_name(base: &str) -> String {
    match base.strip_suffix(EXTENSION) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => format!("{}.out", base),
    }
}
