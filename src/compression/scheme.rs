use std::fmt::{Display, Formatter};

use crate::bitstream::command::Command;
use crate::dictionary::mask::MaskLayout;
use crate::error::{Error, Result};
use crate::tools::arch::Architecture;

/// Encoding scheme selector. The discriminant is the tag stored in the low five
/// bits of a compressed section's metadata byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
#[repr(u8)]
pub enum EncodeType {
    Dict = 0,
    MaskSingle = 1,
    MaskDuo = 2,
    MaskQuad = 3,
    MaskOperandsOpcode = 4,
    MaskDuoQuad = 5,
}

impl EncodeType {
    pub const ALL: [EncodeType; 6] = [
        EncodeType::Dict,
        EncodeType::MaskSingle,
        EncodeType::MaskDuo,
        EncodeType::MaskDuoQuad,
        EncodeType::MaskQuad,
        EncodeType::MaskOperandsOpcode,
    ];

    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for EncodeType {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(EncodeType::Dict),
            1 => Ok(EncodeType::MaskSingle),
            2 => Ok(EncodeType::MaskDuo),
            3 => Ok(EncodeType::MaskQuad),
            4 => Ok(EncodeType::MaskOperandsOpcode),
            5 => Ok(EncodeType::MaskDuoQuad),
            other => Err(Error::UnsupportedScheme(format!("tag {}", other))),
        }
    }
}

impl Display for EncodeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// How a coded unit is written: dictionary index or literal, or the
/// three-tier layout with a mask tier in between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tiers {
    Dict,
    Masked(MaskLayout),
}

/// One coded unit of a scheme: a run of command bits with its own dictionary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitLayout {
    /// Name of the dictionary blob for this unit.
    pub name: &'static str,
    /// First command bit covered by the unit.
    pub offset: usize,
    /// Unit length in bytes.
    pub cmd_bytes: usize,
    pub index_bits: usize,
    pub tiers: Tiers,
}

impl UnitLayout {
    const fn dict(name: &'static str, offset: usize, cmd_bytes: usize, index_bits: usize) -> Self {
        Self {
            name,
            offset,
            cmd_bytes,
            index_bits,
            tiers: Tiers::Dict,
        }
    }

    const fn masked(
        name: &'static str,
        offset: usize,
        cmd_bytes: usize,
        index_bits: usize,
        pos_bits: usize,
        mask_bits: usize,
    ) -> Self {
        Self {
            name,
            offset,
            cmd_bytes,
            index_bits,
            tiers: Tiers::Masked(MaskLayout::new(pos_bits, mask_bits)),
        }
    }

    pub fn bits(&self) -> usize {
        self.cmd_bytes << 3
    }
}

/// A scheme for one architecture: the command width and its coded units, in
/// the order their bits are written for each command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchemeDescriptor {
    pub encode_type: EncodeType,
    pub cmd_bytes: usize,
    pub units: &'static [UnitLayout],
}

const DICT_INDEX_BITS: usize = 14;

// Field partitions shared between schemes.
const HALF_INDEX_BITS: usize = 6;
const HALF_POS_BITS: usize = 2;
const HALF_MASK_BITS: usize = 4;
const QUARTER_INDEX_BITS: usize = 3;
const QUARTER_POS_BITS: usize = 2;
const QUARTER_MASK_BITS: usize = 2;

static RV32_SCHEMES: [SchemeDescriptor; 6] = [
    SchemeDescriptor {
        encode_type: EncodeType::Dict,
        cmd_bytes: 4,
        units: &[UnitLayout::dict(".dict", 0, 4, DICT_INDEX_BITS)],
    },
    SchemeDescriptor {
        encode_type: EncodeType::MaskSingle,
        cmd_bytes: 4,
        units: &[UnitLayout::masked(".dict", 0, 4, 13, 3, 4)],
    },
    SchemeDescriptor {
        encode_type: EncodeType::MaskDuo,
        cmd_bytes: 4,
        units: &[
            UnitLayout::masked(".dict.1", 0, 2, HALF_INDEX_BITS, HALF_POS_BITS, HALF_MASK_BITS),
            UnitLayout::masked(".dict.2", 16, 2, HALF_INDEX_BITS, HALF_POS_BITS, HALF_MASK_BITS),
        ],
    },
    SchemeDescriptor {
        encode_type: EncodeType::MaskQuad,
        cmd_bytes: 4,
        units: &[
            UnitLayout::masked(".dict.11", 0, 1, QUARTER_INDEX_BITS, QUARTER_POS_BITS, QUARTER_MASK_BITS),
            UnitLayout::masked(".dict.12", 8, 1, QUARTER_INDEX_BITS, QUARTER_POS_BITS, QUARTER_MASK_BITS),
            UnitLayout::masked(".dict.21", 16, 1, QUARTER_INDEX_BITS, QUARTER_POS_BITS, QUARTER_MASK_BITS),
            UnitLayout::masked(".dict.22", 24, 1, QUARTER_INDEX_BITS, QUARTER_POS_BITS, QUARTER_MASK_BITS),
        ],
    },
    SchemeDescriptor {
        encode_type: EncodeType::MaskOperandsOpcode,
        cmd_bytes: 4,
        // Operands are written before the opcode.
        units: &[
            UnitLayout::masked(".dict.operands", 8, 3, 10, 3, 3),
            UnitLayout::masked(".dict.opcode", 0, 1, QUARTER_INDEX_BITS, QUARTER_POS_BITS, QUARTER_MASK_BITS),
        ],
    },
    SchemeDescriptor {
        encode_type: EncodeType::MaskDuoQuad,
        cmd_bytes: 4,
        units: &[
            UnitLayout::masked(".dict.1", 0, 2, HALF_INDEX_BITS, HALF_POS_BITS, HALF_MASK_BITS),
            UnitLayout::masked(".dict.21", 16, 1, QUARTER_INDEX_BITS, QUARTER_POS_BITS, QUARTER_MASK_BITS),
            UnitLayout::masked(".dict.22", 24, 1, QUARTER_INDEX_BITS, QUARTER_POS_BITS, QUARTER_MASK_BITS),
        ],
    },
];

static RV64_SCHEMES: [SchemeDescriptor; 1] = [SchemeDescriptor {
    encode_type: EncodeType::MaskDuo,
    cmd_bytes: 8,
    units: &[
        UnitLayout::masked(".dict.1", 0, 4, 10, 3, 4),
        UnitLayout::masked(".dict.2", 32, 4, 10, 3, 4),
    ],
}];

/// Look up the scheme descriptor for an architecture.
pub fn descriptor(arch: Architecture, encode_type: EncodeType) -> Result<&'static SchemeDescriptor> {
    let schemes: &'static [SchemeDescriptor] = match arch {
        Architecture::Rv32 => &RV32_SCHEMES,
        Architecture::Rv64 => &RV64_SCHEMES,
    };
    schemes
        .iter()
        .find(|scheme| scheme.encode_type == encode_type)
        .ok_or_else(|| Error::UnsupportedScheme(format!("{} on {}", encode_type, arch)))
}

/// Schemes an architecture supports, in report order.
pub fn supported(arch: Architecture) -> Vec<EncodeType> {
    EncodeType::ALL
        .iter()
        .copied()
        .filter(|&encode_type| descriptor(arch, encode_type).is_ok())
        .collect()
}

impl SchemeDescriptor {
    /// Cut a command into one sub-command per unit, in emission order.
    pub fn partition(&self, cmd: &Command) -> Result<Vec<Command>> {
        self.units
            .iter()
            .map(|unit| {
                let (_, rest) = cmd.split(unit.offset)?;
                let (field, _) = rest.split(unit.bits())?;
                Ok(field)
            })
            .collect()
    }

    /// Put decoded sub-commands (in emission order) back into one command.
    pub fn join(&self, parts: &[Command]) -> Command {
        let mut order: Vec<usize> = (0..self.units.len()).collect();
        order.sort_by_key(|&i| self.units[i].offset);

        let mut cmd = Command::new();
        order.iter().for_each(|&i| cmd.join(&parts[i]));
        cmd
    }

    /// Dictionary names this scheme reads and writes.
    pub fn dictionary_names(&self) -> Vec<&'static str> {
        self.units.iter().map(|unit| unit.name).collect()
    }
}
