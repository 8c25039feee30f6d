use std::fmt::{Display, Formatter};

use crate::error::{Error, Result};

/// ELF machine id for RISC-V.
pub const EM_RISCV: u16 = 243;

/// ELF file class, which tells RV32 and RV64 apart for the same machine id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElfClass {
    Elf32,
    Elf64,
}

/// Target machine, as reported by the container holding the code section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Machine {
    pub e_machine: u16,
    pub class: ElfClass,
}

/// Supported instruction sets. Rv64 support is experimental and limited to MaskDuo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Architecture {
    Rv32,
    Rv64,
}

impl Architecture {
    pub fn from_machine(machine: Machine) -> Result<Self> {
        match (machine.e_machine, machine.class) {
            (EM_RISCV, ElfClass::Elf32) => Ok(Architecture::Rv32),
            (EM_RISCV, ElfClass::Elf64) => Ok(Architecture::Rv64),
            (other, _) => Err(Error::UnsupportedArchitecture(other)),
        }
    }

    pub fn machine(self) -> Machine {
        Machine {
            e_machine: EM_RISCV,
            class: match self {
                Architecture::Rv32 => ElfClass::Elf32,
                Architecture::Rv64 => ElfClass::Elf64,
            },
        }
    }

    /// Instruction width in bytes.
    pub fn width(self) -> usize {
        match self {
            Architecture::Rv32 => 4,
            Architecture::Rv64 => 8,
        }
    }
}

impl Display for Architecture {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
