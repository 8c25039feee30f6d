//! Error types for the rvzip library.

use std::fmt;

/// Result type alias for rvzip operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while compressing or decompressing a code section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Section size is not a multiple of the instruction width.
    BadLength {
        /// Section length in bytes.
        len: usize,
        /// Instruction width in bytes.
        width: usize,
    },
    /// Split point lies past the end of the command.
    InvalidSplit {
        /// Requested prefix length in bits.
        fbits: usize,
        /// Command length in bits.
        len: usize,
    },
    /// A dictionary entry does not have the table's fixed length.
    BadCommandLength {
        /// Expected length in bits.
        expected: usize,
        /// Actual length in bits.
        actual: usize,
    },
    /// More entries than the table's index bits can address.
    CapacityExceeded {
        /// Number of entries offered.
        entries: usize,
        /// Maximum number of entries.
        capacity: usize,
    },
    /// The named section is not present in the container.
    MissingSection(String),
    /// A dictionary required by the scheme was not supplied.
    MissingDictionary(String),
    /// Scheme is not available for this instruction width, or the tag is unknown.
    UnsupportedScheme(String),
    /// Target machine is not a RISC-V machine we know how to handle.
    UnsupportedArchitecture(u16),
    /// The compressed data ended in the middle of a coded unit or header.
    UnexpectedEnd,
    /// A coded unit refers to a dictionary slot that does not exist.
    IndexOutOfRange {
        /// Index read from the stream.
        index: usize,
        /// Number of entries in the dictionary.
        len: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BadLength { len, width } => {
                write!(
                    f,
                    "Section size {} is not a multiple of the instruction width {}",
                    len, width
                )
            }
            Error::InvalidSplit { fbits, len } => {
                write!(f, "Cannot split a {} bit command at bit {}", len, fbits)
            }
            Error::BadCommandLength { expected, actual } => {
                write!(
                    f,
                    "Command has bad length: expected {} bits, got {}",
                    expected, actual
                )
            }
            Error::CapacityExceeded { entries, capacity } => {
                write!(
                    f,
                    "{} entries exceed the table capacity of {}",
                    entries, capacity
                )
            }
            Error::MissingSection(name) => write!(f, "No section with name: {}", name),
            Error::MissingDictionary(name) => write!(f, "No dictionary with name: {}", name),
            Error::UnsupportedScheme(what) => write!(f, "Not supported encoding type: {}", what),
            Error::UnsupportedArchitecture(machine) => {
                write!(f, "Not supported machine type: {}", machine)
            }
            Error::UnexpectedEnd => write!(f, "Unexpected end of compressed data"),
            Error::IndexOutOfRange { index, len } => {
                write!(
                    f,
                    "Dictionary index {} out of range for {} entries",
                    index, len
                )
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidData, err)
    }
}
