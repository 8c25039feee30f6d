//! The compression module turns a RISC-V code section into a compressed bitstream and back.
//!
//! Compression happens in the following steps:
//! - Slice the section into fixed-width instructions (commands).
//! - Partition every command into the coded units of the chosen scheme.
//! - Build one frequency-ranked dictionary per coded unit over the whole section.
//! - Code every unit, in program order, as a dictionary hit, a mask hit, or a literal.
//!
//! The result is one metadata byte (padding count and scheme tag) followed by the
//! bitstream, plus one dictionary blob per coded unit. Decompression reads the
//! dictionaries back from those blobs and walks the bitstream once.
//!
pub mod compress;
pub mod decompress;
pub mod scheme;
pub mod section;
pub mod unit;
