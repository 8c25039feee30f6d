//! Dictionary and bitmask compression of RISC-V code sections.
//!
//! Version 0.1.0
//!
//! Every instruction of a code section is coded as a dictionary index, a dictionary
//! index plus a one-field patch (a mask hit), or a literal. Six schemes split the
//! instruction differently before coding; see [`compression::scheme`].
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> rvzip -z -e mask-duo prog.text`
//!
//! This will create prog.text.rvz and one prog.text.rvz.dict.* file per dictionary.
//! `rvzip -d prog.text.rvz` restores prog.text.
//!
pub mod bitstream;
pub mod compression;
pub mod dictionary;
pub mod error;
pub mod tools;
