//! The tools module provides the pieces around the codec.
//!
//! The tools are:
//! - arch: Target instruction set, and how it is derived from an ELF machine id.
//! - cli: Command line interface for rvzip.
//! - sections: The section-container contract, an in-memory container, and its on-disk form.
//! - size_stat: Byte counts reported after compression.
//!
pub mod arch;
pub mod cli;
pub mod sections;
pub mod size_stat;
