//! The dictionary module builds and searches the per-run instruction dictionaries.
//!
//! - encode_table: the sorted, capacity-bounded dictionary with exact-match lookup.
//! - builder: ranks commands by frequency and keeps the most frequent ones.
//! - mask: finds an entry that differs from a command in exactly one field.
//!
pub mod builder;
pub mod encode_table;
pub mod mask;
