//! The bitstream module holds the bit-level primitives every scheme is built from.
//!
//! - bitbuffer: an append-only, randomly readable run of bits, packed least significant bit first.
//! - command: a BitBuffer holding one instruction (or one field of one), with bit-precise splitting.
//! - bitreader: a cursor over a BitBuffer used while decoding.
//!
//! Values are read "bit 0 first": pushing the low `n` bits of `v` and folding the buffer back with
//! `to_integer()` gives back `v`. Every dictionary lookup and ordering in the crate uses that value.
//!
pub mod bitbuffer;
pub mod bitreader;
pub mod command;
