//! Byte-level encodings shared by keys, addresses and signatures.
//!
//! Nothing here touches curve arithmetic; callers hand in bytes they already
//! serialized.

pub mod base58;
pub mod hash;
pub mod varint;

pub use base58::{decode, decode_check, encode, encode_check};
pub use hash::{hash160, hash256};
