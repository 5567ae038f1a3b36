//! Little-endian integers and Bitcoin's variable-length integer, the framing
//! transaction parsers read counts and lengths with.

use std::io::Read;

use ruint::aliases::U256;

use crate::{Error, Result};

pub fn little_endian_to_int(bytes: &[u8]) -> Result<U256> {
    U256::try_from_le_slice(bytes)
        .ok_or_else(|| Error::malformed(format!("{} bytes do not fit in 256 bits", bytes.len())))
}

/// `n` as exactly `length` little-endian bytes.
pub fn int_to_little_endian(n: U256, length: usize) -> Result<Vec<u8>> {
    if n.byte_len() > length {
        return Err(Error::IntegerTooLarge(n));
    }

    let mut bytes = n.to_le_bytes_vec();
    bytes.resize(length, 0);
    Ok(bytes)
}

fn read_le<R: Read>(reader: &mut R, len: usize) -> Result<u64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf[..len])?;
    Ok(u64::from_le_bytes(buf))
}

/// Reads one varint: below `0xfd` the byte is the value, otherwise
/// `0xfd`, `0xfe`, `0xff` announce 2, 4 or 8 little-endian bytes.
pub fn read_varint<R: Read>(reader: &mut R) -> Result<u64> {
    let mut prefix = [0u8; 1];
    reader.read_exact(&mut prefix)?;

    match prefix[0] {
        0xfd => read_le(reader, 2),
        0xfe => read_le(reader, 4),
        0xff => read_le(reader, 8),
        n => Ok(n as u64),
    }
}

pub fn encode_varint(n: U256) -> Result<Vec<u8>> {
    if n.bit_len() > 64 {
        return Err(Error::IntegerTooLarge(n));
    }

    let i = n.as_limbs()[0];
    let mut out = Vec::with_capacity(9);
    if i < 0xfd {
        out.push(i as u8);
    } else if i < 0x1_0000 {
        out.push(0xfd);
        out.extend_from_slice(&(i as u16).to_le_bytes());
    } else if i < 0x1_0000_0000 {
        out.push(0xfe);
        out.extend_from_slice(&(i as u32).to_le_bytes());
    } else {
        out.push(0xff);
        out.extend_from_slice(&i.to_le_bytes());
    }
    Ok(out)
}
