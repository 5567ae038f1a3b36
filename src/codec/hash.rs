use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// RIPEMD160(SHA256(data)), the 20-byte digest inside an address.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let mut out = [0u8; 20];
    out.copy_from_slice(&Ripemd160::digest(Sha256::digest(data)));
    out
}

/// SHA256(SHA256(data)).
pub fn hash256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(Sha256::digest(data)));
    out
}
