use crate::{Error, Result};

const ALPHABET: &bs58::Alphabet = bs58::Alphabet::BITCOIN;

impl From<bs58::decode::Error> for Error {
    fn from(err: bs58::decode::Error) -> Self {
        match err {
            bs58::decode::Error::InvalidChecksum { .. } => Error::InvalidChecksum,
            other => Error::malformed(other.to_string()),
        }
    }
}

/// Base58 text of a big-endian byte string. Each leading zero byte becomes
/// a leading `'1'`.
pub fn encode(bytes: &[u8]) -> String {
    bs58::encode(bytes).with_alphabet(ALPHABET).into_string()
}

pub fn decode(text: &str) -> Result<Vec<u8>> {
    Ok(bs58::decode(text).with_alphabet(ALPHABET).into_vec()?)
}

/// Appends the first four bytes of `hash256(payload)` and encodes the lot.
pub fn encode_check(payload: &[u8]) -> String {
    bs58::encode(payload)
        .with_alphabet(ALPHABET)
        .with_check()
        .into_string()
}

/// Decodes and strips the checksum, returning the payload.
pub fn decode_check(text: &str) -> Result<Vec<u8>> {
    bs58::decode(text)
        .with_alphabet(ALPHABET)
        .with_check(None)
        .into_vec()
        .map_err(|err| {
            tracing::debug!(text, %err, "base58check decode failed");
            err.into()
        })
}
