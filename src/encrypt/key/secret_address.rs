use std::fmt;
use std::str::FromStr;

use ruint::aliases::U256;

use super::{Compress, Net, SecretKey};
use crate::codec::{decode_check, encode_check};
use crate::{Error, Result};

/// Marks a WIF payload whose public key is meant to be compressed.
const COMPRESSED_SUFFIX: u8 = 0x01;

/// A secret key in Wallet Import Format.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SecretAddress {
    pub net: Net,
    pub comp: Compress,
    secret: U256,
    address: String,
}

impl AsRef<str> for SecretAddress {
    fn as_ref(&self) -> &str {
        &self.address
    }
}

impl SecretAddress {
    /// prefix byte + 32-byte secret + optional `0x01`, then Base58Check.
    pub fn build(secret_key: &SecretKey, net: Net, comp: Compress) -> Self {
        let secret = secret_key.value();

        let mut payload = Vec::with_capacity(34);
        payload.push(net.wif_prefix());
        payload.extend_from_slice(&secret.to_be_bytes::<32>());
        if comp == Compress::On {
            payload.push(COMPRESSED_SUFFIX);
        }

        Self {
            net,
            comp,
            secret,
            address: encode_check(&payload),
        }
    }

    /// The raw secret carried by the string, not yet range-checked.
    pub fn secret(&self) -> U256 {
        self.secret
    }
}

impl fmt::Display for SecretAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl FromStr for SecretAddress {
    type Err = Error;

    fn from_str(address: &str) -> Result<Self> {
        let payload = decode_check(address)?;

        let comp = match payload.len() {
            33 => Compress::Off,
            34 if payload[33] == COMPRESSED_SUFFIX => Compress::On,
            34 => {
                return Err(Error::malformed(format!(
                    "unexpected WIF suffix byte {:#04x}",
                    payload[33]
                )))
            }
            len => return Err(Error::malformed(format!("WIF payload of {len} bytes"))),
        };

        let net = match payload[0] {
            0x80 => Net::Main,
            0xef => Net::Test,
            prefix => return Err(Error::InvalidPrefix(prefix)),
        };

        Ok(Self {
            net,
            comp,
            secret: U256::from_be_slice(&payload[1..33]),
            address: address.to_owned(),
        })
    }
}

impl TryFrom<String> for SecretAddress {
    type Error = Error;

    fn try_from(address: String) -> Result<Self> {
        address.parse()
    }
}
