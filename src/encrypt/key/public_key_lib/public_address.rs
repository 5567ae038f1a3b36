use std::fmt;
use std::str::FromStr;

use super::{Net, PublicKey, PublicKeySerialize};
use crate::codec::{decode_check, encode_check, hash160};
use crate::{Error, Result};

/// Second step of the address builder: holds the SEC bytes and picks the
/// network. The payload is the network's version byte followed by
/// `hash160(sec)`, encoded with Base58Check.
pub struct AddressEncoder(PublicKeySerialize);

impl AddressEncoder {
    fn encode(&self, net: Net) -> Address {
        let mut payload = Vec::with_capacity(21);
        payload.push(net.address_prefix());
        payload.extend_from_slice(&hash160(self.0.as_ref()));
        let addr = encode_check(&payload);

        match self.0 {
            PublicKeySerialize::Compress(_) => Address::Compress(addr),
            PublicKeySerialize::Uncompress(_) => Address::Uncompress(addr),
        }
    }

    pub fn into_main_net(self) -> PublicAddress {
        PublicAddress::MainNet(self.encode(Net::Main))
    }

    pub fn into_test_net(self) -> PublicAddress {
        PublicAddress::TestNet(self.encode(Net::Test))
    }
}

/// First step of the address builder, started by
/// [`PublicAddress::build_with_public_key`]: picks the SEC form to hash.
pub struct AddressBuilder(PublicKey);

impl AddressBuilder {
    pub fn from_compress(self) -> AddressEncoder {
        AddressEncoder(PublicKeySerialize::Compress(self.0.to_compress_sec()))
    }

    pub fn from_uncompress(self) -> AddressEncoder {
        AddressEncoder(PublicKeySerialize::Uncompress(self.0.to_uncompress_sec()))
    }
}

/// The Base58Check text of an address, tagged with the SEC form it was
/// built from. A parsed address cannot tell which form was hashed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Address {
    Compress(String),
    Uncompress(String),
    UnknownCompress(String),
}

impl Address {
    pub fn as_str(&self) -> &str {
        match self {
            Address::Compress(s) | Address::Uncompress(s) | Address::UnknownCompress(s) => s,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pay-to-public-key-hash address.
///
/// Built from a key in two steps, SEC form first and network second, or
/// parsed back from text. Parsing checks the Base58Check checksum, a 21-byte
/// payload and a version byte of `0x00` (main) or `0x6f` (test).
///
/// # Examples
///
/// ```rust
/// # use bitcoin_secp::encrypt::{Net, PublicAddress, PublicKey, G};
/// let key = PublicKey::build(*G)?;
/// let address = PublicAddress::build_with_public_key(key)
///     .from_uncompress()
///     .into_main_net();
/// assert_eq!(address.to_string(), "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm");
///
/// let parsed: PublicAddress = "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm".parse()?;
/// assert_eq!(parsed.net(), Net::Main);
/// assert_eq!(parsed.hash160()?, key.hash160(bitcoin_secp::encrypt::Compress::Off));
/// # Ok::<(), bitcoin_secp::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PublicAddress {
    MainNet(Address),
    TestNet(Address),
}

impl PublicAddress {
    pub fn build_with_public_key(public_key: PublicKey) -> AddressBuilder {
        AddressBuilder(public_key)
    }

    pub fn net(&self) -> Net {
        match self {
            PublicAddress::MainNet(_) => Net::Main,
            PublicAddress::TestNet(_) => Net::Test,
        }
    }

    pub fn address(&self) -> &Address {
        match self {
            PublicAddress::MainNet(a) | PublicAddress::TestNet(a) => a,
        }
    }

    /// The 20-byte hash160 the address commits to.
    pub fn hash160(&self) -> Result<[u8; 20]> {
        let payload = decode_check(self.address().as_str())?;
        if payload.len() != 21 {
            return Err(Error::malformed(format!("address payload of {} bytes", payload.len())));
        }

        let mut out = [0u8; 20];
        out.copy_from_slice(&payload[1..]);
        Ok(out)
    }
}

impl fmt::Display for PublicAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.address(), f)
    }
}

impl FromStr for PublicAddress {
    type Err = Error;

    fn from_str(address: &str) -> Result<Self> {
        let payload = decode_check(address)?;

        // version byte + 20-byte hash
        if payload.len() != 21 {
            return Err(Error::malformed(format!("address payload of {} bytes", payload.len())));
        }

        let address = Address::UnknownCompress(address.to_owned());
        match payload[0] {
            0x00 => Ok(PublicAddress::MainNet(address)),
            0x6f => Ok(PublicAddress::TestNet(address)),
            version => {
                tracing::debug!(version, "unsupported address version");
                Err(Error::InvalidPrefix(version))
            }
        }
    }
}

impl TryFrom<String> for PublicAddress {
    type Error = Error;

    fn try_from(address: String) -> Result<Self> {
        address.parse()
    }
}
