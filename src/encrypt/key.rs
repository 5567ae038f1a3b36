mod public_key_lib;
mod secret_address;
mod secret_key;

use super::{CurvePoint, FieldElement, Secp256k1, Signature};

pub use public_key_lib::{Address, AddressBuilder, AddressEncoder, PublicAddress, PublicKey, PublicKeySerialize};
pub use secret_address::SecretAddress;
pub use secret_key::SecretKey;

/// Which Bitcoin network an address or WIF string belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Net {
    Main,
    Test,
}

impl Net {
    fn wif_prefix(self) -> u8 {
        match self {
            Net::Main => 0x80,
            Net::Test => 0xef,
        }
    }

    fn address_prefix(self) -> u8 {
        match self {
            Net::Main => 0x00,
            Net::Test => 0x6f,
        }
    }
}

/// Whether a public key is serialized as 33-byte compressed or 65-byte
/// uncompressed SEC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compress {
    On,
    Off,
}
