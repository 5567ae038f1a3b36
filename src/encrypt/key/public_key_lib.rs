mod public_address;
mod public_key;
mod public_serialize;

pub use public_address::{Address, AddressBuilder, AddressEncoder, PublicAddress};
pub use public_key::PublicKey;
pub use public_serialize::PublicKeySerialize;

use super::{Compress, CurvePoint, Net, Secp256k1, Signature};
