//! Curve arithmetic, keys and ECDSA over secp256k1.

mod elliptic_curve;
pub mod k256;
mod key;
mod signature;

pub use elliptic_curve::{Curve, CurvePoint, Field, FieldElement, DEFAULT_TOLERANCE};
pub use k256::{Secp256k1, G};
pub use key::{
    Address, AddressBuilder, AddressEncoder, Compress, Net, PublicAddress, PublicKey, PublicKeySerialize,
    SecretAddress, SecretKey,
};
pub use signature::{nonce::deterministic_k, Signature};
