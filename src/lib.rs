//! secp256k1 keys and signatures for Bitcoin, built up from prime-field
//! arithmetic.
//!
//! ```rust
//! # use bitcoin_secp::encrypt::{Compress, Net, SecretKey};
//! # use ruint::aliases::U256;
//! let key = SecretKey::new(U256::from(5002u64))?;
//! let address = key.address(Net::Test, Compress::Off)?;
//! assert_eq!(address.to_string(), "mmTPbXQFxboEtNRkwfh6K51jvdtHLxGeMA");
//!
//! let z = U256::from_be_bytes(bitcoin_secp::codec::hash256(b"my message"));
//! let signature = key.sign(z)?;
//! assert!(key.public_key()?.verify(z, &signature)?);
//! # Ok::<(), bitcoin_secp::Error>(())
//! ```

pub mod codec;
pub mod encrypt;
mod error;

pub use error::{Error, Result};
