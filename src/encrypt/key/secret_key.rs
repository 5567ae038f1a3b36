use derive_more::Deref;
use rand::Rng;
use ruint::aliases::U256;

use super::{Compress, FieldElement, Net, PublicAddress, PublicKey, SecretAddress, Signature};
use crate::encrypt::k256::{G, N};
use crate::{Error, Result};

/// A private scalar `d` with `0 < d < N`.
///
/// The key signs message hashes and derives everything public from `d·G`:
/// the [`PublicKey`], its P2PKH [`PublicAddress`] and the WIF text of the
/// secret itself.
///
/// # Examples
///
/// ```rust
/// # use bitcoin_secp::encrypt::{Compress, Net, SecretKey};
/// # use ruint::aliases::U256;
/// let key = SecretKey::new(U256::from(5003u64))?;
///
/// let wif = key.wif(Net::Test, Compress::On);
/// assert_eq!(wif.to_string(), "cMahea7zqjxrtgAbB7LSGbcQUr1uX1ojuat9jZodMN8rFTv2sfUK");
/// assert_eq!(SecretKey::try_from(&wif)?, key);
///
/// let z = U256::from(0xcafeu64);
/// let signature = key.sign(z)?;
/// assert!(key.public_key()?.verify(z, &signature)?);
/// # Ok::<(), bitcoin_secp::Error>(())
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy, Deref)]
pub struct SecretKey(FieldElement);

impl SecretKey {
    /// Fails with `InvalidScalar` for zero and `OutOfRange` for `N` or more.
    pub fn new(secret: U256) -> Result<Self> {
        if secret == U256::ZERO {
            return Err(Error::InvalidScalar("secret key must not be zero".into()));
        }
        Ok(Self(FieldElement::new(secret, N)?))
    }

    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        loop {
            let candidate: U256 = rng.r#gen();
            if let Ok(key) = Self::new(candidate) {
                return key;
            }
        }
    }

    /// `d·G`.
    pub fn public_key(&self) -> Result<PublicKey> {
        PublicKey::build(G.mul_scalar(self.value())?)
    }

    /// Signs the 256-bit message hash `z`. See [`Signature::build`].
    pub fn sign(&self, z: U256) -> Result<Signature> {
        Signature::build(z, self)
    }

    pub fn wif(&self, net: Net, comp: Compress) -> SecretAddress {
        SecretAddress::build(self, net, comp)
    }

    pub fn address(&self, net: Net, comp: Compress) -> Result<PublicAddress> {
        Ok(self.public_key()?.address(net, comp))
    }
}

impl TryFrom<&SecretAddress> for SecretKey {
    type Error = Error;

    fn try_from(wif: &SecretAddress) -> Result<Self> {
        Self::new(wif.secret())
    }
}
