use std::ops::Deref;

use ruint::aliases::U256;

use super::{Compress, CurvePoint, Net, PublicAddress, PublicKeySerialize, Secp256k1, Signature};
use crate::codec::hash160;
use crate::encrypt::k256::{felt, CURVE};
use crate::{Error, Result};

/// A secp256k1 point other than infinity.
///
/// Keys come from [`SecretKey::public_key`](crate::encrypt::SecretKey::public_key),
/// from [`PublicKey::build`] on a point, or from SEC bytes through
/// [`PublicKey::parse`]. Both SEC forms serialize the same key:
///
/// | form | length | layout |
/// |---|---|---|
/// | uncompressed | 65 | `0x04`, x, y |
/// | compressed | 33 | `0x02` (even y) or `0x03` (odd y), x |
///
/// # Examples
///
/// ```rust
/// # use bitcoin_secp::encrypt::{Compress, Net, PublicKey, G};
/// let key = PublicKey::build(*G)?;
/// let sec = key.sec(Compress::On);
/// assert_eq!(
///     hex::encode(&sec),
///     "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
/// );
/// assert_eq!(PublicKey::parse(sec.as_ref())?, key);
/// assert_eq!(key.address(Net::Main, Compress::On).to_string(), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
/// # Ok::<(), bitcoin_secp::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(Secp256k1);

impl PublicKey {
    /// Wraps a point of [`CURVE`]. Infinity and points that do not satisfy
    /// the curve equation are `NotOnCurve`; other curves are `CurveMismatch`.
    pub fn build(key: Secp256k1) -> Result<Self> {
        if key.curve() != CURVE {
            return Err(Error::CurveMismatch);
        }
        match key {
            CurvePoint::Infinity { .. } => {
                Err(Error::NotOnCurve("a public key cannot be the point at infinity".into()))
            }
            // the variant is public, so the curve equation is checked again here
            CurvePoint::Point { x, y, .. } if !CURVE.contains(&x, &y, 0.0)? => {
                Err(Error::NotOnCurve(format!("({x}, {y})")))
            }
            CurvePoint::Point { .. } => Ok(PublicKey(key)),
        }
    }

    fn coordinates(&self) -> (U256, U256) {
        match self.0 {
            CurvePoint::Point { x, y, .. } => (x.value(), y.value()),
            // build never lets infinity through
            CurvePoint::Infinity { .. } => (U256::ZERO, U256::ZERO),
        }
    }

    pub fn to_uncompress_sec(&self) -> [u8; 65] {
        let (x, y) = self.coordinates();

        let mut sec = [0_u8; 65];
        sec[0] = 0x04;
        sec[1..33].copy_from_slice(&x.to_be_bytes::<32>());
        sec[33..].copy_from_slice(&y.to_be_bytes::<32>());
        sec
    }

    pub fn to_compress_sec(&self) -> [u8; 33] {
        let (x, y) = self.coordinates();

        let mut sec = [0_u8; 33];
        sec[0] = if y.bit(0) { 0x03 } else { 0x02 };
        sec[1..].copy_from_slice(&x.to_be_bytes::<32>());
        sec
    }

    pub fn sec(&self, comp: Compress) -> PublicKeySerialize {
        match comp {
            Compress::On => PublicKeySerialize::Compress(self.to_compress_sec()),
            Compress::Off => PublicKeySerialize::Uncompress(self.to_uncompress_sec()),
        }
    }

    /// Reads either SEC form. A compressed key is decompressed by solving
    /// `y² = x³ + 7` and taking the root whose parity the prefix names.
    pub fn parse(sec: &[u8]) -> Result<Self> {
        let point = match PublicKeySerialize::try_from(sec)? {
            PublicKeySerialize::Uncompress(sec) => Secp256k1::from_coordinates(
                U256::from_be_slice(&sec[1..33]),
                U256::from_be_slice(&sec[33..]),
            )?,
            PublicKeySerialize::Compress(sec) => {
                let x = felt(U256::from_be_slice(&sec[1..]))?;
                Secp256k1::lift_x(x, sec[0] == 0x03)?
            }
        };

        tracing::debug!(compressed = sec.len() == 33, "parsed SEC public key");
        Self::build(point)
    }

    pub fn hash160(&self, comp: Compress) -> [u8; 20] {
        hash160(self.sec(comp).as_ref())
    }

    pub fn address(&self, net: Net, comp: Compress) -> PublicAddress {
        let builder = PublicAddress::build_with_public_key(*self);
        let encoder = match comp {
            Compress::On => builder.from_compress(),
            Compress::Off => builder.from_uncompress(),
        };
        match net {
            Net::Main => encoder.into_main_net(),
            Net::Test => encoder.into_test_net(),
        }
    }

    /// Checks `signature` over the message hash `z`.
    ///
    /// `Ok(false)` is a signature that does not match, including one whose
    /// `r` or `s` is outside `1..N`. `Err` only comes from arithmetic on
    /// malformed input and does not mean the signature is invalid.
    ///
    /// ```rust
    /// # use bitcoin_secp::encrypt::{SecretKey, Signature};
    /// # use ruint::aliases::U256;
    /// let key = SecretKey::new(U256::from(12345u64))?;
    /// let public_key = key.public_key()?;
    /// let z = U256::from_be_bytes(bitcoin_secp::codec::hash256(b"Programming Bitcoin!"));
    ///
    /// let signature = key.sign(z)?;
    /// assert!(public_key.verify(z, &signature)?);
    /// assert!(!public_key.verify(z + U256::from(1u64), &signature)?);
    /// assert!(!public_key.verify(z, &Signature::new(U256::ZERO, signature.s()))?);
    /// # Ok::<(), bitcoin_secp::Error>(())
    /// ```
    pub fn verify(&self, z: U256, signature: &Signature) -> Result<bool> {
        signature.verify(z, self)
    }
}

impl TryFrom<[u8; 65]> for PublicKey {
    type Error = Error;

    fn try_from(sec: [u8; 65]) -> Result<Self> {
        Self::parse(&sec)
    }
}

impl TryFrom<[u8; 33]> for PublicKey {
    type Error = Error;

    fn try_from(sec: [u8; 33]) -> Result<Self> {
        Self::parse(&sec)
    }
}

impl Deref for PublicKey {
    type Target = Secp256k1;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encrypt::k256::G;

    fn from_secret(secret: U256) -> PublicKey {
        PublicKey::build(G.mul_scalar(secret).unwrap()).unwrap()
    }

    #[test]
    fn test_build_rejects_infinity() {
        let err = PublicKey::build(CURVE.infinity()).unwrap_err();
        assert!(matches!(err, Error::NotOnCurve(_)));
    }

    #[test]
    fn test_build_rejects_point_off_curve() {
        let one = felt(U256::from(1u64)).unwrap();
        let point = CurvePoint::Point { x: one, y: one, curve: CURVE };

        let err = PublicKey::build(point).unwrap_err();
        assert!(matches!(err, Error::NotOnCurve(_)), "got {err:?}");

        let on_curve = *G;
        assert_eq!(*PublicKey::build(on_curve).unwrap(), on_curve);
    }

    #[test]
    fn test_publickey_uncompress_sec() {
        let public_key = from_secret(U256::from(1u64));
        let uncompressed = public_key.to_uncompress_sec();

        assert_eq!(uncompressed[0], 0x04);
        assert_eq!(
            ::hex::encode(&uncompressed[1..33]),
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert_eq!(
            ::hex::encode(&uncompressed[33..]),
            "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
        );
    }

    #[test]
    fn test_sec_known_vectors() {
        let cases = [
            (
                U256::from(5000u64),
                Compress::Off,
                "04ffe558e388852f0120e46af2d1b370f85854a8eb0841811ece0e3e03d282d57c\
                 315dc72890a4f10a1481c031b03b351b0dc79901ca18a00cf009dbdb157a1d10",
            ),
            (
                U256::from(0xdeadbeef54321u64),
                Compress::Off,
                "0496be5b1292f6c856b3c5654e886fc13511462059089cdf9c479623bfcbe77690\
                 32555d1b027c25c2828ba96a176d78419cd1236f71558f6187aec09611325eb6",
            ),
            (
                U256::from(0xdeadbeef12345u64),
                Compress::On,
                "03d90cd625ee87dd38656dd95cf79f65f60f7273b67d3096e68bd81e4f5342691f",
            ),
            (
                U256::from(2018u64).pow(U256::from(5u64)),
                Compress::On,
                "02027f3da1918455e03c46f659266a1bb5204e959db7364d2f473bdf8f0a13cc9d",
            ),
        ];

        for (secret, comp, expected) in cases {
            let public_key = from_secret(secret);
            let sec = public_key.sec(comp);
            assert_eq!(::hex::encode(&sec), expected, "SEC of {secret}");
            assert_eq!(sec.compress(), comp);

            let parsed = PublicKey::parse(sec.as_ref()).unwrap();
            assert_eq!(parsed, public_key, "{secret} should parse back");
        }
    }

    #[test]
    fn test_publickey_compress_decompress_roundtrip() {
        for private_key in [1u64, 2, 3, 123, 999, 123456789] {
            let public_key = from_secret(U256::from(private_key));

            let compressed = public_key.to_compress_sec();
            let y_odd = public_key.y().unwrap().value().bit(0);
            assert_eq!(compressed[0], if y_odd { 0x03 } else { 0x02 }, "prefix for {private_key}");

            assert_eq!(PublicKey::try_from(compressed).unwrap(), public_key);
            assert_eq!(PublicKey::try_from(public_key.to_uncompress_sec()).unwrap(), public_key);
        }
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        let sec = from_secret(U256::from(7u64)).to_compress_sec();

        let mut bad_prefix = sec;
        bad_prefix[0] = 0x05;
        assert!(matches!(PublicKey::parse(&bad_prefix), Err(Error::MalformedEncoding(_))));
        assert!(matches!(PublicKey::parse(&sec[..32]), Err(Error::MalformedEncoding(_))));
        assert!(matches!(PublicKey::parse(&[]), Err(Error::MalformedEncoding(_))));

        // x = 5 has no point on the curve
        let mut no_point = [0u8; 33];
        no_point[0] = 0x02;
        no_point[32] = 5;
        assert!(matches!(PublicKey::parse(&no_point), Err(Error::NotOnCurve(_))));

        // (1, 1) is not on the curve
        let mut off_curve = [0u8; 65];
        off_curve[0] = 0x04;
        off_curve[32] = 1;
        off_curve[64] = 1;
        assert!(matches!(PublicKey::parse(&off_curve), Err(Error::NotOnCurve(_))));
    }

    #[test]
    fn test_hash160() {
        let public_key = from_secret(U256::from(1u64));
        assert_eq!(
            ::hex::encode(public_key.hash160(Compress::On)),
            "751e76e8199196d454941c45d1b3a323f1433bd6"
        );
    }

    #[test]
    fn test_address() {
        let public_key = from_secret(U256::from(1u64));
        assert_eq!(public_key.address(Net::Main, Compress::On).to_string(), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
        assert_eq!(public_key.address(Net::Main, Compress::Off).to_string(), "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm");
    }
}
