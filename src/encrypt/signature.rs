pub mod nonce;

use std::fmt;

use ruint::aliases::U256;

use super::k256::{G, N};
use super::{CurvePoint, Field, FieldElement, PublicKey, SecretKey};
use crate::{Error, Result};

const SEQUENCE: u8 = 0x30;
const INTEGER: u8 = 0x02;

/// An ECDSA signature `(r, s)` over secp256k1.
///
/// Signatures made by [`Signature::build`] are deterministic and low-s, so
/// their DER encoding is stable byte for byte.
///
/// ```rust
/// # use bitcoin_secp::encrypt::{SecretKey, Signature};
/// # use ruint::aliases::U256;
/// let key = SecretKey::new(U256::from(5003u64))?;
/// let z = U256::from_be_bytes(bitcoin_secp::codec::hash256(b"hello"));
///
/// let der = key.sign(z)?.der();
/// assert_eq!(der[0], 0x30);
/// assert_eq!(der, key.sign(z)?.der());
/// assert!(key.public_key()?.verify(z, &Signature::parse_der(&der)?)?);
/// # Ok::<(), bitcoin_secp::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    r: U256,
    s: U256,
}

/// `n mod N` as an element of the scalar field.
fn scalar(n: U256) -> FieldElement {
    FieldElement::from_parts(n % N, N)
}

impl Signature {
    pub fn new(r: U256, s: U256) -> Self {
        Self { r, s }
    }

    pub fn r(&self) -> U256 {
        self.r
    }

    pub fn s(&self) -> U256 {
        self.s
    }

    /// Signs the message hash `z` with a deterministic nonce.
    ///
    /// `s` is normalized to the lower half of the order, so the same key and
    /// hash always give the same signature.
    #[tracing::instrument(skip_all, level = "debug")]
    pub fn build(z: U256, secret_key: &SecretKey) -> Result<Self> {
        let k = nonce::deterministic_k(secret_key.value(), z);

        let r = match G.mul_scalar(k)? {
            // the x coordinate itself, as verify compares it
            CurvePoint::Point { x, .. } => x.value(),
            CurvePoint::Infinity { .. } => {
                return Err(Error::InvalidScalar("nonce mapped to the point at infinity".into()))
            }
        };

        // s = (z + r·d) / k
        let s = scalar(z)
            .add(&scalar(r).mul(&scalar(secret_key.value()))?)?
            .div(&scalar(k))?
            .value();
        if r == U256::ZERO || s == U256::ZERO {
            return Err(Error::InvalidScalar("signature component is zero".into()));
        }

        let s = if s > N / U256::from(2) { N - s } else { s };
        tracing::debug!(r = %hex::encode(r.to_be_bytes::<32>()), "signed");
        Ok(Self::new(r, s))
    }

    /// Checks the signature against `z` and `public_key`.
    ///
    /// `r` or `s` outside `1..N` is reported as `false` without doing any
    /// curve arithmetic.
    #[tracing::instrument(skip_all, level = "debug")]
    pub fn verify(&self, z: U256, public_key: &PublicKey) -> Result<bool> {
        let in_range = |n: U256| n != U256::ZERO && n < N;
        if !in_range(self.r) || !in_range(self.s) {
            tracing::debug!("signature component outside 1..N");
            return Ok(false);
        }

        // uG + vP = R, u = z / s, v = r / s
        let w = scalar(self.s).inverse()?;
        let u = scalar(z).mul(&w)?;
        let v = scalar(self.r).mul(&w)?;
        let total = G.mul_scalar(u.value())?.add(&public_key.mul_scalar(v.value())?)?;

        let valid = match total {
            CurvePoint::Point { x, .. } => x.value() == self.r,
            CurvePoint::Infinity { .. } => false,
        };
        tracing::debug!(valid, "verified");
        Ok(valid)
    }

    /// DER encoding: `0x30 len (0x02 len r) (0x02 len s)`.
    pub fn der(&self) -> Vec<u8> {
        fn push_integer(out: &mut Vec<u8>, n: U256) {
            let bytes = n.to_be_bytes::<32>();
            let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len() - 1);
            let body = &bytes[start..];

            out.push(INTEGER);
            if body[0] & 0x80 != 0 {
                out.push(body.len() as u8 + 1);
                out.push(0x00);
            } else {
                out.push(body.len() as u8);
            }
            out.extend_from_slice(body);
        }

        let mut body = Vec::with_capacity(70);
        push_integer(&mut body, self.r);
        push_integer(&mut body, self.s);

        let mut der = Vec::with_capacity(body.len() + 2);
        der.push(SEQUENCE);
        der.push(body.len() as u8);
        der.extend_from_slice(&body);
        der
    }

    /// Parses a DER signature, rejecting wrong tags, lengths that disagree
    /// with the input, and trailing bytes.
    pub fn parse_der(der: &[u8]) -> Result<Self> {
        fn read_integer(der: &[u8], pos: &mut usize) -> Result<U256> {
            let header = der
                .get(*pos..*pos + 2)
                .ok_or_else(|| Error::malformed("truncated DER integer header"))?;
            if header[0] != INTEGER {
                return Err(Error::malformed(format!("expected INTEGER tag, got {:#04x}", header[0])));
            }

            let len = header[1] as usize;
            if len == 0 || len > 33 {
                return Err(Error::malformed(format!("bad DER integer length {len}")));
            }

            let start = *pos + 2;
            let bytes = der
                .get(start..start + len)
                .ok_or_else(|| Error::malformed("truncated DER integer"))?;
            *pos = start + len;

            U256::try_from_be_slice(bytes)
                .ok_or_else(|| Error::malformed("DER integer does not fit in 256 bits"))
        }

        if der.len() < 2 {
            return Err(Error::malformed("DER signature too short"));
        }
        if der[0] != SEQUENCE {
            return Err(Error::malformed(format!("expected SEQUENCE tag, got {:#04x}", der[0])));
        }
        if der[1] as usize != der.len() - 2 {
            return Err(Error::malformed(format!(
                "DER length byte says {} but {} bytes follow",
                der[1],
                der.len() - 2
            )));
        }

        let mut pos = 2;
        let r = read_integer(der, &mut pos)?;
        let s = read_integer(der, &mut pos)?;
        if pos != der.len() {
            return Err(Error::malformed("trailing bytes after DER signature"));
        }

        Ok(Self::new(r, s))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Signature({}, {})",
            hex::encode(self.r.to_be_bytes::<32>()),
            hex::encode(self.s.to_be_bytes::<32>())
        )
    }
}
