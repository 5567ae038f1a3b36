use std::sync::LazyLock;

use ruint::aliases::U256;

use super::{Curve, CurvePoint, Field, FieldElement};
use crate::{Error, Result};

/// Field prime `2^256 - 2^32 - 977`.
pub const P: U256 = U256::from_limbs([
    0xFFFFFFFE_FFFFFC2F,
    0xFFFFFFFF_FFFFFFFF,
    0xFFFFFFFF_FFFFFFFF,
    0xFFFFFFFF_FFFFFFFF,
]);

/// Order of the group generated by `G`.
pub const N: U256 = U256::from_limbs([
    0xBFD25E8C_D0364141,
    0xBAAEDCE6_AF48A03B,
    0xFFFFFFFF_FFFFFFFE,
    0xFFFFFFFF_FFFFFFFF,
]);

pub const A: U256 = U256::ZERO;
pub const B: U256 = U256::from_limbs([7, 0, 0, 0]);

const GX: U256 = U256::from_limbs([
    0x59F2815B_16F81798,
    0x029BFCDB_2DCE28D9,
    0x55A06295_CE870B07,
    0x79BE667E_F9DCBBAC,
]);
const GY: U256 = U256::from_limbs([
    0x9C47D08F_FB10D4B8,
    0xFD17B448_A6855419,
    0x5DA4FBFC_0E1108A8,
    0x483ADA77_26A3C465,
]);

/// `y² = x³ + 7` over `F_P`.
pub const CURVE: Curve<FieldElement> = Curve::new(
    FieldElement::from_parts(A, P),
    FieldElement::from_parts(B, P),
);

/// A point on secp256k1.
pub type Secp256k1 = CurvePoint<FieldElement>;

/// The generator, built once per process.
pub static G: LazyLock<Secp256k1> = LazyLock::new(|| CurvePoint::Point {
    x: FieldElement::from_parts(GX, P),
    y: FieldElement::from_parts(GY, P),
    curve: CURVE,
});

/// `(P + 1) / 4`
const SQRT_EXP: U256 = U256::from_limbs([
    0xFFFFFFFF_BFFFFF0C,
    0xFFFFFFFF_FFFFFFFF,
    0xFFFFFFFF_FFFFFFFF,
    0x3FFFFFFF_FFFFFFFF,
]);

/// An element of `F_P`.
pub fn felt(num: U256) -> Result<FieldElement> {
    FieldElement::new(num, P)
}

/// Square root in `F_P` as `e^((P+1)/4)`.
///
/// Only correct because `P ≡ 3 (mod 4)`. For a non-residue the result is
/// not a root at all, so callers must square it back before trusting it.
pub fn sqrt(e: &FieldElement) -> Result<FieldElement> {
    if e.prime() != P {
        return Err(Error::FieldMismatch { left: e.prime(), right: P });
    }
    Ok(e.pow(SQRT_EXP))
}

impl Default for Secp256k1 {
    fn default() -> Self {
        *G
    }
}

impl Secp256k1 {
    pub fn generator() -> Self {
        *G
    }

    pub fn from_coordinates(x: U256, y: U256) -> Result<Self> {
        CurvePoint::new(felt(x)?, felt(y)?, CURVE)
    }

    /// Recovers the point with abscissa `x` whose ordinate has the requested parity.
    pub fn lift_x(x: FieldElement, odd: bool) -> Result<Self> {
        let alpha = x.square()?.mul(&x)?.add(&CURVE.b)?;
        let beta = sqrt(&alpha)?;
        if beta.square()? != alpha {
            return Err(Error::NotOnCurve(format!("no point with x = {x}")));
        }

        let y = if beta.is_even() != odd { beta } else { beta.neg() };
        CurvePoint::new(x, y, CURVE)
    }

    /// `k·self` with `k` first reduced modulo the group order.
    pub fn mul_scalar(&self, k: U256) -> Result<Self> {
        if self.curve() != CURVE {
            return Err(Error::CurveMismatch);
        }
        self.mul(k % N)
    }
}
