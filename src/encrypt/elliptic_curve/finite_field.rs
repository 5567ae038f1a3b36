use std::{cmp::Ordering, fmt::{self, Debug, Display}};

use ruint::aliases::U256;

use crate::{Error, Result};

/// Coordinate arithmetic the group law is written against.
///
/// Every binary operation is fallible: finite field elements refuse to mix
/// primes, and division refuses a zero divisor. `times` multiplies by a small
/// plain integer (the `2` and `3` of the doubling formula) and never fails.
pub trait Field: Clone + Copy + PartialEq + Debug + Display + Sized {
    /// The additive identity of the field `self` lives in.
    fn zero(&self) -> Self;
    fn add(&self, rhs: &Self) -> Result<Self>;
    fn sub(&self, rhs: &Self) -> Result<Self>;
    fn mul(&self, rhs: &Self) -> Result<Self>;
    fn div(&self, rhs: &Self) -> Result<Self>;
    fn neg(&self) -> Self;
    fn times(&self, k: u64) -> Self;
    fn is_zero(&self) -> bool;

    /// Equality used by the curve-equation check. Finite fields compare
    /// exactly and ignore `tolerance`.
    fn approx_eq(&self, rhs: &Self, tolerance: f64) -> Result<bool>;

    fn square(&self) -> Result<Self> {
        self.mul(self)
    }
}

/// An integer in `[0, prime)` with arithmetic modulo `prime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldElement {
    num: U256,
    prime: U256,
}

impl FieldElement {
    pub fn new(num: U256, prime: U256) -> Result<Self> {
        if prime < U256::from(2) || num >= prime {
            return Err(Error::OutOfRange { num, prime });
        }

        Ok(Self { num, prime })
    }

    /// Caller guarantees `num < prime`.
    pub(crate) const fn from_parts(num: U256, prime: U256) -> Self {
        Self { num, prime }
    }

    pub fn value(&self) -> U256 {
        self.num
    }

    pub fn prime(&self) -> U256 {
        self.prime
    }

    pub fn is_even(&self) -> bool {
        !self.num.bit(0)
    }

    fn check_same_field(&self, rhs: &Self) -> Result<()> {
        if self.prime != rhs.prime {
            return Err(Error::FieldMismatch { left: self.prime, right: rhs.prime });
        }
        Ok(())
    }

    /// Square-and-multiply over the bits of `exponent`.
    pub fn pow(&self, exponent: U256) -> Self {
        let mut base = self.num;
        let mut e = exponent;
        let mut res = U256::from(1) % self.prime;

        while e > U256::ZERO {
            if e % U256::from(2) == U256::from(1) {
                res = res.mul_mod(base, self.prime);
            }

            base = base.mul_mod(base, self.prime);
            e /= U256::from(2);
        }

        Self { num: res, prime: self.prime }
    }

    /// Negative exponents are brought into `[0, p - 1)` first, since the
    /// multiplicative group has order `p - 1`.
    pub fn pow_signed(&self, exponent: i128) -> Self {
        if exponent >= 0 {
            return self.pow(U256::from(exponent.unsigned_abs()));
        }

        let order = self.prime - U256::from(1);
        let magnitude = U256::from(exponent.unsigned_abs()) % order;
        let e = if magnitude == U256::ZERO { U256::ZERO } else { order - magnitude };
        self.pow(e)
    }

    /// Multiplies by a plain integer that is not itself a member of the field.
    pub fn scale(&self, k: U256) -> Self {
        Self { num: self.num.mul_mod(k, self.prime), prime: self.prime }
    }

    pub fn inverse(&self) -> Result<Self> {
        if self.num == U256::ZERO {
            return Err(Error::DivisionByZero);
        }
        Ok(self.pow(self.prime - U256::from(2)))
    }

    pub fn compare(&self, rhs: &Self) -> Result<Ordering> {
        self.check_same_field(rhs)?;
        Ok(self.num.cmp(&rhs.num))
    }

    /// Compares against a plain integer, which must itself be a valid
    /// representative of the field.
    pub fn compare_int(&self, k: U256) -> Result<Ordering> {
        if k >= self.prime {
            return Err(Error::OutOfRange { num: k, prime: self.prime });
        }
        Ok(self.num.cmp(&k))
    }
}

impl Field for FieldElement {
    fn zero(&self) -> Self {
        Self { num: U256::ZERO, prime: self.prime }
    }

    fn add(&self, rhs: &Self) -> Result<Self> {
        self.check_same_field(rhs)?;
        Ok(Self { num: self.num.add_mod(rhs.num, self.prime), prime: self.prime })
    }

    fn sub(&self, rhs: &Self) -> Result<Self> {
        self.check_same_field(rhs)?;
        let num = if self.num >= rhs.num {
            self.num - rhs.num
        } else {
            self.prime - (rhs.num - self.num)
        };
        Ok(Self { num, prime: self.prime })
    }

    fn mul(&self, rhs: &Self) -> Result<Self> {
        self.check_same_field(rhs)?;
        Ok(Self { num: self.num.mul_mod(rhs.num, self.prime), prime: self.prime })
    }

    fn div(&self, rhs: &Self) -> Result<Self> {
        self.check_same_field(rhs)?;
        self.mul(&rhs.inverse()?)
    }

    fn neg(&self) -> Self {
        if self.num == U256::ZERO {
            *self
        } else {
            Self { num: self.prime - self.num, prime: self.prime }
        }
    }

    fn times(&self, k: u64) -> Self {
        self.scale(U256::from(k))
    }

    fn is_zero(&self) -> bool {
        self.num == U256::ZERO
    }

    fn approx_eq(&self, rhs: &Self, _tolerance: f64) -> Result<bool> {
        self.check_same_field(rhs)?;
        Ok(self.num == rhs.num)
    }
}

/// Real-number coordinates, for drawing the group law over `R`.
impl Field for f64 {
    fn zero(&self) -> Self {
        0.0
    }

    fn add(&self, rhs: &Self) -> Result<Self> {
        Ok(self + rhs)
    }

    fn sub(&self, rhs: &Self) -> Result<Self> {
        Ok(self - rhs)
    }

    fn mul(&self, rhs: &Self) -> Result<Self> {
        Ok(self * rhs)
    }

    fn div(&self, rhs: &Self) -> Result<Self> {
        if *rhs == 0.0 {
            return Err(Error::DivisionByZero);
        }
        Ok(self / rhs)
    }

    fn neg(&self) -> Self {
        -self
    }

    fn times(&self, k: u64) -> Self {
        self * k as f64
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn approx_eq(&self, rhs: &Self, tolerance: f64) -> Result<bool> {
        Ok((self - rhs).abs() <= tolerance)
    }
}

impl PartialEq<U256> for FieldElement {
    fn eq(&self, other: &U256) -> bool {
        self.num == *other
    }
}

/// Integers outside `[0, prime)` are incomparable.
impl PartialOrd<U256> for FieldElement {
    fn partial_cmp(&self, other: &U256) -> Option<Ordering> {
        self.compare_int(*other).ok()
    }
}

impl Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prime == crate::encrypt::k256::P {
            let bytes: [u8; 32] = self.num.to_be_bytes();
            write!(f, "{}", hex::encode(bytes))
        } else {
            write!(f, "FieldElement_{}({})", self.prime, self.num)
        }
    }
}
