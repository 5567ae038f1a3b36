mod finite_field;

use std::fmt::{self, Display};

use ruint::aliases::U256;

pub use finite_field::{Field, FieldElement};

use crate::{Error, Result};

/// Tolerance used by [`CurvePoint::new`] when coordinates are real numbers.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// Coefficients of the Weierstrass curve `y² = x³ + Ax + B`.
///
/// Every point carries the curve it lives on, so adding points from two
/// different curves is caught at runtime instead of producing garbage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Curve<F: Field> {
    pub a: F,
    pub b: F,
}

impl<F: Field> Curve<F> {
    pub const fn new(a: F, b: F) -> Self {
        Self { a, b }
    }

    /// `x³ + ax + b`
    fn rhs(&self, x: &F) -> Result<F> {
        x.square()?.mul(x)?.add(&self.a.mul(x)?)?.add(&self.b)
    }

    pub fn contains(&self, x: &F, y: &F, tolerance: f64) -> Result<bool> {
        y.square()?.approx_eq(&self.rhs(x)?, tolerance)
    }

    pub fn infinity(&self) -> CurvePoint<F> {
        CurvePoint::Infinity { curve: *self }
    }
}

/// A point of the group formed by a curve and its point at infinity.
///
/// # Supported operations
///
/// * **addition**: [`CurvePoint::add`], chord-and-tangent law
/// * **scalar multiplication**: [`CurvePoint::mul`], double-and-add
/// * **identity**: `CurvePoint::Infinity`
///
/// ```rust
/// # use bitcoin_secp::encrypt::{Curve, CurvePoint};
/// let curve = Curve::new(5.0, 7.0);
/// let p1 = CurvePoint::new(2.0, 5.0, curve).unwrap();
/// let p2 = CurvePoint::new(-1.0, -1.0, curve).unwrap();
/// assert_eq!(p1.add(&p2).unwrap(), CurvePoint::new(3.0, -7.0, curve).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurvePoint<F: Field> {
    Infinity {
        curve: Curve<F>,
    },
    Point {
        x: F,
        y: F,
        curve: Curve<F>,
    },
}

impl<F: Field> CurvePoint<F> {
    pub fn new(x: F, y: F, curve: Curve<F>) -> Result<Self> {
        Self::with_tolerance(x, y, curve, DEFAULT_TOLERANCE)
    }

    /// Like [`CurvePoint::new`], with an explicit tolerance for the curve
    /// equation. Finite field coordinates are always checked exactly.
    pub fn with_tolerance(x: F, y: F, curve: Curve<F>, tolerance: f64) -> Result<Self> {
        if !curve.contains(&x, &y, tolerance)? {
            return Err(Error::NotOnCurve(format!("({x}, {y})")));
        }
        Ok(Self::Point { x, y, curve })
    }

    pub fn curve(&self) -> Curve<F> {
        match self {
            Self::Infinity { curve } | Self::Point { curve, .. } => *curve,
        }
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self, Self::Infinity { .. })
    }

    pub fn x(&self) -> Option<F> {
        match self {
            Self::Point { x, .. } => Some(*x),
            Self::Infinity { .. } => None,
        }
    }

    pub fn y(&self) -> Option<F> {
        match self {
            Self::Point { y, .. } => Some(*y),
            Self::Infinity { .. } => None,
        }
    }

    /// Mirror image across the x axis.
    pub fn neg(&self) -> Self {
        match *self {
            Self::Point { x, y, curve } => Self::Point { x, y: y.neg(), curve },
            inf => inf,
        }
    }

    pub fn add(&self, rhs: &Self) -> Result<Self> {
        if self.curve() != rhs.curve() {
            return Err(Error::CurveMismatch);
        }

        match (*self, *rhs) {
            (Self::Infinity { .. }, other) => Ok(other),
            (this, Self::Infinity { .. }) => Ok(this),

            (Self::Point { x: x1, y: y1, curve }, Self::Point { x: x2, y: y2, .. }) => {
                // P + (-P), or a vertical tangent
                if x1 == x2 && (y1 != y2 || y1.is_zero()) {
                    return Ok(Self::Infinity { curve });
                }

                let (s, x3) = if x1 != x2 {
                    let s = y2.sub(&y1)?.div(&x2.sub(&x1)?)?;
                    let x3 = s.square()?.sub(&x1)?.sub(&x2)?;
                    (s, x3)
                } else {
                    let s = x1.square()?.times(3).add(&curve.a)?.div(&y1.times(2))?;
                    let x3 = s.square()?.sub(&x1.times(2))?;
                    (s, x3)
                };

                let y3 = s.mul(&x1.sub(&x3)?)?.sub(&y1)?;
                Ok(Self::Point { x: x3, y: y3, curve })
            }
        }
    }

    /// `k·P` by double-and-add, least significant bit first.
    pub fn mul(&self, k: U256) -> Result<Self> {
        let mut e = k;
        let mut base = *self;
        let mut acc = self.curve().infinity();

        while e > U256::ZERO {
            if e % U256::from(2) == U256::from(1) {
                acc = acc.add(&base)?;
            }

            base = base.add(&base)?;
            e /= U256::from(2);
        }

        Ok(acc)
    }

    /// Signed multiplier; only non-negative values are meaningful here.
    pub fn mul_int(&self, k: i128) -> Result<Self> {
        if k < 0 {
            return Err(Error::InvalidScalar(format!("negative multiplier {k}")));
        }
        self.mul(U256::from(k.unsigned_abs()))
    }
}

impl<F: Field> Display for CurvePoint<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infinity { .. } => write!(f, "Point(infinity)"),
            Self::Point { x, y, .. } => write!(f, "Point({x}, {y})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const P223: u64 = 223;

    fn fe(num: u64) -> FieldElement {
        FieldElement::new(U256::from(num), U256::from(P223)).unwrap()
    }

    // y^2 = x^3 + 7 over F_223
    fn curve223() -> Curve<FieldElement> {
        Curve::new(fe(0), fe(7))
    }

    fn point223(x: u64, y: u64) -> CurvePoint<FieldElement> {
        CurvePoint::new(fe(x), fe(y), curve223()).unwrap()
    }

    fn real() -> Curve<f64> {
        Curve::new(5.0, 7.0)
    }

    #[test]
    fn test_real_point() {
        let p1 = CurvePoint::new(2.0, 5.0, real()).unwrap();
        let p2 = CurvePoint::new(-1.0, -1.0, real()).unwrap();
        let p3 = CurvePoint::new(3.0, -7.0, real()).unwrap();
        let p4 = CurvePoint::new(18.0, 77.0, real()).unwrap();

        assert_eq!(p1, p1);
        assert_ne!(p1, p2);
        assert_eq!(p1.add(&p2).unwrap(), p3);
        assert_eq!(p2.add(&p2).unwrap(), p4);
    }

    #[test]
    fn test_real_point_not_on_curve() {
        let err = CurvePoint::new(-1.0, -2.0, real()).unwrap_err();
        assert!(matches!(err, Error::NotOnCurve(_)), "(-1, -2) is off the curve, got {err:?}");

        // accepted once the tolerance is wide enough
        assert!(CurvePoint::with_tolerance(-1.0, -1.0 + 1e-9, real(), 1e-6).is_ok());
    }

    #[test]
    fn test_doubling_agrees_with_chord() {
        // a neighbour of P on the same branch turns the chord into (almost) the tangent
        let p = CurvePoint::new(-1.0, -1.0, real()).unwrap();
        let h = 1e-7;
        let x = -1.0 + h;
        let y = -((x * x * x) + 5.0 * x + 7.0f64).sqrt();
        let q = CurvePoint::with_tolerance(x, y, real(), 1e-9).unwrap();

        let doubled = p.add(&p).unwrap();
        let chord = p.add(&q).unwrap();
        let (dx, dy) = (doubled.x().unwrap(), doubled.y().unwrap());
        let (cx, cy) = (chord.x().unwrap(), chord.y().unwrap());
        assert!((dx - cx).abs() < 1e-3, "x: tangent {dx} vs chord {cx}");
        assert!((dy - cy).abs() < 1e-3, "y: tangent {dy} vs chord {cy}");
    }

    #[test]
    fn test_on_curve_finite_field() {
        for (x, y) in [(192, 105), (17, 56), (1, 193)] {
            assert!(CurvePoint::new(fe(x), fe(y), curve223()).is_ok(), "({x}, {y}) should be on the curve");
        }
        for (x, y) in [(200, 119), (42, 99)] {
            let res = CurvePoint::new(fe(x), fe(y), curve223());
            assert!(matches!(res, Err(Error::NotOnCurve(_))), "({x}, {y}) should be off the curve");
        }
    }

    #[test]
    fn test_not_on_curve_message_shows_values() {
        let err = CurvePoint::new(fe(200), fe(119), curve223()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "point is not on the curve y^2 = x^3 + a*x + b: (FieldElement_223(200), FieldElement_223(119))"
        );
    }

    #[test]
    fn test_add_with_infinity() {
        let p = point223(192, 105);
        let inf = curve223().infinity();

        assert_eq!(p.add(&inf).unwrap(), p);
        assert_eq!(inf.add(&p).unwrap(), p);
        assert_eq!(inf.add(&inf).unwrap(), inf);
    }

    #[test]
    fn test_add_inverse() {
        let p = point223(47, 71);
        let neg = p.neg();
        assert_eq!(neg, point223(47, 223 - 71));
        assert!(p.add(&neg).unwrap().is_infinity());
        assert!(neg.add(&p).unwrap().is_infinity());
    }

    #[test]
    fn test_add_finite_field() {
        let cases = [
            ((192, 105), (17, 56), (170, 142)),
            ((170, 142), (60, 139), (220, 181)),
            ((47, 71), (17, 56), (215, 68)),
            ((143, 98), (76, 66), (47, 71)),
        ];

        for ((x1, y1), (x2, y2), (x3, y3)) in cases {
            let sum = point223(x1, y1).add(&point223(x2, y2)).unwrap();
            assert_eq!(sum, point223(x3, y3), "({x1},{y1}) + ({x2},{y2})");
        }
    }

    #[test]
    fn test_vertical_tangent() {
        // y^2 = x^3 - x over F_7; (1, 0) has a vertical tangent
        let f7 = |n: u64| FieldElement::new(U256::from(n), U256::from(7)).unwrap();
        let curve = Curve::new(f7(6), f7(0));
        let p = CurvePoint::new(f7(1), f7(0), curve).unwrap();
        assert!(p.add(&p).unwrap().is_infinity());
    }

    #[test]
    fn test_scalar_mul() {
        let cases = [
            (2, (192, 105), (49, 71)),
            (2, (143, 98), (64, 168)),
            (2, (47, 71), (36, 111)),
            (4, (47, 71), (194, 51)),
            (8, (47, 71), (116, 55)),
        ];

        for (k, (x, y), (x2, y2)) in cases {
            let product = point223(x, y).mul(U256::from(k)).unwrap();
            assert_eq!(product, point223(x2, y2), "{k} * ({x},{y})");
        }

        // (47, 71) generates a group of order 21
        let g = point223(47, 71);
        assert!(g.mul(U256::from(21)).unwrap().is_infinity());
        assert!(g.mul(U256::ZERO).unwrap().is_infinity());
    }

    #[test]
    fn test_mul_int() {
        let g = point223(47, 71);
        assert_eq!(g.mul_int(8).unwrap(), point223(116, 55));
        assert!(matches!(g.mul_int(-1), Err(Error::InvalidScalar(_))));
    }

    #[test]
    fn test_curve_mismatch() {
        let other = Curve::new(fe(5), fe(7));
        let p = point223(47, 71);
        let inf = other.infinity();
        assert!(matches!(p.add(&inf), Err(Error::CurveMismatch)));

        let real_a = CurvePoint::new(2.0, 5.0, real()).unwrap();
        let real_b = Curve::new(0.0, 7.0).infinity();
        assert!(matches!(real_a.add(&real_b), Err(Error::CurveMismatch)));
    }

    #[test]
    fn test_curve_over_other_prime_is_a_mismatch() {
        let f7 = |n: u64| FieldElement::new(U256::from(n), U256::from(7)).unwrap();
        let p = point223(47, 71);
        let q = Curve::new(f7(0), f7(0)).infinity();
        assert!(matches!(p.add(&q), Err(Error::CurveMismatch)));
    }

    proptest! {
        #[test]
        fn scalar_mul_distributes(k1 in 0u64..64, k2 in 0u64..64) {
            let g = point223(47, 71);
            let lhs = g.mul(U256::from(k1 + k2)).unwrap();
            let rhs = g.mul(U256::from(k1)).unwrap().add(&g.mul(U256::from(k2)).unwrap()).unwrap();
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn add_is_commutative(k1 in 1u64..21, k2 in 1u64..21) {
            let g = point223(47, 71);
            let (a, b) = (g.mul(U256::from(k1)).unwrap(), g.mul(U256::from(k2)).unwrap());
            prop_assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
        }
    }
}
