//! Elliptic-curve group over a prime field
//!
//! Implements the chord-tangent group law on Short Weierstrass curves
//! y² = x³ + ax + b over F_q:
//! - For distinct points P, Q: the line through P and Q meets the curve at
//!   -R, so P + Q = R
//! - For P = Q: the tangent line at P meets the curve at -R, so 2P = R
//! - The point at infinity O is the identity element

use std::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::error::{Error, Result};
use crate::field::{mod_add, mod_mul, mod_sub, modular_inverse, modular_sqrt};

/// A point on an elliptic curve
///
/// Either the point at infinity (the group identity, not a coordinate pair)
/// or an affine pair (x, y) satisfying the curve equation. Points are value
/// types; operations return new points and never mutate their inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Point {
    /// The point at infinity (identity element)
    Infinity,
    /// A point with affine coordinates (x, y)
    Affine { x: BigUint, y: BigUint },
}

impl Point {
    /// Check if this is the point at infinity
    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    /// Get the x-coordinate if this is an affine point
    pub fn x(&self) -> Option<&BigUint> {
        match self {
            Point::Infinity => None,
            Point::Affine { x, .. } => Some(x),
        }
    }

    /// Get the y-coordinate if this is an affine point
    pub fn y(&self) -> Option<&BigUint> {
        match self {
            Point::Infinity => None,
            Point::Affine { y, .. } => Some(y),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Infinity => write!(f, "O (point at infinity)"),
            Point::Affine { x, y } => write!(f, "(0x{:x}, 0x{:x})", x, y),
        }
    }
}

/// An elliptic curve in Short Weierstrass form: y² = x³ + ax + b over F_q
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Curve {
    a: BigUint,
    b: BigUint,
    q: BigUint,
}

impl Curve {
    /// Create a curve from its parameters (a, b, q).
    ///
    /// Checks 0 < a < q, 0 < b < q, q > 2 and that the curve is
    /// non-singular (4a³ + 27b² ≢ 0 mod q). A violation is a configuration
    /// error, reported as [`Error::Configuration`].
    pub fn new(a: BigUint, b: BigUint, q: BigUint) -> Result<Self> {
        if q <= BigUint::from(2u32) {
            return Err(Error::Configuration(
                "modulus must be a prime greater than 2".into(),
            ));
        }
        if a.is_zero() || a >= q {
            return Err(Error::Configuration(
                "coefficient a must satisfy 0 < a < q".into(),
            ));
        }
        if b.is_zero() || b >= q {
            return Err(Error::Configuration(
                "coefficient b must satisfy 0 < b < q".into(),
            ));
        }

        let a_cubed = (&a * &a * &a) % &q;
        let b_squared = (&b * &b) % &q;
        let discriminant =
            (BigUint::from(4u32) * a_cubed + BigUint::from(27u32) * b_squared) % &q;
        if discriminant.is_zero() {
            return Err(Error::Configuration(
                "curve is singular (4a^3 + 27b^2 = 0 mod q)".into(),
            ));
        }

        Ok(Self { a, b, q })
    }

    pub fn a(&self) -> &BigUint {
        &self.a
    }

    pub fn b(&self) -> &BigUint {
        &self.b
    }

    /// The prime modulus q of the underlying field
    pub fn modulus(&self) -> &BigUint {
        &self.q
    }

    /// Return the identity element (the point at infinity)
    pub fn identity(&self) -> Point {
        Point::Infinity
    }

    /// x³ + ax + b mod q
    fn equation_rhs(&self, x: &BigUint) -> BigUint {
        (x * x * x + &self.a * x + &self.b) % &self.q
    }

    /// Check whether a point satisfies the curve equation.
    ///
    /// The identity is on every curve; an affine point is on the curve iff
    /// y² ≡ x³ + ax + b (mod q).
    pub fn is_on_curve(&self, point: &Point) -> bool {
        match point {
            Point::Infinity => true,
            Point::Affine { x, y } => {
                if x >= &self.q || y >= &self.q {
                    return false;
                }
                (y * y) % &self.q == self.equation_rhs(x)
            }
        }
    }

    /// Find the two points (P, -P) sharing the abscissa x.
    ///
    /// Fails with [`Error::NotOnCurve`] when x³ + ax + b is a quadratic
    /// non-residue, i.e. no point with that x-coordinate exists.
    pub fn points_at(&self, x: &BigUint) -> Result<(Point, Point)> {
        let x = x % &self.q;
        let y_squared = self.equation_rhs(&x);
        let (y, y_neg) = modular_sqrt(&y_squared, &self.q).map_err(|e| match e {
            Error::NotAResidue => Error::NotOnCurve,
            other => other,
        })?;
        Ok((
            Point::Affine { x: x.clone(), y },
            Point::Affine { x, y: y_neg },
        ))
    }

    /// Negate a point: O ↦ O, (x, y) ↦ (x, -y mod q)
    pub fn negate(&self, p: &Point) -> Point {
        match p {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => Point::Affine {
                x: x.clone(),
                y: mod_sub(&BigUint::zero(), y, &self.q),
            },
        }
    }

    /// Add two points using the chord-tangent law.
    ///
    /// Case order:
    /// 1. O is neutral: O + P = P, P + O = P
    /// 2. Mutual inverses (same x, different y or y = 0): result is O
    /// 3. Doubling: λ = (3x₁² + a) / (2y₁)
    /// 4. Chord: λ = (y₂ - y₁) / (x₂ - x₁)
    /// 5. x₃ = λ² - x₁ - x₂, y₃ = λ(x₁ - x₃) - y₁
    ///
    /// The division steps surface [`Error::NoInverse`] if the denominator is
    /// not invertible mod q; for valid points on a prime-modulus curve this
    /// cannot happen, but it is checked rather than assumed.
    pub fn add(&self, p1: &Point, p2: &Point) -> Result<Point> {
        let q = &self.q;
        match (p1, p2) {
            (Point::Infinity, _) => Ok(p2.clone()),
            (_, Point::Infinity) => Ok(p1.clone()),
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => {
                if x1 == x2 && (y1 != y2 || y1.is_zero()) {
                    // P + (-P) = O, covering doubling of a 2-torsion point
                    return Ok(Point::Infinity);
                }

                let lambda = if x1 == x2 {
                    let numerator =
                        mod_add(&(BigUint::from(3u32) * x1 * x1), &self.a, q);
                    let denominator = (BigUint::from(2u32) * y1) % q;
                    mod_mul(&numerator, &modular_inverse(&denominator, q)?, q)
                } else {
                    let numerator = mod_sub(y2, y1, q);
                    let denominator = mod_sub(x2, x1, q);
                    mod_mul(&numerator, &modular_inverse(&denominator, q)?, q)
                };

                let x3 = mod_sub(&mod_sub(&mod_mul(&lambda, &lambda, q), x1, q), x2, q);
                let y3 = mod_sub(&mod_mul(&lambda, &mod_sub(x1, &x3, q), q), y1, q);
                Ok(Point::Affine { x: x3, y: y3 })
            }
        }
    }

    /// Double a point: 2P = P + P
    pub fn double(&self, p: &Point) -> Result<Point> {
        self.add(p, p)
    }

    /// Scalar multiplication k·P using the double-and-add algorithm.
    ///
    /// Scans the scalar's bits from least to most significant: an
    /// accumulator starts at O and a doubling value starts at P; each bit
    /// conditionally adds the doubling value into the accumulator, then the
    /// doubling value doubles. O(log k) group operations, versus the O(k)
    /// repeated addition it replaces.
    ///
    /// `scalar_mul(p, 0) == O` for every point, including O itself.
    pub fn scalar_mul(&self, p: &Point, k: &BigUint) -> Result<Point> {
        let mut accumulator = Point::Infinity;
        let mut addend = p.clone();
        let mut k = k.clone();

        while !k.is_zero() {
            if k.bit(0) {
                accumulator = self.add(&accumulator, &addend)?;
            }
            addend = self.add(&addend, &addend)?;
            k >>= 1u32;
        }

        Ok(accumulator)
    }

    /// Order of a point: the smallest n ≥ 1 with n·g = O.
    ///
    /// Linear search by repeated addition, bounded by q. This is an O(q)
    /// operation, a one-time setup or verification utility for toy curves,
    /// never a production-path API; for real parameters the order is
    /// supplied as configuration. Fails with [`Error::OrderNotFound`] if the
    /// bound is exhausted, and [`Error::InvalidPoint`] if g is not a valid
    /// non-identity point.
    pub fn order(&self, g: &Point) -> Result<BigUint> {
        if g.is_infinity() || !self.is_on_curve(g) {
            return Err(Error::InvalidPoint);
        }

        let mut running = g.clone();
        let mut n = BigUint::one();
        while n <= self.q {
            if running.is_infinity() {
                return Ok(n);
            }
            running = self.add(&running, g)?;
            n += 1u32;
        }
        Err(Error::OrderNotFound)
    }
}
