//! Reference curve parameters
//!
//! The NIST P-256 constants used by the demonstration driver and the
//! integration tests: curve coefficients, field prime, generator and group
//! order. These are opaque configuration handed to the core, not data the
//! core validates beyond the construction-time checks.

use num_bigint::BigUint;
use num_traits::Num;
use once_cell::sync::Lazy;

use crate::elliptic_curve::{Curve, Point};

const P256_A: &str = "ffffffff00000001000000000000000000000000fffffffffffffffffffffffc";
const P256_B: &str = "5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b";
const P256_P: &str = "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff";
const P256_GX: &str = "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296";
const P256_GY: &str = "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5";
const P256_N: &str = "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551";

/// A curve together with its generator and group order.
#[derive(Clone, Debug)]
pub struct ReferenceParams {
    pub curve: Curve,
    pub generator: Point,
    pub order: BigUint,
}

fn hex(literal: &str) -> BigUint {
    BigUint::from_str_radix(literal, 16).expect("parameter literal is valid hex")
}

/// The P-256 reference parameters, parsed once on first use.
pub static P256: Lazy<ReferenceParams> = Lazy::new(|| {
    let curve = Curve::new(hex(P256_A), hex(P256_B), hex(P256_P))
        .expect("reference curve parameters are well formed");
    let generator = Point::Affine {
        x: hex(P256_GX),
        y: hex(P256_GY),
    };
    ReferenceParams {
        curve,
        generator,
        order: hex(P256_N),
    }
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_generator_is_on_curve() {
        assert!(P256.curve.is_on_curve(&P256.generator));
    }

    #[test]
    fn reference_order_fits_the_field() {
        assert!(&P256.order <= P256.curve.modulus());
    }
}
