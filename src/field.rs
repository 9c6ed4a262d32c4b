//! Modular arithmetic over prime fields
//!
//! The two operations the curve layer cannot get from plain big-integer
//! arithmetic: modular inverse (extended Euclidean algorithm) and modular
//! square root (closed form for p ≡ 3 mod 4, Tonelli–Shanks otherwise).
//! Small reduced add/sub/mul helpers live here too so the group law reads
//! as field arithmetic rather than raw bigint juggling.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// (a + b) mod m
pub fn mod_add(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a + b) % m
}

/// (a - b) mod m, wrapping into [0, m)
pub fn mod_sub(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    ((a % m) + m - (b % m)) % m
}

/// (a * b) mod m
pub fn mod_mul(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a * b) % m
}

/// Computes b such that a·b ≡ 1 (mod m) via the extended Euclidean algorithm.
///
/// Fails with [`Error::NoInverse`] when gcd(a, m) ≠ 1. For a prime modulus
/// and nonzero a this never happens, but the gcd is checked regardless.
pub fn modular_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    let modulus = BigInt::from(m.clone());

    // Invariant: r0 = t0*a + s*m and r1 = t1*a + s'*m for some s, s'.
    let mut r0 = modulus.clone();
    let mut r1 = BigInt::from(a % m);
    let mut t0 = BigInt::zero();
    let mut t1 = BigInt::one();

    while !r1.is_zero() {
        let quotient = &r0 / &r1;
        let r2 = &r0 - &quotient * &r1;
        r0 = r1;
        r1 = r2;
        let t2 = &t0 - &quotient * &t1;
        t0 = t1;
        t1 = t2;
    }

    if !r0.is_one() {
        return Err(Error::NoInverse);
    }

    let inverse = ((t0 % &modulus) + &modulus) % &modulus;
    Ok(inverse.to_biguint().expect("inverse is reduced into [0, m)"))
}

/// Computes both square roots (y, p − y) of n modulo an odd prime p.
///
/// Fails with [`Error::NotAResidue`] when n is a quadratic non-residue.
/// For p ≡ 3 (mod 4) the closed form y = n^((p+1)/4) suffices; for
/// p ≡ 1 (mod 4) the general Tonelli–Shanks algorithm is used. The branch
/// is selected from p mod 4, never assumed.
pub fn modular_sqrt(n: &BigUint, p: &BigUint) -> Result<(BigUint, BigUint)> {
    let n = n % p;
    if n.is_zero() {
        return Ok((BigUint::zero(), BigUint::zero()));
    }

    let one = BigUint::one();
    let two = BigUint::from(2u32);
    if *p == two {
        // F_2: every element is its own square root.
        return Ok((n.clone(), n));
    }

    // Euler's criterion: n^((p-1)/2) must be 1 for a residue.
    let legendre_exp = (p - &one) >> 1u32;
    if n.modpow(&legendre_exp, p) != one {
        return Err(Error::NotAResidue);
    }

    let y = if p % 4u32 == BigUint::from(3u32) {
        n.modpow(&((p + 1u32) >> 2u32), p)
    } else {
        tonelli_shanks(&n, p)
    };
    let other = p - &y;
    Ok((y, other))
}

/// Tonelli–Shanks square root for p ≡ 1 (mod 4).
///
/// The caller has already verified n is a residue, so the loop terminates.
fn tonelli_shanks(n: &BigUint, p: &BigUint) -> BigUint {
    let one = BigUint::one();

    // p - 1 = q * 2^s with q odd
    let mut q = p - &one;
    let mut s = 0u32;
    while !q.bit(0) {
        q >>= 1u32;
        s += 1;
    }

    // Find a quadratic non-residue z by trial: half of F_p* qualifies.
    let legendre_exp = (p - &one) >> 1u32;
    let minus_one = p - &one;
    let mut z = BigUint::from(2u32);
    while z.modpow(&legendre_exp, p) != minus_one {
        z += 1u32;
    }

    let mut m = s;
    let mut c = z.modpow(&q, p);
    let mut t = n.modpow(&q, p);
    let mut r = n.modpow(&((&q + &one) >> 1u32), p);

    while t != one {
        // Least i in (0, m) with t^(2^i) == 1.
        let mut i = 0u32;
        let mut probe = t.clone();
        while probe != one {
            probe = (&probe * &probe) % p;
            i += 1;
        }

        let exponent = BigUint::one() << ((m - i - 1) as usize);
        let b = c.modpow(&exponent, p);
        r = (&r * &b) % p;
        c = (&b * &b) % p;
        t = (&t * &c) % p;
        m = i;
    }

    r
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn inverse_times_value_is_one() {
        let m = big(17);
        for a in 1..17u64 {
            let inv = modular_inverse(&big(a), &m).unwrap();
            assert_eq!((big(a) * inv) % &m, BigUint::one(), "a = {}", a);
        }
    }

    #[test]
    fn inverse_of_large_value_reduces_first() {
        let m = big(17);
        let inv = modular_inverse(&big(3 + 17 * 5), &m).unwrap();
        assert_eq!((big(3) * inv) % &m, BigUint::one());
    }

    #[test]
    fn inverse_fails_when_gcd_not_one() {
        assert_eq!(modular_inverse(&big(4), &big(8)), Err(Error::NoInverse));
        assert_eq!(modular_inverse(&big(0), &big(17)), Err(Error::NoInverse));
    }

    #[test]
    fn sqrt_mod_23_uses_closed_form() {
        // 23 ≡ 3 (mod 4); 9 has roots 3 and 20
        let (y, my) = modular_sqrt(&big(9), &big(23)).unwrap();
        assert_eq!((&y * &y) % big(23), big(9));
        assert_eq!(my, big(23) - &y);
        assert!(y == big(3) || y == big(20));
    }

    #[test]
    fn sqrt_mod_13_uses_tonelli_shanks() {
        // 13 ≡ 1 (mod 4); 3 has roots 4 and 9
        let (y, my) = modular_sqrt(&big(3), &big(13)).unwrap();
        assert_eq!((&y * &y) % big(13), big(3));
        assert_eq!((&my * &my) % big(13), big(3));
        assert!(y == big(4) || y == big(9));
    }

    #[test]
    fn sqrt_of_non_residue_fails() {
        assert_eq!(modular_sqrt(&big(5), &big(23)), Err(Error::NotAResidue));
        assert_eq!(modular_sqrt(&big(5), &big(13)), Err(Error::NotAResidue));
    }

    #[test]
    fn sqrt_of_zero_is_zero() {
        let (y, my) = modular_sqrt(&big(0), &big(23)).unwrap();
        assert!(y.is_zero() && my.is_zero());
    }

    #[test]
    fn sqrt_roundtrip_both_branches() {
        for p in [big(19), big(23), big(13), big(29)] {
            for v in 1..12u64 {
                let square = (big(v) * big(v)) % &p;
                let (y, my) = modular_sqrt(&square, &p).unwrap();
                assert_eq!((&y * &y) % &p, square);
                assert_eq!((&my * &my) % &p, square);
            }
        }
    }

    #[test]
    fn mod_add_reduces() {
        assert_eq!(mod_add(&big(9), &big(12), &big(17)), big(4));
        assert_eq!(mod_add(&big(16), &big(1), &big(17)), big(0));
    }

    #[test]
    fn mod_sub_wraps() {
        assert_eq!(mod_sub(&big(3), &big(5), &big(17)), big(15));
        assert_eq!(mod_sub(&big(5), &big(3), &big(17)), big(2));
    }
}
