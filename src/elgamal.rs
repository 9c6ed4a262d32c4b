//! ElGamal public-key encryption over an elliptic-curve group
//!
//! Public-key encryption obtained by replacing (mulmod, powmod) with the
//! curve's (add, scalar_mul), hardened with two side-channel
//! countermeasures:
//!
//! - **Scalar randomization**: every secret scalar k is replaced by
//!   k + r·n before a multiplication, where n is the group order and r is a
//!   fresh random value from a 20-bit range. Because [n]G = O the result is
//!   unchanged, but the scalar's bit pattern differs on every invocation,
//!   denying an observer a stable trace to average.
//! - **Point blinding** (decryption): the attacker-influenced C1 is masked
//!   with a random point R before the secret multiplication, and the mask's
//!   contribution S = [sk]R is removed afterwards. The per-call trace then
//!   depends on the unpredictable R rather than directly on C1.
//!
//! A [`BlindingPair`] is produced by [`ElGamal::refresh_blinding_pair`] and
//! consumed by value in [`ElGamal::decrypt_blinded`], so a pair cannot be
//! reused across decryptions: reuse would reintroduce exactly the averaging
//! attack the blinding exists to prevent.
//!
//! All randomness is drawn from a caller-supplied [`rand::Rng`]; concurrent
//! callers each bring their own source, so no two calls can accidentally
//! share a random scalar or blinding pair.

use std::fmt;

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::Rng;

use crate::elliptic_curve::{Curve, Point};
use crate::error::{Error, Result};

/// Width of the scalar-randomization multiplier r in bits.
///
/// r is drawn uniformly from [1, 2^20], so the randomized scalar differs
/// from the raw one on every call.
const RANDOMIZER_BITS: usize = 20;

/// A private/public key pair.
///
/// The private key is a scalar in [1, n-1]; the public key is
/// [private_key]G.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub private_key: BigUint,
    pub public_key: Point,
}

// The private key must never end up in logs; Debug prints a placeholder.
impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}

/// An ElGamal ciphertext: the pair of points (C1, C2).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    pub c1: Point,
    pub c2: Point,
}

/// A transient blinding pair (R, S) with S = [sk]R.
///
/// Only [`ElGamal::refresh_blinding_pair`] can create one, and
/// [`ElGamal::decrypt_blinded`] consumes it by value. The type is
/// deliberately not `Clone`: one pair, one decryption.
#[derive(Debug)]
pub struct BlindingPair {
    r: Point,
    s: Point,
}

impl BlindingPair {
    /// The masking point R added to C1 before the secret multiplication
    pub fn r(&self) -> &Point {
        &self.r
    }

    /// The unmasking point S = [sk]R subtracted afterwards
    pub fn s(&self) -> &Point {
        &self.s
    }
}

/// ElGamal cipher over an elliptic-curve group.
///
/// Holds the curve, the generator point g and the group order n, all
/// immutable after construction. Expressed purely in terms of the curve's
/// group operations; field elements are never touched here.
#[derive(Clone, Debug)]
pub struct ElGamal {
    curve: Curve,
    generator: Point,
    order: BigUint,
}

impl ElGamal {
    /// Create a cipher from a curve, a generator point and the group order.
    ///
    /// Fails with [`Error::InvalidGenerator`] if g is not a valid affine
    /// curve point, and [`Error::Configuration`] if the order is zero.
    pub fn new(curve: Curve, generator: Point, order: BigUint) -> Result<Self> {
        if generator.is_infinity() || !curve.is_on_curve(&generator) {
            return Err(Error::InvalidGenerator);
        }
        if order.is_zero() {
            return Err(Error::Configuration("group order must be positive".into()));
        }
        Ok(Self {
            curve,
            generator,
            order,
        })
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn generator(&self) -> &Point {
        &self.generator
    }

    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Replace a secret scalar k with k + r·n, r uniform in [1, 2^20].
    ///
    /// [n]G = O makes the substitution invisible in the result while
    /// changing the bit pattern the double-and-add scan walks over.
    fn randomize_scalar<R: Rng>(&self, scalar: &BigUint, rng: &mut R) -> BigUint {
        let low = BigUint::one();
        let high = (BigUint::one() << RANDOMIZER_BITS) + 1u32;
        let r = rng.gen_biguint_range(&low, &high);
        scalar + r * &self.order
    }

    /// Derive the public key [sk]g, with scalar randomization applied.
    pub fn generate_public_key<R: Rng>(&self, secret_key: &BigUint, rng: &mut R) -> Result<Point> {
        let masked = self.randomize_scalar(secret_key, rng);
        self.curve.scalar_mul(&self.generator, &masked)
    }

    /// Draw a fresh private key uniformly from [1, n-1] and derive its
    /// public key.
    pub fn generate_key_pair<R: Rng>(&self, rng: &mut R) -> Result<KeyPair> {
        let private_key = rng.gen_biguint_range(&BigUint::one(), &self.order);
        let public_key = self.generate_public_key(&private_key, rng)?;
        Ok(KeyPair {
            private_key,
            public_key,
        })
    }

    /// Encrypt a plaintext point: C1 = [r]g, C2 = plaintext + [r]pk.
    ///
    /// Both argument points must pass the curve-membership check
    /// ([`Error::InvalidPoint`] otherwise); both scalar multiplications use
    /// the randomized nonce.
    pub fn encrypt<R: Rng>(
        &self,
        plaintext: &Point,
        public_key: &Point,
        nonce: &BigUint,
        rng: &mut R,
    ) -> Result<Ciphertext> {
        if !self.curve.is_on_curve(plaintext) || !self.curve.is_on_curve(public_key) {
            return Err(Error::InvalidPoint);
        }

        let c1 = self
            .curve
            .scalar_mul(&self.generator, &self.randomize_scalar(nonce, rng))?;
        let shared = self
            .curve
            .scalar_mul(public_key, &self.randomize_scalar(nonce, rng))?;
        let c2 = self.curve.add(plaintext, &shared)?;

        Ok(Ciphertext { c1, c2 })
    }

    /// Decrypt a ciphertext: plaintext = C2 + (-[sk]C1).
    ///
    /// C1 and C2 are validated before any arithmetic; the secret
    /// multiplication uses the randomized scalar.
    pub fn decrypt<R: Rng>(
        &self,
        ciphertext: &Ciphertext,
        secret_key: &BigUint,
        rng: &mut R,
    ) -> Result<Point> {
        if !self.curve.is_on_curve(&ciphertext.c1) || !self.curve.is_on_curve(&ciphertext.c2) {
            return Err(Error::InvalidPoint);
        }

        let shared = self
            .curve
            .scalar_mul(&ciphertext.c1, &self.randomize_scalar(secret_key, rng))?;
        self.curve
            .add(&ciphertext.c2, &self.curve.negate(&shared))
    }

    /// Produce a fresh blinding pair (R, S) for one blinded decryption.
    ///
    /// R = [k]g for a fresh uniform k in [1, n-1], and S = [sk]R. S is
    /// computed here, on the locally generated R, never on attacker input;
    /// S = [sk]R is the correctness contract [`decrypt_blinded`] relies on.
    ///
    /// [`decrypt_blinded`]: ElGamal::decrypt_blinded
    pub fn refresh_blinding_pair<R: Rng>(
        &self,
        secret_key: &BigUint,
        rng: &mut R,
    ) -> Result<BlindingPair> {
        let k = rng.gen_biguint_range(&BigUint::one(), &self.order);
        let r = self
            .curve
            .scalar_mul(&self.generator, &self.randomize_scalar(&k, rng))?;
        let s = self
            .curve
            .scalar_mul(&r, &self.randomize_scalar(secret_key, rng))?;
        Ok(BlindingPair { r, s })
    }

    /// Decrypt with the point-blinding countermeasure.
    ///
    /// Blinds C1 with R before the secret multiplication and removes the
    /// mask's contribution S afterwards:
    ///
    /// ```text
    /// [sk]C1 == [sk](C1 + R) + (-S)      when S == [sk]R
    /// ```
    ///
    /// so the output matches [`decrypt`] exactly while the trace of the
    /// secret multiplication depends on the unpredictable R. The blinding
    /// pair is consumed; call [`refresh_blinding_pair`] again for the next
    /// decryption.
    ///
    /// [`decrypt`]: ElGamal::decrypt
    /// [`refresh_blinding_pair`]: ElGamal::refresh_blinding_pair
    pub fn decrypt_blinded<R: Rng>(
        &self,
        ciphertext: &Ciphertext,
        secret_key: &BigUint,
        blinding: BlindingPair,
        rng: &mut R,
    ) -> Result<Point> {
        if !self.curve.is_on_curve(&ciphertext.c1)
            || !self.curve.is_on_curve(&ciphertext.c2)
            || !self.curve.is_on_curve(&blinding.r)
            || !self.curve.is_on_curve(&blinding.s)
        {
            return Err(Error::InvalidPoint);
        }

        let blinded_c1 = self.curve.add(&ciphertext.c1, &blinding.r)?;
        let masked = self
            .curve
            .scalar_mul(&blinded_c1, &self.randomize_scalar(secret_key, rng))?;
        let shared = self.curve.add(&masked, &self.curve.negate(&blinding.s))?;
        self.curve
            .add(&ciphertext.c2, &self.curve.negate(&shared))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Cipher over y² = x³ + 2x + 2 on F_17, generator (5, 1), order 19.
    fn toy_cipher() -> ElGamal {
        let curve = Curve::new(
            BigUint::from(2u32),
            BigUint::from(2u32),
            BigUint::from(17u32),
        )
        .unwrap();
        let g = Point::Affine {
            x: BigUint::from(5u32),
            y: BigUint::one(),
        };
        ElGamal::new(curve, g, BigUint::from(19u32)).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn constructor_rejects_bad_generator() {
        let curve = Curve::new(
            BigUint::from(2u32),
            BigUint::from(2u32),
            BigUint::from(17u32),
        )
        .unwrap();
        let off_curve = Point::Affine {
            x: BigUint::from(5u32),
            y: BigUint::from(2u32),
        };
        assert!(matches!(
            ElGamal::new(curve.clone(), off_curve, BigUint::from(19u32)),
            Err(Error::InvalidGenerator)
        ));
        assert!(matches!(
            ElGamal::new(curve.clone(), Point::Infinity, BigUint::from(19u32)),
            Err(Error::InvalidGenerator)
        ));
        let g = Point::Affine {
            x: BigUint::from(5u32),
            y: BigUint::one(),
        };
        assert!(matches!(
            ElGamal::new(curve, g, BigUint::zero()),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn scalar_randomization_is_invisible() {
        let cipher = toy_cipher();
        let mut rng = rng();

        for sk in 1..19u64 {
            let sk = BigUint::from(sk);
            let plain = cipher
                .curve()
                .scalar_mul(cipher.generator(), &sk)
                .unwrap();
            // two randomized derivations, both must match the raw multiply
            let pk1 = cipher.generate_public_key(&sk, &mut rng).unwrap();
            let pk2 = cipher.generate_public_key(&sk, &mut rng).unwrap();
            assert_eq!(pk1, plain);
            assert_eq!(pk2, plain);
        }
    }

    #[test]
    fn randomized_scalar_differs_from_raw() {
        let cipher = toy_cipher();
        let mut rng = rng();
        let sk = BigUint::from(7u32);
        let masked = cipher.randomize_scalar(&sk, &mut rng);
        assert_ne!(masked, sk);
        assert_eq!(&masked % cipher.order(), sk % cipher.order());
    }

    #[test]
    fn encrypt_decrypt_roundtrip_all_keys() {
        let cipher = toy_cipher();
        let mut rng = rng();

        for sk in 1..19u64 {
            let sk = BigUint::from(sk);
            let pk = cipher.generate_public_key(&sk, &mut rng).unwrap();
            for r in 1..19u64 {
                let nonce = BigUint::from(r);
                let plaintext = cipher
                    .curve()
                    .scalar_mul(cipher.generator(), &BigUint::from(3u32))
                    .unwrap();
                let ct = cipher.encrypt(&plaintext, &pk, &nonce, &mut rng).unwrap();
                let recovered = cipher.decrypt(&ct, &sk, &mut rng).unwrap();
                assert_eq!(recovered, plaintext);
            }
        }
    }

    #[test]
    fn blinded_decryption_matches_plain() {
        let cipher = toy_cipher();
        let mut rng = rng();

        let sk = BigUint::from(7u32);
        let pk = cipher.generate_public_key(&sk, &mut rng).unwrap();
        let plaintext = cipher
            .curve()
            .scalar_mul(cipher.generator(), &BigUint::from(5u32))
            .unwrap();

        for nonce in 1..19u64 {
            let ct = cipher
                .encrypt(&plaintext, &pk, &BigUint::from(nonce), &mut rng)
                .unwrap();
            let plain = cipher.decrypt(&ct, &sk, &mut rng).unwrap();
            let pair = cipher.refresh_blinding_pair(&sk, &mut rng).unwrap();
            let blinded = cipher.decrypt_blinded(&ct, &sk, pair, &mut rng).unwrap();
            assert_eq!(plain, blinded);
            assert_eq!(blinded, plaintext);
        }
    }

    #[test]
    fn blinding_pair_satisfies_contract() {
        let cipher = toy_cipher();
        let mut rng = rng();
        let sk = BigUint::from(11u32);

        let pair = cipher.refresh_blinding_pair(&sk, &mut rng).unwrap();
        assert!(cipher.curve().is_on_curve(pair.r()));
        assert!(cipher.curve().is_on_curve(pair.s()));
        assert_eq!(
            cipher.curve().scalar_mul(pair.r(), &sk).unwrap(),
            *pair.s()
        );
    }

    #[test]
    fn blinding_pairs_vary_between_refreshes() {
        let cipher = toy_cipher();
        let mut rng = rng();
        let sk = BigUint::from(11u32);

        // order 19, so 18 possible R values; 8 draws colliding every time
        // would mean the refresh is not sampling at all
        let mut distinct = std::collections::HashSet::new();
        for _ in 0..8 {
            let pair = cipher.refresh_blinding_pair(&sk, &mut rng).unwrap();
            distinct.insert(format!("{:?}", pair.r()));
        }
        assert!(distinct.len() > 1);
    }

    #[test]
    fn encrypt_rejects_invalid_points() {
        let cipher = toy_cipher();
        let mut rng = rng();
        let off_curve = Point::Affine {
            x: BigUint::from(5u32),
            y: BigUint::from(2u32),
        };
        let good = cipher
            .curve()
            .scalar_mul(cipher.generator(), &BigUint::from(3u32))
            .unwrap();

        assert_eq!(
            cipher.encrypt(&off_curve, &good, &BigUint::from(3u32), &mut rng),
            Err(Error::InvalidPoint)
        );
        assert_eq!(
            cipher.encrypt(&good, &off_curve, &BigUint::from(3u32), &mut rng),
            Err(Error::InvalidPoint)
        );
    }

    #[test]
    fn decrypt_rejects_invalid_points() {
        let cipher = toy_cipher();
        let mut rng = rng();
        let off_curve = Point::Affine {
            x: BigUint::from(5u32),
            y: BigUint::from(2u32),
        };
        let good = cipher
            .curve()
            .scalar_mul(cipher.generator(), &BigUint::from(3u32))
            .unwrap();
        let sk = BigUint::from(7u32);

        let bad = Ciphertext {
            c1: off_curve.clone(),
            c2: good.clone(),
        };
        assert_eq!(cipher.decrypt(&bad, &sk, &mut rng), Err(Error::InvalidPoint));

        let bad = Ciphertext {
            c1: good,
            c2: off_curve,
        };
        let pair = cipher.refresh_blinding_pair(&sk, &mut rng).unwrap();
        assert_eq!(
            cipher.decrypt_blinded(&bad, &sk, pair, &mut rng),
            Err(Error::InvalidPoint)
        );
    }

    #[test]
    fn ciphertext_is_probabilistic() {
        let cipher = toy_cipher();
        let mut rng = rng();
        let sk = BigUint::from(7u32);
        let pk = cipher.generate_public_key(&sk, &mut rng).unwrap();
        let plaintext = cipher
            .curve()
            .scalar_mul(cipher.generator(), &BigUint::from(5u32))
            .unwrap();

        let ct1 = cipher
            .encrypt(&plaintext, &pk, &BigUint::from(3u32), &mut rng)
            .unwrap();
        let ct2 = cipher
            .encrypt(&plaintext, &pk, &BigUint::from(4u32), &mut rng)
            .unwrap();
        assert_ne!(ct1.c1, ct2.c1);
        // and the ciphertext is not the trivial (pk, pk) pair
        assert!(ct1.c1 != pk || ct1.c2 != pk);
    }

    #[test]
    fn generated_key_pairs_are_consistent() {
        let cipher = toy_cipher();
        let mut rng = rng();
        let pair = cipher.generate_key_pair(&mut rng).unwrap();
        assert!(!pair.private_key.is_zero());
        assert!(&pair.private_key < cipher.order());
        assert_eq!(
            cipher
                .curve()
                .scalar_mul(cipher.generator(), &pair.private_key)
                .unwrap(),
            pair.public_key
        );
    }

    #[test]
    fn key_pair_debug_redacts_private_key() {
        let cipher = toy_cipher();
        let mut rng = rng();
        let pair = cipher.generate_key_pair(&mut rng).unwrap();
        let rendered = format!("{:?}", pair);
        assert!(rendered.contains("private_key: \"<redacted>\""));
        assert!(!rendered.contains(&format!("private_key: {}", pair.private_key)));
    }
}
