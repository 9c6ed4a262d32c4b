//! # Elliptic-Curve ElGamal with Side-Channel Countermeasures
//!
//! A from-scratch elliptic-curve group over a prime field, with an
//! ElGamal-style public-key cryptosystem on top, hardened against power and
//! timing analysis by scalar randomization and point blinding.
//!
//! ## Layers
//!
//! - [`field`]: modular inverse (extended Euclid) and modular square root
//!   (Tonelli–Shanks, with the p ≡ 3 mod 4 closed form)
//! - [`elliptic_curve`]: points, the chord-tangent group law, double-and-add
//!   scalar multiplication, setup-time order search
//! - [`elgamal`]: key generation, encryption, plain and blinded decryption
//! - [`params`]: P-256 reference parameters for the demo and tests
//!
//! ## Quick start
//!
//! ```
//! use ec_elgamal::{ElGamal, params::P256};
//! use num_bigint::{BigUint, RandBigInt};
//!
//! let mut rng = rand::thread_rng();
//! let p256 = &*P256;
//! let cipher = ElGamal::new(
//!     p256.curve.clone(),
//!     p256.generator.clone(),
//!     p256.order.clone(),
//! )?;
//!
//! let keys = cipher.generate_key_pair(&mut rng)?;
//! let plaintext = cipher.curve().scalar_mul(
//!     cipher.generator(),
//!     &rng.gen_biguint_range(&BigUint::from(1u32), cipher.order()),
//! )?;
//! let nonce = rng.gen_biguint_range(&BigUint::from(1u32), cipher.order());
//!
//! let ciphertext = cipher.encrypt(&plaintext, &keys.public_key, &nonce, &mut rng)?;
//! let recovered = cipher.decrypt(&ciphertext, &keys.private_key, &mut rng)?;
//! assert_eq!(recovered, plaintext);
//! # Ok::<(), ec_elgamal::Error>(())
//! ```

/// Public-key encryption and the side-channel countermeasures
pub mod elgamal;
/// Elliptic-curve group over a prime field
pub mod elliptic_curve;
/// Error types shared across the crate
pub mod error;
/// Modular inverse and square root over prime fields
pub mod field;
/// Hard-coded reference curve parameters
pub mod params;

// Re-export commonly used types for convenience
pub use elgamal::{BlindingPair, Ciphertext, ElGamal, KeyPair};
pub use elliptic_curve::{Curve, Point};
pub use error::{Error, Result};
