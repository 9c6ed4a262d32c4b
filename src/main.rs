//! Demonstration driver
//!
//! Exercises the full API end-to-end on the P-256 reference parameters:
//! prints the curve configuration, derives a random plaintext point,
//! generates the public key for a fixed secret key, encrypts with a random
//! nonce, then decrypts both with and without the point-blinding
//! countermeasure and checks the plaintext is recovered exactly.

use ec_elgamal::params::P256;
use ec_elgamal::{ElGamal, Error, Result};
use num_bigint::{BigUint, RandBigInt};

/// Fixed demonstration secret key (decimal).
const SECRET_KEY: &str =
    "94952102889125874165031048266763684604430453914299026099439664202419944786514";

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut rng = rand::thread_rng();
    let params = &*P256;

    println!("=== Elliptic-Curve ElGamal Demonstration ===\n");
    println!("Curve: y^2 = x^3 + ax + b over F_q");
    println!("a = 0x{:x}", params.curve.a());
    println!("b = 0x{:x}", params.curve.b());
    println!("q = 0x{:x}", params.curve.modulus());
    println!();
    println!("Generator g = {}", params.generator);
    println!("Order of the group: 0x{:x}", params.order);
    println!("Field size of the curve: 0x{:x}", params.curve.modulus());
    println!();

    if &params.order > params.curve.modulus() {
        return Err(Error::Configuration(
            "group order exceeds the field size".into(),
        ));
    }

    let cipher = ElGamal::new(
        params.curve.clone(),
        params.generator.clone(),
        params.order.clone(),
    )?;

    // Random plaintext point: [k]g for uniform k
    let k = rng.gen_biguint_range(&BigUint::from(1u32), cipher.order());
    let plaintext = cipher.curve().scalar_mul(cipher.generator(), &k)?;
    println!("Generated plaintext: {}\n", plaintext);

    let secret_key = BigUint::parse_bytes(SECRET_KEY.as_bytes(), 10)
        .ok_or_else(|| Error::Configuration("secret key literal is not decimal".into()))?;
    println!("Secret key: <fixed demonstration key, not printed>\n");

    // Key generation with scalar randomization
    let public_key = cipher.generate_public_key(&secret_key, &mut rng)?;
    println!("Generated public key: {}\n", public_key);

    // Encryption with a random nonce
    let nonce = rng.gen_biguint_range(&BigUint::from(1u32), cipher.order());
    let ciphertext = cipher.encrypt(&plaintext, &public_key, &nonce, &mut rng)?;
    println!("Ciphertext:");
    println!("  C1 = {}", ciphertext.c1);
    println!("  C2 = {}\n", ciphertext.c2);

    // Plain decryption (scalar randomization only)
    let recovered = cipher.decrypt(&ciphertext, &secret_key, &mut rng)?;
    println!("Recovered plaintext: {}", recovered);
    assert_eq!(recovered, plaintext);
    assert!(ciphertext.c1 != public_key || ciphertext.c2 != public_key);
    println!("Plain decryption: OK\n");

    // Hardened decryption: fresh blinding pair, consumed by the call
    let blinding = cipher.refresh_blinding_pair(&secret_key, &mut rng)?;
    println!("Blinding point R = {}", blinding.r());
    let recovered_blinded = cipher.decrypt_blinded(&ciphertext, &secret_key, blinding, &mut rng)?;
    assert_eq!(recovered_blinded, plaintext);
    println!("Blinded decryption: OK");

    Ok(())
}
