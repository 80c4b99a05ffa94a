//! # Digital Signature Demo
//!
//! Signs one message with RSA, DSA and ECDSA, under each scheme the key
//! family allows.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example signing_demo
//! ```

use cipherkit_core::crypto::{Asymmetric, EcCurve, EllipticCurve, KeyFamily, SignAlgorithm};
use cipherkit_core::{Algorithm, Error};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "cipherkit_core=info".into()),
        )
        .init();

    println!("=== cipherkit: Digital Signature Demo ===\n");

    let message = "Transfer 100 credits to account 42";

    // Step 1: Explain the signing process
    println!("Step 1: Understanding signatures");
    println!();
    println!("  ┌─────────────────────────────────────────────────────────────┐");
    println!("  │                   SIGNATURE FLOW                            │");
    println!("  ├─────────────────────────────────────────────────────────────┤");
    println!("  │                                                             │");
    println!("  │  SIGNING:                                                   │");
    println!("  │    Message ─► digest (MD5/SHA-1/SHA-2) ─► sign ─► hex       │");
    println!("  │                                   ▲                         │");
    println!("  │                          Private key (Base64 DER)           │");
    println!("  │                                                             │");
    println!("  │  VERIFICATION:                                              │");
    println!("  │    Message + signature ─► verify ─► true / false            │");
    println!("  │                              ▲                              │");
    println!("  │                     Public key (Base64 DER)                 │");
    println!("  │                                                             │");
    println!("  │  The scheme must belong to the key's family: RSA keys take  │");
    println!("  │  *withRSA, DSA keys *withDSA, EC keys *withECDSA.           │");
    println!("  │                                                             │");
    println!("  └─────────────────────────────────────────────────────────────┘");
    println!();

    // Step 2: RSA
    println!("Step 2: RSA signatures...");
    let rsa = Asymmetric::Rsa.generate_key_pair().expect("Failed to generate RSA key pair");
    println!("  Public key: {}...", &rsa.public_key[..48]);
    for scheme in schemes(KeyFamily::Rsa) {
        let signature = Asymmetric::Rsa
            .sign(message, &rsa.private_key, Some(scheme.name()))
            .expect("RSA signing failed");
        let valid = Asymmetric::Rsa
            .verify(message, &rsa.public_key, &signature, Some(scheme.name()))
            .expect("RSA verification failed");
        println!("  {:<16} valid={}  {}...", scheme, valid, &signature[..24]);
    }
    println!();

    // Step 3: DSA
    println!("Step 3: DSA signatures...");
    let dsa = Asymmetric::Dsa.generate_key_pair().expect("Failed to generate DSA key pair");
    for scheme in schemes(KeyFamily::Dsa) {
        let signature = Asymmetric::Dsa
            .sign(message, &dsa.private_key, Some(scheme.name()))
            .expect("DSA signing failed");
        let valid = Asymmetric::Dsa
            .verify(message, &dsa.public_key, &signature, Some(scheme.name()))
            .expect("DSA verification failed");
        println!("  {:<16} valid={}  {}...", scheme, valid, &signature[..24]);
    }
    match Asymmetric::Dsa.encrypt(message, &dsa.public_key) {
        Err(e @ Error::UnsupportedOperation { .. }) => println!("  DSA encrypt refused: {}", e),
        other => println!("  Unexpected DSA encrypt result: {:?}", other),
    }
    println!();

    // Step 4: ECDSA on every curve
    println!("Step 4: ECDSA signatures...");
    for curve in EcCurve::ALL {
        let pair = EllipticCurve::Ec
            .generate_key_pair_on(curve)
            .expect("Failed to generate EC key pair");
        let signature = EllipticCurve::Ec
            .sign(message, &pair.private_key, None)
            .expect("ECDSA signing failed");
        let valid = EllipticCurve::Ec
            .verify(message, &pair.public_key, &signature, None)
            .expect("ECDSA verification failed");
        println!("  {:<10} {:<16} valid={}", curve, curve.sign_algorithm(), valid);
    }
    println!();

    // Step 5: Tampering
    println!("Step 5: Verifying a tampered message...");
    let signature = Asymmetric::Rsa
        .sign(message, &rsa.private_key, None)
        .expect("RSA signing failed");
    let tampered = message.replace("100", "900");
    let valid = Asymmetric::Rsa
        .verify(&tampered, &rsa.public_key, &signature, None)
        .expect("RSA verification failed");
    println!("  \"{}\" valid={}", tampered, valid);
    println!();

    println!("=== Demo Complete ===");
}

fn schemes(family: KeyFamily) -> impl Iterator<Item = SignAlgorithm> {
    SignAlgorithm::all()
        .iter()
        .copied()
        .filter(move |scheme| scheme.key_family() == family)
}
