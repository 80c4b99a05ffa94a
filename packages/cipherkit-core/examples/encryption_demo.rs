//! # Encryption Demo
//!
//! Walks through digests, HMAC, symmetric ciphers and password-based
//! encryption, picking each algorithm by name.
//!
//! ## Run
//!
//! ```bash
//! RUST_LOG=cipherkit_core=debug cargo run --example encryption_demo
//! ```

use cipherkit_core::crypto::{Hmac, OneWay, Pbe, Symmetric};
use cipherkit_core::Algorithm;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "cipherkit_core=info".into()),
        )
        .init();

    println!("=== cipherkit: Encryption Demo ===\n");

    let message = "Attack at dawn";

    // Step 1: One-way digests
    println!("Step 1: Digesting \"{}\"...", message);
    for name in ["MD5", "SHA", "SHA-256", "SHA-512"] {
        let variant: OneWay = name.parse().expect("Unknown digest");
        let digest = variant.encrypt(message).expect("Digest failed");
        println!("  {:<8} {}", variant, digest);
    }
    println!();

    // Step 2: HMAC
    println!("Step 2: Authenticating with HmacSHA256...");
    let hmac = Hmac::HmacSha256;
    let mac_key = hmac.generate_key().expect("Failed to generate MAC key");
    let tag = hmac.encrypt(message, &mac_key).expect("HMAC failed");
    println!("  Key (Base64): {}", mac_key);
    println!("  Tag (hex):    {}", tag);
    println!(
        "  Verifies:     {}",
        hmac.verify(message, &mac_key, &tag).expect("Verify failed")
    );
    println!();

    // Step 3: Symmetric ciphers
    println!("Step 3: Symmetric round trips...");
    println!();
    println!("  ┌─────────────────────────────────────────────────────────────┐");
    println!("  │                    SYMMETRIC FRAMING                        │");
    println!("  ├─────────────────────────────────────────────────────────────┤");
    println!("  │                                                             │");
    println!("  │   plaintext ──► PKCS#7 pad ──► CBC(key, random IV)          │");
    println!("  │                                        │                    │");
    println!("  │                                        ▼                    │");
    println!("  │                           hex( IV || ciphertext )           │");
    println!("  │                                                             │");
    println!("  │   RC4 is a stream cipher: hex( keystream XOR plaintext )    │");
    println!("  │                                                             │");
    println!("  └─────────────────────────────────────────────────────────────┘");
    println!();

    for variant in Symmetric::all() {
        if let Err(e) = variant.ensure_available() {
            println!("  {:<10} unavailable: {}", variant, e);
            continue;
        }
        let key = variant.generate_key().expect("Failed to generate key");
        let ciphertext = variant.encrypt(message, &key).expect("Encryption failed");
        let recovered = variant.decrypt(&ciphertext, &key).expect("Decryption failed");
        assert_eq!(recovered, message);
        println!(
            "  {:<10} key {:>3} bytes  ciphertext {}...",
            variant,
            variant.key_len(),
            &ciphertext[..ciphertext.len().min(32)]
        );
    }
    println!();

    // Step 4: Password-based encryption
    println!("Step 4: Password-based encryption...");
    let password = "correct horse battery staple";
    for variant in Pbe::all() {
        let out = variant.encrypt(message, password).expect("PBE encryption failed");
        let recovered = variant
            .decrypt(&out.ciphertext, password, &out.salt)
            .expect("PBE decryption failed");
        assert_eq!(recovered, message);
        println!("  {}", variant);
        println!("    Salt:       {}", out.salt);
        println!("    Ciphertext: {}", out.ciphertext);
    }

    let out = Pbe::PbeWithHmacSha256AndAes256
        .encrypt(message, password)
        .expect("PBE encryption failed");
    let wrong = Pbe::PbeWithHmacSha256AndAes256.decrypt(&out.ciphertext, "guess", &out.salt);
    println!("  Wrong password rejected: {}", wrong.is_err());
    println!();

    println!("=== Demo Complete ===");
}
