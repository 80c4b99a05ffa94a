//! # Key Agreement Demo
//!
//! Two parties agree on a Diffie-Hellman secret and use it to exchange a
//! message, then the same message goes through ECIES.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example key_agreement_demo
//! ```

use cipherkit_core::crypto::{EcCurve, EllipticCurve, KeyAgreement};
use cipherkit_core::{codec, config};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "cipherkit_core=info".into()),
        )
        .init();

    println!("=== cipherkit: Key Agreement Demo ===\n");

    // Step 1: Generate both parties
    println!(
        "Step 1: Generating DH key pairs ({}-bit group)...",
        config::current().dh_group.bits()
    );
    let pairs = KeyAgreement::Dh
        .generate_key_pairs()
        .expect("Failed to generate DH key pairs");
    println!("  Alice's public key: {}...", &pairs.party_a.public_key[..40]);
    println!("  Bob's public key:   {}...", &pairs.party_b.public_key[..40]);
    println!();

    // Step 2: Both sides compute the same secret
    println!("Step 2: Computing the shared secret...");
    println!();
    println!("  ┌─────────────────────────────────────────────────────────────┐");
    println!("  │                    KEY EXCHANGE FLOW                        │");
    println!("  ├─────────────────────────────────────────────────────────────┤");
    println!("  │                                                             │");
    println!("  │   Alice                              Bob                    │");
    println!("  │     │──── Alice's Public Key ─────────►│                    │");
    println!("  │     │◄──── Bob's Public Key ───────────│                    │");
    println!("  │     ▼                                  ▼                    │");
    println!("  │   g^(ab) mod p                   g^(ab) mod p               │");
    println!("  │     │                                  │                    │");
    println!("  │     └─────────── HKDF-SHA256 ──────────┘                    │");
    println!("  │                       │                                     │");
    println!("  │                       ▼                                     │");
    println!("  │             symmetric key (DES by default)                  │");
    println!("  │                                                             │");
    println!("  └─────────────────────────────────────────────────────────────┘");
    println!();

    let alice_secret = KeyAgreement::Dh
        .shared_secret(&pairs.party_b.public_key, &pairs.party_a.private_key)
        .expect("Alice failed to compute the secret");
    let bob_secret = KeyAgreement::Dh
        .shared_secret(&pairs.party_a.public_key, &pairs.party_b.private_key)
        .expect("Bob failed to compute the secret");
    let secret_bytes = codec::decode(&alice_secret).expect("Secret is not Base64");
    println!("  Alice's secret: {}...", hex::encode(&secret_bytes[..8]));
    println!("  Secrets match:  {}", alice_secret == bob_secret);
    println!();

    // Step 3: Exchange messages under several secret ciphers
    println!("Step 3: Alice encrypts, Bob decrypts...");
    let message = "Meet me at the usual place";
    for secret_algorithm in [None, Some("DESede"), Some("AES"), Some("Blowfish")] {
        let ciphertext = KeyAgreement::Dh
            .encrypt(
                message,
                &pairs.party_b.public_key,
                &pairs.party_a.private_key,
                secret_algorithm,
            )
            .expect("DH encryption failed");
        let recovered = KeyAgreement::Dh
            .decrypt(
                &ciphertext,
                &pairs.party_a.public_key,
                &pairs.party_b.private_key,
                secret_algorithm,
            )
            .expect("DH decryption failed");
        assert_eq!(recovered, message);
        println!(
            "  {:<9} {}...",
            secret_algorithm.unwrap_or("DES"),
            &ciphertext[..32]
        );
    }
    println!();

    // Step 4: ECIES needs only the recipient's public key
    println!("Step 4: ECIES to Bob's EC public key...");
    for curve in EcCurve::ALL {
        let bob = EllipticCurve::Ec
            .generate_key_pair_on(curve)
            .expect("Failed to generate EC key pair");
        let ciphertext = EllipticCurve::Ec
            .encrypt(message, &bob.public_key)
            .expect("ECIES encryption failed");
        let recovered = EllipticCurve::Ec
            .decrypt(&ciphertext, &bob.private_key)
            .expect("ECIES decryption failed");
        assert_eq!(recovered, message);
        println!("  {:<10} {} hex chars", curve, ciphertext.len());
    }
    println!();

    println!("=== Demo Complete ===");
}
