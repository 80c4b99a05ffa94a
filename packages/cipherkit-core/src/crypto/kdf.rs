//! # Key Derivation Functions
//!
//! Turns passwords and raw agreement secrets into cipher keys.
//!
//! ## Password-Based Derivation
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    PASSWORD → CIPHER KEY                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  password ──► Base64(UTF-8 bytes) ──► KDF password                      │
//! │                                                                         │
//! │  ┌───────────────────────────┐   ┌───────────────────────────┐          │
//! │  │     PBKDF1-MD5            │   │     PBKDF2-HMAC-SHA256    │          │
//! │  │                           │   │                           │          │
//! │  │  T1 = MD5(P || S)         │   │  PBKDF2(                  │          │
//! │  │  Ti = MD5(Ti-1)           │   │    password = P,          │          │
//! │  │  DK = Tc (16 bytes)       │   │    salt = S,              │          │
//! │  │                           │   │    iterations = c,        │          │
//! │  │  DES key = DK[0..8]       │   │    output = 32 bytes      │          │
//! │  │  DES IV  = DK[8..16]      │   │  )                        │          │
//! │  │                           │   │  → AES-256 key            │          │
//! │  └───────────────────────────┘   └───────────────────────────┘          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Agreement Secret Derivation
//!
//! ```text
//! shared secret ──► HKDF-SHA256(salt = empty, info = domain) ──► n-byte key
//! ```
//!
//! The `info` string separates the Diffie-Hellman and ECIES uses, so the same
//! secret never produces the same key for two purposes.

use hkdf::Hkdf;
use md5::{Digest, Md5};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::error::{Error, Result};

/// Domain separation strings for HKDF
pub mod domain {
    /// Diffie-Hellman shared secret → symmetric cipher key
    pub const DH_SECRET_KEY: &[u8] = b"cipherkit-dh-secret-key-v1";

    /// ECIES shared point → AES-256-GCM key
    pub const ECIES_KEY: &[u8] = b"cipherkit-ecies-key-v1";
}

/// PBKDF1 with MD5 (RFC 8018 section 5.1)
///
/// Returns the full 16-byte derived key.
pub fn pbkdf1_md5(password: &[u8], salt: &[u8], iterations: u32) -> Result<[u8; 16]> {
    if iterations == 0 {
        return Err(Error::InvalidKey("iteration count must be positive".into()));
    }

    let mut hasher = Md5::new();
    hasher.update(password);
    hasher.update(salt);
    let mut dk: [u8; 16] = hasher.finalize().into();

    for _ in 1..iterations {
        dk = Md5::digest(dk).into();
    }

    Ok(dk)
}

/// PBKDF2-HMAC-SHA256 into a 32-byte key
pub fn pbkdf2_sha256(password: &[u8], salt: &[u8], iterations: u32) -> Result<[u8; 32]> {
    if iterations == 0 {
        return Err(Error::InvalidKey("iteration count must be positive".into()));
    }

    let mut key = [0u8; 32];
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key);
    Ok(key)
}

/// Expand a raw agreement secret into `len` bytes of key material
///
/// ## Parameters
///
/// - `secret`: raw Diffie-Hellman or ECDH output
/// - `info`: one of the [`domain`] strings
pub fn hkdf_sha256(secret: &[u8], info: &[u8], len: usize) -> Result<Vec<u8>> {
    let hkdf = Hkdf::<Sha256>::new(None, secret);

    let mut okm = vec![0u8; len];
    if hkdf.expand(info, &mut okm).is_err() {
        okm.zeroize();
        return Err(Error::Internal(format!(
            "HKDF cannot produce {} bytes of output",
            len
        )));
    }
    Ok(okm)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pbkdf1_single_iteration_is_plain_md5() {
        let dk = pbkdf1_md5(b"pass", b"salt", 1).unwrap();
        let expected: [u8; 16] = Md5::digest(b"passsalt").into();
        assert_eq!(dk, expected);
    }

    #[test]
    fn test_pbkdf1_iterates() {
        let one = pbkdf1_md5(b"pass", b"salt", 1).unwrap();
        let two = pbkdf1_md5(b"pass", b"salt", 2).unwrap();
        let expected: [u8; 16] = Md5::digest(one).into();
        assert_eq!(two, expected);
    }

    #[test]
    fn test_pbkdf2_rfc7914_vector() {
        // RFC 7914 section 11: PBKDF2-HMAC-SHA256("passwd", "salt", 1)
        let key = pbkdf2_sha256(b"passwd", b"salt", 1).unwrap();
        assert_eq!(
            hex::encode(key),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
        );
    }

    #[test]
    fn test_zero_iterations_rejected() {
        assert!(pbkdf1_md5(b"p", b"s", 0).is_err());
        assert!(pbkdf2_sha256(b"p", b"s", 0).is_err());
    }

    #[test]
    fn test_hkdf_domains_separate_keys() {
        let secret = [42u8; 32];
        let a = hkdf_sha256(&secret, domain::DH_SECRET_KEY, 32).unwrap();
        let b = hkdf_sha256(&secret, domain::ECIES_KEY, 32).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, hkdf_sha256(&secret, domain::DH_SECRET_KEY, 32).unwrap());
    }

    #[test]
    fn test_hkdf_output_length() {
        let key = hkdf_sha256(b"secret", domain::DH_SECRET_KEY, 24).unwrap();
        assert_eq!(key.len(), 24);
        assert!(hkdf_sha256(b"secret", domain::DH_SECRET_KEY, 255 * 32 + 1).is_err());
    }
}
