//! # Authenticated Encryption
//!
//! AES-256-GCM, used as the data-encapsulation half of ECIES.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        AES-256-GCM SEAL                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  key (32 bytes, from HKDF)                                              │
//! │  nonce ← OsRng (12 bytes, unique per message)                           │
//! │  aad = ephemeral public key (binds the ciphertext to the exchange)      │
//! │                                                                         │
//! │  seal ──► nonce || ciphertext || tag(16)                                │
//! │  open ◄── fails with Decryption if any byte or the AAD changed          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Nonce as AesNonce,
};
use rand::RngCore;
use zeroize::ZeroizeOnDrop;

use crate::error::{Error, Result};

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes (128 bits)
pub const TAG_SIZE: usize = 16;

/// Size of the encryption key in bytes (256 bits)
pub const KEY_SIZE: usize = 32;

/// An AES-256-GCM key, zeroized on drop
#[derive(ZeroizeOnDrop)]
pub struct EncryptionKey([u8; KEY_SIZE]);

impl EncryptionKey {
    /// Copy a key out of derived key material
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let key: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| {
            Error::InvalidKey(format!(
                "AES-256-GCM key must be {} bytes, got {}",
                KEY_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self(key))
    }
}

/// Encrypt and authenticate, returning `nonce || ciphertext || tag`
pub fn seal(key: &EncryptionKey, plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    let mut nonce = [0u8; NONCE_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut nonce);

    let cipher = Aes256Gcm::new_from_slice(&key.0)
        .map_err(|e| Error::Encryption(format!("Invalid key: {}", e)))?;
    let ciphertext = cipher
        .encrypt(AesNonce::from_slice(&nonce), Payload { msg: plaintext, aad })
        .map_err(|e| Error::Encryption(format!("AES-GCM: {}", e)))?;

    let mut out = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    out.extend_from_slice(&nonce);
    out.extend(ciphertext);
    Ok(out)
}

/// Verify and decrypt a `nonce || ciphertext || tag` frame
///
/// ## Errors
///
/// Returns `Decryption` if:
/// - The frame is shorter than a nonce plus a tag
/// - The ciphertext or AAD was tampered with
/// - The key is wrong
pub fn open(key: &EncryptionKey, sealed: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    if sealed.len() < NONCE_SIZE + TAG_SIZE {
        return Err(Error::Decryption(format!(
            "Sealed message too short: {} bytes",
            sealed.len()
        )));
    }
    let (nonce, ciphertext) = sealed.split_at(NONCE_SIZE);

    let cipher = Aes256Gcm::new_from_slice(&key.0)
        .map_err(|e| Error::Decryption(format!("Invalid key: {}", e)))?;
    cipher
        .decrypt(AesNonce::from_slice(nonce), Payload { msg: ciphertext, aad })
        .map_err(|_| Error::Decryption("authentication tag mismatch".into()))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> EncryptionKey {
        EncryptionKey::from_slice(&[42u8; KEY_SIZE]).unwrap()
    }

    #[test]
    fn test_seal_open() {
        let sealed = seal(&key(), b"Hello, Bob!", b"ctx").unwrap();
        assert_eq!(sealed.len(), NONCE_SIZE + 11 + TAG_SIZE);
        assert_eq!(open(&key(), &sealed, b"ctx").unwrap(), b"Hello, Bob!");
    }

    #[test]
    fn test_seal_empty() {
        let sealed = seal(&key(), b"", b"").unwrap();
        assert_eq!(open(&key(), &sealed, b"").unwrap(), b"");
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let mut sealed = seal(&key(), b"payload", b"ctx").unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0x01;
        assert!(matches!(open(&key(), &sealed, b"ctx"), Err(Error::Decryption(_))));
    }

    #[test]
    fn test_wrong_aad_fails() {
        let sealed = seal(&key(), b"payload", b"ctx").unwrap();
        assert!(open(&key(), &sealed, b"other").is_err());
    }

    #[test]
    fn test_short_frame() {
        assert!(matches!(open(&key(), &[0u8; 10], b""), Err(Error::Decryption(_))));
    }

    #[test]
    fn test_key_length() {
        assert!(matches!(
            EncryptionKey::from_slice(&[0u8; 16]),
            Err(Error::InvalidKey(_))
        ));
    }
}
