//! # Symmetric Ciphers
//!
//! Block ciphers run in CBC mode with PKCS#7 padding and a random IV per
//! message; RC4 is applied as a plain keystream.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       SYMMETRIC ENCRYPTION                              │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  generate_key() ──► random key (Base64)                                 │
//! │                                                                         │
//! │  encrypt(plaintext, key)                                                │
//! │     1. Base64-decode key, check length for the variant                  │
//! │     2. Block cipher: IV ← OsRng; CBC(key, IV, PKCS#7(plaintext))        │
//! │        Stream cipher: RC4(key) ⊕ plaintext                              │
//! │     3. hex(IV || ciphertext)                                            │
//! │                                                                         │
//! │  decrypt(hex, key)  reverses the above; bad padding → Decryption        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Variant | Key | Block | Provider |
//! |---------|-----|-------|----------|
//! | AES | 16 (or 24/32) | 16 | default |
//! | DES | 8 | 8 | default |
//! | DESede | 24 | 8 | default |
//! | Blowfish | 16 (4..=56) | 8 | default |
//! | RC2 | 16 | 8 | default |
//! | RC4 | 16 | stream | default |
//! | IDEA | 16 | 8 | extended |
//! | Rijndael | 32 | 16 | extended |
//! | Serpent | 32 | 16 | extended |
//! | Twofish | 32 | 16 | extended |
//! | RC5 | 16 | 8 | extended (no implementation) |

use std::fmt;
use std::str::FromStr;

use aes::{Aes128, Aes192, Aes256};
use blowfish::Blowfish;
use des::{Des, TdesEde3};
use rc2::Rc2;

use crate::catalog::{self, Algorithm, Family, VariantInfo};
use crate::codec;
use crate::error::{Error, Result};
use crate::primitive;

/// Symmetric cipher variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symmetric {
    /// AES (Rijndael with a 128-bit block)
    Aes,
    /// Single DES
    Des,
    /// Triple DES, EDE with three keys
    DesEde,
    /// Blowfish
    Blowfish,
    /// RC2
    Rc2,
    /// RC4 stream cipher
    Rc4,
    /// IDEA (extended provider)
    Idea,
    /// Rijndael with a 256-bit key (extended provider)
    Rijndael,
    /// Serpent (extended provider)
    Serpent,
    /// Twofish (extended provider)
    Twofish,
    /// RC5 (extended provider)
    Rc5,
}

impl Algorithm for Symmetric {
    const FAMILY: Family = Family::Symmetric;

    fn all() -> &'static [Self] {
        &[
            Symmetric::Aes,
            Symmetric::Des,
            Symmetric::DesEde,
            Symmetric::Blowfish,
            Symmetric::Rc2,
            Symmetric::Rc4,
            Symmetric::Idea,
            Symmetric::Rijndael,
            Symmetric::Serpent,
            Symmetric::Twofish,
            Symmetric::Rc5,
        ]
    }

    fn name(&self) -> &'static str {
        match self {
            Symmetric::Aes => "AES",
            Symmetric::Des => "DES",
            Symmetric::DesEde => "DESede",
            Symmetric::Blowfish => "Blowfish",
            Symmetric::Rc2 => "RC2",
            Symmetric::Rc4 => "RC4",
            Symmetric::Idea => "IDEA",
            Symmetric::Rijndael => "Rijndael",
            Symmetric::Serpent => "Serpent",
            Symmetric::Twofish => "Twofish",
            Symmetric::Rc5 => "RC5",
        }
    }

    fn info(&self) -> VariantInfo {
        match self {
            Symmetric::Idea
            | Symmetric::Rijndael
            | Symmetric::Serpent
            | Symmetric::Twofish
            | Symmetric::Rc5 => VariantInfo::external(),
            _ => VariantInfo::standard(),
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Symmetric::DesEde => &["TripleDES", "3DES"],
            Symmetric::Rc4 => &["ARCFOUR"],
            _ => &[],
        }
    }

    fn is_legacy(&self) -> bool {
        matches!(self, Symmetric::Des | Symmetric::Rc2 | Symmetric::Rc4)
    }
}

impl Symmetric {
    /// Length in bytes of keys produced by [`Symmetric::generate_key`]
    pub fn key_len(&self) -> usize {
        match self {
            Symmetric::Des => 8,
            Symmetric::DesEde => 24,
            Symmetric::Aes
            | Symmetric::Blowfish
            | Symmetric::Rc2
            | Symmetric::Rc4
            | Symmetric::Idea
            | Symmetric::Rc5 => 16,
            Symmetric::Rijndael | Symmetric::Serpent | Symmetric::Twofish => 32,
        }
    }

    /// Whether `len` is an acceptable key length for this variant
    pub fn accepts_key_len(&self, len: usize) -> bool {
        match self {
            Symmetric::Aes => matches!(len, 16 | 24 | 32),
            Symmetric::Blowfish => (4..=56).contains(&len),
            _ => len == self.key_len(),
        }
    }

    /// Generate a fresh random key, Base64-encoded
    pub fn generate_key(&self) -> Result<String> {
        self.ensure_available()?;
        tracing::debug!(algorithm = self.name(), "Generating symmetric key");
        Ok(codec::encode(&self.generate_key_bytes()))
    }

    pub(crate) fn generate_key_bytes(&self) -> Vec<u8> {
        let mut key = primitive::random_bytes(self.key_len());
        if matches!(self, Symmetric::Des | Symmetric::DesEde) {
            primitive::set_des_parity(&mut key);
        }
        key
    }

    /// Encrypt the UTF-8 bytes of `plaintext` under a Base64 key
    ///
    /// ## Example
    ///
    /// ```ignore
    /// let key = Symmetric::Aes.generate_key()?;
    /// let hex = Symmetric::Aes.encrypt("hello world", &key)?;
    /// assert_eq!(Symmetric::Aes.decrypt(&hex, &key)?, "hello world");
    /// ```
    pub fn encrypt(&self, plaintext: &str, key: &str) -> Result<String> {
        let key = codec::decode(key)?;
        let ciphertext = self.encrypt_bytes(plaintext.as_bytes(), &key)?;
        Ok(codec::encode_hex(&ciphertext))
    }

    /// Decrypt hex ciphertext produced by [`Symmetric::encrypt`]
    pub fn decrypt(&self, ciphertext: &str, key: &str) -> Result<String> {
        let key = codec::decode(key)?;
        let ciphertext = codec::decode_hex(ciphertext)?;
        let plaintext = self.decrypt_bytes(&ciphertext, &key)?;
        Ok(String::from_utf8(plaintext)?)
    }

    /// Encrypt raw bytes under raw key bytes
    pub fn encrypt_bytes(&self, plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        self.ensure_available()?;
        self.check_key(key)?;
        tracing::debug!(algorithm = self.name(), len = plaintext.len(), "Symmetric encrypt");

        match self {
            Symmetric::Aes => match key.len() {
                16 => primitive::cbc_encrypt::<Aes128>(key, plaintext),
                24 => primitive::cbc_encrypt::<Aes192>(key, plaintext),
                _ => primitive::cbc_encrypt::<Aes256>(key, plaintext),
            },
            Symmetric::Des => primitive::cbc_encrypt::<Des>(key, plaintext),
            Symmetric::DesEde => primitive::cbc_encrypt::<TdesEde3>(key, plaintext),
            Symmetric::Blowfish => primitive::cbc_encrypt::<Blowfish>(key, plaintext),
            Symmetric::Rc2 => primitive::cbc_encrypt::<Rc2>(key, plaintext),
            Symmetric::Rc4 => primitive::rc4_apply(key, plaintext),
            Symmetric::Idea | Symmetric::Rijndael | Symmetric::Serpent | Symmetric::Twofish => {
                extended::encrypt(*self, key, plaintext)
            }
            Symmetric::Rc5 => Err(self.unimplemented()),
        }
    }

    /// Decrypt raw bytes under raw key bytes
    pub fn decrypt_bytes(&self, ciphertext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        self.ensure_available()?;
        self.check_key(key)?;
        tracing::debug!(algorithm = self.name(), len = ciphertext.len(), "Symmetric decrypt");

        match self {
            Symmetric::Aes => match key.len() {
                16 => primitive::cbc_decrypt::<Aes128>(key, ciphertext),
                24 => primitive::cbc_decrypt::<Aes192>(key, ciphertext),
                _ => primitive::cbc_decrypt::<Aes256>(key, ciphertext),
            },
            Symmetric::Des => primitive::cbc_decrypt::<Des>(key, ciphertext),
            Symmetric::DesEde => primitive::cbc_decrypt::<TdesEde3>(key, ciphertext),
            Symmetric::Blowfish => primitive::cbc_decrypt::<Blowfish>(key, ciphertext),
            Symmetric::Rc2 => primitive::cbc_decrypt::<Rc2>(key, ciphertext),
            Symmetric::Rc4 => primitive::rc4_apply(key, ciphertext),
            Symmetric::Idea | Symmetric::Rijndael | Symmetric::Serpent | Symmetric::Twofish => {
                extended::decrypt(*self, key, ciphertext)
            }
            Symmetric::Rc5 => Err(self.unimplemented()),
        }
    }

    fn check_key(&self, key: &[u8]) -> Result<()> {
        if self.accepts_key_len(key.len()) {
            Ok(())
        } else {
            let expected = match self {
                Symmetric::Aes => "16, 24 or 32".to_string(),
                Symmetric::Blowfish => "4 to 56".to_string(),
                _ => self.key_len().to_string(),
            };
            Err(Error::InvalidKey(format!(
                "{} key must be {} bytes, got {}",
                self.name(),
                expected,
                key.len()
            )))
        }
    }

    fn unimplemented(&self) -> Error {
        Error::UnsupportedAlgorithm(format!("no provider implements {}", self.name()))
    }
}

#[cfg(feature = "extended-provider")]
mod extended {
    use idea::Idea;
    use serpent::Serpent;
    use twofish::Twofish;

    use super::Symmetric;
    use crate::error::{Error, Result};
    use crate::primitive;

    pub(super) fn encrypt(variant: Symmetric, key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        match variant {
            Symmetric::Idea => primitive::cbc_encrypt::<Idea>(key, plaintext),
            Symmetric::Rijndael => primitive::cbc_encrypt::<aes::Aes256>(key, plaintext),
            Symmetric::Serpent => primitive::cbc_encrypt::<Serpent>(key, plaintext),
            Symmetric::Twofish => primitive::cbc_encrypt::<Twofish>(key, plaintext),
            other => Err(Error::Internal(format!("{} is not an extended cipher", other))),
        }
    }

    pub(super) fn decrypt(variant: Symmetric, key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        match variant {
            Symmetric::Idea => primitive::cbc_decrypt::<Idea>(key, ciphertext),
            Symmetric::Rijndael => primitive::cbc_decrypt::<aes::Aes256>(key, ciphertext),
            Symmetric::Serpent => primitive::cbc_decrypt::<Serpent>(key, ciphertext),
            Symmetric::Twofish => primitive::cbc_decrypt::<Twofish>(key, ciphertext),
            other => Err(Error::Internal(format!("{} is not an extended cipher", other))),
        }
    }
}

#[cfg(not(feature = "extended-provider"))]
mod extended {
    use super::Symmetric;
    use crate::error::{Error, Result};

    pub(super) fn encrypt(variant: Symmetric, _key: &[u8], _plaintext: &[u8]) -> Result<Vec<u8>> {
        Err(Error::UnsupportedAlgorithm(variant.to_string()))
    }

    pub(super) fn decrypt(variant: Symmetric, _key: &[u8], _ciphertext: &[u8]) -> Result<Vec<u8>> {
        Err(Error::UnsupportedAlgorithm(variant.to_string()))
    }
}

impl FromStr for Symmetric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        catalog::lookup(s)
    }
}

impl fmt::Display for Symmetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn usable() -> impl Iterator<Item = Symmetric> {
        Symmetric::all().iter().copied().filter(|v| {
            *v != Symmetric::Rc5
                && (!v.info().requires_external_provider || cfg!(feature = "extended-provider"))
        })
    }

    #[test]
    fn test_aes_hello_world() {
        let key = Symmetric::Aes.generate_key().unwrap();
        let ciphertext = Symmetric::Aes.encrypt("hello world", &key).unwrap();

        assert!(!ciphertext.is_empty());
        assert_eq!(ciphertext.len() % 2, 0);
        assert!(ciphertext.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(Symmetric::Aes.decrypt(&ciphertext, &key).unwrap(), "hello world");
    }

    #[test]
    fn test_round_trip_every_variant() {
        for variant in usable() {
            let key = variant.generate_key().unwrap();
            for plaintext in ["", "a", "exactly sixteen!", "ünïcödé ✓ text spanning blocks"] {
                let ct = variant.encrypt(plaintext, &key).unwrap();
                assert_eq!(
                    variant.decrypt(&ct, &key).unwrap(),
                    plaintext,
                    "{} round trip",
                    variant
                );
            }
        }
    }

    #[test]
    fn test_generated_key_lengths() {
        for variant in usable() {
            let key = codec::decode(&variant.generate_key().unwrap()).unwrap();
            assert_eq!(key.len(), variant.key_len(), "{}", variant);
        }
    }

    #[test]
    fn test_des_keys_have_odd_parity() {
        let key = codec::decode(&Symmetric::DesEde.generate_key().unwrap()).unwrap();
        assert!(key.iter().all(|b| b.count_ones() % 2 == 1));
    }

    #[test]
    fn test_aes_accepts_256_bit_keys() {
        let key = codec::encode(&[9u8; 32]);
        let ct = Symmetric::Aes.encrypt("wide key", &key).unwrap();
        assert_eq!(Symmetric::Aes.decrypt(&ct, &key).unwrap(), "wide key");
    }

    #[test]
    fn test_wrong_key_length() {
        let key = codec::encode(&[1u8; 7]);
        assert!(matches!(
            Symmetric::Des.encrypt("x", &key),
            Err(Error::InvalidKey(_))
        ));
    }

    #[test]
    fn test_wrong_key_length_names_accepted_sizes() {
        let key = codec::encode(&[1u8; 20]);
        let aes = Symmetric::Aes.encrypt("x", &key).unwrap_err();
        assert_eq!(aes.to_string(), "Invalid key: AES key must be 16, 24 or 32 bytes, got 20");

        let key = codec::encode(&[1u8; 60]);
        let blowfish = Symmetric::Blowfish.encrypt("x", &key).unwrap_err();
        assert!(blowfish.to_string().contains("must be 4 to 56 bytes, got 60"));

        let key = codec::encode(&[1u8; 7]);
        let des = Symmetric::Des.encrypt("x", &key).unwrap_err();
        assert!(des.to_string().contains("must be 8 bytes, got 7"));
    }

    #[test]
    fn test_wrong_key_does_not_recover_plaintext() {
        let key = Symmetric::Aes.generate_key().unwrap();
        let other = Symmetric::Aes.generate_key().unwrap();
        let ct = Symmetric::Aes.encrypt("top secret message", &key).unwrap();
        match Symmetric::Aes.decrypt(&ct, &other) {
            Ok(plain) => assert_ne!(plain, "top secret message"),
            Err(e) => assert!(matches!(e, Error::Decryption(_) | Error::Decoding(_))),
        }
    }

    #[test]
    fn test_corrupt_ciphertext() {
        let key = Symmetric::Blowfish.generate_key().unwrap();
        assert!(matches!(
            Symmetric::Blowfish.decrypt("abcd", &key),
            Err(Error::Decryption(_))
        ));
        assert!(matches!(
            Symmetric::Blowfish.decrypt("not hex", &key),
            Err(Error::Decoding(_))
        ));
    }

    #[test]
    fn test_rc4_has_no_iv() {
        let key = Symmetric::Rc4.generate_key().unwrap();
        let ct = Symmetric::Rc4.encrypt("abc", &key).unwrap();
        assert_eq!(ct.len(), 6);
    }

    #[cfg(feature = "extended-provider")]
    #[test]
    fn test_rc5_has_no_implementation() {
        let err = Symmetric::Rc5.generate_key().unwrap_err();
        assert!(matches!(err, Error::UnsupportedAlgorithm(_)));
    }

    #[cfg(feature = "extended-provider")]
    #[test]
    fn test_extended_variant_registers_provider() {
        let key = Symmetric::Twofish.generate_key().unwrap();
        assert!(crate::provider::is_registered());
        let ct = Symmetric::Twofish.encrypt("fish", &key).unwrap();
        assert_eq!(Symmetric::Twofish.decrypt(&ct, &key).unwrap(), "fish");
    }
}
