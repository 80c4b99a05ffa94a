//! # Password-Based Encryption
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       PBE ENCRYPTION FLOW                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  encrypt(plaintext, password)                                           │
//! │     1. salt ← OsRng (pbe_salt_len bytes)                                │
//! │     2. key material ← KDF(Base64(password), salt, pbe_iterations)       │
//! │     3. ciphertext ← CBC(key, IV, PKCS#7(plaintext))                     │
//! │     4. PbeOutput { salt: Base64, ciphertext: hex }                      │
//! │                                                                         │
//! │  decrypt(ciphertext, password, salt)                                    │
//! │     re-derives the key from the same salt and reverses step 3           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `PBEWithMD5AndDES` takes both the DES key and the IV from the derived key,
//! so its ciphertext carries no IV. `PBEWithHmacSHA256AndAES_256` derives the
//! key only and prefixes a random IV.
//!
//! The caller keeps the salt alongside the ciphertext; a ciphertext cannot be
//! decrypted without the salt it was produced under.

use std::fmt;
use std::str::FromStr;

use aes::Aes256;
use des::Des;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::catalog::{self, Algorithm, Family, VariantInfo};
use crate::codec;
use crate::config;
use crate::crypto::kdf;
use crate::error::{Error, Result};
use crate::primitive;

/// Password-based encryption variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pbe {
    /// PBKDF1-MD5 + DES-CBC
    PbeWithMd5AndDes,
    /// PBKDF2-HMAC-SHA256 + AES-256-CBC
    PbeWithHmacSha256AndAes256,
}

/// Result of a password-based encryption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PbeOutput {
    /// Salt used for this encryption (Base64)
    pub salt: String,
    /// Ciphertext (hex)
    pub ciphertext: String,
}

impl Algorithm for Pbe {
    const FAMILY: Family = Family::PasswordBased;

    fn all() -> &'static [Self] {
        &[Pbe::PbeWithMd5AndDes, Pbe::PbeWithHmacSha256AndAes256]
    }

    fn name(&self) -> &'static str {
        match self {
            Pbe::PbeWithMd5AndDes => "PBEWithMD5AndDES",
            Pbe::PbeWithHmacSha256AndAes256 => "PBEWithHmacSHA256AndAES_256",
        }
    }

    fn info(&self) -> VariantInfo {
        VariantInfo::standard()
    }

    fn is_legacy(&self) -> bool {
        matches!(self, Pbe::PbeWithMd5AndDes)
    }
}

impl Pbe {
    /// Encrypt `plaintext` under `password` with a fresh random salt
    ///
    /// ## Example
    ///
    /// ```ignore
    /// let out = Pbe::PbeWithMd5AndDes.encrypt("hello", "pw")?;
    /// let plain = Pbe::PbeWithMd5AndDes.decrypt(&out.ciphertext, "pw", &out.salt)?;
    /// assert_eq!(plain, "hello");
    /// ```
    pub fn encrypt(&self, plaintext: &str, password: &str) -> Result<PbeOutput> {
        self.ensure_available()?;
        let config = config::current();
        tracing::debug!(algorithm = self.name(), "PBE encrypt");

        let salt = primitive::random_bytes(config.pbe_salt_len);
        let ciphertext =
            self.encrypt_bytes(plaintext.as_bytes(), password, &salt, config.pbe_iterations)?;

        Ok(PbeOutput {
            salt: codec::encode(&salt),
            ciphertext: codec::encode_hex(&ciphertext),
        })
    }

    /// Decrypt a ciphertext produced by [`Pbe::encrypt`]
    pub fn decrypt(&self, ciphertext: &str, password: &str, salt: &str) -> Result<String> {
        self.ensure_available()?;
        tracing::debug!(algorithm = self.name(), "PBE decrypt");

        let salt = codec::decode(salt)?;
        if salt.is_empty() {
            return Err(Error::InvalidKey("PBE salt must not be empty".into()));
        }
        let ciphertext = codec::decode_hex(ciphertext)?;
        let plaintext =
            self.decrypt_bytes(&ciphertext, password, &salt, config::current().pbe_iterations)?;
        Ok(String::from_utf8(plaintext)?)
    }

    fn encrypt_bytes(
        &self,
        plaintext: &[u8],
        password: &str,
        salt: &[u8],
        iterations: u32,
    ) -> Result<Vec<u8>> {
        let password = kdf_password(password);
        match self {
            Pbe::PbeWithMd5AndDes => {
                let mut dk = kdf::pbkdf1_md5(password.as_bytes(), salt, iterations)?;
                let out = primitive::cbc_encrypt_with_iv::<Des>(&dk[..8], &dk[8..], plaintext);
                dk.zeroize();
                out
            }
            Pbe::PbeWithHmacSha256AndAes256 => {
                let mut key = kdf::pbkdf2_sha256(password.as_bytes(), salt, iterations)?;
                let out = primitive::cbc_encrypt::<Aes256>(&key, plaintext);
                key.zeroize();
                out
            }
        }
    }

    fn decrypt_bytes(
        &self,
        ciphertext: &[u8],
        password: &str,
        salt: &[u8],
        iterations: u32,
    ) -> Result<Vec<u8>> {
        let password = kdf_password(password);
        match self {
            Pbe::PbeWithMd5AndDes => {
                let mut dk = kdf::pbkdf1_md5(password.as_bytes(), salt, iterations)?;
                let out = primitive::cbc_decrypt_with_iv::<Des>(&dk[..8], &dk[8..], ciphertext);
                dk.zeroize();
                out
            }
            Pbe::PbeWithHmacSha256AndAes256 => {
                let mut key = kdf::pbkdf2_sha256(password.as_bytes(), salt, iterations)?;
                let out = primitive::cbc_decrypt::<Aes256>(&key, ciphertext);
                key.zeroize();
                out
            }
        }
    }
}

/// The KDF sees the Base64 text of the password, not its raw bytes
fn kdf_password(password: &str) -> String {
    codec::encode_str(password)
}

impl FromStr for Pbe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        catalog::lookup(s)
    }
}

impl fmt::Display for Pbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// ============================================================================
// TESTS
// ============================================================================
