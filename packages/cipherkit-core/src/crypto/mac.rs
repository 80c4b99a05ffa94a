//! # Keyed Digests (HMAC)
//!
//! ```text
//! generate_key() ──► random key (Base64)
//!                         │
//! plaintext ──────────────┼──► HMAC(key, plaintext) ──► hex
//! ```
//!
//! Generated keys match the block size of the underlying hash for the MD5,
//! SHA-1 and SHA-512 variants and the output size for SHA-256 and SHA-384.

use std::fmt;
use std::str::FromStr;

use hmac::Hmac as HmacImpl;
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

use crate::catalog::{self, Algorithm, Family, VariantInfo};
use crate::codec;
use crate::config;
use crate::error::{Error, Result};
use crate::primitive;

/// HMAC variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hmac {
    /// HMAC-MD5
    HmacMd5,
    /// HMAC-SHA1
    HmacSha1,
    /// HMAC-SHA256
    HmacSha256,
    /// HMAC-SHA384
    HmacSha384,
    /// HMAC-SHA512
    HmacSha512,
}

impl Algorithm for Hmac {
    const FAMILY: Family = Family::KeyedDigest;

    fn all() -> &'static [Self] {
        &[
            Hmac::HmacMd5,
            Hmac::HmacSha1,
            Hmac::HmacSha256,
            Hmac::HmacSha384,
            Hmac::HmacSha512,
        ]
    }

    fn name(&self) -> &'static str {
        match self {
            Hmac::HmacMd5 => "HmacMD5",
            Hmac::HmacSha1 => "HmacSHA1",
            Hmac::HmacSha256 => "HmacSHA256",
            Hmac::HmacSha384 => "HmacSHA384",
            Hmac::HmacSha512 => "HmacSHA512",
        }
    }

    fn info(&self) -> VariantInfo {
        VariantInfo::standard()
    }
}

impl Hmac {
    /// Length in bytes of keys produced by [`Hmac::generate_key`]
    pub fn key_len(&self) -> usize {
        match self {
            Hmac::HmacMd5 | Hmac::HmacSha1 | Hmac::HmacSha512 => 64,
            Hmac::HmacSha256 => 32,
            Hmac::HmacSha384 => 48,
        }
    }

    /// Generate a fresh random key, Base64-encoded
    pub fn generate_key(&self) -> Result<String> {
        self.ensure_available()?;
        tracing::debug!(algorithm = self.name(), "Generating HMAC key");
        Ok(codec::encode(&primitive::random_bytes(self.key_len())))
    }

    /// Raw MAC over `data`
    pub fn mac(&self, data: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        self.ensure_available()?;
        match self {
            Hmac::HmacMd5 => primitive::hmac::<HmacImpl<Md5>>(key, data),
            Hmac::HmacSha1 => primitive::hmac::<HmacImpl<Sha1>>(key, data),
            Hmac::HmacSha256 => primitive::hmac::<HmacImpl<Sha256>>(key, data),
            Hmac::HmacSha384 => primitive::hmac::<HmacImpl<Sha384>>(key, data),
            Hmac::HmacSha512 => primitive::hmac::<HmacImpl<Sha512>>(key, data),
        }
    }

    /// Hex MAC over the UTF-8 bytes of `plaintext` under a Base64 key
    pub fn encrypt(&self, plaintext: &str, key: &str) -> Result<String> {
        let key = codec::decode(key)?;
        let tag = self.mac(plaintext.as_bytes(), &key)?;
        Ok(primitive::digest_hex(&tag, config::current().digest_hex_style))
    }

    /// Check a hex MAC in constant time
    ///
    /// Only accepts full-width hex; a MAC rendered with the legacy trimmed
    /// style is left-padded back to the digest width first.
    pub fn verify(&self, plaintext: &str, key: &str, mac_hex: &str) -> Result<bool> {
        self.ensure_available()?;
        let key = codec::decode(key)?;
        let width = self.output_len() * 2;
        let mac_hex = mac_hex.trim();
        if mac_hex.len() > width {
            return Ok(false);
        }
        let tag = codec::decode_hex(&format!("{:0>width$}", mac_hex, width = width))?;
        let data = plaintext.as_bytes();
        match self {
            Hmac::HmacMd5 => primitive::hmac_verify::<HmacImpl<Md5>>(&key, data, &tag),
            Hmac::HmacSha1 => primitive::hmac_verify::<HmacImpl<Sha1>>(&key, data, &tag),
            Hmac::HmacSha256 => primitive::hmac_verify::<HmacImpl<Sha256>>(&key, data, &tag),
            Hmac::HmacSha384 => primitive::hmac_verify::<HmacImpl<Sha384>>(&key, data, &tag),
            Hmac::HmacSha512 => primitive::hmac_verify::<HmacImpl<Sha512>>(&key, data, &tag),
        }
    }

    /// MAC length in bytes
    pub fn output_len(&self) -> usize {
        match self {
            Hmac::HmacMd5 => 16,
            Hmac::HmacSha1 => 20,
            Hmac::HmacSha256 => 32,
            Hmac::HmacSha384 => 48,
            Hmac::HmacSha512 => 64,
        }
    }
}

impl FromStr for Hmac {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        catalog::lookup(s)
    }
}

impl fmt::Display for Hmac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// ============================================================================
// TESTS
// ============================================================================
