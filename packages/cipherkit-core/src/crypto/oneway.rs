//! # One-Way Digests
//!
//! Unkeyed, stateless, deterministic digests rendered as hex.
//!
//! | Variant | Output | Notes |
//! |---------|--------|-------|
//! | MD2 | 128 bits | legacy |
//! | MD4 | 128 bits | extended provider |
//! | MD5 | 128 bits | legacy |
//! | SHA | 160 bits | SHA-1 |
//! | SHA-256 / 384 / 512 | 256 / 384 / 512 bits | |
//!
//! MD2, MD4, MD5 and SHA-1 are broken for collision resistance. They are
//! offered for interoperability with stored digests, not for new designs.

use std::fmt;
use std::str::FromStr;

use md5::Md5;
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

use crate::catalog::{self, Algorithm, Family, VariantInfo};
use crate::config;
use crate::error::{Error, Result};
use crate::primitive;

/// One-way digest variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OneWay {
    /// MD2
    Md2,
    /// MD4 (extended provider)
    Md4,
    /// MD5
    Md5,
    /// SHA-1
    Sha,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl Algorithm for OneWay {
    const FAMILY: Family = Family::OneWay;

    fn all() -> &'static [Self] {
        &[
            OneWay::Md2,
            OneWay::Md4,
            OneWay::Md5,
            OneWay::Sha,
            OneWay::Sha256,
            OneWay::Sha384,
            OneWay::Sha512,
        ]
    }

    fn name(&self) -> &'static str {
        match self {
            OneWay::Md2 => "MD2",
            OneWay::Md4 => "MD4",
            OneWay::Md5 => "MD5",
            OneWay::Sha => "SHA",
            OneWay::Sha256 => "SHA-256",
            OneWay::Sha384 => "SHA-384",
            OneWay::Sha512 => "SHA-512",
        }
    }

    fn info(&self) -> VariantInfo {
        match self {
            OneWay::Md4 => VariantInfo::external(),
            _ => VariantInfo::standard(),
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            OneWay::Sha => &["SHA-1"],
            _ => &[],
        }
    }

    fn is_legacy(&self) -> bool {
        matches!(self, OneWay::Md2 | OneWay::Md4 | OneWay::Md5)
    }
}

impl OneWay {
    /// Digest length in bytes
    pub fn output_len(&self) -> usize {
        match self {
            OneWay::Md2 | OneWay::Md4 | OneWay::Md5 => 16,
            OneWay::Sha => 20,
            OneWay::Sha256 => 32,
            OneWay::Sha384 => 48,
            OneWay::Sha512 => 64,
        }
    }

    /// Raw digest of `data`
    pub fn digest(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.ensure_available()?;
        tracing::debug!(algorithm = self.name(), len = data.len(), "Computing digest");

        let out = match self {
            OneWay::Md2 => primitive::digest::<md2::Md2>(data),
            OneWay::Md4 => md4_digest(data)?,
            OneWay::Md5 => primitive::digest::<Md5>(data),
            OneWay::Sha => primitive::digest::<Sha1>(data),
            OneWay::Sha256 => primitive::digest::<Sha256>(data),
            OneWay::Sha384 => primitive::digest::<Sha384>(data),
            OneWay::Sha512 => primitive::digest::<Sha512>(data),
        };
        Ok(out)
    }

    /// Hex digest of the UTF-8 bytes of `plaintext`
    ///
    /// Rendering follows the configured
    /// [`DigestHexStyle`](crate::config::DigestHexStyle).
    ///
    /// ## Example
    ///
    /// ```ignore
    /// let hex = OneWay::Md5.encrypt("")?;
    /// assert_eq!(hex, "d41d8cd98f00b204e9800998ecf8427e");
    /// ```
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let digest = self.digest(plaintext.as_bytes())?;
        Ok(primitive::digest_hex(&digest, config::current().digest_hex_style))
    }
}

#[cfg(feature = "extended-provider")]
fn md4_digest(data: &[u8]) -> Result<Vec<u8>> {
    Ok(primitive::digest::<md4::Md4>(data))
}

#[cfg(not(feature = "extended-provider"))]
fn md4_digest(_data: &[u8]) -> Result<Vec<u8>> {
    Err(Error::UnsupportedAlgorithm("MD4".into()))
}

impl FromStr for OneWay {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        catalog::lookup(s)
    }
}

impl fmt::Display for OneWay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// ============================================================================
// TESTS
// ============================================================================
