//! # Signature Algorithms
//!
//! Named `<digest>with<key>` signature schemes. A scheme is only valid for
//! keys of its own family: `SHA1withDSA` cannot be used with an RSA key.
//!
//! ## Signature Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         SIGNING FLOW                                    │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  sign(plaintext, private_key, scheme)                                   │
//! │     1. Resolve scheme (or the variant's default)                        │
//! │     2. Check scheme key family == variant                               │
//! │     3. Digest UTF-8 plaintext with the scheme's hash                    │
//! │     4. Sign digest  ──► hex                                             │
//! │                                                                         │
//! │  verify(plaintext, public_key, signature_hex, scheme)                   │
//! │     Ok(true)   signature matches                                        │
//! │     Ok(false)  mismatch, or signature bytes are not a valid encoding    │
//! │     Err(..)    bad key, bad hex, unknown or foreign scheme              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Scheme | Key family | Encoding |
//! |--------|------------|----------|
//! | MD5withRSA .. SHA512withRSA | RSA | PKCS#1 v1.5 |
//! | SHA1withDSA, SHA256withDSA | DSA | DER (r, s) |
//! | SHA256withECDSA, SHA384withECDSA | EC | DER (r, s) |

use std::fmt;
use std::str::FromStr;

use crate::catalog::{self, Algorithm, Family, VariantInfo};
use crate::error::{Error, Result};

/// Key family a signature scheme belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFamily {
    /// RSA
    Rsa,
    /// DSA
    Dsa,
    /// ECDSA over a named curve
    Ec,
}

/// Named signature schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignAlgorithm {
    /// MD5 + RSA PKCS#1 v1.5
    Md5WithRsa,
    /// SHA-1 + RSA PKCS#1 v1.5
    Sha1WithRsa,
    /// SHA-256 + RSA PKCS#1 v1.5
    Sha256WithRsa,
    /// SHA-384 + RSA PKCS#1 v1.5
    Sha384WithRsa,
    /// SHA-512 + RSA PKCS#1 v1.5
    Sha512WithRsa,
    /// SHA-1 + DSA
    Sha1WithDsa,
    /// SHA-256 + DSA
    Sha256WithDsa,
    /// SHA-256 + ECDSA
    Sha256WithEcdsa,
    /// SHA-384 + ECDSA
    Sha384WithEcdsa,
}

impl Algorithm for SignAlgorithm {
    const FAMILY: Family = Family::Signature;

    fn all() -> &'static [Self] {
        &[
            SignAlgorithm::Md5WithRsa,
            SignAlgorithm::Sha1WithRsa,
            SignAlgorithm::Sha256WithRsa,
            SignAlgorithm::Sha384WithRsa,
            SignAlgorithm::Sha512WithRsa,
            SignAlgorithm::Sha1WithDsa,
            SignAlgorithm::Sha256WithDsa,
            SignAlgorithm::Sha256WithEcdsa,
            SignAlgorithm::Sha384WithEcdsa,
        ]
    }

    fn name(&self) -> &'static str {
        match self {
            SignAlgorithm::Md5WithRsa => "MD5withRSA",
            SignAlgorithm::Sha1WithRsa => "SHA1withRSA",
            SignAlgorithm::Sha256WithRsa => "SHA256withRSA",
            SignAlgorithm::Sha384WithRsa => "SHA384withRSA",
            SignAlgorithm::Sha512WithRsa => "SHA512withRSA",
            SignAlgorithm::Sha1WithDsa => "SHA1withDSA",
            SignAlgorithm::Sha256WithDsa => "SHA256withDSA",
            SignAlgorithm::Sha256WithEcdsa => "SHA256withECDSA",
            SignAlgorithm::Sha384WithEcdsa => "SHA384withECDSA",
        }
    }

    fn info(&self) -> VariantInfo {
        VariantInfo::standard()
    }

    fn is_legacy(&self) -> bool {
        matches!(
            self,
            SignAlgorithm::Md5WithRsa | SignAlgorithm::Sha1WithRsa | SignAlgorithm::Sha1WithDsa
        )
    }
}

impl SignAlgorithm {
    /// Key family the scheme signs with
    pub fn key_family(&self) -> KeyFamily {
        match self {
            SignAlgorithm::Md5WithRsa
            | SignAlgorithm::Sha1WithRsa
            | SignAlgorithm::Sha256WithRsa
            | SignAlgorithm::Sha384WithRsa
            | SignAlgorithm::Sha512WithRsa => KeyFamily::Rsa,
            SignAlgorithm::Sha1WithDsa | SignAlgorithm::Sha256WithDsa => KeyFamily::Dsa,
            SignAlgorithm::Sha256WithEcdsa | SignAlgorithm::Sha384WithEcdsa => KeyFamily::Ec,
        }
    }

    /// Resolve an optional caller-supplied scheme name for a key family
    ///
    /// `None` selects `default`. A scheme of another key family is rejected
    /// with [`Error::UnsupportedAlgorithm`].
    pub(crate) fn resolve(
        requested: Option<&str>,
        family: KeyFamily,
        default: Option<&'static str>,
    ) -> Result<Self> {
        let name = match (requested, default) {
            (Some(name), _) | (None, Some(name)) => name,
            (None, None) => {
                return Err(Error::UnsupportedAlgorithm(format!(
                    "no default signature scheme for {:?} keys",
                    family
                )))
            }
        };
        let scheme: SignAlgorithm = catalog::lookup(name)?;
        if scheme.key_family() != family {
            return Err(Error::UnsupportedAlgorithm(format!(
                "{} cannot be used with {:?} keys",
                scheme, family
            )));
        }
        scheme.ensure_available()?;
        Ok(scheme)
    }
}

impl FromStr for SignAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        catalog::lookup(s)
    }
}

impl fmt::Display for SignAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// ============================================================================
// TESTS
// ============================================================================
