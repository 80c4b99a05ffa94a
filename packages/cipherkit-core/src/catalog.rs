//! # Algorithm Catalog
//!
//! Every algorithm family is a closed enum. Each variant carries static
//! capability metadata ([`VariantInfo`]) and is looked up by name through
//! [`Algorithm`], so the set of algorithms a caller can reach is fixed at
//! compile time.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            CATALOG                                      │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │   "HmacSHA256" ──► lookup::<Hmac>() ──► Hmac::HmacSha256                │
//! │                                            │                            │
//! │                                            ├── info(): VariantInfo      │
//! │                                            │     requires_external_...  │
//! │                                            │     sign_only              │
//! │                                            │     default_sign_...       │
//! │                                            │                            │
//! │                                            └── operations               │
//! │                                                 generate_key / encrypt  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use crate::error::{Error, Result};
use crate::provider;

/// Algorithm families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Unkeyed digests
    OneWay,
    /// HMAC
    KeyedDigest,
    /// Block and stream ciphers
    Symmetric,
    /// Password-based encryption
    PasswordBased,
    /// RSA / DSA
    Asymmetric,
    /// Diffie-Hellman
    KeyAgreement,
    /// Elliptic-curve cryptography
    EllipticCurve,
    /// Signature schemes
    Signature,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Family::OneWay => "one-way digest",
            Family::KeyedDigest => "keyed digest",
            Family::Symmetric => "symmetric cipher",
            Family::PasswordBased => "password-based encryption",
            Family::Asymmetric => "asymmetric",
            Family::KeyAgreement => "key agreement",
            Family::EllipticCurve => "elliptic curve",
            Family::Signature => "signature",
        };
        f.write_str(name)
    }
}

/// Capability metadata attached to a variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VariantInfo {
    /// The extended provider must be registered before first use
    pub requires_external_provider: bool,
    /// Supports sign/verify but not encrypt/decrypt
    pub sign_only: bool,
    /// Signature algorithm used when the caller does not name one
    pub default_sign_algorithm: Option<&'static str>,
    /// Symmetric algorithm keyed by a derived shared secret
    pub default_secret_algorithm: Option<&'static str>,
}

impl VariantInfo {
    /// Plain variant: default provider, no extra capabilities
    pub const fn standard() -> Self {
        Self {
            requires_external_provider: false,
            sign_only: false,
            default_sign_algorithm: None,
            default_secret_algorithm: None,
        }
    }

    /// Variant supplied by the extended provider
    pub const fn external() -> Self {
        Self {
            requires_external_provider: true,
            ..Self::standard()
        }
    }
}

/// A named variant in one of the algorithm families
pub trait Algorithm: Copy + fmt::Debug + 'static {
    /// Family this variant belongs to
    const FAMILY: Family;

    /// Every variant in the family, in catalog order
    fn all() -> &'static [Self];

    /// Canonical algorithm name
    fn name(&self) -> &'static str;

    /// Capability metadata
    fn info(&self) -> VariantInfo;

    /// Alternative names accepted by [`lookup`]
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Broken or weak algorithm kept for interoperability
    fn is_legacy(&self) -> bool {
        false
    }

    /// Make sure the variant can be invoked
    ///
    /// Registers the extended provider on first use of a variant that needs
    /// it. Every operation calls this before touching key material.
    fn ensure_available(&self) -> Result<()> {
        if self.is_legacy() {
            tracing::warn!(algorithm = self.name(), family = %Self::FAMILY, "Using legacy algorithm");
        }
        if self.info().requires_external_provider {
            provider::ensure_registered()?;
            if !provider::supplies(self.name()) {
                return Err(Error::UnsupportedAlgorithm(format!(
                    "{} is not supplied by any registered provider",
                    self.name()
                )));
            }
        }
        Ok(())
    }

    /// Refuse an operation the variant cannot perform
    fn refuse(&self, operation: &'static str) -> Error {
        Error::UnsupportedOperation {
            algorithm: self.name(),
            operation,
        }
    }
}

/// Look up a variant by name (case-insensitive, `-`/`_` ignored)
pub fn lookup<A: Algorithm>(name: &str) -> Result<A> {
    let wanted = normalize(name);
    A::all()
        .iter()
        .copied()
        .find(|variant| {
            normalize(variant.name()) == wanted
                || variant.aliases().iter().any(|alias| normalize(alias) == wanted)
        })
        .ok_or_else(|| Error::UnsupportedAlgorithm(format!("{} is not a {} algorithm", name, A::FAMILY)))
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{Asymmetric, Hmac, OneWay, Symmetric};

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup::<Symmetric>("aes").unwrap(), Symmetric::Aes);
        assert_eq!(lookup::<Symmetric>("DESede").unwrap(), Symmetric::DesEde);
        assert_eq!(lookup::<Hmac>("HMAC-SHA256").unwrap(), Hmac::HmacSha256);
        assert_eq!(lookup::<OneWay>("sha").unwrap(), OneWay::Sha);
        assert_eq!(lookup::<OneWay>("SHA-1").unwrap(), OneWay::Sha);
        assert_eq!(lookup::<Symmetric>("3DES").unwrap(), Symmetric::DesEde);
    }

    #[test]
    fn test_lookup_unknown_name() {
        let err = lookup::<Symmetric>("ROT13").unwrap_err();
        assert!(matches!(err, Error::UnsupportedAlgorithm(_)));
        assert!(err.to_string().contains("symmetric cipher"));
    }

    #[test]
    fn test_lookup_wrong_family() {
        assert!(lookup::<Asymmetric>("AES").is_err());
    }

    #[test]
    fn test_names_are_unique_within_family() {
        fn check<A: Algorithm>() {
            let mut names: Vec<String> = A::all().iter().map(|a| normalize(a.name())).collect();
            let before = names.len();
            names.sort();
            names.dedup();
            assert_eq!(before, names.len(), "duplicate name in {}", A::FAMILY);
        }
        check::<OneWay>();
        check::<Hmac>();
        check::<Symmetric>();
        check::<Asymmetric>();
    }

    #[test]
    fn test_dsa_is_sign_only() {
        assert!(Asymmetric::Dsa.info().sign_only);
        assert!(!Asymmetric::Rsa.info().sign_only);
        assert_eq!(Asymmetric::Rsa.info().default_sign_algorithm, Some("MD5withRSA"));
    }
}
