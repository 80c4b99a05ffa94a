//! # Configuration
//!
//! Process-wide, read-only settings for the façade. Install once with
//! [`crate::initialize`]; every operation reads [`current`], which falls
//! back to [`CryptoConfig::default`] when nothing was installed.
//!
//! The first read fixes the configuration for the rest of the process. An
//! [`crate::initialize`] that arrives after any operation has run fails with
//! [`Error::ConfigurationLocked`] rather than
//! [`Error::AlreadyInitialized`].

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::crypto::{DhGroup, EcCurve};
use crate::error::{Error, Result};

static CONFIG: OnceCell<Slot> = OnceCell::new();

struct Slot {
    config: CryptoConfig,
    /// Installed by `initialize` rather than defaulted on first read
    explicit: bool,
}

/// How one-way and keyed digests render as hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestHexStyle {
    /// Two hex characters per byte, always the algorithm's full width
    #[default]
    FixedWidth,
    /// Legacy rendering of the digest as an unsigned big integer: leading
    /// zero nibbles are dropped, an all-zero digest renders as `"0"`
    TrimLeadingZeros,
}

/// Settings for every algorithm family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    /// Hex rendering for digests and MACs
    pub digest_hex_style: DigestHexStyle,
    /// RSA modulus size in bits
    pub rsa_key_bits: usize,
    /// DSA prime size in bits (1024, 2048 or 3072)
    pub dsa_key_bits: usize,
    /// MODP group used for Diffie-Hellman party A
    pub dh_group: DhGroup,
    /// Iteration count for password-based key derivation
    pub pbe_iterations: u32,
    /// Salt length in bytes for password-based encryption
    pub pbe_salt_len: usize,
    /// Curve used by elliptic-curve key generation
    pub ec_curve: EcCurve,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            digest_hex_style: DigestHexStyle::FixedWidth,
            rsa_key_bits: 1024,
            dsa_key_bits: 1024,
            dh_group: DhGroup::Modp1024,
            pbe_iterations: 100,
            pbe_salt_len: 8,
            ec_curve: EcCurve::Secp256r1,
        }
    }
}

impl CryptoConfig {
    /// Parse a JSON configuration document
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no algorithm can honor
    pub fn validate(&self) -> Result<()> {
        if !(512..=8192).contains(&self.rsa_key_bits) {
            return Err(Error::InvalidKey(format!(
                "RSA key size {} is outside 512..=8192",
                self.rsa_key_bits
            )));
        }
        if ![1024, 2048, 3072].contains(&self.dsa_key_bits) {
            return Err(Error::InvalidKey(format!(
                "DSA key size {} must be 1024, 2048 or 3072",
                self.dsa_key_bits
            )));
        }
        if self.pbe_iterations == 0 {
            return Err(Error::InvalidKey("PBE iteration count must be positive".into()));
        }
        if self.pbe_salt_len < 8 {
            return Err(Error::InvalidKey("PBE salt must be at least 8 bytes".into()));
        }
        Ok(())
    }
}

/// Install the process-wide configuration
pub(crate) fn install(config: CryptoConfig) -> Result<()> {
    config.validate()?;
    CONFIG
        .set(Slot {
            config,
            explicit: true,
        })
        .map_err(|_| match CONFIG.get() {
            Some(slot) if !slot.explicit => Error::ConfigurationLocked,
            _ => Error::AlreadyInitialized,
        })
}

/// The installed configuration, or the defaults
pub fn current() -> &'static CryptoConfig {
    &CONFIG
        .get_or_init(|| Slot {
            config: CryptoConfig::default(),
            explicit: false,
        })
        .config
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_legacy_parameters() {
        let config = CryptoConfig::default();
        assert_eq!(config.rsa_key_bits, 1024);
        assert_eq!(config.pbe_iterations, 100);
        assert_eq!(config.pbe_salt_len, 8);
        assert_eq!(config.digest_hex_style, DigestHexStyle::FixedWidth);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial_document() {
        let config =
            CryptoConfig::from_json(r#"{ "digest_hex_style": "trim_leading_zeros", "rsa_key_bits": 2048 }"#)
                .unwrap();
        assert_eq!(config.digest_hex_style, DigestHexStyle::TrimLeadingZeros);
        assert_eq!(config.rsa_key_bits, 2048);
        assert_eq!(config.pbe_iterations, 100);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(CryptoConfig::from_json(r#"{ "dsa_key_bits": 512 }"#).is_err());
        assert!(CryptoConfig::from_json(r#"{ "pbe_salt_len": 4 }"#).is_err());
        assert!(matches!(
            CryptoConfig::from_json("not json"),
            Err(Error::Decoding(_))
        ));
    }
}
