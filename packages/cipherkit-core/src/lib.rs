//! # cipherkit Core
//!
//! A single façade over classic cryptographic algorithm families: one-way
//! digests, HMAC, symmetric ciphers, password-based encryption, RSA/DSA,
//! Diffie-Hellman and elliptic-curve cryptography. Callers pick an algorithm
//! by name and exchange text: keys and salts as Base64, everything else as
//! hex.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CIPHERKIT CORE MODULES                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  ┌──────────────┐    │
//! │  │   OneWay    │  │    Hmac     │  │  Symmetric  │  │     Pbe      │    │
//! │  └──────┬──────┘  └──────┬──────┘  └──────┬──────┘  └──────┬───────┘    │
//! │  ┌──────┴──────┐  ┌──────┴──────┐  ┌──────┴──────┐         │            │
//! │  │ Asymmetric  │  │KeyAgreement │  │EllipticCurve│         │            │
//! │  └──────┬──────┘  └──────┬──────┘  └──────┬──────┘         │            │
//! │         └────────────────┴────────┬───────┴────────────────┘            │
//! │                                   │                                     │
//! │  ┌─────────────┐  ┌─────────────┐ │ ┌─────────────────────────────────┐ │
//! │  │   Catalog   │  │  Provider   │ │ │          Primitive              │ │
//! │  │             │  │             │ │ │                                 │ │
//! │  │ - lookup    │  │ - lazy      │◄┘ │ - CBC / PKCS#7 framing          │ │
//! │  │ - metadata  │  │   register  │   │ - RC4 keystream                 │ │
//! │  │             │  │ - supplies  │   │ - digests, HMAC                 │ │
//! │  └─────────────┘  └─────────────┘   └─────────────────────────────────┘ │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error types for the entire library
//! - [`config`] - Process-wide settings (key sizes, groups, hex style)
//! - [`codec`] - Base64 and hex helpers
//! - [`catalog`] - Algorithm trait, families and capability metadata
//! - [`provider`] - Extended algorithm provider registration
//! - [`primitive`] - Shared cipher, digest and MAC invocation
//! - [`crypto`] - The algorithm families
//!
//! ## Quick Start
//!
//! ```ignore
//! use cipherkit_core::crypto::{OneWay, Symmetric};
//!
//! let digest = OneWay::Md5.encrypt("")?;
//!
//! let key = Symmetric::Aes.generate_key()?;
//! let ciphertext = Symmetric::Aes.encrypt("hello world", &key)?;
//! assert_eq!(Symmetric::Aes.decrypt(&ciphertext, &key)?, "hello world");
//! ```
//!
//! Names can be resolved at runtime too: `"DESede".parse::<Symmetric>()`.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod catalog;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod primitive;
pub mod provider;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use catalog::{Algorithm, Family, VariantInfo};
pub use config::{CryptoConfig, DigestHexStyle};
pub use crypto::{
    Asymmetric, DhGroup, DhPartyKeyPairs, EcCurve, EllipticCurve, Hmac, KeyAgreement, KeyPair,
    OneWay, Pbe, PbeOutput, SignAlgorithm, Symmetric,
};
pub use error::{Error, Result};

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Install the process-wide configuration
///
/// Optional: without it every operation runs on [`CryptoConfig::default`].
/// Must be called before the first operation that reads the configuration,
/// and at most once. A second call fails with [`Error::AlreadyInitialized`];
/// a call after an operation already ran fails with
/// [`Error::ConfigurationLocked`].
///
/// ## Example
///
/// ```ignore
/// use cipherkit_core::{initialize, CryptoConfig};
///
/// let config = CryptoConfig::from_json(r#"{ "rsa_key_bits": 2048 }"#)?;
/// initialize(config)?;
/// ```
pub fn initialize(config: CryptoConfig) -> Result<()> {
    tracing::info!("Initializing cipherkit v{}", env!("CARGO_PKG_VERSION"));
    if config.digest_hex_style == DigestHexStyle::TrimLeadingZeros {
        tracing::warn!("Digests will render without leading zeros");
    }

    config::install(config)?;

    tracing::info!("cipherkit initialized successfully");
    Ok(())
}

// ============================================================================
// VERSION INFO
// ============================================================================

/// Returns the version of cipherkit Core
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Returns build information for debugging
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        #[cfg(target_os = "macos")]
        target: "macos",
        #[cfg(target_os = "linux")]
        target: "linux",
        #[cfg(target_os = "windows")]
        target: "windows",
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        target: "unknown",
        profile: if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        extended_provider: cfg!(feature = "extended-provider"),
    }
}

/// Build information for debugging
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Crate version
    pub version: &'static str,
    /// Target operating system
    pub target: &'static str,
    /// Build profile (debug/release)
    pub profile: &'static str,
    /// Whether the extended provider was compiled in
    pub extended_provider: bool,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_build_info() {
        let info = build_info();
        assert_eq!(info.version, version());
        assert_eq!(info.extended_provider, cfg!(feature = "extended-provider"));
    }
}
