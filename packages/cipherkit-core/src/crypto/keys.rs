//! # Key Pairs
//!
//! Asymmetric, key-agreement and elliptic-curve variants all hand keys to
//! the caller as Base64 text. This module holds the containers for them.
//!
//! ## Key Encodings
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           KEY ENCODINGS                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Family          Public key                 Private key                 │
//! │  ─────────────   ────────────────────────   ─────────────────────────   │
//! │  RSA / DSA       SPKI DER                   PKCS#8 DER                  │
//! │  EC              SPKI DER (named curve)     PKCS#8 DER (named curve)    │
//! │  DH              bincode { p, g, y }        bincode { p, g, x }         │
//! │                                                                         │
//! │  Every encoding crosses the interface as Base64.                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Properties
//!
//! - The private half is zeroized when a [`KeyPair`] is dropped
//! - `Debug` output never includes the private key

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A public/private key pair, both halves Base64-encoded
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct KeyPair {
    /// Public key (Base64)
    #[zeroize(skip)]
    pub public_key: String,

    /// Private key (Base64)
    pub private_key: String,
}

impl KeyPair {
    /// Wrap raw DER (or bincode) key encodings
    pub(crate) fn from_der(public_der: &[u8], private_der: &[u8]) -> Self {
        Self {
            public_key: crate::codec::encode(public_der),
            private_key: crate::codec::encode(private_der),
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Key pairs for both sides of a Diffie-Hellman exchange
///
/// Party B's pair is generated in party A's group, so the two can agree on a
/// shared secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhPartyKeyPairs {
    /// Initiating party
    pub party_a: KeyPair,
    /// Responding party
    pub party_b: KeyPair,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_private_key() {
        let pair = KeyPair::from_der(b"public", b"very secret");
        let debug = format!("{:?}", pair);
        assert!(debug.contains(&pair.public_key));
        assert!(!debug.contains(&pair.private_key));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_from_der_encodes_base64() {
        let pair = KeyPair::from_der(&[1, 2, 3], &[4, 5, 6]);
        assert_eq!(pair.public_key, "AQID");
        assert_eq!(pair.private_key, "BAUG");
    }

    #[test]
    fn test_serialization() {
        let pair = KeyPair::from_der(b"pub", b"priv");
        let json = serde_json::to_string(&pair).unwrap();
        let restored: KeyPair = serde_json::from_str(&json).unwrap();
        assert_eq!(pair, restored);
    }
}
