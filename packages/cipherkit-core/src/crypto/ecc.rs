//! # Elliptic-Curve Cryptography
//!
//! Named-curve key pairs with ECIES encryption and ECDSA signatures.
//!
//! ## ECIES
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            ECIES                                        │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  encrypt(plaintext, recipient_public)                                   │
//! │     1. ephemeral key pair (e, E) on the recipient's curve               │
//! │     2. z = ECDH(e, recipient_public)                                    │
//! │     3. k = HKDF-SHA256(z, info = "cipherkit-ecies-key-v1")              │
//! │     4. AES-256-GCM(k, plaintext, aad = E)                               │
//! │                                                                         │
//! │  ┌─────────────────────┬────────────┬────────────────────────────┐      │
//! │  │ E (SEC1 compressed) │ nonce (12) │ ciphertext || tag (16)     │      │
//! │  └─────────────────────┴────────────┴────────────────────────────┘      │
//! │                                                                         │
//! │  decrypt(hex, recipient_private)                                        │
//! │     z = ECDH(recipient_private, E), same k, open                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The curve never has to be named at encrypt/decrypt time: SPKI and PKCS#8
//! encodings carry the curve OID, and the key is matched against each
//! supported curve in turn.
//!
//! | Curve | Point (compressed) | Signature scheme |
//! |-------|--------------------|------------------|
//! | secp256r1 (P-256) | 33 bytes | SHA256withECDSA |
//! | secp384r1 (P-384) | 49 bytes | SHA384withECDSA |
//! | secp256k1 | 33 bytes | SHA256withECDSA |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::catalog::{self, Algorithm, Family, VariantInfo};
use crate::codec;
use crate::config;
use crate::crypto::encryption::{self, EncryptionKey};
use crate::crypto::kdf;
use crate::crypto::keys::KeyPair;
use crate::crypto::signing::{KeyFamily, SignAlgorithm};
use crate::error::{Error, Result};

// ============================================================================
// CURVES
// ============================================================================

/// Named curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EcCurve {
    /// NIST P-256
    #[default]
    Secp256r1,
    /// NIST P-384
    Secp384r1,
    /// SEC 2 Koblitz curve
    Secp256k1,
}

impl EcCurve {
    /// Every supported curve
    pub const ALL: [EcCurve; 3] = [EcCurve::Secp256r1, EcCurve::Secp384r1, EcCurve::Secp256k1];

    /// SEC 2 curve name
    pub fn name(&self) -> &'static str {
        match self {
            EcCurve::Secp256r1 => "secp256r1",
            EcCurve::Secp384r1 => "secp384r1",
            EcCurve::Secp256k1 => "secp256k1",
        }
    }

    /// ECDSA scheme matching the curve's field size
    pub fn sign_algorithm(&self) -> SignAlgorithm {
        match self {
            EcCurve::Secp384r1 => SignAlgorithm::Sha384WithEcdsa,
            EcCurve::Secp256r1 | EcCurve::Secp256k1 => SignAlgorithm::Sha256WithEcdsa,
        }
    }

    /// Curve of a Base64 SPKI public key
    pub fn of_public_key(public_key: &str) -> Result<Self> {
        Self::detect_public(&codec::decode(public_key)?)
    }

    fn detect_public(der: &[u8]) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|curve| match curve {
                EcCurve::Secp256r1 => secp256r1::owns_public(der),
                EcCurve::Secp384r1 => secp384r1::owns_public(der),
                EcCurve::Secp256k1 => secp256k1::owns_public(der),
            })
            .ok_or_else(|| Error::InvalidKey("not a public key on a supported curve".into()))
    }

    fn detect_private(der: &[u8]) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|curve| match curve {
                EcCurve::Secp256r1 => secp256r1::owns_private(der),
                EcCurve::Secp384r1 => secp384r1::owns_private(der),
                EcCurve::Secp256k1 => secp256k1::owns_private(der),
            })
            .ok_or_else(|| Error::InvalidKey("not a private key on a supported curve".into()))
    }
}

impl fmt::Display for EcCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

fn derive_key(shared: &[u8]) -> Result<EncryptionKey> {
    let mut okm = kdf::hkdf_sha256(shared, kdf::domain::ECIES_KEY, encryption::KEY_SIZE)?;
    let key = EncryptionKey::from_slice(&okm);
    okm.zeroize();
    key
}

macro_rules! curve_ops {
    ($module:ident, $krate:ident, $point_len:expr) => {
        mod $module {
            use $krate::ecdh::EphemeralSecret;
            use $krate::ecdsa::signature::{Signer, Verifier};
            use $krate::ecdsa::{Signature, SigningKey, VerifyingKey};
            use $krate::elliptic_curve::ecdh::diffie_hellman;
            use $krate::elliptic_curve::sec1::ToEncodedPoint;
            use $krate::{PublicKey, SecretKey};
            use pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
            use rand::rngs::OsRng;

            use super::{derive_key, encryption, Error, KeyPair, Result};

            const POINT_LEN: usize = $point_len;

            pub(super) fn owns_public(der: &[u8]) -> bool {
                PublicKey::from_public_key_der(der).is_ok()
            }

            pub(super) fn owns_private(der: &[u8]) -> bool {
                SecretKey::from_pkcs8_der(der).is_ok()
            }

            pub(super) fn generate() -> Result<KeyPair> {
                let secret = SecretKey::random(&mut OsRng);
                let public = secret.public_key().to_public_key_der().map_err(|e| {
                    Error::KeyGenerationFailed(format!("public key encoding: {}", e))
                })?;
                let private = secret.to_pkcs8_der().map_err(|e| {
                    Error::KeyGenerationFailed(format!("private key encoding: {}", e))
                })?;
                Ok(KeyPair::from_der(public.as_bytes(), private.as_bytes()))
            }

            pub(super) fn encrypt(public_der: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
                let public = PublicKey::from_public_key_der(public_der)?;
                let ephemeral = EphemeralSecret::random(&mut OsRng);
                let point = ephemeral.public_key().to_encoded_point(true);
                let shared = ephemeral.diffie_hellman(&public);
                let key = derive_key(shared.raw_secret_bytes())?;

                let mut out = point.as_bytes().to_vec();
                out.extend(encryption::seal(&key, plaintext, point.as_bytes())?);
                Ok(out)
            }

            pub(super) fn decrypt(private_der: &[u8], data: &[u8]) -> Result<Vec<u8>> {
                let secret = SecretKey::from_pkcs8_der(private_der)?;
                if data.len() < POINT_LEN {
                    return Err(Error::Decryption(format!(
                        "ciphertext too short: {} bytes",
                        data.len()
                    )));
                }
                let (point, sealed) = data.split_at(POINT_LEN);
                let ephemeral = PublicKey::from_sec1_bytes(point)
                    .map_err(|_| Error::Decryption("invalid ephemeral public key".into()))?;
                let shared = diffie_hellman(secret.to_nonzero_scalar(), ephemeral.as_affine());
                let key = derive_key(shared.raw_secret_bytes())?;
                encryption::open(&key, sealed, point)
            }

            pub(super) fn sign(private_der: &[u8], msg: &[u8]) -> Result<Vec<u8>> {
                let secret = SecretKey::from_pkcs8_der(private_der)?;
                let signing = SigningKey::from(&secret);
                let signature: Signature = signing.try_sign(msg)?;
                Ok(signature.to_der().as_bytes().to_vec())
            }

            pub(super) fn verify(public_der: &[u8], msg: &[u8], signature: &[u8]) -> Result<bool> {
                let public = PublicKey::from_public_key_der(public_der)?;
                let verifying = VerifyingKey::from(&public);
                let signature = match Signature::from_der(signature) {
                    Ok(signature) => signature,
                    Err(_) => return Ok(false),
                };
                Ok(verifying.verify(msg, &signature).is_ok())
            }
        }
    };
}

curve_ops!(secp256r1, p256, 33);
curve_ops!(secp384r1, p384, 49);
curve_ops!(secp256k1, k256, 33);

// ============================================================================
// ELLIPTIC-CURVE VARIANTS
// ============================================================================

/// Elliptic-curve variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EllipticCurve {
    /// EC keys on a named curve
    Ec,
}

impl Algorithm for EllipticCurve {
    const FAMILY: Family = Family::EllipticCurve;

    fn all() -> &'static [Self] {
        &[EllipticCurve::Ec]
    }

    fn name(&self) -> &'static str {
        "EC"
    }

    fn info(&self) -> VariantInfo {
        VariantInfo::standard()
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["ECC", "ECIES"]
    }
}

impl EllipticCurve {
    /// Generate a key pair on the configured curve
    pub fn generate_key_pair(&self) -> Result<KeyPair> {
        self.generate_key_pair_on(config::current().ec_curve)
    }

    /// Generate a key pair on `curve`
    pub fn generate_key_pair_on(&self, curve: EcCurve) -> Result<KeyPair> {
        self.ensure_available()?;
        tracing::debug!(curve = curve.name(), "Generating EC key pair");
        match curve {
            EcCurve::Secp256r1 => secp256r1::generate(),
            EcCurve::Secp384r1 => secp384r1::generate(),
            EcCurve::Secp256k1 => secp256k1::generate(),
        }
    }

    /// ECIES-encrypt the UTF-8 bytes of `plaintext` for a Base64 SPKI key
    pub fn encrypt(&self, plaintext: &str, public_key: &str) -> Result<String> {
        self.ensure_available()?;
        let der = codec::decode(public_key)?;
        let curve = EcCurve::detect_public(&der)?;
        tracing::debug!(curve = curve.name(), "ECIES encrypt");

        let data = plaintext.as_bytes();
        let out = match curve {
            EcCurve::Secp256r1 => secp256r1::encrypt(&der, data)?,
            EcCurve::Secp384r1 => secp384r1::encrypt(&der, data)?,
            EcCurve::Secp256k1 => secp256k1::encrypt(&der, data)?,
        };
        Ok(codec::encode_hex(&out))
    }

    /// Decrypt a ciphertext produced by [`EllipticCurve::encrypt`]
    pub fn decrypt(&self, ciphertext: &str, private_key: &str) -> Result<String> {
        self.ensure_available()?;
        let mut der = codec::decode(private_key)?;
        let data = codec::decode_hex(ciphertext)?;
        let plaintext = EcCurve::detect_private(&der).and_then(|curve| {
            tracing::debug!(curve = curve.name(), "ECIES decrypt");
            match curve {
                EcCurve::Secp256r1 => secp256r1::decrypt(&der, &data),
                EcCurve::Secp384r1 => secp384r1::decrypt(&der, &data),
                EcCurve::Secp256k1 => secp256k1::decrypt(&der, &data),
            }
        });
        der.zeroize();
        Ok(String::from_utf8(plaintext?)?)
    }

    /// ECDSA-sign the UTF-8 bytes of `plaintext`, returning a hex DER signature
    ///
    /// `sign_algorithm` defaults to the scheme matching the key's curve and
    /// must match it when given.
    pub fn sign(
        &self,
        plaintext: &str,
        private_key: &str,
        sign_algorithm: Option<&str>,
    ) -> Result<String> {
        self.ensure_available()?;
        let mut der = codec::decode(private_key)?;
        let signature = EcCurve::detect_private(&der).and_then(|curve| {
            check_scheme(curve, sign_algorithm)?;
            tracing::debug!(curve = curve.name(), "ECDSA sign");
            let msg = plaintext.as_bytes();
            match curve {
                EcCurve::Secp256r1 => secp256r1::sign(&der, msg),
                EcCurve::Secp384r1 => secp384r1::sign(&der, msg),
                EcCurve::Secp256k1 => secp256k1::sign(&der, msg),
            }
        });
        der.zeroize();
        Ok(codec::encode_hex(&signature?))
    }

    /// Verify a hex DER ECDSA signature
    ///
    /// Returns `Ok(false)` when the signature does not match or is not
    /// valid DER.
    pub fn verify(
        &self,
        plaintext: &str,
        public_key: &str,
        signature: &str,
        sign_algorithm: Option<&str>,
    ) -> Result<bool> {
        self.ensure_available()?;
        let der = codec::decode(public_key)?;
        let signature = codec::decode_hex(signature)?;
        let curve = EcCurve::detect_public(&der)?;
        check_scheme(curve, sign_algorithm)?;
        tracing::debug!(curve = curve.name(), "ECDSA verify");

        let msg = plaintext.as_bytes();
        match curve {
            EcCurve::Secp256r1 => secp256r1::verify(&der, msg, &signature),
            EcCurve::Secp384r1 => secp384r1::verify(&der, msg, &signature),
            EcCurve::Secp256k1 => secp256k1::verify(&der, msg, &signature),
        }
    }
}

fn check_scheme(curve: EcCurve, requested: Option<&str>) -> Result<()> {
    let expected = curve.sign_algorithm();
    let scheme = SignAlgorithm::resolve(requested, KeyFamily::Ec, Some(expected.name()))?;
    if scheme != expected {
        return Err(Error::UnsupportedAlgorithm(format!(
            "{} keys sign with {}, not {}",
            curve, expected, scheme
        )));
    }
    Ok(())
}

impl FromStr for EllipticCurve {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        catalog::lookup(s)
    }
}

impl fmt::Display for EllipticCurve {
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

    #[test]
    fn test_default_curve_round_trip() {
        let pair = EllipticCurve::Ec.generate_key_pair().unwrap();
        assert_eq!(EcCurve::of_public_key(&pair.public_key).unwrap(), EcCurve::Secp256r1);

        let ct = EllipticCurve::Ec.encrypt("hello", &pair.public_key).unwrap();
        assert_ne!(ct, codec::encode_hex(b"hello"));
        assert_eq!(EllipticCurve::Ec.decrypt(&ct, &pair.private_key).unwrap(), "hello");
    }

    #[test]
    fn test_every_curve_round_trip() {
        for curve in EcCurve::ALL {
            let pair = EllipticCurve::Ec.generate_key_pair_on(curve).unwrap();
            assert_eq!(EcCurve::of_public_key(&pair.public_key).unwrap(), curve);
            for plaintext in ["", "ecies ✓"] {
                let ct = EllipticCurve::Ec.encrypt(plaintext, &pair.public_key).unwrap();
                assert_eq!(
                    EllipticCurve::Ec.decrypt(&ct, &pair.private_key).unwrap(),
                    plaintext,
                    "{}",
                    curve
                );
            }
        }
    }

    #[test]
    fn test_ciphertext_is_randomized() {
        let pair = EllipticCurve::Ec.generate_key_pair().unwrap();
        let a = EllipticCurve::Ec.encrypt("same", &pair.public_key).unwrap();
        let b = EllipticCurve::Ec.encrypt("same", &pair.public_key).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_private_key_fails() {
        let alice = EllipticCurve::Ec.generate_key_pair().unwrap();
        let eve = EllipticCurve::Ec.generate_key_pair().unwrap();
        let ct = EllipticCurve::Ec.encrypt("for alice", &alice.public_key).unwrap();
        assert!(matches!(
            EllipticCurve::Ec.decrypt(&ct, &eve.private_key),
            Err(Error::Decryption(_))
        ));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let pair = EllipticCurve::Ec.generate_key_pair().unwrap();
        let ct = EllipticCurve::Ec.encrypt("payload", &pair.public_key).unwrap();
        let mut bytes = codec::decode_hex(&ct).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x80;
        assert!(EllipticCurve::Ec
            .decrypt(&codec::encode_hex(&bytes), &pair.private_key)
            .is_err());
    }

    #[test]
    fn test_sign_verify_every_curve() {
        for curve in EcCurve::ALL {
            let pair = EllipticCurve::Ec.generate_key_pair_on(curve).unwrap();
            let sig = EllipticCurve::Ec.sign("msg", &pair.private_key, None).unwrap();
            assert!(EllipticCurve::Ec
                .verify("msg", &pair.public_key, &sig, None)
                .unwrap());
            assert!(!EllipticCurve::Ec
                .verify("msg!", &pair.public_key, &sig, None)
                .unwrap());
        }
    }

    #[test]
    fn test_scheme_must_match_curve() {
        let pair = EllipticCurve::Ec.generate_key_pair_on(EcCurve::Secp256r1).unwrap();
        assert!(EllipticCurve::Ec
            .sign("msg", &pair.private_key, Some("SHA256withECDSA"))
            .is_ok());
        assert!(matches!(
            EllipticCurve::Ec.sign("msg", &pair.private_key, Some("SHA384withECDSA")),
            Err(Error::UnsupportedAlgorithm(_))
        ));
        assert!(matches!(
            EllipticCurve::Ec.sign("msg", &pair.private_key, Some("SHA1withDSA")),
            Err(Error::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_malformed_signature_is_false() {
        let pair = EllipticCurve::Ec.generate_key_pair().unwrap();
        assert!(!EllipticCurve::Ec
            .verify("msg", &pair.public_key, "3006020101020101ff", None)
            .unwrap());
    }

    #[test]
    fn test_rejects_foreign_keys() {
        let rsa_like = codec::encode(b"definitely not a key");
        assert!(matches!(
            EllipticCurve::Ec.encrypt("x", &rsa_like),
            Err(Error::InvalidKey(_))
        ));
        let pair = EllipticCurve::Ec.generate_key_pair().unwrap();
        // a public key where a private key is expected
        assert!(matches!(
            EllipticCurve::Ec.decrypt("00", &pair.public_key),
            Err(Error::InvalidKey(_))
        ));
    }

    #[test]
    fn test_curve_serde_names() {
        assert_eq!(serde_json::to_string(&EcCurve::Secp256k1).unwrap(), "\"secp256k1\"");
        let curve: EcCurve = serde_json::from_str("\"secp384r1\"").unwrap();
        assert_eq!(curve, EcCurve::Secp384r1);
    }
}
