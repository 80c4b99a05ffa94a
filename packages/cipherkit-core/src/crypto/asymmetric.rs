//! # Asymmetric Algorithms (RSA, DSA)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       ASYMMETRIC OPERATIONS                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │             generate_key_pair  encrypt/decrypt   sign/verify            │
//! │  RSA              ✓                 ✓                ✓                  │
//! │  DSA              ✓            UnsupportedOperation  ✓                  │
//! │                                                                         │
//! │  RSA encryption (PKCS#1 v1.5, k = modulus length in bytes)              │
//! │  ─────────────────────────────────────────────────────────              │
//! │    plaintext ──► blocks of at most k-11 bytes                           │
//! │              ──► each block encrypted to exactly k bytes                │
//! │              ──► hex(block_1 || block_2 || ...)                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Public keys are SPKI DER and private keys PKCS#8 DER, both Base64.

use std::fmt;
use std::str::FromStr;

use dsa::{Components, KeySize};
use md5::Md5;
use pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Encrypt, Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha1::{Digest, Sha1};
use sha2::{Sha256, Sha384, Sha512};
use signature::{DigestSigner, DigestVerifier, SignatureEncoding};

use crate::catalog::{self, Algorithm, Family, VariantInfo};
use crate::codec;
use crate::config;
use crate::crypto::keys::KeyPair;
use crate::crypto::signing::{KeyFamily, SignAlgorithm};
use crate::error::{Error, Result};
use crate::primitive;

/// PKCS#1 v1.5 encryption padding overhead in bytes
const PKCS1_OVERHEAD: usize = 11;

/// Asymmetric variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Asymmetric {
    /// RSA
    Rsa,
    /// DSA (sign/verify only)
    Dsa,
}

impl Algorithm for Asymmetric {
    const FAMILY: Family = Family::Asymmetric;

    fn all() -> &'static [Self] {
        &[Asymmetric::Rsa, Asymmetric::Dsa]
    }

    fn name(&self) -> &'static str {
        match self {
            Asymmetric::Rsa => "RSA",
            Asymmetric::Dsa => "DSA",
        }
    }

    fn info(&self) -> VariantInfo {
        match self {
            Asymmetric::Rsa => VariantInfo {
                default_sign_algorithm: Some("MD5withRSA"),
                ..VariantInfo::standard()
            },
            Asymmetric::Dsa => VariantInfo {
                sign_only: true,
                default_sign_algorithm: Some("SHA1withDSA"),
                ..VariantInfo::standard()
            },
        }
    }
}

impl Asymmetric {
    fn key_family(&self) -> KeyFamily {
        match self {
            Asymmetric::Rsa => KeyFamily::Rsa,
            Asymmetric::Dsa => KeyFamily::Dsa,
        }
    }

    /// Generate a key pair using the configured key size
    pub fn generate_key_pair(&self) -> Result<KeyPair> {
        self.ensure_available()?;
        let config = config::current();

        match self {
            Asymmetric::Rsa => {
                tracing::debug!(bits = config.rsa_key_bits, "Generating RSA key pair");
                let private = RsaPrivateKey::new(&mut OsRng, config.rsa_key_bits)
                    .map_err(|e| Error::KeyGenerationFailed(format!("RSA: {}", e)))?;
                let public = RsaPublicKey::from(&private);
                encode_pair(public.to_public_key_der(), private.to_pkcs8_der())
            }
            Asymmetric::Dsa => {
                tracing::debug!(bits = config.dsa_key_bits, "Generating DSA key pair");
                let components = Components::generate(&mut OsRng, dsa_key_size(config.dsa_key_bits)?);
                let signing = dsa::SigningKey::generate(&mut OsRng, components);
                encode_pair(signing.verifying_key().to_public_key_der(), signing.to_pkcs8_der())
            }
        }
    }

    /// Encrypt the UTF-8 bytes of `plaintext` under a Base64 SPKI public key
    pub fn encrypt(&self, plaintext: &str, public_key: &str) -> Result<String> {
        if self.info().sign_only {
            return Err(self.refuse("encrypt"));
        }
        self.ensure_available()?;

        let public = RsaPublicKey::from_public_key_der(&codec::decode(public_key)?)?;
        let chunk = public
            .size()
            .checked_sub(PKCS1_OVERHEAD)
            .filter(|n| *n > 0)
            .ok_or_else(|| Error::InvalidKey("RSA modulus too small for PKCS#1 v1.5".into()))?;
        tracing::debug!(blocks = plaintext.len() / chunk + 1, "RSA encrypt");

        let data = plaintext.as_bytes();
        let mut out = Vec::with_capacity((data.len() / chunk + 1) * public.size());
        if data.is_empty() {
            out.extend(public.encrypt(&mut OsRng, Pkcs1v15Encrypt, &[])?);
        }
        for block in data.chunks(chunk) {
            out.extend(public.encrypt(&mut OsRng, Pkcs1v15Encrypt, block)?);
        }
        Ok(codec::encode_hex(&out))
    }

    /// Decrypt hex ciphertext with a Base64 PKCS#8 private key
    pub fn decrypt(&self, ciphertext: &str, private_key: &str) -> Result<String> {
        if self.info().sign_only {
            return Err(self.refuse("decrypt"));
        }
        self.ensure_available()?;

        let private = RsaPrivateKey::from_pkcs8_der(&codec::decode(private_key)?)?;
        let data = codec::decode_hex(ciphertext)?;
        let k = private.size();
        if data.is_empty() || data.len() % k != 0 {
            return Err(Error::Decryption(format!(
                "ciphertext length {} is not a multiple of the {}-byte modulus",
                data.len(),
                k
            )));
        }
        tracing::debug!(blocks = data.len() / k, "RSA decrypt");

        let mut out = Vec::with_capacity(data.len());
        for block in data.chunks(k) {
            out.extend(private.decrypt(Pkcs1v15Encrypt, block)?);
        }
        Ok(String::from_utf8(out)?)
    }

    /// Sign the UTF-8 bytes of `plaintext`, returning a hex signature
    ///
    /// `sign_algorithm` defaults to the variant's default scheme
    /// (`MD5withRSA` / `SHA1withDSA`).
    pub fn sign(
        &self,
        plaintext: &str,
        private_key: &str,
        sign_algorithm: Option<&str>,
    ) -> Result<String> {
        self.ensure_available()?;
        let scheme = SignAlgorithm::resolve(
            sign_algorithm,
            self.key_family(),
            self.info().default_sign_algorithm,
        )?;
        let der = codec::decode(private_key)?;
        let msg = plaintext.as_bytes();
        tracing::debug!(algorithm = self.name(), scheme = scheme.name(), "Signing");

        let signature = match self {
            Asymmetric::Rsa => {
                let private = RsaPrivateKey::from_pkcs8_der(&der)?;
                let (padding, hashed) = rsa_prehash(scheme, msg)?;
                private
                    .sign(padding, &hashed)
                    .map_err(|e| Error::SigningFailed(format!("RSA: {}", e)))?
            }
            Asymmetric::Dsa => {
                let signing = dsa::SigningKey::from_pkcs8_der(&der)?;
                let sig: dsa::Signature = match scheme {
                    SignAlgorithm::Sha256WithDsa => {
                        signing.try_sign_digest(Sha256::new_with_prefix(msg))?
                    }
                    _ => signing.try_sign_digest(Sha1::new_with_prefix(msg))?,
                };
                sig.to_vec()
            }
        };
        Ok(codec::encode_hex(&signature))
    }

    /// Verify a hex signature over the UTF-8 bytes of `plaintext`
    ///
    /// Returns `Ok(false)` when the signature does not match or is not a
    /// well-formed signature for the scheme.
    pub fn verify(
        &self,
        plaintext: &str,
        public_key: &str,
        signature: &str,
        sign_algorithm: Option<&str>,
    ) -> Result<bool> {
        self.ensure_available()?;
        let scheme = SignAlgorithm::resolve(
            sign_algorithm,
            self.key_family(),
            self.info().default_sign_algorithm,
        )?;
        let der = codec::decode(public_key)?;
        let signature = codec::decode_hex(signature)?;
        let msg = plaintext.as_bytes();
        tracing::debug!(algorithm = self.name(), scheme = scheme.name(), "Verifying");

        match self {
            Asymmetric::Rsa => {
                let public = RsaPublicKey::from_public_key_der(&der)?;
                let (padding, hashed) = rsa_prehash(scheme, msg)?;
                Ok(public.verify(padding, &hashed, &signature).is_ok())
            }
            Asymmetric::Dsa => {
                let verifying = dsa::VerifyingKey::from_public_key_der(&der)?;
                let sig = match dsa::Signature::try_from(signature.as_slice()) {
                    Ok(sig) => sig,
                    Err(_) => return Ok(false),
                };
                let valid = match scheme {
                    SignAlgorithm::Sha256WithDsa => {
                        verifying.verify_digest(Sha256::new_with_prefix(msg), &sig)
                    }
                    _ => verifying.verify_digest(Sha1::new_with_prefix(msg), &sig),
                };
                Ok(valid.is_ok())
            }
        }
    }
}

fn encode_pair<P, S>(
    public: std::result::Result<pkcs8::Document, P>,
    private: std::result::Result<pkcs8::SecretDocument, S>,
) -> Result<KeyPair>
where
    P: fmt::Display,
    S: fmt::Display,
{
    let public = public
        .map_err(|e| Error::KeyGenerationFailed(format!("public key encoding: {}", e)))?;
    let private = private
        .map_err(|e| Error::KeyGenerationFailed(format!("private key encoding: {}", e)))?;
    Ok(KeyPair::from_der(public.as_bytes(), private.as_bytes()))
}

#[allow(deprecated)]
fn dsa_key_size(bits: usize) -> Result<KeySize> {
    match bits {
        1024 => Ok(KeySize::DSA_1024_160),
        2048 => Ok(KeySize::DSA_2048_256),
        3072 => Ok(KeySize::DSA_3072_256),
        other => Err(Error::KeyGenerationFailed(format!(
            "unsupported DSA key size {}",
            other
        ))),
    }
}

fn rsa_prehash(scheme: SignAlgorithm, msg: &[u8]) -> Result<(Pkcs1v15Sign, Vec<u8>)> {
    Ok(match scheme {
        SignAlgorithm::Md5WithRsa => (Pkcs1v15Sign::new::<Md5>(), primitive::digest::<Md5>(msg)),
        SignAlgorithm::Sha1WithRsa => (Pkcs1v15Sign::new::<Sha1>(), primitive::digest::<Sha1>(msg)),
        SignAlgorithm::Sha256WithRsa => {
            (Pkcs1v15Sign::new::<Sha256>(), primitive::digest::<Sha256>(msg))
        }
        SignAlgorithm::Sha384WithRsa => {
            (Pkcs1v15Sign::new::<Sha384>(), primitive::digest::<Sha384>(msg))
        }
        SignAlgorithm::Sha512WithRsa => {
            (Pkcs1v15Sign::new::<Sha512>(), primitive::digest::<Sha512>(msg))
        }
        other => {
            return Err(Error::Internal(format!("{} is not an RSA scheme", other)));
        }
    })
}

impl FromStr for Asymmetric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        catalog::lookup(s)
    }
}

impl fmt::Display for Asymmetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// ============================================================================
// TESTS
// ============================================================================
