//! # Key Agreement (Diffie-Hellman)
//!
//! Finite-field Diffie-Hellman over the well-known MODP groups, followed by
//! symmetric encryption under a key derived from the shared secret.
//!
//! ## Exchange
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     DIFFIE-HELLMAN EXCHANGE                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  PARTY A                                 PARTY B                        │
//! │  ───────                                 ───────                        │
//! │  group (p, g) from config                                               │
//! │  x_a ← [2, p-2]                                                         │
//! │  y_a = g^x_a mod p ─────── A.public ──────►  (p, g) taken from A.public │
//! │                                              x_b ← [2, p-2]             │
//! │                    ◄────── B.public ──────── y_b = g^x_b mod p          │
//! │                                                                         │
//! │  s = y_b^x_a mod p                       s = y_a^x_b mod p              │
//! │                                                                         │
//! │  key = HKDF-SHA256(s, info = "cipherkit-dh-secret-key-v1")              │
//! │        truncated to the secret algorithm's key length (DES by default)  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Encoding
//!
//! Keys are bincode-encoded `(p, g, y)` or `(p, g, x)` big-endian integers,
//! then Base64. The domain parameters travel with every key, which is what
//! lets party B be derived from party A's public key alone.

use std::fmt;
use std::str::FromStr;

use num_bigint_dig::BigUint;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::catalog::{self, Algorithm, Family, VariantInfo};
use crate::codec;
use crate::config;
use crate::crypto::kdf;
use crate::crypto::keys::{DhPartyKeyPairs, KeyPair};
use crate::crypto::symmetric::Symmetric;
use crate::error::{Error, Result};
use crate::primitive;

/// RFC 2409 section 6.2, Oakley group 2
const MODP_1024: &str = "\
    FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD1\
    29024E088A67CC74020BBEA63B139B22514A08798E3404DD\
    EF9519B3CD3A431B302B0A6DF25F14374FE1356D6D51C245\
    E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED\
    EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE65381\
    FFFFFFFFFFFFFFFF";

/// RFC 3526 section 3, group 14
const MODP_2048: &str = "\
    FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD1\
    29024E088A67CC74020BBEA63B139B22514A08798E3404DD\
    EF9519B3CD3A431B302B0A6DF25F14374FE1356D6D51C245\
    E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED\
    EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3D\
    C2007CB8A163BF0598DA48361C55D39A69163FA8FD24CF5F\
    83655D23DCA3AD961C62F356208552BB9ED529077096966D\
    670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B\
    E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9\
    DE2BCBF6955817183995497CEA956AE515D2261898FA0510\
    15728E5A8AACAA68FFFFFFFFFFFFFFFF";

/// Smallest modulus accepted from a foreign key
const MIN_MODULUS_BITS: usize = 1024;

// ============================================================================
// GROUPS
// ============================================================================

/// MODP groups for party A's key generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DhGroup {
    /// 1024-bit Oakley group 2
    #[default]
    Modp1024,
    /// 2048-bit group 14
    Modp2048,
}

impl DhGroup {
    /// Modulus size in bits
    pub fn bits(&self) -> usize {
        match self {
            DhGroup::Modp1024 => 1024,
            DhGroup::Modp2048 => 2048,
        }
    }

    fn domain(&self) -> Result<Domain> {
        let hex = match self {
            DhGroup::Modp1024 => MODP_1024,
            DhGroup::Modp2048 => MODP_2048,
        };
        let p = BigUint::parse_bytes(hex.as_bytes(), 16)
            .ok_or_else(|| Error::Internal(format!("malformed {:?} modulus", self)))?;
        Ok(Domain {
            p,
            g: BigUint::from(2u32),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Domain {
    p: BigUint,
    g: BigUint,
}

impl Domain {
    fn validate(&self) -> Result<()> {
        let odd = &self.p % BigUint::from(2u32) == BigUint::from(1u32);
        if self.p.bits() < MIN_MODULUS_BITS || !odd {
            return Err(Error::InvalidKey(format!(
                "DH modulus must be an odd number of at least {} bits",
                MIN_MODULUS_BITS
            )));
        }
        self.check_range(&self.g, "generator")
    }

    /// Reject values outside [2, p-2]
    fn check_range(&self, value: &BigUint, what: &str) -> Result<()> {
        let two = BigUint::from(2u32);
        if *value < two || *value > &self.p - &two {
            return Err(Error::InvalidKey(format!("DH {} is outside [2, p-2]", what)));
        }
        Ok(())
    }

    fn byte_len(&self) -> usize {
        (self.p.bits() + 7) / 8
    }

    /// Uniform-ish exponent in [2, p-2]
    fn random_exponent(&self) -> BigUint {
        let mut bytes = primitive::random_bytes(self.byte_len() + 8);
        let span = &self.p - BigUint::from(3u32);
        let x = BigUint::from_bytes_be(&bytes) % span + BigUint::from(2u32);
        bytes.zeroize();
        x
    }
}

// ============================================================================
// KEY ENCODING
// ============================================================================

#[derive(Serialize, Deserialize)]
enum EncodedKey {
    Public { p: Vec<u8>, g: Vec<u8>, y: Vec<u8> },
    Private { p: Vec<u8>, g: Vec<u8>, x: Vec<u8> },
}

impl Zeroize for EncodedKey {
    fn zeroize(&mut self) {
        if let EncodedKey::Private { x, .. } = self {
            x.zeroize();
        }
    }
}

struct PublicValue {
    domain: Domain,
    y: BigUint,
}

struct PrivateValue {
    domain: Domain,
    x: BigUint,
}

fn encode_key(key: &EncodedKey) -> Result<Vec<u8>> {
    bincode::serialize(key).map_err(|e| Error::Internal(format!("DH key encoding: {}", e)))
}

fn decode_public(public_key: &str) -> Result<PublicValue> {
    match bincode::deserialize::<EncodedKey>(&codec::decode(public_key)?)? {
        EncodedKey::Public { p, g, y } => {
            let domain = Domain {
                p: BigUint::from_bytes_be(&p),
                g: BigUint::from_bytes_be(&g),
            };
            domain.validate()?;
            let y = BigUint::from_bytes_be(&y);
            domain.check_range(&y, "public value")?;
            Ok(PublicValue { domain, y })
        }
        mut private @ EncodedKey::Private { .. } => {
            private.zeroize();
            Err(Error::InvalidKey("expected a DH public key, got a private key".into()))
        }
    }
}

fn decode_private(private_key: &str) -> Result<PrivateValue> {
    let mut raw = codec::decode(private_key)?;
    let decoded = bincode::deserialize::<EncodedKey>(&raw);
    raw.zeroize();

    match decoded? {
        EncodedKey::Private { p, g, mut x } => {
            let domain = Domain {
                p: BigUint::from_bytes_be(&p),
                g: BigUint::from_bytes_be(&g),
            };
            let value = BigUint::from_bytes_be(&x);
            x.zeroize();
            domain.validate()?;
            domain.check_range(&value, "private value")?;
            Ok(PrivateValue { domain, x: value })
        }
        EncodedKey::Public { .. } => Err(Error::InvalidKey(
            "expected a DH private key, got a public key".into(),
        )),
    }
}

fn generate_in(domain: &Domain) -> Result<KeyPair> {
    let x = domain.random_exponent();
    let y = domain.g.modpow(&x, &domain.p);

    let public = encode_key(&EncodedKey::Public {
        p: domain.p.to_bytes_be(),
        g: domain.g.to_bytes_be(),
        y: y.to_bytes_be(),
    })?;
    let mut private_key = EncodedKey::Private {
        p: domain.p.to_bytes_be(),
        g: domain.g.to_bytes_be(),
        x: x.to_bytes_be(),
    };
    let mut private = encode_key(&private_key)?;
    private_key.zeroize();

    let pair = KeyPair::from_der(&public, &private);
    private.zeroize();
    Ok(pair)
}

// ============================================================================
// KEY AGREEMENT VARIANTS
// ============================================================================

/// Key agreement variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAgreement {
    /// Finite-field Diffie-Hellman
    Dh,
}

impl Algorithm for KeyAgreement {
    const FAMILY: Family = Family::KeyAgreement;

    fn all() -> &'static [Self] {
        &[KeyAgreement::Dh]
    }

    fn name(&self) -> &'static str {
        "DH"
    }

    fn info(&self) -> VariantInfo {
        VariantInfo {
            default_secret_algorithm: Some("DES"),
            ..VariantInfo::standard()
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["DiffieHellman"]
    }
}

impl KeyAgreement {
    /// Generate party A in the configured group and party B from A's public key
    pub fn generate_key_pairs(&self) -> Result<DhPartyKeyPairs> {
        self.ensure_available()?;
        let group = config::current().dh_group;
        tracing::debug!(group = ?group, "Generating DH party key pairs");

        let party_a = generate_in(&group.domain()?)?;
        let party_b = self.derive_party_key_pair(&party_a.public_key)?;
        Ok(DhPartyKeyPairs { party_a, party_b })
    }

    /// Generate a key pair in the same group as `party_a_public`
    pub fn derive_party_key_pair(&self, party_a_public: &str) -> Result<KeyPair> {
        self.ensure_available()?;
        let public = decode_public(party_a_public)?;
        tracing::debug!(bits = public.domain.p.bits(), "Deriving DH party key pair");
        generate_in(&public.domain)
    }

    /// Raw shared secret (Base64), left-padded to the modulus length
    pub fn shared_secret(&self, public_key: &str, private_key: &str) -> Result<String> {
        self.ensure_available()?;
        let mut secret = self.agree(public_key, private_key)?;
        let encoded = codec::encode(&secret);
        secret.zeroize();
        Ok(encoded)
    }

    /// Encrypt under a key derived from the shared secret of the two keys
    ///
    /// `secret_algorithm` names the symmetric cipher keyed by the secret and
    /// defaults to `DES`.
    ///
    /// ## Example
    ///
    /// ```ignore
    /// let pairs = KeyAgreement::Dh.generate_key_pairs()?;
    /// let ct = KeyAgreement::Dh.encrypt(
    ///     "hello",
    ///     &pairs.party_b.public_key,
    ///     &pairs.party_a.private_key,
    ///     None,
    /// )?;
    /// let plain = KeyAgreement::Dh.decrypt(
    ///     &ct,
    ///     &pairs.party_a.public_key,
    ///     &pairs.party_b.private_key,
    ///     None,
    /// )?;
    /// ```
    pub fn encrypt(
        &self,
        plaintext: &str,
        public_key: &str,
        private_key: &str,
        secret_algorithm: Option<&str>,
    ) -> Result<String> {
        self.ensure_available()?;
        let cipher = self.secret_cipher(secret_algorithm)?;
        let mut key = self.secret_key(public_key, private_key, cipher)?;
        tracing::debug!(secret_algorithm = cipher.name(), "DH encrypt");

        let ciphertext = cipher.encrypt_bytes(plaintext.as_bytes(), &key);
        key.zeroize();
        Ok(codec::encode_hex(&ciphertext?))
    }

    /// Decrypt a ciphertext produced by [`KeyAgreement::encrypt`]
    pub fn decrypt(
        &self,
        ciphertext: &str,
        public_key: &str,
        private_key: &str,
        secret_algorithm: Option<&str>,
    ) -> Result<String> {
        self.ensure_available()?;
        let cipher = self.secret_cipher(secret_algorithm)?;
        let ciphertext = codec::decode_hex(ciphertext)?;
        let mut key = self.secret_key(public_key, private_key, cipher)?;
        tracing::debug!(secret_algorithm = cipher.name(), "DH decrypt");

        let plaintext = cipher.decrypt_bytes(&ciphertext, &key);
        key.zeroize();
        Ok(String::from_utf8(plaintext?)?)
    }

    fn secret_cipher(&self, requested: Option<&str>) -> Result<Symmetric> {
        match requested.or(self.info().default_secret_algorithm) {
            Some(name) => catalog::lookup(name),
            None => Err(Error::Internal("no default secret algorithm".into())),
        }
    }

    fn secret_key(&self, public_key: &str, private_key: &str, cipher: Symmetric) -> Result<Vec<u8>> {
        let mut secret = self.agree(public_key, private_key)?;
        let key = kdf::hkdf_sha256(&secret, kdf::domain::DH_SECRET_KEY, cipher.key_len());
        secret.zeroize();

        let mut key = key?;
        if matches!(cipher, Symmetric::Des | Symmetric::DesEde) {
            primitive::set_des_parity(&mut key);
        }
        Ok(key)
    }

    fn agree(&self, public_key: &str, private_key: &str) -> Result<Vec<u8>> {
        let public = decode_public(public_key)?;
        let private = decode_private(private_key)?;
        if public.domain != private.domain {
            return Err(Error::InvalidKey(
                "DH keys belong to different groups".into(),
            ));
        }

        let shared = public.y.modpow(&private.x, &public.domain.p);
        let bytes = shared.to_bytes_be();
        let mut secret = vec![0u8; public.domain.byte_len().saturating_sub(bytes.len())];
        secret.extend_from_slice(&bytes);
        Ok(secret)
    }
}

impl FromStr for KeyAgreement {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        catalog::lookup(s)
    }
}

impl fmt::Display for KeyAgreement {
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
    fn test_group_sizes() {
        assert_eq!(DhGroup::Modp1024.domain().unwrap().p.bits(), 1024);
        assert_eq!(DhGroup::Modp2048.domain().unwrap().p.bits(), 2048);
    }

    #[test]
    fn test_parties_agree() {
        let pairs = KeyAgreement::Dh.generate_key_pairs().unwrap();
        let a = KeyAgreement::Dh
            .shared_secret(&pairs.party_b.public_key, &pairs.party_a.private_key)
            .unwrap();
        let b = KeyAgreement::Dh
            .shared_secret(&pairs.party_a.public_key, &pairs.party_b.private_key)
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(codec::decode(&a).unwrap().len(), 128);
    }

    #[test]
    fn test_encrypt_decrypt_default_des() {
        let pairs = KeyAgreement::Dh.generate_key_pairs().unwrap();
        let ct = KeyAgreement::Dh
            .encrypt(
                "hello",
                &pairs.party_b.public_key,
                &pairs.party_a.private_key,
                None,
            )
            .unwrap();
        let plain = KeyAgreement::Dh
            .decrypt(
                &ct,
                &pairs.party_a.public_key,
                &pairs.party_b.private_key,
                None,
            )
            .unwrap();
        assert_eq!(plain, "hello");
    }

    #[test]
    fn test_encrypt_decrypt_named_secret_algorithm() {
        let pairs = KeyAgreement::Dh.generate_key_pairs().unwrap();
        for algorithm in ["AES", "DESede", "Blowfish"] {
            let ct = KeyAgreement::Dh
                .encrypt(
                    "named",
                    &pairs.party_b.public_key,
                    &pairs.party_a.private_key,
                    Some(algorithm),
                )
                .unwrap();
            let plain = KeyAgreement::Dh
                .decrypt(
                    &ct,
                    &pairs.party_a.public_key,
                    &pairs.party_b.private_key,
                    Some(algorithm),
                )
                .unwrap();
            assert_eq!(plain, "named", "{}", algorithm);
        }
    }

    #[test]
    fn test_unknown_secret_algorithm() {
        let pairs = KeyAgreement::Dh.generate_key_pairs().unwrap();
        assert!(matches!(
            KeyAgreement::Dh.encrypt(
                "x",
                &pairs.party_b.public_key,
                &pairs.party_a.private_key,
                Some("ROT13")
            ),
            Err(Error::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_domain_mismatch() {
        let pairs = KeyAgreement::Dh.generate_key_pairs().unwrap();
        let other = generate_in(&DhGroup::Modp2048.domain().unwrap()).unwrap();
        assert!(matches!(
            KeyAgreement::Dh.shared_secret(&other.public_key, &pairs.party_a.private_key),
            Err(Error::InvalidKey(_))
        ));
    }

    #[test]
    fn test_rejects_degenerate_public_value() {
        let domain = DhGroup::Modp1024.domain().unwrap();
        for y in [BigUint::from(1u32), &domain.p - BigUint::from(1u32)] {
            let forged = encode_key(&EncodedKey::Public {
                p: domain.p.to_bytes_be(),
                g: domain.g.to_bytes_be(),
                y: y.to_bytes_be(),
            })
            .unwrap();
            assert!(matches!(
                KeyAgreement::Dh.derive_party_key_pair(&codec::encode(&forged)),
                Err(Error::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn test_rejects_swapped_keys() {
        let pairs = KeyAgreement::Dh.generate_key_pairs().unwrap();
        assert!(matches!(
            KeyAgreement::Dh.shared_secret(&pairs.party_a.private_key, &pairs.party_b.public_key),
            Err(Error::InvalidKey(_))
        ));
    }

    #[test]
    fn test_garbage_key() {
        assert!(matches!(
            KeyAgreement::Dh.derive_party_key_pair("AAAA"),
            Err(Error::InvalidKey(_))
        ));
        assert!(matches!(
            KeyAgreement::Dh.derive_party_key_pair("%%%"),
            Err(Error::Decoding(_))
        ));
    }
}
