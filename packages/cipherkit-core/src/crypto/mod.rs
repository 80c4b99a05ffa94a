//! # Algorithm Families
//!
//! Every algorithm reachable through cipherkit, grouped by family.
//!
//! ## Family Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ALGORITHM FAMILIES                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌──────────────────────┐                    │
//! │  │  OneWay              │   │  Hmac                │                    │
//! │  │  MD2 MD4 MD5 SHA     │   │  HmacMD5 .. SHA512   │                    │
//! │  │  SHA-256/384/512     │   │                      │                    │
//! │  │  encrypt → hex       │   │  generate_key        │                    │
//! │  └──────────────────────┘   │  encrypt → hex       │                    │
//! │                             └──────────────────────┘                    │
//! │  ┌──────────────────────┐   ┌──────────────────────┐                    │
//! │  │  Symmetric           │   │  Pbe                 │                    │
//! │  │  AES DES DESede      │   │  PBEWithMD5AndDES    │                    │
//! │  │  Blowfish RC2 RC4    │   │  PBEWithHmacSHA256.. │                    │
//! │  │  IDEA Rijndael ...   │   │                      │                    │
//! │  │  generate_key        │   │  encrypt → salt, hex │                    │
//! │  │  encrypt / decrypt   │   │  decrypt             │                    │
//! │  └──────────────────────┘   └──────────────────────┘                    │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌──────────────────────┐                    │
//! │  │  Asymmetric          │   │  KeyAgreement        │                    │
//! │  │  RSA, DSA            │   │  DH                  │                    │
//! │  │  generate_key_pair   │   │  generate_key_pairs  │                    │
//! │  │  encrypt / decrypt   │   │  encrypt / decrypt   │                    │
//! │  │  sign / verify       │   │  shared_secret       │                    │
//! │  └──────────────────────┘   └──────────────────────┘                    │
//! │                                                                         │
//! │  ┌──────────────────────┐                                               │
//! │  │  EllipticCurve       │   keys and salts: Base64                      │
//! │  │  EC (ECIES, ECDSA)   │   ciphertext, digests, signatures: hex        │
//! │  │  generate_key_pair   │                                               │
//! │  │  encrypt / decrypt   │                                               │
//! │  │  sign / verify       │                                               │
//! │  └──────────────────────┘                                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Considerations
//!
//! 1. **Legacy Algorithms**: MD2, MD4, MD5, DES, RC2, RC4 and SHA-1 based
//!    schemes are offered for interoperability and log a warning when used
//! 2. **Key Zeroization**: Intermediate secrets and derived keys are zeroized
//!    once the operation finishes
//! 3. **Secure Random**: Keys, IVs, salts and nonces come from
//!    `rand::rngs::OsRng`
//! 4. **Fresh IVs**: Every block-cipher encryption draws a new IV

mod asymmetric;
mod dh;
mod ecc;
mod encryption;
mod kdf;
mod keys;
mod mac;
mod oneway;
mod pbe;
mod signing;
mod symmetric;

pub use asymmetric::Asymmetric;
pub use dh::{DhGroup, KeyAgreement};
pub use ecc::{EcCurve, EllipticCurve};
pub use keys::{DhPartyKeyPairs, KeyPair};
pub use mac::Hmac;
pub use oneway::OneWay;
pub use pbe::{Pbe, PbeOutput};
pub use signing::{KeyFamily, SignAlgorithm};
pub use symmetric::Symmetric;
