//! Process-wide configuration
//!
//! Lives in its own test binary: the configuration can only be installed
//! once per process, so everything runs inside a single test.

use cipherkit_core::crypto::{Asymmetric, EcCurve, EllipticCurve, KeyAgreement, OneWay, Pbe};
use cipherkit_core::{codec, config, initialize, CryptoConfig, DhGroup, DigestHexStyle, Error};

#[test]
fn test_initialize_once() {
    let config = CryptoConfig::from_json(
        r#"{
            "digest_hex_style": "trim_leading_zeros",
            "pbe_salt_len": 16,
            "rsa_key_bits": 768,
            "ec_curve": "secp384r1",
            "dh_group": "modp2048"
        }"#,
    )
    .unwrap();
    initialize(config).unwrap();

    let installed = config::current();
    assert_eq!(installed.digest_hex_style, DigestHexStyle::TrimLeadingZeros);
    assert_eq!(installed.pbe_salt_len, 16);
    assert_eq!(installed.ec_curve, EcCurve::Secp384r1);
    assert_eq!(installed.dh_group, DhGroup::Modp2048);

    // A digest whose first byte is zero loses its leading zeros
    let input = (0u32..)
        .map(|i| i.to_string())
        .find(|s| OneWay::Md5.digest(s.as_bytes()).unwrap()[0] == 0)
        .unwrap();
    let rendered = OneWay::Md5.encrypt(&input).unwrap();
    assert!(rendered.len() < 32);
    assert!(!rendered.starts_with('0'));

    // Salt length
    let out = Pbe::PbeWithMd5AndDes.encrypt("x", "pw").unwrap();
    assert_eq!(codec::decode(&out.salt).unwrap().len(), 16);
    assert_eq!(
        Pbe::PbeWithMd5AndDes
            .decrypt(&out.ciphertext, "pw", &out.salt)
            .unwrap(),
        "x"
    );

    // Curve
    let pair = EllipticCurve::Ec.generate_key_pair().unwrap();
    assert_eq!(EcCurve::of_public_key(&pair.public_key).unwrap(), EcCurve::Secp384r1);

    // RSA modulus: a PKCS#1 v1.5 signature is exactly one modulus long
    let rsa = Asymmetric::Rsa.generate_key_pair().unwrap();
    let signature = Asymmetric::Rsa.sign("msg", &rsa.private_key, None).unwrap();
    assert_eq!(signature.len(), 2 * 768 / 8);

    // DH group: the raw secret is left-padded to the modulus length
    let pairs = KeyAgreement::Dh.generate_key_pairs().unwrap();
    let secret = KeyAgreement::Dh
        .shared_secret(&pairs.party_b.public_key, &pairs.party_a.private_key)
        .unwrap();
    assert_eq!(codec::decode(&secret).unwrap().len(), 2048 / 8);

    let err = initialize(CryptoConfig::default()).unwrap_err();
    assert_eq!(err, Error::AlreadyInitialized);
}
