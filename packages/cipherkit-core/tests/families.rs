//! End-to-end checks of every algorithm family through the public API

use cipherkit_core::crypto::{
    Asymmetric, EcCurve, EllipticCurve, Hmac, KeyAgreement, OneWay, Pbe, Symmetric,
};
use cipherkit_core::{codec, Algorithm, Error};

#[test]
fn test_codec_round_trip() {
    assert_eq!(codec::encode(b""), "");
    assert_eq!(codec::encode_str("hello"), "aGVsbG8=");
    assert_eq!(codec::decode_to_string("aGVsbG8=").unwrap(), "hello");
    assert!(matches!(codec::decode("a$b"), Err(Error::Decoding(_))));
}

#[test]
fn test_digest_by_name() {
    let md5: OneWay = "MD5".parse().unwrap();
    assert_eq!(md5.encrypt("").unwrap(), "d41d8cd98f00b204e9800998ecf8427e");
    assert_eq!(
        "SHA".parse::<OneWay>().unwrap().encrypt("").unwrap(),
        "da39a3ee5e6b4b0d3255bfef95601890afd80709"
    );
}

#[test]
fn test_hmac_by_name() {
    let hmac: Hmac = "HmacSHA1".parse().unwrap();
    let key = hmac.generate_key().unwrap();
    let mac = hmac.encrypt("message", &key).unwrap();
    assert_eq!(mac.len(), 40);
    assert!(hmac.verify("message", &key, &mac).unwrap());
}

#[test]
fn test_symmetric_family() {
    for name in ["AES", "DES", "DESede", "Blowfish", "RC2", "RC4"] {
        let variant: Symmetric = name.parse().unwrap();
        let key = variant.generate_key().unwrap();
        let ciphertext = variant.encrypt("hello world", &key).unwrap();
        assert_eq!(variant.decrypt(&ciphertext, &key).unwrap(), "hello world", "{}", name);
    }
}

#[cfg(feature = "extended-provider")]
#[test]
fn test_provider_variants() {
    for name in ["IDEA", "Rijndael", "Serpent", "Twofish"] {
        let variant: Symmetric = name.parse().unwrap();
        assert!(variant.info().requires_external_provider);
        let key = variant.generate_key().unwrap();
        let ciphertext = variant.encrypt("provider", &key).unwrap();
        assert_eq!(variant.decrypt(&ciphertext, &key).unwrap(), "provider", "{}", name);
    }
    assert!(cipherkit_core::provider::is_registered());
    assert!(matches!(
        Symmetric::Rc5.generate_key(),
        Err(Error::UnsupportedAlgorithm(_))
    ));
}

#[cfg(not(feature = "extended-provider"))]
#[test]
fn test_provider_variants_unavailable() {
    assert!(matches!(
        Symmetric::Idea.generate_key(),
        Err(Error::ProviderInitialization(_))
    ));
    assert!(matches!(
        OneWay::Md4.encrypt("abc"),
        Err(Error::ProviderInitialization(_))
    ));
}

#[test]
fn test_pbe_family() {
    let out = Pbe::PbeWithMd5AndDes.encrypt("hello", "pw").unwrap();
    assert_eq!(
        Pbe::PbeWithMd5AndDes
            .decrypt(&out.ciphertext, "pw", &out.salt)
            .unwrap(),
        "hello"
    );
}

#[test]
fn test_rsa_family() {
    let pair = Asymmetric::Rsa.generate_key_pair().unwrap();

    let ciphertext = Asymmetric::Rsa.encrypt("secret", &pair.public_key).unwrap();
    assert_eq!(
        Asymmetric::Rsa.decrypt(&ciphertext, &pair.private_key).unwrap(),
        "secret"
    );

    let signature = Asymmetric::Rsa.sign("msg", &pair.private_key, None).unwrap();
    assert!(Asymmetric::Rsa
        .verify("msg", &pair.public_key, &signature, None)
        .unwrap());
    assert!(!Asymmetric::Rsa
        .verify("msg2", &pair.public_key, &signature, None)
        .unwrap());
}

#[test]
fn test_dsa_is_sign_only() {
    let dsa: Asymmetric = "DSA".parse().unwrap();
    assert!(dsa.info().sign_only);
    let err = dsa.encrypt("x", "whatever").unwrap_err();
    assert_eq!(err.code(), 101);
}

#[test]
fn test_key_agreement_family() {
    let pairs = KeyAgreement::Dh.generate_key_pairs().unwrap();
    let ciphertext = KeyAgreement::Dh
        .encrypt(
            "hello",
            &pairs.party_b.public_key,
            &pairs.party_a.private_key,
            None,
        )
        .unwrap();
    assert_eq!(
        KeyAgreement::Dh
            .decrypt(
                &ciphertext,
                &pairs.party_a.public_key,
                &pairs.party_b.private_key,
                None,
            )
            .unwrap(),
        "hello"
    );
}

#[test]
fn test_elliptic_curve_family() {
    let pair = EllipticCurve::Ec.generate_key_pair_on(EcCurve::Secp256k1).unwrap();
    let ciphertext = EllipticCurve::Ec.encrypt("ecies", &pair.public_key).unwrap();
    assert_eq!(
        EllipticCurve::Ec.decrypt(&ciphertext, &pair.private_key).unwrap(),
        "ecies"
    );

    let signature = EllipticCurve::Ec.sign("msg", &pair.private_key, None).unwrap();
    assert!(EllipticCurve::Ec
        .verify("msg", &pair.public_key, &signature, Some("SHA256withECDSA"))
        .unwrap());
}

#[test]
fn test_unknown_names_are_rejected() {
    assert!(matches!("ROT13".parse::<Symmetric>(), Err(Error::UnsupportedAlgorithm(_))));
    assert!(matches!("SHA3".parse::<OneWay>(), Err(Error::UnsupportedAlgorithm(_))));
    assert!(matches!("ElGamal".parse::<Asymmetric>(), Err(Error::UnsupportedAlgorithm(_))));
}

#[test]
fn test_every_variant_belongs_to_its_family() {
    assert!(Symmetric::all().iter().all(|v| v.to_string().parse::<Symmetric>().unwrap() == *v));
    assert!(OneWay::all().iter().all(|v| v.to_string().parse::<OneWay>().unwrap() == *v));
    assert!(Hmac::all().iter().all(|v| v.to_string().parse::<Hmac>().unwrap() == *v));
    assert!(Pbe::all().iter().all(|v| v.to_string().parse::<Pbe>().unwrap() == *v));
}
