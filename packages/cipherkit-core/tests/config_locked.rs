//! Installing a configuration after an operation already ran
//!
//! Own test binary: the first operation fixes the defaults for the process.

use cipherkit_core::crypto::OneWay;
use cipherkit_core::{config, initialize, CryptoConfig, DigestHexStyle, Error};

#[test]
fn test_initialize_after_first_operation_is_locked() {
    OneWay::Md5.encrypt("warmup").unwrap();

    let config =
        CryptoConfig::from_json(r#"{ "digest_hex_style": "trim_leading_zeros" }"#).unwrap();
    let err = initialize(config).unwrap_err();
    assert_eq!(err, Error::ConfigurationLocked);
    assert!(err.to_string().contains("earlier operation"));

    // The defaults stay in force
    assert_eq!(config::current().digest_hex_style, DigestHexStyle::FixedWidth);
    assert_eq!(
        OneWay::Md5.encrypt("").unwrap(),
        "d41d8cd98f00b204e9800998ecf8427e"
    );
}
