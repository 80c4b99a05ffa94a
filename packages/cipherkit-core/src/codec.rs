//! # Codec
//!
//! Reversible binary ⇄ text encodings used to carry keys, salts and
//! ciphertext through string-typed interfaces.
//!
//! | Carries | Encoding |
//! |---------|----------|
//! | Keys, salts, shared secrets | Base64 (standard alphabet, padded) |
//! | Ciphertext, digests, signatures | lowercase hex |

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::Result;

/// Base64-encode raw bytes
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Base64-encode the UTF-8 bytes of a string
pub fn encode_str(plaintext: &str) -> String {
    encode(plaintext.as_bytes())
}

/// Decode Base64 text
pub fn decode(encoded: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(encoded.trim())?)
}

/// Decode Base64 text that carries UTF-8
pub fn decode_to_string(encoded: &str) -> Result<String> {
    Ok(String::from_utf8(decode(encoded)?)?)
}

/// Lowercase hex encoding
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode hex text (either case)
pub fn decode_hex(encoded: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(encoded.trim())?)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(encode(b""), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
        assert_eq!(encode_hex(b""), "");
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(encode_str("hello world"), "aGVsbG8gd29ybGQ=");
        assert_eq!(decode_to_string("aGVsbG8gd29ybGQ=").unwrap(), "hello world");
        assert_eq!(encode_hex(&[0x00, 0xab, 0xff]), "00abff");
        assert_eq!(decode_hex("00ABff").unwrap(), vec![0x00, 0xab, 0xff]);
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(decode("@@@@"), Err(Error::Decoding(_))));
        assert!(matches!(decode_hex("abc"), Err(Error::Decoding(_))));
        assert!(matches!(decode_hex("zz"), Err(Error::Decoding(_))));
        // Valid Base64 of bytes that are not UTF-8
        assert!(matches!(decode_to_string("/w=="), Err(Error::Decoding(_))));
    }

    proptest! {
        #[test]
        fn prop_base64_round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
            prop_assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
        }

        #[test]
        fn prop_hex_round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
            prop_assert_eq!(decode_hex(&encode_hex(&bytes)).unwrap(), bytes);
        }
    }
}
