//! # Primitive Invocation Layer
//!
//! The single place that talks to the cipher, digest and MAC crates. Every
//! algorithm family routes through here, and every failure a primitive can
//! raise leaves this module as a [`crate::Error`].
//!
//! ## Block Cipher Framing
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     CBC FRAME (hex at the boundary)                     │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │   ┌────────────────┬──────────────────────────────────────────────┐     │
//! │   │  IV            │  CBC(key, IV, PKCS#7(plaintext))             │     │
//! │   │  block_size    │  n × block_size                              │     │
//! │   └────────────────┴──────────────────────────────────────────────┘     │
//! │                                                                         │
//! │   A fresh random IV is drawn for every encryption.                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cipher::{
    block_padding::Pkcs7, BlockCipher, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit,
    StreamCipher,
};
use hmac::Mac;
use rand::{rngs::OsRng, RngCore};
use sha2::Digest;

use crate::error::{Error, Result};

/// Fill a fresh buffer from the operating system's CSPRNG
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

// ============================================================================
// BLOCK CIPHERS
// ============================================================================

/// CBC-encrypt with a random IV, returning `IV || ciphertext`
pub fn cbc_encrypt<C>(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>>
where
    C: BlockCipher + BlockEncryptMut + KeyInit,
{
    let iv = random_bytes(C::block_size());
    let mut framed = iv.clone();
    framed.extend(cbc_encrypt_with_iv::<C>(key, &iv, plaintext)?);
    Ok(framed)
}

/// CBC-decrypt an `IV || ciphertext` frame
pub fn cbc_decrypt<C>(key: &[u8], framed: &[u8]) -> Result<Vec<u8>>
where
    C: BlockCipher + BlockDecryptMut + KeyInit,
{
    let block = C::block_size();
    if framed.len() < 2 * block {
        return Err(Error::Decryption(format!(
            "Ciphertext too short: {} bytes, need at least {}",
            framed.len(),
            2 * block
        )));
    }
    let (iv, ciphertext) = framed.split_at(block);
    cbc_decrypt_with_iv::<C>(key, iv, ciphertext)
}

/// CBC-encrypt under a caller-supplied IV
pub fn cbc_encrypt_with_iv<C>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>>
where
    C: BlockCipher + BlockEncryptMut + KeyInit,
{
    let encryptor = cbc::Encryptor::<C>::new_from_slices(key, iv)?;
    Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// CBC-decrypt under a caller-supplied IV
pub fn cbc_decrypt_with_iv<C>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>>
where
    C: BlockCipher + BlockDecryptMut + KeyInit,
{
    if ciphertext.is_empty() || ciphertext.len() % C::block_size() != 0 {
        return Err(Error::Decryption(format!(
            "Ciphertext length {} is not a positive multiple of the {}-byte block",
            ciphertext.len(),
            C::block_size()
        )));
    }
    let decryptor = cbc::Decryptor::<C>::new_from_slices(key, iv)?;
    Ok(decryptor.decrypt_padded_vec_mut::<Pkcs7>(ciphertext)?)
}

// ============================================================================
// STREAM CIPHERS
// ============================================================================

/// Apply an RC4 keystream (encryption and decryption are the same operation)
pub fn rc4_apply(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut rc4 = rc4::Rc4::<cipher::consts::U16>::new_from_slice(key)?;
    let mut buf = data.to_vec();
    rc4.apply_keystream(&mut buf);
    Ok(buf)
}

// ============================================================================
// DIGESTS & MACS
// ============================================================================

/// Digest `data` with any RustCrypto hash
pub fn digest<D: Digest>(data: &[u8]) -> Vec<u8> {
    D::digest(data).to_vec()
}

/// HMAC `data` under `key`
pub fn hmac<M: Mac + KeyInit>(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac = new_mac::<M>(key)?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Constant-time HMAC verification
pub fn hmac_verify<M: Mac + KeyInit>(key: &[u8], data: &[u8], tag: &[u8]) -> Result<bool> {
    let mut mac = new_mac::<M>(key)?;
    mac.update(data);
    Ok(mac.verify_slice(tag).is_ok())
}

fn new_mac<M: Mac + KeyInit>(key: &[u8]) -> Result<M> {
    if key.is_empty() {
        return Err(Error::InvalidKey("HMAC key must not be empty".into()));
    }
    <M as Mac>::new_from_slice(key).map_err(|e| Error::InvalidKey(format!("HMAC key rejected: {}", e)))
}

/// Render a digest as hex in the configured style
pub fn digest_hex(bytes: &[u8], style: crate::config::DigestHexStyle) -> String {
    use crate::config::DigestHexStyle;

    let full = hex::encode(bytes);
    match style {
        DigestHexStyle::FixedWidth => full,
        DigestHexStyle::TrimLeadingZeros => {
            let trimmed = full.trim_start_matches('0');
            if trimmed.is_empty() {
                "0".to_string()
            } else {
                trimmed.to_string()
            }
        }
    }
}

/// Force odd parity on every byte, as DES keys expect
pub fn set_des_parity(key: &mut [u8]) {
    for byte in key.iter_mut() {
        let high = *byte & 0xfe;
        *byte = if high.count_ones() % 2 == 0 { high | 1 } else { high };
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DigestHexStyle;

    #[test]
    fn test_cbc_round_trip() {
        let key = [7u8; 16];
        let framed = cbc_encrypt::<aes::Aes128>(&key, b"sixteen byte msg").unwrap();
        // IV + two blocks (full padding block appended)
        assert_eq!(framed.len(), 16 + 32);
        let plain = cbc_decrypt::<aes::Aes128>(&key, &framed).unwrap();
        assert_eq!(plain, b"sixteen byte msg");
    }

    #[test]
    fn test_cbc_iv_is_random() {
        let key = [7u8; 16];
        let a = cbc_encrypt::<aes::Aes128>(&key, b"same").unwrap();
        let b = cbc_encrypt::<aes::Aes128>(&key, b"same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_cbc_rejects_truncated_frame() {
        let key = [7u8; 16];
        let framed = cbc_encrypt::<aes::Aes128>(&key, b"hello").unwrap();
        let err = cbc_decrypt::<aes::Aes128>(&key, &framed[..20]).unwrap_err();
        assert!(matches!(err, Error::Decryption(_)));
    }

    #[test]
    fn test_cbc_wrong_key_length() {
        let err = cbc_encrypt::<aes::Aes128>(&[1u8; 5], b"x").unwrap_err();
        assert!(matches!(err, Error::InvalidKey(_)));
    }

    #[test]
    fn test_rc4_is_symmetric() {
        let key = [3u8; 16];
        let ct = rc4_apply(&key, b"stream").unwrap();
        assert_ne!(ct, b"stream");
        assert_eq!(rc4_apply(&key, &ct).unwrap(), b"stream");
    }

    #[test]
    fn test_hmac_rejects_empty_key() {
        let err = hmac::<hmac::Hmac<sha2::Sha256>>(&[], b"data").unwrap_err();
        assert!(matches!(err, Error::InvalidKey(_)));
    }

    #[test]
    fn test_digest_hex_styles() {
        let bytes = [0x00, 0x0a, 0xbc];
        assert_eq!(digest_hex(&bytes, DigestHexStyle::FixedWidth), "000abc");
        assert_eq!(digest_hex(&bytes, DigestHexStyle::TrimLeadingZeros), "abc");
        assert_eq!(digest_hex(&[0, 0], DigestHexStyle::TrimLeadingZeros), "0");
    }

    #[test]
    fn test_des_parity() {
        let mut key = [0x00, 0x01, 0xfe, 0xff];
        set_des_parity(&mut key);
        assert!(key.iter().all(|b| b.count_ones() % 2 == 1));
        assert_eq!(key, [0x01, 0x01, 0xfe, 0xfe]);
    }
}
