//! # Error Handling
//!
//! One error taxonomy for every algorithm family. Failures raised by the
//! underlying RustCrypto crates are converted here (or at the primitive
//! invocation layer) so callers only ever see [`Error`].
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Catalog Errors                                                    │
//! │  │   ├── UnsupportedAlgorithm   - Unknown or unavailable algorithm     │
//! │  │   ├── UnsupportedOperation   - Operation invalid for the variant    │
//! │  │   └── ProviderInitialization - Extended provider not available      │
//! │  │                                                                      │
//! │  ├── Key Errors                                                        │
//! │  │   ├── InvalidKey             - Malformed or wrong-length key        │
//! │  │   └── KeyGenerationFailed    - Key or parameter generation failed   │
//! │  │                                                                      │
//! │  ├── Encoding Errors                                                   │
//! │  │   └── Decoding               - Malformed Base64 / hex / UTF-8       │
//! │  │                                                                      │
//! │  ├── Cipher Errors                                                     │
//! │  │   ├── Decryption             - Corrupt ciphertext or wrong key      │
//! │  │   ├── Encryption             - Cipher refused the input             │
//! │  │   └── SigningFailed          - Signature could not be produced      │
//! │  │                                                                      │
//! │  └── Internal Errors                                                   │
//! │      ├── AlreadyInitialized     - Configuration installed twice        │
//! │      ├── ConfigurationLocked    - Defaults already fixed by an op      │
//! │      └── Internal               - Should not happen                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Signature verification is the one place where a failure is not an error:
//! a signature that does not match yields `Ok(false)`.

use thiserror::Error;

/// Result type alias for cipherkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for cipherkit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ========================================================================
    // Catalog Errors (100-199)
    // ========================================================================

    /// Unknown algorithm name, or an algorithm no registered provider supplies
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The variant exists but cannot perform the requested operation
    #[error("{algorithm} does not support {operation}")]
    UnsupportedOperation {
        /// Variant name
        algorithm: &'static str,
        /// Operation that was refused
        operation: &'static str,
    },

    /// The extended provider could not be registered
    #[error("Failed to register security provider: {0}")]
    ProviderInitialization(String),

    // ========================================================================
    // Key Errors (200-299)
    // ========================================================================

    /// Malformed key material or wrong key length
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Key or domain parameter generation failed
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    // ========================================================================
    // Encoding Errors (300-399)
    // ========================================================================

    /// Malformed Base64, hex, or UTF-8 input
    #[error("Decoding failed: {0}")]
    Decoding(String),

    // ========================================================================
    // Cipher Errors (400-499)
    // ========================================================================

    /// Ciphertext cannot be decrypted under the supplied key
    #[error("Decryption failed: {0}")]
    Decryption(String),

    /// Encryption failed
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// Signing failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    // ========================================================================
    // Internal Errors (900-999)
    // ========================================================================

    /// Configuration was already installed
    #[error("cipherkit has already been initialized.")]
    AlreadyInitialized,

    /// An operation ran before `initialize` and fixed the default configuration
    #[error("Configuration already fixed by an earlier operation; call initialize first.")]
    ConfigurationLocked,

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Numeric error code
    ///
    /// - 100-199: Catalog
    /// - 200-299: Keys
    /// - 300-399: Encoding
    /// - 400-499: Cipher operations
    /// - 900-999: Internal
    pub fn code(&self) -> i32 {
        match self {
            Error::UnsupportedAlgorithm(_) => 100,
            Error::UnsupportedOperation { .. } => 101,
            Error::ProviderInitialization(_) => 102,

            Error::InvalidKey(_) => 200,
            Error::KeyGenerationFailed(_) => 201,

            Error::Decoding(_) => 300,

            Error::Decryption(_) => 400,
            Error::Encryption(_) => 401,
            Error::SigningFailed(_) => 402,

            Error::AlreadyInitialized => 900,
            Error::ConfigurationLocked => 902,
            Error::Internal(_) => 901,
        }
    }

    /// Whether the error was caused by data the caller supplied
    ///
    /// These are the errors a web or persistence layer should report back
    /// as bad input rather than as a server fault.
    pub fn is_caller_input(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedAlgorithm(_)
                | Error::UnsupportedOperation { .. }
                | Error::InvalidKey(_)
                | Error::Decoding(_)
                | Error::Decryption(_)
        )
    }
}

// ============================================================================
// ERROR CONVERSIONS
// ============================================================================

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::Decoding(format!("Invalid Base64: {}", err))
    }
}

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Error::Decoding(format!("Invalid hex: {}", err))
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Decoding(format!("Invalid UTF-8: {}", err))
    }
}

impl From<cipher::InvalidLength> for Error {
    fn from(_: cipher::InvalidLength) -> Self {
        Error::InvalidKey("Key or IV has the wrong length".into())
    }
}

impl From<cipher::block_padding::UnpadError> for Error {
    fn from(_: cipher::block_padding::UnpadError) -> Self {
        Error::Decryption("Bad padding (corrupt ciphertext or wrong key)".into())
    }
}

impl From<rsa::Error> for Error {
    fn from(err: rsa::Error) -> Self {
        match err {
            rsa::Error::Decryption => Error::Decryption("RSA decryption failed".into()),
            rsa::Error::MessageTooLong => Error::Encryption("RSA block too long for modulus".into()),
            rsa::Error::Verification => Error::SigningFailed("RSA verification failed".into()),
            other => Error::InvalidKey(format!("RSA: {}", other)),
        }
    }
}

impl From<signature::Error> for Error {
    fn from(err: signature::Error) -> Self {
        Error::SigningFailed(err.to_string())
    }
}

impl From<pkcs8::Error> for Error {
    fn from(err: pkcs8::Error) -> Self {
        Error::InvalidKey(format!("Invalid PKCS#8 key: {}", err))
    }
}

impl From<pkcs8::spki::Error> for Error {
    fn from(err: pkcs8::spki::Error) -> Self {
        Error::InvalidKey(format!("Invalid public key: {}", err))
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::InvalidKey(format!("Malformed key encoding: {}", err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decoding(format!("Invalid configuration document: {}", err))
    }
}

// ============================================================================
// TESTS
// ============================================================================
