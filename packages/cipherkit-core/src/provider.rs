//! # Extended Provider
//!
//! Some variants (MD4, IDEA, Rijndael, Serpent, Twofish, RC5) are not part
//! of the default algorithm set. They become usable once the extended
//! provider is registered, which happens lazily the first time such a
//! variant is invoked.
//!
//! Registration is a one-time, process-wide side effect. Concurrent first
//! callers are serialized by the `OnceCell`; exactly one of them runs the
//! registration and the rest observe its result.
//!
//! The provider is compiled in with the `extended-provider` feature. Without
//! it, registration fails with
//! [`ProviderInitialization`](crate::error::Error::ProviderInitialization).

use once_cell::sync::OnceCell;

use crate::error::Result;

/// A registered algorithm provider
#[derive(Debug)]
pub struct ProviderInfo {
    /// Provider name
    pub name: &'static str,
    /// Algorithm names the provider supplies
    pub algorithms: &'static [&'static str],
}

static EXTENDED: OnceCell<ProviderInfo> = OnceCell::new();

/// Register the extended provider if it is not registered yet
///
/// Idempotent: later calls return the same registration.
pub fn ensure_registered() -> Result<&'static ProviderInfo> {
    EXTENDED.get_or_try_init(register)
}

/// Whether the extended provider has been registered
pub fn is_registered() -> bool {
    EXTENDED.get().is_some()
}

/// Whether the registered extended provider supplies `algorithm`
pub fn supplies(algorithm: &str) -> bool {
    EXTENDED
        .get()
        .map(|p| p.algorithms.iter().any(|a| a.eq_ignore_ascii_case(algorithm)))
        .unwrap_or(false)
}

#[cfg(feature = "extended-provider")]
fn register() -> Result<ProviderInfo> {
    let info = ProviderInfo {
        name: "cipherkit-extended",
        // RC5 is catalogued but no implementation ships with this provider.
        algorithms: &["MD4", "IDEA", "Rijndael", "Serpent", "Twofish"],
    };
    tracing::info!(
        provider = info.name,
        algorithms = ?info.algorithms,
        "Registered extended security provider"
    );
    Ok(info)
}

#[cfg(not(feature = "extended-provider"))]
fn register() -> Result<ProviderInfo> {
    tracing::warn!("Extended security provider requested but not compiled in");
    Err(crate::error::Error::ProviderInitialization(
        "the extended provider is not available (enable the `extended-provider` feature)".into(),
    ))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(all(test, feature = "extended-provider"))]
mod tests {
    use super::*;

    #[test]
    fn test_registration_is_idempotent() {
        let first = ensure_registered().unwrap() as *const ProviderInfo;
        let second = ensure_registered().unwrap() as *const ProviderInfo;
        assert_eq!(first, second);
        assert!(is_registered());
    }

    #[test]
    fn test_concurrent_registration() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| ensure_registered().map(|p| p as *const ProviderInfo as usize)))
            .collect();
        let addrs: Vec<usize> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_supplies() {
        ensure_registered().unwrap();
        assert!(supplies("idea"));
        assert!(supplies("MD4"));
        assert!(!supplies("RC5"));
        assert!(!supplies("AES"));
    }
}
