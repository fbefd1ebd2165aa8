//! Gateway API key storage.
//!
//! The key is read from `NEUROSTUDY_API_KEY` first, then from the OS keyring.

use crate::error::ConfigError;

pub const API_KEY_ENV: &str = "NEUROSTUDY_API_KEY";
const API_KEY_ENTRY: &str = "gateway_api_key";

/// Thin wrapper around the OS keyring for credential storage.
pub mod keyring_store {
    use crate::error::ConfigError;

    const SERVICE: &str = "neurostudy";

    fn keyring_error(e: keyring::Error) -> ConfigError {
        ConfigError::InvalidValue {
            key: "keyring".into(),
            message: e.to_string(),
        }
    }

    pub fn get(key: &str) -> Result<Option<String>, ConfigError> {
        let entry = keyring::Entry::new(SERVICE, key).map_err(keyring_error)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(keyring_error(e)),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), ConfigError> {
        let entry = keyring::Entry::new(SERVICE, key).map_err(keyring_error)?;
        entry.set_password(value).map_err(keyring_error)
    }

    pub fn delete(key: &str) -> Result<(), ConfigError> {
        let entry = keyring::Entry::new(SERVICE, key).map_err(keyring_error)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(keyring_error(e)),
        }
    }
}

/// The gateway API key, if one is configured.
///
/// A keyring failure is logged and treated as "no key"; the gateway call then
/// fails with a not-configured error the user can act on.
pub fn api_key() -> Option<String> {
    if let Some(key) = std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()) {
        return Some(key);
    }
    match keyring_store::get(API_KEY_ENTRY) {
        Ok(key) => key,
        Err(e) => {
            tracing::warn!(error = %e, "could not read API key from keyring");
            None
        }
    }
}

pub fn set_api_key(key: &str) -> Result<(), ConfigError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "api_key".into(),
            message: "key is empty".into(),
        });
    }
    keyring_store::set(API_KEY_ENTRY, key)
}

pub fn clear_api_key() -> Result<(), ConfigError> {
    keyring_store::delete(API_KEY_ENTRY)
}
